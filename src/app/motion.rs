//! Reactive hooks over the [`crate::motion`] engine.
//!
//! The engine lives in a local `StoredValue` context that only exists in the
//! hydrated bundle. Every hook does its wiring inside a run-once effect, so
//! server rendering and the first client render agree on the default values
//! and listeners only appear after mount.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;

use crate::motion::{
    active_section, scatter, CountUpRunner, ElementLayout, Particle, RevealAnimator, Scheduler,
    ScrollChrome, ScrollChromeState, SectionAnchor, TypingEffect, TypingRunner, TypingTimings,
    ViewportSignal,
};
use crate::site::ChromeSettings;

/// Distance below the top of the viewport used to pick the active section.
pub const SECTION_OFFSET_PX: u32 = 100;

#[derive(Clone)]
pub struct Motion {
    pub viewport: ViewportSignal,
    pub reveal: Rc<RevealAnimator>,
    pub scheduler: Rc<dyn Scheduler>,
    pub layout: Rc<dyn ElementLayout>,
    pub random: fn() -> f64,
}

pub type MotionContext = StoredValue<Motion, LocalStorage>;

impl Motion {
    #[cfg(feature = "hydrate")]
    fn browser() -> Self {
        use crate::motion::browser::{random, BrowserScheduler, DomLayout, WindowScrollSource};

        let viewport = match WindowScrollSource::new() {
            Some(source) => ViewportSignal::new(Rc::new(source)),
            None => {
                log::warn!("no window; scroll-driven effects are disabled");
                ViewportSignal::detached()
            }
        };
        let layout: Rc<dyn ElementLayout> = Rc::new(DomLayout);
        Self {
            reveal: Rc::new(RevealAnimator::new(&viewport, layout.clone())),
            viewport,
            scheduler: Rc::new(BrowserScheduler),
            layout,
            random,
        }
    }
}

pub fn provide_motion() {
    #[cfg(feature = "hydrate")]
    provide_context::<MotionContext>(StoredValue::new_local(Motion::browser()));
}

pub fn use_motion() -> Option<MotionContext> {
    use_context::<MotionContext>()
}

/// Keeps `value` alive until the current reactive owner is cleaned up.
fn hold_until_cleanup<T: 'static>(value: T) {
    let slot = StoredValue::new_local(Some(value));
    on_cleanup(move || {
        let _ = slot.try_update_value(Option::take);
    });
}

/// Runs `setup` once after mount if the motion engine is available.
fn with_motion_after_mount(setup: impl Fn(&Motion) + Send + Sync + 'static) {
    let motion = use_motion();
    Effect::watch(
        || (),
        move |_, _, _| {
            if let Some(motion) = motion.and_then(|m| m.try_get_value()) {
                setup(&motion);
            }
        },
        true,
    );
}

pub fn use_scroll_chrome(settings: ChromeSettings) -> ReadSignal<ScrollChromeState> {
    let (state, set_state) = signal(ScrollChromeState::default());
    with_motion_after_mount(move |motion| {
        let tracker = RefCell::new(ScrollChrome::new(
            settings.nav_threshold_px,
            settings.top_button_threshold_px,
        ));
        let subscription = motion.viewport.subscribe(move |sample| {
            if let Some(next) = tracker.borrow_mut().update(sample) {
                set_state.set(next);
            }
        });
        hold_until_cleanup(subscription);
    });
    state
}

/// Id of the section currently under the navigation bar.
pub fn use_active_section(ids: Vec<String>) -> ReadSignal<Option<String>> {
    let (active, set_active) = signal(ids.first().cloned());
    with_motion_after_mount(move |motion| {
        let layout = motion.layout.clone();
        let ids = ids.clone();
        let subscription = motion.viewport.subscribe(move |sample| {
            let anchors = ids
                .iter()
                .filter_map(|id| {
                    layout.document_rect(id).map(|rect| SectionAnchor {
                        id: id.clone(),
                        top: rect.top,
                    })
                })
                .collect::<Vec<_>>();
            let next = active_section(sample, &anchors, SECTION_OFFSET_PX).map(str::to_owned);
            if next.is_some() && active.get_untracked() != next {
                set_active.set(next);
            }
        });
        hold_until_cleanup(subscription);
    });
    active
}

/// Flips to `true` the first time element `id` scrolls into view.
pub fn use_reveal(id: impl Into<String>, threshold: Option<f64>) -> ReadSignal<bool> {
    let id = id.into();
    let (visible, set_visible) = signal(false);
    with_motion_after_mount(move |motion| {
        let visibility = motion.reveal.track(&id, threshold);
        visibility.on_enter(move || set_visible.set(true));
        hold_until_cleanup(visibility);
    });
    visible
}

pub fn use_typing(phrases: Vec<String>, timings: TypingTimings) -> ReadSignal<String> {
    let (text, set_text) = signal(String::new());
    with_motion_after_mount(move |motion| {
        let effect = match TypingEffect::new(phrases.clone(), timings) {
            Ok(effect) => effect,
            Err(err) => {
                log::warn!("typing effect disabled: {err}");
                return;
            }
        };
        let runner = TypingRunner::start(effect, motion.scheduler.clone(), move |visible| {
            set_text.set(visible.to_owned())
        });
        hold_until_cleanup(runner);
    });
    text
}

/// Counts up to `target` over `duration` once element `id` is in view.
pub fn use_count_up(id: impl Into<String>, target: u64, duration: Duration) -> ReadSignal<u64> {
    let id = id.into();
    let (value, set_value) = signal(0u64);
    with_motion_after_mount(move |motion| {
        let runner = Rc::new(CountUpRunner::new(
            target,
            duration,
            motion.scheduler.clone(),
            move |current| set_value.set(current),
        ));
        let visibility = motion.reveal.track(&id, None);
        {
            let runner = Rc::downgrade(&runner);
            visibility.on_enter(move || {
                if let Some(runner) = runner.upgrade() {
                    runner.start();
                }
            });
        }
        hold_until_cleanup((runner, visibility));
    });
    value
}

/// Background particles, scattered once after mount. Empty on the server.
pub fn use_particles(count: usize) -> ReadSignal<Vec<Particle>> {
    let (particles, set_particles) = signal(Vec::new());
    with_motion_after_mount(move |motion| set_particles.set(scatter(count, motion.random)));
    particles
}
