//! `web-sys` backed implementations of the motion traits.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Window};

use super::{
    ElementLayout, ElementRect, ListenerGuard, Scheduler, ScrollSample, ScrollSource, TaskHandle,
};

/// Uniform sample in `[0, 1)` from the page's `Math.random`.
pub fn random() -> f64 {
    js_sys::Math::random()
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or_default()
}

/// Reads the window's scroll position and listens for scroll and resize.
pub struct WindowScrollSource {
    window: Window,
}

impl WindowScrollSource {
    /// `None` outside a browser.
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl ScrollSource for WindowScrollSource {
    fn sample(&self) -> ScrollSample {
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default();
        let document_height = self
            .window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| f64::from(el.scroll_height()))
            .unwrap_or(viewport_height);
        ScrollSample::from_raw(scroll_y(&self.window), viewport_height, document_height)
    }

    fn attach(&self, notify: Rc<dyn Fn()>) -> ListenerGuard {
        let window = self.window.clone();
        let pending_frame = Rc::new(Cell::new(None::<i32>));

        // coalesce bursts of events into one notification per frame
        let on_frame = {
            let pending_frame = pending_frame.clone();
            Rc::new(Closure::<dyn Fn()>::new(move || {
                pending_frame.set(None);
                notify();
            }))
        };
        let on_event = {
            let window = window.clone();
            let pending_frame = pending_frame.clone();
            let on_frame = on_frame.clone();
            Closure::<dyn Fn()>::new(move || {
                if pending_frame.get().is_some() {
                    return;
                }
                match window.request_animation_frame((*on_frame).as_ref().unchecked_ref()) {
                    Ok(id) => pending_frame.set(Some(id)),
                    Err(err) => log::warn!("couldn't request animation frame: {err:?}"),
                }
            })
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        for event in ["scroll", "resize"] {
            if let Err(err) = window.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                on_event.as_ref().unchecked_ref(),
                &options,
            ) {
                log::warn!("couldn't listen for {event}: {err:?}");
            }
        }
        log::debug!("viewport listeners attached");

        ListenerGuard::new(move || {
            for event in ["scroll", "resize"] {
                let _ = window
                    .remove_event_listener_with_callback(event, on_event.as_ref().unchecked_ref());
            }
            if let Some(id) = pending_frame.take() {
                let _ = window.cancel_animation_frame(id);
            }
            drop(on_event);
            drop(on_frame);
            log::debug!("viewport listeners detached");
        })
    }
}

/// Measures elements by id with `getBoundingClientRect`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomLayout;

impl ElementLayout for DomLayout {
    fn document_rect(&self, id: &str) -> Option<ElementRect> {
        let window = web_sys::window()?;
        let element = window.document()?.get_element_by_id(id)?;
        let rect = element.get_bounding_client_rect();
        Some(ElementRect {
            top: rect.top() + scroll_y(&window),
            height: rect.height(),
        })
    }
}

/// Timers via `gloo-timers`, frames via `requestAnimationFrame`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_default()
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, task);
        // dropping a gloo Timeout clears it
        TaskHandle::new(move || drop(timeout))
    }

    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle {
        let Some(window) = web_sys::window() else {
            return TaskHandle::detached();
        };
        let fired = Rc::new(Cell::new(false));
        let closure = {
            let fired = fired.clone();
            Closure::once(move |timestamp: f64| {
                fired.set(true);
                task(timestamp);
            })
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => TaskHandle::new(move || {
                if !fired.get() {
                    let _ = window.cancel_animation_frame(id);
                }
                drop(closure);
            }),
            Err(err) => {
                log::warn!("couldn't request animation frame: {err:?}");
                TaskHandle::detached()
            }
        }
    }
}
