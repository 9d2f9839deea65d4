use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::viewport::{ScrollSample, Subscription, ViewportSignal};

/// An element's vertical extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Pixels of the element currently inside the viewport.
    pub fn visible_px(&self, sample: ScrollSample) -> f64 {
        let view_top = f64::from(sample.position_y);
        let view_bottom = f64::from(sample.viewport_bottom());
        (self.bottom().min(view_bottom) - self.top.max(view_top)).max(0.0)
    }

    /// Whether at least `threshold` of the element's height is in view.
    /// A threshold of zero means any overlap at all.
    pub fn is_revealed_by(&self, sample: ScrollSample, threshold: f64) -> bool {
        if self.height <= 0.0 {
            let view_top = f64::from(sample.position_y);
            let view_bottom = f64::from(sample.viewport_bottom());
            return self.top >= view_top && self.top <= view_bottom;
        }
        let visible = self.visible_px(sample);
        if threshold <= 0.0 {
            visible > 0.0
        } else {
            visible / self.height >= threshold
        }
    }
}

/// Looks up where an element sits on the page.
pub trait ElementLayout {
    fn document_rect(&self, id: &str) -> Option<ElementRect>;
}

/// Layout for contexts with no DOM. Nothing is ever found.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnmeasuredLayout;

impl ElementLayout for UnmeasuredLayout {
    fn document_rect(&self, _id: &str) -> Option<ElementRect> {
        None
    }
}

struct VisibilityState {
    entered: Cell<bool>,
    waiting: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Shared "has this element entered view" flag. Once set it stays set.
#[derive(Clone)]
pub struct Visibility(Rc<VisibilityState>);

impl Visibility {
    fn new() -> Self {
        Self(Rc::new(VisibilityState {
            entered: Cell::new(false),
            waiting: RefCell::new(Vec::new()),
        }))
    }

    pub fn has_entered_view(&self) -> bool {
        self.0.entered.get()
    }

    /// Runs `callback` once when the element enters view, or right away if it
    /// already has.
    pub fn on_enter(&self, callback: impl FnOnce() + 'static) {
        if self.has_entered_view() {
            callback();
        } else {
            self.0.waiting.borrow_mut().push(Box::new(callback));
        }
    }

    fn mark_entered(&self) {
        if self.0.entered.replace(true) {
            return;
        }
        let waiting = std::mem::take(&mut *self.0.waiting.borrow_mut());
        for callback in waiting {
            callback();
        }
    }
}

struct Tracked {
    id: String,
    threshold: f64,
    visibility: Weak<VisibilityState>,
}

struct RevealState {
    layout: Rc<dyn ElementLayout>,
    tracked: Vec<Tracked>,
    latest: Option<ScrollSample>,
}

/// Tracks elements until they first scroll into view ("animate once").
///
/// Holds one [`ViewportSignal`] subscription for its whole lifetime. Elements
/// are held weakly: once every [`Visibility`] clone for an element is gone,
/// the element is forgotten on the next sample.
pub struct RevealAnimator {
    state: Rc<RefCell<RevealState>>,
    _subscription: Subscription,
}

impl RevealAnimator {
    pub fn new(viewport: &ViewportSignal, layout: Rc<dyn ElementLayout>) -> Self {
        let state = Rc::new(RefCell::new(RevealState {
            layout,
            tracked: Vec::new(),
            latest: None,
        }));
        let weak = Rc::downgrade(&state);
        let subscription = viewport.subscribe(move |sample| {
            if let Some(state) = weak.upgrade() {
                evaluate(&state, sample);
            }
        });
        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Starts tracking `id`. `threshold` is the fraction of the element that
    /// must be visible; `None` means any overlap.
    pub fn track(&self, id: &str, threshold: Option<f64>) -> Visibility {
        let threshold = threshold.unwrap_or(0.0).clamp(0.0, 1.0);
        let visibility = Visibility::new();

        let (layout, latest) = {
            let state = self.state.borrow();
            (state.layout.clone(), state.latest)
        };
        let already_visible = latest.is_some_and(|sample| {
            layout
                .document_rect(id)
                .is_some_and(|rect| rect.is_revealed_by(sample, threshold))
        });

        if already_visible {
            visibility.mark_entered();
        } else {
            self.state.borrow_mut().tracked.push(Tracked {
                id: id.to_string(),
                threshold,
                visibility: Rc::downgrade(&visibility.0),
            });
        }
        visibility
    }

    /// Elements still waiting to be revealed.
    pub fn tracked_count(&self) -> usize {
        self.state.borrow().tracked.len()
    }
}

fn evaluate(state: &Rc<RefCell<RevealState>>, sample: ScrollSample) {
    let entered = {
        let mut state = state.borrow_mut();
        state.latest = Some(sample);
        let layout = state.layout.clone();
        let mut entered = Vec::new();
        state.tracked.retain(|tracked| {
            let Some(visibility) = tracked.visibility.upgrade() else {
                return false;
            };
            match layout.document_rect(&tracked.id) {
                Some(rect) if rect.is_revealed_by(sample, tracked.threshold) => {
                    entered.push(Visibility(visibility));
                    false
                }
                Some(_) => true,
                None => {
                    log::debug!("no layout for tracked element #{}", tracked.id);
                    true
                }
            }
        });
        entered
    };

    for visibility in entered {
        visibility.mark_entered();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::testing::{FakeLayout, FakeScrollSource};

    fn setup(
        position_y: u32,
        elements: &[(&str, f64, f64)],
    ) -> (Rc<FakeScrollSource>, Rc<FakeLayout>, RevealAnimator) {
        let source = FakeScrollSource::new(ScrollSample::new(position_y, 800, 4000));
        let layout = FakeLayout::with(elements);
        let viewport = ViewportSignal::new(source.clone());
        let reveal = RevealAnimator::new(&viewport, layout.clone());
        (source, layout, reveal)
    }

    #[test]
    fn test_rect_overlap() {
        let rect = ElementRect {
            top: 700.0,
            height: 200.0,
        };
        let sample = ScrollSample::new(0, 800, 4000);
        assert_eq!(rect.visible_px(sample), 100.0);
        assert!(rect.is_revealed_by(sample, 0.0));
        assert!(rect.is_revealed_by(sample, 0.5));
        assert!(!rect.is_revealed_by(sample, 0.6));

        let touching = ElementRect {
            top: 800.0,
            height: 100.0,
        };
        assert!(!touching.is_revealed_by(sample, 0.0));

        let marker = ElementRect {
            top: 800.0,
            height: 0.0,
        };
        assert!(marker.is_revealed_by(sample, 0.0));
    }

    #[test]
    fn test_element_already_in_view_reports_immediately() {
        let (_source, _layout, reveal) = setup(0, &[("hero", 100.0, 300.0)]);
        let visibility = reveal.track("hero", None);
        assert!(visibility.has_entered_view());
        assert_eq!(reveal.tracked_count(), 0);
    }

    #[test]
    fn test_reveal_is_one_way() {
        let (source, _layout, reveal) = setup(0, &[("skills", 1500.0, 400.0)]);
        let visibility = reveal.track("skills", None);
        assert!(!visibility.has_entered_view());

        source.scroll_to(800);
        assert!(visibility.has_entered_view());

        for y in [0, 3000, 10, 0] {
            source.scroll_to(y);
            assert!(visibility.has_entered_view());
        }
    }

    #[test]
    fn test_threshold_ratio() {
        let (source, _layout, reveal) = setup(0, &[("card", 1000.0, 400.0)]);
        let half = reveal.track("card", Some(0.5));

        // 100px of 400 visible
        source.scroll_to(300);
        assert!(!half.has_entered_view());

        // 200px of 400 visible
        source.scroll_to(400);
        assert!(half.has_entered_view());
    }

    #[test]
    fn test_on_enter_fires_once() {
        let (source, _layout, reveal) = setup(0, &[("stats", 1200.0, 200.0)]);
        let visibility = reveal.track("stats", None);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            visibility.on_enter(move || hits.set(hits.get() + 1));
        }

        source.scroll_to(600);
        source.scroll_to(0);
        source.scroll_to(700);
        assert_eq!(hits.get(), 1);

        let late = Rc::new(Cell::new(false));
        {
            let late = late.clone();
            visibility.on_enter(move || late.set(true));
        }
        assert!(late.get());
    }

    #[test]
    fn test_unknown_layout_waits_for_later_sample() {
        let (source, layout, reveal) = setup(0, &[]);
        let visibility = reveal.track("late", None);
        source.scroll_to(100);
        assert!(!visibility.has_entered_view());

        layout.place("late", 200.0, 100.0);
        source.scroll_to(120);
        assert!(visibility.has_entered_view());
    }

    #[test]
    fn test_dropped_handles_are_pruned() {
        let (source, _layout, reveal) = setup(0, &[("a", 2000.0, 100.0), ("b", 2500.0, 100.0)]);
        let a = reveal.track("a", None);
        let b = reveal.track("b", None);
        assert_eq!(reveal.tracked_count(), 2);

        drop(b);
        source.scroll_to(10);
        assert_eq!(reveal.tracked_count(), 1);
        assert!(!a.has_entered_view());
    }

    #[test]
    fn test_detached_viewport_keeps_defaults() {
        let viewport = ViewportSignal::detached();
        let reveal = RevealAnimator::new(&viewport, Rc::new(UnmeasuredLayout));
        let visibility = reveal.track("hero", None);
        assert!(!visibility.has_entered_view());
    }
}
