//! Deterministic stand-ins for the browser, shared by the motion tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::{
    ElementLayout, ElementRect, ListenerGuard, Scheduler, ScrollSample, ScrollSource, TaskHandle,
};

#[derive(Default)]
struct SourceState {
    notify: RefCell<Option<Rc<dyn Fn()>>>,
    scroll_listeners: Cell<usize>,
    resize_listeners: Cell<usize>,
    attach_calls: Cell<usize>,
}

/// Scroll source whose position is moved by hand and which counts
/// listener registrations.
pub(crate) struct FakeScrollSource {
    sample: Cell<ScrollSample>,
    state: Rc<SourceState>,
}

impl FakeScrollSource {
    pub fn new(sample: ScrollSample) -> Rc<Self> {
        Rc::new(Self {
            sample: Cell::new(sample),
            state: Rc::default(),
        })
    }

    pub fn scroll_to(&self, position_y: u32) {
        let current = self.sample.get();
        self.sample.set(ScrollSample::new(
            position_y,
            current.viewport_height,
            current.document_height,
        ));
        self.fire();
    }

    pub fn resize(&self, viewport_height: u32) {
        let current = self.sample.get();
        self.sample.set(ScrollSample::new(
            current.position_y,
            viewport_height,
            current.document_height,
        ));
        self.fire();
    }

    pub fn scroll_listeners(&self) -> usize {
        self.state.scroll_listeners.get()
    }

    pub fn resize_listeners(&self) -> usize {
        self.state.resize_listeners.get()
    }

    pub fn attach_calls(&self) -> usize {
        self.state.attach_calls.get()
    }

    fn fire(&self) {
        let notify = self.state.notify.borrow().clone();
        if let Some(notify) = notify {
            notify();
        }
    }
}

impl ScrollSource for FakeScrollSource {
    fn sample(&self) -> ScrollSample {
        self.sample.get()
    }

    fn attach(&self, notify: Rc<dyn Fn()>) -> ListenerGuard {
        let state = self.state.clone();
        state.attach_calls.set(state.attach_calls.get() + 1);
        state.scroll_listeners.set(state.scroll_listeners.get() + 1);
        state.resize_listeners.set(state.resize_listeners.get() + 1);
        *state.notify.borrow_mut() = Some(notify);
        ListenerGuard::new(move || {
            state.scroll_listeners.set(state.scroll_listeners.get() - 1);
            state.resize_listeners.set(state.resize_listeners.get() - 1);
            state.notify.borrow_mut().take();
        })
    }
}

/// Element positions keyed by id, in document coordinates.
#[derive(Default)]
pub(crate) struct FakeLayout {
    rects: RefCell<HashMap<String, ElementRect>>,
}

impl FakeLayout {
    pub fn with(elements: &[(&str, f64, f64)]) -> Rc<Self> {
        let layout = Self::default();
        for (id, top, height) in elements {
            layout.place(id, *top, *height);
        }
        Rc::new(layout)
    }

    pub fn place(&self, id: &str, top: f64, height: f64) {
        self.rects
            .borrow_mut()
            .insert(id.to_string(), ElementRect { top, height });
    }
}

impl ElementLayout for FakeLayout {
    fn document_rect(&self, id: &str) -> Option<ElementRect> {
        self.rects.borrow().get(id).copied()
    }
}

enum Task {
    Timeout(Box<dyn FnOnce()>),
    Frame(Box<dyn FnOnce(f64)>),
}

struct Queued {
    id: u64,
    due: f64,
    task: Task,
}

struct ManualState {
    now: Cell<f64>,
    next_id: Cell<u64>,
    frame_interval_ms: f64,
    queue: RefCell<Vec<Queued>>,
}

/// Virtual-time scheduler. Timeouts fire `delay` after they were set; frames
/// fire on the next multiple of the frame interval.
#[derive(Clone)]
pub(crate) struct ManualScheduler {
    state: Rc<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(16.0)
    }

    pub fn with_frame_interval(frame_interval_ms: f64) -> Self {
        Self {
            state: Rc::new(ManualState {
                now: Cell::new(0.0),
                next_id: Cell::new(0),
                frame_interval_ms,
                queue: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Number of callbacks still waiting to run.
    pub fn pending(&self) -> usize {
        self.state.queue.borrow().len()
    }

    /// Moves the clock forward, running everything that falls due in order.
    pub fn advance(&self, ms: f64) {
        let target = self.state.now.get() + ms;
        loop {
            let next = {
                let mut queue = self.state.queue.borrow_mut();
                let index = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, q)| q.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                    .map(|(i, _)| i);
                index.map(|i| queue.remove(i))
            };
            let Some(queued) = next else {
                break;
            };
            self.state.now.set(queued.due.max(self.state.now.get()));
            match queued.task {
                Task::Timeout(task) => task(),
                Task::Frame(task) => task(queued.due),
            }
        }
        self.state.now.set(target);
    }

    fn push(&self, due: f64, task: Task) -> TaskHandle {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.queue.borrow_mut().push(Queued { id, due, task });
        let weak = Rc::downgrade(&self.state);
        TaskHandle::new(move || {
            if let Some(state) = weak.upgrade() {
                state.queue.borrow_mut().retain(|q| q.id != id);
            }
        })
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.state.now.get()
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let due = self.state.now.get() + delay.as_nanos() as f64 / 1_000_000.0;
        self.push(due, Task::Timeout(task))
    }

    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle {
        let interval = self.state.frame_interval_ms;
        let due = ((self.state.now.get() / interval).floor() + 1.0) * interval;
        self.push(due, Task::Frame(task))
    }
}
