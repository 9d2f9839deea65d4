use std::time::Duration;

/// A pending timer or animation-frame callback. Dropping the handle cancels
/// the callback if it has not run yet.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle for a task that was never scheduled.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

/// Timer and frame source for the animated effects.
pub trait Scheduler {
    /// Milliseconds on the same clock that frame timestamps use.
    fn now_ms(&self) -> f64;

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Runs `task` on the next animation frame with the frame timestamp.
    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> TaskHandle;
}

/// Scheduler for contexts with no event loop, such as server rendering.
/// Tasks are dropped without ever running.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleScheduler;

impl Scheduler for IdleScheduler {
    fn now_ms(&self) -> f64 {
        0.0
    }

    fn set_timeout(&self, _delay: Duration, _task: Box<dyn FnOnce()>) -> TaskHandle {
        TaskHandle::detached()
    }

    fn request_frame(&self, _task: Box<dyn FnOnce(f64)>) -> TaskHandle {
        TaskHandle::detached()
    }
}
