use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::scheduler::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUpTick {
    /// `start` has not been called yet.
    Idle,
    Running,
    Finished,
}

/// Counts from zero to `target` over `duration`, one frame at a time.
#[derive(Debug, Clone)]
pub struct CountUp {
    current: u64,
    target: u64,
    duration: Duration,
    started_at: Option<f64>,
    finished: bool,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            current: 0,
            target,
            duration,
            started_at: None,
            finished: false,
        }
    }

    /// Records the start time. Returns `false` if the counter already started.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms);
        true
    }

    pub fn tick(&mut self, now_ms: f64) -> CountUpTick {
        let Some(started_at) = self.started_at else {
            return CountUpTick::Idle;
        };
        if self.finished {
            return CountUpTick::Finished;
        }

        let duration_ms = self.duration.as_nanos() as f64 / 1_000_000.0;
        let progress = if duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - started_at) / duration_ms).clamp(0.0, 1.0)
        };

        if progress >= 1.0 {
            // land exactly on the target regardless of float rounding
            self.current = self.target;
            self.finished = true;
            CountUpTick::Finished
        } else {
            let value = (progress * self.target as f64).floor() as u64;
            self.current = value.min(self.target);
            CountUpTick::Running
        }
    }

    pub fn value(&self) -> u64 {
        self.current
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

struct CountUpRun {
    counter: CountUp,
    scheduler: Rc<dyn Scheduler>,
    on_value: Rc<dyn Fn(u64)>,
    pending: Option<TaskHandle>,
}

/// Drives a [`CountUp`] with animation frames once started. Stops asking for
/// frames when the target is reached; dropping the runner cancels any frame
/// still pending.
pub struct CountUpRunner {
    run: Rc<RefCell<CountUpRun>>,
}

impl CountUpRunner {
    pub fn new(
        target: u64,
        duration: Duration,
        scheduler: Rc<dyn Scheduler>,
        on_value: impl Fn(u64) + 'static,
    ) -> Self {
        Self {
            run: Rc::new(RefCell::new(CountUpRun {
                counter: CountUp::new(target, duration),
                scheduler,
                on_value: Rc::new(on_value),
                pending: None,
            })),
        }
    }

    /// Starts counting. Later calls do nothing and return `false`.
    pub fn start(&self) -> bool {
        let started = {
            let mut run = self.run.borrow_mut();
            let now = run.scheduler.now_ms();
            run.counter.start(now)
        };
        if started {
            request_frame(&self.run);
        }
        started
    }

    pub fn value(&self) -> u64 {
        self.run.borrow().counter.value()
    }

    pub fn is_finished(&self) -> bool {
        self.run.borrow().counter.is_finished()
    }

    pub fn is_scheduled(&self) -> bool {
        self.run.borrow().pending.is_some()
    }
}

fn request_frame(run: &Rc<RefCell<CountUpRun>>) {
    let scheduler = run.borrow().scheduler.clone();
    let weak = Rc::downgrade(run);
    let handle = scheduler.request_frame(Box::new(move |timestamp| {
        if let Some(run) = weak.upgrade() {
            frame(&run, timestamp);
        }
    }));
    run.borrow_mut().pending = Some(handle);
}

fn frame(run: &Rc<RefCell<CountUpRun>>, timestamp: f64) {
    let (tick, value, on_value) = {
        let mut state = run.borrow_mut();
        state.pending = None;
        let tick = state.counter.tick(timestamp);
        (tick, state.counter.value(), state.on_value.clone())
    };
    on_value(value);
    if tick == CountUpTick::Running {
        request_frame(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::testing::ManualScheduler;

    #[test]
    fn test_interpolates_with_floor() {
        let mut counter = CountUp::new(50, Duration::from_millis(1000));
        assert_eq!(counter.tick(100.0), CountUpTick::Idle);
        assert!(counter.start(0.0));
        assert!(!counter.start(500.0));
        assert_eq!(counter.started_at(), Some(0.0));

        assert_eq!(counter.tick(0.0), CountUpTick::Running);
        assert_eq!(counter.value(), 0);
        counter.tick(333.0);
        assert_eq!(counter.value(), 16);
        counter.tick(999.0);
        assert_eq!(counter.value(), 49);
        assert_eq!(counter.tick(1000.0), CountUpTick::Finished);
        assert_eq!(counter.value(), 50);
        assert!(counter.is_finished());

        // a late frame never moves it
        assert_eq!(counter.tick(5000.0), CountUpTick::Finished);
        assert_eq!(counter.value(), counter.target());
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut counter = CountUp::new(7, Duration::ZERO);
        counter.start(10.0);
        assert_eq!(counter.tick(10.0), CountUpTick::Finished);
        assert_eq!(counter.value(), 7);
    }

    #[test]
    fn test_frame_timestamp_before_start_clamps_to_zero() {
        let mut counter = CountUp::new(10, Duration::from_millis(100));
        counter.start(50.0);
        assert_eq!(counter.tick(48.0), CountUpTick::Running);
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_runner_reaches_target_exactly_and_stops() {
        let scheduler = ManualScheduler::with_frame_interval(10.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let runner = {
            let seen = seen.clone();
            CountUpRunner::new(
                50,
                Duration::from_millis(1000),
                Rc::new(scheduler.clone()),
                move |v| seen.borrow_mut().push(v),
            )
        };
        assert_eq!(scheduler.pending(), 0);

        assert!(runner.start());
        assert!(!runner.start());

        scheduler.advance(500.0);
        assert!(runner.value() < 50);
        assert!(runner.is_scheduled());

        scheduler.advance(500.0);
        assert_eq!(runner.value(), 50);
        assert!(runner.is_finished());
        assert!(!runner.is_scheduled());
        assert_eq!(scheduler.pending(), 0);

        let seen = seen.borrow();
        assert!(seen.iter().all(|v| *v <= 50));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&50));

        let frames = seen.len();
        drop(seen);
        scheduler.advance(1000.0);
        assert_eq!(runner.value(), 50);
        assert_eq!(frames, 100);
    }

    #[test]
    fn test_dropping_runner_cancels_frame() {
        let scheduler = ManualScheduler::new();
        let runner = CountUpRunner::new(
            1000,
            Duration::from_millis(2000),
            Rc::new(scheduler.clone()),
            |_| {},
        );
        runner.start();
        scheduler.advance(100.0);
        assert_eq!(scheduler.pending(), 1);

        drop(runner);
        assert_eq!(scheduler.pending(), 0);
    }
}
