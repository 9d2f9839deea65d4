use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::scheduler::{Scheduler, TaskHandle};
use super::MotionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_interval: Duration,
    pub pause: Duration,
    pub delete_interval: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self::from_type_interval(Duration::from_millis(120), Duration::from_millis(1200))
    }
}

impl TypingTimings {
    /// Deletes at twice the typing speed.
    pub fn from_type_interval(type_interval: Duration, pause: Duration) -> Self {
        Self {
            type_interval,
            pause,
            delete_interval: type_interval / 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Paused,
    Deleting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub current_phrase_index: usize,
    pub visible_char_count: usize,
    pub is_deleting: bool,
}

/// Types each phrase out, holds it, deletes it and moves on to the next,
/// wrapping forever.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    phrases: Vec<String>,
    char_counts: Vec<usize>,
    timings: TypingTimings,
    phrase: usize,
    chars: usize,
    phase: TypingPhase,
}

impl TypingEffect {
    pub fn new<I, S>(phrases: I, timings: TypingTimings) -> Result<Self, MotionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(MotionError::NoPhrases);
        }
        if let Some(index) = phrases.iter().position(|p| p.is_empty()) {
            return Err(MotionError::EmptyPhrase(index));
        }
        let char_counts = phrases.iter().map(|p| p.chars().count()).collect();
        Ok(Self {
            phrases,
            char_counts,
            timings,
            phrase: 0,
            chars: 0,
            phase: TypingPhase::Typing,
        })
    }

    /// Advances one step and returns how long to wait before the next one.
    pub fn tick(&mut self) -> Duration {
        match self.phase {
            TypingPhase::Typing => {
                self.chars = (self.chars + 1).min(self.char_counts[self.phrase]);
                if self.chars == self.char_counts[self.phrase] {
                    self.phase = TypingPhase::Paused;
                }
            }
            TypingPhase::Paused => {
                self.phase = TypingPhase::Deleting;
            }
            TypingPhase::Deleting => {
                self.chars = self.chars.saturating_sub(1);
                if self.chars == 0 {
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.phase = TypingPhase::Typing;
                }
            }
        }
        self.next_delay()
    }

    /// Delay before the step that follows the current state.
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            TypingPhase::Typing => self.timings.type_interval,
            TypingPhase::Paused => self.timings.pause,
            TypingPhase::Deleting => self.timings.delete_interval,
        }
    }

    /// The visible prefix of the current phrase.
    pub fn text(&self) -> &str {
        let phrase = &self.phrases[self.phrase];
        match phrase.char_indices().nth(self.chars) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn state(&self) -> TypingState {
        TypingState {
            current_phrase_index: self.phrase,
            visible_char_count: self.chars,
            is_deleting: self.phase == TypingPhase::Deleting,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }
}

struct TypingRun {
    effect: TypingEffect,
    scheduler: Rc<dyn Scheduler>,
    on_text: Rc<dyn Fn(&str)>,
    pending: Option<TaskHandle>,
}

/// Drives a [`TypingEffect`] off a [`Scheduler`]. At most one timer is
/// pending at a time and dropping the runner cancels it.
pub struct TypingRunner {
    run: Rc<RefCell<TypingRun>>,
}

impl TypingRunner {
    pub fn start(
        effect: TypingEffect,
        scheduler: Rc<dyn Scheduler>,
        on_text: impl Fn(&str) + 'static,
    ) -> Self {
        let on_text: Rc<dyn Fn(&str)> = Rc::new(on_text);
        on_text(effect.text());
        let delay = effect.next_delay();
        let run = Rc::new(RefCell::new(TypingRun {
            effect,
            scheduler,
            on_text,
            pending: None,
        }));
        schedule(&run, delay);
        Self { run }
    }

    pub fn text(&self) -> String {
        self.run.borrow().effect.text().to_owned()
    }

    pub fn state(&self) -> TypingState {
        self.run.borrow().effect.state()
    }

    pub fn is_scheduled(&self) -> bool {
        self.run.borrow().pending.is_some()
    }
}

fn schedule(run: &Rc<RefCell<TypingRun>>, delay: Duration) {
    let scheduler = run.borrow().scheduler.clone();
    let weak = Rc::downgrade(run);
    let handle = scheduler.set_timeout(
        delay,
        Box::new(move || {
            if let Some(run) = weak.upgrade() {
                step(&run);
            }
        }),
    );
    run.borrow_mut().pending = Some(handle);
}

fn step(run: &Rc<RefCell<TypingRun>>) {
    let (text, delay, on_text) = {
        let mut state = run.borrow_mut();
        state.pending = None;
        let delay = state.effect.tick();
        (state.effect.text().to_owned(), delay, state.on_text.clone())
    };
    on_text(&text);
    schedule(run, delay);
}
