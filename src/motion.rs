//! Scroll- and timer-driven UI state for the portfolio page.
//!
//! Everything in here is plain Rust behind a handful of traits
//! ([`ScrollSource`], [`ElementLayout`], [`Scheduler`]) so it can run on the
//! host under `cargo test`. The browser-backed implementations live in
//! [`browser`] and only exist in the hydrated bundle.

#[cfg(feature = "hydrate")]
pub mod browser;
mod chrome;
mod count_up;
mod particles;
mod reveal;
mod scheduler;
#[cfg(test)]
pub(crate) mod testing;
mod typing;
mod viewport;

pub use chrome::{active_section, compute_chrome, ScrollChrome, ScrollChromeState, SectionAnchor};
pub use count_up::{CountUp, CountUpRunner, CountUpTick};
pub use particles::{scatter, Particle, PARTICLE_COUNT};
pub use reveal::{ElementLayout, ElementRect, RevealAnimator, UnmeasuredLayout, Visibility};
pub use scheduler::{IdleScheduler, Scheduler, TaskHandle};
pub use typing::{TypingEffect, TypingPhase, TypingRunner, TypingState, TypingTimings};
pub use viewport::{ListenerGuard, ScrollSample, ScrollSource, Subscription, ViewportSignal};

use thiserror::Error;

/// Class the hydrated bundle puts on `<html>`. Scroll-revealed content is only
/// hidden underneath it, so server-rendered pages read fine without wasm.
pub const MOTION_CLASS: &str = "motion";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    #[error("typing effect needs at least one phrase")]
    NoPhrases,
    #[error("phrase {0} is empty")]
    EmptyPhrase(usize),
}
