//! Debouncing of the raw sample stream.
//!
//! A camera delivers far more frames than a user can change pose in, so at
//! most one sample per cooldown window is let through to the classifier.
//! Rejection is a normal outcome, not an error.

use crate::sample::{OrientationSample, RawSample};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Result of offering a raw sample to [`PoseSampleFilter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Sample passed the debounce and was converted to degrees
    Accepted(OrientationSample),
    /// A cooldown window was active; the sample was dropped
    Rejected,
}

impl SampleOutcome {
    /// The converted sample, if accepted
    #[must_use]
    pub fn accepted(self) -> Option<OrientationSample> {
        match self {
            Self::Accepted(sample) => Some(sample),
            Self::Rejected => None,
        }
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// When the cooldown window gets armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownTrigger {
    /// Every accepted sample starts a new window
    #[default]
    EverySample,
    /// Only an explicit [`PoseSampleFilter::start_cooldown`] starts a window,
    /// typically issued when the detection set changes
    OnDetection,
}

/// Unit conversion plus cooldown state
#[derive(Debug, Clone)]
pub struct PoseSampleFilter {
    cooldown: Duration,
    trigger: CooldownTrigger,
    deadline: Option<Instant>,
}

impl PoseSampleFilter {
    /// Create a filter that arms on every accepted sample
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self::with_trigger(cooldown, CooldownTrigger::EverySample)
    }

    #[must_use]
    pub fn with_trigger(cooldown: Duration, trigger: CooldownTrigger) -> Self {
        Self {
            cooldown,
            trigger,
            deadline: None,
        }
    }

    /// Offer a sample using the wall clock
    pub fn accept(&mut self, raw: RawSample) -> SampleOutcome {
        self.accept_at(raw, Instant::now())
    }

    /// Offer a sample that arrived at `now`
    pub fn accept_at(&mut self, raw: RawSample, now: Instant) -> SampleOutcome {
        if self.is_cooling_down(now) {
            trace!("Sample rejected during cooldown");
            return SampleOutcome::Rejected;
        }

        if self.trigger == CooldownTrigger::EverySample {
            self.start_cooldown(now);
        }

        SampleOutcome::Accepted(OrientationSample::from_raw(raw))
    }

    /// Start a new cooldown window at `now`, replacing any active one
    pub fn start_cooldown(&mut self, now: Instant) {
        if self.cooldown.is_zero() {
            return;
        }
        debug!("Cooldown armed for {} ms", self.cooldown.as_millis());
        self.deadline = Some(now + self.cooldown);
    }

    /// True while a window armed before `now` has not yet elapsed
    #[must_use]
    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Drop any active cooldown
    pub fn reset(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    #[must_use]
    pub fn trigger(&self) -> CooldownTrigger {
        self.trigger
    }
}

impl Default for PoseSampleFilter {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::constants::DEFAULT_COOLDOWN_MS))
    }
}
