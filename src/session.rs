//! One in-progress scan: smoothing, debounce and classification wired
//! together behind a single per-frame call.
//!
//! Calls must be serialized by the caller. A frame-delivery thread can own
//! the session outright or hand samples over a channel; the session itself
//! does no locking.

use crate::{
    classifier::{ClassifyResult, PoseSequenceClassifier},
    config::Config,
    filters::{NoFilter, SmoothingFilter},
    pose::Pose,
    sample::RawSample,
    sample_filter::{CooldownTrigger, PoseSampleFilter, SampleOutcome},
    Result,
};
use log::debug;
use std::time::Instant;

/// What happened to one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// Dropped by the cooldown
    Rejected,
    /// Classified, nothing new
    NoChange,
    /// Pose recorded for the first time this cycle
    Detected(Pose),
    /// All poses recorded; indicators should be cleared and the scan restarted
    CycleCompleted,
}

impl From<ClassifyResult> for ScanEvent {
    fn from(result: ClassifyResult) -> Self {
        match result {
            ClassifyResult::NoChange => Self::NoChange,
            ClassifyResult::Detected(pose) => Self::Detected(pose),
            ClassifyResult::CycleCompleted => Self::CycleCompleted,
        }
    }
}

/// Snapshot of scan progress for a presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    /// Poses recorded in the current cycle, oldest first
    pub detected: Vec<Pose>,
    /// Poses still missing, in display order
    pub remaining: Vec<Pose>,
    /// Number of cycles completed so far
    pub cycles_completed: u64,
}

/// Pipeline state for a single scan
pub struct ScanSession {
    smoother: Box<dyn SmoothingFilter>,
    sample_filter: PoseSampleFilter,
    classifier: PoseSequenceClassifier,
    detection_order: Vec<Pose>,
    cycles_completed: u64,
}

impl ScanSession {
    /// Session without smoothing
    #[must_use]
    pub fn new(sample_filter: PoseSampleFilter, classifier: PoseSequenceClassifier) -> Self {
        Self::with_smoother(Box::new(NoFilter), sample_filter, classifier)
    }

    #[must_use]
    pub fn with_smoother(
        smoother: Box<dyn SmoothingFilter>,
        sample_filter: PoseSampleFilter,
        classifier: PoseSequenceClassifier,
    ) -> Self {
        Self {
            smoother,
            sample_filter,
            classifier,
            detection_order: Vec::with_capacity(Pose::ALL.len()),
            cycles_completed: 0,
        }
    }

    /// Build a session from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let smoother = config.create_smoother()?;
        debug!(
            "Scan session: smoothing {}, cooldown {} ms ({:?}), side policy {:?}",
            smoother.name(),
            config.cooldown.duration_ms,
            config.cooldown.trigger,
            config.classifier.side_branch_policy
        );
        Ok(Self::with_smoother(
            smoother,
            config.create_sample_filter(),
            config.create_classifier(),
        ))
    }

    /// Process a frame using the wall clock
    pub fn process(&mut self, raw: RawSample) -> ScanEvent {
        self.process_at(raw, Instant::now())
    }

    /// Process a frame that arrived at `now`
    pub fn process_at(&mut self, raw: RawSample, now: Instant) -> ScanEvent {
        // NaN frames bypass the smoother so they cannot poison its history
        let smoothed = if raw.is_nan() { raw } else { self.smoother.smooth(raw) };

        let sample = match self.sample_filter.accept_at(smoothed, now) {
            SampleOutcome::Accepted(sample) => sample,
            SampleOutcome::Rejected => return ScanEvent::Rejected,
        };

        let result = self.classifier.classify(sample);
        match result {
            ClassifyResult::Detected(pose) => self.detection_order.push(pose),
            ClassifyResult::CycleCompleted => {
                self.detection_order.clear();
                self.cycles_completed += 1;
            }
            ClassifyResult::NoChange => {}
        }

        if result != ClassifyResult::NoChange && self.sample_filter.trigger() == CooldownTrigger::OnDetection {
            self.sample_filter.start_cooldown(now);
        }

        result.into()
    }

    #[must_use]
    pub fn progress(&self) -> ScanProgress {
        let detected = self.classifier.detected();
        ScanProgress {
            detected: self.detection_order.clone(),
            remaining: Pose::ALL.into_iter().filter(|pose| !detected.contains(*pose)).collect(),
            cycles_completed: self.cycles_completed,
        }
    }

    /// Abandon the current cycle and start over
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.sample_filter.reset();
        self.classifier.reset();
        self.detection_order.clear();
    }

    #[must_use]
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    #[must_use]
    pub fn classifier(&self) -> &PoseSequenceClassifier {
        &self.classifier
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(PoseSampleFilter::default(), PoseSequenceClassifier::default())
    }
}
