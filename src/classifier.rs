//! Pose sequence classification.
//!
//! Maps a stream of debounced orientation samples onto the nine poses of a
//! scan cycle. Each pose is reported at most once per cycle; once all nine
//! have been seen, the next sample that detects nothing new closes the
//! cycle and the detection set starts over.
//!
//! Rules are evaluated top to bottom on every sample:
//!
//! 1. front: both angles within the front limits
//! 2. right side: yaw at or above the side minimum (right-up, right-down, right)
//! 3. left side: yaw at or below minus the side minimum (left-up, left-down, left)
//! 4. vertical: up or down
//! 5. completion: all nine poses recorded
//!
//! A side rule that is entered but finds nothing new ends the pose rules
//! for that sample under [`SideBranchPolicy::Stop`].

use crate::{constants::*, pose::Pose, sample::OrientationSample};
use log::{info, trace};
use serde::{Deserialize, Serialize};

/// Outcome of classifying one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyResult {
    /// Nothing new
    NoChange,
    /// A pose was recorded for the first time in this cycle
    Detected(Pose),
    /// All poses were recorded; the detection set has been cleared
    CycleCompleted,
}

/// Set of poses recorded in the current cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionSet {
    bits: u16,
}

impl DetectionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Record a pose. Returns false if it was already present.
    pub fn insert(&mut self, pose: Pose) -> bool {
        let newly_added = !self.contains(pose);
        self.bits |= 1 << pose.index();
        newly_added
    }

    #[must_use]
    pub const fn contains(&self, pose: Pose) -> bool {
        self.bits & (1 << pose.index()) != 0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True once every pose has been recorded
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.len() == POSE_COUNT
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Recorded poses in [`Pose::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = Pose> + '_ {
        Pose::ALL.into_iter().filter(|pose| self.contains(*pose))
    }
}

/// What a side rule does when it is entered but records nothing new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideBranchPolicy {
    /// Skip the remaining pose rules; only the completion check runs
    #[default]
    Stop,
    /// Continue with the next rules as if the side rule had not matched
    FallThrough,
}

/// Angle thresholds in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// Front requires |pitch| <= this
    pub front_pitch_limit: f64,
    /// Front requires |yaw| <= this
    pub front_yaw_limit: f64,
    /// Right side requires yaw >= this, left side yaw <= minus this
    pub side_yaw_min: f64,
    /// Right turn with pitch above this is right-up
    pub right_up_pitch: f64,
    /// Left turn with pitch above this is left-up
    pub left_up_pitch: f64,
    /// Side turn with pitch below this is side-down
    pub side_down_pitch: f64,
    /// Pitch above this is up
    pub up_pitch: f64,
    /// Pitch below this is down
    pub down_pitch: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            front_pitch_limit: FRONT_PITCH_LIMIT_DEG,
            front_yaw_limit: FRONT_YAW_LIMIT_DEG,
            side_yaw_min: SIDE_YAW_MIN_DEG,
            right_up_pitch: RIGHT_UP_PITCH_DEG,
            left_up_pitch: LEFT_UP_PITCH_DEG,
            side_down_pitch: SIDE_DOWN_PITCH_DEG,
            up_pitch: UP_PITCH_DEG,
            down_pitch: DOWN_PITCH_DEG,
        }
    }
}

/// Result of a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleOutcome {
    /// Rule did not apply; evaluate the next one
    Continue,
    /// Rule applied but every pose it could report is already recorded
    Exhausted,
    /// Rule reports a new pose
    Detected(Pose),
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// State machine driving one scan
#[derive(Debug, Clone, Default)]
pub struct PoseSequenceClassifier {
    thresholds: PoseThresholds,
    side_policy: SideBranchPolicy,
    detected: DetectionSet,
}

impl PoseSequenceClassifier {
    /// Classifier with the default thresholds and stop-on-entry side rules
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(thresholds: PoseThresholds, side_policy: SideBranchPolicy) -> Self {
        Self {
            thresholds,
            side_policy,
            detected: DetectionSet::new(),
        }
    }

    /// Classify one sample, updating the detection set
    pub fn classify(&mut self, sample: OrientationSample) -> ClassifyResult {
        if sample.is_nan() {
            trace!("Ignoring NaN sample");
            return ClassifyResult::NoChange;
        }

        if let Some(pose) = self.next_pose(&sample) {
            self.detected.insert(pose);
            info!(
                "Detected {} ({}/{}) at pitch {:.1}°, yaw {:.1}°",
                pose,
                self.detected.len(),
                POSE_COUNT,
                sample.pitch_degrees,
                sample.yaw_degrees
            );
            return ClassifyResult::Detected(pose);
        }

        if self.detected.is_complete() {
            self.detected.clear();
            info!("All {POSE_COUNT} poses detected, starting a new cycle");
            return ClassifyResult::CycleCompleted;
        }

        ClassifyResult::NoChange
    }

    /// Pose the sample would newly detect, without recording it
    #[must_use]
    pub fn next_pose(&self, sample: &OrientationSample) -> Option<Pose> {
        let rules: [fn(&Self, &OrientationSample) -> RuleOutcome; 4] = [
            Self::front_rule,
            |classifier: &Self, sample: &OrientationSample| classifier.side_rule(Side::Right, sample),
            |classifier: &Self, sample: &OrientationSample| classifier.side_rule(Side::Left, sample),
            Self::vertical_rule,
        ];

        for rule in rules {
            match rule(self, sample) {
                RuleOutcome::Detected(pose) => return Some(pose),
                RuleOutcome::Exhausted if self.side_policy == SideBranchPolicy::Stop => return None,
                RuleOutcome::Exhausted | RuleOutcome::Continue => {}
            }
        }
        None
    }

    fn front_rule(&self, sample: &OrientationSample) -> RuleOutcome {
        let t = &self.thresholds;
        let centered = (-t.front_pitch_limit..=t.front_pitch_limit).contains(&sample.pitch_degrees)
            && (-t.front_yaw_limit..=t.front_yaw_limit).contains(&sample.yaw_degrees);

        if centered && !self.detected.contains(Pose::Front) {
            RuleOutcome::Detected(Pose::Front)
        } else {
            RuleOutcome::Continue
        }
    }

    fn side_rule(&self, side: Side, sample: &OrientationSample) -> RuleOutcome {
        let t = &self.thresholds;
        let (entered, up_pitch, candidates) = match side {
            Side::Right => (
                sample.yaw_degrees >= t.side_yaw_min,
                t.right_up_pitch,
                [Pose::RightUp, Pose::RightDown, Pose::Right],
            ),
            Side::Left => (
                sample.yaw_degrees <= -t.side_yaw_min,
                t.left_up_pitch,
                [Pose::LeftUp, Pose::LeftDown, Pose::Left],
            ),
        };
        if !entered {
            return RuleOutcome::Continue;
        }

        let [up, down, level] = candidates;
        let pitch = sample.pitch_degrees;
        if pitch > up_pitch && !self.detected.contains(up) {
            RuleOutcome::Detected(up)
        } else if pitch < t.side_down_pitch && !self.detected.contains(down) {
            RuleOutcome::Detected(down)
        } else if !self.detected.contains(level) {
            RuleOutcome::Detected(level)
        } else {
            RuleOutcome::Exhausted
        }
    }

    fn vertical_rule(&self, sample: &OrientationSample) -> RuleOutcome {
        let t = &self.thresholds;
        let pitch = sample.pitch_degrees;
        if pitch > t.up_pitch && !self.detected.contains(Pose::Up) {
            RuleOutcome::Detected(Pose::Up)
        } else if pitch < t.down_pitch && !self.detected.contains(Pose::Down) {
            RuleOutcome::Detected(Pose::Down)
        } else {
            RuleOutcome::Continue
        }
    }

    /// Poses recorded in the current cycle
    #[must_use]
    pub fn detected(&self) -> &DetectionSet {
        &self.detected
    }

    /// Abandon the current cycle
    pub fn reset(&mut self) {
        self.detected.clear();
    }

    #[must_use]
    pub fn thresholds(&self) -> &PoseThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn side_policy(&self) -> SideBranchPolicy {
        self.side_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pitch: f64, yaw: f64) -> OrientationSample {
        OrientationSample::new(pitch, yaw)
    }

    #[test]
    fn test_detection_set_uniqueness() {
        let mut set = DetectionSet::new();
        assert!(set.insert(Pose::Left));
        assert!(!set.insert(Pose::Left));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Pose::Left));
        assert!(!set.contains(Pose::Right));

        for pose in Pose::ALL {
            set.insert(pose);
        }
        assert!(set.is_complete());
        assert_eq!(set.iter().collect::<Vec<_>>(), Pose::ALL.to_vec());

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_front_then_no_change() {
        let mut classifier = PoseSequenceClassifier::new();
        assert_eq!(classifier.classify(sample(5.0, -5.0)), ClassifyResult::Detected(Pose::Front));
        assert_eq!(classifier.classify(sample(5.0, -5.0)), ClassifyResult::NoChange);
    }

    #[test]
    fn test_front_limits_are_inclusive() {
        let mut classifier = PoseSequenceClassifier::new();
        assert_eq!(classifier.classify(sample(-10.0, 10.0)), ClassifyResult::Detected(Pose::Front));
    }

    #[test]
    fn test_right_tie_break() {
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::Detected(Pose::RightUp));
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(3.0, 15.0)), ClassifyResult::Detected(Pose::RightDown));
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(10.0, 15.0)), ClassifyResult::Detected(Pose::Right));
    }

    #[test]
    fn test_left_tie_break() {
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(15.0, -15.0)), ClassifyResult::Detected(Pose::LeftUp));
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(3.0, -15.0)), ClassifyResult::Detected(Pose::LeftDown));
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(8.0, -15.0)), ClassifyResult::Detected(Pose::Left));
    }

    #[test]
    fn test_side_falls_back_to_level_pose() {
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::Detected(Pose::RightUp));
        // Same pitch again: right-up is taken, so plain right is reported
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::Detected(Pose::Right));
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::NoChange);
    }

    #[test]
    fn test_vertical_poses() {
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(15.0, 0.0)), ClassifyResult::Detected(Pose::Up));
        assert_eq!(c.classify(sample(-15.0, 0.0)), ClassifyResult::Detected(Pose::Down));
        assert_eq!(c.classify(sample(-15.0, 0.0)), ClassifyResult::NoChange);
    }

    #[test]
    fn test_exhausted_side_stops_by_default() {
        let mut c = PoseSequenceClassifier::new();
        for s in [sample(20.0, 15.0), sample(3.0, 15.0), sample(10.0, 15.0)] {
            assert!(matches!(c.classify(s), ClassifyResult::Detected(_)));
        }
        // Pitch 20 would be up, but the exhausted right rule ends evaluation
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::NoChange);
        assert!(!c.detected().contains(Pose::Up));
    }

    #[test]
    fn test_exhausted_side_falls_through_when_configured() {
        let mut c = PoseSequenceClassifier::with_settings(PoseThresholds::default(), SideBranchPolicy::FallThrough);
        for s in [sample(20.0, 15.0), sample(3.0, 15.0), sample(10.0, 15.0)] {
            assert!(matches!(c.classify(s), ClassifyResult::Detected(_)));
        }
        assert_eq!(c.classify(sample(20.0, 15.0)), ClassifyResult::Detected(Pose::Up));
    }

    #[test]
    fn test_cycle_completion_clears_set() {
        let mut c = PoseSequenceClassifier::new();
        let path = [
            sample(0.0, 0.0),
            sample(15.0, 0.0),
            sample(-15.0, 0.0),
            sample(15.0, -15.0),
            sample(3.0, -15.0),
            sample(8.0, -15.0),
            sample(20.0, 15.0),
            sample(3.0, 15.0),
            sample(10.0, 15.0),
        ];
        for s in path {
            assert!(matches!(c.classify(s), ClassifyResult::Detected(_)));
        }
        assert!(c.detected().is_complete());

        assert_eq!(c.classify(sample(0.0, 0.0)), ClassifyResult::CycleCompleted);
        assert!(c.detected().is_empty());
        assert_eq!(c.classify(sample(0.0, 0.0)), ClassifyResult::Detected(Pose::Front));
    }

    #[test]
    fn test_nan_is_no_change() {
        let mut c = PoseSequenceClassifier::new();
        assert_eq!(c.classify(sample(f64::NAN, 0.0)), ClassifyResult::NoChange);
        assert_eq!(c.classify(sample(0.0, f64::NAN)), ClassifyResult::NoChange);
        assert!(c.detected().is_empty());
    }

    #[test]
    fn test_next_pose_does_not_mutate() {
        let c = PoseSequenceClassifier::new();
        assert_eq!(c.next_pose(&sample(0.0, 0.0)), Some(Pose::Front));
        assert!(c.detected().is_empty());
    }
}
