//! Helper functions and utilities for tests

#![allow(dead_code)]

use head_pose_scan::{
    classifier::{ClassifyResult, PoseSequenceClassifier},
    pose::Pose,
    sample::OrientationSample,
};

/// One classifier-space sample per pose, in an order that detects each
/// pose exactly once on a fresh classifier
pub const FULL_CYCLE: [(f64, f64); 9] = [
    (0.0, 0.0),
    (15.0, 0.0),
    (-15.0, 0.0),
    (15.0, -15.0),
    (3.0, -15.0),
    (8.0, -15.0),
    (20.0, 15.0),
    (3.0, 15.0),
    (10.0, 15.0),
];

/// Shorthand for a classifier-space sample
pub fn sample(pitch: f64, yaw: f64) -> OrientationSample {
    OrientationSample::new(pitch, yaw)
}

/// Drive a classifier through [`FULL_CYCLE`] and return the detected poses
pub fn detect_all(classifier: &mut PoseSequenceClassifier) -> Vec<Pose> {
    FULL_CYCLE
        .iter()
        .filter_map(|&(pitch, yaw)| match classifier.classify(sample(pitch, yaw)) {
            ClassifyResult::Detected(pose) => Some(pose),
            _ => None,
        })
        .collect()
}
