//! Head-pose guided liveness scan.
//!
//! Consumes per-frame head orientation estimates (pitch/yaw in radians)
//! and drives a nine-step scan: the user centers their face, then looks up,
//! down, left-up, left, left-down, right-up, right and right-down. Each pose
//! is reported once; when all nine are in, the cycle completes and starts
//! again.
//!
//! The pipeline consists of:
//! 1. Optional smoothing of the raw angles ([`filters`])
//! 2. Debouncing and unit conversion ([`sample_filter`])
//! 3. Pose classification ([`classifier`])
//!
//! Face detection and pose estimation are not part of this crate; any
//! estimator that yields pitch and yaw per frame can drive it.
//!
//! # Examples
//!
//! ## Classifying samples directly
//!
//! ```
//! use head_pose_scan::{
//!     classifier::{ClassifyResult, PoseSequenceClassifier},
//!     pose::Pose,
//!     sample::OrientationSample,
//! };
//!
//! let mut classifier = PoseSequenceClassifier::new();
//!
//! let result = classifier.classify(OrientationSample::new(2.0, -3.0));
//! assert_eq!(result, ClassifyResult::Detected(Pose::Front));
//!
//! // Front is already recorded for this cycle
//! let result = classifier.classify(OrientationSample::new(2.0, -3.0));
//! assert_eq!(result, ClassifyResult::NoChange);
//! ```
//!
//! ## Running a scan session
//!
//! ```
//! use head_pose_scan::{
//!     pose::Pose,
//!     sample::RawSample,
//!     session::{ScanEvent, ScanSession},
//! };
//! use std::time::{Duration, Instant};
//!
//! let mut session = ScanSession::default();
//! let start = Instant::now();
//!
//! // Estimator output in radians; estimator pitch is negated relative to "up"
//! let looking_up = RawSample::new(-0.3, 0.0);
//!
//! assert_eq!(session.process_at(looking_up, start), ScanEvent::Detected(Pose::Up));
//!
//! // Frames inside the 300 ms cooldown are dropped
//! let event = session.process_at(looking_up, start + Duration::from_millis(33));
//! assert_eq!(event, ScanEvent::Rejected);
//! ```
//!
//! ## Loading a configuration
//!
//! ```no_run
//! use head_pose_scan::{config::Config, session::ScanSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("scan.yaml")?;
//! let mut session = ScanSession::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

/// The nine poses of a scan cycle
pub mod pose;

/// Raw and converted orientation samples
pub mod sample;

/// Debounce and unit conversion
pub mod sample_filter;

/// Pose sequence state machine
pub mod classifier;

/// Smoothing filters applied before debouncing
pub mod filters;

/// Complete per-frame pipeline for one scan
pub mod session;

/// Recorded and synthetic sample streams
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the crate
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
