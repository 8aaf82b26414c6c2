//! Orientation samples before and after unit conversion.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Pitch/yaw estimate for one frame, in radians, as produced by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// Rotation around the horizontal axis, radians
    pub pitch: f64,
    /// Rotation around the vertical axis, radians
    pub yaw: f64,
}

impl RawSample {
    #[must_use]
    pub const fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// True if either angle is NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.pitch.is_nan() || self.yaw.is_nan()
    }

    /// Build the raw sample an estimator would report for the given
    /// classifier-space angles (inverse of [`OrientationSample::from_raw`]).
    #[must_use]
    pub fn from_degrees(pitch_degrees: f64, yaw_degrees: f64) -> Self {
        Self {
            pitch: -degrees_to_radians(pitch_degrees),
            yaw: degrees_to_radians(yaw_degrees),
        }
    }
}

/// Orientation in signed degrees, in the convention the classifier expects.
///
/// Positive pitch means the head is tilted up, positive yaw means the head
/// is turned toward the subject's right (mirrored camera).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationSample {
    pub pitch_degrees: f64,
    pub yaw_degrees: f64,
}

impl OrientationSample {
    #[must_use]
    pub const fn new(pitch_degrees: f64, yaw_degrees: f64) -> Self {
        Self {
            pitch_degrees,
            yaw_degrees,
        }
    }

    /// Convert an estimator sample. The estimator reports pitch with the
    /// opposite sign, so pitch is negated; yaw passes through.
    #[must_use]
    pub fn from_raw(raw: RawSample) -> Self {
        Self {
            pitch_degrees: -radians_to_degrees(raw.pitch),
            yaw_degrees: radians_to_degrees(raw.yaw),
        }
    }

    /// True if either angle is NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.pitch_degrees.is_nan() || self.yaw_degrees.is_nan()
    }
}

impl From<RawSample> for OrientationSample {
    fn from(raw: RawSample) -> Self {
        Self::from_raw(raw)
    }
}

/// `radians * 180 / π`
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// `degrees * π / 180`
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
