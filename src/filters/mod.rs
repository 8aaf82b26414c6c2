//! Optional smoothing of raw pitch/yaw before debouncing.
//!
//! Pose estimators jitter from frame to frame. Smoothing runs on every
//! incoming frame (including ones the cooldown later drops), so the
//! sample that does get classified reflects the recent head position
//! rather than a single noisy frame.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Median filter for outlier rejection
pub mod median;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{sample::RawSample, Error, Result};

/// Trait for all sample smoothing filters
pub trait SmoothingFilter: Send + Sync {
    /// Apply filter to input angles
    fn apply(&mut self, pitch: f64, yaw: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;

    /// Smooth a whole raw sample
    fn smooth(&mut self, sample: RawSample) -> RawSample {
        let (pitch, yaw) = self.apply(sample.pitch, sample.yaw);
        RawSample::new(pitch, yaw)
    }
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl SmoothingFilter for NoFilter {
    fn apply(&mut self, pitch: f64, yaw: f64) -> (f64, f64) {
        (pitch, yaw)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a smoothing filter from a name with an optional parameter.
///
/// Accepted forms: `none`, `moving_average[:window]`, `median[:window]`,
/// `exponential[:alpha]`. Parameters are validated before construction.
///
/// # Errors
///
/// Returns `Error::FilterError` for unknown names or invalid parameters
pub fn create_filter(name_and_param: &str) -> Result<Box<dyn SmoothingFilter>> {
    let normalized = name_and_param.trim().to_lowercase();
    let (name, param) = match normalized.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (normalized.as_str(), None),
    };

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = parse_window(param, crate::constants::DEFAULT_MOVING_AVERAGE_WINDOW)?;
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "median" => {
            let window = parse_window(param, crate::constants::DEFAULT_MEDIAN_WINDOW)?;
            if window % 2 == 0 {
                return Err(Error::FilterError(format!(
                    "Median filter window size must be odd, got {window}"
                )));
            }
            Ok(Box::new(median::MedianFilter::new(window)))
        }
        "exponential" => {
            let alpha = match param {
                Some(p) => p
                    .parse::<f64>()
                    .map_err(|_| Error::FilterError(format!("Alpha must be a number, got {p}")))?,
                None => crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
            };
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {normalized}"))),
    }
}

fn parse_window(param: Option<&str>, default: usize) -> Result<usize> {
    let window = match param {
        Some(p) => p
            .parse::<usize>()
            .map_err(|_| Error::FilterError(format!("Window size must be an integer, got {p}")))?,
        None => default,
    };
    if window == 0 {
        return Err(Error::FilterError("Window size must be greater than 0".to_string()));
    }
    Ok(window)
}
