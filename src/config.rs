//! Configuration management for the head pose scan

use crate::{
    classifier::{PoseSequenceClassifier, PoseThresholds, SideBranchPolicy},
    filters::{create_filter, SmoothingFilter},
    sample_filter::{CooldownTrigger, PoseSampleFilter},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Scan configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification thresholds and rule behaviour
    pub classifier: ClassifierConfig,

    /// Debounce configuration
    pub cooldown: CooldownConfig,

    /// Pre-debounce smoothing
    pub smoothing: SmoothingConfig,
}

/// Classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Angle thresholds in degrees
    pub thresholds: PoseThresholds,

    /// Behaviour of a side rule that finds nothing new
    pub side_branch_policy: SideBranchPolicy,
}

/// Cooldown configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Window length in milliseconds (0 disables debouncing)
    pub duration_ms: u64,

    /// What arms the window
    pub trigger: CooldownTrigger,
}

/// Smoothing filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Filter type: none, moving_average, median, exponential, optionally
    /// with an inline parameter such as `median:3`
    pub filter: String,

    /// Moving average window size
    pub moving_average_window: usize,

    /// Median filter window size
    pub median_window: usize,

    /// Exponential filter alpha value
    pub exponential_alpha: f64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            duration_ms: crate::constants::DEFAULT_COOLDOWN_MS,
            trigger: CooldownTrigger::EverySample,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            filter: "none".to_string(),
            moving_average_window: crate::constants::DEFAULT_MOVING_AVERAGE_WINDOW,
            median_window: crate::constants::DEFAULT_MEDIAN_WINDOW,
            exponential_alpha: crate::constants::DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the smoothing filter named by the configuration.
    ///
    /// `smoothing.filter` takes the same `name[:param]` form as
    /// [`create_filter`]. A bare name picks up its parameter from the
    /// matching `smoothing.*` field.
    pub fn create_smoother(&self) -> Result<Box<dyn SmoothingFilter>> {
        let s = &self.smoothing;
        let name = s.filter.trim().to_lowercase();
        let described = match name.as_str() {
            "moving_average" | "movingaverage" => format!("moving_average:{}", s.moving_average_window),
            "median" => format!("median:{}", s.median_window),
            "exponential" => format!("exponential:{}", s.exponential_alpha),
            _ => name,
        };
        create_filter(&described).map_err(|e| Error::ConfigError(format!("Invalid smoothing filter: {e}")))
    }

    /// Create the debounce filter
    #[must_use]
    pub fn create_sample_filter(&self) -> PoseSampleFilter {
        PoseSampleFilter::with_trigger(Duration::from_millis(self.cooldown.duration_ms), self.cooldown.trigger)
    }

    /// Create the pose classifier
    #[must_use]
    pub fn create_classifier(&self) -> PoseSequenceClassifier {
        PoseSequenceClassifier::with_settings(self.classifier.thresholds, self.classifier.side_branch_policy)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let t = &self.classifier.thresholds;
        let all = [
            t.front_pitch_limit,
            t.front_yaw_limit,
            t.side_yaw_min,
            t.right_up_pitch,
            t.left_up_pitch,
            t.side_down_pitch,
            t.up_pitch,
            t.down_pitch,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(Error::ConfigError("Thresholds must be finite".to_string()));
        }
        if t.front_pitch_limit < 0.0 || t.front_yaw_limit < 0.0 {
            return Err(Error::ConfigError("Front limits must be non-negative".to_string()));
        }
        if t.side_yaw_min <= 0.0 {
            return Err(Error::ConfigError("Side yaw minimum must be greater than 0".to_string()));
        }
        if t.side_down_pitch >= t.right_up_pitch || t.side_down_pitch >= t.left_up_pitch {
            return Err(Error::ConfigError(
                "Side-down pitch must be below both side-up pitches".to_string(),
            ));
        }
        if t.down_pitch >= t.up_pitch {
            return Err(Error::ConfigError("Down pitch must be below up pitch".to_string()));
        }

        self.create_smoother()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Pose Scan Configuration

# Pose classification (angles in degrees, positive pitch = up,
# positive yaw = subject's right)
classifier:
  thresholds:
    front_pitch_limit: 10.0
    front_yaw_limit: 10.0
    side_yaw_min: 10.0
    right_up_pitch: 17.0
    left_up_pitch: 12.0
    side_down_pitch: 5.0
    up_pitch: 12.0
    down_pitch: -12.0
  # stop: a side turn with nothing new ends evaluation for that sample
  # fall_through: keep evaluating left and up/down rules
  side_branch_policy: stop

# Debounce
cooldown:
  duration_ms: 300
  # every_sample or on_detection
  trigger: every_sample

# Smoothing applied to every frame before debouncing
smoothing:
  filter: "none"
  moving_average_window: 5
  median_window: 5
  exponential_alpha: 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("cooldown:\n  duration_ms: 150\n").unwrap();
        assert_eq!(config.cooldown.duration_ms, 150);
        assert_eq!(config.cooldown.trigger, CooldownTrigger::EverySample);
        assert_eq!(config.classifier.thresholds, PoseThresholds::default());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = Config::default();
        config.classifier.thresholds.down_pitch = 20.0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.classifier.thresholds.side_down_pitch = 13.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.thresholds.side_yaw_min = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.thresholds.up_pitch = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_smoothing() {
        let mut config = Config::default();
        config.smoothing.filter = "median".to_string();
        config.smoothing.median_window = 4;
        assert!(config.validate().is_err());
        assert!(config.create_smoother().is_err());

        config.smoothing.filter = "kalman".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_smoother_from_config() {
        let mut config = Config::default();
        config.smoothing.filter = "exponential".to_string();
        config.smoothing.exponential_alpha = 0.25;
        assert_eq!(config.create_smoother().unwrap().name(), "ExponentialFilter");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        assert!(matches!(
            Config::from_yaml("cooldown: [not, a, map]"),
            Err(Error::ConfigError(_))
        ));
    }
}
