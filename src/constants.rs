//! Constants used throughout the scan pipeline

/// Number of distinct poses in one scan cycle
pub const POSE_COUNT: usize = 9;

/// Default cooldown between accepted samples in milliseconds
pub const DEFAULT_COOLDOWN_MS: u64 = 300;

/// Frontal pose: |pitch| and |yaw| must not exceed this many degrees
pub const FRONT_PITCH_LIMIT_DEG: f64 = 10.0;
pub const FRONT_YAW_LIMIT_DEG: f64 = 10.0;

/// Minimum |yaw| in degrees before a sample counts as turned left or right
pub const SIDE_YAW_MIN_DEG: f64 = 10.0;

/// Pitch above which a right turn is classified as right-up
pub const RIGHT_UP_PITCH_DEG: f64 = 17.0;

/// Pitch above which a left turn is classified as left-up
pub const LEFT_UP_PITCH_DEG: f64 = 12.0;

/// Pitch below which a side turn is classified as side-down
pub const SIDE_DOWN_PITCH_DEG: f64 = 5.0;

/// Vertical pose thresholds
pub const UP_PITCH_DEG: f64 = 12.0;
pub const DOWN_PITCH_DEG: f64 = -12.0;

/// Default window sizes for smoothing filters
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 5;
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Default exponential smoothing factor
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;

/// Default frame rate of the synthetic guided sweep
pub const DEFAULT_SWEEP_FPS: u32 = 30;

/// Highest frame rate the guided sweep will generate
pub const MAX_SWEEP_FPS: u32 = 1000;

/// How long the guided sweep holds each target pose in milliseconds
pub const SWEEP_HOLD_MS: u64 = 700;
