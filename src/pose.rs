//! The nine head orientations a scan cycle asks for.

use crate::{constants::POSE_COUNT, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete head orientation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Looking straight at the camera
    Front,
    /// Head tilted up
    Up,
    /// Head tilted down
    Down,
    /// Turned left
    Left,
    /// Turned left and tilted up
    LeftUp,
    /// Turned left and tilted down
    LeftDown,
    /// Turned right
    Right,
    /// Turned right and tilted up
    RightUp,
    /// Turned right and tilted down
    RightDown,
}

impl Pose {
    /// Every pose, in display order
    pub const ALL: [Pose; POSE_COUNT] = [
        Pose::Front,
        Pose::Up,
        Pose::Down,
        Pose::Left,
        Pose::LeftUp,
        Pose::LeftDown,
        Pose::Right,
        Pose::RightUp,
        Pose::RightDown,
    ];

    /// Position of this pose in [`Pose::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::LeftUp => "left_up",
            Self::LeftDown => "left_down",
            Self::Right => "right",
            Self::RightUp => "right_up",
            Self::RightDown => "right_down",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pose {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Pose::ALL
            .into_iter()
            .find(|pose| pose.as_str() == normalized || pose.as_str().replace('_', "") == normalized)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown pose: {s}")))
    }
}
