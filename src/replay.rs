//! Recorded and synthetic sample streams.
//!
//! A sample log is plain text, one frame per line:
//!
//! ```text
//! # timestamp_ms pitch_rad yaw_rad
//! 0     0.01  -0.02
//! 33,   0.02, -0.02
//! ```
//!
//! Fields may be separated by whitespace, commas or both. Blank lines and
//! `#` comments are ignored. Timestamps are milliseconds from the start of
//! the recording and must not decrease.

use crate::{
    constants::{MAX_SWEEP_FPS, SWEEP_HOLD_MS},
    pose::Pose,
    sample::RawSample,
    session::{ScanEvent, ScanSession},
    Error, Result,
};
use std::path::Path;
use std::time::{Duration, Instant};

/// A raw sample and when it arrived, relative to the start of the stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    pub offset: Duration,
    pub sample: RawSample,
}

/// Parse a sample log
///
/// # Errors
///
/// Returns `Error::ReplayError` naming the first malformed line
pub fn parse_samples(content: &str) -> Result<Vec<TimedSample>> {
    let mut samples = Vec::new();
    let mut last_ms = 0.0_f64;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() != 3 {
            return Err(replay_error(
                line_no,
                format!("expected 3 fields (timestamp_ms pitch yaw), found {}", fields.len()),
            ));
        }

        let parse = |field: &str, what: &str| {
            field
                .parse::<f64>()
                .map_err(|_| replay_error(line_no, format!("invalid {what}: {field}")))
        };
        let timestamp_ms = parse(fields[0], "timestamp")?;
        let pitch = parse(fields[1], "pitch")?;
        let yaw = parse(fields[2], "yaw")?;

        if !timestamp_ms.is_finite() || timestamp_ms < 0.0 {
            return Err(replay_error(line_no, format!("timestamp must be finite and >= 0, got {timestamp_ms}")));
        }
        if timestamp_ms < last_ms {
            return Err(replay_error(
                line_no,
                format!("timestamp {timestamp_ms} is earlier than previous {last_ms}"),
            ));
        }
        last_ms = timestamp_ms;

        samples.push(TimedSample {
            offset: millis_to_duration(timestamp_ms),
            sample: RawSample::new(pitch, yaw),
        });
    }

    Ok(samples)
}

/// Read and parse a sample log file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TimedSample>> {
    let content = std::fs::read_to_string(path)?;
    parse_samples(&content)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Caller checked finite and >= 0
fn millis_to_duration(ms: f64) -> Duration {
    Duration::from_nanos((ms * 1_000_000.0).round() as u64)
}

fn replay_error(line: usize, message: String) -> Error {
    Error::ReplayError { line, message }
}

/// Classifier-space (pitch, yaw) in degrees used to act out each pose
fn target_angles(pose: Pose) -> (f64, f64) {
    match pose {
        Pose::Front => (0.0, 0.0),
        Pose::Up => (20.0, 0.0),
        Pose::Down => (-20.0, 0.0),
        Pose::Left => (8.0, -20.0),
        Pose::LeftUp => (20.0, -20.0),
        Pose::LeftDown => (-10.0, -20.0),
        Pose::Right => (10.0, 20.0),
        Pose::RightUp => (25.0, 20.0),
        Pose::RightDown => (-10.0, 20.0),
    }
}

/// Synthetic stream of a user following the scan prompts.
///
/// Holds each pose in turn (front, up, down, the left column, the right
/// column, then front again) at `fps` frames per second, clamped to
/// `1..=MAX_SWEEP_FPS`.
#[must_use]
pub fn guided_sweep(fps: u32) -> Vec<TimedSample> {
    let route = [
        Pose::Front,
        Pose::Up,
        Pose::Down,
        Pose::LeftUp,
        Pose::Left,
        Pose::LeftDown,
        Pose::RightUp,
        Pose::Right,
        Pose::RightDown,
        Pose::Front,
    ];
    let fps = u64::from(fps.clamp(1, MAX_SWEEP_FPS));
    let frames_per_hold = (SWEEP_HOLD_MS * fps / 1000).max(1);

    let mut samples = Vec::new();
    let mut frame: u64 = 0;
    for pose in route {
        let (pitch, yaw) = target_angles(pose);
        for _ in 0..frames_per_hold {
            samples.push(TimedSample {
                offset: Duration::from_millis(frame * 1000 / fps),
                sample: RawSample::from_degrees(pitch, yaw),
            });
            frame += 1;
        }
    }
    samples
}

/// Feed a stream through a session, timing each frame from `base`.
///
/// Returns every event except `Rejected`, paired with its offset.
pub fn run_replay(session: &mut ScanSession, samples: &[TimedSample], base: Instant) -> Vec<(Duration, ScanEvent)> {
    samples
        .iter()
        .filter_map(|timed| match session.process_at(timed.sample, base + timed.offset) {
            ScanEvent::Rejected => None,
            event => Some((timed.offset, event)),
        })
        .collect()
}
