//! End-to-end scan sessions over synthetic and recorded streams

use head_pose_scan::{
    config::Config,
    pose::Pose,
    replay::{guided_sweep, parse_samples, run_replay},
    sample::RawSample,
    session::{ScanEvent, ScanSession},
};
use std::collections::HashSet;
use std::time::{Duration, Instant};

fn detected_poses(events: &[(Duration, ScanEvent)]) -> Vec<Pose> {
    events
        .iter()
        .filter_map(|(_, event)| match event {
            ScanEvent::Detected(pose) => Some(*pose),
            _ => None,
        })
        .collect()
}

#[test]
fn test_guided_sweep_completes_a_cycle() {
    let mut session = ScanSession::default();
    let events = run_replay(&mut session, &guided_sweep(30), Instant::now());

    let completion = events
        .iter()
        .position(|(_, event)| *event == ScanEvent::CycleCompleted)
        .expect("sweep should complete a cycle");

    let before: HashSet<_> = detected_poses(&events[..completion]).into_iter().collect();
    assert_eq!(before.len(), 9);
    assert_eq!(detected_poses(&events[..completion]).len(), 9);

    // The final front hold starts the next cycle
    assert_eq!(detected_poses(&events[completion..]), vec![Pose::Front]);
    assert_eq!(session.cycles_completed(), 1);
    assert_eq!(session.progress().detected, vec![Pose::Front]);
}

#[test]
fn test_replay_never_returns_rejected() {
    let mut session = ScanSession::default();
    let events = run_replay(&mut session, &guided_sweep(60), Instant::now());
    assert!(events.iter().all(|(_, event)| *event != ScanEvent::Rejected));
}

#[test]
fn test_replay_events_are_spaced_by_cooldown() {
    let mut session = ScanSession::default();
    let events = run_replay(&mut session, &guided_sweep(30), Instant::now());

    for pair in events.windows(2) {
        assert!(pair[1].0 - pair[0].0 >= Duration::from_millis(300));
    }
}

#[test]
fn test_smoothed_session_still_completes() {
    let mut config = Config::default();
    config.smoothing.filter = "median".to_string();
    config.smoothing.median_window = 3;

    let mut session = ScanSession::from_config(&config).unwrap();
    run_replay(&mut session, &guided_sweep(30), Instant::now());
    assert_eq!(session.cycles_completed(), 1);
}

#[test]
fn test_from_config_rejects_invalid() {
    let mut config = Config::default();
    config.classifier.thresholds.down_pitch = 50.0;
    assert!(ScanSession::from_config(&config).is_err());
}

#[test]
fn test_recorded_log_replay() {
    // Up then down, frames 100 ms apart; every third frame passes the cooldown
    let log = "\
0    -0.30  0.00
100  -0.30  0.00
200  -0.30  0.00
300   0.30  0.00
400   0.30  0.00
";
    let samples = parse_samples(log).unwrap();
    let mut session = ScanSession::default();
    let events = run_replay(&mut session, &samples, Instant::now());

    assert_eq!(
        events,
        vec![
            (Duration::ZERO, ScanEvent::Detected(Pose::Up)),
            (Duration::from_millis(300), ScanEvent::Detected(Pose::Down)),
        ]
    );
}

#[test]
fn test_sessions_are_independent() {
    let mut first = ScanSession::default();
    let mut second = ScanSession::default();
    let now = Instant::now();

    first.process_at(RawSample::from_degrees(0.0, 0.0), now);
    assert_eq!(
        second.process_at(RawSample::from_degrees(0.0, 0.0), now),
        ScanEvent::Detected(Pose::Front)
    );
}

#[test]
fn test_nan_frame_does_not_stall_smoothed_session() {
    for filter in ["none", "moving_average", "median", "exponential"] {
        let mut config = Config::default();
        config.smoothing.filter = filter.to_string();
        let mut session = ScanSession::from_config(&config).unwrap();
        let start = Instant::now();

        assert_eq!(session.process_at(RawSample::new(f64::NAN, 0.0), start), ScanEvent::NoChange);

        let events: Vec<ScanEvent> = (1..=10u64)
            .map(|frame| {
                session.process_at(RawSample::from_degrees(0.0, 0.0), start + Duration::from_millis(frame * 100))
            })
            .collect();

        // First frame past the cooldown armed by the NaN frame
        assert_eq!(events[2], ScanEvent::Detected(Pose::Front), "{filter} smoothing stalled after NaN: {events:?}");
    }
}
