use maze_replay_core::{
    Config, PlaybackControl, PlaybackEngine, PlaybackHandle, PlaybackStatus, Pose,
    TrajectoryProfile,
};

fn straight(duration: f32) -> TrajectoryProfile {
    TrajectoryProfile::from_keyframes([
        (0.0, Pose::new(0.0, 0.0, 0.0)),
        (duration, Pose::new(duration, 0.0, 0.0)),
    ])
    .expect("profile")
}

#[test]
fn renderer_sees_every_frame_ui_sees_throttled_time() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), straight(10.0));
    let frames = eng.frame_reader();
    let status = eng.status_reader();
    eng.play();
    let after_play = status.revision();

    // Two 16 ms frames: hot cell follows, observed time stays put.
    eng.advance(0.016);
    assert!((frames.current_time() - 0.016).abs() < 1e-6);
    eng.advance(0.016);
    assert!((frames.pose().x() - 0.032).abs() < 1e-6);
    assert_eq!(status.get().current_time, 0.0);
    assert_eq!(status.revision(), after_play);

    // Crossing 50 ms of host time publishes a mirrored copy.
    eng.advance(0.016);
    eng.advance(0.016);
    let observed = status.get();
    assert!((observed.current_time - 0.064).abs() < 1e-5);
    assert_eq!(observed.revision, after_play + 1);
}

#[test]
fn control_fields_publish_immediately() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), straight(3.0));
    let status = eng.status_reader();
    let rx = status.subscribe();

    eng.set_speed(4.0);
    eng.set_loop_enabled(true);
    eng.play();

    let seen: Vec<_> = rx.try_iter().collect();
    assert_eq!(seen.len(), 3);
    let last = seen[2];
    assert!(last.is_playing);
    assert_eq!(last.status, PlaybackStatus::Playing);
    assert_eq!(last.speed, 4.0);
    assert!(last.is_loop_enabled);
    assert_eq!(last.duration, 3.0);
}

#[test]
fn seek_refreshes_displayed_time_at_once() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), straight(3.0));
    let status = eng.status_reader();
    eng.seek_to(2.5, true);
    assert_eq!(status.get().current_time, 2.5);
    assert_eq!(status.get().status, PlaybackStatus::Paused);
}

#[test]
fn end_of_run_is_published() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), straight(0.05));
    let status = eng.status_reader();
    eng.play();
    eng.advance(0.04);
    eng.advance(0.04);
    let observed = status.get();
    assert!(!observed.is_playing);
    assert_eq!(observed.current_time, 0.05);
}

#[test]
fn handle_drives_the_same_tiers() {
    let handle = PlaybackHandle::new(PlaybackEngine::new(Config::default()));
    let frames = handle.frame_reader();
    let status = handle.status_reader();

    handle.set_profile(straight(2.0));
    let mut ui = handle.clone();
    ui.play();
    // Command issued before this frame's advance is honored by it.
    handle.advance(0.1);

    assert!((frames.current_time() - 0.1).abs() < 1e-6);
    assert!(status.get().is_playing);
    assert_eq!(status.get().duration, 2.0);
}
