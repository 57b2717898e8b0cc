use std::f32::consts::PI;

use maze_replay_core::{
    interp::shortest_delta, Config, PlaybackControl, PlaybackEngine, Pose, TrajectoryProfile,
};
use maze_replay_test_fixtures::trajectories;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn load(name: &str) -> TrajectoryProfile {
    trajectories::load(name).expect("fixture should load")
}

#[test]
fn unordered_fixture_is_sorted_on_install() {
    let eng = PlaybackEngine::with_profile(Config::default(), load("l-turn"));
    let keys: Vec<f32> = eng.index().keys().collect();
    assert_eq!(keys, vec![0.0, 1.0, 2.0]);
    assert_eq!(eng.duration(), 2.0);
    assert_eq!(eng.current_pose(), Pose::new(0.0, 0.0, 0.0));
}

#[test]
fn json_text_and_typed_load_agree() {
    let text = trajectories::json("maze-run").unwrap();
    let parsed = TrajectoryProfile::from_json(&text).unwrap();
    assert_eq!(parsed, load("maze-run"));
}

#[test]
fn maze_run_turns_through_pi_not_zero() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), load("maze-run"));
    // Between 1.3 s (179°) and 1.5 s (-179°) the robot finishes its U-turn.
    eng.seek_to(1.4, true);
    approx(eng.current_pose().heading.abs(), PI, 1e-3);
}

#[test]
fn full_playback_heading_changes_stay_small() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), load("maze-run"));
    eng.play();
    let mut prev = eng.current_pose().heading;
    let mut frames = 0;
    while eng.is_playing() {
        eng.advance(1.0 / 60.0);
        let h = eng.current_pose().heading;
        // A 60 Hz frame never swings more than a quarter turn on this run.
        assert!(shortest_delta(prev, h).abs() < PI / 4.0, "jump at t={}", eng.current_time());
        prev = h;
        frames += 1;
        assert!(frames < 10_000, "run never ended");
    }
    assert_eq!(eng.current_time(), eng.duration());
    assert_eq!(eng.current_pose(), Pose::new(-0.09, 0.09, 0.0));
}

#[test]
fn empty_fixture() {
    let mut eng = PlaybackEngine::with_profile(Config::default(), load("empty"));
    assert!(!eng.play());
    assert_eq!(eng.current_pose(), Pose::ORIGIN);
}
