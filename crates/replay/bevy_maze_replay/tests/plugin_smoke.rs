use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_maze_replay::{
    GroundPlane, LoadProfile, MazeReplayPlugin, PoseMapping, ReplayCommand, ReplayEngine,
    ReplayEvent, ReplayReaders, ReplayTarget,
};
use maze_replay_core::{ControlCommand, PlaybackEvent, TrajectoryProfile};
use maze_replay_test_fixtures::trajectories;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn app_with_l_turn() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(MazeReplayPlugin::default());
    let target = app
        .world_mut()
        .spawn((Transform::default(), ReplayTarget))
        .id();
    let profile: TrajectoryProfile = trajectories::load("l-turn").expect("fixture");
    app.world_mut().send_event(LoadProfile(profile));
    (app, target)
}

#[test]
fn plugin_inserts_engine_resource() {
    let mut app = App::new();
    // it should insert the engine and reader handles when the plugin is added
    app.add_plugins(MinimalPlugins)
        .add_plugins(MazeReplayPlugin::default());

    assert!(app.world().get_resource::<ReplayEngine>().is_some());
    assert!(app.world().get_resource::<ReplayReaders>().is_some());
    assert!(app.world().get_resource::<PoseMapping>().is_some());
}

#[test]
fn seek_command_moves_target_in_same_frame() {
    let (mut app, target) = app_with_l_turn();
    app.world_mut().send_event(ReplayCommand(ControlCommand::Seek {
        time: 1.5,
        pause_after_seek: true,
    }));
    app.update();

    let tf = app.world().get::<Transform>(target).expect("transform");
    // Maze (1, 0.5) on the XZ plane.
    approx(tf.translation.x, 1.0, 1e-5);
    approx(tf.translation.z, -0.5, 1e-5);
    let (axis, angle) = tf.rotation.to_axis_angle();
    approx(axis.y.abs(), 1.0, 1e-4);
    approx(angle, std::f32::consts::FRAC_PI_4, 1e-4);
}

#[test]
fn play_advances_with_time_delta() {
    let (mut app, target) = app_with_l_turn();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));
    app.world_mut()
        .send_event(ReplayCommand(ControlCommand::Play));
    for _ in 0..4 {
        app.update();
    }

    let eng = app.world().resource::<ReplayEngine>();
    let t = eng.0.current_time();
    assert!(t > 0.0 && t <= 0.2 + 1e-5, "unexpected time {t}");
    assert!(eng.0.is_playing());

    let readers = app.world().resource::<ReplayReaders>();
    assert_eq!(readers.frames.current_time(), t);

    let tf = app.world().get::<Transform>(target).expect("transform");
    approx(tf.translation.x, eng.0.current_pose().x(), 1e-6);
}

#[test]
fn engine_events_are_forwarded() {
    let (mut app, _) = app_with_l_turn();
    app.world_mut()
        .send_event(ReplayCommand(ControlCommand::SetLoopEnabled { enabled: true }));
    app.update();

    let events = app.world().resource::<Events<ReplayEvent>>();
    let mut reader = events.get_reader();
    let seen: Vec<PlaybackEvent> = reader.read(events).map(|e| e.0.clone()).collect();
    assert!(matches!(
        seen.first(),
        Some(PlaybackEvent::ProfileInstalled { keyframes: 3, .. })
    ));
    assert!(seen.contains(&PlaybackEvent::LoopChanged { enabled: true }));
}

#[test]
fn xy_plane_mapping() {
    let (mut app, target) = app_with_l_turn();
    app.insert_resource(PoseMapping {
        plane: GroundPlane::XY,
        height: 0.25,
        scale: 2.0,
    });
    app.world_mut().send_event(ReplayCommand(ControlCommand::Seek {
        time: 2.0,
        pause_after_seek: true,
    }));
    app.update();

    let tf = app.world().get::<Transform>(target).expect("transform");
    approx(tf.translation.x, 2.0, 1e-5);
    approx(tf.translation.y, 2.0, 1e-5);
    approx(tf.translation.z, 0.25, 1e-6);
}
