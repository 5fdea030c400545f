//! Plugin Tests
//!
//! Drives a headless `App` with a fixed frame delta and checks:
//! - Transform writes and facing from the per-frame system
//! - Segment, loop and completion events, in order
//! - Restarts requested from event observers
//! - Activation and deactivation requests
//! - Appending the current position as a waypoint

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_path_traveler::prelude::*;

const FRAME: Duration = Duration::from_millis(100);

#[derive(Resource, Default)]
struct Recorded {
    segments:  Vec<(Entity, usize)>,
    loops:     Vec<(Entity, usize)>,
    completed: Vec<Entity>,
}

fn app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, PathTravelerPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<Recorded>()
        .add_observer(
            |segment: On<SegmentComplete>, mut recorded: ResMut<Recorded>| {
                recorded.segments.push((segment.entity, segment.index));
            },
        )
        .add_observer(|lap: On<LoopComplete>, mut recorded: ResMut<Recorded>| {
            recorded.loops.push((lap.entity, lap.index));
        })
        .add_observer(
            |complete: On<TravelComplete>, mut recorded: ResMut<Recorded>| {
                recorded.completed.push(complete.entity);
            },
        );
    app
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn l_path() -> TravelerConfig {
    TravelerConfig::new(
        [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        1.0,
    )
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map_or(Vec3::NAN, |transform| transform.translation)
}

#[test]
fn travels_path_and_reports_boundaries() {
    let mut app = app();
    let entity = app.world_mut().spawn(PathTraveler::new(l_path())).id();

    run(&mut app, 3);
    let midway = translation(&app, entity);
    assert!(midway.x > 0.0 && midway.x < 1.0, "unexpected position {midway:?}");
    assert!(midway.y.abs() < 1e-5);

    run(&mut app, 30);
    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.segments, vec![(entity, 0), (entity, 1)]);
    assert_eq!(recorded.loops, vec![(entity, 0)]);
    assert_eq!(recorded.completed, vec![entity]);

    let traveler = app.world().get::<PathTraveler>(entity);
    assert!(traveler.is_some_and(|traveler| traveler.traversal().is_terminated()));
}

#[test]
fn ping_pong_reports_each_loop() {
    let mut app = app();
    let config = l_path().with_loop_mode(LoopMode::PingPong).with_loops(2);
    let entity = app.world_mut().spawn(PathTraveler::new(config)).id();

    run(&mut app, 40);

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.loops, vec![(entity, 0), (entity, 1)]);
    assert_eq!(
        recorded.segments,
        vec![(entity, 0), (entity, 1), (entity, 0), (entity, 1)]
    );
    assert_eq!(recorded.completed, vec![entity]);

    // the second pass ran backwards, so the traveler stopped near the start
    let end = translation(&app, entity);
    assert!(end.distance(Vec3::ZERO) < 0.5, "unexpected position {end:?}");
}

#[test]
fn restart_requested_from_observer_applies_after_frame() {
    let mut app = app();
    app.add_observer(|lap: On<LoopComplete>, mut commands: Commands| {
        commands.trigger(RestartTravel::new(lap.entity));
    });
    let entity = app
        .world_mut()
        .spawn(PathTraveler::new(l_path().with_loops(2)))
        .id();

    run(&mut app, 60);

    let recorded = app.world().resource::<Recorded>();
    assert!(recorded.loops.len() >= 2);
    assert!(recorded.loops.iter().all(|(_, index)| *index == 0));
    assert!(recorded.completed.is_empty());

    let traveler = app.world().get::<PathTraveler>(entity);
    assert!(traveler.is_some_and(|traveler| traveler.traversal().is_valid()));
}

#[test]
fn deactivated_traveler_holds_position() {
    let mut app = app();
    let config = l_path().with_duration(10.0);
    let entity = app.world_mut().spawn(PathTraveler::new(config)).id();

    run(&mut app, 5);
    app.world_mut().trigger(SetTravelerActive::new(entity, false));
    app.update();
    let held = translation(&app, entity);

    run(&mut app, 5);
    assert_eq!(translation(&app, entity), held);

    // restart_on_enable brings it back to the first waypoint
    app.world_mut().trigger(SetTravelerActive::new(entity, true));
    app.update();
    assert!(translation(&app, entity).distance(Vec3::ZERO) < 1e-5);
}

#[test]
fn coincident_waypoints_stay_idle() {
    let mut app = app();
    let start = Vec3::new(4.0, 2.0, 0.0);
    let config = TravelerConfig::new([Vec3::ONE, Vec3::ONE], 1.0);
    let entity = app
        .world_mut()
        .spawn((PathTraveler::new(config), Transform::from_translation(start)))
        .id();

    run(&mut app, 20);

    let recorded = app.world().resource::<Recorded>();
    assert!(recorded.segments.is_empty());
    assert!(recorded.loops.is_empty());
    assert_eq!(translation(&app, entity), start);
}

#[test]
fn forward_facing_rotates_transform() {
    let mut app = app();
    let config = TravelerConfig::new([Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)], 1.0)
        .with_facing(FacingMode::ForwardAlways);
    let entity = app.world_mut().spawn(PathTraveler::new(config)).id();

    let rotation = app
        .world()
        .get::<Transform>(entity)
        .map_or(Quat::IDENTITY, |transform| transform.rotation);
    assert!((rotation * Vec3::X - Vec3::Y).length() < 1e-5);
}

#[test]
fn append_current_position_extends_waypoints() {
    let mut app = app();
    let here = Vec3::new(3.0, 4.0, 0.0);
    let entity = app
        .world_mut()
        .spawn((
            PathTraveler::new(TravelerConfig::default().with_auto_play(false)),
            Transform::from_translation(here),
        ))
        .id();

    app.world_mut().trigger(AppendCurrentPosition::new(entity));

    let waypoints = app
        .world()
        .get::<PathTraveler>(entity)
        .map(|traveler| traveler.config.waypoints.clone());
    assert_eq!(waypoints, Some(vec![here]));
}
