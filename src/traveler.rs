//! Path traveler component and the per-frame system that drives it.
//! Moves an entity along a polyline at constant speed, looping as configured.

use bevy::prelude::*;

use crate::config::TravelerConfig;
use crate::events::LoopComplete;
use crate::events::SegmentComplete;
use crate::events::TravelComplete;
use crate::facing::PositionOrientationSink;
use crate::traversal::TickOutcome;
use crate::traversal::TravelEvent;
use crate::traversal::TravelObserver;
use crate::traversal::Traversal;

/// Supplies the elapsed time for one tick.
pub trait FrameClock {
    fn delta_secs(&self) -> f32;
}

impl<T: Default> FrameClock for Time<T> {
    fn delta_secs(&self) -> f32 { Self::delta_secs(self) }
}

/// A fixed step, handy for driving a traveler by hand.
impl FrameClock for f32 {
    fn delta_secs(&self) -> f32 { *self }
}

/// Component that moves its entity along `config.waypoints`.
///
/// Adding the component counts as the first activation: with `auto_play` set the
/// traversal starts right away. Later activations (via `SetTravelerActive`) start over
/// when `restart_on_enable` is set and otherwise resume whatever state was left,
/// including a finished one.
#[derive(Component, Reflect, Default, Clone, Debug)]
#[reflect(Component, Default)]
#[require(Transform)]
pub struct PathTraveler {
    pub config: TravelerConfig,
    traversal:  Traversal,
    played:     bool,
    active:     bool,
}

impl PathTraveler {
    pub fn new(config: TravelerConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub const fn traversal(&self) -> &Traversal { &self.traversal }

    pub const fn is_active(&self) -> bool { self.active }

    /// Marks the traveler active. Returns `true` when this activation restarted the path.
    pub fn activate(&mut self, sink: &mut impl PositionOrientationSink) -> bool {
        self.active = true;

        if self.config.auto_play && !self.played {
            self.played = true;
            self.restart(sink);
            true
        } else if self.config.restart_on_enable {
            self.restart(sink);
            true
        } else {
            false
        }
    }

    /// Stops ticking. Traversal state is kept as is.
    pub const fn deactivate(&mut self) { self.active = false; }

    /// Rebuilds the path from the current config and starts from the first waypoint.
    pub fn restart(&mut self, sink: &mut impl PositionOrientationSink) {
        self.traversal.restart(&self.config, sink);
    }

    /// Advances by one frame of `clock`.
    ///
    /// Restarts requested by `observer` are applied after the tick has finished.
    pub fn advance(
        &mut self,
        clock: &impl FrameClock,
        sink: &mut impl PositionOrientationSink,
        observer: &mut impl TravelObserver,
    ) -> TickOutcome {
        if !self.active {
            return TickOutcome::default();
        }

        let outcome = self.traversal.tick(clock.delta_secs(), sink, observer);
        if outcome.restart_requested {
            debug!("PathTraveler: applying deferred restart");
            self.restart(sink);
        }
        outcome
    }
}

/// System that advances every active `PathTraveler` by the frame delta.
///
/// Writes the interpolated position and facing to the entity's `Transform` and
/// re-triggers boundary events as entity events.
pub fn advance_path_travelers(
    mut commands: Commands,
    time: Res<Time>,
    mut travelers: Query<(Entity, &mut PathTraveler, &mut Transform)>,
) {
    for (entity, mut traveler, mut transform) in &mut travelers {
        if !traveler.is_active() || !traveler.traversal().is_valid() {
            continue;
        }

        let mut events = Vec::new();
        let outcome = traveler.advance(&*time, &mut *transform, &mut events);

        for event in events {
            match event {
                TravelEvent::SegmentCompleted { index } => {
                    commands.trigger(SegmentComplete { entity, index });
                },
                TravelEvent::LoopCompleted { index } => {
                    commands.trigger(LoopComplete { entity, index });
                },
            }
        }

        if outcome.terminated {
            commands.trigger(TravelComplete { entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::Directive;
    use crate::traversal::TravelPhase;

    fn config() -> TravelerConfig {
        TravelerConfig::new([Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], 1.0)
    }

    #[test]
    fn first_activation_auto_plays() {
        let mut transform = Transform::default();
        let mut traveler = PathTraveler::new(config().with_restart_on_enable(false));

        assert!(traveler.activate(&mut transform));
        assert!(traveler.traversal().is_valid());

        traveler.advance(&0.5_f32, &mut transform, &mut ());
        traveler.deactivate();

        // later activations keep the existing state
        assert!(!traveler.activate(&mut transform));
        assert!((traveler.traversal().progress() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn restart_on_enable_starts_over() {
        let mut transform = Transform::default();
        let mut traveler = PathTraveler::new(config());

        traveler.activate(&mut transform);
        traveler.advance(&0.5_f32, &mut transform, &mut ());
        traveler.deactivate();

        assert!(traveler.activate(&mut transform));
        assert!(traveler.traversal().progress().abs() < 1e-5);
    }

    #[test]
    fn without_auto_play_first_activation_follows_restart_on_enable() {
        let mut transform = Transform::default();
        let mut traveler = PathTraveler::new(
            config()
                .with_auto_play(false)
                .with_restart_on_enable(false),
        );

        assert!(!traveler.activate(&mut transform));
        assert_eq!(traveler.traversal().phase(), TravelPhase::Idle);

        let mut traveler = PathTraveler::new(config().with_auto_play(false));
        assert!(traveler.activate(&mut transform));
        assert!(traveler.traversal().is_valid());
    }

    #[test]
    fn inactive_traveler_does_not_move() {
        let mut transform = Transform::from_xyz(7.0, 7.0, 7.0);
        let mut traveler = PathTraveler::new(config());

        let outcome = traveler.advance(&0.5_f32, &mut transform, &mut ());

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(transform.translation, Vec3::splat(7.0));
    }

    #[test]
    fn advance_writes_transform() {
        let mut transform = Transform::default();
        let mut traveler = PathTraveler::new(config());
        traveler.activate(&mut transform);

        traveler.advance(&0.25_f32, &mut transform, &mut ());
        traveler.advance(&0.25_f32, &mut transform, &mut ());

        assert!((transform.translation - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-5);
    }

    struct RestartEverySegment;

    impl TravelObserver for RestartEverySegment {
        fn on_event(&mut self, _event: TravelEvent) -> Directive { Directive::Restart }
    }

    #[test]
    fn deferred_restart_resets_after_tick() {
        let mut transform = Transform::default();
        let mut traveler = PathTraveler::new(config().with_loops(3));
        traveler.activate(&mut transform);

        let outcome = traveler.advance(&1.5_f32, &mut transform, &mut RestartEverySegment);

        assert!(outcome.restart_requested);
        assert_eq!(outcome.loops_completed, 1);
        assert_eq!(traveler.traversal().loop_index(), 0);
        assert!(traveler.traversal().progress().abs() < 1e-5);
    }

    #[test]
    fn time_is_a_frame_clock() {
        let time = Time::<()>::default();
        assert!(FrameClock::delta_secs(&time).abs() < f32::EPSILON);
        assert!((FrameClock::delta_secs(&0.2_f32) - 0.2).abs() < f32::EPSILON);
    }
}
