//! Per-traveler configuration.

use bevy::prelude::*;

use crate::facing::FacingMode;
use crate::traversal::LoopMode;

/// Authoring-time settings for one path traveler.
///
/// Waypoints are read only when the traversal restarts; editing them while a
/// traversal is running takes effect on the next restart.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct TravelerConfig {
    /// Ordered waypoints in the host's local space.
    pub waypoints:         Vec<Vec3>,
    /// Seconds to traverse the whole path once. Clamped to a small positive minimum.
    pub duration:          f32,
    pub facing:            FacingMode,
    pub loop_mode:         LoopMode,
    /// Number of passes over the path. Negative loops forever.
    pub loops:             i32,
    /// Start on first activation.
    pub auto_play:         bool,
    /// Start over from scratch on every later activation.
    pub restart_on_enable: bool,
}

impl Default for TravelerConfig {
    fn default() -> Self {
        Self {
            waypoints:         Vec::new(),
            duration:          0.0,
            facing:            FacingMode::KeepOriginal,
            loop_mode:         LoopMode::Restart,
            loops:             1,
            auto_play:         true,
            restart_on_enable: true,
        }
    }
}

impl TravelerConfig {
    pub fn new(waypoints: impl Into<Vec<Vec3>>, duration: f32) -> Self {
        Self {
            waypoints: waypoints.into(),
            duration,
            ..default()
        }
    }

    #[must_use]
    pub fn with_waypoints(mut self, waypoints: impl Into<Vec<Vec3>>) -> Self {
        self.waypoints = waypoints.into();
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn with_facing(mut self, facing: FacingMode) -> Self {
        self.facing = facing;
        self
    }

    #[must_use]
    pub const fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub const fn with_loops(mut self, loops: i32) -> Self {
        self.loops = loops;
        self
    }

    #[must_use]
    pub const fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    #[must_use]
    pub const fn with_restart_on_enable(mut self, restart_on_enable: bool) -> Self {
        self.restart_on_enable = restart_on_enable;
        self
    }

    /// Appends a waypoint at the end of the path.
    pub fn append_waypoint(&mut self, waypoint: Vec3) { self.waypoints.push(waypoint); }

    pub const fn loops_forever(&self) -> bool { self.loops < 0 }
}
