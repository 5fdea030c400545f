// bevy_path_traveler
// Moves entities along authored polyline paths:
// - Constant-speed traversal with carried-over overshoot between segments
// - Restart or ping-pong looping with a finite or infinite loop budget
// - Facing control (keep, flip left/right, face travel direction)
// - Segment and loop completion events

use bevy::prelude::*;

mod config;
mod events;
mod facing;
mod observers;
pub mod prelude;
mod segments;
mod traveler;
mod traversal;
#[cfg(feature = "visualization")]
mod visualization;

// Public API - Components and configuration
pub use config::TravelerConfig;
pub use traveler::PathTraveler;

// Public API - Events
pub use events::AppendCurrentPosition;
pub use events::LoopComplete;
pub use events::RestartTravel;
pub use events::SegmentComplete;
pub use events::SetTravelerActive;
pub use events::TravelComplete;

// Public API - Traversal core (usable without the ECS)
pub use facing::FacingMode;
pub use facing::Orientation;
pub use facing::PositionOrientationSink;
pub use segments::MIN_DURATION_SECS;
pub use segments::PathPlan;
pub use segments::SegmentSequence;
pub use segments::SegmentView;
pub use segments::clamp_duration;
pub use traveler::FrameClock;
pub use traversal::Directive;
pub use traversal::LoopMode;
pub use traversal::TickOutcome;
pub use traversal::TravelEvent;
pub use traversal::TravelObserver;
pub use traversal::TravelPhase;
pub use traversal::Traversal;

// Public API - Systems (for ordering against user systems)
pub use traveler::advance_path_travelers;

// Public API - Visualization
#[cfg(feature = "visualization")]
pub use visualization::TravelPathGizmo;
#[cfg(feature = "visualization")]
pub use visualization::TravelPathVisualizationConfig;
#[cfg(feature = "visualization")]
pub use visualization::TravelPathVisualizationPlugin;

// Internal - used by plugin, not for external use
use observers::on_append_current_position;
use observers::on_restart_travel;
use observers::on_set_traveler_active;
use observers::on_traveler_added;

/// Plugin that adds path traveler functionality
pub struct PathTravelerPlugin;

impl Plugin for PathTravelerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Register observers for component lifecycle events
            .add_observer(on_traveler_added)
            // Register observers for request events
            .add_observer(on_restart_travel)
            .add_observer(on_set_traveler_active)
            .add_observer(on_append_current_position)
            // Add systems
            .add_systems(Update, advance_path_travelers);
    }
}
