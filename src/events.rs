//! Entity events emitted by travelers and the requests they accept.

use bevy::prelude::*;

// ============================================================================
// Traversal lifecycle (outgoing)
// ============================================================================

/// Fired when a traveler finishes a segment. `index` is the logical index in the
/// current travel direction.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct SegmentComplete {
    pub entity: Entity,
    pub index:  usize,
}

/// Fired when a traveler finishes one pass over its path.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct LoopComplete {
    pub entity: Entity,
    pub index:  usize,
}

/// Fired once when a traveler exhausts its loop budget and stops.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct TravelComplete {
    pub entity: Entity,
}

// ============================================================================
// Requests (incoming)
// ============================================================================

/// Rebuilds the traveler's path from its config and starts from the first waypoint.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct RestartTravel {
    pub entity: Entity,
}

impl RestartTravel {
    pub const fn new(entity: Entity) -> Self { Self { entity } }
}

/// Activates or deactivates a traveler.
/// Activation follows the traveler's `auto_play` and `restart_on_enable` settings.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct SetTravelerActive {
    pub entity: Entity,
    pub active: bool,
}

impl SetTravelerActive {
    pub const fn new(entity: Entity, active: bool) -> Self { Self { entity, active } }
}

/// Appends the entity's current translation to its waypoint list.
#[derive(EntityEvent, Reflect)]
#[reflect(Event, FromReflect)]
pub struct AppendCurrentPosition {
    pub entity: Entity,
}

impl AppendCurrentPosition {
    pub const fn new(entity: Entity) -> Self { Self { entity } }
}
