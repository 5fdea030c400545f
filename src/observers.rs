//! Observers that wire events and component lifecycle to traveler behavior.

use bevy::prelude::*;

use crate::events::AppendCurrentPosition;
use crate::events::RestartTravel;
use crate::events::SetTravelerActive;
use crate::traveler::PathTraveler;

/// Observer for `PathTraveler` insertion - the first activation
pub fn on_traveler_added(
    add: On<Add, PathTraveler>,
    mut query: Query<(&mut PathTraveler, &mut Transform)>,
) {
    let Ok((mut traveler, mut transform)) = query.get_mut(add.entity) else {
        return;
    };

    if traveler.activate(&mut *transform) {
        debug!(
            "PathTraveler {:?}: started with {} waypoints",
            add.entity,
            traveler.config.waypoints.len()
        );
    }
}

/// Observer for `RestartTravel` event - starts the path over from the first waypoint
pub fn on_restart_travel(
    restart: On<RestartTravel>,
    mut query: Query<(&mut PathTraveler, &mut Transform)>,
) {
    let entity = restart.entity;

    let Ok((mut traveler, mut transform)) = query.get_mut(entity) else {
        warn!("RestartTravel: entity {entity:?} has no PathTraveler");
        return;
    };

    traveler.restart(&mut *transform);
}

/// Observer for `SetTravelerActive` event - enables or disables ticking
pub fn on_set_traveler_active(
    set_active: On<SetTravelerActive>,
    mut query: Query<(&mut PathTraveler, &mut Transform)>,
) {
    let entity = set_active.entity;

    let Ok((mut traveler, mut transform)) = query.get_mut(entity) else {
        warn!("SetTravelerActive: entity {entity:?} has no PathTraveler");
        return;
    };

    match (set_active.active, traveler.is_active()) {
        (true, false) => {
            traveler.activate(&mut *transform);
        },
        (false, true) => traveler.deactivate(),
        _ => {},
    }
}

/// Observer for `AppendCurrentPosition` event - records the current translation as a waypoint
pub fn on_append_current_position(
    append: On<AppendCurrentPosition>,
    mut query: Query<(&mut PathTraveler, &Transform)>,
) {
    let entity = append.entity;

    let Ok((mut traveler, transform)) = query.get_mut(entity) else {
        warn!("AppendCurrentPosition: entity {entity:?} has no PathTraveler");
        return;
    };

    traveler.config.append_waypoint(transform.translation);

    info!(
        "AppendCurrentPosition: {entity:?} now has {} waypoints, last={:.1?}",
        traveler.config.waypoints.len(),
        transform.translation
    );
}
