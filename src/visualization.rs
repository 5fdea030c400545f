//! Visualization system for traveler path debugging
//!
//! Draws the effective (possibly reversed) segments of every `PathTraveler`, with the
//! segment currently being traversed drawn as an arrow.
//! Uses Bevy's GizmoConfigGroup pattern, disabled by default.

use bevy::prelude::*;

use crate::segments::SegmentView;
use crate::traveler::PathTraveler;

/// Gizmo config group for traveler path visualization.
/// Toggle via `GizmoConfigStore::config_mut::<TravelPathGizmo>().enabled`
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct TravelPathGizmo {}

/// Configuration for traveler path visualization colors and appearance
#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct TravelPathVisualizationConfig {
    pub path_color:            Color,
    pub current_segment_color: Color,
    pub idle_color:            Color,
    pub line_width:            f32,
}

impl Default for TravelPathVisualizationConfig {
    fn default() -> Self {
        Self {
            path_color:            Color::srgb(0.0, 0.8, 1.0), // Cyan
            current_segment_color: Color::srgb(1.0, 1.0, 0.0), // Yellow
            idle_color:            Color::srgb(0.5, 0.5, 0.5), // Grey
            line_width:            2.0,
        }
    }
}

/// Plugin that adds traveler path visualization
pub struct TravelPathVisualizationPlugin;

impl Plugin for TravelPathVisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<TravelPathGizmo>()
            .init_resource::<TravelPathVisualizationConfig>()
            .add_systems(Startup, init_travel_path_gizmo)
            .add_systems(Update, (sync_gizmo_line_width, draw_travel_paths).chain());
    }
}

/// Initialize the travel path gizmo config (disabled by default)
fn init_travel_path_gizmo(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<TravelPathVisualizationConfig>,
) {
    let (config, _) = config_store.config_mut::<TravelPathGizmo>();
    config.enabled = false;
    config.line.width = viz_config.line_width;
}

/// Keeps the gizmo line width in step with the visualization config
fn sync_gizmo_line_width(
    mut config_store: ResMut<GizmoConfigStore>,
    viz_config: Res<TravelPathVisualizationConfig>,
) {
    if !viz_config.is_changed() {
        return;
    }
    let (config, _) = config_store.config_mut::<TravelPathGizmo>();
    config.line.width = viz_config.line_width;
}

/// Draws every traveler's path in world space.
/// Waypoints live in the parent's space, so they are mapped through the parent's
/// `GlobalTransform` when there is one.
fn draw_travel_paths(
    mut gizmos: Gizmos<TravelPathGizmo>,
    config_store: Res<GizmoConfigStore>,
    viz_config: Res<TravelPathVisualizationConfig>,
    travelers: Query<(&PathTraveler, Option<&ChildOf>)>,
    global_transform_query: Query<&GlobalTransform>,
) {
    let (config, _) = config_store.config::<TravelPathGizmo>();
    if !config.enabled {
        return;
    }

    for (traveler, child_of) in &travelers {
        let parent_transform = child_of
            .and_then(|child_of| global_transform_query.get(child_of.parent()).ok())
            .copied()
            .unwrap_or_default();

        let traversal = traveler.traversal();
        let active_index = traversal.is_valid().then_some(traversal.segment_index());

        for (index, segment) in traversal.effective_segments().enumerate() {
            let color = segment_color(index, active_index, traversal.is_valid(), &viz_config);
            draw_segment(
                &mut gizmos,
                &segment,
                &parent_transform,
                color,
                active_index == Some(index),
            );
        }
    }
}

/// Picks the color for a segment based on traversal state
fn segment_color(
    index: usize,
    active_index: Option<usize>,
    valid: bool,
    config: &TravelPathVisualizationConfig,
) -> Color {
    if !valid {
        config.idle_color
    } else if active_index == Some(index) {
        config.current_segment_color
    } else {
        config.path_color
    }
}

/// Draws one segment, as an arrow when it is the one being traversed
fn draw_segment(
    gizmos: &mut Gizmos<TravelPathGizmo>,
    segment: &SegmentView,
    parent_transform: &GlobalTransform,
    color: Color,
    current: bool,
) {
    let from = parent_transform.transform_point(segment.from);
    let to = parent_transform.transform_point(segment.to);

    if current {
        gizmos.arrow(from, to, color);
    } else {
        gizmos.line(from, to, color);
    }
}
