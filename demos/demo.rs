//! Demonstrates sprites following authored paths using `bevy_path_traveler`.
//!
//! - Each row shows a different facing / loop combination
//! - Press 'R' to restart every traveler
//! - Press 'Space' to pause or resume every traveler
//! - Press 'D' to toggle debug visualization of the paths

use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_path_traveler::prelude::*;

const SPRITE_SIZE: f32 = 32.0;
const ROW_SPACING: f32 = 180.0;
const PATH_WIDTH: f32 = 500.0;
const PATH_HEIGHT: f32 = 80.0;
const EVENT_LOG_FONT_SIZE: f32 = 14.0;
const EVENT_LOG_LINES: usize = 12;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PathTravelerPlugin,
            TravelPathVisualizationPlugin,
            BrpExtrasPlugin::default(),
        ))
        .init_resource::<EventLog>()
        .init_resource::<Paused>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                restart_on_key,
                pause_on_key,
                toggle_debug_visualization,
                update_event_log_text,
            ),
        )
        .add_observer(log_segment_complete)
        .add_observer(log_loop_complete)
        .add_observer(log_travel_complete)
        .run();
}

#[derive(Resource, Default)]
struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    fn push(&mut self, line: String) {
        self.lines.push(line);
        if self.lines.len() > EVENT_LOG_LINES {
            self.lines.remove(0);
        }
    }
}

#[derive(Resource, Default)]
struct Paused(bool);

#[derive(Component)]
struct EventLogText;

#[derive(Component)]
struct RowLabel(&'static str);

/// Zig-zag waypoints for one row, centered on `y`
fn zig_zag(y: f32) -> Vec<Vec3> {
    let half_width = PATH_WIDTH * 0.5;
    (0..=4)
        .map(|i| {
            let x = (PATH_WIDTH / 4.0).mul_add(i as f32, -half_width);
            let dy = PATH_HEIGHT * 0.5 * if i % 2 == 0 { -1.0 } else { 1.0 };
            Vec3::new(x, y + dy, 0.0)
        })
        .collect()
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    let rows = [
        (
            "forward, ping-pong, forever",
            Color::srgb(0.9, 0.4, 0.2),
            FacingMode::ForwardAlways,
            LoopMode::PingPong,
            -1,
        ),
        (
            "left/right, ping-pong, 3 loops",
            Color::srgb(0.2, 0.8, 0.4),
            FacingMode::LeftOrRight,
            LoopMode::PingPong,
            3,
        ),
        (
            "keep, restart, 2 loops",
            Color::srgb(0.3, 0.5, 0.95),
            FacingMode::KeepOriginal,
            LoopMode::Restart,
            2,
        ),
    ];

    for (row, (label, color, facing, loop_mode, loops)) in rows.into_iter().enumerate() {
        let y = ROW_SPACING * (1.0 - row as f32);
        let config = TravelerConfig::new(zig_zag(y), 4.0)
            .with_facing(facing)
            .with_loop_mode(loop_mode)
            .with_loops(loops);

        commands.spawn((
            Name::new(label),
            RowLabel(label),
            Sprite::from_color(color, Vec2::new(SPRITE_SIZE * 1.5, SPRITE_SIZE)),
            PathTraveler::new(config),
        ));
    }

    commands.spawn((
        EventLogText,
        Text::new(""),
        TextFont {
            font_size: EVENT_LOG_FONT_SIZE,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..default()
        },
    ));
}

fn restart_on_key(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    travelers: Query<Entity, With<PathTraveler>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    for entity in &travelers {
        commands.trigger(RestartTravel::new(entity));
    }
}

fn pause_on_key(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<Paused>,
    travelers: Query<Entity, With<PathTraveler>>,
) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }
    paused.0 = !paused.0;
    for entity in &travelers {
        commands.trigger(SetTravelerActive::new(entity, !paused.0));
    }
}

fn toggle_debug_visualization(
    keys: Res<ButtonInput<KeyCode>>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    if keys.just_pressed(KeyCode::KeyD) {
        let (config, _) = config_store.config_mut::<TravelPathGizmo>();
        config.enabled = !config.enabled;
    }
}

fn log_segment_complete(
    segment: On<SegmentComplete>,
    labels: Query<&RowLabel>,
    mut log: ResMut<EventLog>,
) {
    let Ok(label) = labels.get(segment.entity) else {
        return;
    };
    log.push(format!("{}: segment {} done", label.0, segment.index));
}

fn log_loop_complete(lap: On<LoopComplete>, labels: Query<&RowLabel>, mut log: ResMut<EventLog>) {
    let Ok(label) = labels.get(lap.entity) else {
        return;
    };
    log.push(format!("{}: loop {} done", label.0, lap.index));
}

fn log_travel_complete(
    complete: On<TravelComplete>,
    labels: Query<&RowLabel>,
    mut log: ResMut<EventLog>,
) {
    let Ok(label) = labels.get(complete.entity) else {
        return;
    };
    log.push(format!("{}: finished", label.0));
}

fn update_event_log_text(log: Res<EventLog>, mut text: Single<&mut Text, With<EventLogText>>) {
    if log.is_changed() {
        ***text = log.lines.join("\n");
    }
}
