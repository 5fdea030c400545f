//! Orientation policy applied whenever the active segment changes.

use bevy::prelude::*;

/// How the host's visual orientation responds to travel direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum FacingMode {
    /// Rotation and scale are never touched.
    #[default]
    KeepOriginal,
    /// Flips the sign of the horizontal scale to face the horizontal travel direction.
    LeftOrRight,
    /// Rotates about the depth axis so local +X points along the segment.
    ForwardAlways,
}

/// Adjustment to apply to the host for a new segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Unchanged,
    Scale(Vec3),
    Rotation(Quat),
}

impl FacingMode {
    /// Computes the orientation for a segment running `from` -> `to`.
    pub fn orient(self, from: Vec3, to: Vec3, current_scale: Vec3) -> Orientation {
        match self {
            Self::KeepOriginal => Orientation::Unchanged,
            Self::LeftOrRight => {
                let sign = if to.x - from.x > 0.0 { 1.0 } else { -1.0 };
                Orientation::Scale(Vec3::new(
                    current_scale.x.abs() * sign,
                    current_scale.y,
                    current_scale.z,
                ))
            },
            Self::ForwardAlways => {
                let travel = to - from;
                // signed angle from +X, ignoring depth
                let angle = travel.y.atan2(travel.x);
                Orientation::Rotation(Quat::from_rotation_z(angle))
            },
        }
    }
}

/// Write side of the host object the traversal drives.
pub trait PositionOrientationSink {
    fn set_position(&mut self, position: Vec3);

    fn scale(&self) -> Vec3;

    fn set_scale(&mut self, scale: Vec3);

    fn set_rotation(&mut self, rotation: Quat);

    /// Applies `facing` for the segment `from` -> `to`.
    fn apply_facing(&mut self, facing: FacingMode, from: Vec3, to: Vec3) {
        match facing.orient(from, to, self.scale()) {
            Orientation::Unchanged => {},
            Orientation::Scale(scale) => self.set_scale(scale),
            Orientation::Rotation(rotation) => self.set_rotation(rotation),
        }
    }
}

impl PositionOrientationSink for Transform {
    fn set_position(&mut self, position: Vec3) { self.translation = position; }

    fn scale(&self) -> Vec3 { self.scale }

    fn set_scale(&mut self, scale: Vec3) { self.scale = scale; }

    fn set_rotation(&mut self, rotation: Quat) { self.rotation = rotation; }
}
