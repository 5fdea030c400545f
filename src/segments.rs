//! Straight-line segments derived from a waypoint list.
//!
//! A `SegmentSequence` owns its segments once and exposes them through a
//! reversible index view, so ping-pong looping can retrace the path without
//! reallocating or recomputing anything.

use bevy::prelude::*;

/// Smallest duration accepted when deriving traversal speed.
/// Non-positive durations are clamped to this value.
pub const MIN_DURATION_SECS: f32 = f32::MIN_POSITIVE;

/// One straight leg of the path, stored in authoring order.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
struct Segment {
    from:   Vec3,
    to:     Vec3,
    length: f32,
}

/// Effective view of a segment as seen through the sequence's current direction.
///
/// Views are copied out of the sequence, so holding one across a `reverse()`
/// never observes a change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentView {
    pub from:   Vec3,
    pub to:     Vec3,
    pub length: f32,
}

impl SegmentView {
    /// Linear interpolation at `distance` along the segment.
    pub fn point_at(&self, distance: f32) -> Vec3 { self.from.lerp(self.to, distance / self.length) }
}

/// Ordered segments plus a direction flag.
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct SegmentSequence {
    segments:     Vec<Segment>,
    total_length: f32,
    reversed:     bool,
}

impl SegmentSequence {
    /// Builds segments from consecutive waypoint pairs.
    /// Pairs with zero length are skipped.
    pub fn build(waypoints: &[Vec3]) -> Self {
        let mut segments = Vec::with_capacity(waypoints.len().saturating_sub(1));
        let mut total_length = 0.0;

        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let length = from.distance(to);
            if length == 0.0 {
                continue;
            }
            segments.push(Segment { from, to, length });
            total_length += length;
        }

        Self {
            segments,
            total_length,
            reversed: false,
        }
    }

    pub fn len(&self) -> usize { self.segments.len() }

    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    pub const fn total_length(&self) -> f32 { self.total_length }

    pub const fn is_reversed(&self) -> bool { self.reversed }

    /// Toggles the direction flag. No segment data moves.
    pub const fn reverse(&mut self) { self.reversed = !self.reversed; }

    /// Returns the segment at logical index `index` in the current direction.
    pub fn get(&self, index: usize) -> Option<SegmentView> {
        if self.reversed {
            let physical = self.segments.len().checked_sub(1)?.checked_sub(index)?;
            let segment = self.segments[physical];
            Some(SegmentView {
                from:   segment.to,
                to:     segment.from,
                length: segment.length,
            })
        } else {
            self.segments.get(index).map(|segment| SegmentView {
                from:   segment.from,
                to:     segment.to,
                length: segment.length,
            })
        }
    }

    /// Iterates the effective segments in logical order.
    pub fn iter(&self) -> impl Iterator<Item = SegmentView> + '_ {
        (0..self.segments.len()).filter_map(|index| self.get(index))
    }
}

/// Result of preparing a path for traversal.
#[derive(Clone, Debug, Default)]
pub struct PathPlan {
    pub segments: SegmentSequence,
    pub speed:    f32,
    pub duration: f32,
}

impl PathPlan {
    /// Builds segments and derives a constant speed of `total_length / duration`.
    /// The speed saturates at `f32::MAX` so it stays finite for clamped durations.
    pub fn build(waypoints: &[Vec3], duration: f32) -> Self {
        let duration = clamp_duration(duration);
        let segments = SegmentSequence::build(waypoints);
        let speed = if segments.is_empty() {
            0.0
        } else {
            (segments.total_length() / duration).min(f32::MAX)
        };

        Self {
            segments,
            speed,
            duration,
        }
    }

    /// A plan is usable only when at least one segment survived construction.
    pub fn is_valid(&self) -> bool { !self.segments.is_empty() }
}

/// Clamps non-positive `duration` to `MIN_DURATION_SECS`. `NaN` clamps as well.
/// Positive durations pass through unchanged.
pub fn clamp_duration(duration: f32) -> f32 {
    if duration > 0.0 {
        duration
    } else {
        MIN_DURATION_SECS
    }
}
