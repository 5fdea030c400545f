//! Path traversal state machine.
//!
//! A `Traversal` advances a progress cursor along a `SegmentSequence` at a constant
//! speed. Each tick it writes the interpolated position to a sink, then walks any
//! segment and loop boundaries the advance crossed, reporting each one to a
//! `TravelObserver` in order.

use bevy::prelude::*;

use crate::config::TravelerConfig;
use crate::facing::FacingMode;
use crate::facing::PositionOrientationSink;
use crate::segments::PathPlan;
use crate::segments::SegmentSequence;
use crate::segments::SegmentView;

/// What happens when the traveler reaches the end of the path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum LoopMode {
    /// Retrace the path backwards on alternating loops.
    PingPong,
    /// Jump back to the first waypoint.
    #[default]
    Restart,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum TravelPhase {
    /// Never restarted, or the last restart found nothing to traverse.
    #[default]
    Idle,
    Traversing,
    /// Loop budget exhausted.
    Terminated,
}

/// Boundary notification emitted while ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelEvent {
    /// Logical index of the segment that just finished.
    SegmentCompleted { index: usize },
    /// Index of the loop that just finished.
    LoopCompleted { index: usize },
}

/// Reply from an observer after handling an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Directive {
    #[default]
    Continue,
    /// Ask for a restart. Deferred until the current tick has finished its
    /// boundary processing; see `TickOutcome::restart_requested`.
    Restart,
}

/// Receives boundary events synchronously, in the order they occur.
pub trait TravelObserver {
    fn on_event(&mut self, event: TravelEvent) -> Directive;
}

impl TravelObserver for () {
    fn on_event(&mut self, _event: TravelEvent) -> Directive { Directive::Continue }
}

impl TravelObserver for Vec<TravelEvent> {
    fn on_event(&mut self, event: TravelEvent) -> Directive {
        self.push(event);
        Directive::Continue
    }
}

/// Summary of a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Position written to the sink, if the traversal was running.
    pub position:           Option<Vec3>,
    pub segments_completed: usize,
    pub loops_completed:    usize,
    /// The loop budget ran out during this tick.
    pub terminated:         bool,
    /// An observer asked for a restart. The owner applies it once the tick returns.
    pub restart_requested:  bool,
}

/// Traversal state for one animated object.
#[derive(Clone, Debug, Default, PartialEq, Reflect)]
pub struct Traversal {
    segments:      SegmentSequence,
    speed:         f32,
    facing:        FacingMode,
    loop_mode:     LoopMode,
    loops:         i32,
    segment_index: usize,
    loop_index:    usize,
    progress:      f32,
    phase:         TravelPhase,
}

impl Traversal {
    /// Builds a traversal from `config` and starts it immediately.
    pub fn started(config: &TravelerConfig, sink: &mut impl PositionOrientationSink) -> Self {
        let mut traversal = Self::default();
        traversal.restart(config, sink);
        traversal
    }

    /// Rebuilds segments from `config` and resets every cursor.
    ///
    /// Applies the facing for the first segment when the path is usable. A path with
    /// no usable segments, or a loop budget of zero, leaves the traversal idle.
    /// A zero budget still applies the first segment's facing.
    pub fn restart(&mut self, config: &TravelerConfig, sink: &mut impl PositionOrientationSink) {
        let plan = PathPlan::build(&config.waypoints, config.duration);
        let valid = plan.is_valid();

        *self = Self {
            segments: plan.segments,
            speed: plan.speed,
            facing: config.facing,
            loop_mode: config.loop_mode,
            loops: config.loops,
            ..default()
        };

        if !valid {
            warn!(
                "Traversal: no usable segments in {} waypoints, staying idle",
                config.waypoints.len()
            );
            return;
        }

        self.apply_facing(sink);

        if config.loops == 0 {
            debug!("Traversal: loop budget is zero, staying idle");
            return;
        }

        self.phase = TravelPhase::Traversing;

        debug!(
            "Traversal: restarted with {} segments, length={:.3} speed={:.3}",
            self.segments.len(),
            self.segments.total_length(),
            self.speed
        );
    }

    /// Advances the traversal by `elapsed` seconds.
    ///
    /// Writes the position for the progress reached before this advance, then
    /// processes every boundary the advance crossed. Negative or non-finite
    /// `elapsed` counts as zero.
    pub fn tick(
        &mut self,
        elapsed: f32,
        sink: &mut impl PositionOrientationSink,
        observer: &mut impl TravelObserver,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.phase != TravelPhase::Traversing {
            return outcome;
        }
        let Some(segment) = self.current_segment() else {
            self.phase = TravelPhase::Terminated;
            return outcome;
        };

        let position = segment.point_at(self.progress);
        sink.set_position(position);
        outcome.position = Some(position);

        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        self.progress += self.speed * elapsed;

        // A long frame can cross several boundaries; each one is reported before the next.
        while self.phase == TravelPhase::Traversing {
            let Some(segment) = self.current_segment() else {
                break;
            };
            if self.progress <= segment.length {
                break;
            }
            self.complete_segment(segment, sink, observer, &mut outcome);
        }

        outcome
    }

    fn complete_segment(
        &mut self,
        segment: SegmentView,
        sink: &mut impl PositionOrientationSink,
        observer: &mut impl TravelObserver,
        outcome: &mut TickOutcome,
    ) {
        let index = self.segment_index;
        notify(observer, TravelEvent::SegmentCompleted { index }, outcome);
        outcome.segments_completed += 1;

        // carry the overshoot into the next segment
        self.progress -= segment.length;
        self.segment_index += 1;

        if self.segment_index < self.segments.len() {
            self.apply_facing(sink);
        } else {
            self.complete_loop(sink, observer, outcome);
        }
    }

    fn complete_loop(
        &mut self,
        sink: &mut impl PositionOrientationSink,
        observer: &mut impl TravelObserver,
        outcome: &mut TickOutcome,
    ) {
        let index = self.loop_index;
        notify(observer, TravelEvent::LoopCompleted { index }, outcome);
        outcome.loops_completed += 1;
        self.loop_index += 1;

        if self.has_loops_remaining() {
            if self.loop_mode == LoopMode::PingPong {
                self.segments.reverse();
            }
            self.segment_index = 0;
            self.progress = 0.0;
            self.apply_facing(sink);
            debug!(
                "Traversal: loop {index} complete, reversed={}",
                self.segments.is_reversed()
            );
        } else {
            self.phase = TravelPhase::Terminated;
            outcome.terminated = true;
            info!("Traversal: finished after {} loops", self.loop_index);
        }
    }

    fn has_loops_remaining(&self) -> bool {
        // negative budgets never run out
        usize::try_from(self.loops).map_or(true, |limit| self.loop_index < limit)
    }

    fn apply_facing(&self, sink: &mut impl PositionOrientationSink) {
        if let Some(segment) = self.current_segment() {
            sink.apply_facing(self.facing, segment.from, segment.to);
        }
    }

    pub const fn phase(&self) -> TravelPhase { self.phase }

    pub fn is_valid(&self) -> bool { self.phase == TravelPhase::Traversing }

    pub fn is_terminated(&self) -> bool { self.phase == TravelPhase::Terminated }

    pub const fn segment_index(&self) -> usize { self.segment_index }

    pub const fn loop_index(&self) -> usize { self.loop_index }

    /// Distance travelled along the current segment.
    pub const fn progress(&self) -> f32 { self.progress }

    pub const fn speed(&self) -> f32 { self.speed }

    pub const fn total_length(&self) -> f32 { self.segments.total_length() }

    /// True while a ping-pong traversal is running backwards.
    pub const fn is_reversed(&self) -> bool { self.segments.is_reversed() }

    pub fn current_segment(&self) -> Option<SegmentView> { self.segments.get(self.segment_index) }

    /// Interpolated position for the current progress, without writing anything.
    pub fn position(&self) -> Option<Vec3> {
        self.current_segment()
            .map(|segment| segment.point_at(self.progress.min(segment.length)))
    }

    /// Effective segments in travel order, for debug drawing.
    pub fn effective_segments(&self) -> impl Iterator<Item = SegmentView> + '_ { self.segments.iter() }
}

fn notify(observer: &mut impl TravelObserver, event: TravelEvent, outcome: &mut TickOutcome) {
    if observer.on_event(event) == Directive::Restart {
        outcome.restart_requested = true;
    }
}
