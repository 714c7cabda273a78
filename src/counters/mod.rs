//! Repetition counters.
//!
//! Each exercise wraps the shared [`cycle::RepCycle`] with its own drive
//! signal, polarity and phase names. Counters consume one [`PoseFrame`] at a
//! time and emit at most one [`RepEvent`] per frame.

/// Five-phase cycle engine shared by every counter
pub mod cycle;

/// Lateral raise counter (shoulder abduction)
pub mod lateral_raise;

/// Single squat counter (knee angle)
pub mod single_squat;

pub use lateral_raise::{LateralRaiseCounter, LateralRaisePhase};
pub use single_squat::{SingleSquatCounter, SquatPhase};

use crate::landmarks::{LandmarkId, PoseFrame};
use cycle::{CycleEvent, CyclePhase, RepCycle};
use std::fmt::Debug;
use std::time::Duration;

/// Exercise-specific naming of the generic cycle phases
pub trait ExercisePhase: Copy + Eq + Debug + Send + Sync {
    /// Map a generic cycle phase onto this exercise's phase
    fn from_cycle(phase: CyclePhase) -> Self;

    /// Lowercase name reported in [`RepEvent::PhaseChanged`]
    fn name(self) -> &'static str;
}

/// Observable counter state
#[derive(Debug, Clone, PartialEq)]
pub struct CounterState<P> {
    /// Completed repetitions since creation or the last reset
    pub rep_count: u32,
    /// Current phase
    pub phase: P,
    /// Latest raw drive angle (degrees)
    pub current_angle: f64,
    /// Latest smoothed drive angle (degrees)
    pub smoothed_angle: f64,
}

impl<P: ExercisePhase> CounterState<P> {
    fn initial() -> Self {
        Self {
            rep_count: 0,
            phase: P::from_cycle(CyclePhase::Waiting),
            current_angle: 0.0,
            smoothed_angle: 0.0,
        }
    }
}

/// Event emitted by a counter for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum RepEvent {
    /// The user settled into the start position for the first time
    ExerciseStarted,
    /// A repetition passed all checks and was counted
    RepCompleted {
        total_reps: u32,
        rep_duration: Duration,
        peak_angle: f64,
    },
    /// The counter moved to another phase
    PhaseChanged {
        phase_name: &'static str,
        current_angle: f64,
    },
}

/// Common contract of every exercise counter
pub trait ExerciseCounter: Send {
    /// Phase enumeration of this exercise
    type Phase: ExercisePhase;

    /// Landmarks that must be present and visible for a frame to be used
    fn required_landmarks(&self) -> &'static [LandmarkId];

    /// Process one frame; frames missing required landmarks are ignored
    fn process_pose(&mut self, frame: &PoseFrame) -> Option<RepEvent>;

    /// Current state snapshot
    fn state(&self) -> &CounterState<Self::Phase>;

    /// Clear smoothers, timers, phase and repetition count
    fn reset(&mut self);
}

/// Record the angles for this frame, advance the cycle and translate its event.
fn drive_cycle<P: ExercisePhase>(
    cycle: &mut RepCycle,
    state: &mut CounterState<P>,
    current_angle: f64,
    smoothed_angle: f64,
    now: Duration,
) -> Option<RepEvent> {
    state.current_angle = current_angle;
    state.smoothed_angle = smoothed_angle;

    let event = cycle.advance(smoothed_angle, now);
    state.phase = P::from_cycle(cycle.phase());
    state.rep_count = cycle.rep_count();

    event.map(|event| match event {
        CycleEvent::Started => RepEvent::ExerciseStarted,
        CycleEvent::PhaseChanged(phase) => RepEvent::PhaseChanged {
            phase_name: P::from_cycle(phase).name(),
            current_angle,
        },
        CycleEvent::RepCompleted {
            total_reps,
            rep_duration,
            peak_angle,
        } => RepEvent::RepCompleted {
            total_reps,
            rep_duration,
            peak_angle,
        },
    })
}
