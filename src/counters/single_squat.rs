use super::cycle::{CyclePhase, Polarity, RepCycle};
use super::{drive_cycle, CounterState, ExerciseCounter, ExercisePhase, RepEvent};
use crate::config::CounterConfig;
use crate::exercises::Exercise;
use crate::filters::{ExponentialSmoother, SignalFilter};
use crate::geometry::{joint_angle, JointTriple};
use crate::landmarks::{LandmarkId, PoseFrame};
use crate::Result;
use log::{info, trace};

/// Phases of a single squat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquatPhase {
    Waiting,
    Standing,
    Descending,
    Bottom,
    Ascending,
}

impl ExercisePhase for SquatPhase {
    fn from_cycle(phase: CyclePhase) -> Self {
        match phase {
            CyclePhase::Waiting => Self::Waiting,
            CyclePhase::Ready => Self::Standing,
            CyclePhase::Moving => Self::Descending,
            CyclePhase::Extreme => Self::Bottom,
            CyclePhase::Returning => Self::Ascending,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Standing => "standing",
            Self::Descending => "descending",
            Self::Bottom => "bottom",
            Self::Ascending => "ascending",
        }
    }
}

/// Counts single-leg squats from the knee angle.
///
/// Rest is the straight-leg end. Both knees are smoothed independently and the
/// more bent one drives the cycle, since that is the working leg.
pub struct SingleSquatCounter {
    cycle: RepCycle,
    left: ExponentialSmoother,
    right: ExponentialSmoother,
    state: CounterState<SquatPhase>,
}

impl SingleSquatCounter {
    /// Create a counter with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: CounterConfig) -> Result<Self> {
        let cycle = RepCycle::new(&config, Polarity::Falling)?;
        info!(
            "Single squat counter: standing above {:.1} deg, bottom below {:.1} deg",
            config.top_threshold, config.bottom_threshold
        );
        Ok(Self {
            cycle,
            left: ExponentialSmoother::new(config.smoothing_factor)?,
            right: ExponentialSmoother::new(config.smoothing_factor)?,
            state: CounterState::initial(),
        })
    }
}

impl ExerciseCounter for SingleSquatCounter {
    type Phase = SquatPhase;

    fn required_landmarks(&self) -> &'static [LandmarkId] {
        Exercise::SingleSquat.config().required_landmarks
    }

    fn process_pose(&mut self, frame: &PoseFrame) -> Option<RepEvent> {
        if !frame.has_landmarks(self.required_landmarks()) {
            trace!("Skipping frame at {:?}: missing leg landmarks", frame.timestamp);
            return None;
        }

        let left_raw = joint_angle(frame, JointTriple::LEFT_KNEE)?;
        let right_raw = joint_angle(frame, JointTriple::RIGHT_KNEE)?;
        let smoothed = self.left.apply(left_raw).min(self.right.apply(right_raw));

        drive_cycle(
            &mut self.cycle,
            &mut self.state,
            left_raw.min(right_raw),
            smoothed,
            frame.timestamp,
        )
    }

    fn state(&self) -> &CounterState<SquatPhase> {
        &self.state
    }

    fn reset(&mut self) {
        self.cycle.reset();
        self.left.reset();
        self.right.reset();
        self.state = CounterState::initial();
    }
}
