use super::cycle::{CyclePhase, Polarity, RepCycle};
use super::{drive_cycle, CounterState, ExerciseCounter, ExercisePhase, RepEvent};
use crate::config::CounterConfig;
use crate::exercises::Exercise;
use crate::filters::{ExponentialSmoother, SignalFilter};
use crate::geometry::{bilateral_angle, joint_angle, JointTriple};
use crate::landmarks::{LandmarkId, PoseFrame};
use crate::Result;
use log::{info, trace};

/// Phases of a lateral raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LateralRaisePhase {
    Waiting,
    Down,
    Rising,
    Up,
    Falling,
}

impl ExercisePhase for LateralRaisePhase {
    fn from_cycle(phase: CyclePhase) -> Self {
        match phase {
            CyclePhase::Waiting => Self::Waiting,
            CyclePhase::Ready => Self::Down,
            CyclePhase::Moving => Self::Rising,
            CyclePhase::Extreme => Self::Up,
            CyclePhase::Returning => Self::Falling,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Down => "down",
            Self::Rising => "rising",
            Self::Up => "up",
            Self::Falling => "falling",
        }
    }
}

/// Counts lateral raises from the shoulder abduction angle.
///
/// The abduction angle is measured at each shoulder between the torso
/// (shoulder to hip) and the upper arm (shoulder to elbow). Each arm is
/// smoothed on its own and the two smoothed values are averaged.
pub struct LateralRaiseCounter {
    cycle: RepCycle,
    left: ExponentialSmoother,
    right: ExponentialSmoother,
    state: CounterState<LateralRaisePhase>,
}

impl LateralRaiseCounter {
    /// Create a counter with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: CounterConfig) -> Result<Self> {
        let cycle = RepCycle::new(&config, Polarity::Rising)?;
        info!(
            "Lateral raise counter: down below {:.1} deg, up above {:.1} deg",
            config.bottom_threshold, config.top_threshold
        );
        Ok(Self {
            cycle,
            left: ExponentialSmoother::new(config.smoothing_factor)?,
            right: ExponentialSmoother::new(config.smoothing_factor)?,
            state: CounterState::initial(),
        })
    }
}

impl ExerciseCounter for LateralRaiseCounter {
    type Phase = LateralRaisePhase;

    fn required_landmarks(&self) -> &'static [LandmarkId] {
        Exercise::LateralRaise.config().required_landmarks
    }

    fn process_pose(&mut self, frame: &PoseFrame) -> Option<RepEvent> {
        if !frame.has_landmarks(self.required_landmarks()) {
            trace!("Skipping frame at {:?}: missing arm landmarks", frame.timestamp);
            return None;
        }

        let left_raw = joint_angle(frame, JointTriple::LEFT_SHOULDER_ABDUCTION)?;
        let right_raw = joint_angle(frame, JointTriple::RIGHT_SHOULDER_ABDUCTION)?;
        let current = bilateral_angle(
            frame,
            JointTriple::LEFT_SHOULDER_ABDUCTION,
            JointTriple::RIGHT_SHOULDER_ABDUCTION,
        );
        let smoothed = (self.left.apply(left_raw) + self.right.apply(right_raw)) / 2.0;

        drive_cycle(&mut self.cycle, &mut self.state, current, smoothed, frame.timestamp)
    }

    fn state(&self) -> &CounterState<LateralRaisePhase> {
        &self.state
    }

    fn reset(&mut self) {
        self.cycle.reset();
        self.left.reset();
        self.right.reset();
        self.state = CounterState::initial();
    }
}
