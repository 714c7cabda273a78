//! Static per-exercise data: required landmarks, skeleton edges to draw, and
//! default counter thresholds.

use crate::config::CounterConfig;
use crate::landmarks::LandmarkId::{
    self, LeftAnkle, LeftEar, LeftElbow, LeftHip, LeftKnee, LeftShoulder, LeftWrist, RightAnkle, RightEar,
    RightElbow, RightHip, RightKnee, RightShoulder, RightWrist,
};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Exercises with a dedicated counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    LateralRaise,
    SingleSquat,
}

/// Declarative description of one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseConfig {
    /// Stable identifier, as accepted by `Exercise::from_str`
    pub id: &'static str,
    /// Human readable name
    pub display_name: &'static str,
    /// Landmarks the counter needs in every frame
    pub required_landmarks: &'static [LandmarkId],
    /// Bones to draw for this exercise's skeleton overlay
    pub skeleton_edges: &'static [(LandmarkId, LandmarkId)],
    /// Default counter thresholds
    pub default_counter: CounterConfig,
    /// Whether a form analyzer exists for this exercise
    pub has_form_analysis: bool,
}

const LATERAL_RAISE_LANDMARKS: &[LandmarkId] =
    &[LeftShoulder, RightShoulder, LeftElbow, RightElbow, LeftHip, RightHip];

const LATERAL_RAISE_EDGES: &[(LandmarkId, LandmarkId)] = &[
    (LeftShoulder, RightShoulder),
    (LeftShoulder, LeftElbow),
    (LeftElbow, LeftWrist),
    (RightShoulder, RightElbow),
    (RightElbow, RightWrist),
    (LeftShoulder, LeftHip),
    (RightShoulder, RightHip),
    (LeftHip, RightHip),
];

const SINGLE_SQUAT_LANDMARKS: &[LandmarkId] = &[LeftHip, RightHip, LeftKnee, RightKnee, LeftAnkle, RightAnkle];

const SINGLE_SQUAT_EDGES: &[(LandmarkId, LandmarkId)] = &[
    (LeftShoulder, RightShoulder),
    (LeftShoulder, LeftHip),
    (RightShoulder, RightHip),
    (LeftHip, RightHip),
    (LeftHip, LeftKnee),
    (LeftKnee, LeftAnkle),
    (RightHip, RightKnee),
    (RightKnee, RightAnkle),
];

/// Landmarks the lateral raise form analyzer needs in every frame
pub const LATERAL_RAISE_FORM_LANDMARKS: &[LandmarkId] = &[
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftEar,
    RightEar,
];

static LATERAL_RAISE: ExerciseConfig = ExerciseConfig {
    id: "lateral-raise",
    display_name: "Lateral Raise",
    required_landmarks: LATERAL_RAISE_LANDMARKS,
    skeleton_edges: LATERAL_RAISE_EDGES,
    default_counter: CounterConfig::lateral_raise(),
    has_form_analysis: true,
};

static SINGLE_SQUAT: ExerciseConfig = ExerciseConfig {
    id: "single-squat",
    display_name: "Single Squat",
    required_landmarks: SINGLE_SQUAT_LANDMARKS,
    skeleton_edges: SINGLE_SQUAT_EDGES,
    default_counter: CounterConfig::single_squat(),
    has_form_analysis: false,
};

impl Exercise {
    pub const ALL: [Self; 2] = [Self::LateralRaise, Self::SingleSquat];

    /// Registry entry for this exercise
    #[must_use]
    pub fn config(self) -> &'static ExerciseConfig {
        match self {
            Self::LateralRaise => &LATERAL_RAISE,
            Self::SingleSquat => &SINGLE_SQUAT,
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().display_name)
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.config().id == normalized)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}
