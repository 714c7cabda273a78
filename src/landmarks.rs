//! Body landmark model shared by every analysis stage.
//!
//! A [`PoseFrame`] is one timestamped snapshot of the landmarks the upstream
//! detector reported. Absent keys mean the point was not detected at all; a
//! present landmark may still be unusable if its confidence is too low, which
//! is what [`Landmark::is_visible`] answers.

use crate::constants::VISIBILITY_THRESHOLD;
use crate::{Error, Result};
use nalgebra::Point2;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The 33 points of the standard body pose model.
///
/// Declaration order matches the detector's landmark index order, see
/// [`LandmarkId::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkId {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkId {
    /// Every landmark in detector index order
    pub const ALL: [Self; 33] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Map a detector landmark index onto the canonical identifier.
    ///
    /// Indices outside the 33-point model have no mapping.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this landmark in detector index order
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// camelCase name as written in pose recordings
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "leftEyeInner",
            Self::LeftEye => "leftEye",
            Self::LeftEyeOuter => "leftEyeOuter",
            Self::RightEyeInner => "rightEyeInner",
            Self::RightEye => "rightEye",
            Self::RightEyeOuter => "rightEyeOuter",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::MouthLeft => "mouthLeft",
            Self::MouthRight => "mouthRight",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftPinky => "leftPinky",
            Self::RightPinky => "rightPinky",
            Self::LeftIndex => "leftIndex",
            Self::RightIndex => "rightIndex",
            Self::LeftThumb => "leftThumb",
            Self::RightThumb => "rightThumb",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
            Self::LeftHeel => "leftHeel",
            Self::RightHeel => "rightHeel",
            Self::LeftFootIndex => "leftFootIndex",
            Self::RightFootIndex => "rightFootIndex",
        }
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LandmarkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| Error::UnknownLandmark(s.to_string()))
    }
}

/// A single detected body point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Horizontal position, normalized to image width (0.0-1.0)
    pub x: f64,
    /// Vertical position, normalized to image height (0.0-1.0, grows downward)
    pub y: f64,
    /// Relative depth, unitless
    pub z: f64,
    /// Detector confidence (0.0-1.0)
    pub confidence: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, confidence: f64) -> Self {
        Self { x, y, z, confidence }
    }

    /// Whether the detector is confident enough for this point to be used
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.confidence > VISIBILITY_THRESHOLD
    }

    /// Image-plane position, depth dropped
    #[must_use]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// One timestamped snapshot of detected landmarks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    /// Offset of this sample from the start of the stream
    pub timestamp: Duration,
    landmarks: HashMap<LandmarkId, Landmark>,
}

impl PoseFrame {
    /// Create an empty frame at the given stream offset
    #[must_use]
    pub fn new(timestamp: Duration) -> Self {
        Self {
            timestamp,
            landmarks: HashMap::with_capacity(crate::constants::NUM_BODY_LANDMARKS),
        }
    }

    /// Builder-style insertion, replaces any landmark already stored for `id`
    #[must_use]
    pub fn with_landmark(mut self, id: LandmarkId, landmark: Landmark) -> Self {
        self.insert(id, landmark);
        self
    }

    /// Store a landmark, returning the one it replaced
    pub fn insert(&mut self, id: LandmarkId, landmark: Landmark) -> Option<Landmark> {
        self.landmarks.insert(id, landmark)
    }

    /// Landmark for `id` if detected, regardless of confidence
    #[must_use]
    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    /// Landmark for `id` only if detected and visible
    #[must_use]
    pub fn visible(&self, id: LandmarkId) -> Option<&Landmark> {
        self.get(id).filter(|lm| lm.is_visible())
    }

    /// True when every id in `required` is present and visible
    #[must_use]
    pub fn has_landmarks(&self, required: &[LandmarkId]) -> bool {
        required.iter().all(|&id| self.visible(id).is_some())
    }

    /// Number of detected landmarks
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Iterate over detected landmarks in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkId, &Landmark)> {
        self.landmarks.iter().map(|(&id, lm)| (id, lm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_threshold_is_exclusive() {
        assert!(!Landmark::new(0.5, 0.5, 0.0, 0.5).is_visible());
        assert!(Landmark::new(0.5, 0.5, 0.0, 0.51).is_visible());
    }

    #[test]
    fn test_index_mapping() {
        assert_eq!(LandmarkId::from_index(0), Some(LandmarkId::Nose));
        assert_eq!(LandmarkId::from_index(11), Some(LandmarkId::LeftShoulder));
        assert_eq!(LandmarkId::from_index(32), Some(LandmarkId::RightFootIndex));
        assert_eq!(LandmarkId::from_index(33), None);

        for (i, id) in LandmarkId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for id in LandmarkId::ALL {
            assert_eq!(id.name().parse::<LandmarkId>().unwrap(), id);
        }
        assert!("leftTail".parse::<LandmarkId>().is_err());
    }

    #[test]
    fn test_has_landmarks_distinguishes_absent_and_hidden() {
        let frame = PoseFrame::new(Duration::ZERO)
            .with_landmark(LandmarkId::LeftShoulder, Landmark::new(0.4, 0.3, 0.0, 0.9))
            .with_landmark(LandmarkId::LeftElbow, Landmark::new(0.4, 0.5, 0.0, 0.2));

        assert!(frame.has_landmarks(&[LandmarkId::LeftShoulder]));
        assert!(!frame.has_landmarks(&[LandmarkId::LeftShoulder, LandmarkId::LeftElbow]));
        assert!(!frame.has_landmarks(&[LandmarkId::LeftWrist]));
        assert!(frame.get(LandmarkId::LeftElbow).is_some());
        assert!(frame.visible(LandmarkId::LeftElbow).is_none());
        assert!(frame.has_landmarks(&[]));
    }

    #[test]
    fn test_insert_replaces() {
        let mut frame = PoseFrame::new(Duration::from_millis(33));
        assert!(frame.insert(LandmarkId::Nose, Landmark::new(0.1, 0.1, 0.0, 1.0)).is_none());
        let previous = frame.insert(LandmarkId::Nose, Landmark::new(0.2, 0.2, 0.0, 1.0));
        assert_eq!(previous.map(|lm| lm.x), Some(0.1));
        assert_eq!(frame.len(), 1);
    }
}
