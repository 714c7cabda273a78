//! Pose recordings: landmark streams extracted from exercise videos.
//!
//! The document layout mirrors what the pose extraction tooling writes: a
//! metadata block followed by one entry per frame that had a detected pose,
//! with landmarks keyed by their camelCase name. Both YAML and JSON documents
//! are accepted.

use crate::landmarks::{Landmark, LandmarkId, PoseFrame};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Information about the source video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMetadata {
    pub source_video: Option<String>,
    pub fps: Option<f64>,
    pub total_frames: Option<u64>,
    pub frames_with_pose: Option<u64>,
    pub duration_seconds: Option<f64>,
}

/// One landmark as stored in a recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedLandmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Detectors without per-point visibility report full confidence
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

/// One frame as stored in a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub frame_number: u64,
    pub timestamp_ms: u64,
    pub landmarks: BTreeMap<String, RecordedLandmark>,
}

/// A complete pose recording
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseRecording {
    #[serde(default)]
    pub metadata: RecordingMetadata,
    pub frames: Vec<RecordedFrame>,
}

impl RecordedFrame {
    /// Convert to a [`PoseFrame`]
    ///
    /// # Errors
    ///
    /// Returns an error if a landmark name is not part of the body model
    pub fn to_pose_frame(&self) -> Result<PoseFrame> {
        let mut frame = PoseFrame::new(Duration::from_millis(self.timestamp_ms));
        for (name, lm) in &self.landmarks {
            let id: LandmarkId = name.parse()?;
            frame.insert(id, Landmark::new(lm.x, lm.y, lm.z, lm.confidence));
        }
        Ok(frame)
    }

    /// Capture a [`PoseFrame`] for storage
    #[must_use]
    pub fn from_pose_frame(frame_number: u64, frame: &PoseFrame) -> Self {
        let landmarks = frame
            .iter()
            .map(|(id, lm)| {
                (
                    id.name().to_string(),
                    RecordedLandmark {
                        x: lm.x,
                        y: lm.y,
                        z: lm.z,
                        confidence: lm.confidence,
                    },
                )
            })
            .collect();
        Self {
            frame_number,
            timestamp_ms: u64::try_from(frame.timestamp.as_millis()).unwrap_or(u64::MAX),
            landmarks,
        }
    }
}

impl PoseRecording {
    /// Load a recording from a YAML or JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a recording from YAML or JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not describe a recording
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Recording(format!("Failed to parse recording: {e}")))
    }

    /// Save the recording as YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Recording(format!("Failed to serialize recording: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build a recording from frames, numbering them in order
    #[must_use]
    pub fn from_frames(metadata: RecordingMetadata, frames: &[PoseFrame]) -> Self {
        let frames = frames
            .iter()
            .zip(0u64..)
            .map(|(frame, number)| RecordedFrame::from_pose_frame(number, frame))
            .collect();
        Self { metadata, frames }
    }

    /// Convert every stored frame, in recording order
    ///
    /// # Errors
    ///
    /// Returns an error on the first frame with an unknown landmark name, or
    /// if timestamps go backwards
    pub fn pose_frames(&self) -> Result<Vec<PoseFrame>> {
        if let Some(pair) = self.frames.windows(2).find(|w| w[1].timestamp_ms < w[0].timestamp_ms) {
            return Err(Error::InvalidInput(format!(
                "Frame {} at {}ms precedes frame {} at {}ms",
                pair[1].frame_number, pair[1].timestamp_ms, pair[0].frame_number, pair[0].timestamp_ms
            )));
        }
        self.frames.iter().map(RecordedFrame::to_pose_frame).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
