//! Exercise repetition counting and form analysis from body pose landmarks.
//!
//! The library consumes a stream of pose frames (33 normalized body
//! landmarks with a timestamp) produced by an external pose detector and
//! turns it into:
//! - repetition events from a per-exercise counter (lateral raise, single squat)
//! - per-frame form feedback for the lateral raise
//!
//! The processing pipeline per frame is:
//! 1. Joint angles are computed from landmark triples
//! 2. The drive angle is smoothed with an exponential filter
//! 3. A five-phase cycle with hysteresis and timing checks counts repetitions
//! 4. Optionally, a form analyzer checks elbows, trunk and shoulders
//!
//! # Examples
//!
//! ## Counting Repetitions
//!
//! ```no_run
//! use fitness_counter::{
//!     config::CounterConfig,
//!     counters::{ExerciseCounter, LateralRaiseCounter, RepEvent},
//!     recording::PoseRecording,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recording = PoseRecording::from_file("lateral_raise.yaml")?;
//! let mut counter = LateralRaiseCounter::new(CounterConfig::lateral_raise())?;
//!
//! for frame in recording.pose_frames()? {
//!     if let Some(RepEvent::RepCompleted { total_reps, peak_angle, .. }) = counter.process_pose(&frame) {
//!         println!("Rep {total_reps}: peak {peak_angle:.1} deg");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking Form
//!
//! ```no_run
//! use fitness_counter::{config::FormConfig, form::LateralRaiseFormAnalyzer, landmarks::PoseFrame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let frames: Vec<PoseFrame> = Vec::new();
//! let mut analyzer = LateralRaiseFormAnalyzer::new(FormConfig::default())?;
//! for frame in &frames {
//!     let feedback = analyzer.analyze(frame);
//!     for issue in &feedback.issues {
//!         println!("{}: {}", issue.code, issue.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Replay host driving a counter and form analyzer over recorded frames
pub mod app;

/// Configuration management
pub mod config;

/// Default thresholds and timing constants
pub mod constants;

/// Repetition counters and the shared cycle engine
pub mod counters;

/// Error types
pub mod error;

/// Exercise registry
pub mod exercises;

/// Signal filtering for smoothing joint angles
pub mod filters;

/// Form analysis
pub mod form;

/// Angle and distance helpers on landmark points
pub mod geometry;

/// Body landmark model and pose frames
pub mod landmarks;

/// Pose recordings stored on disk
pub mod recording;

pub use error::{Error, Result};
