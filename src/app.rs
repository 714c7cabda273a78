//! Replay host: drives one counter and an optional form analyzer over a
//! sequence of frames and collects what happened.

use crate::counters::{ExerciseCounter, RepEvent};
use crate::exercises::Exercise;
use crate::form::{FormFeedback, FormStatus, IssueCode, LateralRaiseFormAnalyzer};
use crate::landmarks::PoseFrame;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything produced for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub event: Option<RepEvent>,
    pub feedback: Option<FormFeedback>,
}

/// One counted repetition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepRecord {
    pub rep: u32,
    pub duration_ms: u64,
    pub peak_angle: f64,
}

/// Totals for a replayed session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub exercise: &'static str,
    pub frames_processed: usize,
    /// Frames the counter ignored for missing landmarks
    pub frames_skipped: usize,
    pub rep_count: u32,
    pub reps: Vec<RepRecord>,
    /// Worst form status seen, `None` when form analysis was off
    pub worst_form: Option<FormStatus>,
    /// Number of frames on which each issue was reported
    pub issue_frames: BTreeMap<IssueCode, usize>,
}

/// Feeds frames to a counter and an optional form analyzer in delivery order
pub struct ReplaySession<C: ExerciseCounter> {
    counter: C,
    analyzer: Option<LateralRaiseFormAnalyzer>,
    summary: ReplaySummary,
}

impl<C: ExerciseCounter> ReplaySession<C> {
    #[must_use]
    pub fn new(exercise: Exercise, counter: C, analyzer: Option<LateralRaiseFormAnalyzer>) -> Self {
        info!(
            "Starting {} session{}",
            exercise,
            if analyzer.is_some() { " with form analysis" } else { "" }
        );
        Self {
            counter,
            summary: ReplaySummary {
                exercise: exercise.config().id,
                frames_processed: 0,
                frames_skipped: 0,
                rep_count: 0,
                reps: Vec::new(),
                worst_form: analyzer.as_ref().map(|_| FormStatus::Good),
                issue_frames: BTreeMap::new(),
            },
            analyzer,
        }
    }

    /// Process one frame through the counter and the analyzer
    pub fn process(&mut self, frame: &PoseFrame) -> FrameOutcome {
        self.summary.frames_processed += 1;
        if !frame.has_landmarks(self.counter.required_landmarks()) {
            self.summary.frames_skipped += 1;
        }

        let event = self.counter.process_pose(frame);
        match &event {
            Some(RepEvent::ExerciseStarted) => info!("Exercise started at {:?}", frame.timestamp),
            Some(RepEvent::RepCompleted {
                total_reps,
                rep_duration,
                peak_angle,
            }) => {
                info!("Rep {total_reps} completed in {rep_duration:?}, peak {peak_angle:.1} deg");
                self.summary.reps.push(RepRecord {
                    rep: *total_reps,
                    duration_ms: u64::try_from(rep_duration.as_millis()).unwrap_or(u64::MAX),
                    peak_angle: *peak_angle,
                });
            }
            Some(RepEvent::PhaseChanged {
                phase_name,
                current_angle,
            }) => debug!("Phase {phase_name} at {current_angle:.1} deg"),
            None => {}
        }
        self.summary.rep_count = self.counter.state().rep_count;

        let feedback = self.analyzer.as_mut().map(|analyzer| analyzer.analyze(frame));
        if let Some(feedback) = &feedback {
            self.summary.worst_form = self.summary.worst_form.max(Some(feedback.status));
            for issue in &feedback.issues {
                *self.summary.issue_frames.entry(issue.code).or_insert(0) += 1;
            }
        }

        FrameOutcome { event, feedback }
    }

    /// Process a whole sequence, returning the final summary
    pub fn run<'a, I>(mut self, frames: I) -> ReplaySummary
    where
        I: IntoIterator<Item = &'a PoseFrame>,
    {
        for frame in frames {
            self.process(frame);
        }
        self.finish()
    }

    #[must_use]
    pub fn finish(self) -> ReplaySummary {
        info!(
            "Session finished: {} reps over {} frames ({} skipped)",
            self.summary.rep_count, self.summary.frames_processed, self.summary.frames_skipped
        );
        self.summary
    }
}
