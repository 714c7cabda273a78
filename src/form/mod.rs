//! Per-frame form analysis.
//!
//! Analyzers run alongside a counter on the same frames but never look at its
//! output. Each frame yields a [`FormFeedback`] whose status is the most severe
//! of its issues.

/// Lateral raise form rules
pub mod lateral_raise;

pub use lateral_raise::LateralRaiseFormAnalyzer;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Overall verdict, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Good,
    Warning,
    Bad,
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Bad => "bad",
        })
    }
}

/// Machine-readable issue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Required landmarks missing or not visible
    LowConfidence,
    /// Elbow bent during the raise
    ElbowBent,
    /// Torso tilted away from vertical
    TrunkLean,
    /// Shoulders shifted sideways over the hips
    TrunkShift,
    /// Shoulders pulled up towards the ears
    Shrugging,
}

impl IssueCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowConfidence => "LOW_CONFIDENCE",
            Self::ElbowBent => "ELBOW_BENT",
            Self::TrunkLean => "TRUNK_LEAN",
            Self::TrunkShift => "TRUNK_SHIFT",
            Self::Shrugging => "SHRUGGING",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected form problem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormIssue {
    pub code: IssueCode,
    pub message: String,
    pub severity: FormStatus,
}

impl FormIssue {
    #[must_use]
    pub fn new(code: IssueCode, severity: FormStatus, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity,
        }
    }
}

/// Form verdict for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormFeedback {
    pub status: FormStatus,
    pub issues: Vec<FormIssue>,
    /// Diagnostic values, not part of the verdict
    pub metrics: BTreeMap<&'static str, f64>,
}

impl FormFeedback {
    /// Aggregate issues; the worst severity wins
    #[must_use]
    pub fn from_issues(issues: Vec<FormIssue>, metrics: BTreeMap<&'static str, f64>) -> Self {
        let status = issues
            .iter()
            .map(|issue| issue.severity)
            .max()
            .unwrap_or(FormStatus::Good);
        Self { status, issues, metrics }
    }

    /// Feedback for a frame that could not be analyzed
    #[must_use]
    pub fn low_confidence() -> Self {
        Self::from_issues(
            vec![FormIssue::new(
                IssueCode::LowConfidence,
                FormStatus::Warning,
                "Body not fully visible, step back into frame",
            )],
            BTreeMap::new(),
        )
    }

    /// Issue with the given code, if reported
    #[must_use]
    pub fn issue(&self, code: IssueCode) -> Option<&FormIssue> {
        self.issues.iter().find(|issue| issue.code == code)
    }

    #[must_use]
    pub fn has_issue(&self, code: IssueCode) -> bool {
        self.issue(code).is_some()
    }
}
