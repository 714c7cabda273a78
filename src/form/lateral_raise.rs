use super::{FormFeedback, FormIssue, FormStatus, IssueCode};
use crate::config::FormConfig;
use crate::constants::GEOMETRY_EPSILON;
use crate::exercises::LATERAL_RAISE_FORM_LANDMARKS;
use crate::filters::{ExponentialSmoother, SignalFilter};
use crate::geometry::{angle_at_vertex, distance, lean_from_vertical, midpoint};
use crate::landmarks::{Landmark, LandmarkId, PoseFrame};
use crate::Result;
use log::debug;
use nalgebra::Point2;
use std::collections::BTreeMap;

/// Upper-body landmarks used by the lateral raise rules
struct UpperBody {
    left_shoulder: Landmark,
    right_shoulder: Landmark,
    left_elbow: Landmark,
    right_elbow: Landmark,
    left_wrist: Landmark,
    right_wrist: Landmark,
    left_hip: Landmark,
    right_hip: Landmark,
    left_ear: Landmark,
    right_ear: Landmark,
}

impl UpperBody {
    fn capture(frame: &PoseFrame) -> Option<Self> {
        let get = |id: LandmarkId| frame.visible(id).copied();
        Some(Self {
            left_shoulder: get(LandmarkId::LeftShoulder)?,
            right_shoulder: get(LandmarkId::RightShoulder)?,
            left_elbow: get(LandmarkId::LeftElbow)?,
            right_elbow: get(LandmarkId::RightElbow)?,
            left_wrist: get(LandmarkId::LeftWrist)?,
            right_wrist: get(LandmarkId::RightWrist)?,
            left_hip: get(LandmarkId::LeftHip)?,
            right_hip: get(LandmarkId::RightHip)?,
            left_ear: get(LandmarkId::LeftEar)?,
            right_ear: get(LandmarkId::RightEar)?,
        })
    }

    fn shoulder_center(&self) -> Point2<f64> {
        midpoint(&self.left_shoulder, &self.right_shoulder)
    }

    fn hip_center(&self) -> Point2<f64> {
        midpoint(&self.left_hip, &self.right_hip)
    }

    fn shoulder_width(&self) -> f64 {
        distance(&self.left_shoulder, &self.right_shoulder)
    }

    /// Wrist rise above the hips as a fraction of torso length.
    ///
    /// 0.0 with the wrists at hip height, 1.0 at shoulder height. `None` when
    /// the torso has no usable length.
    fn raise_ratio(&self) -> Option<f64> {
        let hip_y = self.hip_center().y;
        let torso = hip_y - self.shoulder_center().y;
        if torso < GEOMETRY_EPSILON {
            return None;
        }
        let wrist_y = (self.left_wrist.y + self.right_wrist.y) / 2.0;
        Some((hip_y - wrist_y) / torso)
    }
}

/// Form rules for the lateral raise.
///
/// Elbow and shrug rules only judge frames where the arms are raised; the
/// relaxed neck length baseline is learned only while the arms are down so a
/// habitual shrug during the raise cannot become its own reference.
pub struct LateralRaiseFormAnalyzer {
    config: FormConfig,

    left_elbow: ExponentialSmoother,
    right_elbow: ExponentialSmoother,
    elbow_streak: u32,
    elbow_warning: bool,

    trunk_lean: ExponentialSmoother,

    neck_ratio: ExponentialSmoother,
    neck_baseline: Option<f64>,
    shrug_streak: u32,
}

impl LateralRaiseFormAnalyzer {
    /// Create an analyzer with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: FormConfig) -> Result<Self> {
        config.validate()?;
        let smoother = || ExponentialSmoother::new(config.smoothing_factor);
        Ok(Self {
            config,
            left_elbow: smoother()?,
            right_elbow: smoother()?,
            elbow_streak: 0,
            elbow_warning: false,
            trunk_lean: smoother()?,
            neck_ratio: smoother()?,
            neck_baseline: None,
            shrug_streak: 0,
        })
    }

    /// Landmarks that must be visible for a frame to be analyzed
    #[must_use]
    pub fn required_landmarks(&self) -> &'static [LandmarkId] {
        LATERAL_RAISE_FORM_LANDMARKS
    }

    /// Relaxed neck length learned so far, as a fraction of shoulder width
    #[must_use]
    pub fn neck_baseline(&self) -> Option<f64> {
        self.neck_baseline
    }

    /// Evaluate one frame
    pub fn analyze(&mut self, frame: &PoseFrame) -> FormFeedback {
        let Some(body) = UpperBody::capture(frame) else {
            return FormFeedback::low_confidence();
        };

        let mut issues = Vec::new();
        let mut metrics = BTreeMap::new();

        let active = body
            .raise_ratio()
            .is_some_and(|ratio| ratio >= self.config.active_raise_ratio);
        metrics.insert("active", if active { 1.0 } else { 0.0 });

        issues.extend(self.check_elbows(&body, active, &mut metrics));
        issues.extend(self.check_trunk(&body, &mut metrics));
        issues.extend(self.check_shrug(&body, active, &mut metrics));

        FormFeedback::from_issues(issues, metrics)
    }

    /// Clear smoothers, streaks and the learned baseline
    pub fn reset(&mut self) {
        self.left_elbow.reset();
        self.right_elbow.reset();
        self.elbow_streak = 0;
        self.elbow_warning = false;
        self.trunk_lean.reset();
        self.neck_ratio.reset();
        self.neck_baseline = None;
        self.shrug_streak = 0;
    }

    fn check_elbows(
        &mut self,
        body: &UpperBody,
        active: bool,
        metrics: &mut BTreeMap<&'static str, f64>,
    ) -> Option<FormIssue> {
        let left = self
            .left_elbow
            .apply(angle_at_vertex(&body.left_shoulder, &body.left_elbow, &body.left_wrist));
        let right = self
            .right_elbow
            .apply(angle_at_vertex(&body.right_shoulder, &body.right_elbow, &body.right_wrist));
        metrics.insert("left_elbow", left);
        metrics.insert("right_elbow", right);

        if !active {
            self.elbow_streak = 0;
            self.elbow_warning = false;
            return None;
        }

        let worst = left.min(right);
        let warning_bound = if self.elbow_warning {
            self.config.elbow_warning_exit_angle
        } else {
            self.config.elbow_warning_enter_angle
        };

        let issue = if worst < self.config.elbow_bad_angle {
            self.elbow_streak = self.elbow_streak.saturating_add(1);
            Some(FormIssue::new(
                IssueCode::ElbowBent,
                FormStatus::Bad,
                format!("Elbow bent to {worst:.0} deg, straighten your arms"),
            ))
        } else if worst < warning_bound {
            self.elbow_streak = self.elbow_streak.saturating_add(1);
            if self.elbow_streak >= self.config.elbow_min_streak {
                self.elbow_warning = true;
            }
            self.elbow_warning.then(|| {
                FormIssue::new(
                    IssueCode::ElbowBent,
                    FormStatus::Warning,
                    format!("Elbows bending ({worst:.0} deg), keep a soft but fixed bend"),
                )
            })
        } else {
            self.elbow_streak = 0;
            self.elbow_warning = false;
            None
        };

        metrics.insert("elbow_streak", f64::from(self.elbow_streak));
        issue
    }

    fn check_trunk(&mut self, body: &UpperBody, metrics: &mut BTreeMap<&'static str, f64>) -> Vec<FormIssue> {
        let shoulder_center = body.shoulder_center();
        let hip_center = body.hip_center();
        let mut issues = Vec::new();

        let lean = self.trunk_lean.apply(lean_from_vertical(&hip_center, &shoulder_center));
        metrics.insert("trunk_lean", lean);
        if lean > self.config.trunk_lean_bad {
            issues.push(FormIssue::new(
                IssueCode::TrunkLean,
                FormStatus::Bad,
                format!("Torso leaning {lean:.0} deg, stand upright"),
            ));
        } else if lean > self.config.trunk_lean_warning {
            issues.push(FormIssue::new(
                IssueCode::TrunkLean,
                FormStatus::Warning,
                format!("Torso leaning {lean:.0} deg"),
            ));
        }

        let width = body.shoulder_width();
        if width > GEOMETRY_EPSILON {
            let shift = (shoulder_center.x - hip_center.x).abs() / width;
            metrics.insert("trunk_shift", shift);
            if shift > self.config.trunk_shift_bad {
                issues.push(FormIssue::new(
                    IssueCode::TrunkShift,
                    FormStatus::Bad,
                    "Shoulders shifted far to one side, center your weight",
                ));
            } else if shift > self.config.trunk_shift_warning {
                issues.push(FormIssue::new(
                    IssueCode::TrunkShift,
                    FormStatus::Warning,
                    "Shoulders drifting sideways",
                ));
            }
        }

        issues
    }

    fn check_shrug(
        &mut self,
        body: &UpperBody,
        active: bool,
        metrics: &mut BTreeMap<&'static str, f64>,
    ) -> Option<FormIssue> {
        let width = body.shoulder_width();
        if width < GEOMETRY_EPSILON {
            return None;
        }

        let neck = (distance(&body.left_ear, &body.left_shoulder) + distance(&body.right_ear, &body.right_shoulder))
            / 2.0
            / width;
        let neck = self.neck_ratio.apply(neck);
        metrics.insert("neck_ratio", neck);

        if !active {
            let baseline = self.neck_baseline.map_or(neck, |b| b.max(neck));
            if self.neck_baseline != Some(baseline) {
                debug!("Relaxed neck baseline now {baseline:.3}");
            }
            self.neck_baseline = Some(baseline);
            self.shrug_streak = self.shrug_streak.saturating_sub(1);
            metrics.insert("neck_baseline", baseline);
            metrics.insert("shrug_streak", f64::from(self.shrug_streak));
            return None;
        }

        let baseline = self.neck_baseline.filter(|b| *b > GEOMETRY_EPSILON)?;
        let drop = ((baseline - neck) / baseline).max(0.0);
        metrics.insert("neck_baseline", baseline);
        metrics.insert("neck_drop", drop);

        let beyond_bad = drop > self.config.shrug_bad_drop;
        if beyond_bad {
            self.shrug_streak = self.shrug_streak.saturating_add(1);
        } else {
            self.shrug_streak = self.shrug_streak.saturating_sub(1);
        }
        metrics.insert("shrug_streak", f64::from(self.shrug_streak));

        if beyond_bad && self.shrug_streak >= self.config.shrug_min_streak {
            Some(FormIssue::new(
                IssueCode::Shrugging,
                FormStatus::Bad,
                "Shoulders shrugging, keep them down and away from your ears",
            ))
        } else if drop > self.config.shrug_warning_drop {
            Some(FormIssue::new(
                IssueCode::Shrugging,
                FormStatus::Warning,
                "Shoulders starting to rise",
            ))
        } else {
            None
        }
    }
}
