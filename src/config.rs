//! Configuration for counters and form analysis.
//!
//! Every threshold is a tunable default rather than a biomechanical constant;
//! hosts may override them from a YAML file or user settings.

use crate::constants::{
    DEFAULT_ACTIVE_RAISE_RATIO, DEFAULT_DEBOUNCE_MS, DEFAULT_FORM_SMOOTHING_FACTOR, DEFAULT_HYSTERESIS,
    DEFAULT_MAX_REP_MS, DEFAULT_MIN_REP_MS, DEFAULT_READY_HOLD_MS, DEFAULT_SMOOTHING_FACTOR, ELBOW_BAD_ANGLE,
    ELBOW_MIN_STREAK, ELBOW_WARNING_ENTER_ANGLE, ELBOW_WARNING_EXIT_ANGLE, LATERAL_RAISE_BOTTOM_THRESHOLD,
    LATERAL_RAISE_TOP_THRESHOLD, SHRUG_BAD_DROP, SHRUG_MIN_STREAK, SHRUG_WARNING_DROP, SINGLE_SQUAT_BOTTOM_THRESHOLD,
    SINGLE_SQUAT_HYSTERESIS, SINGLE_SQUAT_TOP_THRESHOLD, TRUNK_LEAN_BAD, TRUNK_LEAN_WARNING, TRUNK_SHIFT_BAD, TRUNK_SHIFT_WARNING,
};
use crate::exercises::Exercise;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lateral raise counter thresholds
    pub lateral_raise: CounterConfig,

    /// Single squat counter thresholds
    pub single_squat: CounterConfig,

    /// Form analyzer thresholds
    pub form: FormConfig,
}

/// Thresholds and timing for one repetition counter.
///
/// `bottom_threshold`/`top_threshold` are the low and high angle bounds; which
/// of the two is the rest position depends on the exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Low angle bound (degrees)
    pub bottom_threshold: f64,

    /// High angle bound (degrees)
    pub top_threshold: f64,

    /// Margin applied when leaving rest or leaving the extreme (degrees)
    pub hysteresis: f64,

    /// Exponential smoothing factor in (0, 1]
    pub smoothing_factor: f64,

    /// Time the rest position must be held before counting starts
    pub ready_hold_ms: u64,

    /// Repetitions faster than this are discarded as noise
    pub min_rep_ms: u64,

    /// Repetitions slower than this are discarded and counting re-arms
    pub max_rep_ms: u64,

    /// Minimum time between phase transitions
    pub debounce_ms: u64,
}

/// Form analyzer thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Exponential smoothing factor for every form signal
    pub smoothing_factor: f64,

    /// Wrist rise above the hips, as a fraction of torso length, that counts as active
    pub active_raise_ratio: f64,

    /// Elbow angle below which the arm is flagged immediately (degrees)
    pub elbow_bad_angle: f64,

    /// Elbow angle below which a warning streak builds (degrees)
    pub elbow_warning_enter_angle: f64,

    /// Elbow angle a latched warning must exceed to clear (degrees)
    pub elbow_warning_exit_angle: f64,

    /// Consecutive frames before an elbow warning is reported
    pub elbow_min_streak: u32,

    /// Trunk lean from vertical (degrees)
    pub trunk_lean_warning: f64,
    pub trunk_lean_bad: f64,

    /// Shoulder-center shift as a fraction of shoulder width
    pub trunk_shift_warning: f64,
    pub trunk_shift_bad: f64,

    /// Neck length drop relative to the relaxed baseline (0.0-1.0)
    pub shrug_warning_drop: f64,
    pub shrug_bad_drop: f64,

    /// Sustained frames above the bad drop before shrugging is reported as bad
    pub shrug_min_streak: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lateral_raise: Exercise::LateralRaise.config().default_counter,
            single_squat: Exercise::SingleSquat.config().default_counter,
            form: FormConfig::default(),
        }
    }
}

impl CounterConfig {
    /// Defaults for the lateral raise (shoulder abduction angle)
    #[must_use]
    pub const fn lateral_raise() -> Self {
        Self::with_thresholds(LATERAL_RAISE_BOTTOM_THRESHOLD, LATERAL_RAISE_TOP_THRESHOLD)
    }

    /// Defaults for the single squat (knee angle)
    #[must_use]
    pub const fn single_squat() -> Self {
        Self {
            hysteresis: SINGLE_SQUAT_HYSTERESIS,
            ..Self::with_thresholds(SINGLE_SQUAT_BOTTOM_THRESHOLD, SINGLE_SQUAT_TOP_THRESHOLD)
        }
    }

    /// Default timing and smoothing around the given angle bounds
    #[must_use]
    pub const fn with_thresholds(bottom_threshold: f64, top_threshold: f64) -> Self {
        Self {
            bottom_threshold,
            top_threshold,
            hysteresis: DEFAULT_HYSTERESIS,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            ready_hold_ms: DEFAULT_READY_HOLD_MS,
            min_rep_ms: DEFAULT_MIN_REP_MS,
            max_rep_ms: DEFAULT_MAX_REP_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    #[must_use]
    pub fn ready_hold(&self) -> Duration {
        Duration::from_millis(self.ready_hold_ms)
    }

    #[must_use]
    pub fn min_rep_duration(&self) -> Duration {
        Duration::from_millis(self.min_rep_ms)
    }

    #[must_use]
    pub fn max_rep_duration(&self) -> Duration {
        Duration::from_millis(self.max_rep_ms)
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate counter configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent field
    pub fn validate(&self) -> Result<()> {
        if !self.bottom_threshold.is_finite() || !self.top_threshold.is_finite() {
            return Err(Error::ConfigError("Thresholds must be finite".to_string()));
        }
        if self.bottom_threshold >= self.top_threshold {
            return Err(Error::ConfigError(format!(
                "Bottom threshold {} must be below top threshold {}",
                self.bottom_threshold, self.top_threshold
            )));
        }
        if !(self.hysteresis >= 0.0) {
            return Err(Error::ConfigError("Hysteresis must be non-negative".to_string()));
        }
        if self.bottom_threshold + self.hysteresis >= self.top_threshold - self.hysteresis {
            return Err(Error::ConfigError(format!(
                "Hysteresis {} leaves no band between {} and {}",
                self.hysteresis, self.bottom_threshold, self.top_threshold
            )));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(Error::ConfigError(format!(
                "Smoothing factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if self.max_rep_ms == 0 {
            return Err(Error::ConfigError("Maximum repetition duration must be greater than 0".to_string()));
        }
        if self.min_rep_ms > self.max_rep_ms {
            return Err(Error::ConfigError(format!(
                "Minimum repetition duration {}ms exceeds maximum {}ms",
                self.min_rep_ms, self.max_rep_ms
            )));
        }
        Ok(())
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::lateral_raise()
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: DEFAULT_FORM_SMOOTHING_FACTOR,
            active_raise_ratio: DEFAULT_ACTIVE_RAISE_RATIO,
            elbow_bad_angle: ELBOW_BAD_ANGLE,
            elbow_warning_enter_angle: ELBOW_WARNING_ENTER_ANGLE,
            elbow_warning_exit_angle: ELBOW_WARNING_EXIT_ANGLE,
            elbow_min_streak: ELBOW_MIN_STREAK,
            trunk_lean_warning: TRUNK_LEAN_WARNING,
            trunk_lean_bad: TRUNK_LEAN_BAD,
            trunk_shift_warning: TRUNK_SHIFT_WARNING,
            trunk_shift_bad: TRUNK_SHIFT_BAD,
            shrug_warning_drop: SHRUG_WARNING_DROP,
            shrug_bad_drop: SHRUG_BAD_DROP,
            shrug_min_streak: SHRUG_MIN_STREAK,
        }
    }
}

impl FormConfig {
    /// Validate form analyzer configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent field
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(Error::ConfigError(format!(
                "Form smoothing factor must be in (0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if !self.active_raise_ratio.is_finite() {
            return Err(Error::ConfigError("Active raise ratio must be finite".to_string()));
        }
        if !(self.elbow_bad_angle < self.elbow_warning_enter_angle
            && self.elbow_warning_enter_angle <= self.elbow_warning_exit_angle)
        {
            return Err(Error::ConfigError(
                "Elbow angles must satisfy bad < warning enter <= warning exit".to_string(),
            ));
        }
        if !(self.trunk_lean_warning < self.trunk_lean_bad) {
            return Err(Error::ConfigError("Trunk lean warning must be below bad".to_string()));
        }
        if !(self.trunk_shift_warning < self.trunk_shift_bad) {
            return Err(Error::ConfigError("Trunk shift warning must be below bad".to_string()));
        }
        if !(0.0 < self.shrug_warning_drop && self.shrug_warning_drop < self.shrug_bad_drop && self.shrug_bad_drop <= 1.0)
        {
            return Err(Error::ConfigError(
                "Shrug drops must satisfy 0 < warning < bad <= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Counter thresholds for `exercise`
    #[must_use]
    pub fn counter(&self, exercise: Exercise) -> &CounterConfig {
        match exercise {
            Exercise::LateralRaise => &self.lateral_raise,
            Exercise::SingleSquat => &self.single_squat,
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the section that failed
    pub fn validate(&self) -> Result<()> {
        self.lateral_raise
            .validate()
            .map_err(|e| Error::ConfigError(format!("lateral_raise: {e}")))?;
        self.single_squat
            .validate()
            .map_err(|e| Error::ConfigError(format!("single_squat: {e}")))?;
        self.form.validate().map_err(|e| Error::ConfigError(format!("form: {e}")))?;
        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Fitness Counter Configuration

# Lateral raise: shoulder abduction angle, rest is the bottom threshold
lateral_raise:
  bottom_threshold: 20.0
  top_threshold: 80.0
  hysteresis: 5.0
  smoothing_factor: 0.3
  ready_hold_ms: 500
  min_rep_ms: 800
  max_rep_ms: 8000
  debounce_ms: 100

# Single squat: knee angle, rest is the top threshold
single_squat:
  bottom_threshold: 160.0
  top_threshold: 170.0
  hysteresis: 3.0
  smoothing_factor: 0.3
  ready_hold_ms: 500
  min_rep_ms: 800
  max_rep_ms: 8000
  debounce_ms: 100

# Form analysis
form:
  smoothing_factor: 0.3
  active_raise_ratio: 0.5
  elbow_bad_angle: 120.0
  elbow_warning_enter_angle: 150.0
  elbow_warning_exit_angle: 160.0
  elbow_min_streak: 5
  trunk_lean_warning: 10.0
  trunk_lean_bad: 20.0
  trunk_shift_warning: 0.15
  trunk_shift_bad: 0.25
  shrug_warning_drop: 0.15
  shrug_bad_drop: 0.30
  shrug_min_streak: 10
"#;
