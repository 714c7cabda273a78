//! Constants used throughout the library

/// Number of body landmarks in the pose model
pub const NUM_BODY_LANDMARKS: usize = 33;

/// Landmarks with confidence strictly above this are considered visible
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Vectors shorter than this are treated as degenerate
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Lateral raise shoulder abduction thresholds (degrees)
pub const LATERAL_RAISE_BOTTOM_THRESHOLD: f64 = 20.0;
pub const LATERAL_RAISE_TOP_THRESHOLD: f64 = 80.0;

/// Single squat knee angle thresholds (degrees)
pub const SINGLE_SQUAT_BOTTOM_THRESHOLD: f64 = 160.0;
pub const SINGLE_SQUAT_TOP_THRESHOLD: f64 = 170.0;

/// Squat thresholds sit 10 degrees apart, so the margin is narrower
pub const SINGLE_SQUAT_HYSTERESIS: f64 = 3.0;

/// Margin applied on top of the rest/extreme thresholds to stop boundary flutter
pub const DEFAULT_HYSTERESIS: f64 = 5.0;

/// Default exponential smoothing factor for counter drive signals
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.3;

/// Counter timing defaults (milliseconds)
pub const DEFAULT_READY_HOLD_MS: u64 = 500;
pub const DEFAULT_MIN_REP_MS: u64 = 800;
pub const DEFAULT_MAX_REP_MS: u64 = 8_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Form analyzer smoothing factor
pub const DEFAULT_FORM_SMOOTHING_FACTOR: f64 = 0.3;

/// Arms count as raised once the wrists climb this fraction of the torso above the hips
pub const DEFAULT_ACTIVE_RAISE_RATIO: f64 = 0.5;

/// Elbow straightness bounds (degrees)
pub const ELBOW_BAD_ANGLE: f64 = 120.0;
pub const ELBOW_WARNING_ENTER_ANGLE: f64 = 150.0;
pub const ELBOW_WARNING_EXIT_ANGLE: f64 = 160.0;
pub const ELBOW_MIN_STREAK: u32 = 5;

/// Trunk lean from vertical (degrees)
pub const TRUNK_LEAN_WARNING: f64 = 10.0;
pub const TRUNK_LEAN_BAD: f64 = 20.0;

/// Shoulder-center lateral shift as a fraction of shoulder width
pub const TRUNK_SHIFT_WARNING: f64 = 0.15;
pub const TRUNK_SHIFT_BAD: f64 = 0.25;

/// Neck length drop relative to baseline
pub const SHRUG_WARNING_DROP: f64 = 0.15;
pub const SHRUG_BAD_DROP: f64 = 0.30;
pub const SHRUG_MIN_STREAK: u32 = 10;
