//! Joint angle computation from landmark triples.
//!
//! All angles are in degrees and computed in the image plane; depth is
//! ignored. Degenerate geometry (coincident points) yields `0.0` instead of
//! NaN so downstream smoothers never get poisoned.

use crate::constants::GEOMETRY_EPSILON;
use crate::landmarks::{Landmark, LandmarkId, PoseFrame};
use nalgebra::{Point2, Vector2};

/// Three landmarks describing a joint, the angle is measured at `vertex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointTriple {
    pub a: LandmarkId,
    pub vertex: LandmarkId,
    pub b: LandmarkId,
}

impl JointTriple {
    pub const LEFT_SHOULDER_ABDUCTION: Self =
        Self::new(LandmarkId::LeftHip, LandmarkId::LeftShoulder, LandmarkId::LeftElbow);
    pub const RIGHT_SHOULDER_ABDUCTION: Self =
        Self::new(LandmarkId::RightHip, LandmarkId::RightShoulder, LandmarkId::RightElbow);
    pub const LEFT_ELBOW: Self = Self::new(LandmarkId::LeftShoulder, LandmarkId::LeftElbow, LandmarkId::LeftWrist);
    pub const RIGHT_ELBOW: Self =
        Self::new(LandmarkId::RightShoulder, LandmarkId::RightElbow, LandmarkId::RightWrist);
    pub const LEFT_KNEE: Self = Self::new(LandmarkId::LeftHip, LandmarkId::LeftKnee, LandmarkId::LeftAnkle);
    pub const RIGHT_KNEE: Self = Self::new(LandmarkId::RightHip, LandmarkId::RightKnee, LandmarkId::RightAnkle);

    #[must_use]
    pub const fn new(a: LandmarkId, vertex: LandmarkId, b: LandmarkId) -> Self {
        Self { a, vertex, b }
    }
}

/// Angle between two vectors in degrees, `0.0` if either is degenerate
#[must_use]
pub fn vector_angle(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    let norm_u = u.norm();
    let norm_v = v.norm();
    // Written so that NaN norms also take the degenerate branch
    if !(norm_u >= GEOMETRY_EPSILON && norm_v >= GEOMETRY_EPSILON) {
        return 0.0;
    }

    let cos_angle = u.dot(v) / (norm_u * norm_v);
    if !cos_angle.is_finite() {
        return 0.0;
    }
    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle at `vertex` formed by the segments towards `a` and `b`, in [0, 180]
#[must_use]
pub fn angle_at_vertex(a: &Landmark, vertex: &Landmark, b: &Landmark) -> f64 {
    let to_a = a.point() - vertex.point();
    let to_b = b.point() - vertex.point();
    vector_angle(&to_a, &to_b)
}

/// Joint angle for `joint` if all three points are visible in `frame`
#[must_use]
pub fn joint_angle(frame: &PoseFrame, joint: JointTriple) -> Option<f64> {
    let a = frame.visible(joint.a)?;
    let vertex = frame.visible(joint.vertex)?;
    let b = frame.visible(joint.b)?;
    Some(angle_at_vertex(a, vertex, b))
}

/// Average of the left and right joint angles.
///
/// Falls back to whichever side is complete, and to `0.0` if neither is.
#[must_use]
pub fn bilateral_angle(frame: &PoseFrame, left: JointTriple, right: JointTriple) -> f64 {
    match (joint_angle(frame, left), joint_angle(frame, right)) {
        (Some(l), Some(r)) => (l + r) / 2.0,
        (Some(single), None) | (None, Some(single)) => single,
        (None, None) => 0.0,
    }
}

#[must_use]
pub fn midpoint(a: &Landmark, b: &Landmark) -> Point2<f64> {
    nalgebra::center(&a.point(), &b.point())
}

/// Image-plane distance between two landmarks
#[must_use]
pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    nalgebra::distance(&a.point(), &b.point())
}

/// Tilt of the segment `base -> top` away from image-vertical, in degrees.
///
/// Image y grows downward, so upright means `top` sits straight above `base`.
#[must_use]
pub fn lean_from_vertical(base: &Point2<f64>, top: &Point2<f64>) -> f64 {
    let up = Vector2::new(0.0, -1.0);
    vector_angle(&(top - base), &up)
}
