//! Per-kind segment evaluators mapping (points, time) -> value.
//!
//! Callers pass the segment's point run: 2 points for Linear / Stepped /
//! InverseStepped, 4 for Bezier. Linear tolerates extrapolation above the
//! segment (no upper clamp); all variants clamp below at the segment start.

use crate::clip::KeyframePoint;
use crate::math::solve_cubic_bezier_t;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// De Casteljau evaluation of a cubic over the four control values.
#[inline]
fn de_casteljau(v: [f32; 4], t: f32) -> f32 {
    let p01 = lerp(v[0], v[1], t);
    let p12 = lerp(v[1], v[2], t);
    let p23 = lerp(v[2], v[3], t);
    let p012 = lerp(p01, p12, t);
    let p123 = lerp(p12, p23, t);
    lerp(p012, p123, t)
}

pub fn evaluate_linear(points: &[KeyframePoint], time: f32) -> f32 {
    let p0 = points[0];
    let p1 = points[1];
    let mut t = (time - p0.time) / (p1.time - p0.time).max(f32::EPSILON);
    if t < 0.0 {
        t = 0.0;
    }
    p0.value + (p1.value - p0.value) * t
}

/// Restricted variant: control points are x-monotonic and evenly spaced, so
/// the query time maps to the curve parameter directly.
pub fn evaluate_bezier_restricted(points: &[KeyframePoint], time: f32) -> f32 {
    let mut t = (time - points[0].time) / (points[3].time - points[0].time).max(f32::EPSILON);
    if t < 0.0 {
        t = 0.0;
    }
    de_casteljau(
        [
            points[0].value,
            points[1].value,
            points[2].value,
            points[3].value,
        ],
        t,
    )
}

/// General variant: invert the x(t) cubic with Cardano's formula to find the
/// true curve parameter for the query time.
pub fn evaluate_bezier(points: &[KeyframePoint], time: f32) -> f32 {
    let x1 = points[0].time;
    let x2 = points[1].time;
    let x3 = points[2].time;
    let x4 = points[3].time;

    let a = x4 - 3.0 * x3 + 3.0 * x2 - x1;
    let b = 3.0 * x3 - 6.0 * x2 + 3.0 * x1;
    let c = 3.0 * x2 - 3.0 * x1;
    let d = x1 - time;

    let t = solve_cubic_bezier_t(a, b, c, d);
    de_casteljau(
        [
            points[0].value,
            points[1].value,
            points[2].value,
            points[3].value,
        ],
        t,
    )
}

/// Flat hold of the left value until the next keyframe.
pub fn evaluate_stepped(points: &[KeyframePoint], _time: f32) -> f32 {
    points[0].value
}

/// Immediate jump to the right value, held until then.
pub fn evaluate_inverse_stepped(points: &[KeyframePoint], _time: f32) -> f32 {
    points[1].value
}
