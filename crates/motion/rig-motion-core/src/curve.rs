//! Active-segment lookup for one curve, delegating to the per-kind
//! evaluators.

use crate::clip::{MotionClip, SegmentKind};
use crate::segment::{
    evaluate_bezier, evaluate_bezier_restricted, evaluate_inverse_stepped, evaluate_linear,
    evaluate_stepped,
};

/// Evaluate curve `curve_index` of `clip` at `time` seconds.
///
/// Segments are scanned in order; the first whose last point lies beyond the
/// query time is the active one. Past the end of the curve the final
/// keyframe's value is held. Curves typically hold few segments, so the scan
/// is linear.
pub fn evaluate_curve(clip: &MotionClip, curve_index: usize, time: f32) -> f32 {
    let curve = &clip.curves[curve_index];
    let segments =
        &clip.segments[curve.segment_base_index..curve.segment_base_index + curve.segment_count];

    let mut last_point = 0;
    for segment in segments {
        last_point = segment.base_point_index + segment.kind.point_count();
        if clip.points[last_point].time > time {
            let points = &clip.points[segment.base_point_index..=last_point];
            return match segment.kind {
                SegmentKind::Linear => evaluate_linear(points, time),
                SegmentKind::Bezier => {
                    if clip.beziers_restricted {
                        evaluate_bezier_restricted(points, time)
                    } else {
                        evaluate_bezier(points, time)
                    }
                }
                SegmentKind::Stepped => evaluate_stepped(points, time),
                SegmentKind::InverseStepped => evaluate_inverse_stepped(points, time),
            };
        }
    }

    clip.points[last_point].value
}
