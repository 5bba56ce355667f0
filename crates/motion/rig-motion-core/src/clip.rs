//! Canonical parsed motion clip data model. Immutable after construction;
//! a clip may be shared read-only across any number of concurrent playbacks.

use crate::ids::ParamId;

/// A (time, value) sample bounding a segment. Times are seconds from clip start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframePoint {
    pub time: f32,
    pub value: f32,
}

/// Interpolation kind for one sub-interval of a curve.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SegmentKind {
    Linear,
    Bezier,
    Stepped,
    InverseStepped,
}

impl SegmentKind {
    /// Points a segment of this kind appends past the shared leading point.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            SegmentKind::Bezier => 3,
            _ => 1,
        }
    }
}

/// One interpolation interval. `base_point_index` is the segment's first
/// point in the clip-shared point array; the interval end is the start of
/// the next segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub base_point_index: usize,
}

/// What a curve drives on the target model.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CurveTarget {
    Model,
    Parameter,
    PartOpacity,
}

/// A named, time-ordered run of segments driving one model knob.
///
/// Fade times are seconds; a negative value means "unset, inherit the
/// motion-level fade", zero means instantaneous full weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub id: ParamId,
    pub target: CurveTarget,
    pub segment_base_index: usize,
    pub segment_count: usize,
    pub fade_in_time: f32,
    pub fade_out_time: f32,
}

/// A timed user event carried by the clip.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    pub fire_time: f32,
    pub value: String,
}

/// Reserved model-curve ids, resolved once at parse time through the
/// host-provided interner.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReservedIds {
    pub eye_blink: ParamId,
    pub lip_sync: ParamId,
    pub opacity: ParamId,
}

/// One parsed animation clip.
///
/// Curves are grouped contiguously by target: all `Model` curves first, then
/// `Parameter`, then `PartOpacity`. The evaluator trusts this ordering to
/// stop scanning each group early.
#[derive(Clone, Debug)]
pub struct MotionClip {
    pub curves: Vec<Curve>,
    pub segments: Vec<Segment>,
    pub points: Vec<KeyframePoint>,
    pub events: Vec<MotionEvent>,
    pub duration_seconds: f32,
    pub looped: bool,
    pub frame_rate: f32,
    /// Restricted clips guarantee evenly spaced, x-monotonic Bezier control
    /// points and take the cheaper parametric evaluation path.
    pub beziers_restricted: bool,
    pub reserved: ReservedIds,
    /// Clip-level fade defaults from the source document, if present.
    pub fade_in_seconds: Option<f32>,
    pub fade_out_seconds: Option<f32>,
}
