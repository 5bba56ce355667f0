//! Clip document parsing.
//!
//! The source document carries `meta` (duration, fps, loop flag, declared
//! element counts, optional fade defaults), `curves[]` with a flattened
//! `[time, value, tag, ...]` segment stream, and `userData[]` events.
//! Parsing is fail-fast: any malformed input yields a `ClipError` and no
//! partial clip is ever constructed. Curve ids are interned through the
//! host-provided registry; the reserved `EyeBlink` / `LipSync` / `Opacity`
//! ids are resolved here, once.

use serde::Deserialize;
use thiserror::Error;

use crate::clip::{
    Curve, CurveTarget, KeyframePoint, MotionClip, MotionEvent, ReservedIds, Segment, SegmentKind,
};
use crate::ids::ParamInterner;

pub const EFFECT_EYE_BLINK: &str = "EyeBlink";
pub const EFFECT_LIP_SYNC: &str = "LipSync";
pub const MODEL_OPACITY: &str = "Opacity";

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("invalid clip json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clip duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
    #[error("unknown curve target '{0}'")]
    UnknownTarget(String),
    #[error("unknown segment type tag {tag} in curve '{id}'")]
    UnknownSegmentTag { id: String, tag: f32 },
    #[error("curve '{id}' has a truncated segment stream")]
    TruncatedSegments { id: String },
    #[error("curve '{id}' declares no segments")]
    EmptyCurve { id: String },
    #[error("meta declares {declared} {what}, clip contains {actual}")]
    CountMismatch {
        what: &'static str,
        declared: usize,
        actual: usize,
    },
}

/// Parse a clip document into the canonical immutable data model.
pub fn parse_motion_json(
    source: &str,
    interner: &mut ParamInterner,
) -> Result<MotionClip, ClipError> {
    let doc: RawDocument = serde_json::from_str(source)?;

    if !doc.meta.duration.is_finite() || doc.meta.duration <= 0.0 {
        return Err(ClipError::InvalidDuration(doc.meta.duration));
    }

    let mut curves = Vec::with_capacity(doc.meta.curve_count);
    let mut segments = Vec::with_capacity(doc.meta.total_segment_count);
    let mut points = Vec::with_capacity(doc.meta.total_point_count);

    for raw in &doc.curves {
        let target = match raw.target.as_str() {
            "Model" => CurveTarget::Model,
            "Parameter" => CurveTarget::Parameter,
            "PartOpacity" => CurveTarget::PartOpacity,
            other => return Err(ClipError::UnknownTarget(other.to_string())),
        };

        let mut stream = raw.segments.iter().copied();
        let segment_base_index = segments.len();

        let time = take(&mut stream, &raw.id)?;
        let value = take(&mut stream, &raw.id)?;
        points.push(KeyframePoint { time, value });

        let mut segment_count = 0;
        while let Some(tag) = stream.next() {
            let kind = match tag {
                t if t == 0.0 => SegmentKind::Linear,
                t if t == 1.0 => SegmentKind::Bezier,
                t if t == 2.0 => SegmentKind::Stepped,
                t if t == 3.0 => SegmentKind::InverseStepped,
                _ => {
                    return Err(ClipError::UnknownSegmentTag {
                        id: raw.id.clone(),
                        tag,
                    })
                }
            };
            let base_point_index = points.len() - 1;
            for _ in 0..kind.point_count() {
                let time = take(&mut stream, &raw.id)?;
                let value = take(&mut stream, &raw.id)?;
                points.push(KeyframePoint { time, value });
            }
            segments.push(Segment {
                kind,
                base_point_index,
            });
            segment_count += 1;
        }
        // A curve with a lone leading point would fall through the segment
        // scan into a keyframe it does not own.
        if segment_count == 0 {
            return Err(ClipError::EmptyCurve { id: raw.id.clone() });
        }

        curves.push(Curve {
            id: interner.intern(&raw.id),
            target,
            segment_base_index,
            segment_count,
            fade_in_time: raw.fade_in_time.unwrap_or(-1.0),
            fade_out_time: raw.fade_out_time.unwrap_or(-1.0),
        });
    }

    check_count("curves", doc.meta.curve_count, curves.len())?;
    check_count("segments", doc.meta.total_segment_count, segments.len())?;
    check_count("points", doc.meta.total_point_count, points.len())?;

    let events: Vec<MotionEvent> = doc
        .user_data
        .iter()
        .map(|u| MotionEvent {
            fire_time: u.time,
            value: u.value.clone(),
        })
        .collect();
    check_count("user data events", doc.meta.user_data_count, events.len())?;

    let reserved = ReservedIds {
        eye_blink: interner.intern(EFFECT_EYE_BLINK),
        lip_sync: interner.intern(EFFECT_LIP_SYNC),
        opacity: interner.intern(MODEL_OPACITY),
    };

    log::debug!(
        "loaded motion clip: {} curves, {} segments, {} points, {} events, {:.2}s",
        curves.len(),
        segments.len(),
        points.len(),
        events.len(),
        doc.meta.duration
    );

    Ok(MotionClip {
        curves,
        segments,
        points,
        events,
        duration_seconds: doc.meta.duration,
        looped: doc.meta.looped,
        frame_rate: doc.meta.fps,
        beziers_restricted: doc.meta.are_beziers_restricted,
        reserved,
        fade_in_seconds: doc.meta.fade_in_time,
        fade_out_seconds: doc.meta.fade_out_time,
    })
}

fn take(stream: &mut impl Iterator<Item = f32>, id: &str) -> Result<f32, ClipError> {
    stream.next().ok_or_else(|| ClipError::TruncatedSegments {
        id: id.to_string(),
    })
}

fn check_count(what: &'static str, declared: usize, actual: usize) -> Result<(), ClipError> {
    if declared != actual {
        return Err(ClipError::CountMismatch {
            what,
            declared,
            actual,
        });
    }
    Ok(())
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    meta: RawMeta,
    curves: Vec<RawCurve>,
    #[serde(default)]
    user_data: Vec<RawUserData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    duration: f32,
    #[serde(rename = "loop", default)]
    looped: bool,
    fps: f32,
    curve_count: usize,
    total_segment_count: usize,
    total_point_count: usize,
    #[serde(default)]
    user_data_count: usize,
    #[serde(default)]
    fade_in_time: Option<f32>,
    #[serde(default)]
    fade_out_time: Option<f32>,
    #[serde(default)]
    are_beziers_restricted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCurve {
    target: String,
    id: String,
    #[serde(default)]
    fade_in_time: Option<f32>,
    #[serde(default)]
    fade_out_time: Option<f32>,
    segments: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserData {
    time: f32,
    value: String,
}
