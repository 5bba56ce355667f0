//! Keyframe motion curve evaluation and blending for parametric 2D rigs
//! (engine-agnostic).
//!
//! A parsed [`MotionClip`] (curves, segments, keyframe points, timed events)
//! is evaluated each frame against the host clock and a mutable
//! [`PlaybackEntry`]: fade-in/out crossfading, per-parameter fade overrides,
//! eye-blink / lip-sync auto-effect suppression, and loop/finish
//! bookkeeping, with the blended results written into a [`RigModel`].

pub mod clip;
pub mod config;
pub mod curve;
pub mod engine;
pub mod entry;
pub mod format;
pub mod ids;
pub mod math;
pub mod model;
pub mod motion;
pub mod segment;

// Re-exports for consumers (adapters)
pub use clip::{
    Curve, CurveTarget, KeyframePoint, MotionClip, MotionEvent, ReservedIds, Segment, SegmentKind,
};
pub use config::Config;
pub use curve::evaluate_curve;
pub use engine::MotionUpdate;
pub use entry::PlaybackEntry;
pub use format::{parse_motion_json, ClipError};
pub use ids::{ParamId, ParamInterner};
pub use model::RigModel;
pub use motion::{Motion, MAX_EFFECT_TARGETS};
