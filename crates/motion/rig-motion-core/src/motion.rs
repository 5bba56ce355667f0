//! A `Motion` pairs an immutable clip with playback policy: loop flags, fade
//! defaults, global weight, start offset, auto-effect target lists, and the
//! cached model-opacity curve. Effect targets and per-parameter fades are
//! assigned once, before playback; evaluation never mutates a motion.

use crate::clip::{CurveTarget, MotionClip, MotionEvent};
use crate::config::Config;
use crate::curve::evaluate_curve;
use crate::ids::ParamId;

/// Auto-effect targets beyond this cap are dropped with a warning; the
/// per-frame override bookkeeping is a 64-bit mask.
pub const MAX_EFFECT_TARGETS: usize = 64;

#[derive(Clone, Debug)]
pub struct Motion {
    clip: MotionClip,
    pub looped: bool,
    /// Restart the fade-in each time a looping clip wraps.
    pub loop_fade_in: bool,
    pub fade_in_seconds: f32,
    pub fade_out_seconds: f32,
    /// Global weight multiplier applied on top of the fade envelope.
    pub weight: f32,
    /// Shift applied to the playback start time.
    pub offset_seconds: f32,
    eye_blink_handles: Vec<ParamId>,
    lip_sync_handles: Vec<ParamId>,
    model_opacity_curve: Option<usize>,
}

impl Motion {
    /// Wrap a parsed clip, taking fade defaults from the clip's metadata or
    /// falling back to the configured default.
    pub fn from_clip(clip: MotionClip, cfg: &Config) -> Self {
        let fade_in_seconds = clip.fade_in_seconds.unwrap_or(cfg.default_fade_seconds);
        let fade_out_seconds = clip.fade_out_seconds.unwrap_or(cfg.default_fade_seconds);
        let model_opacity_curve = clip
            .curves
            .iter()
            .position(|c| c.target == CurveTarget::Model && c.id == clip.reserved.opacity);
        let looped = clip.looped;
        Self {
            clip,
            looped,
            loop_fade_in: true,
            fade_in_seconds,
            fade_out_seconds,
            weight: 1.0,
            offset_seconds: 0.0,
            eye_blink_handles: Vec::new(),
            lip_sync_handles: Vec::new(),
            model_opacity_curve,
        }
    }

    pub fn clip(&self) -> &MotionClip {
        &self.clip
    }

    /// Natural playback length; `None` while looping (open-ended).
    pub fn duration(&self) -> Option<f32> {
        if self.looped {
            None
        } else {
            Some(self.clip.duration_seconds)
        }
    }

    /// Length of one loop iteration (the clip duration).
    pub fn loop_duration(&self) -> f32 {
        self.clip.duration_seconds
    }

    /// Register the auto-effect target parameters this motion may override.
    /// Lists longer than [`MAX_EFFECT_TARGETS`] are truncated with a warning.
    pub fn set_effect_handles(&mut self, eye_blink: &[ParamId], lip_sync: &[ParamId]) {
        self.eye_blink_handles = truncate_targets(eye_blink, "eye-blink");
        self.lip_sync_handles = truncate_targets(lip_sync, "lip-sync");
    }

    pub fn eye_blink_handles(&self) -> &[ParamId] {
        &self.eye_blink_handles
    }

    pub fn lip_sync_handles(&self) -> &[ParamId] {
        &self.lip_sync_handles
    }

    /// Override the fade-in of the parameter curve with the given id.
    pub fn set_parameter_fade_in_time(&mut self, id: ParamId, seconds: f32) {
        if let Some(curve) = self
            .clip
            .curves
            .iter_mut()
            .find(|c| c.target == CurveTarget::Parameter && c.id == id)
        {
            curve.fade_in_time = seconds;
        }
    }

    /// Override the fade-out of the parameter curve with the given id.
    pub fn set_parameter_fade_out_time(&mut self, id: ParamId, seconds: f32) {
        if let Some(curve) = self
            .clip
            .curves
            .iter_mut()
            .find(|c| c.target == CurveTarget::Parameter && c.id == id)
        {
            curve.fade_out_time = seconds;
        }
    }

    /// Per-parameter fade-in; `None` if no parameter curve has the id.
    /// A negative value means the curve inherits the motion-level fade.
    pub fn parameter_fade_in_time(&self, id: ParamId) -> Option<f32> {
        self.clip
            .curves
            .iter()
            .find(|c| c.target == CurveTarget::Parameter && c.id == id)
            .map(|c| c.fade_in_time)
    }

    pub fn parameter_fade_out_time(&self, id: ParamId) -> Option<f32> {
        self.clip
            .curves
            .iter()
            .find(|c| c.target == CurveTarget::Parameter && c.id == id)
            .map(|c| c.fade_out_time)
    }

    pub fn exists_model_opacity(&self) -> bool {
        self.model_opacity_curve.is_some()
    }

    /// Index of the model-opacity curve within the clip's curve array.
    pub fn model_opacity_index(&self) -> Option<usize> {
        self.model_opacity_curve
    }

    pub fn model_opacity_id(&self) -> Option<ParamId> {
        self.model_opacity_curve.map(|i| self.clip.curves[i].id)
    }

    /// Model opacity at a clip-local time; 1.0 when the clip has no opacity
    /// curve.
    pub fn model_opacity_value(&self, time_seconds: f32) -> f32 {
        match self.model_opacity_curve {
            Some(index) => evaluate_curve(&self.clip, index, time_seconds),
            None => 1.0,
        }
    }

    /// Events whose fire time lies in the half-open window `(prev, cur]`.
    /// Querying adjacent non-overlapping windows fires each event exactly
    /// once, independent of frame rate.
    pub fn fired_events(&self, prev_time: f32, cur_time: f32) -> impl Iterator<Item = &MotionEvent> {
        self.clip
            .events
            .iter()
            .filter(move |e| prev_time < e.fire_time && e.fire_time <= cur_time)
    }
}

fn truncate_targets(ids: &[ParamId], what: &str) -> Vec<ParamId> {
    if ids.len() > MAX_EFFECT_TARGETS {
        log::warn!(
            "{what} effect registers {} targets, keeping the first {MAX_EFFECT_TARGETS}",
            ids.len()
        );
    }
    ids.iter().take(MAX_EFFECT_TARGETS).copied().collect()
}
