//! Per-frame motion evaluation: fade weighting, curve evaluation, auto-effect
//! override/merge, model writes, and loop/finish bookkeeping.
//!
//! `update_parameters` implements the whole per-frame contract and returns a
//! [`MotionUpdate`] the scheduler consumes synchronously; there is no hidden
//! completion callback.

use crate::clip::CurveTarget;
use crate::curve::evaluate_curve;
use crate::entry::PlaybackEntry;
use crate::math::{ease_sine, fmod};
use crate::model::RigModel;
use crate::motion::Motion;

/// Outcome of one update call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionUpdate {
    Playing,
    /// A looping clip wrapped; carries the clock time at which it restarted.
    LoopedAt(f32),
    Finished,
}

impl Motion {
    /// Idempotent first-update setup: anchors the start and fade-in
    /// timestamps and derives the natural end time unless one was already
    /// forced externally.
    pub fn setup_entry(&self, entry: &mut PlaybackEntry, clock_seconds: f32) {
        if entry.started {
            return;
        }
        entry.started = true;
        entry.start_time = clock_seconds - self.offset_seconds;
        entry.fade_in_start_time = clock_seconds;
        if entry.end_time.is_none() {
            if let Some(duration) = self.duration() {
                entry.end_time = Some(entry.start_time + duration);
            }
        }
    }

    fn fade_in_factor(&self, entry: &PlaybackEntry, clock_seconds: f32) -> f32 {
        if self.fade_in_seconds <= 0.0 {
            return 1.0;
        }
        ease_sine((clock_seconds - entry.fade_in_start_time) / self.fade_in_seconds)
    }

    fn fade_out_factor(&self, entry: &PlaybackEntry, clock_seconds: f32) -> f32 {
        match entry.end_time {
            Some(end) if self.fade_out_seconds > 0.0 => {
                ease_sine((end - clock_seconds) / self.fade_out_seconds)
            }
            _ => 1.0,
        }
    }

    /// Evaluate every curve of this motion at the host clock and write the
    /// blended results into `model`, updating `entry`'s loop/finish state.
    ///
    /// # Panics
    ///
    /// Panics if the computed fade weight leaves [0,1]: that indicates
    /// corrupted timestamps or a weight misconfiguration, and clamping would
    /// mask it.
    pub fn update_parameters(
        &self,
        model: &mut dyn RigModel,
        entry: &mut PlaybackEntry,
        clock_seconds: f32,
    ) -> MotionUpdate {
        if !entry.available {
            return MotionUpdate::Playing;
        }
        if entry.finished {
            return MotionUpdate::Finished;
        }

        self.setup_entry(entry, clock_seconds);

        let fade_in_factor = self.fade_in_factor(entry, clock_seconds);
        let fade_out_factor = self.fade_out_factor(entry, clock_seconds);
        let fade_weight = self.weight * fade_in_factor * fade_out_factor;
        assert!(
            (0.0..=1.0).contains(&fade_weight),
            "fade weight out of range: {fade_weight}"
        );

        // Clock jitter can momentarily run backwards; never feed negative
        // local time into the evaluators.
        let mut time = (clock_seconds - entry.start_time).max(0.0);
        let duration = self.clip().duration_seconds;
        if self.looped && time > duration {
            // Reduce modulo the clip length; an exact multiple stays at the
            // full duration so the wrap below still triggers.
            let m = fmod(time, duration);
            time = if m == 0.0 { duration } else { m };
        }

        let clip = self.clip();
        let curves = &clip.curves;

        // Model curves come first in the shared curve array. Capture the
        // auto-effect inputs; opacity is pushed straight through, unfaded.
        let mut eye_blink_value = None;
        let mut lip_sync_value = None;
        let mut c = 0;
        while c < curves.len() && curves[c].target == CurveTarget::Model {
            let value = evaluate_curve(clip, c, time);
            let id = curves[c].id;
            if id == clip.reserved.eye_blink {
                eye_blink_value = Some(value);
            } else if id == clip.reserved.lip_sync {
                lip_sync_value = Some(value);
            } else if id == clip.reserved.opacity {
                model.set_model_opacity(value);
            }
            c += 1;
        }

        let mut eye_blink_flags: u64 = 0;
        let mut lip_sync_flags: u64 = 0;

        while c < curves.len() && curves[c].target == CurveTarget::Parameter {
            let curve = &curves[c];
            let Some(index) = model.parameter_index(curve.id) else {
                // Unknown parameter: the model simply lacks this knob.
                c += 1;
                continue;
            };
            let source = model.parameter_value(index);
            let mut value = evaluate_curve(clip, c, time);

            if let Some(blink) = eye_blink_value {
                for (i, id) in self.eye_blink_handles().iter().enumerate() {
                    if *id == curve.id {
                        value *= blink;
                        eye_blink_flags |= 1 << i;
                        break;
                    }
                }
            }
            if let Some(sync) = lip_sync_value {
                for (i, id) in self.lip_sync_handles().iter().enumerate() {
                    if *id == curve.id {
                        value += sync;
                        lip_sync_flags |= 1 << i;
                        break;
                    }
                }
            }

            let blended = if curve.fade_in_time < 0.0 && curve.fade_out_time < 0.0 {
                source + (value - source) * fade_weight
            } else {
                // Per-parameter fade: negative inherits the motion-level
                // factor, zero snaps to full weight.
                let fin = if curve.fade_in_time < 0.0 {
                    fade_in_factor
                } else if curve.fade_in_time == 0.0 {
                    1.0
                } else {
                    ease_sine((clock_seconds - entry.fade_in_start_time) / curve.fade_in_time)
                };
                let fout = if curve.fade_out_time < 0.0 {
                    fade_out_factor
                } else if curve.fade_out_time == 0.0 {
                    1.0
                } else {
                    match entry.end_time {
                        Some(end) => ease_sine((end - clock_seconds) / curve.fade_out_time),
                        None => 1.0,
                    }
                };
                source + (value - source) * (self.weight * fin * fout)
            };
            model.set_parameter_value(index, blended);
            c += 1;
        }

        // Auto-effect targets not overridden by explicit curve data this
        // frame blend toward the captured automatic value.
        if let Some(blink) = eye_blink_value {
            for (i, id) in self.eye_blink_handles().iter().enumerate() {
                if (eye_blink_flags >> i) & 1 == 1 {
                    continue;
                }
                if let Some(index) = model.parameter_index(*id) {
                    let source = model.parameter_value(index);
                    model.set_parameter_value(index, source + (blink - source) * fade_weight);
                }
            }
        }
        if let Some(sync) = lip_sync_value {
            for (i, id) in self.lip_sync_handles().iter().enumerate() {
                if (lip_sync_flags >> i) & 1 == 1 {
                    continue;
                }
                if let Some(index) = model.parameter_index(*id) {
                    let source = model.parameter_value(index);
                    model.set_parameter_value(index, source + (sync - source) * fade_weight);
                }
            }
        }

        // Part opacities are written directly, no blending.
        while c < curves.len() && curves[c].target == CurveTarget::PartOpacity {
            if let Some(index) = model.part_index(curves[c].id) {
                model.set_part_opacity(index, evaluate_curve(clip, c, time));
            }
            c += 1;
        }

        let mut result = MotionUpdate::Playing;
        if time >= duration {
            if self.looped {
                entry.start_time = clock_seconds;
                if self.loop_fade_in {
                    entry.fade_in_start_time = clock_seconds;
                }
                result = MotionUpdate::LoopedAt(clock_seconds);
            } else {
                entry.finished = true;
                result = MotionUpdate::Finished;
            }
        }

        // An externally shortened playback terminates once its end time has
        // strictly passed, even before the clip's natural duration; the
        // boundary frame itself still renders.
        if let Some(end) = entry.end_time {
            if end < clock_seconds {
                entry.finished = true;
                result = MotionUpdate::Finished;
            }
        }

        result
    }
}
