//! Core configuration.

use serde::{Deserialize, Serialize};

/// Host-supplied defaults applied when wrapping clips into motions.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Fade length used when a clip carries no fade metadata of its own.
    pub default_fade_seconds: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_fade_seconds: 1.0,
        }
    }
}
