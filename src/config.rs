//! Runtime tuning knobs
//!
//! One explicit bundle handed to `platform::run` instead of scattered
//! constants. Nothing here is read from or written to disk.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Window title
    pub title: String,
    /// Initial window size (logical pixels)
    pub width: u32,
    pub height: u32,

    /// Render cadence in frames per second
    pub target_fps: f32,
    /// Movement speed in cells per second
    pub move_speed: f32,
    /// Player collision circle radius in cells
    pub player_radius: f32,
    /// Mouse turn rate in radians per (pixel / framebuffer width)
    pub mouse_sensitivity: f32,

    /// Grid seed; `None` draws one from OS entropy at startup
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Raywalk".to_string(),
            width: 800,
            height: 600,
            target_fps: TARGET_FPS,
            move_speed: MOVE_SPEED,
            player_radius: PLAYER_RADIUS,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            seed: None,
        }
    }
}
