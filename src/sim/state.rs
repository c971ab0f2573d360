//! Simulation state
//!
//! The single simulation-context structure: everything the renderer reads and
//! every tick mutates lives here, owned by the platform loop and passed by
//! reference. Serde derives exist for the debug state dump (F2), nothing is
//! persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::MovementIntent;
use super::rotor::Rotor;

/// Player + session state advanced by `tick`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Player position in grid-cell units
    pub position: Vec2,
    /// Player heading rotor, unit length
    pub heading: Rotor,
    /// Held-key movement intent
    pub intent: MovementIntent,
    /// Rendered-frame counter, wraps at u32::MAX
    pub frame: u32,
    /// Seconds simulated this session (diagnostic only)
    pub time_seconds: f64,
}

impl SimState {
    /// State at a spawn position, facing +y
    pub fn new(spawn: Vec2) -> Self {
        Self {
            position: spawn,
            heading: Rotor::IDENTITY,
            intent: MovementIntent::default(),
            frame: 0,
            time_seconds: 0.0,
        }
    }

    /// Count one presented frame
    pub fn advance_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }
}
