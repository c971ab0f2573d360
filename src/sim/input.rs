//! Movement intent
//!
//! Held-key state is folded into one intent vector through a uniform
//! press/release contract: a key binding is an `IntentDelta` (axis + sign)
//! added on press and subtracted on release. Opposing keys cancel instead of
//! fighting, and there is no per-key inverse logic to keep in sync.

use serde::{Deserialize, Serialize};

/// Which intent axis a key drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentAxis {
    /// Sideways, along the heading's right vector
    Strafe,
    /// Along the heading's forward vector
    Forward,
}

/// The contribution of one key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDelta {
    pub axis: IntentAxis,
    /// +1 or -1
    pub sign: i8,
}

impl IntentDelta {
    pub const fn new(axis: IntentAxis, sign: i8) -> Self {
        Self { axis, sign }
    }
}

/// Accumulated movement intent. With one key bound per direction each axis
/// stays in {-1, 0, +1}; it persists across ticks until key state changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    strafe: i8,
    forward: i8,
}

impl MovementIntent {
    /// Fold a key transition into the intent
    pub fn apply(&mut self, delta: IntentDelta, pressed: bool) {
        let signed = if pressed { delta.sign } else { -delta.sign };
        match delta.axis {
            IntentAxis::Strafe => self.strafe += signed,
            IntentAxis::Forward => self.forward += signed,
        }
    }

    pub fn strafe(&self) -> f32 {
        self.strafe as f32
    }

    pub fn forward(&self) -> f32 {
        self.forward as f32
    }

    pub fn is_zero(&self) -> bool {
        self.strafe == 0 && self.forward == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FWD: IntentDelta = IntentDelta::new(IntentAxis::Forward, 1);
    const BACK: IntentDelta = IntentDelta::new(IntentAxis::Forward, -1);
    const RIGHT: IntentDelta = IntentDelta::new(IntentAxis::Strafe, 1);

    #[test]
    fn press_then_release_returns_to_zero() {
        let mut intent = MovementIntent::default();
        intent.apply(FWD, true);
        assert_eq!(intent.forward(), 1.0);
        intent.apply(FWD, false);
        assert!(intent.is_zero());
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut intent = MovementIntent::default();
        intent.apply(FWD, true);
        intent.apply(BACK, true);
        assert_eq!(intent.forward(), 0.0);
        // Releasing one side restores the other
        intent.apply(BACK, false);
        assert_eq!(intent.forward(), 1.0);
    }

    #[test]
    fn axes_accumulate_independently() {
        let mut intent = MovementIntent::default();
        intent.apply(FWD, true);
        intent.apply(RIGHT, true);
        assert_eq!(intent.forward(), 1.0);
        assert_eq!(intent.strafe(), 1.0);
        intent.apply(FWD, false);
        assert_eq!(intent.forward(), 0.0);
        assert_eq!(intent.strafe(), 1.0);
    }
}
