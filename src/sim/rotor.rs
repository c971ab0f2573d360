//! 2D rotor orientation
//!
//! The player heading is a unit rotor (a, b) rather than an angle: composing
//! two rotors adds their represented angles without periodic wraparound, and
//! incremental mouse updates stay numerically cheap. Renormalizing after every
//! composition keeps drift below floating tolerance.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D rotor. Unit length is an invariant for headings; `apply_delta`
/// restores it after every composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotor {
    pub a: f32,
    pub b: f32,
}

impl Rotor {
    /// The identity rotation
    pub const IDENTITY: Rotor = Rotor { a: 1.0, b: 0.0 };

    /// Rotor rotating by `angle` radians (half-angle encoding)
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let half = angle * 0.5;
        Self {
            a: half.cos(),
            b: half.sin(),
        }
    }

    /// Rotor composition: (a,b)∘(c,d) = (ac−bd, ad+bc)
    #[inline]
    pub fn compose(self, other: Rotor) -> Rotor {
        Rotor {
            a: self.a * other.a - self.b * other.b,
            b: self.a * other.b + self.b * other.a,
        }
    }

    /// The reverse (conjugate) rotor, undoing this rotation
    #[inline]
    pub fn reverse(self) -> Rotor {
        Rotor {
            a: self.a,
            b: -self.b,
        }
    }

    /// Unit-length copy. The zero rotor stays zero rather than going NaN;
    /// a valid heading never hits that branch.
    #[inline]
    pub fn normalized(self) -> Rotor {
        let len_sq = self.a * self.a + self.b * self.b;
        if len_sq == 0.0 {
            return Rotor { a: 0.0, b: 0.0 };
        }
        let inv = 1.0 / len_sq.sqrt();
        Rotor {
            a: self.a * inv,
            b: self.b * inv,
        }
    }

    /// Compose `delta` onto this heading, then renormalize
    #[inline]
    pub fn apply_delta(&mut self, delta: Rotor) {
        *self = self.compose(delta).normalized();
    }

    /// Unit forward vector: (0, 1) rotated by this rotor, closed form
    #[inline]
    pub fn forward(self) -> Vec2 {
        Vec2::new(2.0 * self.a * self.b, self.a * self.a - self.b * self.b)
    }

    /// Unit right vector: forward rotated -90°
    #[inline]
    pub fn right(self) -> Vec2 {
        let f = self.forward();
        Vec2::new(f.y, -f.x)
    }
}

impl Default for Rotor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOL: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOL
    }

    #[test]
    fn identity_is_left_and_right_identity() {
        let r = Rotor::from_angle(0.73);
        let left = Rotor::IDENTITY.compose(r);
        let right = r.compose(Rotor::IDENTITY);
        assert!(close(left.a, r.a) && close(left.b, r.b));
        assert!(close(right.a, r.a) && close(right.b, r.b));
    }

    #[test]
    fn reverse_composes_to_identity() {
        let r = Rotor::from_angle(1.9);
        let id = r.compose(r.reverse());
        assert!(close(id.a, 1.0));
        assert!(close(id.b, 0.0));
    }

    #[test]
    fn identity_heading_faces_plus_y() {
        let f = Rotor::IDENTITY.forward();
        assert!(close(f.x, 0.0));
        assert!(close(f.y, 1.0));
        let r = Rotor::IDENTITY.right();
        assert!(close(r.x, 1.0));
        assert!(close(r.y, 0.0));
    }

    #[test]
    fn zero_rotor_normalizes_to_zero() {
        let z = Rotor { a: 0.0, b: 0.0 }.normalized();
        assert_eq!(z.a, 0.0);
        assert_eq!(z.b, 0.0);
    }

    #[test]
    fn apply_delta_keeps_unit_length() {
        let mut heading = Rotor::IDENTITY;
        for _ in 0..10_000 {
            heading.apply_delta(Rotor::from_angle(0.013));
        }
        let len = heading.a * heading.a + heading.b * heading.b;
        assert!(close(len, 1.0));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(a in -10.0f32..10.0, b in -10.0f32..10.0) {
            prop_assume!(a != 0.0 || b != 0.0);
            let once = Rotor { a, b }.normalized();
            let twice = once.normalized();
            prop_assert!(close(once.a, twice.a));
            prop_assert!(close(once.b, twice.b));
        }

        #[test]
        fn composition_is_associative(
            x in -3.0f32..3.0,
            y in -3.0f32..3.0,
            z in -3.0f32..3.0,
        ) {
            let (r, s, t) = (Rotor::from_angle(x), Rotor::from_angle(y), Rotor::from_angle(z));
            let lhs = r.compose(s).compose(t);
            let rhs = r.compose(s.compose(t));
            prop_assert!(close(lhs.a, rhs.a));
            prop_assert!(close(lhs.b, rhs.b));
        }

        #[test]
        fn forward_is_unit_length(angle in -6.3f32..6.3) {
            let f = Rotor::from_angle(angle).forward();
            prop_assert!(close(f.length(), 1.0));
        }

        #[test]
        fn right_is_perpendicular_to_forward(angle in -6.3f32..6.3) {
            let r = Rotor::from_angle(angle);
            prop_assert!(close(r.forward().dot(r.right()), 0.0));
        }
    }
}
