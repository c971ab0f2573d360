//! Movement integration
//!
//! Turns intent + heading into a candidate position for the collision
//! resolver. The combined direction is normalized so a diagonal is no faster
//! than an axis move; zero intent or zero dt leaves the position untouched.

use glam::Vec2;

use super::input::MovementIntent;
use super::rotor::Rotor;

/// Integrate one step: `position + normalize(intent in heading frame) * speed * dt`
#[inline]
pub fn integrate(
    position: Vec2,
    intent: MovementIntent,
    heading: Rotor,
    speed: f32,
    dt: f32,
) -> Vec2 {
    let raw = intent.strafe() * heading.right() + intent.forward() * heading.forward();
    let movement = raw.normalize_or_zero();
    position + movement * speed * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{IntentAxis, IntentDelta};

    const TOL: f32 = 1e-5;

    fn intent(strafe: i8, forward: i8) -> MovementIntent {
        let mut i = MovementIntent::default();
        if strafe != 0 {
            i.apply(IntentDelta::new(IntentAxis::Strafe, strafe), true);
        }
        if forward != 0 {
            i.apply(IntentDelta::new(IntentAxis::Forward, forward), true);
        }
        i
    }

    #[test]
    fn forward_under_identity_heading_moves_plus_y() {
        // heading (1,0), intent (0,1), dt 0.5, speed 4.0 -> displacement (0,2)
        let pos = Vec2::new(3.0, 3.0);
        let out = integrate(pos, intent(0, 1), Rotor::IDENTITY, 4.0, 0.5);
        assert!((out.x - 3.0).abs() < TOL);
        assert!((out.y - 5.0).abs() < TOL);
    }

    #[test]
    fn zero_intent_is_exact_noop() {
        let pos = Vec2::new(7.25, -1.5);
        let out = integrate(pos, MovementIntent::default(), Rotor::from_angle(0.4), 4.0, 0.25);
        assert_eq!(out, pos);
    }

    #[test]
    fn zero_dt_is_exact_noop() {
        let pos = Vec2::new(2.0, 2.0);
        let out = integrate(pos, intent(1, 1), Rotor::IDENTITY, 4.0, 0.0);
        assert_eq!(out, pos);
    }

    #[test]
    fn diagonal_is_not_faster() {
        // intent (1,1) under identity heading normalizes to (0.707, 0.707);
        // displacement magnitude equals speed * dt, not speed * dt * sqrt(2)
        let speed = 4.0;
        let dt = 1.0;
        let out = integrate(Vec2::ZERO, intent(1, 1), Rotor::IDENTITY, speed, dt);
        assert!((out.length() - speed * dt).abs() < TOL);
        assert!((out.x - out.y).abs() < TOL);
    }

    #[test]
    fn strafe_follows_the_heading_right_vector() {
        let heading = Rotor::from_angle(std::f32::consts::FRAC_PI_2);
        let out = integrate(Vec2::ZERO, intent(1, 0), heading, 1.0, 1.0);
        let right = heading.right();
        assert!((out.x - right.x).abs() < TOL);
        assert!((out.y - right.y).abs() < TOL);
    }
}
