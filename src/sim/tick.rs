//! Simulation tick
//!
//! One tick = integrate the intent into a candidate position, then let the
//! resolver push it out of walls. Runs once per loop iteration with the real
//! elapsed dt; the render cadence is gated separately by `FrameClock`.

use super::collision::resolve;
use super::grid::OccupancyGrid;
use super::movement::integrate;
use super::state::SimState;

/// Advance the simulation by `dt` seconds against an immutable grid
pub fn tick(state: &mut SimState, grid: &OccupancyGrid, speed: f32, radius: f32, dt: f32) {
    state.time_seconds += dt as f64;

    if dt == 0.0 || state.intent.is_zero() {
        return;
    }

    let candidate = integrate(state.position, state.intent, state.heading, speed, dt);
    state.position = resolve(candidate, radius, grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{IntentAxis, IntentDelta};
    use glam::Vec2;

    fn open_grid() -> OccupancyGrid {
        OccupancyGrid::from_cells(16, 16, vec![0.0; 256])
    }

    #[test]
    fn zero_intent_leaves_position_untouched_for_any_dt() {
        let grid = open_grid();
        let mut state = SimState::new(Vec2::new(8.0, 8.0));
        for dt in [0.0, 0.001, 0.5, 2.0] {
            tick(&mut state, &grid, 4.0, 0.3, dt);
            assert_eq!(state.position, Vec2::new(8.0, 8.0));
        }
    }

    #[test]
    fn zero_dt_leaves_position_untouched_with_intent() {
        let grid = open_grid();
        let mut state = SimState::new(Vec2::new(8.0, 8.0));
        state
            .intent
            .apply(IntentDelta::new(IntentAxis::Forward, 1), true);
        tick(&mut state, &grid, 4.0, 0.3, 0.0);
        assert_eq!(state.position, Vec2::new(8.0, 8.0));
    }

    #[test]
    fn forward_tick_moves_and_walls_stop_it() {
        // Wall directly ahead (+y); the resolver pins the player a radius
        // short of its face.
        let mut cells = vec![0.0f32; 256];
        cells[10 * 16 + 8] = 1.0; // cell (8, 10)
        let grid = OccupancyGrid::from_cells(16, 16, cells);

        let mut state = SimState::new(Vec2::new(8.5, 9.5));
        state
            .intent
            .apply(IntentDelta::new(IntentAxis::Forward, 1), true);
        tick(&mut state, &grid, 4.0, 0.3, 0.1);

        assert_eq!(state.position.x, 8.5);
        assert!((state.position.y - (10.0 - 0.3)).abs() < 1e-5);
    }

    #[test]
    fn tick_accumulates_simulated_time() {
        let grid = open_grid();
        let mut state = SimState::new(Vec2::new(8.0, 8.0));
        tick(&mut state, &grid, 4.0, 0.3, 0.25);
        tick(&mut state, &grid, 4.0, 0.3, 0.25);
        assert!((state.time_seconds - 0.5).abs() < 1e-9);
    }
}
