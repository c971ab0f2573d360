//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - No platform, window, or GPU dependencies
//! - Seeded RNG only (the grid seed decides everything)
//! - One owner: the platform loop holds `SimState` and the grid, and every
//!   operation takes them by reference - no statics
//!
//! The GPU generator in `renderer` mirrors `grid::generate` cell for cell;
//! if the hash or lattice layout changes here, the WGSL must change with it.

pub mod clock;
pub mod collision;
pub mod grid;
pub mod input;
pub mod movement;
pub mod rotor;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::resolve;
pub use grid::OccupancyGrid;
pub use input::{IntentAxis, IntentDelta, MovementIntent};
pub use movement::integrate;
pub use rotor::Rotor;
pub use state::SimState;
pub use tick::tick;
