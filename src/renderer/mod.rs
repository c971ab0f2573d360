//! WebGPU rendering module
//!
//! Two pipelines: a one-shot compute pass that generates the occupancy grid
//! at startup (`generator`), and the per-frame fullscreen raycast pass
//! (`raycast_pipeline`).

pub mod generator;
pub mod raycast_pipeline;

pub use generator::generate_grid;
pub use raycast_pipeline::RaycastRenderState;
