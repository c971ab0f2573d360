//! Error taxonomy
//!
//! Everything here is fatal: errors propagate to `main`, which logs them and
//! exits non-zero. Recoverable conditions (shader compile diagnostics, lost
//! surfaces) are logged where they occur and never reach these types.

use thiserror::Error;

/// Failures of the one-shot occupancy grid generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The compute shader or pipeline failed validation on the device.
    #[error("grid generation pipeline rejected: {0}")]
    Validation(String),

    /// The device refused to map the staging buffer back to host memory.
    #[error("grid readback mapping failed: {0}")]
    Map(String),

    /// The device wedged while waiting for the generation submission.
    #[error("device poll failed during grid readback: {0}")]
    Poll(String),

    /// Readback returned fewer cells than the grid dimensions require.
    #[error("grid readback truncated: got {got} cells, expected {expected}")]
    Truncated { got: usize, expected: usize },
}

/// GPU/backend initialization failures.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("device request failed: {0}")]
    Device(String),

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Top-level session failures surfaced by `platform::run`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Gpu(#[from] GpuError),
}
