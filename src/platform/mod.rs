//! Platform layer
//!
//! winit application handler driving the whole session: window + GPU setup
//! and the blocking grid generation in `resumed`, then the single-threaded
//! poll -> tick -> gated-render loop. Fatal init errors are stashed on the
//! handler and surfaced by `run` after the event loop returns, so `main`
//! stays the one catch boundary.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::consts::{GRID_H, GRID_W};
use crate::error::{GpuError, RunError};
use crate::renderer::{RaycastRenderState, generate_grid};
use crate::sim::{FrameClock, IntentAxis, IntentDelta, OccupancyGrid, Rotor, SimState, tick};

/// Static key-binding table: one IntentDelta per key, applied on press and
/// inverted on release. Anything not listed is ignored.
const KEY_BINDINGS: &[(KeyCode, IntentDelta)] = &[
    (KeyCode::KeyW, IntentDelta::new(IntentAxis::Forward, 1)),
    (KeyCode::KeyS, IntentDelta::new(IntentAxis::Forward, -1)),
    (KeyCode::KeyD, IntentDelta::new(IntentAxis::Strafe, 1)),
    (KeyCode::KeyA, IntentDelta::new(IntentAxis::Strafe, -1)),
];

/// Cap on the pacing sleep so input handling never lags a full frame
const PACING_SLEEP_CAP: Duration = Duration::from_millis(2);

fn map_key(code: KeyCode) -> Option<IntentDelta> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == code)
        .map(|&(_, delta)| delta)
}

/// Run a full session. Returns when the window is closed or Escape is hit.
pub fn run(config: Config) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config,
        session: None,
        fatal: None,
    };
    event_loop.run_app(&mut app)?;

    match app.fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: Config,
    session: Option<Session>,
    fatal: Option<RunError>,
}

/// Everything a running session owns: the sim context, the immutable grid,
/// the clock, and the GPU state.
struct Session {
    window: Arc<Window>,
    render_state: RaycastRenderState,
    grid: OccupancyGrid,
    sim: SimState,
    clock: FrameClock,
    /// Radians per pixel; re-derived whenever the framebuffer size changes
    mouse_sensitivity: f32,
    last_cursor: Option<(f64, f64)>,
    move_speed: f32,
    player_radius: f32,
}

impl App {
    /// Window, GPU, one-shot generation, renderer - in that order. The
    /// generation readback is a synchronous barrier: the loop must not start
    /// without the map.
    fn init_session(&self, event_loop: &ActiveEventLoop) -> Result<Session, RunError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(GpuError::from)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| GpuError::Adapter(e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("raywalk-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .map_err(|e| GpuError::Device(e.to_string()))?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let started = Instant::now();
        let cells =
            generate_grid(&device, &queue, GRID_W, GRID_H, seed).map_err(GpuError::from)?;
        let grid = OccupancyGrid::from_cells(GRID_W, GRID_H, cells);
        log::info!("Grid generation took {:?}", started.elapsed());

        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = grid.find_spawn(&mut rng);
        log::info!("Spawning at ({:.1}, {:.1})", spawn.x, spawn.y);

        let render_state = RaycastRenderState::new(
            surface,
            &adapter,
            device,
            queue,
            size.width.max(1),
            size.height.max(1),
            &grid,
        );

        let sim = SimState::new(spawn);
        let clock = FrameClock::start(self.config.target_fps);
        let mouse_sensitivity = self.config.mouse_sensitivity / size.width.max(1) as f32;

        Ok(Session {
            window,
            render_state,
            grid,
            sim,
            clock,
            mouse_sensitivity,
            last_cursor: None,
            move_speed: self.config.move_speed,
            player_radius: self.config.player_radius,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.init_session(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            // Sleep off pacing slack instead of spinning; capped so queued
            // input is never stale by more than a couple of milliseconds.
            if let Some(slack) = session.clock.slack() {
                std::thread::sleep(slack.min(PACING_SLEEP_CAP));
            }
            session.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let session = match self.session.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let (w, h) = (physical_size.width, physical_size.height);
                if w > 0 && h > 0 {
                    session.render_state.resize(w, h);
                    session.mouse_sensitivity = self.config.mouse_sensitivity / w as f32;
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let code = match event.physical_key {
                    PhysicalKey::Code(code) => code,
                    PhysicalKey::Unidentified(_) => return,
                };
                let pressed = event.state == ElementState::Pressed;

                match code {
                    KeyCode::Escape if pressed => {
                        log::info!("Escape pressed, exiting.");
                        event_loop.exit();
                    }
                    KeyCode::F2 if pressed => match serde_json::to_string(&session.sim) {
                        Ok(json) => log::info!("Sim state: {json}"),
                        Err(e) => log::warn!("State dump failed: {e}"),
                    },
                    _ => {
                        // Unbound keys fall through silently
                        if let Some(delta) = map_key(code) {
                            session.sim.intent.apply(delta, pressed);
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                // First event only seeds the reference position
                if let Some((last_x, _)) = session.last_cursor {
                    let dx = (position.x - last_x) as f32;
                    session
                        .sim
                        .heading
                        .apply_delta(Rotor::from_angle(dx * session.mouse_sensitivity));
                }
                session.last_cursor = Some((position.x, position.y));
            }

            WindowEvent::RedrawRequested => {
                let dt = session.clock.begin_iteration(Instant::now());
                tick(
                    &mut session.sim,
                    &session.grid,
                    session.move_speed,
                    session.player_radius,
                    dt,
                );

                if session.clock.try_consume_render() {
                    match session.render_state.render(&session.sim) {
                        Ok(()) => session.sim.advance_frame(),
                        Err(wgpu::SurfaceError::Lost) => {
                            let (w, h) = session.render_state.size;
                            session.render_state.resize(w, h);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory!");
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_both_axes_in_both_directions() {
        let mut forward = 0i32;
        let mut strafe = 0i32;
        for &(_, delta) in KEY_BINDINGS {
            match delta.axis {
                IntentAxis::Forward => forward += delta.sign as i32,
                IntentAxis::Strafe => strafe += delta.sign as i32,
            }
        }
        // Each axis has a matched +1/-1 pair
        assert_eq!(forward, 0);
        assert_eq!(strafe, 0);
        assert_eq!(KEY_BINDINGS.len(), 4);
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert!(map_key(KeyCode::KeyQ).is_none());
        assert!(map_key(KeyCode::Space).is_none());
    }

    #[test]
    fn wasd_maps_to_expected_deltas() {
        assert_eq!(
            map_key(KeyCode::KeyW),
            Some(IntentDelta::new(IntentAxis::Forward, 1))
        );
        assert_eq!(
            map_key(KeyCode::KeyA),
            Some(IntentDelta::new(IntentAxis::Strafe, -1))
        );
    }
}
