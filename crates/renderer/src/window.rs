use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::lifecycle::LoopPhase;
use crate::pointer::PointerTracker;
use crate::types::RendererConfig;

/// Aggregates everything one mount owns: the window handle, the GPU
/// resources, and the pointer tracker feeding the pink layer.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    pointer: PointerTracker,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, config.antialiasing)?;

        Ok(Self {
            window,
            gpu,
            pointer: PointerTracker::new(),
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.pointer.handle_cursor_moved(position, self.gpu.size());
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let pointer = self.pointer.advance();
        self.gpu.render(pointer)
    }
}

/// Mounts the window, runs the render loop until the window closes, and
/// tears everything down on exit.
///
/// winit delivers events one by one; the loop renders on `RedrawRequested`
/// and schedules the next frame from `AboutToWait`, so exactly one frame is
/// in flight per display refresh. All rendering and rescheduling is gated on
/// the loop phase: once teardown flips it to `Stopped`, a late queued redraw
/// is dropped rather than drawn.
pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("blushwall")
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), config)
        .context("failed to initialise renderer")?;

    let mut phase = LoopPhase::Uninitialized;
    phase.start();
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            // Drive redraws via vblank by waiting between events.
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            phase.stop();
                            elwt.exit();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            state.handle_cursor_moved(position);
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::ScaleFactorChanged {
                            mut inner_size_writer,
                            ..
                        } => {
                            // Keep the current physical size when the scale factor changes.
                            let _ = inner_size_writer.request_inner_size(state.size());
                        }
                        WindowEvent::RedrawRequested => {
                            if !phase.is_running() {
                                return;
                            }
                            match state.render_frame() {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    state.resize(state.size());
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    tracing::error!("surface out of memory; exiting");
                                    phase.stop();
                                    elwt.exit();
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    tracing::warn!("surface timeout; retrying next frame");
                                }
                                Err(other) => {
                                    tracing::warn!("surface error: {other:?}; retrying next frame");
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Schedule the next frame once winit is about to wait again.
                    if phase.is_running() {
                        state.window().request_redraw();
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
