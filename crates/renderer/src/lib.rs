//! Renderer crate for blushwall.
//!
//! Draws a perpetual two-layer animated background: a peach sine-wave layer
//! confined to the right half of the viewport, composited beneath a
//! pointer-reactive pink gradient with a top-left glow and a whitening
//! vignette. The overall flow is:
//!
//! ```text
//!   CLI / blushwall
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ window::run ──▶ winit event loop ──▶ render()
//!          ▲                │                    │
//!          │        CursorMoved/Resized          └─▶ FrameClock + PointerTracker ─▶ GPU UBOs
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, both layer pipelines,
//! uniform buffers) for the lifetime of one mount; `window` glues it to the
//! host event loop and tears everything down when the window closes. Both
//! fragment programs are fixed GLSL compiled at mount time, parameterised by
//! `u_resolution`, `u_time` and (pink only) `u_mouse`.

mod compile;
mod gpu;
mod lifecycle;
mod pointer;
mod types;
mod window;

use anyhow::Result;

pub use types::{Antialiasing, RendererConfig};

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives inside the `window` and `gpu` modules; `Renderer`
/// simply forwards the request into the windowed run loop.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the render loop until the window closes.
    ///
    /// Returns an error when mounting fails: no suitable GPU adapter, surface
    /// creation failure, or a shader that does not compile. Those are fatal;
    /// the caller restarts the whole lifecycle to recover.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config)
    }
}
