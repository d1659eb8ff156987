//! GPU orchestration for the two-layer background.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `uniforms` holds the CPU mirrors of both layers' std140 uniform blocks.
//! - `pipeline` compiles the fixed GLSL programs into alpha-blended render
//!   pipelines sharing one uniform bind group layout.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`: one render pass per frame, peach drawn strictly before
//!   pink into the same framebuffer.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
