use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::compile::{PEACH_FRAGMENT_GLSL, PINK_FRAGMENT_GLSL};
use crate::lifecycle::FrameClock;
use crate::types::Antialiasing;

use super::context::GpuContext;
use super::pipeline::{LayerPipeline, PipelineLayouts};
use super::uniforms::{PeachUniforms, PinkUniforms};

/// The window clears to white so the peach layer's semi-transparent right
/// half blends against a light background, standing in for the page the
/// effect originally sat on.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Aggregates every GPU resource needed to present a frame.
///
/// Both layer pipelines are created once per mount and live until the whole
/// state is dropped; only their uniform values change afterwards. Each frame
/// records a single render pass that draws the peach layer strictly before
/// the pink layer, because pink is composited on top.
pub(crate) struct GpuState {
    context: GpuContext,
    peach: LayerPipeline,
    pink: LayerPipeline,
    peach_uniforms: PeachUniforms,
    pink_uniforms: PinkUniforms,
    clock: FrameClock,
    multisample_target: Option<MultisampleTarget>,
    last_stats: Instant,
    frames_since_stats: u32,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        antialiasing: Antialiasing,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size, antialiasing)?;
        let layouts = PipelineLayouts::new(&context.device)?;

        let peach = LayerPipeline::new(
            &context.device,
            &layouts,
            context.surface_format,
            context.sample_count,
            "peach layer",
            PEACH_FRAGMENT_GLSL,
            std::mem::size_of::<PeachUniforms>() as u64,
        )?;
        let pink = LayerPipeline::new(
            &context.device,
            &layouts,
            context.surface_format,
            context.sample_count,
            "pink layer",
            PINK_FRAGMENT_GLSL,
            std::mem::size_of::<PinkUniforms>() as u64,
        )?;

        let multisample_target = MultisampleTarget::for_context(&context);
        let size = context.size;

        Ok(Self {
            context,
            peach,
            pink,
            peach_uniforms: PeachUniforms::new(size.width, size.height),
            pink_uniforms: PinkUniforms::new(size.width, size.height),
            clock: FrameClock::new(),
            multisample_target,
            last_stats: Instant::now(),
            frames_since_stats: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reacts to a viewport change: the swapchain and both resolution
    /// uniforms update together within this call, so no frame ever observes
    /// a half-updated viewport. Time and pointer state are untouched.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.multisample_target = MultisampleTarget::for_context(&self.context);

        let size = self.context.size;
        self.peach_uniforms
            .set_resolution(size.width as f32, size.height as f32);
        self.pink_uniforms
            .set_resolution(size.width as f32, size.height as f32);
    }

    /// Records and submits one frame.
    ///
    /// Order within the frame: advance both synthetic times, write the
    /// smoothed pointer into the pink block, upload both uniform blocks,
    /// then draw peach followed by pink into the same target.
    pub(crate) fn render(&mut self, pointer: [f32; 2]) -> Result<(), wgpu::SurfaceError> {
        self.clock.advance();
        self.peach_uniforms.set_time(self.clock.peach_time());
        self.pink_uniforms.set_time(self.clock.pink_time());
        self.pink_uniforms.set_pointer(pointer);

        self.peach
            .write_uniforms(&self.context.queue, bytemuck::bytes_of(&self.peach_uniforms));
        self.pink
            .write_uniforms(&self.context.queue, bytemuck::bytes_of(&self.pink_uniforms));

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("layer encoder"),
                });

        let (attachment_view, resolve_target) = match &self.multisample_target {
            Some(msaa) => (&msaa.view, Some(&view)),
            None => (&view, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("layer pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    depth_slice: None,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Back-to-front: peach first, pink composites over it.
            render_pass.set_pipeline(&self.peach.pipeline);
            render_pass.set_bind_group(0, &self.peach.uniform_bind_group, &[]);
            render_pass.draw(0..3, 0..1);

            render_pass.set_pipeline(&self.pink.pipeline);
            render_pass.set_bind_group(0, &self.pink.uniform_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.frames_since_stats += 1;
        let now = Instant::now();
        if now.duration_since(self.last_stats) >= Duration::from_secs(1) {
            tracing::debug!(
                frames = self.frames_since_stats,
                time = self.clock.pink_time(),
                pointer_x = pointer[0],
                pointer_y = pointer[1],
                width = self.context.size.width,
                height = self.context.size.height,
                "frame stats"
            );
            self.last_stats = now;
            self.frames_since_stats = 0;
        }

        Ok(())
    }
}

/// Off-screen color target used when MSAA is enabled; resolved into the
/// swapchain texture at the end of the pass.
struct MultisampleTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl MultisampleTarget {
    fn for_context(context: &GpuContext) -> Option<Self> {
        if context.sample_count <= 1 {
            return None;
        }
        Some(Self::new(
            &context.device,
            context.surface_format,
            context.size,
            context.sample_count,
        ))
    }

    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color target"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
