use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::timing::FrameTimer;

use super::context::GpuContext;
use super::gate::FrameGate;
use super::geometry::FULLSCREEN_VERTICES;
use super::pipeline::RenderResources;
use super::uniforms::ShaderUniforms;

/// Per-frame render failure.
///
/// A transiently absent surface is the only recoverable runtime error; the
/// host event loop decides whether to reconfigure, skip, or exit.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

impl FrameError {
    pub fn as_surface_error(&self) -> Option<&wgpu::SurfaceError> {
        match self {
            FrameError::Surface(err) => Some(err),
        }
    }
}

/// Owns every GPU resource for the full-screen pass plus the frame timer
/// and the one-frame-in-flight gate.
pub struct GpuState {
    context: GpuContext,
    resources: RenderResources,
    uniforms: ShaderUniforms,
    timer: FrameTimer,
    gate: FrameGate,
    last_fps_update: Instant,
    frames_since_last_update: u32,
}

impl fmt::Debug for GpuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuState")
            .field("size", &self.context.size)
            .field("uniforms", &self.uniforms)
            .finish_non_exhaustive()
    }
}

impl GpuState {
    /// Builds the GPU context, pipeline, and device buffers.
    ///
    /// Every failure here stems from static misconfiguration (no adapter,
    /// unresolvable shader entry point, pipeline compile error) and aborts
    /// startup; a retry would not change the outcome.
    pub fn new<T>(target: &T, initial_size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        let resources = RenderResources::new(&context.device, context.surface_format)?;

        let uniforms = ShaderUniforms::new(context.size.width, context.size.height);
        write_uniforms(&context.queue, &resources.uniform_buffer, &uniforms);

        Ok(Self {
            context,
            resources,
            uniforms,
            timer: FrameTimer::new(),
            gate: FrameGate::new(),
            last_fps_update: Instant::now(),
            frames_since_last_update: 0,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.uniforms.set_resolution(new_size.width, new_size.height);
    }

    /// Draws one frame.
    ///
    /// The surface texture is obtained before the gate is touched, so a
    /// transiently absent surface skips the frame without stranding the
    /// permit.
    pub fn render_frame(&mut self) -> Result<(), FrameError> {
        let frame = self
            .context
            .surface
            .get_current_texture()
            .map_err(FrameError::Surface)?;

        // Blocks until the previous frame's GPU work completes: the uniform
        // buffer must not be overwritten while the GPU may still read it.
        // The release callback only fires while the device is maintained,
        // so the wait drives a blocking poll instead of parking the thread.
        let device = &self.context.device;
        self.gate.acquire_with(|| {
            let _ = device.poll(wgpu::PollType::Wait);
        });

        let now = Instant::now();
        let delta = self.timer.advance(now);
        self.uniforms
            .set_resolution(self.context.size.width, self.context.size.height);
        self.uniforms.set_time(self.timer.elapsed_seconds());
        write_uniforms(
            &self.context.queue,
            &self.resources.uniform_buffer,
            &self.uniforms,
        );

        self.frames_since_last_update += 1;
        let since_fps_update = now.saturating_duration_since(self.last_fps_update);
        if since_fps_update >= Duration::from_secs(1) {
            let fps = self.frames_since_last_update as f32 / since_fps_update.as_secs_f32();
            self.frames_since_last_update = 0;
            self.last_fps_update = now;
            debug!(
                fps = fps.round(),
                time = self.uniforms.time,
                delta_us = delta.as_micros() as u64,
                "render stats"
            );
        }

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.resources.pipeline);
            render_pass.set_bind_group(0, &self.resources.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.resources.vertex_buffer.slice(..));
            render_pass.draw(0..FULLSCREEN_VERTICES.len() as u32, 0..1);
        }
        self.context.queue.submit(std::iter::once(encoder.finish()));

        // The permit returns once the GPU reports the submission finished,
        // possibly from a runtime-owned thread.
        let gate = self.gate.clone();
        self.context.queue.on_submitted_work_done(move || {
            gate.release();
        });

        frame.present();
        Ok(())
    }
}

fn write_uniforms(queue: &wgpu::Queue, buffer: &wgpu::Buffer, uniforms: &ShaderUniforms) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(uniforms));
}
