use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use renderer::{FrameClock, GpuState, FRAME_INTERVAL};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::{Fullscreen, WindowBuilder};

use crate::cli::Cli;

/// User event injected by the frame clock: a new frame may be drawn.
#[derive(Debug, Clone, Copy)]
struct RedrawTick;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let interval = interval_for(cli.fps);

    let event_loop = EventLoopBuilder::<RedrawTick>::with_user_event()
        .build()
        .map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let mut builder = WindowBuilder::new()
        .with_title("shaderloop")
        .with_inner_size(PhysicalSize::new(cli.width, cli.height));
    if cli.fullscreen {
        builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    let window = Arc::new(
        builder
            .build(&event_loop)
            .map_err(|err| anyhow!("failed to create window: {err}"))?,
    );

    let mut state = GpuState::new(window.as_ref(), window.inner_size())?;
    info!(
        width = state.size().width,
        height = state.size().height,
        interval_ms = interval.as_millis() as u64,
        "shaderloop started"
    );

    let proxy = event_loop.create_proxy();
    let mut clock = FrameClock::new(interval);
    clock.start(move || {
        // The proxy fails only once the event loop is gone; the clock is
        // stopped right after, so dropped ticks are harmless.
        let _ = proxy.send_event(RedrawTick);
    })?;

    let run_result = event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);
        match event {
            Event::UserEvent(RedrawTick) => {
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    clock.stop();
                    elwt.exit();
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                }
                WindowEvent::RedrawRequested => {
                    if let Err(err) = state.render_frame() {
                        match err.as_surface_error() {
                            Some(wgpu::SurfaceError::Lost) | Some(wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size());
                            }
                            Some(wgpu::SurfaceError::OutOfMemory) => {
                                error!("surface out of memory; exiting");
                                clock.stop();
                                elwt.exit();
                            }
                            Some(wgpu::SurfaceError::Timeout) => {
                                debug!("no presentable surface this cycle; skipping frame");
                            }
                            Some(other) => {
                                debug!(error = ?other, "transient surface error; skipping frame");
                            }
                            None => {}
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))
}

/// Maps the optional `--fps` override onto a tick interval; zero or negative
/// values fall back to the nominal 16 ms default.
fn interval_for(fps: Option<f32>) -> Duration {
    fps.filter(|fps| *fps > 0.0)
        .map(|fps| Duration::from_secs_f32(1.0 / fps))
        .unwrap_or(FRAME_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_is_sixteen_milliseconds() {
        assert_eq!(interval_for(None), Duration::from_millis(16));
    }

    #[test]
    fn fps_override_maps_to_interval() {
        assert_eq!(interval_for(Some(30.0)), Duration::from_secs_f32(1.0 / 30.0));
    }

    #[test]
    fn non_positive_fps_falls_back_to_default() {
        assert_eq!(interval_for(Some(0.0)), FRAME_INTERVAL);
        assert_eq!(interval_for(Some(-10.0)), FRAME_INTERVAL);
    }
}
