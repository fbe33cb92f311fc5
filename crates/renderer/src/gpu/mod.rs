//! GPU orchestration for the full-screen pass.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `geometry` holds the six-vertex table covering clip space.
//! - `pipeline` builds the render pipeline from the embedded WGSL module and
//!   allocates the vertex and uniform device buffers.
//! - `uniforms` mirrors the uniform block declared by the fragment stage and
//!   is written through the queue each frame.
//! - `gate` is the one-permit primitive capping GPU frames in flight.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by the host event loop.

mod context;
mod gate;
mod geometry;
mod pipeline;
mod state;
mod uniforms;

pub use gate::FrameGate;
pub use state::{FrameError, GpuState};
