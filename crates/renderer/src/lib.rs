//! Renderer crate for shaderloop.
//!
//! The module owns the full-screen shader pass end to end: GPU context and
//! pipeline setup, the per-frame uniform block, the frame clock that paces
//! redraw requests, and the gate that serializes CPU buffer writes against
//! GPU completion. The overall flow is:
//!
//! ```text
//!   shaderloop CLI
//!          │ window + event loop
//!          ▼
//!   FrameClock tick ──▶ request_redraw ──▶ GpuState::render_frame()
//!                                                 │
//!                 surface check ─▶ gate ─▶ FrameTimer ─▶ uniform upload ─▶ draw
//!                                   ▲                                       │
//!                                   └────── on_submitted_work_done ◀────────┘
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, pipeline, vertex and
//! uniform buffers) for its whole lifetime; the binary crate is a thin host
//! that forwards redraw signals and surface-size changes.

mod clock;
mod gpu;
mod timing;

pub use clock::{FrameClock, FRAME_INTERVAL};
pub use gpu::{FrameError, FrameGate, GpuState};
pub use timing::FrameTimer;
