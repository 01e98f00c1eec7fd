//! Stepwise Playback
//!
//! Read side of the pipeline: replays a recorded [`History`] one step at a
//! time through a [`Renderer`], under user control.
//!
//! # Architecture
//!
//! ```text
//! commands ──▶ PlaybackController ──lock──▶ PlaybackMachine ──▶ StepSink
//!                   │      ▲                       │              │
//!                   │      └──── tokio timer ◀─────┘ pending tick  ▼
//!                   └──▶ watch<PlaybackStatus>                 Renderer
//! ```
//!
//! - [`PlaybackMachine`]: every transition, with no clock and no threads
//! - [`PlaybackController`]: turns pending ticks into cancellable timers
//! - [`Renderer`]: the presentation seam
//!
//! # Guarantees
//!
//! - At most one tick is scheduled at any time; every tick carries a
//!   [`TickToken`] and the machine ignores tokens it did not issue last
//! - The cursor never exceeds the history length and only advances after a
//!   step rendered successfully
//! - Pause and reset cancel the pending tick before returning
//! - Reset is idempotent
//!
//! [`History`]: stepwise_trace::History

#![warn(unreachable_pub)]

mod config;
mod controller;
mod error;
mod machine;
mod mode;
mod renderer;
mod speed;
mod status;

pub use config::PlaybackConfig;
pub use controller::PlaybackController;
pub use error::{PlaybackError, RenderError};
pub use machine::{PendingTick, PlaybackMachine, StepSink, TickOutcome, TickToken};
pub use mode::{accepts, allowed_transitions, is_allowed, Command, PlaybackMode};
pub use renderer::{RenderSink, Renderer};
pub use speed::{Speed, SpeedRange};
pub use status::PlaybackStatus;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
