//! Stepwise
//!
//! Algorithm step visualizer for the terminal. Records a textbook algorithm
//! once into an immutable history, then replays it step by step with
//! highlighted source lines and narration.
//!
//! - [`Session`]: the user-facing controls (run, pause/resume, step, reset,
//!   speed, algorithm and problem selection)
//! - [`StepwiseConfig`]: TOML configuration
//! - [`TextRenderer`]: plain-text rendering of steps
//!
//! # Example
//!
//! ```rust,ignore
//! use stepwise::{Session, StepwiseConfig, TextRenderer};
//!
//! let config = StepwiseConfig::new().with_seed(7);
//! let mut session = Session::new(config, TextRenderer::new(std::io::stdout()))?;
//! session.set_algorithm("merge-sort")?;
//! session.run()?;
//! session.wait_until_settled().await;
//! ```

#![warn(unreachable_pub)]

mod config;
mod error;
mod input;
pub mod logging;
mod render;
mod session;

pub use config::{ProblemConfig, StepwiseConfig, DEFAULT_SEED};
pub use error::{ConfigError, SessionError};
pub use input::{problem_from_values, InputError};
pub use render::TextRenderer;
pub use session::{ProblemContext, Session};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
