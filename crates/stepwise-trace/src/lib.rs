//! Stepwise Trace
//!
//! Write side of the recording pipeline: an instrumented algorithm runs once,
//! synchronously, against a [`Recorder`] and leaves behind an immutable
//! [`History`] of [`Step`]s plus its own result value.
//!
//! # Core Concepts
//!
//! - [`Step`]: one frozen snapshot of algorithm state with narration and
//!   highlighted source lines
//! - [`History`]: the ordered, immutable step sequence of one run
//! - [`Recorder`]: append-only builder that copies every snapshot it is given
//! - [`InstrumentedAlgorithm`]: the contract every algorithm implements
//! - [`record`]: validate, execute, freeze
//!
//! # Example
//!
//! ```rust,ignore
//! use stepwise_trace::{record, InstrumentedAlgorithm};
//!
//! let (history, sorted) = record(&BubbleSort, &vec![5, 3, 4, 1])?;
//! assert_eq!(history.last().unwrap().snapshot().array, sorted);
//! ```

#![warn(unreachable_pub)]

mod algorithm;
mod error;
mod recorder;
mod step;

pub use algorithm::{record, InstrumentedAlgorithm};
pub use error::{AlgorithmError, TraceError, ValidationError};
pub use recorder::Recorder;
pub use step::{History, HistoryId, SourceLines, Step};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
