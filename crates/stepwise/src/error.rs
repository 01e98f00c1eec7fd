//! Error types for sessions and configuration

use std::path::PathBuf;
use stepwise_algorithms::{AlgorithmKind, SizeLimits, UnknownAlgorithm};
use stepwise_playback::PlaybackError;
use stepwise_trace::TraceError;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Playback section is inconsistent
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// Any other inconsistent value
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Recording failed; the controller holds an empty history
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// A playback command was rejected or rendering failed
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// Algorithm name not in the catalog
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),

    /// Problem size outside what the algorithm accepts
    #[error("size {size} out of range for {algorithm} (expected {limits})")]
    SizeOutOfRange {
        /// Selected algorithm
        algorithm: AlgorithmKind,
        /// Requested size
        size: usize,
        /// Accepted sizes
        limits: SizeLimits,
    },

    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Whether the session is still usable after this error
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Trace(e) => e.is_recoverable(),
            SessionError::Playback(e) => e.is_recoverable(),
            SessionError::UnknownAlgorithm(_) | SessionError::SizeOutOfRange { .. } => true,
            SessionError::Config(_) => false,
        }
    }
}
