//! Error types for playback

use crate::mode::{Command, PlaybackMode};

/// Renderer failure
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer rejected the step
    #[error("render failed: {0}")]
    Failed(String),

    /// Writing to the output failed
    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer panicked
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

/// Playback controller errors
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// Command is not valid in the current mode
    #[error("cannot {command} while {mode}")]
    InvalidCommand {
        /// Rejected command
        command: Command,
        /// Mode at the time
        mode: PlaybackMode,
    },

    /// Start was requested on an empty history
    #[error("nothing to run")]
    NothingToRun,

    /// Requested speed is outside the configured range
    #[error("speed {requested} outside {min}..={max}")]
    SpeedOutOfRange {
        /// Requested speed
        requested: u8,
        /// Slowest speed
        min: u8,
        /// Fastest speed
        max: u8,
    },

    /// Playback settings are inconsistent
    #[error("invalid playback config: {0}")]
    InvalidConfig(String),

    /// The renderer failed; the cursor stays on the last rendered step
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Controller created outside a tokio runtime
    #[error("playback requires a tokio runtime")]
    NoRuntime,
}

impl PlaybackError {
    /// Whether the controller is still usable after this error
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PlaybackError::NoRuntime | PlaybackError::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_message_names_mode() {
        let err = PlaybackError::InvalidCommand {
            command: Command::Pause,
            mode: PlaybackMode::Idle,
        };
        assert_eq!(err.to_string(), "cannot pause while idle");
        assert!(err.is_recoverable());
    }

    #[test]
    fn render_errors_are_transparent() {
        let err = PlaybackError::from(RenderError::Failed("canvas gone".into()));
        assert_eq!(err.to_string(), "render failed: canvas gone");
        assert!(!PlaybackError::NoRuntime.is_recoverable());
    }
}
