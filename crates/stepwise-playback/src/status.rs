//! Observable controller state

use crate::mode::PlaybackMode;
use serde::Serialize;
use stepwise_trace::HistoryId;

/// Snapshot of a controller, published after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    /// History being played
    pub history_id: HistoryId,
    /// Current mode
    pub mode: PlaybackMode,
    /// Steps delivered so far
    pub cursor: usize,
    /// Total steps in the history
    pub len: usize,
    /// Current speed
    pub speed: u8,
    /// Message of the last failed command or tick, cleared by the next success
    pub last_error: Option<String>,
}

impl PlaybackStatus {
    /// Whether ticks are still being delivered
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.mode == PlaybackMode::Running
    }

    /// Whether every step has been delivered
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.mode == PlaybackMode::Finished
    }
}
