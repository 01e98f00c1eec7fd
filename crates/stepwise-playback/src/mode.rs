//! Playback modes and the transition table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// No run started for the current history
    #[default]
    Idle,
    /// Ticks are being delivered
    Running,
    /// Stopped part way, cursor frozen
    Paused,
    /// Every step has been delivered
    Finished,
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackMode::Idle => "idle",
            PlaybackMode::Running => "running",
            PlaybackMode::Paused => "paused",
            PlaybackMode::Finished => "finished",
        })
    }
}

/// User-facing playback commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Begin playback from the first step
    Start,
    /// Freeze the cursor
    Pause,
    /// Continue from the frozen cursor
    Resume,
    /// Advance exactly one step
    Step,
    /// Back to the pre-run state
    Reset,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Step => "step",
            Command::Reset => "reset",
        })
    }
}

/// Modes reachable from `from` in one transition
#[must_use]
pub fn allowed_transitions(from: PlaybackMode) -> Vec<PlaybackMode> {
    use PlaybackMode::{Finished, Idle, Paused, Running};
    match from {
        Idle => vec![Idle, Running, Paused, Finished],
        Running => vec![Idle, Running, Paused, Finished],
        Paused => vec![Idle, Running, Paused, Finished],
        Finished => vec![Idle, Running, Finished],
    }
}

/// Whether `from -> to` is a legal mode change
#[must_use]
pub fn is_allowed(from: PlaybackMode, to: PlaybackMode) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Modes in which `command` is accepted
#[must_use]
pub fn accepts(command: Command, mode: PlaybackMode) -> bool {
    match command {
        Command::Start => matches!(mode, PlaybackMode::Idle | PlaybackMode::Finished),
        Command::Pause => mode == PlaybackMode::Running,
        Command::Resume => mode == PlaybackMode::Paused,
        Command::Step | Command::Reset => true,
    }
}
