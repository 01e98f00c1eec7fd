//! Pure playback state machine
//!
//! [`PlaybackMachine`] owns the history, cursor, mode and speed and decides
//! every transition. It never sleeps or spawns: a transition that wants a
//! future tick leaves a [`PendingTick`] behind, and whoever drives the machine
//! is responsible for delivering it (or dropping it when it changes). Rendering
//! happens inside the transition through a [`StepSink`], so the cursor only
//! moves after a step was shown successfully.

use crate::error::{PlaybackError, RenderError};
use crate::mode::{accepts, is_allowed, Command, PlaybackMode};
use crate::speed::{Speed, SpeedRange};
use std::time::Duration;
use stepwise_trace::{History, HistoryId, Step};

/// Where rendered steps go
pub trait StepSink<S> {
    /// Present one step
    ///
    /// # Errors
    /// Any failure to present the step
    fn show(&mut self, step: &Step<S>) -> Result<(), RenderError>;

    /// Return to the pre-run view
    ///
    /// # Errors
    /// Any failure to redraw
    fn clear(&mut self) -> Result<(), RenderError>;
}

/// Identity of one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    /// History the tick belongs to
    pub history: HistoryId,
    /// Scheduling generation, bumped on every schedule
    pub generation: u64,
}

/// Tick the machine wants delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    /// Token to hand back to [`PlaybackMachine::tick`]
    pub token: TickToken,
    /// How long to wait before delivering it
    pub delay: Duration,
}

/// What a delivered tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token was not the pending one; nothing happened
    Stale,
    /// One step rendered, more remain
    Advanced {
        /// Cursor after the tick
        cursor: usize,
    },
    /// The last step was rendered
    Finished,
}

/// Playback state for one history
#[derive(Debug)]
pub struct PlaybackMachine<S> {
    history: History<S>,
    cursor: usize,
    mode: PlaybackMode,
    speed: Speed,
    speed_range: SpeedRange,
    base_delay: Duration,
    generation: u64,
    pending: Option<PendingTick>,
}

impl<S> PlaybackMachine<S> {
    /// Idle machine over an empty history
    #[must_use]
    pub fn new(speed: Speed, speed_range: SpeedRange, base_delay: Duration) -> Self {
        Self {
            history: History::empty(),
            cursor: 0,
            mode: PlaybackMode::Idle,
            speed,
            speed_range,
            base_delay,
            generation: 0,
            pending: None,
        }
    }

    /// Current history
    #[inline]
    #[must_use]
    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// Number of steps delivered
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Current speed
    #[inline]
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Speed bounds
    #[inline]
    #[must_use]
    pub fn speed_range(&self) -> SpeedRange {
        self.speed_range
    }

    /// Tick waiting to be delivered, if any
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Last step delivered, if any
    #[must_use]
    pub fn current_step(&self) -> Option<&Step<S>> {
        self.cursor.checked_sub(1).and_then(|i| self.history.get(i))
    }

    /// Replace the history and return to idle.
    ///
    /// # Errors
    /// The sink failed to redraw the pre-run view; the history is loaded anyway
    pub fn load(&mut self, history: History<S>, sink: &mut impl StepSink<S>) -> Result<(), RenderError> {
        self.cancel();
        tracing::debug!(history = %history.id(), steps = history.len(), "history loaded");
        self.history = history;
        self.cursor = 0;
        self.set_mode(PlaybackMode::Idle);
        sink.clear()
    }

    /// Start (or replay) from the first step.
    ///
    /// The first tick is due immediately.
    ///
    /// # Errors
    /// - [`PlaybackError::InvalidCommand`] unless idle or finished
    /// - [`PlaybackError::NothingToRun`] on an empty history
    /// - [`PlaybackError::Render`] if clearing a finished replay fails
    pub fn start(&mut self, sink: &mut impl StepSink<S>) -> Result<(), PlaybackError> {
        self.require(Command::Start)?;
        if self.history.is_empty() {
            return Err(PlaybackError::NothingToRun);
        }
        if self.mode == PlaybackMode::Finished {
            sink.clear()?;
        }
        self.cancel();
        self.cursor = 0;
        self.set_mode(PlaybackMode::Running);
        self.schedule(Duration::ZERO);
        Ok(())
    }

    /// Freeze the cursor.
    ///
    /// # Errors
    /// [`PlaybackError::InvalidCommand`] unless running
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.require(Command::Pause)?;
        self.cancel();
        self.set_mode(PlaybackMode::Paused);
        Ok(())
    }

    /// Continue from the frozen cursor at the current speed.
    ///
    /// The last delivered step is redrawn first.
    ///
    /// # Errors
    /// - [`PlaybackError::InvalidCommand`] unless paused
    /// - [`PlaybackError::Render`] if the redraw fails (stays paused)
    pub fn resume(&mut self, sink: &mut impl StepSink<S>) -> Result<(), PlaybackError> {
        self.require(Command::Resume)?;
        if let Some(step) = self.current_step() {
            sink.show(step)?;
        }
        self.set_mode(PlaybackMode::Running);
        self.schedule(self.speed.delay(self.base_delay));
        Ok(())
    }

    /// Pause when running, resume when paused, otherwise start.
    ///
    /// # Errors
    /// Whatever the chosen command returns
    pub fn pause_or_resume(&mut self, sink: &mut impl StepSink<S>) -> Result<Command, PlaybackError> {
        match self.mode {
            PlaybackMode::Running => self.pause().map(|()| Command::Pause),
            PlaybackMode::Paused => self.resume(sink).map(|()| Command::Resume),
            PlaybackMode::Idle | PlaybackMode::Finished => self.start(sink).map(|()| Command::Start),
        }
    }

    /// Deliver exactly one step and stop.
    ///
    /// Cancels any pending tick first, so a step racing a tick can never
    /// advance twice. At the end of the history this is a no-op.
    ///
    /// # Errors
    /// - [`PlaybackError::NothingToRun`] on an empty history
    /// - [`PlaybackError::Render`] if the step could not be shown; the cursor
    ///   does not move and the machine is left paused
    pub fn step(&mut self, sink: &mut impl StepSink<S>) -> Result<(), PlaybackError> {
        if self.history.is_empty() {
            return Err(PlaybackError::NothingToRun);
        }
        self.cancel();
        let Some(step) = self.history.get(self.cursor) else {
            tracing::debug!(cursor = self.cursor, "step at end of history ignored");
            return Ok(());
        };
        if let Err(e) = sink.show(step) {
            self.set_mode(PlaybackMode::Paused);
            return Err(e.into());
        }
        self.cursor += 1;
        let next = if self.cursor == self.history.len() {
            PlaybackMode::Finished
        } else {
            PlaybackMode::Paused
        };
        self.set_mode(next);
        Ok(())
    }

    /// Deliver a scheduled tick.
    ///
    /// A token other than the pending one is ignored.
    ///
    /// # Errors
    /// The sink failed; the timer is dropped, the cursor stays on the last
    /// rendered step and the machine is left paused
    pub fn tick(&mut self, token: TickToken, sink: &mut impl StepSink<S>) -> Result<TickOutcome, RenderError> {
        if self.pending.map(|p| p.token) != Some(token) {
            tracing::trace!(generation = token.generation, "stale tick ignored");
            return Ok(TickOutcome::Stale);
        }
        self.pending = None;

        let Some(step) = self.history.get(self.cursor) else {
            self.set_mode(PlaybackMode::Finished);
            return Ok(TickOutcome::Finished);
        };
        if let Err(e) = sink.show(step) {
            tracing::warn!(cursor = self.cursor, error = %e, "render failed, playback paused");
            self.set_mode(PlaybackMode::Paused);
            return Err(e);
        }
        self.cursor += 1;

        if self.cursor == self.history.len() {
            self.set_mode(PlaybackMode::Finished);
            Ok(TickOutcome::Finished)
        } else {
            self.schedule(self.speed.delay(self.base_delay));
            Ok(TickOutcome::Advanced { cursor: self.cursor })
        }
    }

    /// Cancel everything and return to the pre-run state
    ///
    /// # Errors
    /// The sink failed to redraw; the machine is reset regardless
    pub fn reset(&mut self, sink: &mut impl StepSink<S>) -> Result<(), RenderError> {
        self.cancel();
        self.cursor = 0;
        self.set_mode(PlaybackMode::Idle);
        sink.clear()
    }

    /// Change speed; applies from the next scheduled tick
    ///
    /// # Errors
    /// [`PlaybackError::SpeedOutOfRange`]
    pub fn set_speed(&mut self, value: u8) -> Result<(), PlaybackError> {
        self.speed = self.speed_range.speed(value)?;
        tracing::debug!(speed = value, "speed changed");
        Ok(())
    }

    fn require(&self, command: Command) -> Result<(), PlaybackError> {
        if accepts(command, self.mode) {
            Ok(())
        } else {
            Err(PlaybackError::InvalidCommand {
                command,
                mode: self.mode,
            })
        }
    }

    fn set_mode(&mut self, to: PlaybackMode) {
        debug_assert!(is_allowed(self.mode, to), "illegal transition {} -> {}", self.mode, to);
        if self.mode != to {
            tracing::debug!(from = %self.mode, %to, cursor = self.cursor, "playback mode changed");
        }
        self.mode = to;
    }

    fn schedule(&mut self, delay: Duration) {
        self.generation += 1;
        self.pending = Some(PendingTick {
            token: TickToken {
                history: self.history.id(),
                generation: self.generation,
            },
            delay,
        });
    }

    fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::trace!(generation = pending.token.generation, "pending tick cancelled");
        }
    }
}
