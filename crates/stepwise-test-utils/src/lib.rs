//! Testing utilities for the Stepwise workspace
//!
//! Shared fixtures and a renderer that records what it was asked to draw.

#![allow(missing_docs)]

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use stepwise_playback::{PlaybackConfig, RenderError, Renderer};
use stepwise_trace::{History, Recorder, Step};

/// What a [`CapturingRenderer`] was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    /// Drew the step with this sequence number
    Step(usize),
    /// Drew the pre-run view
    Problem,
}

/// Shared view of everything a [`CapturingRenderer`] drew
#[derive(Debug, Clone, Default)]
pub struct RenderLog(Arc<Mutex<Vec<RenderEvent>>>);

impl RenderLog {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.0.lock().clone()
    }

    /// Sequence numbers of drawn steps, in order
    pub fn steps(&self) -> Vec<usize> {
        self.0
            .lock()
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Step(seq) => Some(*seq),
                RenderEvent::Problem => None,
            })
            .collect()
    }

    pub fn problem_draws(&self) -> usize {
        self.0.lock().iter().filter(|e| **e == RenderEvent::Problem).count()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Renderer that logs every call and can be told to fail on one step
#[derive(Debug, Default)]
pub struct CapturingRenderer {
    log: RenderLog,
    fail_at: Option<usize>,
    panic_at: Option<usize>,
}

impl CapturingRenderer {
    pub fn new() -> (Self, RenderLog) {
        let renderer = Self::default();
        let log = renderer.log.clone();
        (renderer, log)
    }

    /// Fail every attempt to draw the step with this sequence number
    #[must_use]
    pub fn failing_at(mut self, sequence: usize) -> Self {
        self.fail_at = Some(sequence);
        self
    }

    /// Panic while drawing the step with this sequence number
    #[must_use]
    pub fn panicking_at(mut self, sequence: usize) -> Self {
        self.panic_at = Some(sequence);
        self
    }
}

impl<S, C> Renderer<S, C> for CapturingRenderer {
    fn render(&mut self, step: &Step<S>, _context: &C) -> Result<(), RenderError> {
        if self.panic_at == Some(step.sequence()) {
            panic!("canvas lost at step {}", step.sequence());
        }
        if self.fail_at == Some(step.sequence()) {
            return Err(RenderError::Failed(format!("step {} refused", step.sequence())));
        }
        self.log.0.lock().push(RenderEvent::Step(step.sequence()));
        Ok(())
    }

    fn render_problem(&mut self, _context: &C) -> Result<(), RenderError> {
        self.log.0.lock().push(RenderEvent::Problem);
        Ok(())
    }
}

/// History of `n` steps whose snapshots are `0..n`
pub fn canned_history(n: u32) -> History<u32> {
    let mut recorder = Recorder::new();
    for i in 0..n {
        recorder.emit(&i, format!("step {i}"), &[i + 1]);
    }
    recorder.finish(()).0
}

/// 100 ms base delay at speed 1, speeds 1..=10
pub fn test_config() -> PlaybackConfig {
    PlaybackConfig::new()
        .with_base_delay(Duration::from_millis(100))
        .with_speed_range(1, 10)
        .with_default_speed(1)
}
