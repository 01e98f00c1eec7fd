//! Append-only step recorder

use crate::step::{History, SourceLines, Step};

/// Accumulates steps while an algorithm executes.
///
/// `emit` always stores its own copy of the snapshot, so an algorithm may keep
/// mutating its working state after the call. There is no step limit and no
/// failure mode.
#[derive(Debug)]
pub struct Recorder<S> {
    steps: Vec<Step<S>>,
}

impl<S: Clone> Recorder<S> {
    /// Create an empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step with the next sequence number
    pub fn emit(&mut self, snapshot: &S, explanation: impl Into<String>, highlighted_lines: &[u32]) {
        let sequence = self.steps.len();
        self.steps.push(Step::new(
            sequence,
            snapshot.clone(),
            explanation.into(),
            SourceLines::from_slice(highlighted_lines),
        ));
    }

    /// Steps emitted so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been emitted yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snapshot of the most recent step
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&S> {
        self.steps.last().map(Step::snapshot)
    }

    /// Freeze the recorded steps; the result travels next to the history
    pub fn finish<R>(self, result: R) -> (History<S>, R) {
        let history = History::from_steps(self.steps);
        tracing::debug!(history = %history.id(), steps = history.len(), "history frozen");
        (history, result)
    }
}

impl<S: Clone> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_follow_emission_order() {
        let mut recorder = Recorder::new();
        for i in 0..5 {
            recorder.emit(&i, format!("step {i}"), &[]);
        }
        let (history, ()) = recorder.finish(());

        let sequences: Vec<_> = history.iter().map(Step::sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn emit_copies_working_state() {
        let mut working = vec![3, 1, 2];
        let mut recorder = Recorder::new();

        recorder.emit(&working, "before", &[1]);
        working.swap(0, 1);
        recorder.emit(&working, "after swap", &[2, 3]);
        working.clear();

        let (history, ()) = recorder.finish(());
        assert_eq!(history.get(0).unwrap().snapshot(), &vec![3, 1, 2]);
        assert_eq!(history.get(1).unwrap().snapshot(), &vec![1, 3, 2]);
        assert_eq!(history.get(1).unwrap().highlighted_lines(), &[2, 3]);
    }

    #[test]
    fn finish_returns_result_alongside_history() {
        let mut recorder = Recorder::new();
        recorder.emit(&"only", "one step", &[]);
        let (history, result) = recorder.finish(42);
        assert_eq!(history.len(), 1);
        assert_eq!(result, 42);
    }

    #[test]
    fn accepts_large_step_counts() {
        let mut recorder = Recorder::new();
        for i in 0..20_000u32 {
            recorder.emit(&i, "tick", &[]);
        }
        assert_eq!(recorder.len(), 20_000);
        assert_eq!(recorder.last_snapshot(), Some(&19_999));
    }
}
