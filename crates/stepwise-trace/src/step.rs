//! Step and History value types

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Line numbers (1-based) into an algorithm's displayed source listing
pub type SourceLines = SmallVec<[u32; 4]>;

/// One recorded point of an algorithm run.
///
/// Steps are created only by the [`Recorder`](crate::Recorder) and expose no
/// mutators, so a step is never changed once it is part of a [`History`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    sequence: usize,
    snapshot: S,
    explanation: String,
    highlighted_lines: SourceLines,
}

impl<S> Step<S> {
    pub(crate) fn new(
        sequence: usize,
        snapshot: S,
        explanation: String,
        highlighted_lines: SourceLines,
    ) -> Self {
        Self {
            sequence,
            snapshot,
            explanation,
            highlighted_lines,
        }
    }

    /// Position in the history (0-based, gap free)
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Algorithm state captured at this step
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    /// Human readable narration
    #[inline]
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Source lines to highlight while this step is shown
    #[inline]
    #[must_use]
    pub fn highlighted_lines(&self) -> &[u32] {
        &self.highlighted_lines
    }

    /// Convert the snapshot, keeping sequence and metadata
    #[must_use]
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Step<T> {
        Step {
            sequence: self.sequence,
            snapshot: f(self.snapshot),
            explanation: self.explanation,
            highlighted_lines: self.highlighted_lines,
        }
    }
}

/// Identity of one recorded history
///
/// Playback uses it to tell ticks scheduled against an old history apart
/// from ticks for the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryId(pub Uuid);

impl HistoryId {
    /// Generate a fresh identity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HistoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable, ordered sequence of steps for one algorithm run.
///
/// Cloning is cheap; clones share the same steps and identity.
#[derive(Debug)]
pub struct History<S> {
    id: HistoryId,
    steps: Arc<[Step<S>]>,
}

impl<S> Clone for History<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            steps: Arc::clone(&self.steps),
        }
    }
}

impl<S> History<S> {
    pub(crate) fn from_steps(steps: Vec<Step<S>>) -> Self {
        Self {
            id: HistoryId::new(),
            steps: steps.into(),
        }
    }

    /// History with no steps (nothing recorded yet, or recording failed)
    #[must_use]
    pub fn empty() -> Self {
        Self::from_steps(Vec::new())
    }

    /// Identity of this history
    #[inline]
    #[must_use]
    pub fn id(&self) -> HistoryId {
        self.id
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    /// First step
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Step<S>> {
        self.steps.first()
    }

    /// Final step
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    /// All steps in order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// Iterate steps in order
    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }
}

impl<S: Clone> History<S> {
    /// Convert every snapshot, keeping identity and order.
    ///
    /// Used to lift a family-specific history into a tagged union.
    #[must_use]
    pub fn map<T>(&self, mut f: impl FnMut(S) -> T) -> History<T> {
        History {
            id: self.id,
            steps: self
                .steps
                .iter()
                .map(|step| step.clone().map(&mut f))
                .collect(),
        }
    }
}

impl<'a, S> IntoIterator for &'a History<S> {
    type Item = &'a Step<S>;
    type IntoIter = std::slice::Iter<'a, Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> History<u32> {
        History::from_steps(vec![
            Step::new(0, 10, "start".to_string(), SourceLines::from_slice(&[1])),
            Step::new(1, 20, "end".to_string(), SourceLines::new()),
        ])
    }

    #[test]
    fn clones_share_steps_without_cloneable_snapshots() {
        #[derive(Debug, PartialEq)]
        struct Opaque(u8);

        let history = History::from_steps(vec![Step::new(0, Opaque(7), "only".to_string(), SourceLines::new())]);
        let copy = history.clone();
        assert_eq!(copy.id(), history.id());
        assert!(Arc::ptr_eq(&copy.steps, &history.steps));
        assert_eq!(copy.steps[0].snapshot(), &Opaque(7));
    }

    #[test]
    fn empty_history_has_no_steps() {
        let history = History::<u32>::empty();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn fresh_histories_have_distinct_ids() {
        assert_ne!(History::<u32>::empty().id(), History::<u32>::empty().id());
    }

    #[test]
    fn clones_share_identity() {
        let history = sample();
        let copy = history.clone();
        assert_eq!(history.id(), copy.id());
        assert_eq!(history.steps(), copy.steps());
    }

    #[test]
    fn map_preserves_identity_and_metadata() {
        let history = sample();
        let mapped = history.map(|v| format!("v{v}"));

        assert_eq!(mapped.id(), history.id());
        assert_eq!(mapped.len(), 2);
        let last = mapped.last().unwrap();
        assert_eq!(last.sequence(), 1);
        assert_eq!(last.snapshot(), "v20");
        assert_eq!(last.explanation(), "end");
        assert!(last.highlighted_lines().is_empty());
    }
}
