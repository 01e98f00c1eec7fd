//! Searching family: linear and binary search

use crate::checks;
use crate::problem::TargetProblem;
use crate::snapshot::SearchSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest array the search visualizations accept
pub const MAX_SEARCH_LEN: usize = 100;

const LINEAR_SOURCE: &[&str] = &[
    "for i in 0..n:",
    "  if a[i] == target:",
    "    return i",
    "return not found",
];

const BINARY_SOURCE: &[&str] = &[
    "low = 0, high = n - 1",
    "while low <= high:",
    "  mid = (low + high) / 2",
    "  if a[mid] == target: return mid",
    "  if a[mid] < target: low = mid + 1",
    "  else: high = mid - 1",
    "return not found",
];

/// Outcome of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Whether the target is present
    pub found: bool,
    /// Index of the match
    pub index: Option<usize>,
}

impl SearchResult {
    /// Target found at `index`
    #[must_use]
    pub fn found(index: usize) -> Self {
        Self {
            found: true,
            index: Some(index),
        }
    }

    /// Target absent
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            found: false,
            index: None,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "found at index {i}"),
            None => write!(f, "not found"),
        }
    }
}

fn search_consistent(last: &SearchSnapshot, output: &SearchResult) -> bool {
    last.found == output.index
}

/// Left-to-right scan
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl InstrumentedAlgorithm for LinearSearch {
    type Input = TargetProblem;
    type Snapshot = SearchSnapshot;
    type Output = SearchResult;

    fn name(&self) -> &'static str {
        "linear-search"
    }

    fn source(&self) -> &'static [&'static str] {
        LINEAR_SOURCE
    }

    fn validate(&self, input: &TargetProblem) -> Result<(), ValidationError> {
        checks::length_within("array length", input.values.len(), 1, MAX_SEARCH_LEN)
    }

    fn execute(
        &self,
        input: &TargetProblem,
        recorder: &mut Recorder<SearchSnapshot>,
    ) -> Result<SearchResult, AlgorithmError> {
        let target = input.target;
        let mut s = SearchSnapshot {
            array: input.values.clone(),
            target,
            ..SearchSnapshot::default()
        };
        recorder.emit(
            &s,
            format!("Search for {target} among {} elements", s.array.len()),
            &[1],
        );

        for i in 0..s.array.len() {
            s.probe = Some(i);
            let value = s.array[i];
            if value == target {
                s.found = Some(i);
                recorder.emit(&s, format!("a[{i}]={value} equals {target}: found at index {i}"), &[2, 3]);
                return Ok(SearchResult::found(i));
            }
            recorder.emit(&s, format!("a[{i}]={value} is not {target}, move on"), &[1, 2]);
        }

        s.probe = None;
        recorder.emit(&s, format!("Reached the end: {target} is not in the array"), &[4]);
        Ok(SearchResult::not_found())
    }

    fn is_consistent(&self, last: &SearchSnapshot, output: &SearchResult) -> bool {
        search_consistent(last, output)
    }
}

/// Binary search over a sorted array.
///
/// One step per probe: each step shows the live range and the midpoint being
/// compared, and narrates which half is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl InstrumentedAlgorithm for BinarySearch {
    type Input = TargetProblem;
    type Snapshot = SearchSnapshot;
    type Output = SearchResult;

    fn name(&self) -> &'static str {
        "binary-search"
    }

    fn source(&self) -> &'static [&'static str] {
        BINARY_SOURCE
    }

    fn validate(&self, input: &TargetProblem) -> Result<(), ValidationError> {
        checks::length_within("array length", input.values.len(), 1, MAX_SEARCH_LEN)?;
        checks::ascending("array", &input.values)
    }

    fn execute(
        &self,
        input: &TargetProblem,
        recorder: &mut Recorder<SearchSnapshot>,
    ) -> Result<SearchResult, AlgorithmError> {
        let target = input.target;
        let n = input.values.len();
        let (mut low, mut high) = (0, n - 1);
        let mut s = SearchSnapshot {
            array: input.values.clone(),
            target,
            low: Some(low),
            high: Some(high),
            ..SearchSnapshot::default()
        };
        recorder.emit(&s, format!("Search for {target} in [{low}..={high}]"), &[1]);

        while low <= high {
            let mid = low + (high - low) / 2;
            s.low = Some(low);
            s.high = Some(high);
            s.mid = Some(mid);
            let value = s.array[mid];

            if value == target {
                s.found = Some(mid);
                recorder.emit(
                    &s,
                    format!("a[{mid}]={value} equals {target}: found at index {mid}"),
                    &[3, 4],
                );
                return Ok(SearchResult::found(mid));
            }
            if value < target {
                recorder.emit(
                    &s,
                    format!("a[{mid}]={value} < {target}: discard the left half, low = {}", mid + 1),
                    &[3, 5],
                );
                low = mid + 1;
            } else {
                let next_high = mid.checked_sub(1);
                recorder.emit(
                    &s,
                    match next_high {
                        Some(h) => format!("a[{mid}]={value} > {target}: discard the right half, high = {h}"),
                        None => format!("a[{mid}]={value} > {target}: nothing left below index 0"),
                    },
                    &[3, 6],
                );
                match next_high {
                    Some(h) => high = h,
                    None => break,
                }
            }
        }

        s.low = None;
        s.high = None;
        s.mid = None;
        recorder.emit(&s, format!("Range is empty: {target} is not in the array"), &[7]);
        Ok(SearchResult::not_found())
    }

    fn is_consistent(&self, last: &SearchSnapshot, output: &SearchResult) -> bool {
        search_consistent(last, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_trace::{record, TraceError};

    fn problem(values: &[i64], target: i64) -> TargetProblem {
        TargetProblem {
            values: values.to_vec(),
            target,
        }
    }

    #[test]
    fn binary_search_example() {
        let (history, result) = record(&BinarySearch, &problem(&[1, 3, 5, 7, 9, 11], 7)).unwrap();
        assert_eq!(result, SearchResult::found(3));

        // initialization + two halvings + the matching probe
        assert_eq!(history.len(), 4);
        let last = history.last().unwrap();
        assert_eq!(last.snapshot().mid, Some(3));
        assert!(last.explanation().contains("found at index 3"));
    }

    #[test]
    fn binary_search_absent_target() {
        let (history, result) = record(&BinarySearch, &problem(&[2, 4, 6], 1)).unwrap();
        assert_eq!(result, SearchResult::not_found());
        let last = history.last().unwrap();
        assert_eq!(last.snapshot().mid, None);
        assert!(last.explanation().contains("not in the array"));
    }

    #[test]
    fn binary_search_above_every_value() {
        let (_, result) = record(&BinarySearch, &problem(&[2, 4, 6], 9)).unwrap();
        assert!(!result.found);
    }

    #[test]
    fn binary_search_requires_sorted_input() {
        let err = record(&BinarySearch, &problem(&[3, 1, 2], 1)).unwrap_err();
        assert!(matches!(
            err,
            TraceError::Validation(ValidationError::NotSorted { .. })
        ));
    }

    #[test]
    fn linear_search_probes_until_match() {
        let (history, result) = record(&LinearSearch, &problem(&[4, 8, 15, 16], 15)).unwrap();
        assert_eq!(result, SearchResult::found(2));
        // start + two misses + match
        assert_eq!(history.len(), 4);
        assert_eq!(history.last().unwrap().snapshot().probe, Some(2));
    }

    #[test]
    fn linear_search_miss_visits_everything() {
        let (history, result) = record(&LinearSearch, &problem(&[4, 8], 5)).unwrap();
        assert_eq!(result.to_string(), "not found");
        assert_eq!(history.len(), 4);
    }
}
