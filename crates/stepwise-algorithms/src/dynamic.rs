//! Dynamic programming family: Fibonacci, 0/1 knapsack, longest common subsequence
//!
//! All three fill a [`TableSnapshot`]. Every written cell is its own step,
//! with the cells it was computed from listed in `reads`.

use crate::checks;
use crate::problem::{KnapsackProblem, StringPair};
use crate::snapshot::TableSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest Fibonacci index
pub const MAX_FIBONACCI: usize = 30;
/// Most knapsack items
pub const MAX_KNAPSACK_ITEMS: usize = 10;
/// Largest knapsack capacity
pub const MAX_KNAPSACK_CAPACITY: usize = 50;
/// Longest string accepted by LCS
pub const MAX_LCS_LEN: usize = 12;

const FIBONACCI_SOURCE: &[&str] = &[
    "dp[0] = 0",
    "dp[1] = 1",
    "for i in 2..=n:",
    "  dp[i] = dp[i-1] + dp[i-2]",
    "return dp[n]",
];

const KNAPSACK_SOURCE: &[&str] = &[
    "dp[0][c] = 0 for all c",
    "for i in 1..=n:",
    "  for c in 0..=capacity:",
    "    dp[i][c] = dp[i-1][c]",
    "    if w[i] <= c:",
    "      dp[i][c] = max(dp[i][c], dp[i-1][c-w[i]] + v[i])",
    "trace back from dp[n][capacity]",
    "return dp[n][capacity]",
];

const LCS_SOURCE: &[&str] = &[
    "dp[i][0] = dp[0][j] = 0",
    "for i in 1..=n:",
    "  for j in 1..=m:",
    "    if a[i] == b[j]: dp[i][j] = dp[i-1][j-1] + 1",
    "    else: dp[i][j] = max(dp[i-1][j], dp[i][j-1])",
    "trace back from dp[n][m]",
    "return dp[n][m]",
];

fn to_usize(value: u64, what: &str) -> Result<usize, AlgorithmError> {
    usize::try_from(value).map_err(|_| AlgorithmError::Invariant(format!("{what} does not fit in memory")))
}

fn table_value(table: &TableSnapshot, row: usize, column: usize) -> Result<i64, AlgorithmError> {
    table
        .value(row, column)
        .ok_or_else(|| AlgorithmError::Invariant(format!("cell ({row}, {column}) read before it was written")))
}

/// Bottom-up Fibonacci
#[derive(Debug, Clone, Copy, Default)]
pub struct Fibonacci;

impl InstrumentedAlgorithm for Fibonacci {
    type Input = usize;
    type Snapshot = TableSnapshot;
    type Output = u64;

    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn source(&self) -> &'static [&'static str] {
        FIBONACCI_SOURCE
    }

    fn validate(&self, input: &usize) -> Result<(), ValidationError> {
        checks::length_within("fibonacci index", *input, 0, MAX_FIBONACCI)
    }

    fn execute(&self, input: &usize, recorder: &mut Recorder<TableSnapshot>) -> Result<u64, AlgorithmError> {
        let n = *input;
        let columns = (0..=n).map(|i| i.to_string()).collect();
        let mut t = TableSnapshot::new(vec!["fib".to_string()], columns);

        t.cells[0][0] = Some(0);
        t.active = Some((0, 0));
        recorder.emit(&t, "Base case: fib(0) = 0", &[1]);
        if n >= 1 {
            t.cells[0][1] = Some(1);
            t.active = Some((0, 1));
            recorder.emit(&t, "Base case: fib(1) = 1", &[2]);
        }

        for i in 2..=n {
            let a = table_value(&t, 0, i - 1)?;
            let b = table_value(&t, 0, i - 2)?;
            let value = a + b;
            t.cells[0][i] = Some(value);
            t.active = Some((0, i));
            t.reads = vec![(0, i - 1), (0, i - 2)];
            recorder.emit(
                &t,
                format!("fib({i}) = fib({}) + fib({}) = {a} + {b} = {value}", i - 1, i - 2),
                &[3, 4],
            );
        }

        let result = table_value(&t, 0, n)?;
        t.active = Some((0, n));
        t.reads.clear();
        recorder.emit(&t, format!("fib({n}) = {result}"), &[5]);
        u64::try_from(result).map_err(|_| AlgorithmError::Invariant("negative Fibonacci number".into()))
    }

    fn is_consistent(&self, last: &TableSnapshot, output: &u64) -> bool {
        let n = last.cells.first().map_or(0, Vec::len).saturating_sub(1);
        last.value(0, n).and_then(|v| u64::try_from(v).ok()) == Some(*output)
    }
}

/// Best knapsack selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackResult {
    /// Total value of the chosen items
    pub best_value: i64,
    /// Chosen item indices, ascending
    pub items: Vec<usize>,
}

impl fmt::Display for KnapsackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} using items {:?}", self.best_value, self.items)
    }
}

/// 0/1 knapsack with a full table and a traceback of the chosen items
#[derive(Debug, Clone, Copy, Default)]
pub struct Knapsack;

impl InstrumentedAlgorithm for Knapsack {
    type Input = KnapsackProblem;
    type Snapshot = TableSnapshot;
    type Output = KnapsackResult;

    fn name(&self) -> &'static str {
        "knapsack"
    }

    fn source(&self) -> &'static [&'static str] {
        KNAPSACK_SOURCE
    }

    fn validate(&self, input: &KnapsackProblem) -> Result<(), ValidationError> {
        checks::length_within("item count", input.weights.len(), 1, MAX_KNAPSACK_ITEMS)?;
        if input.weights.len() != input.values.len() {
            return Err(ValidationError::LengthMismatch {
                left: "weights",
                left_len: input.weights.len(),
                right: "values",
                right_len: input.values.len(),
            });
        }
        let capacity = usize::try_from(input.capacity).unwrap_or(usize::MAX);
        checks::length_within("capacity", capacity, 1, MAX_KNAPSACK_CAPACITY)
    }

    fn execute(
        &self,
        input: &KnapsackProblem,
        recorder: &mut Recorder<TableSnapshot>,
    ) -> Result<KnapsackResult, AlgorithmError> {
        let n = input.weights.len();
        let capacity = to_usize(input.capacity, "capacity")?;
        let mut rows = vec!["-".to_string()];
        rows.extend(
            input
                .weights
                .iter()
                .zip(&input.values)
                .map(|(w, v)| format!("w{w} v{v}")),
        );
        let columns = (0..=capacity).map(|c| c.to_string()).collect();
        let mut t = TableSnapshot::new(rows, columns);

        for c in 0..=capacity {
            t.cells[0][c] = Some(0);
        }
        recorder.emit(&t, "Row 0: with no items every capacity holds value 0", &[1]);

        for i in 1..=n {
            let weight = to_usize(input.weights[i - 1], "weight").unwrap_or(usize::MAX);
            let value = input.values[i - 1];
            for c in 0..=capacity {
                let skip = table_value(&t, i - 1, c)?;
                t.active = Some((i, c));
                if weight <= c {
                    let take = table_value(&t, i - 1, c - weight)?.saturating_add(value);
                    let best = skip.max(take);
                    t.cells[i][c] = Some(best);
                    t.reads = vec![(i - 1, c), (i - 1, c - weight)];
                    let verdict = if take > skip { "take it" } else { "skip it" };
                    recorder.emit(
                        &t,
                        format!("Item {} at capacity {c}: skip gives {skip}, take gives {take}, {verdict}", i - 1),
                        &[4, 5, 6],
                    );
                } else {
                    t.cells[i][c] = Some(skip);
                    t.reads = vec![(i - 1, c)];
                    recorder.emit(
                        &t,
                        format!("Item {} weighs {weight}, too heavy for capacity {c}: keep {skip}", i - 1),
                        &[4, 5],
                    );
                }
            }
        }

        let best_value = table_value(&t, n, capacity)?;
        let mut items = Vec::new();
        let mut c = capacity;
        for i in (1..=n).rev() {
            let here = table_value(&t, i, c)?;
            let above = table_value(&t, i - 1, c)?;
            t.active = Some((i, c));
            t.reads = vec![(i - 1, c)];
            if here == above {
                recorder.emit(&t, format!("dp[{i}][{c}] equals the row above: item {} not taken", i - 1), &[7]);
            } else {
                items.push(i - 1);
                let weight = to_usize(input.weights[i - 1], "weight")?;
                recorder.emit(&t, format!("dp[{i}][{c}] differs from the row above: item {} taken", i - 1), &[7]);
                c = c.checked_sub(weight).ok_or_else(|| {
                    AlgorithmError::Invariant("traceback took an item heavier than the remaining capacity".into())
                })?;
            }
        }
        items.reverse();

        let result = KnapsackResult { best_value, items };
        t.active = Some((n, capacity));
        t.reads.clear();
        recorder.emit(&t, format!("Best: {result}"), &[8]);
        Ok(result)
    }

    fn is_consistent(&self, last: &TableSnapshot, output: &KnapsackResult) -> bool {
        last.active.and_then(|(r, c)| last.value(r, c)) == Some(output.best_value)
    }
}

/// Longest common subsequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsResult {
    /// Length of the subsequence
    pub length: usize,
    /// One longest common subsequence
    pub subsequence: String,
}

impl fmt::Display for LcsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (length {})", self.subsequence, self.length)
    }
}

/// LCS table plus traceback. Ties during traceback move up before left.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubsequence;

impl InstrumentedAlgorithm for LongestCommonSubsequence {
    type Input = StringPair;
    type Snapshot = TableSnapshot;
    type Output = LcsResult;

    fn name(&self) -> &'static str {
        "longest-common-subsequence"
    }

    fn source(&self) -> &'static [&'static str] {
        LCS_SOURCE
    }

    fn validate(&self, input: &StringPair) -> Result<(), ValidationError> {
        checks::length_within("first string length", input.first.chars().count(), 1, MAX_LCS_LEN)?;
        checks::length_within("second string length", input.second.chars().count(), 1, MAX_LCS_LEN)
    }

    fn execute(
        &self,
        input: &StringPair,
        recorder: &mut Recorder<TableSnapshot>,
    ) -> Result<LcsResult, AlgorithmError> {
        let a: Vec<char> = input.first.chars().collect();
        let b: Vec<char> = input.second.chars().collect();
        let (n, m) = (a.len(), b.len());

        let rows = std::iter::once(String::new()).chain(a.iter().map(char::to_string)).collect();
        let columns = std::iter::once(String::new()).chain(b.iter().map(char::to_string)).collect();
        let mut t = TableSnapshot::new(rows, columns);
        for i in 0..=n {
            t.cells[i][0] = Some(0);
        }
        for j in 0..=m {
            t.cells[0][j] = Some(0);
        }
        recorder.emit(&t, "Empty prefixes share nothing: first row and column are 0", &[1]);

        for i in 1..=n {
            for j in 1..=m {
                t.active = Some((i, j));
                if a[i - 1] == b[j - 1] {
                    let value = table_value(&t, i - 1, j - 1)? + 1;
                    t.cells[i][j] = Some(value);
                    t.reads = vec![(i - 1, j - 1)];
                    recorder.emit(
                        &t,
                        format!("'{}' matches: diagonal + 1 = {value}", a[i - 1]),
                        &[3, 4],
                    );
                } else {
                    let up = table_value(&t, i - 1, j)?;
                    let left = table_value(&t, i, j - 1)?;
                    let value = up.max(left);
                    t.cells[i][j] = Some(value);
                    t.reads = vec![(i - 1, j), (i, j - 1)];
                    recorder.emit(
                        &t,
                        format!("'{}' vs '{}' differ: max({up}, {left}) = {value}", a[i - 1], b[j - 1]),
                        &[3, 5],
                    );
                }
            }
        }

        let length = table_value(&t, n, m)?;
        let mut picked = Vec::new();
        let (mut i, mut j) = (n, m);
        while i > 0 && j > 0 {
            t.active = Some((i, j));
            if a[i - 1] == b[j - 1] {
                picked.push(a[i - 1]);
                t.reads = vec![(i - 1, j - 1)];
                recorder.emit(&t, format!("'{}' is part of the subsequence, move diagonally", a[i - 1]), &[6]);
                i -= 1;
                j -= 1;
            } else if table_value(&t, i - 1, j)? >= table_value(&t, i, j - 1)? {
                t.reads = vec![(i - 1, j)];
                recorder.emit(&t, "Value came from above, move up", &[6]);
                i -= 1;
            } else {
                t.reads = vec![(i, j - 1)];
                recorder.emit(&t, "Value came from the left, move left", &[6]);
                j -= 1;
            }
        }
        picked.reverse();

        let result = LcsResult {
            length: usize::try_from(length).map_err(|_| AlgorithmError::Invariant("negative length".into()))?,
            subsequence: picked.into_iter().collect(),
        };
        t.active = Some((n, m));
        t.reads.clear();
        recorder.emit(&t, format!("Longest common subsequence: {result}"), &[7]);
        Ok(result)
    }

    fn is_consistent(&self, last: &TableSnapshot, output: &LcsResult) -> bool {
        let length_matches = last
            .active
            .and_then(|(r, c)| last.value(r, c))
            .and_then(|v| usize::try_from(v).ok())
            == Some(output.length);
        length_matches && output.subsequence.chars().count() == output.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_trace::{record, TraceError};

    fn is_subsequence(needle: &str, haystack: &str) -> bool {
        let mut rest = haystack.chars();
        needle.chars().all(|c| rest.any(|h| h == c))
    }

    #[test]
    fn fibonacci_fills_one_cell_per_step() {
        let (history, value) = record(&Fibonacci, &10).unwrap();
        assert_eq!(value, 55);
        // two base cases, nine recurrences, one summary
        assert_eq!(history.len(), 12);
        assert_eq!(history.get(2).unwrap().snapshot().reads, vec![(0, 1), (0, 0)]);
    }

    #[test]
    fn fibonacci_zero_and_limit() {
        assert_eq!(record(&Fibonacci, &0).unwrap().1, 0);
        assert_eq!(record(&Fibonacci, &30).unwrap().1, 832_040);
        assert!(matches!(
            record(&Fibonacci, &31),
            Err(TraceError::Validation(ValidationError::OutOfRange { actual: 31, .. }))
        ));
    }

    #[test]
    fn knapsack_picks_best_combination() {
        let problem = KnapsackProblem {
            weights: vec![1, 3, 4, 5],
            values: vec![1, 4, 5, 7],
            capacity: 7,
        };
        let (history, result) = record(&Knapsack, &problem).unwrap();
        assert_eq!(result.best_value, 9);
        assert_eq!(result.items, vec![1, 2]);
        assert_eq!(history.last().unwrap().snapshot().value(4, 7), Some(9));
    }

    #[test]
    fn knapsack_rejects_mismatched_lists() {
        let problem = KnapsackProblem {
            weights: vec![1, 2],
            values: vec![3],
            capacity: 5,
        };
        assert!(matches!(
            record(&Knapsack, &problem),
            Err(TraceError::Validation(ValidationError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn lcs_classic_pair() {
        let pair = StringPair {
            first: "ABCBDAB".into(),
            second: "BDCABA".into(),
        };
        let (_, result) = record(&LongestCommonSubsequence, &pair).unwrap();
        assert_eq!(result.length, 4);
        assert!(is_subsequence(&result.subsequence, &pair.first));
        assert!(is_subsequence(&result.subsequence, &pair.second));
    }

    #[test]
    fn lcs_short_pair() {
        let pair = StringPair {
            first: "ABC".into(),
            second: "AC".into(),
        };
        let (_, result) = record(&LongestCommonSubsequence, &pair).unwrap();
        assert_eq!(result.subsequence, "AC");
    }

    #[test]
    fn lcs_rejects_long_strings() {
        let pair = StringPair {
            first: "A".repeat(MAX_LCS_LEN + 1),
            second: "A".into(),
        };
        assert!(record(&LongestCommonSubsequence, &pair).is_err());
    }
}
