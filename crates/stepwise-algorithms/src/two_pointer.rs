//! Two-pointer family: hash two-sum, sorted pair sum, container with most water

use crate::checks;
use crate::problem::TargetProblem;
use crate::snapshot::TwoPointerSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest array the two-pointer visualizations accept
pub const MAX_PAIR_LEN: usize = 50;

const TWO_SUM_SOURCE: &[&str] = &[
    "seen = {}",
    "for i in 0..n:",
    "  need = target - a[i]",
    "  if need in seen: return (seen[need], i)",
    "  seen[a[i]] = i",
    "return none",
];

const PAIR_SUM_SOURCE: &[&str] = &[
    "left = 0, right = n - 1",
    "while left < right:",
    "  sum = a[left] + a[right]",
    "  if sum == target: return (left, right)",
    "  if sum < target: left += 1",
    "  else: right -= 1",
    "return none",
];

const CONTAINER_SOURCE: &[&str] = &[
    "left = 0, right = n - 1, best = 0",
    "while left < right:",
    "  area = min(h[left], h[right]) * (right - left)",
    "  best = max(best, area)",
    "  if h[left] < h[right]: left += 1",
    "  else: right -= 1",
    "return best",
];

fn pair_consistent(last: &TwoPointerSnapshot, output: Option<&(usize, usize)>) -> bool {
    last.found_pair.as_ref() == output
}

/// Single pass two-sum backed by a value-to-index map
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoSum;

impl InstrumentedAlgorithm for TwoSum {
    type Input = TargetProblem;
    type Snapshot = TwoPointerSnapshot;
    type Output = Option<(usize, usize)>;

    fn name(&self) -> &'static str {
        "two-sum"
    }

    fn source(&self) -> &'static [&'static str] {
        TWO_SUM_SOURCE
    }

    fn validate(&self, input: &TargetProblem) -> Result<(), ValidationError> {
        checks::length_within("array length", input.values.len(), 2, MAX_PAIR_LEN)?;
        checks::magnitudes_within("array values", input.values.iter().copied())?;
        checks::target_within(input.target)
    }

    fn execute(
        &self,
        input: &TargetProblem,
        recorder: &mut Recorder<TwoPointerSnapshot>,
    ) -> Result<Option<(usize, usize)>, AlgorithmError> {
        let target = input.target;
        let mut s = TwoPointerSnapshot {
            array: input.values.clone(),
            target: Some(target),
            ..TwoPointerSnapshot::default()
        };
        recorder.emit(&s, format!("Look for two values summing to {target}"), &[1]);

        for i in 0..s.array.len() {
            let value = s.array[i];
            let need = target - value;
            s.left = Some(i);
            if let Some(&j) = s.seen.get(&need) {
                s.found_pair = Some((j, i));
                recorder.emit(
                    &s,
                    format!("a[{i}]={value} needs {need}, seen at index {j}: found pair ({j}, {i})"),
                    &[3, 4],
                );
                return Ok(Some((j, i)));
            }
            recorder.emit(
                &s,
                format!("a[{i}]={value} needs {need}, which has not been seen"),
                &[2, 3, 4],
            );
            s.seen.insert(value, i);
            recorder.emit(&s, format!("Remember {value} at index {i}"), &[5]);
        }

        s.left = None;
        recorder.emit(&s, format!("No pair sums to {target}"), &[6]);
        Ok(None)
    }

    fn is_consistent(&self, last: &TwoPointerSnapshot, output: &Option<(usize, usize)>) -> bool {
        pair_consistent(last, output.as_ref())
    }
}

/// Converging pointers over a sorted array
#[derive(Debug, Clone, Copy, Default)]
pub struct PairSum;

impl InstrumentedAlgorithm for PairSum {
    type Input = TargetProblem;
    type Snapshot = TwoPointerSnapshot;
    type Output = Option<(usize, usize)>;

    fn name(&self) -> &'static str {
        "pair-sum"
    }

    fn source(&self) -> &'static [&'static str] {
        PAIR_SUM_SOURCE
    }

    fn validate(&self, input: &TargetProblem) -> Result<(), ValidationError> {
        checks::length_within("array length", input.values.len(), 2, MAX_PAIR_LEN)?;
        checks::magnitudes_within("array values", input.values.iter().copied())?;
        checks::target_within(input.target)?;
        checks::ascending("array", &input.values)
    }

    fn execute(
        &self,
        input: &TargetProblem,
        recorder: &mut Recorder<TwoPointerSnapshot>,
    ) -> Result<Option<(usize, usize)>, AlgorithmError> {
        let target = input.target;
        let (mut left, mut right) = (0, input.values.len() - 1);
        let mut s = TwoPointerSnapshot {
            array: input.values.clone(),
            target: Some(target),
            left: Some(left),
            right: Some(right),
            ..TwoPointerSnapshot::default()
        };
        recorder.emit(&s, format!("Pointers at both ends, target {target}"), &[1]);

        while left < right {
            s.left = Some(left);
            s.right = Some(right);
            let sum = s.array[left] + s.array[right];
            if sum == target {
                s.found_pair = Some((left, right));
                recorder.emit(
                    &s,
                    format!("a[{left}] + a[{right}] = {sum}: found pair ({left}, {right})"),
                    &[3, 4],
                );
                return Ok(Some((left, right)));
            }
            if sum < target {
                recorder.emit(&s, format!("{sum} < {target}: move left pointer right"), &[3, 5]);
                left += 1;
            } else {
                recorder.emit(&s, format!("{sum} > {target}: move right pointer left"), &[3, 6]);
                right -= 1;
            }
        }

        s.left = None;
        s.right = None;
        recorder.emit(&s, format!("Pointers met: no pair sums to {target}"), &[7]);
        Ok(None)
    }

    fn is_consistent(&self, last: &TwoPointerSnapshot, output: &Option<(usize, usize)>) -> bool {
        pair_consistent(last, output.as_ref())
    }
}

/// Best container found by [`ContainerWithMostWater`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerResult {
    /// Left wall
    pub left: usize,
    /// Right wall
    pub right: usize,
    /// Water held
    pub area: i64,
}

impl fmt::Display for ContainerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "walls {} and {} hold {}", self.left, self.right, self.area)
    }
}

/// Container with most water, moving the shorter wall inwards
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerWithMostWater;

impl InstrumentedAlgorithm for ContainerWithMostWater {
    type Input = [i64];
    type Snapshot = TwoPointerSnapshot;
    type Output = ContainerResult;

    fn name(&self) -> &'static str {
        "container-with-most-water"
    }

    fn source(&self) -> &'static [&'static str] {
        CONTAINER_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        checks::length_within("height count", input.len(), 2, MAX_PAIR_LEN)?;
        if input.iter().any(|&h| h < 0) {
            return Err(ValidationError::Invalid("heights must be non-negative".into()));
        }
        checks::magnitudes_within("heights", input.iter().copied())
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<TwoPointerSnapshot>,
    ) -> Result<ContainerResult, AlgorithmError> {
        let (mut left, mut right) = (0, input.len() - 1);
        let mut best = ContainerResult {
            left,
            right,
            area: 0,
        };
        let mut s = TwoPointerSnapshot {
            array: input.to_vec(),
            left: Some(left),
            right: Some(right),
            best: Some(0),
            ..TwoPointerSnapshot::default()
        };
        recorder.emit(&s, "Walls at both ends, best area 0", &[1]);

        while left < right {
            s.left = Some(left);
            s.right = Some(right);
            let (hl, hr) = (s.array[left], s.array[right]);
            let width = i64::try_from(right - left)
                .map_err(|_| AlgorithmError::Invariant("width overflow".into()))?;
            let area = hl.min(hr) * width;
            let improved = area > best.area;
            if improved {
                best = ContainerResult { left, right, area };
                s.best = Some(area);
                s.found_pair = Some((left, right));
            }
            let verdict = if improved { "new best" } else { "no improvement" };
            if hl < hr {
                recorder.emit(
                    &s,
                    format!("Walls {left} and {right} hold {area} ({verdict}); left wall is shorter, move it"),
                    &[3, 4, 5],
                );
                left += 1;
            } else {
                recorder.emit(
                    &s,
                    format!("Walls {left} and {right} hold {area} ({verdict}); move the right wall"),
                    &[3, 4, 6],
                );
                right -= 1;
            }
        }

        s.left = None;
        s.right = None;
        s.found_pair = Some((best.left, best.right));
        recorder.emit(&s, format!("Best container: {best}"), &[7]);
        Ok(best)
    }

    fn is_consistent(&self, last: &TwoPointerSnapshot, output: &ContainerResult) -> bool {
        last.best == Some(output.area) && last.found_pair == Some((output.left, output.right))
    }
}
