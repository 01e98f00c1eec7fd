//! Divide and conquer family: maximum subarray and closest pair of points

use crate::checks;
use crate::problem::Point;
use crate::snapshot::{PointsSnapshot, SubarraySnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest array for maximum subarray
pub const MAX_SUBARRAY_LEN: usize = 50;
/// Most points for closest pair
pub const MAX_POINTS: usize = 20;

const SUBARRAY_SOURCE: &[&str] = &[
    "max_subarray(a, lo, hi):",
    "  if lo == hi: return (lo, hi, a[lo])",
    "  mid = (lo + hi) / 2",
    "  left = max_subarray(a, lo, mid)",
    "  right = max_subarray(a, mid+1, hi)",
    "  cross = max_crossing(a, lo, mid, hi)",
    "  return best of left, right, cross (ties: left, then right)",
    "max_crossing: grow from mid leftwards and from mid+1 rightwards",
];

const CLOSEST_SOURCE: &[&str] = &[
    "sort points by x",
    "closest(p, lo, hi):",
    "  if hi - lo < 3: return brute_force(p, lo, hi)",
    "  mid = (lo + hi) / 2; line = p[mid].x",
    "  d = min(closest(p, lo, mid), closest(p, mid+1, hi))",
    "  strip = points closer than d to the line, sorted by y",
    "  for each strip pair closer than d in y:",
    "    d = min(d, dist(pair))",
    "  return d",
];

/// Best subarray `a[start..=end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubarrayResult {
    /// First index
    pub start: usize,
    /// Last index, inclusive
    pub end: usize,
    /// Sum of the elements
    pub sum: i64,
}

impl fmt::Display for SubarrayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a[{}..={}] with sum {}", self.start, self.end, self.sum)
    }
}

type Span = (usize, usize, i64);

/// Divide and conquer maximum subarray
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumSubarray;

impl MaximumSubarray {
    fn solve(lo: usize, hi: usize, s: &mut SubarraySnapshot, recorder: &mut Recorder<SubarraySnapshot>) -> Span {
        s.range = Some((lo, hi));
        s.candidate = None;
        if lo == hi {
            let best = (lo, lo, s.array[lo]);
            s.mid = None;
            s.best = Some(best);
            recorder.emit(s, format!("Single element a[{lo}]={} is its own best", best.2), &[1, 2]);
            return best;
        }

        let mid = lo + (hi - lo) / 2;
        s.mid = Some(mid);
        s.best = None;
        recorder.emit(s, format!("Split {lo}..={hi} at {mid}"), &[3]);

        let left = Self::solve(lo, mid, s, recorder);
        let right = Self::solve(mid + 1, hi, s, recorder);

        s.range = Some((lo, hi));
        s.mid = Some(mid);
        let cross = Self::crossing(lo, mid, hi, &s.array);
        s.candidate = Some(cross);
        s.best = None;
        recorder.emit(
            s,
            format!("Best span crossing {mid}|{}: {}..={} with sum {}", mid + 1, cross.0, cross.1, cross.2),
            &[6, 8],
        );

        let (best, which) = if left.2 >= right.2 && left.2 >= cross.2 {
            (left, "left half")
        } else if right.2 >= left.2 && right.2 >= cross.2 {
            (right, "right half")
        } else {
            (cross, "crossing span")
        };
        s.candidate = None;
        s.best = Some(best);
        recorder.emit(
            s,
            format!(
                "Sums: left {}, right {}, crossing {}; keep the {which}",
                left.2, right.2, cross.2
            ),
            &[7],
        );
        best
    }

    fn crossing(lo: usize, mid: usize, hi: usize, array: &[i64]) -> Span {
        let mut left_sum = i64::MIN;
        let mut max_left = mid;
        let mut sum = 0i64;
        for i in (lo..=mid).rev() {
            sum += array[i];
            if sum > left_sum {
                left_sum = sum;
                max_left = i;
            }
        }

        let mut right_sum = i64::MIN;
        let mut max_right = mid + 1;
        sum = 0;
        for (offset, value) in array[mid + 1..=hi].iter().enumerate() {
            sum += *value;
            if sum > right_sum {
                right_sum = sum;
                max_right = mid + 1 + offset;
            }
        }

        (max_left, max_right, left_sum + right_sum)
    }
}

impl InstrumentedAlgorithm for MaximumSubarray {
    type Input = [i64];
    type Snapshot = SubarraySnapshot;
    type Output = SubarrayResult;

    fn name(&self) -> &'static str {
        "maximum-subarray"
    }

    fn source(&self) -> &'static [&'static str] {
        SUBARRAY_SOURCE
    }

    fn validate(&self, input: &[i64]) -> Result<(), ValidationError> {
        checks::length_within("array length", input.len(), 1, MAX_SUBARRAY_LEN)?;
        checks::magnitudes_within("array values", input.iter().copied())
    }

    fn execute(
        &self,
        input: &[i64],
        recorder: &mut Recorder<SubarraySnapshot>,
    ) -> Result<SubarrayResult, AlgorithmError> {
        let mut s = SubarraySnapshot {
            array: input.to_vec(),
            ..SubarraySnapshot::default()
        };
        let (start, end, sum) = Self::solve(0, input.len() - 1, &mut s, recorder);

        let result = SubarrayResult { start, end, sum };
        s.range = None;
        s.mid = None;
        s.candidate = None;
        s.best = Some((start, end, sum));
        recorder.emit(&s, format!("Maximum subarray: {result}"), &[7]);
        Ok(result)
    }

    fn is_consistent(&self, last: &SubarraySnapshot, output: &SubarrayResult) -> bool {
        last.best == Some((output.start, output.end, output.sum))
    }
}

/// Closest pair of points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosestPairResult {
    /// One point of the pair
    pub first: Point,
    /// The other point
    pub second: Point,
    /// Squared distance between them
    pub distance_sq: i64,
}

impl fmt::Display for ClosestPairResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {} (squared distance {})", self.first, self.second, self.distance_sq)
    }
}

type Pair = (usize, usize, i64);

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Divide and conquer closest pair on squared integer distances.
///
/// Indices in snapshots refer to the points after sorting by x.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestPair;

impl ClosestPair {
    fn publish(s: &mut PointsSnapshot, best: Pair) {
        s.best = Some((best.0, best.1));
        s.best_distance_sq = Some(best.2);
    }

    fn brute_force(lo: usize, hi: usize, s: &mut PointsSnapshot, recorder: &mut Recorder<PointsSnapshot>) -> Pair {
        let mut best: Option<Pair> = None;
        for i in lo..=hi {
            for j in i + 1..=hi {
                let d = s.points[i].distance_sq(&s.points[j]);
                s.comparing = Some((i, j));
                let improved = best.map_or(true, |(_, _, b)| d < b);
                if improved {
                    best = Some((i, j, d));
                    Self::publish(s, (i, j, d));
                }
                let verdict = if improved { "new best" } else { "not closer" };
                recorder.emit(
                    s,
                    format!("Compare {} and {}: d^2 = {d}, {verdict}", s.points[i], s.points[j]),
                    &[3],
                );
            }
        }
        s.comparing = None;
        best.unwrap_or((lo, hi, i64::MAX))
    }

    fn solve(lo: usize, hi: usize, s: &mut PointsSnapshot, recorder: &mut Recorder<PointsSnapshot>) -> Pair {
        s.range = Some((lo, hi));
        s.divide_x = None;
        s.strip.clear();
        s.best = None;
        s.best_distance_sq = None;
        if hi - lo < 3 {
            recorder.emit(s, format!("Only {} points in {lo}..={hi}: brute force", hi - lo + 1), &[3]);
            return Self::brute_force(lo, hi, s, recorder);
        }

        let mid = lo + (hi - lo) / 2;
        let line = s.points[mid].x;
        s.divide_x = Some(line);
        recorder.emit(s, format!("Divide {lo}..={hi} at x = {line}"), &[4]);

        let left = Self::solve(lo, mid, s, recorder);
        let right = Self::solve(mid + 1, hi, s, recorder);
        let mut best = if right.2 < left.2 { right } else { left };

        s.range = Some((lo, hi));
        s.divide_x = Some(line);
        Self::publish(s, best);
        let mut strip: Vec<usize> = (lo..=hi)
            .filter(|&i| {
                let dx = s.points[i].x - line;
                dx * dx < best.2
            })
            .collect();
        strip.sort_by_key(|&i| (s.points[i].y, i));
        s.strip = strip.clone();
        recorder.emit(
            s,
            format!("Halves give d^2 = {}; {} points lie in the strip", best.2, strip.len()),
            &[5, 6],
        );

        for (k, &i) in strip.iter().enumerate() {
            for &j in &strip[k + 1..] {
                let dy = s.points[j].y - s.points[i].y;
                if dy * dy >= best.2 {
                    break;
                }
                let d = s.points[i].distance_sq(&s.points[j]);
                let (a, b) = ordered(i, j);
                s.comparing = Some((a, b));
                let improved = d < best.2;
                if improved {
                    best = (a, b, d);
                    Self::publish(s, best);
                }
                let verdict = if improved { "closer across the line" } else { "not closer" };
                recorder.emit(
                    s,
                    format!("Strip pair {} and {}: d^2 = {d}, {verdict}", s.points[a], s.points[b]),
                    &[7, 8],
                );
            }
        }

        s.comparing = None;
        s.strip.clear();
        recorder.emit(s, format!("Closest in {lo}..={hi}: d^2 = {}", best.2), &[9]);
        best
    }
}

impl InstrumentedAlgorithm for ClosestPair {
    type Input = [Point];
    type Snapshot = PointsSnapshot;
    type Output = ClosestPairResult;

    fn name(&self) -> &'static str {
        "closest-pair"
    }

    fn source(&self) -> &'static [&'static str] {
        CLOSEST_SOURCE
    }

    fn validate(&self, input: &[Point]) -> Result<(), ValidationError> {
        checks::length_within("point count", input.len(), 2, MAX_POINTS)?;
        checks::magnitudes_within("coordinates", input.iter().flat_map(|p| [p.x, p.y]))
    }

    fn execute(
        &self,
        input: &[Point],
        recorder: &mut Recorder<PointsSnapshot>,
    ) -> Result<ClosestPairResult, AlgorithmError> {
        let mut points = input.to_vec();
        points.sort_by_key(|p| (p.x, p.y));
        let mut s = PointsSnapshot {
            points,
            ..PointsSnapshot::default()
        };
        recorder.emit(&s, format!("Sort {} points by x", s.points.len()), &[1]);

        let (a, b, distance_sq) = Self::solve(0, s.points.len() - 1, &mut s, recorder);
        if distance_sq == i64::MAX {
            return Err(AlgorithmError::Invariant("no pair was compared".into()));
        }

        let result = ClosestPairResult {
            first: s.points[a],
            second: s.points[b],
            distance_sq,
        };
        s.range = None;
        s.divide_x = None;
        s.comparing = None;
        Self::publish(&mut s, (a, b, distance_sq));
        recorder.emit(&s, format!("Closest pair: {result}"), &[9]);
        Ok(result)
    }

    fn is_consistent(&self, last: &PointsSnapshot, output: &ClosestPairResult) -> bool {
        match last.best {
            Some((a, b)) => {
                last.points.get(a) == Some(&output.first)
                    && last.points.get(b) == Some(&output.second)
                    && last.best_distance_sq == Some(output.distance_sq)
            }
            None => false,
        }
    }
}
