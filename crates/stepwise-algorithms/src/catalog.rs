//! Algorithm catalog
//!
//! [`AlgorithmKind`] names every instrumented algorithm, knows which problem
//! shape and size range it accepts, and [`run_algorithm`] records it against a
//! [`Problem`], lifting the family snapshot into [`Snapshot`] and the result
//! into [`Outcome`].

use crate::divide::{ClosestPair, ClosestPairResult, MaximumSubarray, SubarrayResult};
use crate::dynamic::{Fibonacci, Knapsack, KnapsackResult, LcsResult, LongestCommonSubsequence};
use crate::generator::ProblemGenerator;
use crate::graph::{BreadthFirstSearch, DepthFirstSearch, Dijkstra};
use crate::greedy::{ActivitySelection, ChangeResult, CoinChange};
use crate::problem::{
    CoinProblem, Graph, Interval, KnapsackProblem, Point, Problem, ProblemShape, StringPair,
    TargetProblem,
};
use crate::searching::{BinarySearch, LinearSearch, SearchResult};
use crate::snapshot::Snapshot;
use crate::sorting::{BubbleSort, InsertionSort, MergeSort, QuickSort, SelectionSort};
use crate::two_pointer::{ContainerResult, ContainerWithMostWater, PairSum, TwoSum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stepwise_trace::{record, History, InstrumentedAlgorithm, TraceError, ValidationError};

/// Algorithm families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Comparison sorts
    Sorting,
    /// Linear and binary search
    Searching,
    /// Two-pointer and hash scans
    TwoPointer,
    /// Traversals and shortest paths
    Graph,
    /// Table-filling dynamic programming
    DynamicProgramming,
    /// Greedy choice
    Greedy,
    /// Divide and conquer
    DivideAndConquer,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Sorting => "sorting",
            Family::Searching => "searching",
            Family::TwoPointer => "two pointer",
            Family::Graph => "graph",
            Family::DynamicProgramming => "dynamic programming",
            Family::Greedy => "greedy",
            Family::DivideAndConquer => "divide and conquer",
        };
        f.write_str(name)
    }
}

/// Accepted problem sizes for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// Smallest size
    pub min: usize,
    /// Largest size
    pub max: usize,
    /// Size used when none is configured
    pub default: usize,
}

impl SizeLimits {
    const fn new(min: usize, max: usize, default: usize) -> Self {
        Self { min, max, default }
    }

    /// Whether `size` is accepted
    #[inline]
    #[must_use]
    pub fn contains(&self, size: usize) -> bool {
        (self.min..=self.max).contains(&size)
    }

    /// Pull `size` into range
    #[inline]
    #[must_use]
    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min, self.max)
    }
}

impl fmt::Display for SizeLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Unrecognized algorithm name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

/// Every algorithm in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum AlgorithmKind {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    TwoSum,
    PairSum,
    ContainerWithMostWater,
    BreadthFirstSearch,
    DepthFirstSearch,
    Dijkstra,
    Fibonacci,
    Knapsack,
    LongestCommonSubsequence,
    ActivitySelection,
    CoinChange,
    MaximumSubarray,
    ClosestPair,
}

impl AlgorithmKind {
    /// All algorithms, grouped by family
    pub const ALL: [AlgorithmKind; 20] = [
        AlgorithmKind::BubbleSort,
        AlgorithmKind::SelectionSort,
        AlgorithmKind::InsertionSort,
        AlgorithmKind::MergeSort,
        AlgorithmKind::QuickSort,
        AlgorithmKind::LinearSearch,
        AlgorithmKind::BinarySearch,
        AlgorithmKind::TwoSum,
        AlgorithmKind::PairSum,
        AlgorithmKind::ContainerWithMostWater,
        AlgorithmKind::BreadthFirstSearch,
        AlgorithmKind::DepthFirstSearch,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Fibonacci,
        AlgorithmKind::Knapsack,
        AlgorithmKind::LongestCommonSubsequence,
        AlgorithmKind::ActivitySelection,
        AlgorithmKind::CoinChange,
        AlgorithmKind::MaximumSubarray,
        AlgorithmKind::ClosestPair,
    ];

    /// Kebab-case name, as accepted by [`FromStr`]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::BubbleSort => BubbleSort.name(),
            AlgorithmKind::SelectionSort => SelectionSort.name(),
            AlgorithmKind::InsertionSort => InsertionSort.name(),
            AlgorithmKind::MergeSort => MergeSort.name(),
            AlgorithmKind::QuickSort => QuickSort.name(),
            AlgorithmKind::LinearSearch => LinearSearch.name(),
            AlgorithmKind::BinarySearch => BinarySearch.name(),
            AlgorithmKind::TwoSum => TwoSum.name(),
            AlgorithmKind::PairSum => PairSum.name(),
            AlgorithmKind::ContainerWithMostWater => ContainerWithMostWater.name(),
            AlgorithmKind::BreadthFirstSearch => BreadthFirstSearch.name(),
            AlgorithmKind::DepthFirstSearch => DepthFirstSearch.name(),
            AlgorithmKind::Dijkstra => Dijkstra.name(),
            AlgorithmKind::Fibonacci => Fibonacci.name(),
            AlgorithmKind::Knapsack => Knapsack.name(),
            AlgorithmKind::LongestCommonSubsequence => LongestCommonSubsequence.name(),
            AlgorithmKind::ActivitySelection => ActivitySelection.name(),
            AlgorithmKind::CoinChange => CoinChange.name(),
            AlgorithmKind::MaximumSubarray => MaximumSubarray.name(),
            AlgorithmKind::ClosestPair => ClosestPair.name(),
        }
    }

    /// Source listing whose 1-based lines the steps highlight
    #[must_use]
    pub fn source(self) -> &'static [&'static str] {
        match self {
            AlgorithmKind::BubbleSort => BubbleSort.source(),
            AlgorithmKind::SelectionSort => SelectionSort.source(),
            AlgorithmKind::InsertionSort => InsertionSort.source(),
            AlgorithmKind::MergeSort => MergeSort.source(),
            AlgorithmKind::QuickSort => QuickSort.source(),
            AlgorithmKind::LinearSearch => LinearSearch.source(),
            AlgorithmKind::BinarySearch => BinarySearch.source(),
            AlgorithmKind::TwoSum => TwoSum.source(),
            AlgorithmKind::PairSum => PairSum.source(),
            AlgorithmKind::ContainerWithMostWater => ContainerWithMostWater.source(),
            AlgorithmKind::BreadthFirstSearch => BreadthFirstSearch.source(),
            AlgorithmKind::DepthFirstSearch => DepthFirstSearch.source(),
            AlgorithmKind::Dijkstra => Dijkstra.source(),
            AlgorithmKind::Fibonacci => Fibonacci.source(),
            AlgorithmKind::Knapsack => Knapsack.source(),
            AlgorithmKind::LongestCommonSubsequence => LongestCommonSubsequence.source(),
            AlgorithmKind::ActivitySelection => ActivitySelection.source(),
            AlgorithmKind::CoinChange => CoinChange.source(),
            AlgorithmKind::MaximumSubarray => MaximumSubarray.source(),
            AlgorithmKind::ClosestPair => ClosestPair.source(),
        }
    }

    /// Family the algorithm belongs to
    #[must_use]
    pub fn family(self) -> Family {
        match self {
            AlgorithmKind::BubbleSort
            | AlgorithmKind::SelectionSort
            | AlgorithmKind::InsertionSort
            | AlgorithmKind::MergeSort
            | AlgorithmKind::QuickSort => Family::Sorting,
            AlgorithmKind::LinearSearch | AlgorithmKind::BinarySearch => Family::Searching,
            AlgorithmKind::TwoSum | AlgorithmKind::PairSum | AlgorithmKind::ContainerWithMostWater => {
                Family::TwoPointer
            }
            AlgorithmKind::BreadthFirstSearch | AlgorithmKind::DepthFirstSearch | AlgorithmKind::Dijkstra => {
                Family::Graph
            }
            AlgorithmKind::Fibonacci | AlgorithmKind::Knapsack | AlgorithmKind::LongestCommonSubsequence => {
                Family::DynamicProgramming
            }
            AlgorithmKind::ActivitySelection | AlgorithmKind::CoinChange => Family::Greedy,
            AlgorithmKind::MaximumSubarray | AlgorithmKind::ClosestPair => Family::DivideAndConquer,
        }
    }

    /// Problem shape the generator should produce
    #[must_use]
    pub fn shape(self) -> ProblemShape {
        match self {
            AlgorithmKind::BubbleSort
            | AlgorithmKind::SelectionSort
            | AlgorithmKind::InsertionSort
            | AlgorithmKind::MergeSort
            | AlgorithmKind::QuickSort
            | AlgorithmKind::ContainerWithMostWater => ProblemShape::Array,
            AlgorithmKind::LinearSearch => ProblemShape::SearchTarget,
            AlgorithmKind::BinarySearch => ProblemShape::SortedSearchTarget,
            AlgorithmKind::TwoSum => ProblemShape::PairTarget,
            AlgorithmKind::PairSum => ProblemShape::SortedPairTarget,
            AlgorithmKind::BreadthFirstSearch | AlgorithmKind::DepthFirstSearch | AlgorithmKind::Dijkstra => {
                ProblemShape::Graph
            }
            AlgorithmKind::Fibonacci => ProblemShape::Fibonacci,
            AlgorithmKind::Knapsack => ProblemShape::Knapsack,
            AlgorithmKind::LongestCommonSubsequence => ProblemShape::Strings,
            AlgorithmKind::ActivitySelection => ProblemShape::Intervals,
            AlgorithmKind::CoinChange => ProblemShape::Coins,
            AlgorithmKind::MaximumSubarray => ProblemShape::SignedArray,
            AlgorithmKind::ClosestPair => ProblemShape::Points,
        }
    }

    /// Sizes the generator may be asked for
    #[must_use]
    pub fn size_limits(self) -> SizeLimits {
        match self.family() {
            Family::Sorting => SizeLimits::new(1, crate::sorting::MAX_SORT_LEN, 10),
            Family::Searching => SizeLimits::new(1, crate::searching::MAX_SEARCH_LEN, 15),
            Family::TwoPointer => SizeLimits::new(2, crate::two_pointer::MAX_PAIR_LEN, 10),
            Family::Graph => SizeLimits::new(1, crate::graph::MAX_GRAPH_NODES, 8),
            Family::DynamicProgramming => match self {
                AlgorithmKind::Fibonacci => SizeLimits::new(0, crate::dynamic::MAX_FIBONACCI, 10),
                AlgorithmKind::Knapsack => SizeLimits::new(1, crate::dynamic::MAX_KNAPSACK_ITEMS, 5),
                _ => SizeLimits::new(1, crate::dynamic::MAX_LCS_LEN, 6),
            },
            Family::Greedy => match self {
                AlgorithmKind::CoinChange => SizeLimits::new(1, crate::greedy::MAX_COIN_AMOUNT, 63),
                _ => SizeLimits::new(1, crate::greedy::MAX_ACTIVITIES, 8),
            },
            Family::DivideAndConquer => match self {
                AlgorithmKind::ClosestPair => SizeLimits::new(2, crate::divide::MAX_POINTS, 10),
                _ => SizeLimits::new(1, crate::divide::MAX_SUBARRAY_LEN, 12),
            },
        }
    }

    /// Generate a problem for this algorithm; `size` is clamped into range
    pub fn generate(self, generator: &mut ProblemGenerator, size: usize) -> Problem {
        generator.generate(self.shape(), self.size_limits().clamp(size))
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Result of any algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Sorted array
    Sorted(Vec<i64>),
    /// Search outcome
    Search(SearchResult),
    /// Pair of indices (two-sum, pair sum)
    Pair(Option<(usize, usize)>),
    /// Best container
    Container(ContainerResult),
    /// Visit order
    Order(Vec<usize>),
    /// Shortest distances from node 0
    Distances(Vec<Option<u64>>),
    /// Fibonacci number
    Fibonacci(u64),
    /// Knapsack selection
    Knapsack(KnapsackResult),
    /// Longest common subsequence
    Lcs(LcsResult),
    /// Selected activities
    Activities(Vec<Interval>),
    /// Change made
    Change(ChangeResult),
    /// Maximum subarray
    Subarray(SubarrayResult),
    /// Closest pair of points
    ClosestPair(ClosestPairResult),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Sorted(values) => write!(f, "sorted {values:?}"),
            Outcome::Search(r) => r.fmt(f),
            Outcome::Pair(Some((i, j))) => write!(f, "pair ({i}, {j})"),
            Outcome::Pair(None) => write!(f, "no pair"),
            Outcome::Container(r) => r.fmt(f),
            Outcome::Order(order) => write!(f, "visit order {order:?}"),
            Outcome::Distances(distances) => {
                write!(f, "distances")?;
                for (node, d) in distances.iter().enumerate() {
                    match d {
                        Some(d) => write!(f, " {node}:{d}")?,
                        None => write!(f, " {node}:unreachable")?,
                    }
                }
                Ok(())
            }
            Outcome::Fibonacci(value) => write!(f, "{value}"),
            Outcome::Knapsack(r) => r.fmt(f),
            Outcome::Lcs(r) => r.fmt(f),
            Outcome::Activities(selected) => {
                write!(f, "{} activities:", selected.len())?;
                for interval in selected {
                    write!(f, " {interval}")?;
                }
                Ok(())
            }
            Outcome::Change(r) => r.fmt(f),
            Outcome::Subarray(r) => r.fmt(f),
            Outcome::ClosestPair(r) => r.fmt(f),
        }
    }
}

/// One recorded run
#[derive(Debug, Clone)]
pub struct Run {
    /// Algorithm that ran
    pub kind: AlgorithmKind,
    /// Recorded steps
    pub history: History<Snapshot>,
    /// Result reported at completion
    pub outcome: Outcome,
}

fn lift<A>(
    algorithm: &A,
    input: &A::Input,
    snapshot: fn(A::Snapshot) -> Snapshot,
    outcome: fn(A::Output) -> Outcome,
) -> Result<(History<Snapshot>, Outcome), TraceError>
where
    A: InstrumentedAlgorithm,
{
    let (history, output) = record(algorithm, input)?;
    Ok((history.map(snapshot), outcome(output)))
}

fn mismatch(kind: AlgorithmKind, problem: &Problem) -> ValidationError {
    ValidationError::ProblemMismatch {
        algorithm: kind.name(),
        expected: kind.shape().problem_kind(),
        actual: problem.kind_name(),
    }
}

fn array(kind: AlgorithmKind, problem: &Problem) -> Result<&[i64], ValidationError> {
    match problem {
        Problem::Array(values) => Ok(values.as_slice()),
        other => Err(mismatch(kind, other)),
    }
}

fn target(kind: AlgorithmKind, problem: &Problem) -> Result<&TargetProblem, ValidationError> {
    match problem {
        Problem::Target(t) => Ok(t),
        other => Err(mismatch(kind, other)),
    }
}

fn graph(kind: AlgorithmKind, problem: &Problem) -> Result<&Graph, ValidationError> {
    match problem {
        Problem::Graph(g) => Ok(g),
        other => Err(mismatch(kind, other)),
    }
}

fn knapsack(kind: AlgorithmKind, problem: &Problem) -> Result<&KnapsackProblem, ValidationError> {
    match problem {
        Problem::Knapsack(k) => Ok(k),
        other => Err(mismatch(kind, other)),
    }
}

fn fibonacci(kind: AlgorithmKind, problem: &Problem) -> Result<&usize, ValidationError> {
    match problem {
        Problem::Fibonacci(n) => Ok(n),
        other => Err(mismatch(kind, other)),
    }
}

fn strings(kind: AlgorithmKind, problem: &Problem) -> Result<&StringPair, ValidationError> {
    match problem {
        Problem::Strings(s) => Ok(s),
        other => Err(mismatch(kind, other)),
    }
}

fn intervals(kind: AlgorithmKind, problem: &Problem) -> Result<&[Interval], ValidationError> {
    match problem {
        Problem::Intervals(i) => Ok(i.as_slice()),
        other => Err(mismatch(kind, other)),
    }
}

fn coins(kind: AlgorithmKind, problem: &Problem) -> Result<&CoinProblem, ValidationError> {
    match problem {
        Problem::Coins(c) => Ok(c),
        other => Err(mismatch(kind, other)),
    }
}

fn points(kind: AlgorithmKind, problem: &Problem) -> Result<&[Point], ValidationError> {
    match problem {
        Problem::Points(p) => Ok(p.as_slice()),
        other => Err(mismatch(kind, other)),
    }
}

/// Record `kind` against `problem`.
///
/// # Errors
/// - [`TraceError::Validation`] if the problem has the wrong shape or fails
///   the algorithm's checks
/// - [`TraceError::Algorithm`] if the run itself fails
pub fn run_algorithm(kind: AlgorithmKind, problem: &Problem) -> Result<Run, TraceError> {
    use AlgorithmKind as K;

    let (history, outcome) = match kind {
        K::BubbleSort => lift(&BubbleSort, array(kind, problem)?, Snapshot::Sort, Outcome::Sorted),
        K::SelectionSort => lift(&SelectionSort, array(kind, problem)?, Snapshot::Sort, Outcome::Sorted),
        K::InsertionSort => lift(&InsertionSort, array(kind, problem)?, Snapshot::Sort, Outcome::Sorted),
        K::MergeSort => lift(&MergeSort, array(kind, problem)?, Snapshot::Sort, Outcome::Sorted),
        K::QuickSort => lift(&QuickSort, array(kind, problem)?, Snapshot::Sort, Outcome::Sorted),
        K::LinearSearch => lift(&LinearSearch, target(kind, problem)?, Snapshot::Search, Outcome::Search),
        K::BinarySearch => lift(&BinarySearch, target(kind, problem)?, Snapshot::Search, Outcome::Search),
        K::TwoSum => lift(&TwoSum, target(kind, problem)?, Snapshot::TwoPointer, Outcome::Pair),
        K::PairSum => lift(&PairSum, target(kind, problem)?, Snapshot::TwoPointer, Outcome::Pair),
        K::ContainerWithMostWater => lift(
            &ContainerWithMostWater,
            array(kind, problem)?,
            Snapshot::TwoPointer,
            Outcome::Container,
        ),
        K::BreadthFirstSearch => lift(&BreadthFirstSearch, graph(kind, problem)?, Snapshot::Graph, Outcome::Order),
        K::DepthFirstSearch => lift(&DepthFirstSearch, graph(kind, problem)?, Snapshot::Graph, Outcome::Order),
        K::Dijkstra => lift(&Dijkstra, graph(kind, problem)?, Snapshot::Graph, Outcome::Distances),
        K::Fibonacci => lift(&Fibonacci, fibonacci(kind, problem)?, Snapshot::Table, Outcome::Fibonacci),
        K::Knapsack => lift(&Knapsack, knapsack(kind, problem)?, Snapshot::Table, Outcome::Knapsack),
        K::LongestCommonSubsequence => lift(
            &LongestCommonSubsequence,
            strings(kind, problem)?,
            Snapshot::Table,
            Outcome::Lcs,
        ),
        K::ActivitySelection => lift(
            &ActivitySelection,
            intervals(kind, problem)?,
            Snapshot::Activity,
            Outcome::Activities,
        ),
        K::CoinChange => lift(&CoinChange, coins(kind, problem)?, Snapshot::Coin, Outcome::Change),
        K::MaximumSubarray => lift(
            &MaximumSubarray,
            array(kind, problem)?,
            Snapshot::Subarray,
            Outcome::Subarray,
        ),
        K::ClosestPair => lift(&ClosestPair, points(kind, problem)?, Snapshot::Points, Outcome::ClosestPair),
    }?;

    tracing::debug!(algorithm = kind.name(), steps = history.len(), %outcome, "run complete");
    Ok(Run {
        kind,
        history,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(kind));
        }
        assert_eq!("Merge_Sort".parse::<AlgorithmKind>(), Ok(AlgorithmKind::MergeSort));
        assert_eq!(
            "bogo-sort".parse::<AlgorithmKind>(),
            Err(UnknownAlgorithm("bogo-sort".into()))
        );
    }

    #[test]
    fn serde_names_match_display_names() {
        for kind in AlgorithmKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn default_sizes_are_within_limits() {
        for kind in AlgorithmKind::ALL {
            let limits = kind.size_limits();
            assert!(limits.contains(limits.default), "{kind}");
        }
    }

    #[test]
    fn every_generated_problem_records() {
        for kind in AlgorithmKind::ALL {
            let mut generator = ProblemGenerator::new(11);
            let problem = kind.generate(&mut generator, kind.size_limits().default);
            let run = run_algorithm(kind, &problem).unwrap_or_else(|e| panic!("{kind}: {e}"));
            assert!(run.history.len() >= 2, "{kind}");
        }
    }

    #[test]
    fn wrong_shape_is_a_validation_error() {
        let err = run_algorithm(AlgorithmKind::Dijkstra, &Problem::Array(vec![1, 2])).unwrap_err();
        assert_eq!(
            err,
            TraceError::Validation(ValidationError::ProblemMismatch {
                algorithm: "dijkstra",
                expected: "graph",
                actual: "array",
            })
        );
    }

    #[test]
    fn source_lines_cover_highlights() {
        let problem = Problem::Array(vec![5, 3, 4, 1]);
        let run = run_algorithm(AlgorithmKind::QuickSort, &problem).unwrap();
        let lines = AlgorithmKind::QuickSort.source().len();
        for step in &run.history {
            assert!(step.highlighted_lines().iter().all(|&l| (1..=lines as u32).contains(&l)));
        }
    }
}
