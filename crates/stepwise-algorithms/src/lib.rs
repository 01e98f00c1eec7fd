//! Stepwise Algorithms
//!
//! Textbook algorithms instrumented for step-by-step playback, the problem
//! model they run on, and a seeded generator for problem instances.
//!
//! # Core Concepts
//!
//! - [`Problem`]: the single input an algorithm runs on, tagged by shape
//! - [`ProblemGenerator`]: deterministic instances from a seed
//! - [`Snapshot`]: tagged union of the per-family snapshot types
//! - [`AlgorithmKind`]: catalog entry with name, family, shape and size limits
//! - [`run_algorithm`]: record any catalog algorithm into a [`Run`]
//!
//! # Families
//!
//! | Family | Algorithms |
//! |--------|------------|
//! | Sorting | bubble, selection, insertion, merge, quick |
//! | Searching | linear, binary |
//! | Two pointer | two-sum, pair sum, container with most water |
//! | Graph | BFS, DFS, Dijkstra |
//! | Dynamic programming | Fibonacci, 0/1 knapsack, LCS |
//! | Greedy | activity selection, coin change |
//! | Divide and conquer | maximum subarray, closest pair |
//!
//! # Example
//!
//! ```rust,ignore
//! use stepwise_algorithms::{run_algorithm, AlgorithmKind, ProblemGenerator};
//!
//! let kind = AlgorithmKind::MergeSort;
//! let problem = kind.generate(&mut ProblemGenerator::new(7), 12);
//! let run = run_algorithm(kind, &problem)?;
//! println!("{} steps, {}", run.history.len(), run.outcome);
//! ```

#![warn(unreachable_pub)]

mod catalog;
mod checks;
pub mod divide;
pub mod dynamic;
mod generator;
pub mod graph;
pub mod greedy;
mod problem;
pub mod searching;
mod snapshot;
pub mod sorting;
pub mod two_pointer;

pub use catalog::{run_algorithm, AlgorithmKind, Family, Outcome, Run, SizeLimits, UnknownAlgorithm};
pub use generator::{ProblemGenerator, DEFAULT_VALUE_RANGE};
pub use problem::{
    CoinProblem, Edge, Graph, Interval, KnapsackProblem, Point, Problem, ProblemShape, StringPair,
    TargetProblem, MAX_VALUE_MAGNITUDE,
};
pub use snapshot::{
    ActivitySnapshot, CoinCount, CoinSnapshot, GraphSnapshot, PointsSnapshot, SearchSnapshot,
    Snapshot, SortSnapshot, SubarraySnapshot, TableSnapshot, TwoPointerSnapshot,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
