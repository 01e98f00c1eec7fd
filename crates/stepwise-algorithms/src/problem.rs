//! Problem instances
//!
//! A [`Problem`] is the sole input to an instrumented algorithm. Instances come
//! either from the seeded [`ProblemGenerator`](crate::ProblemGenerator) or
//! straight from the user; both paths go through the same validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest absolute value accepted in arithmetic problems (array values,
/// targets, heights, point coordinates). Sums and squared distances over
/// bounded inputs cannot overflow `i64`.
pub const MAX_VALUE_MAGNITUDE: i64 = 1_000_000_000;

/// Values plus a target to look for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProblem {
    /// Candidate values
    pub values: Vec<i64>,
    /// Value being searched for, or the sum to reach
    pub target: i64,
}

/// Undirected weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// One endpoint
    pub from: usize,
    /// Other endpoint
    pub to: usize,
    /// Non-negative weight
    pub weight: u32,
}

/// Undirected graph over nodes `0..node_count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Number of nodes
    pub node_count: usize,
    /// Edge list
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph
    #[must_use]
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Self {
        Self { node_count, edges }
    }

    /// Adjacency lists with neighbours in ascending order.
    ///
    /// Out-of-range endpoints are skipped; validation rejects them earlier.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(usize, u32)>> {
        let mut adjacency = vec![Vec::new(); self.node_count];
        for edge in &self.edges {
            if edge.from < self.node_count && edge.to < self.node_count {
                adjacency[edge.from].push((edge.to, edge.weight));
                adjacency[edge.to].push((edge.from, edge.weight));
            }
        }
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
        }
        adjacency
    }
}

/// 0/1 knapsack instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackProblem {
    /// Item weights
    pub weights: Vec<u64>,
    /// Item values, parallel to `weights`
    pub values: Vec<i64>,
    /// Knapsack capacity
    pub capacity: u64,
}

/// Two strings to compare
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringPair {
    /// First string
    pub first: String,
    /// Second string
    pub second: String,
}

/// Half-open activity interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start time
    pub start: i64,
    /// Finish time
    pub end: i64,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Coin system and amount to change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinProblem {
    /// Coin denominations
    pub coins: Vec<u64>,
    /// Amount to make
    pub amount: u64,
}

/// Point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i64,
    /// Y coordinate
    pub y: i64,
}

impl Point {
    /// Create a point
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`
    #[inline]
    #[must_use]
    pub fn distance_sq(&self, other: &Point) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A problem instance, tagged by shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Problem {
    /// Plain array (sorting, container, max subarray)
    Array(Vec<i64>),
    /// Array plus target (search, two-sum, pair sum)
    Target(TargetProblem),
    /// Graph traversal and shortest paths
    Graph(Graph),
    /// 0/1 knapsack
    Knapsack(KnapsackProblem),
    /// Fibonacci index
    Fibonacci(usize),
    /// Longest common subsequence
    Strings(StringPair),
    /// Activity selection
    Intervals(Vec<Interval>),
    /// Greedy change making
    Coins(CoinProblem),
    /// Closest pair of points
    Points(Vec<Point>),
}

impl Problem {
    /// Short name of the problem shape
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Problem::Array(_) => "array",
            Problem::Target(_) => "array with target",
            Problem::Graph(_) => "graph",
            Problem::Knapsack(_) => "knapsack items",
            Problem::Fibonacci(_) => "fibonacci index",
            Problem::Strings(_) => "string pair",
            Problem::Intervals(_) => "intervals",
            Problem::Coins(_) => "coin system",
            Problem::Points(_) => "points",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Array(values) => write!(f, "array {values:?}"),
            Problem::Target(p) => write!(f, "array {:?}, target {}", p.values, p.target),
            Problem::Graph(g) => {
                write!(f, "graph with {} nodes:", g.node_count)?;
                for e in &g.edges {
                    write!(f, " {}-{}({})", e.from, e.to, e.weight)?;
                }
                Ok(())
            }
            Problem::Knapsack(k) => write!(
                f,
                "weights {:?}, values {:?}, capacity {}",
                k.weights, k.values, k.capacity
            ),
            Problem::Fibonacci(n) => write!(f, "fib({n})"),
            Problem::Strings(s) => write!(f, "\"{}\" vs \"{}\"", s.first, s.second),
            Problem::Intervals(intervals) => {
                write!(f, "activities")?;
                for i in intervals {
                    write!(f, " {i}")?;
                }
                Ok(())
            }
            Problem::Coins(c) => write!(f, "coins {:?}, amount {}", c.coins, c.amount),
            Problem::Points(points) => {
                write!(f, "points")?;
                for p in points {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
        }
    }
}

/// Problem shapes an algorithm may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemShape {
    /// Unsorted positive integers
    Array,
    /// Integers of both signs
    SignedArray,
    /// Unsorted array and a target value
    SearchTarget,
    /// Sorted array and a target value
    SortedSearchTarget,
    /// Unsorted array with a guaranteed pair summing to the target
    PairTarget,
    /// Sorted array with a guaranteed pair summing to the target
    SortedPairTarget,
    /// Connected weighted graph
    Graph,
    /// Knapsack items
    Knapsack,
    /// Fibonacci index
    Fibonacci,
    /// Two strings
    Strings,
    /// Activity intervals
    Intervals,
    /// Coin system with amount
    Coins,
    /// Points in the plane
    Points,
}

impl ProblemShape {
    /// Name of the [`Problem`] variant carrying this shape
    #[must_use]
    pub fn problem_kind(self) -> &'static str {
        match self {
            ProblemShape::Array | ProblemShape::SignedArray => "array",
            ProblemShape::SearchTarget
            | ProblemShape::SortedSearchTarget
            | ProblemShape::PairTarget
            | ProblemShape::SortedPairTarget => "array with target",
            ProblemShape::Graph => "graph",
            ProblemShape::Knapsack => "knapsack items",
            ProblemShape::Fibonacci => "fibonacci index",
            ProblemShape::Strings => "string pair",
            ProblemShape::Intervals => "intervals",
            ProblemShape::Coins => "coin system",
            ProblemShape::Points => "points",
        }
    }
}
