//! Seeded problem generation
//!
//! The same seed, shape and size always produce the same [`Problem`]. Sizes
//! are expected to be within the algorithm's limits already; the catalog
//! clamps them before calling in.

use crate::problem::{
    CoinProblem, Edge, Graph, Interval, KnapsackProblem, Point, Problem, ProblemShape, StringPair,
    TargetProblem, MAX_VALUE_MAGNITUDE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Default range for generated array values
pub const DEFAULT_VALUE_RANGE: RangeInclusive<i64> = 1..=99;

const SIGNED_RANGE: RangeInclusive<i64> = -20..=20;
const TARGET_PRESENT_PROBABILITY: f64 = 0.7;
const MAX_EDGE_WEIGHT: u32 = 9;
const LCS_ALPHABET: &[u8] = b"ABCD";
const COIN_SYSTEMS: &[&[u64]] = &[&[1, 5, 10, 25], &[1, 3, 4], &[1, 2, 5, 10, 20, 50], &[1, 7, 10]];
const POINT_COORDINATE_MAX: i64 = 99;

/// Deterministic problem generator
#[derive(Debug, Clone)]
pub struct ProblemGenerator {
    rng: StdRng,
    seed: u64,
    value_min: i64,
    value_max: i64,
}

impl ProblemGenerator {
    /// Create a generator from a seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            value_min: *DEFAULT_VALUE_RANGE.start(),
            value_max: *DEFAULT_VALUE_RANGE.end(),
        }
    }

    /// Use a different value range for unsigned array shapes.
    ///
    /// Bounds are clamped to [`MAX_VALUE_MAGNITUDE`] so generated problems
    /// always validate.
    #[must_use]
    pub fn with_value_range(mut self, range: RangeInclusive<i64>) -> Self {
        let (a, b) = range.into_inner();
        let (a, b) = (
            a.clamp(-MAX_VALUE_MAGNITUDE, MAX_VALUE_MAGNITUDE),
            b.clamp(-MAX_VALUE_MAGNITUDE, MAX_VALUE_MAGNITUDE),
        );
        self.value_min = a.min(b);
        self.value_max = a.max(b);
        self
    }

    /// Seed this generator was created with
    #[inline]
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a problem of `shape` scaled by `size`.
    ///
    /// `size` is the array length, node count, item count, Fibonacci index,
    /// string length, activity count, amount or point count depending on shape.
    pub fn generate(&mut self, shape: ProblemShape, size: usize) -> Problem {
        let problem = match shape {
            ProblemShape::Array => Problem::Array(self.values(size)),
            ProblemShape::SignedArray => Problem::Array(
                (0..size).map(|_| self.rng.random_range(SIGNED_RANGE)).collect(),
            ),
            ProblemShape::SearchTarget => Problem::Target(self.search_target(size, false)),
            ProblemShape::SortedSearchTarget => Problem::Target(self.search_target(size, true)),
            ProblemShape::PairTarget => Problem::Target(self.pair_target(size, false)),
            ProblemShape::SortedPairTarget => Problem::Target(self.pair_target(size, true)),
            ProblemShape::Graph => Problem::Graph(self.graph(size)),
            ProblemShape::Knapsack => Problem::Knapsack(self.knapsack(size)),
            ProblemShape::Fibonacci => Problem::Fibonacci(size),
            ProblemShape::Strings => Problem::Strings(StringPair {
                first: self.letters(size),
                second: self.letters(size),
            }),
            ProblemShape::Intervals => Problem::Intervals(self.intervals(size)),
            ProblemShape::Coins => Problem::Coins(self.coins(size)),
            ProblemShape::Points => Problem::Points(self.points(size)),
        };
        tracing::debug!(?shape, size, seed = self.seed, "generated problem");
        problem
    }

    fn values(&mut self, n: usize) -> Vec<i64> {
        (0..n)
            .map(|_| self.rng.random_range(self.value_min..=self.value_max))
            .collect()
    }

    fn search_target(&mut self, n: usize, sorted: bool) -> TargetProblem {
        let mut values = self.values(n);
        if sorted {
            values.sort_unstable();
        }
        let target = if !values.is_empty() && self.rng.random_bool(TARGET_PRESENT_PROBABILITY) {
            values[self.rng.random_range(0..values.len())]
        } else {
            self.rng.random_range(self.value_min..=self.value_max)
        };
        TargetProblem { values, target }
    }

    fn pair_target(&mut self, n: usize, sorted: bool) -> TargetProblem {
        let mut values = self.values(n);
        if sorted {
            values.sort_unstable();
        }
        let target = if values.len() >= 2 {
            let i = self.rng.random_range(0..values.len() - 1);
            let j = self.rng.random_range(i + 1..values.len());
            values[i] + values[j]
        } else {
            self.rng.random_range(self.value_min..=self.value_max)
        };
        TargetProblem { values, target }
    }

    fn graph(&mut self, n: usize) -> Graph {
        let mut edges: Vec<Edge> = Vec::new();
        for to in 1..n {
            let from = self.rng.random_range(0..to);
            let weight = self.rng.random_range(1..=MAX_EDGE_WEIGHT);
            edges.push(Edge { from, to, weight });
        }
        if n >= 3 {
            for _ in 0..n / 2 {
                let u = self.rng.random_range(0..n);
                let v = self.rng.random_range(0..n);
                let duplicate = edges
                    .iter()
                    .any(|e| (e.from == u && e.to == v) || (e.from == v && e.to == u));
                if u != v && !duplicate {
                    let weight = self.rng.random_range(1..=MAX_EDGE_WEIGHT);
                    edges.push(Edge { from: u, to: v, weight });
                }
            }
        }
        Graph::new(n, edges)
    }

    fn knapsack(&mut self, n: usize) -> KnapsackProblem {
        let weights: Vec<u64> = (0..n).map(|_| self.rng.random_range(1..=10)).collect();
        let values = (0..n).map(|_| self.rng.random_range(1..=30)).collect();
        let capacity = (weights.iter().sum::<u64>() / 2).clamp(1, 50);
        KnapsackProblem {
            weights,
            values,
            capacity,
        }
    }

    fn letters(&mut self, n: usize) -> String {
        (0..n)
            .map(|_| char::from(LCS_ALPHABET[self.rng.random_range(0..LCS_ALPHABET.len())]))
            .collect()
    }

    fn intervals(&mut self, n: usize) -> Vec<Interval> {
        (0..n)
            .map(|_| {
                let start = self.rng.random_range(0..=20);
                let end = start + self.rng.random_range(1..=6);
                Interval { start, end }
            })
            .collect()
    }

    fn coins(&mut self, amount: usize) -> CoinProblem {
        let system = COIN_SYSTEMS[self.rng.random_range(0..COIN_SYSTEMS.len())];
        CoinProblem {
            coins: system.to_vec(),
            amount: u64::try_from(amount).unwrap_or(u64::MAX),
        }
    }

    fn points(&mut self, n: usize) -> Vec<Point> {
        (0..n)
            .map(|_| {
                Point::new(
                    self.rng.random_range(0..=POINT_COORDINATE_MAX),
                    self.rng.random_range(0..=POINT_COORDINATE_MAX),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run_algorithm, AlgorithmKind};
    use std::collections::VecDeque;

    #[test]
    fn same_seed_same_problem() {
        let a = ProblemGenerator::new(42).generate(ProblemShape::Graph, 8);
        let b = ProblemGenerator::new(42).generate(ProblemShape::Graph, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = ProblemGenerator::new(1).generate(ProblemShape::Array, 20);
        let b = ProblemGenerator::new(2).generate(ProblemShape::Array, 20);
        assert_ne!(a, b);
    }

    #[test]
    fn values_respect_configured_range() {
        let mut generator = ProblemGenerator::new(7).with_value_range(10..=12);
        let Problem::Array(values) = generator.generate(ProblemShape::Array, 30) else {
            panic!("expected an array");
        };
        assert_eq!(values.len(), 30);
        assert!(values.iter().all(|v| (10..=12).contains(v)));
    }

    #[test]
    fn extreme_value_range_still_yields_valid_problems() {
        for kind in [AlgorithmKind::TwoSum, AlgorithmKind::PairSum, AlgorithmKind::MaximumSubarray] {
            let mut generator = ProblemGenerator::new(1).with_value_range(i64::MAX - 5..=i64::MAX);
            let problem = kind.generate(&mut generator, 4);
            let run = run_algorithm(kind, &problem).unwrap();
            assert!(!run.history.is_empty(), "{kind}");
        }
    }

    #[test]
    fn pair_target_always_has_a_pair() {
        for seed in 0..50 {
            let Problem::Target(p) = ProblemGenerator::new(seed).generate(ProblemShape::SortedPairTarget, 10)
            else {
                panic!("expected a target problem");
            };
            assert!(p.values.windows(2).all(|w| w[0] <= w[1]));
            let has_pair = (0..p.values.len())
                .any(|i| (i + 1..p.values.len()).any(|j| p.values[i] + p.values[j] == p.target));
            assert!(has_pair, "seed {seed}");
        }
    }

    #[test]
    fn generated_graph_is_connected() {
        for seed in 0..20 {
            let Problem::Graph(graph) = ProblemGenerator::new(seed).generate(ProblemShape::Graph, 12) else {
                panic!("expected a graph");
            };
            let adjacency = graph.adjacency();
            let mut seen = vec![false; graph.node_count];
            let mut queue = VecDeque::from([0]);
            seen[0] = true;
            while let Some(u) = queue.pop_front() {
                for &(v, _) in &adjacency[u] {
                    if !seen[v] {
                        seen[v] = true;
                        queue.push_back(v);
                    }
                }
            }
            assert!(seen.iter().all(|s| *s), "seed {seed}");
        }
    }

    #[test]
    fn knapsack_capacity_is_bounded() {
        let Problem::Knapsack(k) = ProblemGenerator::new(3).generate(ProblemShape::Knapsack, 10) else {
            panic!("expected knapsack");
        };
        assert_eq!(k.weights.len(), k.values.len());
        assert!((1..=50).contains(&k.capacity));
    }

    #[test]
    fn intervals_have_positive_length() {
        let Problem::Intervals(intervals) = ProblemGenerator::new(9).generate(ProblemShape::Intervals, 15) else {
            panic!("expected intervals");
        };
        assert!(intervals.iter().all(|i| i.start < i.end));
    }
}
