//! Graph family: breadth-first search, depth-first search, Dijkstra
//!
//! Every traversal starts at node 0. Neighbours are visited in ascending
//! node order so the recorded histories are reproducible.

use crate::checks;
use crate::problem::Graph;
use crate::snapshot::GraphSnapshot;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use stepwise_trace::{AlgorithmError, InstrumentedAlgorithm, Recorder, ValidationError};

/// Largest graph the visualizations accept
pub const MAX_GRAPH_NODES: usize = 15;

const START: usize = 0;

const BFS_SOURCE: &[&str] = &[
    "queue = [start]; visited[start] = true",
    "while queue not empty:",
    "  u = queue.pop_front()",
    "  visit(u)",
    "  for v in neighbours(u):",
    "    if not visited[v]:",
    "      visited[v] = true; queue.push(v)",
    "return order",
];

const DFS_SOURCE: &[&str] = &[
    "dfs(u):",
    "  visited[u] = true; visit(u)",
    "  for v in neighbours(u):",
    "    if not visited[v]:",
    "      dfs(v)",
    "dfs(start)",
];

const DIJKSTRA_SOURCE: &[&str] = &[
    "dist = [inf, ...]; dist[source] = 0",
    "pq = {(0, source)}",
    "while pq not empty:",
    "  (d, u) = pq.pop_min()",
    "  if u is settled: continue",
    "  settle u",
    "  for (v, w) in neighbours(u):",
    "    if dist[u] + w < dist[v]:",
    "      dist[v] = dist[u] + w; pq.push((dist[v], v))",
    "return dist",
];

fn validate_graph(graph: &Graph) -> Result<(), ValidationError> {
    checks::length_within("node count", graph.node_count, 1, MAX_GRAPH_NODES)?;
    if let Some(edge) = graph
        .edges
        .iter()
        .find(|e| e.from >= graph.node_count || e.to >= graph.node_count)
    {
        return Err(ValidationError::Invalid(format!(
            "edge {}-{} references a node outside 0..{}",
            edge.from, edge.to, graph.node_count
        )));
    }
    Ok(())
}

fn fresh_snapshot(node_count: usize) -> GraphSnapshot {
    GraphSnapshot {
        visited: vec![false; node_count],
        ..GraphSnapshot::default()
    }
}

/// Breadth-first traversal from node 0; output is the visit order
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl InstrumentedAlgorithm for BreadthFirstSearch {
    type Input = Graph;
    type Snapshot = GraphSnapshot;
    type Output = Vec<usize>;

    fn name(&self) -> &'static str {
        "breadth-first-search"
    }

    fn source(&self) -> &'static [&'static str] {
        BFS_SOURCE
    }

    fn validate(&self, input: &Graph) -> Result<(), ValidationError> {
        validate_graph(input)
    }

    fn execute(
        &self,
        input: &Graph,
        recorder: &mut Recorder<GraphSnapshot>,
    ) -> Result<Vec<usize>, AlgorithmError> {
        let adjacency = input.adjacency();
        let mut s = fresh_snapshot(input.node_count);
        let mut queue = VecDeque::from([START]);
        s.visited[START] = true;
        s.frontier = queue.iter().copied().collect();
        recorder.emit(&s, format!("Enqueue start node {START}"), &[1]);

        while let Some(u) = queue.pop_front() {
            s.current = Some(u);
            s.edge = None;
            s.order.push(u);
            s.frontier = queue.iter().copied().collect();
            recorder.emit(&s, format!("Dequeue and visit node {u}"), &[3, 4]);

            for &(v, _) in &adjacency[u] {
                s.edge = Some((u, v));
                if s.visited[v] {
                    recorder.emit(&s, format!("Node {v} already discovered, skip"), &[5, 6]);
                    continue;
                }
                s.visited[v] = true;
                queue.push_back(v);
                s.frontier = queue.iter().copied().collect();
                recorder.emit(&s, format!("Discover node {v} from {u}, enqueue it"), &[5, 6, 7]);
            }
        }

        s.current = None;
        s.edge = None;
        recorder.emit(&s, format!("Breadth-first order: {:?}", s.order), &[8]);
        Ok(s.order.clone())
    }

    fn is_consistent(&self, last: &GraphSnapshot, output: &Vec<usize>) -> bool {
        &last.order == output
    }
}

/// Recursive depth-first traversal from node 0; output is the visit order
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    fn visit(
        u: usize,
        adjacency: &[Vec<(usize, u32)>],
        s: &mut GraphSnapshot,
        recorder: &mut Recorder<GraphSnapshot>,
    ) {
        s.visited[u] = true;
        s.order.push(u);
        s.frontier.push(u);
        s.current = Some(u);
        s.edge = None;
        recorder.emit(s, format!("Visit node {u}"), &[1, 2]);

        for &(v, _) in &adjacency[u] {
            s.current = Some(u);
            s.edge = Some((u, v));
            if s.visited[v] {
                recorder.emit(s, format!("Node {v} already visited, skip"), &[3, 4]);
                continue;
            }
            recorder.emit(s, format!("Edge {u}-{v} leads to unvisited node {v}, descend"), &[3, 4, 5]);
            Self::visit(v, adjacency, s, recorder);
        }

        s.frontier.pop();
        s.current = s.frontier.last().copied();
        s.edge = None;
        recorder.emit(s, format!("Node {u} exhausted, backtrack"), &[3]);
    }
}

impl InstrumentedAlgorithm for DepthFirstSearch {
    type Input = Graph;
    type Snapshot = GraphSnapshot;
    type Output = Vec<usize>;

    fn name(&self) -> &'static str {
        "depth-first-search"
    }

    fn source(&self) -> &'static [&'static str] {
        DFS_SOURCE
    }

    fn validate(&self, input: &Graph) -> Result<(), ValidationError> {
        validate_graph(input)
    }

    fn execute(
        &self,
        input: &Graph,
        recorder: &mut Recorder<GraphSnapshot>,
    ) -> Result<Vec<usize>, AlgorithmError> {
        let adjacency = input.adjacency();
        let mut s = fresh_snapshot(input.node_count);
        recorder.emit(&s, format!("Start depth-first search at node {START}"), &[6]);

        Self::visit(START, &adjacency, &mut s, recorder);

        if !s.frontier.is_empty() {
            return Err(AlgorithmError::Invariant("recursion stack not unwound".into()));
        }
        recorder.emit(&s, format!("Depth-first order: {:?}", s.order), &[6]);
        Ok(s.order.clone())
    }

    fn is_consistent(&self, last: &GraphSnapshot, output: &Vec<usize>) -> bool {
        &last.order == output
    }
}

/// Dijkstra's shortest paths from node 0 with a binary heap.
///
/// Output holds one distance per node, `None` for unreachable nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

fn heap_frontier(heap: &BinaryHeap<Reverse<(u64, usize)>>) -> Vec<usize> {
    let mut entries: Vec<(u64, usize)> = heap.iter().map(|Reverse(entry)| *entry).collect();
    entries.sort_unstable();
    entries.into_iter().map(|(_, node)| node).collect()
}

impl InstrumentedAlgorithm for Dijkstra {
    type Input = Graph;
    type Snapshot = GraphSnapshot;
    type Output = Vec<Option<u64>>;

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn source(&self) -> &'static [&'static str] {
        DIJKSTRA_SOURCE
    }

    fn validate(&self, input: &Graph) -> Result<(), ValidationError> {
        validate_graph(input)
    }

    fn execute(
        &self,
        input: &Graph,
        recorder: &mut Recorder<GraphSnapshot>,
    ) -> Result<Vec<Option<u64>>, AlgorithmError> {
        let adjacency = input.adjacency();
        let mut s = fresh_snapshot(input.node_count);
        s.distances = vec![None; input.node_count];
        s.distances[START] = Some(0);

        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0u64, START)));
        s.frontier = heap_frontier(&heap);
        recorder.emit(&s, format!("Distance to source {START} is 0, all others unknown"), &[1, 2]);

        while let Some(Reverse((d, u))) = heap.pop() {
            s.current = Some(u);
            s.edge = None;
            s.frontier = heap_frontier(&heap);
            if s.visited[u] {
                recorder.emit(&s, format!("Node {u} already settled, drop stale entry {d}"), &[4, 5]);
                continue;
            }
            s.visited[u] = true;
            s.order.push(u);
            recorder.emit(&s, format!("Settle node {u} at distance {d}"), &[4, 6]);

            for &(v, w) in &adjacency[u] {
                if s.visited[v] {
                    continue;
                }
                s.edge = Some((u, v));
                let candidate = d + u64::from(w);
                match s.distances[v] {
                    Some(current) if current <= candidate => {
                        recorder.emit(
                            &s,
                            format!("Edge {u}-{v} gives {candidate}, no better than {current}"),
                            &[7, 8],
                        );
                    }
                    _ => {
                        s.distances[v] = Some(candidate);
                        heap.push(Reverse((candidate, v)));
                        s.frontier = heap_frontier(&heap);
                        recorder.emit(
                            &s,
                            format!("Relax edge {u}-{v}: distance to {v} becomes {candidate}"),
                            &[7, 8, 9],
                        );
                    }
                }
            }
        }

        s.current = None;
        s.edge = None;
        recorder.emit(&s, "All reachable nodes settled", &[10]);
        Ok(s.distances.clone())
    }

    fn is_consistent(&self, last: &GraphSnapshot, output: &Vec<Option<u64>>) -> bool {
        &last.distances == output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Edge;
    use stepwise_trace::record;

    fn edge(from: usize, to: usize, weight: u32) -> Edge {
        Edge { from, to, weight }
    }

    fn sample() -> Graph {
        Graph::new(4, vec![edge(0, 1, 4), edge(0, 2, 1), edge(2, 1, 2), edge(1, 3, 5)])
    }

    #[test]
    fn bfs_visits_by_layers() {
        let (history, order) = record(&BreadthFirstSearch, &sample()).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(history.last().unwrap().snapshot().visited.iter().all(|v| *v));
    }

    #[test]
    fn dfs_goes_deep_first() {
        let (history, order) = record(&DepthFirstSearch, &sample()).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let last = history.last().unwrap().snapshot();
        assert!(last.frontier.is_empty());

        let path = Graph::new(4, vec![edge(0, 1, 1), edge(1, 3, 1), edge(0, 2, 1)]);
        let (_, order) = record(&DepthFirstSearch, &path).unwrap();
        assert_eq!(order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn dijkstra_prefers_cheaper_detour() {
        let (history, distances) = record(&Dijkstra, &sample()).unwrap();
        assert_eq!(distances, vec![Some(0), Some(3), Some(1), Some(8)]);
        assert_eq!(history.last().unwrap().snapshot().order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn unreachable_nodes_have_no_distance() {
        let graph = Graph::new(3, vec![edge(0, 1, 2)]);
        let (_, distances) = record(&Dijkstra, &graph).unwrap();
        assert_eq!(distances, vec![Some(0), Some(2), None]);
        let (_, order) = record(&BreadthFirstSearch, &graph).unwrap();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn edges_must_reference_existing_nodes() {
        let graph = Graph::new(2, vec![edge(0, 5, 1)]);
        assert!(record(&BreadthFirstSearch, &graph).is_err());
    }

    #[test]
    fn oversize_graph_is_rejected() {
        let graph = Graph::new(MAX_GRAPH_NODES + 1, Vec::new());
        assert!(record(&Dijkstra, &graph).is_err());
    }
}
