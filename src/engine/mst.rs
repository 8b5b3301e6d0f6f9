//! Minimum-spanning-tree construction.
//!
//! Prim's algorithm grows from node 0 with a lazy-deletion priority queue:
//! stale entries for already-visited endpoints are skipped when popped,
//! never proactively removed. That keeps the queue simple and fixes the
//! emitted step order; do not replace it with a decrease-key heap.
//! Kruskal's algorithm scans edges in stable weight order and joins
//! components through a union-find. Either way the only observable effect
//! on the graph is the `in_mst` flag; a disconnected graph yields a
//! spanning forest, not an error.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::graph::Graph;
use crate::step::{Outcome, Step, StepKind, StepSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
}

impl MstAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            MstAlgorithm::Prim => "Prim's Algorithm",
            MstAlgorithm::Kruskal => "Kruskal's Algorithm",
        }
    }
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MstAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prim" => Ok(MstAlgorithm::Prim),
            "kruskal" => Ok(MstAlgorithm::Kruskal),
            other => Err(format!(
                "Unknown MST algorithm '{}' (expected prim or kruskal)",
                other
            )),
        }
    }
}

/// Disjoint-set forest with union by rank and path compression. Transient:
/// rebuilt at the start of every Kruskal run, never persisted.
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merge the sets containing `x` and `y`. Returns false when they were
    /// already in the same set (the edge would close a cycle).
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        true
    }
}

/// Mark a minimum spanning tree (or forest) on the graph, emitting one step
/// per accepted edge. Returns the total marked weight. Existing MST marks
/// are cleared first so repeated runs start from the same state.
pub fn find_mst(
    graph: &mut Graph,
    algorithm: MstAlgorithm,
    sink: &mut dyn StepSink,
) -> (u32, Outcome) {
    graph.reset_mst();
    match algorithm {
        MstAlgorithm::Prim => prim(graph, sink),
        MstAlgorithm::Kruskal => kruskal(graph, sink),
    }
}

fn prim(graph: &mut Graph, sink: &mut dyn StepSink) -> (u32, Outcome) {
    if graph.node_count() == 0 {
        return (0, Outcome::Completed);
    }

    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut total_weight = 0u32;

    // Min-heap keyed (weight, from, to); the full tuple ordering makes
    // weight ties deterministic.
    let mut candidates: BinaryHeap<Reverse<(u32, usize, usize)>> = BinaryHeap::new();

    // Start is fixed at node 0.
    visited.insert(0);
    push_frontier(graph, 0, &visited, &mut candidates);

    while let Some(Reverse((weight, from, to))) = candidates.pop() {
        if visited.len() == graph.node_count() {
            break;
        }
        // Lazy deletion: stale entries fall out here.
        if visited.contains(&to) {
            continue;
        }

        visited.insert(to);
        graph.mark_mst(from, to);
        total_weight += weight;
        if !sink.emit(Step::bare(StepKind::EdgeAccept { from, to, weight })) {
            return (total_weight, Outcome::Cancelled);
        }

        push_frontier(graph, to, &visited, &mut candidates);
    }

    // An empty queue with unvisited nodes means the graph is disconnected;
    // the tree covers only the component reachable from node 0.
    (total_weight, Outcome::Completed)
}

fn push_frontier(
    graph: &Graph,
    node: usize,
    visited: &FxHashSet<usize>,
    candidates: &mut BinaryHeap<Reverse<(u32, usize, usize)>>,
) {
    for edge in graph.edges() {
        if let Some(other) = edge.other(node) {
            if !visited.contains(&other) {
                candidates.push(Reverse((edge.weight, node, other)));
            }
        }
    }
}

fn kruskal(graph: &mut Graph, sink: &mut dyn StepSink) -> (u32, Outcome) {
    let n = graph.node_count();
    if n == 0 {
        return (0, Outcome::Completed);
    }

    // Stable sort: weight ties keep insertion order, so the trace is
    // deterministic for a given graph.
    let mut order: Vec<(u32, usize, usize)> = graph
        .edges()
        .iter()
        .map(|e| (e.weight, e.from, e.to))
        .collect();
    order.sort_by_key(|&(weight, _, _)| weight);

    let mut sets = UnionFind::new(n);
    let mut accepted = 0usize;
    let mut total_weight = 0u32;

    for (weight, from, to) in order {
        if sets.union(from, to) {
            graph.mark_mst(from, to);
            total_weight += weight;
            accepted += 1;
            if !sink.emit(Step::bare(StepKind::EdgeAccept { from, to, weight })) {
                return (total_weight, Outcome::Cancelled);
            }
            if accepted == n - 1 {
                break;
            }
        }
    }

    (total_weight, Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find_detects_cycles() {
        let mut sets = UnionFind::new(3);
        assert!(sets.union(0, 1));
        assert!(sets.union(1, 2));
        assert!(!sets.union(0, 2));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn union_by_rank_keeps_roots_shallow() {
        let mut sets = UnionFind::new(4);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(0, 2);
        let root = sets.find(0);
        for i in 0..4 {
            assert_eq!(sets.find(i), root);
        }
    }
}
