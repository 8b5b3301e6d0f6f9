//! Persistent undirected weighted graph for MST animation.
//!
//! Node ids are dense integers assigned at creation and never reused; the
//! only destructive operation is a full clear. At most one edge exists per
//! unordered node pair. MST runs mutate nothing but the `in_mst` flag on
//! edges.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::constants::{MAX_EDGE_WEIGHT, MIN_EDGE_WEIGHT};
use crate::engine::errors::EngineError;

/// Minimum center-to-center spacing between generated nodes
const NODE_SPACING: f64 = 60.0;

/// A graph vertex with a 2-D position for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// An undirected weighted edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u32,
    pub in_mst: bool,
}

impl Edge {
    /// The endpoint opposite `node`, if `node` is an endpoint at all.
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// Whether this edge joins the given unordered pair.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node at the given position and return its id. Labels run A..Z
    /// and then fall back to numbered names.
    pub fn add_node(&mut self, x: f64, y: f64) -> usize {
        let id = self.nodes.len();
        let label = if id < 26 {
            char::from(b'A' + id as u8).to_string()
        } else {
            format!("N{}", id)
        };
        self.nodes.push(Node { id, x, y, label });
        id
    }

    /// Add an edge between two existing, distinct nodes. At most one edge
    /// may exist per unordered pair.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: u32) -> Result<(), EngineError> {
        if from >= self.nodes.len() {
            return Err(EngineError::MissingNode { id: from });
        }
        if to >= self.nodes.len() {
            return Err(EngineError::MissingNode { id: to });
        }
        if from == to {
            return Err(EngineError::SelfLoopEdge { id: from });
        }
        if self.edges.iter().any(|e| e.connects(from, to)) {
            return Err(EngineError::DuplicateEdge { from, to });
        }
        self.edges.push(Edge {
            from,
            to,
            weight,
            in_mst: false,
        });
        Ok(())
    }

    /// Find the edge joining an unordered pair.
    pub fn edge_between(&self, a: usize, b: usize) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub(crate) fn mark_mst(&mut self, a: usize, b: usize) {
        if let Some(edge) = self.edges.iter_mut().find(|e| e.connects(a, b)) {
            edge.in_mst = true;
        }
    }

    /// Clear all MST marks, keeping the graph itself intact.
    pub fn reset_mst(&mut self) {
        for edge in &mut self.edges {
            edge.in_mst = false;
        }
    }

    /// Drop every node and edge. Ids restart from zero afterward.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn mst_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.in_mst).count()
    }

    pub fn mst_total_weight(&self) -> u32 {
        self.edges.iter().filter(|e| e.in_mst).map(|e| e.weight).sum()
    }

    /// Generate a random graph of `node_count` nodes placed inside the
    /// `width` x `height` area (both must be positive) with minimum spacing,
    /// each node connected to one to three random partners. Areas smaller
    /// than the spacing still work, just crowded. Dense enough to usually be
    /// connected, but connectivity is not guaranteed; MST runs handle
    /// forests.
    pub fn random<R: Rng>(node_count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let mut graph = Graph::new();

        // Margins shrink for small areas so the sampling range stays
        // non-empty even when a dimension is below the nominal spacing.
        let x_margin = (NODE_SPACING / 2.0).min(width / 4.0);
        let y_margin = (NODE_SPACING / 2.0).min(height / 4.0);

        for _ in 0..node_count {
            let mut attempts = 0;
            loop {
                let x = rng.gen_range(x_margin..width - x_margin);
                let y = rng.gen_range(y_margin..height - y_margin);
                let too_close = graph
                    .nodes
                    .iter()
                    .any(|n| ((n.x - x).powi(2) + (n.y - y).powi(2)).sqrt() < NODE_SPACING);
                if !too_close || attempts >= 100 {
                    graph.add_node(x, y);
                    break;
                }
                attempts += 1;
            }
        }

        for i in 0..node_count {
            let mut partners: Vec<usize> = (0..node_count).filter(|&j| j != i).collect();
            partners.shuffle(rng);
            let wanted = rng.gen_range(1..=partners.len().min(3).max(1));
            for &j in partners.iter().take(wanted) {
                if i < j {
                    let weight = rng.gen_range(MIN_EDGE_WEIGHT..=MAX_EDGE_WEIGHT);
                    // Duplicate pairs are simply skipped.
                    let _ = graph.add_edge(i, j, weight);
                }
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_uniqueness_is_per_unordered_pair() {
        let mut graph = Graph::new();
        graph.add_node(0.0, 0.0);
        graph.add_node(10.0, 0.0);
        graph.add_edge(0, 1, 5).unwrap();
        assert_eq!(
            graph.add_edge(1, 0, 7),
            Err(EngineError::DuplicateEdge { from: 1, to: 0 })
        );
    }

    #[test]
    fn structural_edge_errors() {
        let mut graph = Graph::new();
        graph.add_node(0.0, 0.0);
        assert_eq!(
            graph.add_edge(0, 0, 1),
            Err(EngineError::SelfLoopEdge { id: 0 })
        );
        assert_eq!(
            graph.add_edge(0, 3, 1),
            Err(EngineError::MissingNode { id: 3 })
        );
    }

    #[test]
    fn generation_handles_areas_below_the_nominal_spacing() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(1);
        let graph = Graph::random(4, 50.0, 40.0, &mut rng);
        assert_eq!(graph.node_count(), 4);
        for node in graph.nodes() {
            assert!(node.x > 0.0 && node.x < 50.0);
            assert!(node.y > 0.0 && node.y < 40.0);
        }
    }

    #[test]
    fn clear_restarts_id_assignment() {
        let mut graph = Graph::new();
        graph.add_node(0.0, 0.0);
        graph.add_node(10.0, 0.0);
        graph.add_edge(0, 1, 2).unwrap();

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_node(0.0, 0.0), 0);
    }

    #[test]
    fn labels_run_alphabetically_then_numbered() {
        let mut graph = Graph::new();
        for _ in 0..28 {
            graph.add_node(0.0, 0.0);
        }
        assert_eq!(graph.nodes()[0].label, "A");
        assert_eq!(graph.nodes()[25].label, "Z");
        assert_eq!(graph.nodes()[26].label, "N26");
    }
}
