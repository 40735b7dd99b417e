//! Weighted directed graphs tagged with the meaning of their edge weights.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::distribution::Distribution;
use crate::state::State;

/// Marker describing what the edge weights of a [`WeightedDigraph`] mean.
pub trait WeightKind {
    /// Human-readable name of the weight semantics.
    const NAME: &'static str;
}

/// Edge weight is an instantaneous transition rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate;

/// Edge weight is the probability mass assigned to the edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probability;

/// Edge weight is a probability flow (mass times rate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flow;

impl WeightKind for Rate {
    const NAME: &'static str = "rate";
}

impl WeightKind for Probability {
    const NAME: &'static str = "probability";
}

impl WeightKind for Flow {
    const NAME: &'static str = "flow";
}

/// Generator matrix of a CTMC: off-diagonal rates as edges.
pub type RateMatrix<S> = WeightedDigraph<S, Rate>;

/// A distribution over the edge set of a graph.
pub type EdgeDistribution<S> = WeightedDigraph<S, Probability>;

/// Probability flow along each transition under a given distribution.
pub type FlowGraph<S> = WeightedDigraph<S, Flow>;

/// A directed graph with unique state vertices and `f64` edge weights.
///
/// There is at most one edge per ordered pair of vertices; adding an edge
/// that already exists replaces its weight. Vertices and edges iterate in
/// insertion order.
pub struct WeightedDigraph<S: State, K: WeightKind> {
    graph: DiGraph<S, f64>,
    index: HashMap<S, NodeIndex>,
    kind: PhantomData<K>,
}

impl<S: State, K: WeightKind> WeightedDigraph<S, K> {
    /// Creates a graph with no vertices.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            kind: PhantomData,
        }
    }

    /// Adds `state` as a vertex if it is not already present.
    pub fn add_vertex(&mut self, state: S) {
        self.vertex_index(state);
    }

    /// Adds or replaces the edge `from -> to`, inserting missing vertices.
    ///
    /// Self-loops are accepted here; whether they are meaningful is up to the
    /// validators.
    pub fn add_edge(&mut self, from: S, to: S, weight: f64) {
        let a = self.vertex_index(from);
        let b = self.vertex_index(to);
        self.graph.update_edge(a, b, weight);
    }

    /// Returns the weight of `from -> to`, or `None` if there is no such edge.
    pub fn weight(&self, from: &S, to: &S) -> Option<f64> {
        let a = *self.index.get(from)?;
        let b = *self.index.get(to)?;
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Returns `true` if the edge `from -> to` exists.
    pub fn contains_edge(&self, from: &S, to: &S) -> bool {
        self.weight(from, to).is_some()
    }

    /// Returns `true` if `state` is a vertex.
    pub fn contains_vertex(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over the vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &S> {
        self.graph.node_weights()
    }

    /// Iterates over `(from, to, weight)` triples.
    pub fn edges(&self) -> impl Iterator<Item = (&S, &S, f64)> {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()],
                &self.graph[e.target()],
                *e.weight(),
            )
        })
    }

    fn vertex_index(&mut self, state: S) -> NodeIndex {
        if let Some(&idx) = self.index.get(&state) {
            return idx;
        }
        let idx = self.graph.add_node(state.clone());
        self.index.insert(state, idx);
        idx
    }
}

impl<S: State> EdgeDistribution<S> {
    /// Flattens the edge weights into a distribution keyed by `(from, to)`.
    pub fn to_distribution(&self) -> Distribution<(S, S)> {
        self.edges()
            .map(|(a, b, w)| ((a.clone(), b.clone()), w))
            .collect()
    }
}

impl<S: State, K: WeightKind> Default for WeightedDigraph<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, K: WeightKind> Clone for WeightedDigraph<S, K> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            index: self.index.clone(),
            kind: PhantomData,
        }
    }
}

impl<S: State, K: WeightKind> fmt::Debug for WeightedDigraph<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedDigraph")
            .field("kind", &K::NAME)
            .field("vertices", &self.vertices().collect::<Vec<_>>())
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: State, K: WeightKind> FromIterator<(S, S, f64)> for WeightedDigraph<S, K> {
    fn from_iter<I: IntoIterator<Item = (S, S, f64)>>(iter: I) -> Self {
        let mut g = Self::new();
        for (a, b, w) in iter {
            g.add_edge(a, b, w);
        }
        g
    }
}

impl<S: State, K: WeightKind> Extend<(S, S, f64)> for WeightedDigraph<S, K> {
    fn extend<I: IntoIterator<Item = (S, S, f64)>>(&mut self, iter: I) {
        for (a, b, w) in iter {
            self.add_edge(a, b, w);
        }
    }
}
