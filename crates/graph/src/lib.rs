//! Graph and distribution types for continuous-time Markov chains.
//!
//! A chain is described by three kinds of weighted directed graph that share
//! one representation but carry different weight semantics:
//!
//! | Alias | Tag | Edge weight |
//! |-------|-----|-------------|
//! | [`RateMatrix`] | [`Rate`] | instantaneous transition rate |
//! | [`EdgeDistribution`] | [`Probability`] | probability mass of the edge |
//! | [`FlowGraph`] | [`Flow`] | probability flow `p(a) * rate(a, b)` |
//!
//! The tag is a type parameter, so a flow graph cannot be handed to code
//! expecting a rate matrix.
//!
//! # Quick start
//!
//! ```
//! use rategraph_graph::{Distribution, RateMatrix};
//!
//! let mut q = RateMatrix::new();
//! q.add_edge("a", "b", 2.0);
//! q.add_edge("b", "a", 2.0);
//!
//! let distn: Distribution<&str> = [("a", 0.5), ("b", 0.5)].into_iter().collect();
//!
//! assert_eq!(q.weight(&"a", &"b"), Some(2.0));
//! assert_eq!(distn.get(&"b"), Some(0.5));
//! ```

pub mod digraph;
pub mod distribution;
pub mod state;

pub use digraph::{
    EdgeDistribution, Flow, FlowGraph, Probability, Rate, RateMatrix, WeightKind, WeightedDigraph,
};
pub use distribution::Distribution;
pub use state::State;
