//! Probability flow between states.
//!
//! The flow along a transition `a -> b` is `p(a) * rate(a, b)`. Equilibrium
//! compares the total flow into and out of each state; detailed balance
//! compares the flow in each direction between a pair of states.

use std::collections::BTreeMap;

use rategraph_graph::{Distribution, FlowGraph, RateMatrix, State};
use tracing::trace;

/// Builds the flow graph of `q` under `distn`.
///
/// For every edge `a -> b` of `q` whose source is a key of `distn`, the flow
/// graph gets the edge `a -> b` with weight `distn[a] * q[a][b]`. Edges leaving
/// states outside the support are omitted rather than given weight 0, so such
/// states never have outward flow. A key with probability 0 is in the support
/// and yields zero-weight edges.
pub fn flow_graph<S: State>(q: &RateMatrix<S>, distn: &Distribution<S>) -> FlowGraph<S> {
    let mut r = FlowGraph::new();
    for (from, to, rate) in q.edges() {
        match distn.get(from) {
            Some(p) => r.add_edge(from.clone(), to.clone(), p * rate),
            None => trace!(?from, ?to, "source outside support, flow edge omitted"),
        }
    }
    r
}

/// Per-state totals of inward and outward flow.
///
/// A state with no incoming (outgoing) flow edge is absent from
/// [`flow_in`](Self::flow_in) ([`flow_out`](Self::flow_out)) rather than mapped
/// to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalFlows<S: State> {
    flow_in: BTreeMap<S, f64>,
    flow_out: BTreeMap<S, f64>,
}

impl<S: State> MarginalFlows<S> {
    /// Total flow into each state that has at least one incoming flow edge.
    pub fn flow_in(&self) -> &BTreeMap<S, f64> {
        &self.flow_in
    }

    /// Total flow out of each state that has at least one outgoing flow edge.
    pub fn flow_out(&self) -> &BTreeMap<S, f64> {
        &self.flow_out
    }

    /// States with outward flow but no inward flow, ascending.
    pub fn out_only(&self) -> Vec<S> {
        one_sided(&self.flow_out, &self.flow_in)
    }

    /// States with inward flow but no outward flow, ascending.
    pub fn in_only(&self) -> Vec<S> {
        one_sided(&self.flow_in, &self.flow_out)
    }

    /// Iterates over `(state, flow_in, flow_out)` for states present on both
    /// sides, ascending.
    pub fn two_sided(&self) -> impl Iterator<Item = (&S, f64, f64)> {
        self.flow_in
            .iter()
            .filter_map(|(s, &f_in)| self.flow_out.get(s).map(|&f_out| (s, f_in, f_out)))
    }
}

/// Sums the flow graph into per-state inward and outward totals.
pub fn marginal_flows<S: State>(r: &FlowGraph<S>) -> MarginalFlows<S> {
    let mut flow_in = BTreeMap::new();
    let mut flow_out = BTreeMap::new();
    for (from, to, w) in r.edges() {
        *flow_out.entry(from.clone()).or_insert(0.0) += w;
        *flow_in.entry(to.clone()).or_insert(0.0) += w;
    }
    MarginalFlows { flow_in, flow_out }
}

fn one_sided<S: State>(present: &BTreeMap<S, f64>, other: &BTreeMap<S, f64>) -> Vec<S> {
    present
        .keys()
        .filter(|s| !other.contains_key(*s))
        .cloned()
        .collect()
}
