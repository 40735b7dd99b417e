//! Random symmetric rate matrices.

use rand::Rng;
use rand::seq::SliceRandom;
use rategraph_graph::{RateMatrix, State};

use crate::distinct_states;
use crate::error::FixtureError;

/// Smallest rate drawn for a pair of states.
const MIN_RATE: f64 = 0.1;

/// Upper bound (exclusive) of the rates drawn for a pair of states.
const MAX_RATE: f64 = 2.0;

/// Probability that a pair outside the spanning path gets an edge in the
/// sparse generator.
const EXTRA_PAIR_PROB: f64 = 0.5;

/// Random symmetric rate matrix with an edge in both directions between every
/// pair of distinct states.
///
/// Each unordered pair gets one rate drawn uniformly from `[0.1, 2.0)`, used
/// in both directions. All states are vertices, so a single state yields an
/// edge-free matrix.
///
/// # Errors
///
/// Returns [`FixtureError`] if `states` is empty or has duplicates.
pub fn random_symmetric_dense_rate_matrix<S: State>(
    states: impl IntoIterator<Item = S>,
    rng: &mut impl Rng,
) -> Result<RateMatrix<S>, FixtureError<S>> {
    let states = distinct_states(states)?;
    let mut q = with_vertices(&states);
    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            add_symmetric(&mut q, a, b, rng);
        }
    }
    Ok(q)
}

/// Random symmetric rate matrix over a connected subset of state pairs.
///
/// The states are shuffled and consecutive states joined, so the matrix is
/// always irreducible. Every other pair is joined with probability 1/2. Rates
/// are drawn as in [`random_symmetric_dense_rate_matrix`].
///
/// # Errors
///
/// Returns [`FixtureError`] if `states` is empty or has duplicates.
pub fn random_symmetric_sparse_rate_matrix<S: State>(
    states: impl IntoIterator<Item = S>,
    rng: &mut impl Rng,
) -> Result<RateMatrix<S>, FixtureError<S>> {
    let states = distinct_states(states)?;
    let mut q = with_vertices(&states);

    let mut path: Vec<usize> = (0..states.len()).collect();
    path.shuffle(rng);
    for w in path.windows(2) {
        add_symmetric(&mut q, &states[w[0]], &states[w[1]], rng);
    }

    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            if q.contains_edge(a, b) {
                continue;
            }
            if rng.random_bool(EXTRA_PAIR_PROB) {
                add_symmetric(&mut q, a, b, rng);
            }
        }
    }
    Ok(q)
}

fn with_vertices<S: State>(states: &[S]) -> RateMatrix<S> {
    let mut q = RateMatrix::new();
    for s in states {
        q.add_vertex(s.clone());
    }
    q
}

fn add_symmetric<S: State>(q: &mut RateMatrix<S>, a: &S, b: &S, rng: &mut impl Rng) {
    let rate = rng.random_range(MIN_RATE..MAX_RATE);
    q.add_edge(a.clone(), b.clone(), rate);
    q.add_edge(b.clone(), a.clone(), rate);
}
