//! Random and deterministic distributions over a state list.

use rand::Rng;
use rategraph_graph::{Distribution, State};
use statrs::distribution::{Binomial, Discrete};

use crate::distinct_states;
use crate::error::FixtureError;

/// Lower bound of the binomial success probability.
const BINOMIAL_P_MIN: f64 = 0.05;

/// Upper bound of the binomial success probability. Staying below 1/2 keeps
/// the weights of a two-state list unequal.
const BINOMIAL_P_MAX: f64 = 0.45;

/// Uniform distribution over `states`.
///
/// # Errors
///
/// Returns [`FixtureError`] if `states` is empty or has duplicates.
pub fn uniform_distribution<S: State>(
    states: impl IntoIterator<Item = S>,
) -> Result<Distribution<S>, FixtureError<S>> {
    let states = distinct_states(states)?;
    let p = 1.0 / states.len() as f64;
    Ok(states.into_iter().map(|s| (s, p)).collect())
}

/// Binomially weighted distribution over `states`.
///
/// The `k`-th state (in the given order) gets `P(X = k)` for
/// `X ~ Binomial(n - 1, p)`, where `n` is the number of states and `p` is
/// drawn uniformly from `[0.05, 0.45)`. With two or more states the result is
/// never uniform.
///
/// # Errors
///
/// Returns [`FixtureError`] if `states` is empty or has duplicates.
pub fn random_binomial_distribution<S: State>(
    states: impl IntoIterator<Item = S>,
    rng: &mut impl Rng,
) -> Result<Distribution<S>, FixtureError<S>> {
    let states = distinct_states(states)?;
    let trials = (states.len() - 1) as u64;
    let p = rng.random_range(BINOMIAL_P_MIN..BINOMIAL_P_MAX);
    let binom = Binomial::new(p, trials).map_err(|e| FixtureError::Binomial {
        reason: e.to_string(),
    })?;
    Ok(states
        .into_iter()
        .enumerate()
        .map(|(k, s)| (s, binom.pmf(k as u64)))
        .collect())
}

/// Uniform distribution over a random non-empty subset of `states`.
///
/// Each state is kept with probability 1/2; if none is kept, one state is
/// picked at random. States left out are absent from the result, not mapped
/// to zero.
///
/// # Errors
///
/// Returns [`FixtureError`] if `states` is empty or has duplicates.
pub fn random_sparse_uniform_distribution<S: State>(
    states: impl IntoIterator<Item = S>,
    rng: &mut impl Rng,
) -> Result<Distribution<S>, FixtureError<S>> {
    let mut states = distinct_states(states)?;
    let mut support: Vec<S> = states
        .iter()
        .filter(|_| rng.random_bool(0.5))
        .cloned()
        .collect();
    if support.is_empty() {
        let i = rng.random_range(0..states.len());
        support.push(states.swap_remove(i));
    }
    uniform_distribution(support)
}
