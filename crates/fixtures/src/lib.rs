//! Random fixtures for exercising chain checks.
//!
//! Every generator takes an explicit random number generator, so fixtures are
//! reproducible from a seed:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rategraph_fixtures::{random_symmetric_dense_rate_matrix, uniform_distribution};
//!
//! let states = ["a", "b", "c"];
//! let mut rng = StdRng::seed_from_u64(1234);
//!
//! let p = uniform_distribution(states).unwrap();
//! let q = random_symmetric_dense_rate_matrix(states, &mut rng).unwrap();
//!
//! assert_eq!(p.len(), 3);
//! assert_eq!(q.edge_count(), 6);
//! ```
//!
//! Distributions produced here are valid finite distributions and rate
//! matrices are valid generators, so they serve as positive controls.
//! Symmetric matrices paired with the uniform distribution satisfy detailed
//! balance; paired with a binomial distribution they do not.

pub mod distribution;
pub mod error;
pub mod rate_matrix;

pub use distribution::{
    random_binomial_distribution, random_sparse_uniform_distribution, uniform_distribution,
};
pub use error::FixtureError;
pub use rate_matrix::{random_symmetric_dense_rate_matrix, random_symmetric_sparse_rate_matrix};

use std::collections::BTreeSet;

use rategraph_graph::State;

/// Collects `states` in the given order, rejecting empty and repeated input.
pub(crate) fn distinct_states<S: State>(
    states: impl IntoIterator<Item = S>,
) -> Result<Vec<S>, FixtureError<S>> {
    let states: Vec<S> = states.into_iter().collect();
    if states.is_empty() {
        return Err(FixtureError::EmptyStates);
    }
    let mut seen = BTreeSet::new();
    for s in &states {
        if !seen.insert(s) {
            return Err(FixtureError::DuplicateState { state: s.clone() });
        }
    }
    Ok(states)
}
