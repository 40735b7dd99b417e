//! Validation of CTMC generator matrices.

use rategraph_graph::{RateMatrix, State};

use crate::error::RateMatrixError;

/// Validates that `q` is a valid off-diagonal generator.
///
/// Every edge must join two distinct states and carry a finite, non-negative
/// rate. Missing edges stand for rate 0, so sparse and edge-free graphs are
/// valid. Edges are checked in insertion order and the first offending one is
/// reported.
///
/// # Errors
///
/// Returns [`RateMatrixError`] on a self-transition or an invalid rate.
pub fn validate_rate_matrix<S: State>(q: &RateMatrix<S>) -> Result<(), RateMatrixError<S>> {
    for (from, to, rate) in q.edges() {
        if from == to {
            return Err(RateMatrixError::SelfTransition {
                state: from.clone(),
                rate,
            });
        }
        if !rate.is_finite() {
            return Err(RateMatrixError::NonFiniteRate {
                from: from.clone(),
                to: to.clone(),
                rate,
            });
        }
        if rate < 0.0 {
            return Err(RateMatrixError::NegativeRate {
                from: from.clone(),
                to: to.clone(),
                rate,
            });
        }
    }
    Ok(())
}
