//! Reversibility check.

use rategraph_graph::{Distribution, RateMatrix, State};
use tracing::debug;

use crate::config::CheckConfig;
use crate::distribution::validate_distribution_with;
use crate::error::{CheckError, DetailedBalanceError};
use crate::flow::flow_graph;
use crate::rate_matrix::validate_rate_matrix;

/// Checks that the chain `q` satisfies detailed balance under `distn`.
///
/// Detailed balance requires `p(a) * rate(a, b) == p(b) * rate(b, a)` for
/// every pair of states with flow between them. It implies equilibrium; the
/// converse does not hold (a one-way cycle can be stationary).
///
/// # Errors
///
/// - [`CheckError::Config`] if the tolerance is invalid.
/// - [`CheckError::RateMatrix`] / [`CheckError::Distribution`] if input
///   validation is enabled and an input is malformed.
/// - [`DetailedBalanceError::OneWay`] naming every flow edge without a reverse
///   edge.
/// - [`DetailedBalanceError::Asymmetric`] for the first pair, in rate-matrix
///   edge order, whose forward and backward flows are not close.
#[tracing::instrument(skip_all, fields(n_states = distn.len(), n_rates = q.edge_count()))]
pub fn check_detailed_balance<S: State>(
    q: &RateMatrix<S>,
    distn: &Distribution<S>,
    config: &CheckConfig,
) -> Result<(), CheckError<S>> {
    config.validate()?;
    let tol = config.tolerance();
    if config.validate_inputs() {
        validate_rate_matrix(q)?;
        validate_distribution_with(distn, tol)?;
    }

    let r = flow_graph(q, distn);

    let mut pairs: Vec<(S, S)> = r
        .edges()
        .filter(|(a, b, _)| !r.contains_edge(b, a))
        .map(|(a, b, _)| (a.clone(), b.clone()))
        .collect();
    if !pairs.is_empty() {
        pairs.sort();
        return Err(DetailedBalanceError::OneWay { pairs }.into());
    }

    for (a, b, forward) in r.edges() {
        let Some(backward) = r.weight(b, a) else {
            continue;
        };
        if !tol.is_close(forward, backward) {
            return Err(DetailedBalanceError::Asymmetric {
                from: a.clone(),
                to: b.clone(),
                forward,
                backward,
            }
            .into());
        }
    }

    debug!(n_flows = r.edge_count(), "detailed balance holds");
    Ok(())
}
