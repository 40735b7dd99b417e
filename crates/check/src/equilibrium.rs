//! Stationarity check.

use rategraph_graph::{Distribution, RateMatrix, State};
use tracing::debug;

use crate::config::CheckConfig;
use crate::distribution::validate_distribution_with;
use crate::error::{CheckError, EquilibriumError};
use crate::flow::{flow_graph, marginal_flows};
use crate::rate_matrix::validate_rate_matrix;

/// Checks that the chain `q` is at equilibrium under `distn`.
///
/// Equilibrium holds when every state has the same total flow in as out.
/// A state with flow on one side only is a structural failure and is reported
/// before any magnitudes are compared.
///
/// # Errors
///
/// - [`CheckError::Config`] if the tolerance is invalid.
/// - [`CheckError::RateMatrix`] / [`CheckError::Distribution`] if input
///   validation is enabled and an input is malformed.
/// - [`EquilibriumError::FlowOutOnly`], then [`EquilibriumError::FlowInOnly`],
///   naming every one-sided state.
/// - [`EquilibriumError::Imbalance`] for the first state whose inward flow is
///   not close to its outward flow.
#[tracing::instrument(skip_all, fields(n_states = distn.len(), n_rates = q.edge_count()))]
pub fn check_equilibrium<S: State>(
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

    let flows = marginal_flows(&flow_graph(q, distn));

    let states = flows.out_only();
    if !states.is_empty() {
        return Err(EquilibriumError::FlowOutOnly { states }.into());
    }
    let states = flows.in_only();
    if !states.is_empty() {
        return Err(EquilibriumError::FlowInOnly { states }.into());
    }

    for (state, flow_in, flow_out) in flows.two_sided() {
        if !tol.is_close(flow_in, flow_out) {
            return Err(EquilibriumError::Imbalance {
                state: state.clone(),
                flow_in,
                flow_out,
            }
            .into());
        }
    }

    debug!(n_balanced = flows.flow_in().len(), "equilibrium holds");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DistributionError, ErrorKind};

    fn uniform<S: State>(states: &[S]) -> Distribution<S> {
        let p = 1.0 / states.len() as f64;
        states.iter().map(|s| (s.clone(), p)).collect()
    }

    #[test]
    fn symmetric_pair_uniform() {
        let q: RateMatrix<_> = [("a", "b", 1.5), ("b", "a", 1.5)].into_iter().collect();
        assert!(check_equilibrium(&q, &uniform(&["a", "b"]), &CheckConfig::new()).is_ok());
    }

    #[test]
    fn asymmetric_pair_at_its_stationary_distribution() {
        // pi = (2/3, 1/3) balances rate 1 out of a against rate 2 out of b.
        let q: RateMatrix<_> = [("a", "b", 1.0), ("b", "a", 2.0)].into_iter().collect();
        let d: Distribution<_> = [("a", 2.0 / 3.0), ("b", 1.0 / 3.0)].into_iter().collect();
        assert!(check_equilibrium(&q, &d, &CheckConfig::new()).is_ok());
    }

    #[test]
    fn asymmetric_pair_uniform_fails() {
        let q: RateMatrix<_> = [("a", "b", 1.0), ("b", "a", 2.0)].into_iter().collect();
        let err = check_equilibrium(&q, &uniform(&["a", "b"]), &CheckConfig::new()).unwrap_err();
        assert_eq!(
            err,
            CheckError::Equilibrium(EquilibriumError::Imbalance {
                state: "a",
                flow_in: 1.0,
                flow_out: 0.5,
            })
        );
    }

    #[test]
    fn cycle_uniform() {
        let q: RateMatrix<_> = [("a", "b", 2.0), ("b", "c", 2.0), ("c", "d", 2.0), ("d", "a", 2.0)]
            .into_iter()
            .collect();
        let distn = uniform(&["a", "b", "c", "d"]);
        assert!(check_equilibrium(&q, &distn, &CheckConfig::new()).is_ok());
    }

    #[test]
    fn path_has_source_state() {
        let q: RateMatrix<_> = [("a", "b", 2.0), ("b", "c", 2.0)].into_iter().collect();
        let distn = uniform(&["a", "b", "c"]);
        let err = check_equilibrium(&q, &distn, &CheckConfig::new()).unwrap_err();
        assert_eq!(
            err,
            CheckError::Equilibrium(EquilibriumError::FlowOutOnly { states: vec!["a"] })
        );
    }

    #[test]
    fn sink_reported_when_no_source() {
        // a <-> b, b -> c: c receives flow but sends none.
        let q: RateMatrix<_> = [("a", "b", 1.0), ("b", "a", 1.0), ("b", "c", 1.0)]
            .into_iter()
            .collect();
        let distn = uniform(&["a", "b", "c"]);
        let err = check_equilibrium(&q, &distn, &CheckConfig::new()).unwrap_err();
        assert_eq!(
            err,
            CheckError::Equilibrium(EquilibriumError::FlowInOnly { states: vec!["c"] })
        );
        assert!(err.kind().is_structural());
    }

    #[test]
    fn edge_free_chain_is_trivially_balanced() {
        let mut q: RateMatrix<u32> = RateMatrix::new();
        q.add_vertex(0);
        assert!(check_equilibrium(&q, &uniform(&[0u32]), &CheckConfig::new()).is_ok());
    }

    #[test]
    fn invalid_distribution_propagated() {
        let q: RateMatrix<_> = [("a", "b", 1.0), ("b", "a", 1.0)].into_iter().collect();
        let d: Distribution<_> = [("a", 2.0), ("b", 2.0)].into_iter().collect();
        let err = check_equilibrium(&q, &d, &CheckConfig::new()).unwrap_err();
        assert_eq!(
            err,
            CheckError::Distribution(DistributionError::ExceedsOne {
                state: "a",
                value: 2.0
            })
        );
    }

    #[test]
    fn skipping_validation_only_compares_flows() {
        let q: RateMatrix<_> = [("a", "b", 1.0), ("b", "a", 1.0)].into_iter().collect();
        let d: Distribution<_> = [("a", 2.0), ("b", 2.0)].into_iter().collect();
        let config = CheckConfig::new().with_validate_inputs(false);
        assert!(check_equilibrium(&q, &d, &config).is_ok());
    }

    #[test]
    fn invalid_rate_matrix_propagated() {
        let q: RateMatrix<_> = [("a", "a", 1.0)].into_iter().collect();
        let err = check_equilibrium(&q, &uniform(&["a"]), &CheckConfig::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRateMatrix);
    }

    #[test]
    fn invalid_tolerance_rejected() {
        let q: RateMatrix<&str> = RateMatrix::new();
        let config = CheckConfig::new().with_tolerance(crate::Tolerance::new(-1.0, 0.0));
        let err = check_equilibrium(&q, &uniform(&["a"]), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTolerance);
    }
}
