//! Checks on dense generator matrices and probability vectors.
//!
//! The graph checkers work on sparse, labelled chains. The functions here
//! take the same chain as a square array `Q` (rows summing to zero, diagonal
//! holding minus the exit rate) and a probability vector `p`, with states
//! named by index:
//!
//! ```text
//! equilibrium       p · Q = 0
//! detailed balance  diag(p) · Q is symmetric
//! ```
//!
//! Dense arrays carry no notion of a missing edge, so only the weighted
//! failures are reported: a one-way cycle fails detailed balance with
//! [`DetailedBalanceError::Asymmetric`] rather than `OneWay`.

use std::collections::{BTreeSet, HashMap};

use ndarray::{Array1, Array2, Axis};
use rategraph_graph::{Distribution, RateMatrix, State};
use tracing::debug;

use crate::config::CheckConfig;
use crate::distribution::first_extremum;
use crate::error::{
    CheckError, DetailedBalanceError, DistributionError, EquilibriumError, RateMatrixError,
};
use crate::tolerance::Tolerance;

/// A chain laid out as dense arrays over a sorted state list.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseChain<S> {
    /// State of each row, column and vector entry, ascending.
    pub states: Vec<S>,
    /// Generator matrix with the diagonal filled in.
    pub rates: Array2<f64>,
    /// Probability of each state; 0 for states outside the support.
    pub distribution: Array1<f64>,
}

/// Lays out `q` and `distn` as dense arrays.
///
/// The states are the vertices of `q` together with the keys of `distn`, in
/// ascending order. Each diagonal entry is minus the sum of its row, so the
/// rows of the result always sum to zero. Self-transitions carry no meaning
/// in dense form and are dropped; validate `q` first to reject them.
pub fn to_dense<S: State>(q: &RateMatrix<S>, distn: &Distribution<S>) -> DenseChain<S> {
    let states: Vec<S> = q
        .vertices()
        .chain(distn.states())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let n = states.len();

    let index: HashMap<&S, usize> = states.iter().enumerate().map(|(i, s)| (s, i)).collect();
    let mut rates = Array2::zeros((n, n));
    for (from, to, rate) in q.edges() {
        let (Some(&i), Some(&j)) = (index.get(from), index.get(to)) else {
            continue;
        };
        if i != j {
            rates[[i, j]] = rate;
        }
    }
    let exit = rates.sum_axis(Axis(1));
    for (i, e) in exit.iter().enumerate() {
        rates[[i, i]] = -e;
    }

    let distribution = states
        .iter()
        .map(|s| distn.get(s).unwrap_or(0.0))
        .collect::<Array1<f64>>();

    DenseChain {
        states,
        rates,
        distribution,
    }
}

/// Validates a probability vector.
///
/// Same rules and order as
/// [`validate_distribution_with`](crate::validate_distribution_with), with
/// states named by index. An empty vector has empty support.
///
/// # Errors
///
/// Returns [`DistributionError`] describing the first violated condition.
pub fn validate_stochastic_vector(
    p: &Array1<f64>,
    tol: &Tolerance,
) -> Result<(), DistributionError<usize>> {
    if let Some((state, &value)) = p.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DistributionError::NonFinite { state, value });
    }

    let entries = || p.iter().copied().enumerate();
    let Some((state, value)) = first_extremum(entries(), |v, best| v < best) else {
        return Err(DistributionError::EmptySupport);
    };
    if value < 0.0 {
        return Err(DistributionError::Negative { state, value });
    }
    if let Some((state, value)) =
        first_extremum(entries(), |v, best| v > best).filter(|&(_, v)| v > 1.0)
    {
        return Err(DistributionError::ExceedsOne { state, value });
    }

    let total = p.sum();
    if !tol.is_close(total, 1.0) {
        return Err(DistributionError::Total { total });
    }
    Ok(())
}

/// Validates a dense generator matrix.
///
/// Checks, in order: the matrix is square, every entry is finite, every row
/// sums to zero, no diagonal entry is positive, and no off-diagonal entry is
/// negative. Row sums are compared against 0, so only the absolute part of
/// `tol` applies to them.
///
/// # Errors
///
/// Returns [`RateMatrixError`] for the first offending entry in row-major
/// order.
pub fn validate_dense_rate_matrix(
    q: &Array2<f64>,
    tol: &Tolerance,
) -> Result<(), RateMatrixError<usize>> {
    let (rows, cols) = q.dim();
    if rows != cols {
        return Err(RateMatrixError::NotSquare { rows, cols });
    }
    if let Some(((from, to), &rate)) = q.indexed_iter().find(|(_, r)| !r.is_finite()) {
        return Err(RateMatrixError::NonFiniteRate { from, to, rate });
    }
    for (state, &sum) in q.sum_axis(Axis(1)).iter().enumerate() {
        if !tol.is_close(sum, 0.0) {
            return Err(RateMatrixError::RowSum { state, sum });
        }
    }
    if let Some((state, &rate)) = q.diag().iter().enumerate().find(|(_, d)| **d > 0.0) {
        return Err(RateMatrixError::PositiveDiagonal { state, rate });
    }
    if let Some(((from, to), &rate)) = q
        .indexed_iter()
        .find(|((i, j), r)| i != j && **r < 0.0)
    {
        return Err(RateMatrixError::NegativeRate { from, to, rate });
    }
    Ok(())
}

/// Checks that `p` is stationary for the dense generator `q`, i.e. `p · Q = 0`.
///
/// For each state `i` the inward flow `sum_{j != i} p[j] * q[j][i]` is
/// compared with the outward flow `-p[i] * q[i][i]`, the same comparison the
/// graph checker makes.
///
/// # Errors
///
/// - [`CheckError::Config`] if the tolerance is invalid.
/// - [`CheckError::RateMatrix`] with `NotSquare`, or
///   [`CheckError::ShapeMismatch`], whether or not inputs are validated.
/// - [`CheckError::RateMatrix`] / [`CheckError::Distribution`] if input
///   validation is enabled and an input is malformed.
/// - [`EquilibriumError::Imbalance`] for the first unbalanced state.
#[tracing::instrument(skip_all, fields(n_states = p.len()))]
pub fn check_dense_equilibrium(
    q: &Array2<f64>,
    p: &Array1<f64>,
    config: &CheckConfig,
) -> Result<(), CheckError<usize>> {
    validate_dense_inputs(q, p, config)?;
    let tol = config.tolerance();

    let net = p.dot(q);
    for (state, &net_in) in net.iter().enumerate() {
        let flow_out = -p[state] * q[[state, state]];
        let flow_in = net_in + flow_out;
        if !tol.is_close(flow_in, flow_out) {
            return Err(EquilibriumError::Imbalance {
                state,
                flow_in,
                flow_out,
            }
            .into());
        }
    }

    debug!("dense equilibrium holds");
    Ok(())
}

/// Checks that `diag(p) · Q` is symmetric.
///
/// Every off-diagonal entry is compared with its transpose, in row-major
/// order.
///
/// # Errors
///
/// As [`check_dense_equilibrium`] for invalid inputs, then
/// [`DetailedBalanceError::Asymmetric`] for the first pair whose forward and
/// backward flows are not close.
#[tracing::instrument(skip_all, fields(n_states = p.len()))]
pub fn check_dense_detailed_balance(
    q: &Array2<f64>,
    p: &Array1<f64>,
    config: &CheckConfig,
) -> Result<(), CheckError<usize>> {
    validate_dense_inputs(q, p, config)?;
    let tol = config.tolerance();

    let flux = q * &p.view().insert_axis(Axis(1));
    for ((from, to), &forward) in flux.indexed_iter() {
        if from == to {
            continue;
        }
        let backward = flux[[to, from]];
        if !tol.is_close(forward, backward) {
            return Err(DetailedBalanceError::Asymmetric {
                from,
                to,
                forward,
                backward,
            }
            .into());
        }
    }

    debug!("dense detailed balance holds");
    Ok(())
}

/// Shape checks always run: mismatched arrays would otherwise panic inside
/// the products.
fn validate_dense_inputs(
    q: &Array2<f64>,
    p: &Array1<f64>,
    config: &CheckConfig,
) -> Result<(), CheckError<usize>> {
    config.validate()?;
    let (rows, cols) = q.dim();
    if rows != cols {
        return Err(RateMatrixError::NotSquare { rows, cols }.into());
    }
    if p.len() != rows {
        return Err(CheckError::ShapeMismatch {
            states: rows,
            len: p.len(),
        });
    }
    if config.validate_inputs() {
        let tol = config.tolerance();
        validate_dense_rate_matrix(q, tol)?;
        validate_stochastic_vector(p, tol)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn cycle4() -> Array2<f64> {
        array![
            [-2.0, 2.0, 0.0, 0.0],
            [0.0, -2.0, 2.0, 0.0],
            [0.0, 0.0, -2.0, 2.0],
            [2.0, 0.0, 0.0, -2.0],
        ]
    }

    #[test]
    fn stochastic_vector_ok() {
        let tol = Tolerance::default();
        assert_eq!(validate_stochastic_vector(&array![1.0], &tol), Ok(()));
        assert_eq!(validate_stochastic_vector(&array![0.25, 0.75], &tol), Ok(()));
    }

    #[test]
    fn stochastic_vector_failures() {
        let tol = Tolerance::default();
        assert_eq!(
            validate_stochastic_vector(&Array1::zeros(0), &tol),
            Err(DistributionError::EmptySupport)
        );
        assert_eq!(
            validate_stochastic_vector(&array![0.0, -0.1, 1.1], &tol),
            Err(DistributionError::Negative {
                state: 1,
                value: -0.1
            })
        );
        assert_eq!(
            validate_stochastic_vector(&array![0.0, 2.0, 0.5], &tol),
            Err(DistributionError::ExceedsOne {
                state: 1,
                value: 2.0
            })
        );
        assert_eq!(
            validate_stochastic_vector(&array![0.5, 0.5, 0.5], &tol),
            Err(DistributionError::Total { total: 1.5 })
        );
        assert!(matches!(
            validate_stochastic_vector(&array![0.5, f64::NAN], &tol),
            Err(DistributionError::NonFinite { state: 1, .. })
        ));
    }

    #[test]
    fn rate_matrix_ok() {
        let tol = Tolerance::default();
        assert_eq!(validate_dense_rate_matrix(&cycle4(), &tol), Ok(()));
        assert_eq!(validate_dense_rate_matrix(&Array2::zeros((0, 0)), &tol), Ok(()));
        assert_eq!(validate_dense_rate_matrix(&Array2::zeros((3, 3)), &tol), Ok(()));
    }

    #[test]
    fn rate_matrix_failures() {
        let tol = Tolerance::default();
        assert_eq!(
            validate_dense_rate_matrix(&Array2::zeros((2, 3)), &tol),
            Err(RateMatrixError::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(
            validate_dense_rate_matrix(&array![[-1.0, 1.0], [1.0, -0.5]], &tol),
            Err(RateMatrixError::RowSum { state: 1, sum: 0.5 })
        );
        assert_eq!(
            validate_dense_rate_matrix(&array![[1.0, -1.0], [0.0, 0.0]], &tol),
            Err(RateMatrixError::PositiveDiagonal { state: 0, rate: 1.0 })
        );
        assert_eq!(
            validate_dense_rate_matrix(
                &array![[0.0, 0.0, 0.0], [1.0, -0.5, -0.5], [0.0, 0.0, 0.0]],
                &tol
            ),
            Err(RateMatrixError::NegativeRate {
                from: 1,
                to: 2,
                rate: -0.5
            })
        );
        assert!(matches!(
            validate_dense_rate_matrix(&array![[f64::INFINITY]], &tol),
            Err(RateMatrixError::NonFiniteRate { from: 0, to: 0, .. })
        ));
    }

    #[test]
    fn cycle_is_stationary_but_not_reversible() {
        let p = Array1::from_elem(4, 0.25);
        let config = CheckConfig::new();
        assert_eq!(check_dense_equilibrium(&cycle4(), &p, &config), Ok(()));
        assert_eq!(
            check_dense_detailed_balance(&cycle4(), &p, &config),
            Err(CheckError::DetailedBalance(DetailedBalanceError::Asymmetric {
                from: 0,
                to: 1,
                forward: 0.5,
                backward: 0.0
            }))
        );
    }

    #[test]
    fn path_is_not_stationary() {
        let q = array![[-2.0, 2.0, 0.0], [0.0, -2.0, 2.0], [0.0, 0.0, 0.0]];
        let p = Array1::from_elem(3, 1.0 / 3.0);
        let err = check_dense_equilibrium(&q, &p, &CheckConfig::new()).unwrap_err();
        let CheckError::Equilibrium(EquilibriumError::Imbalance {
            state,
            flow_in,
            flow_out,
        }) = err
        else {
            panic!("expected imbalance, got {err:?}");
        };
        assert_eq!(state, 0);
        assert_relative_eq!(flow_in, 0.0);
        assert_relative_eq!(flow_out, 2.0 / 3.0);
    }

    #[test]
    fn birth_death_chain_is_reversible() {
        let q = array![[-1.0, 1.0, 0.0], [2.0, -3.0, 1.0], [0.0, 2.0, -2.0]];
        let p = array![4.0 / 7.0, 2.0 / 7.0, 1.0 / 7.0];
        let config = CheckConfig::new();
        assert_eq!(check_dense_detailed_balance(&q, &p, &config), Ok(()));
        assert_eq!(check_dense_equilibrium(&q, &p, &config), Ok(()));
    }

    #[test]
    fn shape_checks_run_without_validation() {
        let config = CheckConfig::new().with_validate_inputs(false);
        let err = check_dense_equilibrium(&cycle4(), &array![0.5, 0.5], &config).unwrap_err();
        assert_eq!(err, CheckError::ShapeMismatch { states: 4, len: 2 });
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

        let err =
            check_dense_detailed_balance(&Array2::zeros((2, 3)), &array![0.5, 0.5], &config)
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRateMatrix);
    }

    #[test]
    fn invalid_inputs_propagate() {
        let q = array![[-1.0, 1.0], [1.0, -0.5]];
        let err = check_dense_equilibrium(&q, &array![0.5, 0.5], &CheckConfig::new()).unwrap_err();
        assert_eq!(err, CheckError::RateMatrix(RateMatrixError::RowSum { state: 1, sum: 0.5 }));

        let p = Array1::from_elem(4, 0.5);
        let err = check_dense_detailed_balance(&cycle4(), &p, &CheckConfig::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GlobalDistribution);
    }

    #[test]
    fn to_dense_fills_diagonal_and_zero_mass() {
        let q: RateMatrix<_> = [("b", "a", 3.0), ("a", "b", 1.0), ("a", "c", 2.0)]
            .into_iter()
            .collect();
        let d: Distribution<_> = [("a", 0.5), ("b", 0.5)].into_iter().collect();
        let dense = to_dense(&q, &d);

        assert_eq!(dense.states, vec!["a", "b", "c"]);
        assert_eq!(
            dense.rates,
            array![[-3.0, 1.0, 2.0], [3.0, -3.0, 0.0], [0.0, 0.0, 0.0]]
        );
        assert_eq!(dense.distribution, array![0.5, 0.5, 0.0]);
        assert_eq!(validate_dense_rate_matrix(&dense.rates, &Tolerance::default()), Ok(()));
    }

    #[test]
    fn to_dense_includes_states_only_in_distribution() {
        let q: RateMatrix<&str> = RateMatrix::new();
        let d: Distribution<_> = [("z", 1.0)].into_iter().collect();
        let dense = to_dense(&q, &d);
        assert_eq!(dense.states, vec!["z"]);
        assert_eq!(dense.rates, Array2::<f64>::zeros((1, 1)));
    }
}
