//! Validation of finite probability distributions.

use rategraph_graph::{Distribution, EdgeDistribution, State};

use crate::error::DistributionError;
use crate::tolerance::Tolerance;

/// Validates a distribution with the default tolerance.
///
/// See [`validate_distribution_with`].
pub fn validate_distribution<S: State>(
    distn: &Distribution<S>,
) -> Result<(), DistributionError<S>> {
    validate_distribution_with(distn, &Tolerance::default())
}

/// Validates a distribution.
///
/// Checks, in order:
///
/// 1. the support is not empty;
/// 2. every probability is finite;
/// 3. the smallest probability is not negative;
/// 4. the largest probability is not greater than 1;
/// 5. the total is close to 1 under `tol`.
///
/// The reported minimum and maximum belong to the first state (in state
/// order) that attains them.
///
/// # Errors
///
/// Returns [`DistributionError`] describing the first violated condition.
pub fn validate_distribution_with<S: State>(
    distn: &Distribution<S>,
    tol: &Tolerance,
) -> Result<(), DistributionError<S>> {
    if let Some((state, value)) = distn.iter().find(|(_, p)| !p.is_finite()) {
        return Err(DistributionError::NonFinite {
            state: state.clone(),
            value,
        });
    }

    let Some((min_state, min_value)) = first_extremum(distn.iter(), |p, best| p < best) else {
        return Err(DistributionError::EmptySupport);
    };
    if min_value < 0.0 {
        return Err(DistributionError::Negative {
            state: min_state.clone(),
            value: min_value,
        });
    }

    let Some((max_state, max_value)) = first_extremum(distn.iter(), |p, best| p > best) else {
        return Err(DistributionError::EmptySupport);
    };
    if max_value > 1.0 {
        return Err(DistributionError::ExceedsOne {
            state: max_state.clone(),
            value: max_value,
        });
    }

    let total = distn.total();
    if !tol.is_close(total, 1.0) {
        return Err(DistributionError::Total { total });
    }

    Ok(())
}

/// Validates a distribution over the edges of a graph.
///
/// Edge weights are flattened into a distribution keyed by `(from, to)` and
/// validated with the default tolerance. A graph without edges has empty
/// support.
pub fn validate_edge_distribution<S: State>(
    nxdistn: &EdgeDistribution<S>,
) -> Result<(), DistributionError<(S, S)>> {
    validate_distribution(&nxdistn.to_distribution())
}

/// Scans `entries` in order, keeping the first entry that strictly beats the
/// current best.
pub(crate) fn first_extremum<T>(
    entries: impl IntoIterator<Item = (T, f64)>,
    beats: impl Fn(f64, f64) -> bool,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (state, p) in entries {
        match best {
            Some((_, b)) if !beats(p, b) => {}
            _ => best = Some((state, p)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn distn<S: State>(entries: &[(S, f64)]) -> Distribution<S> {
        entries.iter().cloned().collect()
    }

    #[test]
    fn single_certain_state() {
        assert!(validate_distribution(&distn(&[("a", 1.0)])).is_ok());
    }

    #[test]
    fn uniform_and_nonuniform_ok() {
        assert!(validate_distribution(&distn(&[("a", 0.5), ("b", 0.5)])).is_ok());
        assert!(validate_distribution(&distn(&[("a", 0.25), ("b", 0.75)])).is_ok());
        assert!(
            validate_distribution(&distn(&[("a", 0.25), ("b", 0.25), ("c", 0.25), ("d", 0.25)]))
                .is_ok()
        );
    }

    #[test]
    fn zero_entries_allowed() {
        assert!(validate_distribution(&distn(&[(0u32, 0.0), (1, 1.0), (2, 0.0)])).is_ok());
    }

    #[test]
    fn empty_rejected() {
        let d: Distribution<u32> = Distribution::new();
        assert_eq!(validate_distribution(&d), Err(DistributionError::EmptySupport));
    }

    #[test]
    fn negative_reports_minimum() {
        let d = distn(&[("a", 0.0), ("b", -0.1), ("c", 1.1)]);
        assert_eq!(
            validate_distribution(&d),
            Err(DistributionError::Negative {
                state: "b",
                value: -0.1
            })
        );
    }

    #[test]
    fn negative_checked_before_exceeds_one() {
        // Both bounds violated: the lower bound is reported.
        let d = distn(&[("a", 2.0), ("b", -1.0)]);
        let err = validate_distribution(&d).unwrap_err();
        assert!(matches!(err, DistributionError::Negative { state: "b", .. }));
        assert_eq!(err.kind(), ErrorKind::LocalDistribution);
    }

    #[test]
    fn exceeds_one_reports_maximum() {
        let d = distn(&[("a", 0.0), ("b", 2.0), ("c", 0.5)]);
        assert_eq!(
            validate_distribution(&d),
            Err(DistributionError::ExceedsOne {
                state: "b",
                value: 2.0
            })
        );
    }

    #[test]
    fn ties_resolve_to_first_state() {
        let d = distn(&[(1u32, -0.5), (2, -0.5), (3, 2.0)]);
        assert_eq!(
            validate_distribution(&d),
            Err(DistributionError::Negative {
                state: 1,
                value: -0.5
            })
        );

        let d = distn(&[(1u32, 0.0), (2, 1.5), (3, 1.5)]);
        assert_eq!(
            validate_distribution(&d),
            Err(DistributionError::ExceedsOne {
                state: 2,
                value: 1.5
            })
        );
    }

    #[test]
    fn total_too_large() {
        let d = distn(&[("a", 0.5), ("b", 0.5), ("c", 0.5)]);
        assert_eq!(
            validate_distribution(&d),
            Err(DistributionError::Total { total: 1.5 })
        );
    }

    #[test]
    fn total_too_small() {
        let err = validate_distribution(&distn(&[('x', 0.2), ('y', 0.3)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GlobalDistribution);
    }

    #[test]
    fn total_within_tolerance() {
        let d = distn(&[("a", 0.5), ("b", 0.5 + 5e-6)]);
        assert!(validate_distribution(&d).is_ok());
        let strict = Tolerance::relative_only(1e-9);
        assert!(matches!(
            validate_distribution_with(&d, &strict),
            Err(DistributionError::Total { .. })
        ));
    }

    #[test]
    fn nan_rejected() {
        let d = distn(&[("a", f64::NAN), ("b", 1.0)]);
        assert!(matches!(
            validate_distribution(&d),
            Err(DistributionError::NonFinite { state: "a", .. })
        ));
    }

    #[test]
    fn infinity_rejected() {
        let d = distn(&[("a", 0.0), ("b", f64::INFINITY)]);
        assert!(matches!(
            validate_distribution(&d),
            Err(DistributionError::NonFinite { state: "b", .. })
        ));
    }

    #[test]
    fn first_extremum_scan() {
        let d = distn(&[(1u8, 0.3), (2, 0.1), (3, 0.1), (4, 0.5)]);
        assert_eq!(first_extremum(d.iter(), |p, b| p < b), Some((&2, 0.1)));
        assert_eq!(first_extremum(d.iter(), |p, b| p > b), Some((&4, 0.5)));
        let empty: Distribution<u8> = Distribution::new();
        assert_eq!(first_extremum(empty.iter(), |p, b| p < b), None);
    }

    #[test]
    fn edge_distribution_ok() {
        let one: EdgeDistribution<_> = [("a", "b", 1.0)].into_iter().collect();
        assert!(validate_edge_distribution(&one).is_ok());
    }

    #[test]
    fn edge_distribution_without_edges() {
        let mut g: EdgeDistribution<&str> = EdgeDistribution::new();
        g.add_vertex("a");
        assert_eq!(
            validate_edge_distribution(&g),
            Err(DistributionError::EmptySupport)
        );
    }

    #[test]
    fn edge_distribution_reports_pair() {
        let g: EdgeDistribution<_> = [("a", "b", -0.5)].into_iter().collect();
        assert_eq!(
            validate_edge_distribution(&g),
            Err(DistributionError::Negative {
                state: ("a", "b"),
                value: -0.5
            })
        );
    }
}
