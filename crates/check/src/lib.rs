//! Consistency checks for continuous-time Markov chains.
//!
//! Given a rate matrix `Q` and a candidate distribution `p`, this crate
//! answers three questions: is `p` a probability distribution, is `Q` a valid
//! generator, and is the chain at equilibrium (and reversible) under `p`. It
//! never solves for the stationary distribution; it only checks a given one.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────────┐     ┌──────────────┐     ┌──────────────────┐
//!  │ validate inputs   │────▶│ flow_graph   │──┬─▶│ marginal_flows   │──▶ equilibrium
//!  │ (Q, p; optional)  │     │ p(a)·Q(a, b) │  │  └──────────────────┘
//!  └───────────────────┘     └──────────────┘  └──▶ pairwise flows ────▶ detailed balance
//! ```
//!
//! The [`dense`] module runs the same checks on a generator laid out as a
//! square `ndarray` matrix and a probability vector.
//!
//! # Quick start
//!
//! ```rust
//! use rategraph_check::{CheckConfig, ErrorKind, check_detailed_balance, check_equilibrium};
//! use rategraph_graph::{Distribution, RateMatrix};
//!
//! // A one-way cycle with equal rates is stationary under the uniform
//! // distribution but not reversible.
//! let q: RateMatrix<_> = [("a", "b", 2.0), ("b", "c", 2.0), ("c", "a", 2.0)]
//!     .into_iter()
//!     .collect();
//! let p: Distribution<_> = ["a", "b", "c"].into_iter().map(|s| (s, 1.0 / 3.0)).collect();
//! let config = CheckConfig::new();
//!
//! assert!(check_equilibrium(&q, &p, &config).is_ok());
//! let err = check_detailed_balance(&q, &p, &config).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnweightedDetailedBalance);
//! ```

pub mod config;
pub mod dense;
pub mod detailed_balance;
pub mod distribution;
pub mod equilibrium;
pub mod error;
pub mod flow;
pub mod rate_matrix;
pub mod tolerance;

pub use config::CheckConfig;
pub use dense::{
    DenseChain, check_dense_detailed_balance, check_dense_equilibrium, to_dense,
    validate_dense_rate_matrix, validate_stochastic_vector,
};
pub use detailed_balance::check_detailed_balance;
pub use distribution::{
    validate_distribution, validate_distribution_with, validate_edge_distribution,
};
pub use equilibrium::check_equilibrium;
pub use error::{
    CheckError, ConfigError, DetailedBalanceError, DistributionError, EquilibriumError, ErrorKind,
    RateMatrixError,
};
pub use flow::{MarginalFlows, flow_graph, marginal_flows};
pub use rate_matrix::validate_rate_matrix;
pub use tolerance::Tolerance;
