//! Error types for the rategraph-check crate.
//!
//! Each check family has its own enum. [`CheckError`] wraps all of them for
//! the composite checkers, and every error reports an [`ErrorKind`] so callers
//! can tell structural failures from magnitude failures without matching on
//! individual variants.

use std::fmt;

use rategraph_graph::State;

/// Classification of every failure this crate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A distribution has no states at all.
    EmptySupport,
    /// A single probability lies outside `[0, 1]` or is not finite.
    LocalDistribution,
    /// The probabilities do not add up to 1.
    GlobalDistribution,
    /// A rate matrix has a self-transition, a negative rate, or (in dense
    /// form) a bad diagonal or row sum.
    InvalidRateMatrix,
    /// A dense rate matrix and distribution vector have incompatible shapes.
    ShapeMismatch,
    /// A tolerance is negative or not finite.
    InvalidTolerance,
    /// Some state has flow on one side only.
    UnweightedEquilibrium,
    /// Some state has differing inward and outward flow.
    WeightedEquilibrium,
    /// Some flow has no reverse flow.
    UnweightedDetailedBalance,
    /// Some forward and backward flows differ.
    WeightedDetailedBalance,
}

impl ErrorKind {
    /// Returns `true` for failures about which flows exist at all.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::UnweightedEquilibrium | Self::UnweightedDetailedBalance
        )
    }

    /// Returns `true` for failures about flow magnitudes.
    pub fn is_weighted(self) -> bool {
        matches!(
            self,
            Self::WeightedEquilibrium | Self::WeightedDetailedBalance
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptySupport => "empty support",
            Self::LocalDistribution => "local distribution",
            Self::GlobalDistribution => "global distribution",
            Self::InvalidRateMatrix => "invalid rate matrix",
            Self::ShapeMismatch => "shape mismatch",
            Self::InvalidTolerance => "invalid tolerance",
            Self::UnweightedEquilibrium => "unweighted equilibrium",
            Self::WeightedEquilibrium => "weighted equilibrium",
            Self::UnweightedDetailedBalance => "unweighted detailed balance",
            Self::WeightedDetailedBalance => "weighted detailed balance",
        };
        f.write_str(name)
    }
}

/// Errors in check configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Returned when a tolerance is negative or not finite.
    #[error("invalid tolerance: rtol = {rtol}, atol = {atol} (must be finite and non-negative)")]
    InvalidTolerance {
        /// Relative tolerance.
        rtol: f64,
        /// Absolute tolerance.
        atol: f64,
    },
}

impl ConfigError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidTolerance
    }
}

/// A distribution is not a valid finite probability distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError<S: State> {
    /// Returned when the distribution has no states.
    #[error("empty support")]
    EmptySupport,

    /// Returned when a probability is NaN or infinite.
    #[error("probabilities must be finite, but found prob({state:?}) = {value}")]
    NonFinite {
        /// The offending state.
        state: S,
        /// Its probability.
        value: f64,
    },

    /// Returned when the smallest probability is negative.
    #[error("probabilities must be non-negative, but found prob({state:?}) = {value}")]
    Negative {
        /// First state holding the minimum.
        state: S,
        /// The minimum probability.
        value: f64,
    },

    /// Returned when the largest probability exceeds 1.
    #[error("probabilities must not be greater than 1, but found prob({state:?}) = {value}")]
    ExceedsOne {
        /// First state holding the maximum.
        state: S,
        /// The maximum probability.
        value: f64,
    },

    /// Returned when the probabilities do not sum to 1.
    #[error("probabilities should add up to 1, but found total {total}")]
    Total {
        /// Sum of all probabilities.
        total: f64,
    },
}

impl<S: State> DistributionError<S> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySupport => ErrorKind::EmptySupport,
            Self::NonFinite { .. } | Self::Negative { .. } | Self::ExceedsOne { .. } => {
                ErrorKind::LocalDistribution
            }
            Self::Total { .. } => ErrorKind::GlobalDistribution,
        }
    }
}

/// A rate matrix is not a valid CTMC generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateMatrixError<S: State> {
    /// Returned when an edge starts and ends at the same state.
    #[error("self-transitions are not allowed, but found rate({state:?}, {state:?}) = {rate}")]
    SelfTransition {
        /// The state with the loop.
        state: S,
        /// Rate on the loop.
        rate: f64,
    },

    /// Returned when an off-diagonal rate is negative.
    #[error("rates must be non-negative, but found rate({from:?}, {to:?}) = {rate}")]
    NegativeRate {
        /// Source state.
        from: S,
        /// Target state.
        to: S,
        /// The negative rate.
        rate: f64,
    },

    /// Returned when a rate is NaN or infinite.
    #[error("rates must be finite, but found rate({from:?}, {to:?}) = {rate}")]
    NonFiniteRate {
        /// Source state.
        from: S,
        /// Target state.
        to: S,
        /// The non-finite rate.
        rate: f64,
    },

    /// Returned when a dense rate matrix is not square.
    #[error("rate matrix must be square, but has shape ({rows}, {cols})")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when a row of a dense rate matrix does not sum to zero.
    #[error("rate matrix rows must sum to zero, but row {state:?} sums to {sum}")]
    RowSum {
        /// The offending row.
        state: S,
        /// Its sum.
        sum: f64,
    },

    /// Returned when a diagonal entry of a dense rate matrix is positive.
    #[error(
        "rate matrix diagonal must be non-positive, but found rate({state:?}, {state:?}) = {rate}"
    )]
    PositiveDiagonal {
        /// The offending state.
        state: S,
        /// Its diagonal entry.
        rate: f64,
    },
}

impl<S: State> RateMatrixError<S> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidRateMatrix
    }
}

/// The chain is not at equilibrium under the given distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EquilibriumError<S: State> {
    /// Returned when states have outward flow and no inward flow.
    #[error("the following states have flow out but not in: {states:?}")]
    FlowOutOnly {
        /// Offending states, in ascending order.
        states: Vec<S>,
    },

    /// Returned when states have inward flow and no outward flow.
    #[error("the following states have flow in but not out: {states:?}")]
    FlowInOnly {
        /// Offending states, in ascending order.
        states: Vec<S>,
    },

    /// Returned when inward and outward flow differ at a state.
    #[error("equilibrium fails for state {state:?}: flow in {flow_in}, flow out {flow_out}")]
    Imbalance {
        /// First offending state in ascending order.
        state: S,
        /// Total flow into the state.
        flow_in: f64,
        /// Total flow out of the state.
        flow_out: f64,
    },
}

impl<S: State> EquilibriumError<S> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FlowOutOnly { .. } | Self::FlowInOnly { .. } => ErrorKind::UnweightedEquilibrium,
            Self::Imbalance { .. } => ErrorKind::WeightedEquilibrium,
        }
    }
}

/// The chain does not satisfy detailed balance under the given distribution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetailedBalanceError<S: State> {
    /// Returned when flow exists in only one direction between states.
    #[error("only the forward direction of flow exists for the following state pairs: {pairs:?}")]
    OneWay {
        /// Offending `(from, to)` pairs, in ascending order.
        pairs: Vec<(S, S)>,
    },

    /// Returned when forward and backward flow differ for a pair.
    #[error(
        "detailed balance fails for state pair ({from:?}, {to:?}): \
         forward flow {forward}, backward flow {backward}"
    )]
    Asymmetric {
        /// Source of the forward flow.
        from: S,
        /// Target of the forward flow.
        to: S,
        /// Flow from `from` to `to`.
        forward: f64,
        /// Flow from `to` to `from`.
        backward: f64,
    },
}

impl<S: State> DetailedBalanceError<S> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OneWay { .. } => ErrorKind::UnweightedDetailedBalance,
            Self::Asymmetric { .. } => ErrorKind::WeightedDetailedBalance,
        }
    }
}

/// Error type for the equilibrium and detailed-balance checkers.
///
/// Input validation failures are propagated unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError<S: State> {
    /// Invalid check configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid distribution.
    #[error(transparent)]
    Distribution(#[from] DistributionError<S>),

    /// Invalid rate matrix.
    #[error(transparent)]
    RateMatrix(#[from] RateMatrixError<S>),

    /// Equilibrium violated.
    #[error(transparent)]
    Equilibrium(#[from] EquilibriumError<S>),

    /// Detailed balance violated.
    #[error(transparent)]
    DetailedBalance(#[from] DetailedBalanceError<S>),

    /// Dense inputs of different sizes.
    #[error("distribution has {len} entries, but the rate matrix has {states} states")]
    ShapeMismatch {
        /// Number of states of the rate matrix.
        states: usize,
        /// Length of the distribution vector.
        len: usize,
    },
}

impl<S: State> CheckError<S> {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(e) => e.kind(),
            Self::Distribution(e) => e.kind(),
            Self::RateMatrix(e) => e.kind(),
            Self::Equilibrium(e) => e.kind(),
            Self::DetailedBalance(e) => e.kind(),
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
        }
    }
}
