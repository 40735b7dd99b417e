//! Error types for the rategraph-fixtures crate.

use rategraph_graph::State;

/// Error type for all fallible operations in the rategraph-fixtures crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FixtureError<S: State> {
    /// Returned when no states are given.
    #[error("state list is empty")]
    EmptyStates,

    /// Returned when a state appears more than once.
    #[error("duplicate state: {state:?}")]
    DuplicateState {
        /// The repeated state.
        state: S,
    },

    /// Returned when the binomial weights cannot be built.
    #[error("invalid binomial parameters: {reason}")]
    Binomial {
        /// Description of the problem.
        reason: String,
    },
}
