//! Configuration shared by the equilibrium and detailed-balance checkers.

use crate::error::ConfigError;
use crate::tolerance::Tolerance;

/// Configuration for the composite checkers.
///
/// # Example
///
/// ```
/// use rategraph_check::{CheckConfig, Tolerance};
///
/// let config = CheckConfig::new()
///     .with_tolerance(Tolerance::relative_only(1e-9))
///     .with_validate_inputs(false);
///
/// assert!(config.validate().is_ok());
/// assert!(!config.validate_inputs());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckConfig {
    tolerance: Tolerance,
    validate_inputs: bool,
}

impl CheckConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `tolerance = Tolerance::default()`, `validate_inputs = true`.
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default(),
            validate_inputs: true,
        }
    }

    /// Sets the tolerance used for every closeness comparison.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets whether the rate matrix and distribution are validated first.
    ///
    /// Skipping validation saves a pass over the inputs when the caller
    /// already knows they are well-formed. With malformed inputs the outcome
    /// of the check is then unspecified.
    pub fn with_validate_inputs(mut self, validate_inputs: bool) -> Self {
        self.validate_inputs = validate_inputs;
        self
    }

    /// Returns the tolerance.
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Returns whether inputs are validated before checking.
    pub fn validate_inputs(&self) -> bool {
        self.validate_inputs
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerance.validate()
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::new()
    }
}
