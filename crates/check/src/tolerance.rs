//! Floating-point closeness comparison.

use crate::error::ConfigError;

/// Default relative tolerance.
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Default absolute tolerance.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Relative and absolute tolerance for comparing two floats.
///
/// `a` is close to `b` when `|a - b| <= atol + rtol * |b|`. The comparison is
/// asymmetric: `b` is the reference value.
///
/// # Example
///
/// ```
/// use rategraph_check::Tolerance;
///
/// let tol = Tolerance::default();
/// assert!(tol.is_close(1.0 + 1e-7, 1.0));
/// assert!(!tol.is_close(1.001, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    rtol: f64,
    atol: f64,
}

impl Tolerance {
    /// Creates a tolerance from explicit relative and absolute parts.
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Creates a purely relative tolerance (`atol = 0`).
    pub fn relative_only(rtol: f64) -> Self {
        Self { rtol, atol: 0.0 }
    }

    /// Returns the relative tolerance.
    pub fn rtol(&self) -> f64 {
        self.rtol
    }

    /// Returns the absolute tolerance.
    pub fn atol(&self) -> f64 {
        self.atol
    }

    /// Returns `true` if `a` is within tolerance of the reference `b`.
    ///
    /// NaN is never close to anything. Equal infinities are close.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    /// Checks that both parts are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.rtol) || !ok(self.atol) {
            return Err(ConfigError::InvalidTolerance {
                rtol: self.rtol,
                atol: self.atol,
            });
        }
        Ok(())
    }
}

impl Default for Tolerance {
    /// `rtol = 1e-5`, `atol = 1e-8`.
    fn default() -> Self {
        Self::new(DEFAULT_RTOL, DEFAULT_ATOL)
    }
}
