use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A chain file: rate matrix, candidate distribution and check settings.
///
/// ```toml
/// states = ["a", "b", "c"]
///
/// [tolerance]
/// rtol = 1e-5
/// atol = 1e-8
///
/// [distribution]
/// a = 0.5
/// b = 0.5
///
/// [[rates]]
/// from = "a"
/// to = "b"
/// rate = 1.0
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChainToml {
    /// Extra states, added as vertices even if no rate touches them.
    #[serde(default)]
    pub states: Vec<String>,

    /// Validate the inputs inside the equilibrium and detailed-balance checks.
    #[serde(default = "default_true")]
    pub validate_inputs: bool,

    /// Closeness tolerance.
    #[serde(default)]
    pub tolerance: ToleranceToml,

    /// Probability of each state.
    #[serde(default)]
    pub distribution: BTreeMap<String, f64>,

    /// Off-diagonal transition rates.
    #[serde(default)]
    pub rates: Vec<RateToml>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToleranceToml {
    #[serde(default = "default_rtol")]
    pub rtol: f64,
    #[serde(default = "default_atol")]
    pub atol: f64,
}

impl Default for ToleranceToml {
    fn default() -> Self {
        Self {
            rtol: default_rtol(),
            atol: default_atol(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RateToml {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

fn default_true() -> bool {
    true
}
fn default_rtol() -> f64 {
    rategraph_check::tolerance::DEFAULT_RTOL
}
fn default_atol() -> f64 {
    rategraph_check::tolerance::DEFAULT_ATOL
}
