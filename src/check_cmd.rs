//! Check command: load a chain file and run the selected checks on it.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use rategraph_check::{
    CheckConfig, CheckError, DenseChain, ErrorKind, check_dense_detailed_balance,
    check_dense_equilibrium, check_detailed_balance, check_equilibrium, to_dense,
    validate_dense_rate_matrix, validate_distribution_with, validate_rate_matrix,
    validate_stochastic_vector,
};
use rategraph_graph::State;

use crate::cli::{CheckArgs, CheckKind};
use crate::config::ChainToml;
use crate::convert::{self, Chain};

/// Why one check failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub check: CheckKind,
    pub failure: Option<Failure>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "{}: ok", self.check.label()),
            Some(fail) => write!(
                f,
                "{}: FAILED ({}): {}",
                self.check.label(),
                fail.kind,
                fail.message
            ),
        }
    }
}

/// Run the check pipeline. Returns `Ok(false)` if any check failed.
pub fn run(args: CheckArgs) -> Result<bool> {
    let _cmd = info_span!("check").entered();

    let mut chain = load_chain(&args.chain)?;
    if args.skip_input_validation {
        chain.config = chain.config.with_validate_inputs(false);
    }
    info!(
        n_states = chain.rates.vertex_count(),
        n_rates = chain.rates.edge_count(),
        support = chain.distribution.len(),
        "chain loaded"
    );

    let checks = if args.only.is_empty() {
        CheckKind::ALL.to_vec()
    } else {
        args.only
    };

    let reports = run_checks(&chain, &checks, args.dense);
    for report in &reports {
        println!("{report}");
    }
    Ok(reports.iter().all(CheckReport::passed))
}

/// Read and convert a chain file.
pub fn load_chain(path: &Path) -> Result<Chain> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read chain file: {}", path.display()))?;
    let cfg: ChainToml = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse chain file: {}", path.display()))?;
    convert::build_chain(&cfg).with_context(|| format!("invalid chain file: {}", path.display()))
}

/// Run `checks` in order against `chain`.
///
/// With `dense`, the chain is first laid out as a generator matrix over its
/// states in ascending order, and failures name states by index.
pub fn run_checks(chain: &Chain, checks: &[CheckKind], dense: bool) -> Vec<CheckReport> {
    let dense = dense.then(|| to_dense(&chain.rates, &chain.distribution));
    if let Some(d) = &dense {
        info!(states = ?d.states, "dense state order");
    }

    checks
        .iter()
        .map(|&check| {
            let failure = match &dense {
                Some(d) => to_failure(run_dense(check, d, &chain.config)),
                None => to_failure(run_graph(check, chain)),
            };
            if let Some(f) = &failure {
                warn!(check = check.label(), kind = %f.kind, "check failed");
            }
            CheckReport { check, failure }
        })
        .collect()
}

fn run_graph(check: CheckKind, chain: &Chain) -> Result<(), CheckError<String>> {
    let (q, distn, config) = (&chain.rates, &chain.distribution, &chain.config);
    match check {
        CheckKind::Distribution => {
            validate_distribution_with(distn, config.tolerance()).map_err(CheckError::from)
        }
        CheckKind::RateMatrix => validate_rate_matrix(q).map_err(CheckError::from),
        CheckKind::Equilibrium => check_equilibrium(q, distn, config),
        CheckKind::DetailedBalance => check_detailed_balance(q, distn, config),
    }
}

fn run_dense(
    check: CheckKind,
    d: &DenseChain<String>,
    config: &CheckConfig,
) -> Result<(), CheckError<usize>> {
    let (q, p) = (&d.rates, &d.distribution);
    match check {
        CheckKind::Distribution => {
            validate_stochastic_vector(p, config.tolerance()).map_err(CheckError::from)
        }
        CheckKind::RateMatrix => {
            validate_dense_rate_matrix(q, config.tolerance()).map_err(CheckError::from)
        }
        CheckKind::Equilibrium => check_dense_equilibrium(q, p, config),
        CheckKind::DetailedBalance => check_dense_detailed_balance(q, p, config),
    }
}

fn to_failure<S: State>(result: Result<(), CheckError<S>>) -> Option<Failure> {
    result.err().map(|e| Failure {
        kind: e.kind(),
        message: e.to_string(),
    })
}
