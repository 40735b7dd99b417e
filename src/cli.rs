use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// rategraph: consistency checks for continuous-time Markov chains.
#[derive(Parser)]
#[command(
    name = "rategraph",
    version,
    about = "Check CTMC rate matrices and stationary distributions"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Check a chain file.
    Check(CheckArgs),
    /// Write a random symmetric chain file.
    Generate(GenerateArgs),
}

/// Individual checks that `check` can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CheckKind {
    /// The distribution is a valid probability distribution.
    Distribution,
    /// The rate matrix is a valid generator.
    RateMatrix,
    /// The chain is at equilibrium under the distribution.
    Equilibrium,
    /// The chain satisfies detailed balance under the distribution.
    DetailedBalance,
}

impl CheckKind {
    /// All checks in the order they are reported.
    pub const ALL: [CheckKind; 4] = [
        Self::Distribution,
        Self::RateMatrix,
        Self::Equilibrium,
        Self::DetailedBalance,
    ];

    /// Label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Distribution => "distribution",
            Self::RateMatrix => "rate-matrix",
            Self::Equilibrium => "equilibrium",
            Self::DetailedBalance => "detailed-balance",
        }
    }
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to the TOML chain file.
    pub chain: PathBuf,

    /// Run only the given checks (repeatable). Defaults to all.
    #[arg(long, value_enum)]
    pub only: Vec<CheckKind>,

    /// Skip input validation inside the equilibrium and detailed-balance checks.
    #[arg(long)]
    pub skip_input_validation: bool,

    /// Check the dense generator matrix instead of the rate graph. Failures
    /// name states by index in ascending order.
    #[arg(long)]
    pub dense: bool,
}

/// Shape of the generated distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DistributionShape {
    /// Equal mass on every state.
    Uniform,
    /// Binomial weights with a random success probability.
    Binomial,
    /// Equal mass on a random subset of states.
    SparseUniform,
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Comma-separated state names.
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub states: Vec<String>,

    /// Join only a random connected subset of state pairs.
    #[arg(long)]
    pub sparse: bool,

    /// Distribution to pair with the rate matrix.
    #[arg(short, long, value_enum, default_value = "uniform")]
    pub distribution: DistributionShape,

    /// RNG seed. Drawn from the OS when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output path. Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
