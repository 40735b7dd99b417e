//! Generate command: write a random symmetric chain file.

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use rategraph_fixtures::{
    random_binomial_distribution, random_sparse_uniform_distribution,
    random_symmetric_dense_rate_matrix, random_symmetric_sparse_rate_matrix, uniform_distribution,
};
use rategraph_graph::{Distribution, RateMatrix};

use crate::cli::{DistributionShape, GenerateArgs};
use crate::config::ChainToml;
use crate::convert;

/// Builds a seeded or OS-sourced RNG.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Run the generate pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    let cfg = generate(&args)?;
    let text = toml::to_string(&cfg).context("failed to serialize chain")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write chain file: {}", path.display()))?;
            info!(path = %path.display(), "chain written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Draw a chain over `args.states` without writing it anywhere.
pub fn generate(args: &GenerateArgs) -> Result<ChainToml> {
    let states: Vec<String> = args
        .states
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    if let Some(s) = states.iter().find(|s| s.is_empty()) {
        bail!("state names must be non-empty, got {s:?}");
    }

    let mut rng = make_rng(args.seed);

    let q: RateMatrix<String> = if args.sparse {
        random_symmetric_sparse_rate_matrix(states.iter().cloned(), &mut rng)?
    } else {
        random_symmetric_dense_rate_matrix(states.iter().cloned(), &mut rng)?
    };
    let distn: Distribution<String> = match args.distribution {
        DistributionShape::Uniform => uniform_distribution(states)?,
        DistributionShape::Binomial => random_binomial_distribution(states, &mut rng)?,
        DistributionShape::SparseUniform => random_sparse_uniform_distribution(states, &mut rng)?,
    };
    info!(
        n_states = q.vertex_count(),
        n_rates = q.edge_count(),
        support = distn.len(),
        sparse = args.sparse,
        "chain generated"
    );

    Ok(convert::chain_to_toml(&q, &distn))
}
