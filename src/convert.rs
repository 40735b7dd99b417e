//! Pure conversion functions between the chain file and library types.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Result, bail};

use rategraph_check::{CheckConfig, Tolerance};
use rategraph_graph::{Distribution, RateMatrix};

use crate::config::{ChainToml, RateToml, ToleranceToml};

/// A chain loaded from a file, ready to check.
#[derive(Debug)]
pub struct Chain {
    pub rates: RateMatrix<String>,
    pub distribution: Distribution<String>,
    pub config: CheckConfig,
}

/// Converts a TOML tolerance table into a `Tolerance`, rejecting bad values.
pub fn build_tolerance(t: &ToleranceToml) -> Result<Tolerance> {
    let tol = Tolerance::new(t.rtol, t.atol);
    tol.validate()?;
    Ok(tol)
}

/// Builds the rate matrix from the `rates` array and extra `states`.
///
/// Listing the same `from -> to` pair twice is an error; the file would be
/// ambiguous otherwise.
pub fn build_rate_matrix(states: &[String], rates: &[RateToml]) -> Result<RateMatrix<String>> {
    let mut q = RateMatrix::new();
    for s in states {
        q.add_vertex(s.clone());
    }
    let mut seen = HashSet::new();
    for r in rates {
        if !seen.insert((r.from.as_str(), r.to.as_str())) {
            bail!("duplicate rate {:?} -> {:?}", r.from, r.to);
        }
        q.add_edge(r.from.clone(), r.to.clone(), r.rate);
    }
    Ok(q)
}

/// Converts the `[distribution]` table.
pub fn build_distribution(d: &BTreeMap<String, f64>) -> Distribution<String> {
    d.iter().map(|(s, &p)| (s.clone(), p)).collect()
}

/// Converts a whole chain file.
pub fn build_chain(cfg: &ChainToml) -> Result<Chain> {
    let tolerance = build_tolerance(&cfg.tolerance)?;
    Ok(Chain {
        rates: build_rate_matrix(&cfg.states, &cfg.rates)?,
        distribution: build_distribution(&cfg.distribution),
        config: CheckConfig::new()
            .with_tolerance(tolerance)
            .with_validate_inputs(cfg.validate_inputs),
    })
}

/// Serializes a generated chain back into the file layout.
///
/// Vertices are listed under `states` so isolated states survive a round
/// trip.
pub fn chain_to_toml(q: &RateMatrix<String>, distn: &Distribution<String>) -> ChainToml {
    ChainToml {
        states: q.vertices().cloned().collect(),
        validate_inputs: true,
        tolerance: ToleranceToml::default(),
        distribution: distn.iter().map(|(s, p)| (s.clone(), p)).collect(),
        rates: q
            .edges()
            .map(|(from, to, rate)| RateToml {
                from: from.clone(),
                to: to.clone(),
                rate,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(from: &str, to: &str, rate: f64) -> RateToml {
        RateToml {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        }
    }

    #[test]
    fn rate_matrix_includes_isolated_states() {
        let q = build_rate_matrix(&["z".to_string()], &[rate("a", "b", 1.0)]).unwrap();
        assert_eq!(q.vertex_count(), 3);
        assert_eq!(q.edge_count(), 1);
        assert!(q.contains_vertex(&"z".to_string()));
        assert_eq!(q.weight(&"a".to_string(), &"b".to_string()), Some(1.0));
    }

    #[test]
    fn duplicate_rate_rejected() {
        let err = build_rate_matrix(&[], &[rate("a", "b", 1.0), rate("a", "b", 2.0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate rate"));
    }

    #[test]
    fn reverse_rate_is_not_a_duplicate() {
        let q = build_rate_matrix(&[], &[rate("a", "b", 1.0), rate("b", "a", 2.0)]).unwrap();
        assert_eq!(q.edge_count(), 2);
    }

    #[test]
    fn negative_tolerance_rejected() {
        let t = ToleranceToml {
            rtol: -1.0,
            atol: 0.0,
        };
        assert!(build_tolerance(&t).is_err());
    }

    #[test]
    fn chain_carries_settings() {
        let cfg: ChainToml = toml::from_str(
            r#"
            validate_inputs = false
            [tolerance]
            rtol = 0.01
            atol = 0.0
            [distribution]
            a = 1.0
            "#,
        )
        .unwrap();
        let chain = build_chain(&cfg).unwrap();
        assert!(!chain.config.validate_inputs());
        assert_eq!(chain.config.tolerance().rtol(), 0.01);
        assert_eq!(chain.distribution.get(&"a".to_string()), Some(1.0));
        assert_eq!(chain.rates.vertex_count(), 0);
    }

    #[test]
    fn toml_round_trip_preserves_chain() {
        let mut q = RateMatrix::new();
        q.add_edge("a".to_string(), "b".to_string(), 0.5);
        q.add_edge("b".to_string(), "a".to_string(), 0.5);
        q.add_vertex("c".to_string());
        let distn: Distribution<String> = [("a".to_string(), 0.5), ("b".to_string(), 0.5)]
            .into_iter()
            .collect();

        let text = toml::to_string(&chain_to_toml(&q, &distn)).unwrap();
        let chain = build_chain(&toml::from_str(&text).unwrap()).unwrap();

        assert_eq!(chain.rates.vertex_count(), 3);
        assert_eq!(chain.rates.edge_count(), 2);
        assert_eq!(
            chain.rates.weight(&"b".to_string(), &"a".to_string()),
            Some(0.5)
        );
        assert_eq!(chain.distribution.len(), 2);
    }
}
