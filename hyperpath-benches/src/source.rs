//! Seeded synthetic hypergraphs with a skewed entity degree distribution.
//!
//! Entities are drawn with weight `1 / (rank + 1)`, so a handful of entities
//! appear in many hyperedges and the rest in few. That gives traversal and
//! hub benchmarks realistic overlap without external data.

use hyperpath_core::{Hyperedge, Hyperpath, HyperpathBuilder};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::index::sample_weighted};
use thiserror::Error;

/// Errors raised while generating synthetic hypergraphs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// No hyperedges were requested.
    #[error("hyperedge_count must be greater than zero")]
    ZeroHyperedges,
    /// Hyperedge sizes must satisfy `2 <= min_size <= max_size`.
    #[error("invalid hyperedge size range {min_size}..={max_size}")]
    InvalidSizeRange {
        /// Smallest hyperedge size.
        min_size: usize,
        /// Largest hyperedge size.
        max_size: usize,
    },
    /// The entity pool cannot fill the largest hyperedge.
    #[error("{entity_count} entities cannot fill hyperedges of size {max_size}")]
    EntityPoolTooSmall {
        /// Number of distinct entities available.
        entity_count: usize,
        /// Largest hyperedge size requested.
        max_size: usize,
    },
    /// Weighted sampling rejected the entity weights.
    #[error("entity sampling failed: {reason}")]
    Sampling {
        /// Description from the sampler.
        reason: String,
    },
}

/// Shape of a synthetic hypergraph.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Number of hyperedges to generate.
    pub hyperedge_count: usize,
    /// Size of the entity pool.
    pub entity_count: usize,
    /// Smallest hyperedge size, at least 2.
    pub min_size: usize,
    /// Largest hyperedge size.
    pub max_size: usize,
    /// RNG seed.
    pub seed: u64,
}

impl SyntheticConfig {
    /// A pool of `hyperedge_count / 2` entities (at least 8) and sizes 2..=5.
    #[must_use]
    pub fn sized(hyperedge_count: usize, seed: u64) -> Self {
        Self {
            hyperedge_count,
            entity_count: (hyperedge_count / 2).max(8),
            min_size: 2,
            max_size: 5,
            seed,
        }
    }

    fn validate(&self) -> Result<(), SyntheticError> {
        if self.hyperedge_count == 0 {
            return Err(SyntheticError::ZeroHyperedges);
        }
        if self.min_size < 2 || self.min_size > self.max_size {
            return Err(SyntheticError::InvalidSizeRange {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        if self.entity_count < self.max_size {
            return Err(SyntheticError::EntityPoolTooSmall {
                entity_count: self.entity_count,
                max_size: self.max_size,
            });
        }
        Ok(())
    }
}

/// Generates `config.hyperedge_count` hyperedges named `h0, h1, ...` over
/// entities named `e0, e1, ...`.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is inconsistent.
pub fn generate(config: &SyntheticConfig) -> Result<Vec<Hyperedge>, SyntheticError> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    (0..config.hyperedge_count)
        .map(|index| {
            let size = rng.gen_range(config.min_size..=config.max_size);
            let mut chosen = sample_weighted(
                &mut rng,
                config.entity_count,
                |rank| 1.0 / (rank as f64 + 1.0),
                size,
            )
            .map_err(|err| SyntheticError::Sampling {
                reason: err.to_string(),
            })?
            .into_vec();
            chosen.sort_unstable();
            Ok(Hyperedge::from_entities(
                format!("h{index}"),
                chosen.into_iter().map(|entity| format!("e{entity}")),
            ))
        })
        .collect()
}

/// Generates a hypergraph and loads it into an engine.
///
/// # Errors
/// Returns [`crate::error::BenchSetupError`] when generation or insertion
/// fails.
pub fn engine(config: &SyntheticConfig) -> Result<Hyperpath, crate::error::BenchSetupError> {
    let hyperedges = generate(config)?;
    Ok(HyperpathBuilder::new()
        .with_capacity(hyperedges.len())
        .with_hyperedges(hyperedges)
        .build()?)
}
