//! Builder for [`Hyperpath`] engines seeded with an initial batch.

use crate::{Result, engine::Hyperpath, hyperedge::Hyperedge, hypergraph::Hypergraph};

/// Configures and constructs [`Hyperpath`] instances.
///
/// # Examples
/// ```
/// use hyperpath_core::{Hyperedge, HyperpathBuilder};
///
/// let engine = HyperpathBuilder::new()
///     .with_capacity(16)
///     .with_hyperedge(Hyperedge::from_entities("h0", ["a", "b"]))
///     .with_hyperedges([Hyperedge::from_entities("h1", ["b", "c"])])
///     .build()
///     .expect("seed hyperedges are valid");
/// assert_eq!(engine.snapshot()?.len(), 2);
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HyperpathBuilder {
    capacity: usize,
    seed: Vec<Hyperedge>,
}

impl HyperpathBuilder {
    /// Creates a builder with no seed hyperedges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `capacity` hyperedges up front.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds one seed hyperedge.
    #[must_use]
    pub fn with_hyperedge(mut self, hyperedge: Hyperedge) -> Self {
        self.seed.push(hyperedge);
        self
    }

    /// Adds several seed hyperedges in order.
    #[must_use]
    pub fn with_hyperedges(mut self, hyperedges: impl IntoIterator<Item = Hyperedge>) -> Self {
        self.seed.extend(hyperedges);
        self
    }

    /// Returns the reserved capacity.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> usize { self.capacity }

    /// Returns the number of seed hyperedges queued so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed_len(&self) -> usize { self.seed.len() }

    /// Validates the seed batch and constructs the engine.
    ///
    /// # Errors
    /// Returns [`crate::HyperpathError::InvalidHyperedge`] for the first
    /// malformed or duplicate seed hyperedge.
    pub fn build(self) -> Result<Hyperpath> {
        let mut graph = Hypergraph::with_capacity(self.capacity.max(self.seed.len()));
        graph.validate_batch(&self.seed)?;
        for hyperedge in self.seed {
            graph.append_unchecked(hyperedge);
        }
        Ok(Hyperpath::from_hypergraph(graph))
    }
}
