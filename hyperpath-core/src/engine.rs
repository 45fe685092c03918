//! The concurrent hypergraph engine.
//!
//! [`Hyperpath`] owns the current [`Hypergraph`] generation behind an
//! `RwLock<Arc<_>>`. Readers clone the `Arc` and work on that snapshot
//! without further coordination. Writers are serialised by an insertion
//! mutex, validate against the current generation under a shared lock, and
//! then publish through [`Arc::make_mut`]: a generation still held by a
//! reader is cloned first, so no reader ever observes a partial update.

use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Range,
    sync::{Arc, Mutex, RwLock},
};

use tracing::{debug, instrument, warn};

use crate::{
    analysis::{DecisionPatterns, FeedbackReport, HubAnalysis, HypergraphStatistics, PowerLawFit},
    components::ComponentSummary,
    error::{HyperpathError, Result},
    hyperedge::Hyperedge,
    hypergraph::Hypergraph,
    params::{PathParams, TraversalParams},
    traversal::HyperPath,
};

/// Thread-safe front door to the traversal and analysis engine.
///
/// # Examples
/// ```
/// use hyperpath_core::{Hyperedge, Hyperpath};
///
/// let engine = Hyperpath::new();
/// engine.insert(Hyperedge::from_entities("h0", ["a", "b", "c"]))?;
/// engine.insert(Hyperedge::from_entities("h1", ["b", "c", "d"]))?;
/// let path = engine.shortest_path(0, 1, 2, None)?.expect("h0 meets h1 on b and c");
/// assert_eq!(path.positions(), [0, 1]);
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Debug, Default)]
pub struct Hyperpath {
    generation: RwLock<Arc<Hypergraph>>,
    insert_mutex: Mutex<()>,
}

impl Hyperpath {
    /// Creates an engine over an empty hypergraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_hypergraph(graph: Hypergraph) -> Self {
        Self {
            generation: RwLock::new(Arc::new(graph)),
            insert_mutex: Mutex::new(()),
        }
    }

    /// Returns the current immutable generation.
    ///
    /// The snapshot stays valid, and unchanged, for as long as the caller
    /// holds it, whatever insertions happen meanwhile.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if a writer panicked while
    /// publishing.
    pub fn snapshot(&self) -> Result<Arc<Hypergraph>> {
        self.generation
            .read()
            .map(|generation| Arc::clone(&generation))
            .map_err(|_| HyperpathError::LockPoisoned {
                resource: "hypergraph generation",
            })
    }

    /// Validates and appends one hyperedge, returning its position.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidHyperedge`] for malformed or duplicate
    /// records; the published generation is unchanged in that case.
    #[instrument(
        name = "core.insert",
        err,
        skip(self, hyperedge),
        fields(id = %hyperedge.id(), cardinality = hyperedge.cardinality()),
    )]
    pub fn insert(&self, hyperedge: Hyperedge) -> Result<usize> {
        let range = self.publish(vec![hyperedge])?;
        Ok(range.start)
    }

    /// Validates a whole batch and publishes it as a single generation.
    ///
    /// Either every hyperedge is appended or none is.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidHyperedge`] for the first malformed
    /// or duplicate record in the batch.
    #[instrument(name = "core.insert_batch", err, skip(self, hyperedges))]
    pub fn insert_batch(
        &self,
        hyperedges: impl IntoIterator<Item = Hyperedge>,
    ) -> Result<Range<usize>> {
        self.publish(hyperedges.into_iter().collect())
    }

    fn publish(&self, batch: Vec<Hyperedge>) -> Result<Range<usize>> {
        let _insertion_guard = self
            .insert_mutex
            .lock()
            .map_err(|_| HyperpathError::LockPoisoned {
                resource: "insert mutex",
            })?;

        if let Err(err) = self.snapshot()?.validate_batch(&batch) {
            warn!(code = %err.code(), error = %err, "hyperedge batch rejected");
            record_rejection();
            return Err(err);
        }

        let mut generation = self
            .generation
            .write()
            .map_err(|_| HyperpathError::LockPoisoned {
                resource: "hypergraph generation",
            })?;
        let next = Arc::make_mut(&mut generation);
        let start = next.len();
        let inserted = batch.len();
        for hyperedge in batch {
            next.append_unchecked(hyperedge);
        }
        let end = next.len();
        drop(generation);

        record_insertions(inserted);
        debug!(start, end, "published hypergraph generation");
        Ok(start..end)
    }

    /// Hyperedges sharing at least `s` entities with `position`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1` and
    /// [`HyperpathError::UnknownPosition`] for unknown positions.
    #[instrument(name = "core.neighbours", err, skip(self))]
    pub fn neighbours(&self, position: usize, s: usize) -> Result<BTreeSet<usize>> {
        self.snapshot()?.neighbours(position, s)
    }

    /// Shortest s-path between two hyperedges within `max_depth` hops.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1` and
    /// [`HyperpathError::UnknownPosition`] for unknown positions.
    #[instrument(name = "core.shortest_path", err, skip(self))]
    pub fn shortest_path(
        &self,
        start: usize,
        target: usize,
        s: usize,
        max_depth: Option<usize>,
    ) -> Result<Option<HyperPath>> {
        let params = TraversalParams::new(s, max_depth)?;
        let path = self.snapshot()?.shortest_path(start, target, params)?;
        debug!(found = path.is_some(), "shortest path search complete");
        Ok(path)
    }

    /// Every hyperedge reachable from `start` within `max_depth` hops.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1` and
    /// [`HyperpathError::UnknownPosition`] for an unknown start.
    #[instrument(name = "core.reachable_set", err, skip(self))]
    pub fn reachable_set(
        &self,
        start: usize,
        s: usize,
        max_depth: Option<usize>,
    ) -> Result<BTreeSet<usize>> {
        let params = TraversalParams::new(s, max_depth)?;
        self.snapshot()?.reachable_set(start, params)
    }

    /// Up to `k` loopless s-paths between two hyperedges, shortest first.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `k` or `s` is zero,
    /// [`HyperpathError::UnknownPosition`] for unknown positions, and
    /// [`HyperpathError::InvariantViolation`] if a result fails the s-path
    /// predicate.
    #[instrument(name = "core.k_shortest_paths", err, skip(self))]
    pub fn k_shortest_paths(
        &self,
        start: usize,
        target: usize,
        k: usize,
        s: usize,
        max_depth: Option<usize>,
    ) -> Result<Vec<HyperPath>> {
        let params = PathParams::new(k, s, max_depth)?;
        let paths = self.snapshot()?.k_shortest_paths(start, target, params)?;
        debug!(paths = paths.len(), "k-shortest path search complete");
        Ok(paths)
    }

    /// Up to `k` s-paths linking hyperedges that mention `from_entity` to
    /// hyperedges that mention `to_entity`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `k` or `s` is zero.
    #[instrument(name = "core.entity_paths", err, skip(self))]
    pub fn entity_paths(
        &self,
        from_entity: &str,
        to_entity: &str,
        k: usize,
        s: usize,
        max_depth: Option<usize>,
    ) -> Result<Vec<HyperPath>> {
        let params = PathParams::new(k, s, max_depth)?;
        self.snapshot()?.entity_paths(from_entity, to_entity, params)
    }

    /// Partitions the hyperedges into s-connected components.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1`.
    #[instrument(name = "core.connected_components", err, skip(self))]
    pub fn connected_components(&self, s: usize) -> Result<Vec<BTreeSet<usize>>> {
        let components = self.snapshot()?.connected_components(s)?;
        debug!(components = components.len(), "component analysis complete");
        Ok(components)
    }

    /// Component counts and the largest component sizes.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1`.
    #[instrument(name = "core.component_summary", err, skip(self))]
    pub fn component_summary(&self, s: usize, top: usize) -> Result<ComponentSummary> {
        self.snapshot()?.component_summary(s, top)
    }

    /// Hyperedges sharing no entity with any other hyperedge.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    pub fn isolated_hyperedges(&self) -> Result<Vec<usize>> {
        Ok(self.snapshot()?.isolated_hyperedges())
    }

    /// Number of hyperedges mentioning `entity`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    pub fn degree(&self, entity: &str) -> Result<usize> {
        Ok(self.snapshot()?.degree(entity))
    }

    /// Maps each degree to the number of entities with that degree.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    pub fn degree_distribution(&self) -> Result<BTreeMap<usize, usize>> {
        Ok(self.snapshot()?.degree_distribution())
    }

    /// Power-law fit of the degree distribution, if one exists.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    pub fn power_law_fit(&self) -> Result<Option<PowerLawFit>> {
        Ok(self.snapshot()?.power_law_fit())
    }

    /// Ranks the `top_k` highest-degree entities.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    #[instrument(name = "core.hub_analysis", err, skip(self))]
    pub fn hub_analysis(&self, top_k: usize) -> Result<HubAnalysis> {
        Ok(self.snapshot()?.hub_analysis(top_k))
    }

    /// Rich-club coefficients for each threshold with at least two rich
    /// entities.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    #[instrument(name = "core.rich_club", err, skip(self))]
    pub fn rich_club(&self, thresholds: &[usize]) -> Result<BTreeMap<usize, f64>> {
        Ok(self.snapshot()?.rich_club(thresholds))
    }

    /// Decision-kind distribution, recurring participant patterns, and
    /// hyperedges holding a degree-one entity.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    #[instrument(name = "core.decision_patterns", err, skip(self))]
    pub fn decision_patterns(&self) -> Result<DecisionPatterns> {
        Ok(self.snapshot()?.decision_patterns())
    }

    /// Isolated hyperedges, resolution candidates, and weak connectivity.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    #[instrument(name = "core.feedback_potential", err, skip(self))]
    pub fn feedback_potential(&self) -> Result<FeedbackReport> {
        self.snapshot()?.feedback_potential()
    }

    /// Headline statistics, or `None` for an empty store.
    ///
    /// # Errors
    /// Returns [`HyperpathError::LockPoisoned`] if the generation lock is
    /// poisoned.
    pub fn statistics(&self) -> Result<Option<HypergraphStatistics>> {
        Ok(self.snapshot()?.statistics())
    }
}

#[cfg(feature = "metrics")]
fn record_insertions(count: usize) {
    metrics::counter!("hyperedge_insertions").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_insertions(_count: usize) {}

#[cfg(feature = "metrics")]
fn record_rejection() {
    metrics::counter!("hyperedge_rejections").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_rejection() {}
