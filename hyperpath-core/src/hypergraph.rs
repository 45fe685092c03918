//! The hyperedge store, its entity index, and the s-adjacency resolver.
//!
//! A [`Hypergraph`] is the immutable snapshot every read operation works on.
//! Writers go through [`crate::Hyperpath`], which publishes new generations
//! of this type; nothing in the read path mutates it.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::Arc,
};

use crate::{
    error::{HyperedgeDefect, HyperpathError, Result},
    hyperedge::Hyperedge,
    index::EntityIndex,
    params::Intersection,
};

/// Append-only hyperedge store paired with its entity index.
///
/// Positions are the stable handles handed out by [`Self::add`]: the n-th
/// inserted hyperedge lives at position `n` for the lifetime of the store.
///
/// # Examples
/// ```
/// use hyperpath_core::{Hyperedge, Hypergraph};
///
/// let mut graph = Hypergraph::new();
/// let first = graph.add(Hyperedge::from_entities("h0", ["a", "b", "c"]))?;
/// let second = graph.add(Hyperedge::from_entities("h1", ["b", "c", "d"]))?;
/// assert_eq!((first, second), (0, 1));
/// assert_eq!(graph.positions_for("c"), [0, 1]);
/// assert_eq!(graph.neighbours(0, 2)?.into_iter().collect::<Vec<_>>(), [1]);
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Hypergraph {
    hyperedges: Vec<Hyperedge>,
    ids: HashMap<Arc<str>, usize>,
    index: EntityIndex,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty hypergraph with room for `hyperedges` records.
    #[must_use]
    pub fn with_capacity(hyperedges: usize) -> Self {
        Self {
            hyperedges: Vec::with_capacity(hyperedges),
            ids: HashMap::with_capacity(hyperedges),
            index: EntityIndex::with_capacity(hyperedges),
        }
    }

    /// Builds a hypergraph from `hyperedges`, rejecting the whole batch if any
    /// record is invalid.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidHyperedge`] for the first malformed or
    /// duplicate record.
    pub fn from_hyperedges(hyperedges: impl IntoIterator<Item = Hyperedge>) -> Result<Self> {
        let hyperedges: Vec<Hyperedge> = hyperedges.into_iter().collect();
        let mut graph = Self::with_capacity(hyperedges.len());
        graph.validate_batch(&hyperedges)?;
        for hyperedge in hyperedges {
            graph.append_unchecked(hyperedge);
        }
        Ok(graph)
    }

    /// Appends `hyperedge` and indexes it under each of its entities.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidHyperedge`] when the record connects
    /// fewer than two distinct entities, has an empty id or entity, or reuses
    /// an id already in the store. The store is unchanged on error.
    pub fn add(&mut self, hyperedge: Hyperedge) -> Result<usize> {
        self.check(&hyperedge)?;
        Ok(self.append_unchecked(hyperedge))
    }

    /// Validates a batch against the store and against itself.
    pub(crate) fn validate_batch(&self, batch: &[Hyperedge]) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(batch.len());
        for hyperedge in batch {
            self.check(hyperedge)?;
            if !seen.insert(hyperedge.id()) {
                return Err(HyperpathError::invalid_hyperedge(
                    hyperedge.id(),
                    HyperedgeDefect::DuplicateId,
                ));
            }
        }
        Ok(())
    }

    fn check(&self, hyperedge: &Hyperedge) -> Result<()> {
        hyperedge.validate()?;
        if self.ids.contains_key(hyperedge.id()) {
            return Err(HyperpathError::invalid_hyperedge(
                hyperedge.id(),
                HyperedgeDefect::DuplicateId,
            ));
        }
        Ok(())
    }

    pub(crate) fn append_unchecked(&mut self, hyperedge: Hyperedge) -> usize {
        let position = self.hyperedges.len();
        self.index.register(position, &hyperedge);
        self.ids.insert(Arc::clone(hyperedge.id_handle()), position);
        self.hyperedges.push(hyperedge);
        position
    }

    /// Number of stored hyperedges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.hyperedges.len() }

    /// Returns whether the store holds no hyperedges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.hyperedges.is_empty() }

    /// Returns the hyperedge stored at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Hyperedge> {
        self.hyperedges.get(position)
    }

    /// Returns the position of the hyperedge with identifier `id`.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    /// Iterates hyperedges in position order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Hyperedge> + '_ {
        self.hyperedges.iter()
    }

    /// Read access to the entity index.
    #[must_use]
    #[rustfmt::skip]
    pub fn index(&self) -> &EntityIndex { &self.index }

    /// Sorted positions of the hyperedges referencing `entity`.
    #[must_use]
    pub fn positions_for(&self, entity: &str) -> &[usize] {
        self.index.positions_for(entity)
    }

    pub(crate) fn hyperedge(&self, position: usize) -> Result<&Hyperedge> {
        self.hyperedges
            .get(position)
            .ok_or(HyperpathError::UnknownPosition {
                position,
                len: self.hyperedges.len(),
            })
    }

    /// Hyperedges that are s-adjacent to `position`, in ascending order.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvalidParameter`] when `s < 1` and
    /// [`HyperpathError::UnknownPosition`] when `position` is not stored.
    pub fn neighbours(&self, position: usize, s: usize) -> Result<BTreeSet<usize>> {
        let threshold = Intersection::new(s)?;
        self.hyperedge(position)?;
        Ok(self.adjacent(position, threshold).collect())
    }

    /// Counts shared entities between `position` and every hyperedge it
    /// overlaps with, using the index only.
    ///
    /// Each candidate is counted once per shared entity, so the tally equals
    /// the intersection size and no candidate is compared twice.
    pub(crate) fn overlap_counts(&self, position: usize) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        let Some(hyperedge) = self.hyperedges.get(position) else {
            return counts;
        };
        for entity in hyperedge.entities() {
            for &candidate in self.index.positions_for(entity) {
                if candidate != position {
                    *counts.entry(candidate).or_insert(0_usize) += 1;
                }
            }
        }
        counts
    }

    /// Iterates the s-adjacent positions of a known `position` in ascending
    /// order.
    pub(crate) fn adjacent(
        &self,
        position: usize,
        threshold: Intersection,
    ) -> impl Iterator<Item = usize> + use<> {
        self.overlap_counts(position)
            .into_iter()
            .filter(move |&(_, shared)| shared >= threshold.get())
            .map(|(candidate, _)| candidate)
    }

    /// Number of entities shared by the hyperedges at `left` and `right`.
    ///
    /// # Errors
    /// Returns [`HyperpathError::UnknownPosition`] for positions outside the
    /// store.
    pub fn intersection_size(&self, left: usize, right: usize) -> Result<usize> {
        Ok(self
            .hyperedge(left)?
            .intersection_size(self.hyperedge(right)?))
    }

    /// Entities shared by the hyperedges at `left` and `right`, ascending.
    ///
    /// # Errors
    /// Returns [`HyperpathError::UnknownPosition`] for positions outside the
    /// store.
    pub fn intersection(&self, left: usize, right: usize) -> Result<Vec<&str>> {
        let left = self.hyperedge(left)?;
        let right = self.hyperedge(right)?;
        Ok(left.shared_entities(right).collect())
    }

    /// Returns `true` when the two stored hyperedges share at least `s`
    /// entities. Unknown positions are never adjacent.
    pub(crate) fn is_adjacent(&self, left: usize, right: usize, threshold: Intersection) -> bool {
        match (self.hyperedges.get(left), self.hyperedges.get(right)) {
            (Some(left), Some(right)) => left.intersection_size(right) >= threshold.get(),
            _ => false,
        }
    }
}
