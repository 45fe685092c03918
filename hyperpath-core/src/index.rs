//! Entity → hyperedge position index.
//!
//! Every adjacency question in the crate is answered through this index. The
//! store is scanned only when an index is rebuilt from scratch.

use std::{collections::HashMap, sync::Arc};

use crate::hyperedge::Hyperedge;

/// Inverted index from entity reference to the positions of the hyperedges
/// that mention it.
///
/// Positions are appended in insertion order, so each posting list is sorted
/// and free of duplicates without any extra bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    postings: HashMap<Arc<str>, Vec<usize>>,
}

impl EntityIndex {
    /// Creates an empty index sized for roughly `entities` distinct entities.
    #[must_use]
    pub fn with_capacity(entities: usize) -> Self {
        Self {
            postings: HashMap::with_capacity(entities),
        }
    }

    /// Rebuilds an index from hyperedges laid out in position order.
    ///
    /// This is the one sanctioned full scan; collaborators that need to drop
    /// hyperedges rebuild a fresh store and index instead of mutating one.
    pub fn rebuild<'a>(hyperedges: impl IntoIterator<Item = &'a Hyperedge>) -> Self {
        let mut index = Self::default();
        for (position, hyperedge) in hyperedges.into_iter().enumerate() {
            index.register(position, hyperedge);
        }
        index
    }

    /// Registers `position` under every entity of `hyperedge`.
    ///
    /// Callers must register positions in ascending order.
    pub(crate) fn register(&mut self, position: usize, hyperedge: &Hyperedge) {
        for entity in hyperedge.entity_handles() {
            let postings = self.postings.entry(Arc::clone(entity)).or_default();
            debug_assert!(postings.last().is_none_or(|&last| last < position));
            postings.push(position);
        }
    }

    /// Returns the sorted positions referencing `entity`.
    ///
    /// Unknown entities yield an empty slice.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{EntityIndex, Hyperedge};
    ///
    /// let edges = [
    ///     Hyperedge::from_entities("h0", ["a", "b"]),
    ///     Hyperedge::from_entities("h1", ["b", "c"]),
    /// ];
    /// let index = EntityIndex::rebuild(&edges);
    /// assert_eq!(index.positions_for("b"), [0, 1]);
    /// assert!(index.positions_for("zzz").is_empty());
    /// ```
    #[must_use]
    pub fn positions_for(&self, entity: &str) -> &[usize] {
        self.postings
            .get(entity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of hyperedges referencing `entity`.
    #[must_use]
    pub fn degree(&self, entity: &str) -> usize {
        self.positions_for(entity).len()
    }

    /// Number of distinct entities indexed.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterates `(entity, positions)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> + '_ {
        self.postings
            .iter()
            .map(|(entity, positions)| (&**entity, positions.as_slice()))
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Arc<str>, &[usize])> + '_ {
        self.postings
            .iter()
            .map(|(entity, positions)| (entity, positions.as_slice()))
    }
}
