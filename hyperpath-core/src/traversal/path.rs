//! The s-path value returned by traversals.

use std::{cmp::Ordering, collections::HashSet};

use crate::{hyperedge::Hyperedge, hypergraph::Hypergraph, params::Intersection};

/// An ordered sequence of hyperedge positions where every consecutive pair
/// shares at least `s` entities.
///
/// Paths order by length first and then by lexicographic comparison of their
/// positions, which is the tie-break used when several paths are equally
/// short.
///
/// # Examples
/// ```
/// use hyperpath_core::{Hyperedge, Hypergraph, TraversalParams};
///
/// let graph = Hypergraph::from_hyperedges([
///     Hyperedge::from_entities("h0", ["a", "b"]),
///     Hyperedge::from_entities("h1", ["b", "c"]),
/// ])?;
/// let path = graph
///     .shortest_path(0, 1, TraversalParams::unbounded(1)?)?
///     .expect("adjacent hyperedges are connected");
/// assert_eq!(path.hops(), 1);
/// assert_eq!(path.ids(&graph).collect::<Vec<_>>(), ["h0", "h1"]);
/// assert!(path.is_valid_in(&graph));
/// # Ok::<(), hyperpath_core::HyperpathError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HyperPath {
    positions: Vec<usize>,
    s: usize,
}

impl HyperPath {
    pub(crate) fn new_unchecked(positions: Vec<usize>, s: usize) -> Self {
        debug_assert!(!positions.is_empty(), "paths hold at least one hyperedge");
        Self { positions, s }
    }

    /// Positions along the path, start first.
    #[must_use]
    #[rustfmt::skip]
    pub fn positions(&self) -> &[usize] { &self.positions }

    /// Threshold the path was computed under.
    #[must_use]
    #[rustfmt::skip]
    pub fn s(&self) -> usize { self.s }

    /// Number of hyperedges on the path.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.positions.len() }

    /// Always `false`: a path holds at least its start.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    /// Number of s-adjacent steps, one less than [`Self::len`].
    #[must_use]
    pub fn hops(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// First position on the path.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.positions.first().copied()
    }

    /// Last position on the path.
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        self.positions.last().copied()
    }

    /// Consecutive `(from, to)` steps.
    pub fn steps(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions.windows(2).filter_map(|pair| match pair {
            [from, to] => Some((*from, *to)),
            _ => None,
        })
    }

    /// Resolves the path to the stored hyperedges, skipping unknown positions.
    pub fn hyperedges<'g>(&self, graph: &'g Hypergraph) -> impl Iterator<Item = &'g Hyperedge> {
        self.positions.iter().filter_map(|&position| graph.get(position))
    }

    /// Identifiers of the hyperedges along the path.
    pub fn ids<'g>(&self, graph: &'g Hypergraph) -> impl Iterator<Item = &'g str> {
        self.hyperedges(graph).map(Hyperedge::id)
    }

    /// Checks the s-path predicate against `graph`: the path is non-empty,
    /// repeats no position, and every step shares at least `s` entities.
    #[must_use]
    pub fn is_valid_in(&self, graph: &Hypergraph) -> bool {
        let Ok(threshold) = Intersection::new(self.s) else {
            return false;
        };
        let mut seen = HashSet::with_capacity(self.positions.len());
        !self.positions.is_empty()
            && self
                .positions
                .iter()
                .all(|&position| position < graph.len() && seen.insert(position))
            && self
                .steps()
                .all(|(from, to)| graph.is_adjacent(from, to, threshold))
    }
}

impl Ord for HyperPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.positions
            .len()
            .cmp(&other.positions.len())
            .then_with(|| self.positions.cmp(&other.positions))
            .then_with(|| self.s.cmp(&other.s))
    }
}

impl PartialOrd for HyperPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
