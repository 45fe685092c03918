//! Yen-style K-shortest s-path search.
//!
//! Each accepted path is split at every spur position. The spur search runs a
//! restricted BFS that may not revisit the root prefix and may not repeat a
//! transition already taken by an accepted path sharing that prefix. Spur
//! candidates wait in a min-heap keyed by `(length, positions)`.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, HashSet},
};

use tracing::debug;

use super::{HyperPath, Restrictions, breadth_first};
use crate::{
    error::{HyperpathError, Result},
    hypergraph::Hypergraph,
    params::{PathParams, TraversalParams},
};

type Candidate = Reverse<(usize, Vec<usize>)>;

impl Hypergraph {
    /// Up to `k` loopless s-paths from `start` to `target`, shortest first.
    ///
    /// Paths of equal length are ordered by lexicographic comparison of their
    /// positions. The search stops early when no further candidate exists, so
    /// fewer than `k` paths is an ordinary outcome.
    ///
    /// # Errors
    /// Returns [`HyperpathError::UnknownPosition`] for unknown positions and
    /// [`HyperpathError::InvariantViolation`] if an emitted path fails the
    /// s-path predicate.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph, PathParams};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b", "c"]),
    ///     Hyperedge::from_entities("h1", ["b", "c", "d"]),
    ///     Hyperedge::from_entities("h2", ["c", "d", "e"]),
    ///     Hyperedge::from_entities("h3", ["d", "e", "f"]),
    /// ])?;
    /// let paths = graph.k_shortest_paths(0, 3, PathParams::new(3, 1, None)?)?;
    /// let positions: Vec<&[usize]> = paths.iter().map(|path| path.positions()).collect();
    /// assert_eq!(positions, [&[0, 1, 3][..], &[0, 2, 3], &[0, 1, 2, 3]]);
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    pub fn k_shortest_paths(
        &self,
        start: usize,
        target: usize,
        params: PathParams,
    ) -> Result<Vec<HyperPath>> {
        self.hyperedge(start)?;
        self.hyperedge(target)?;
        let traversal = params.traversal();
        let accepted = self.yen(start, target, params.k(), traversal);
        let paths: Vec<HyperPath> = accepted
            .into_iter()
            .map(|positions| HyperPath::new_unchecked(positions, traversal.s()))
            .collect();
        self.verify_paths(&paths, start, target, traversal)?;
        Ok(paths)
    }

    fn yen(&self, start: usize, target: usize, k: usize, params: TraversalParams) -> Vec<Vec<usize>> {
        let Some(first) =
            breadth_first(self, start, Some(target), params, &Restrictions::default()).found
        else {
            return Vec::new();
        };

        let mut accepted = vec![first];
        let mut queued: HashSet<Vec<usize>> = HashSet::new();
        let mut candidates: BinaryHeap<Candidate> = BinaryHeap::new();
        while accepted.len() < k {
            let Some(previous) = accepted.last() else {
                break;
            };
            let mut spurs = Vec::new();
            for spur_index in 0..previous.len().saturating_sub(1) {
                if let Some(candidate) = self.spur(&accepted, previous, spur_index, target, params) {
                    spurs.push(candidate);
                }
            }
            for candidate in spurs {
                if !accepted.contains(&candidate) && queued.insert(candidate.clone()) {
                    candidates.push(Reverse((candidate.len(), candidate)));
                }
            }
            let Some(next) = pop_unaccepted(&mut candidates, &accepted) else {
                break;
            };
            accepted.push(next);
        }
        accepted.sort_by(|left, right| left.len().cmp(&right.len()).then_with(|| left.cmp(right)));
        accepted
    }

    fn spur(
        &self,
        accepted: &[Vec<usize>],
        previous: &[usize],
        spur_index: usize,
        target: usize,
        params: TraversalParams,
    ) -> Option<Vec<usize>> {
        let root = previous.get(..=spur_index)?;
        let (&spur, prefix) = root.split_last()?;

        let mut restrictions = Restrictions::default();
        for path in accepted {
            if path.get(..=spur_index) == Some(root) {
                if let Some(&next) = path.get(spur_index + 1) {
                    restrictions.exclude_transition(spur, next);
                }
            }
        }
        for &position in prefix {
            restrictions.exclude_position(position);
        }

        let spur_path = breadth_first(
            self,
            spur,
            Some(target),
            params.shortened(spur_index),
            &restrictions,
        )
        .found?;
        let mut candidate = prefix.to_vec();
        candidate.extend(spur_path);
        Some(candidate)
    }

    fn verify_paths(
        &self,
        paths: &[HyperPath],
        start: usize,
        target: usize,
        params: TraversalParams,
    ) -> Result<()> {
        for path in paths {
            let within_depth = params.max_depth().is_none_or(|limit| path.hops() <= limit);
            let anchored = path.start() == Some(start) && path.target() == Some(target);
            if !(within_depth && anchored && path.is_valid_in(self)) {
                return Err(HyperpathError::InvariantViolation {
                    invariant: "k-shortest paths are s-paths",
                    detail: format!(
                        "path {:?} from {start} to {target} at s = {}",
                        path.positions(),
                        params.s()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Up to `k` s-paths from any hyperedge mentioning `from_entity` to any
    /// hyperedge mentioning `to_entity`, shortest first.
    ///
    /// Every candidate `(start, target)` pair is searched independently and
    /// the union is deduplicated before truncation. Unknown entities yield an
    /// empty list.
    ///
    /// # Errors
    /// Returns [`HyperpathError::InvariantViolation`] if an emitted path fails
    /// the s-path predicate.
    pub fn entity_paths(
        &self,
        from_entity: &str,
        to_entity: &str,
        params: PathParams,
    ) -> Result<Vec<HyperPath>> {
        let starts = self.positions_for(from_entity);
        let targets = self.positions_for(to_entity);
        let mut found = BTreeSet::new();
        for &start in starts {
            for &target in targets {
                found.extend(self.k_shortest_paths(start, target, params)?);
            }
        }
        debug!(
            from_entity,
            to_entity,
            starts = starts.len(),
            targets = targets.len(),
            candidates = found.len(),
            "entity path search complete"
        );
        Ok(found.into_iter().take(params.k()).collect())
    }
}

fn pop_unaccepted(candidates: &mut BinaryHeap<Candidate>, accepted: &[Vec<usize>]) -> Option<Vec<usize>> {
    while let Some(Reverse((_, candidate))) = candidates.pop() {
        if !accepted.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}
