//! Where the hypergraph needs more linking context.
//!
//! Flags hyperedges linked to nothing, entities so widely connected that
//! they may conflate several real-world things, and thresholds at which the
//! store falls apart.

use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use crate::{error::Result, hypergraph::Hypergraph};

/// Degree an entity must exceed to be considered for resolution.
pub const RESOLUTION_DEGREE: usize = 5;

/// Distinct co-participants an entity must exceed to be considered for
/// resolution.
pub const RESOLUTION_NEIGHBOURS: usize = 10;

/// Share of the store the largest 2-component must cover.
pub const WEAK_OVERLAP_COVERAGE: f64 = 0.5;

/// An entity that may need disambiguation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionCandidate {
    /// The entity.
    pub entity: Arc<str>,
    /// Number of hyperedges mentioning it.
    pub degree: usize,
    /// Distinct entities sharing a hyperedge with it.
    pub unique_neighbours: usize,
}

/// Output of [`Hypergraph::feedback_potential`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackReport {
    /// Hyperedges sharing no entity with any other.
    pub isolated: Vec<usize>,
    /// Resolution candidates by descending degree, ties by entity.
    pub resolution_candidates: Vec<ResolutionCandidate>,
    /// Component count at `s = 1`, present when above one.
    pub connectivity_gap: Option<usize>,
    /// Fraction of the store in the largest 2-component, present when below
    /// [`WEAK_OVERLAP_COVERAGE`].
    pub weak_overlap: Option<f64>,
}

impl FeedbackReport {
    /// `true` when nothing was flagged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.isolated.is_empty()
            && self.resolution_candidates.is_empty()
            && self.connectivity_gap.is_none()
            && self.weak_overlap.is_none()
    }
}

impl Hypergraph {
    /// Reports isolated hyperedges, resolution candidates, and weak
    /// connectivity at `s = 1` and `s = 2`.
    ///
    /// # Errors
    /// Propagates component errors; none arise for the fixed thresholds used
    /// here.
    pub fn feedback_potential(&self) -> Result<FeedbackReport> {
        let mut resolution_candidates: Vec<ResolutionCandidate> = self
            .index()
            .entries()
            .filter(|(_, positions)| positions.len() > RESOLUTION_DEGREE)
            .filter_map(|(entity, positions)| {
                let unique_neighbours = self.co_participants(entity, positions);
                (unique_neighbours > RESOLUTION_NEIGHBOURS).then(|| ResolutionCandidate {
                    entity: Arc::clone(entity),
                    degree: positions.len(),
                    unique_neighbours,
                })
            })
            .collect();
        resolution_candidates.sort_unstable_by(|left, right| {
            right
                .degree
                .cmp(&left.degree)
                .then_with(|| left.entity.cmp(&right.entity))
        });

        let loose = self.connected_components(1)?;
        let connectivity_gap = (loose.len() > 1).then_some(loose.len());

        let largest_tight = self
            .connected_components(2)?
            .first()
            .map_or(0, BTreeSet::len);
        let coverage = if self.is_empty() {
            1.0
        } else {
            largest_tight as f64 / self.len() as f64
        };
        let weak_overlap = (coverage < WEAK_OVERLAP_COVERAGE).then_some(coverage);

        Ok(FeedbackReport {
            isolated: self.isolated_hyperedges(),
            resolution_candidates,
            connectivity_gap,
            weak_overlap,
        })
    }

    fn co_participants(&self, entity: &Arc<str>, positions: &[usize]) -> usize {
        let mut neighbours: HashSet<&Arc<str>> = HashSet::new();
        for hyperedge in positions.iter().filter_map(|&position| self.get(position)) {
            neighbours.extend(
                hyperedge
                    .entity_handles()
                    .iter()
                    .filter(|&other| other != entity),
            );
        }
        neighbours.len()
    }
}
