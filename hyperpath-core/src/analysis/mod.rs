//! Structural metrics computed over the entity index.
//!
//! Everything here reads a snapshot and returns plain values. Questions with
//! no meaningful answer on the current data (an empty store, too few degree
//! classes for a fit, no entity above a rich-club threshold) produce `None`
//! or omit the entry rather than failing.

mod feedback;
mod hubs;
mod patterns;
mod power_law;
mod rich_club;

use std::collections::BTreeMap;

pub use self::{
    feedback::{
        FeedbackReport, RESOLUTION_DEGREE, RESOLUTION_NEIGHBOURS, ResolutionCandidate,
        WEAK_OVERLAP_COVERAGE,
    },
    hubs::{CoOccurrence, Hub, HubAnalysis, TOP_CO_OCCURRENCES},
    patterns::{
        Anomaly, DecisionPatterns, ParticipantPattern, TOP_PARTICIPANT_PATTERNS, UNSPECIFIED_KIND,
    },
    power_law::PowerLawFit,
    rich_club::DEFAULT_RICH_CLUB_THRESHOLDS,
};
use crate::{hyperedge::Hyperedge, hypergraph::Hypergraph};

/// Headline statistics of a non-empty hypergraph.
#[derive(Clone, Debug, PartialEq)]
pub struct HypergraphStatistics {
    /// Number of distinct entities.
    pub entity_count: usize,
    /// Number of stored hyperedges.
    pub hyperedge_count: usize,
    /// Mean number of distinct entities per hyperedge.
    pub mean_hyperedge_size: f64,
    /// Smallest hyperedge cardinality.
    pub min_hyperedge_size: usize,
    /// Largest hyperedge cardinality.
    pub max_hyperedge_size: usize,
    /// Mean number of hyperedges per entity.
    pub mean_entity_degree: f64,
    /// Largest entity degree.
    pub max_entity_degree: usize,
    /// Unordered hyperedge pairs sharing at least one entity.
    pub pairs_sharing_one: usize,
    /// Unordered hyperedge pairs sharing at least two entities.
    pub pairs_sharing_two: usize,
    /// Unordered hyperedge pairs sharing at least three entities.
    pub pairs_sharing_three: usize,
}

impl Hypergraph {
    /// Number of hyperedges mentioning `entity`; unknown entities have
    /// degree zero.
    #[must_use]
    pub fn degree(&self, entity: &str) -> usize {
        self.index().degree(entity)
    }

    /// Maps each observed degree to the number of entities with that degree.
    #[must_use]
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for (_, positions) in self.index().iter() {
            *distribution.entry(positions.len()).or_insert(0) += 1;
        }
        distribution
    }

    /// Mean hyperedge cardinality, or `None` for an empty store.
    #[must_use]
    pub fn average_hyperedge_size(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: usize = self.iter().map(Hyperedge::cardinality).sum();
        Some(total as f64 / self.len() as f64)
    }

    /// Summary statistics, or `None` for an empty store.
    ///
    /// Overlapping pairs are tallied through the index, so the cost follows
    /// the entity degrees rather than the square of the store size.
    #[must_use]
    pub fn statistics(&self) -> Option<HypergraphStatistics> {
        let mean_hyperedge_size = self.average_hyperedge_size()?;
        let min_hyperedge_size = self.iter().map(Hyperedge::cardinality).min()?;
        let max_hyperedge_size = self.iter().map(Hyperedge::cardinality).max()?;

        let index = self.index();
        let degrees: Vec<usize> = index.iter().map(|(_, positions)| positions.len()).collect();
        let degree_total: usize = degrees.iter().sum();

        let mut shared = [0_usize; 3];
        for position in 0..self.len() {
            for (candidate, overlap) in self.overlap_counts(position) {
                if candidate <= position {
                    continue;
                }
                for (threshold, tally) in shared.iter_mut().enumerate() {
                    if overlap > threshold {
                        *tally += 1;
                    }
                }
            }
        }
        let [pairs_sharing_one, pairs_sharing_two, pairs_sharing_three] = shared;

        Some(HypergraphStatistics {
            entity_count: index.entity_count(),
            hyperedge_count: self.len(),
            mean_hyperedge_size,
            min_hyperedge_size,
            max_hyperedge_size,
            mean_entity_degree: degree_total as f64 / degrees.len().max(1) as f64,
            max_entity_degree: degrees.iter().copied().max().unwrap_or(0),
            pairs_sharing_one,
            pairs_sharing_two,
            pairs_sharing_three,
        })
    }
}
