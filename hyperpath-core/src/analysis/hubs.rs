//! Hub ranking with ego-network density.
//!
//! Hubs are the highest-degree entities. Each hub is described
//! independently from the shared snapshot, so the per-hub work fans out
//! across the Rayon pool when the `parallel` feature is enabled.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::hypergraph::Hypergraph;

/// Number of strongest co-occurrences that feed the integration score.
pub const TOP_CO_OCCURRENCES: usize = 5;

/// How often an entity appears alongside a hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoOccurrence {
    /// The co-participating entity.
    pub entity: Arc<str>,
    /// Number of the hub's hyperedges that also mention `entity`.
    pub count: usize,
}

/// Structural description of one hub entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Hub {
    /// The hub entity.
    pub entity: Arc<str>,
    /// Number of hyperedges mentioning the hub.
    pub degree: usize,
    /// Co-participants ordered by descending count, ties by entity.
    pub co_occurrence: Vec<CoOccurrence>,
    /// Fraction of co-participant pairs that themselves share a hyperedge.
    pub ego_density: f64,
    /// Mean cardinality of the hub's hyperedges.
    pub mean_hyperedge_size: f64,
    /// Sum of the top co-occurrence counts whose partner is also a hub.
    pub integration_score: usize,
}

impl Hub {
    /// Number of distinct co-participants.
    #[must_use]
    pub fn unique_neighbours(&self) -> usize {
        self.co_occurrence.len()
    }

    /// The strongest co-occurrences, at most `n` of them.
    #[must_use]
    pub fn top_co_occurring(&self, n: usize) -> &[CoOccurrence] {
        let end = n.min(self.co_occurrence.len());
        self.co_occurrence.get(..end).unwrap_or_default()
    }
}

/// Ranked hubs, highest degree first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HubAnalysis {
    /// Hubs ordered by descending degree, ties by entity.
    pub hubs: Vec<Hub>,
}

impl HubAnalysis {
    /// Looks up the description of `entity` if it ranked as a hub.
    #[must_use]
    pub fn hub(&self, entity: &str) -> Option<&Hub> {
        self.hubs.iter().find(|hub| &*hub.entity == entity)
    }
}

impl Hypergraph {
    /// Ranks entities by degree and describes the top `top_k`.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b", "c"]),
    ///     Hyperedge::from_entities("h1", ["b", "c", "d"]),
    ///     Hyperedge::from_entities("h2", ["c", "d", "e"]),
    /// ])?;
    /// let analysis = graph.hub_analysis(1);
    /// let hub = &analysis.hubs[0];
    /// assert_eq!(&*hub.entity, "c");
    /// assert_eq!(hub.degree, 3);
    /// assert_eq!(hub.unique_neighbours(), 4);
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    #[must_use]
    pub fn hub_analysis(&self, top_k: usize) -> HubAnalysis {
        let mut ranked: Vec<(&Arc<str>, &[usize])> = self.index().entries().collect();
        ranked.sort_unstable_by(|(left, left_positions), (right, right_positions)| {
            right_positions
                .len()
                .cmp(&left_positions.len())
                .then_with(|| left.cmp(right))
        });
        ranked.truncate(top_k);
        let hub_ids: HashSet<&str> = ranked.iter().map(|(entity, _)| &***entity).collect();

        #[cfg(feature = "parallel")]
        let hubs = ranked
            .par_iter()
            .map(|&(entity, positions)| self.describe_hub(entity, positions, &hub_ids))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let hubs = ranked
            .iter()
            .map(|&(entity, positions)| self.describe_hub(entity, positions, &hub_ids))
            .collect();

        HubAnalysis { hubs }
    }

    fn describe_hub(&self, entity: &Arc<str>, positions: &[usize], hub_ids: &HashSet<&str>) -> Hub {
        let mut counts: HashMap<&Arc<str>, usize> = HashMap::new();
        let mut size_total = 0_usize;
        for hyperedge in positions.iter().filter_map(|&position| self.get(position)) {
            size_total += hyperedge.cardinality();
            for other in hyperedge.entity_handles() {
                if other != entity {
                    *counts.entry(other).or_insert(0) += 1;
                }
            }
        }

        let neighbours: HashSet<&str> = counts.keys().map(|other| &***other).collect();
        let ego_density = self.ego_density(&neighbours);

        let mut co_occurrence: Vec<CoOccurrence> = counts
            .into_iter()
            .map(|(other, count)| CoOccurrence {
                entity: Arc::clone(other),
                count,
            })
            .collect();
        co_occurrence.sort_unstable_by(|left, right| {
            right
                .count
                .cmp(&left.count)
                .then_with(|| left.entity.cmp(&right.entity))
        });

        let integration_score = co_occurrence
            .iter()
            .take(TOP_CO_OCCURRENCES)
            .filter(|partner| hub_ids.contains(&*partner.entity))
            .map(|partner| partner.count)
            .sum();

        Hub {
            entity: Arc::clone(entity),
            degree: positions.len(),
            co_occurrence,
            ego_density,
            mean_hyperedge_size: size_total as f64 / positions.len().max(1) as f64,
            integration_score,
        }
    }

    /// Fraction of unordered neighbour pairs that co-occur in at least one
    /// hyperedge; zero with fewer than two neighbours.
    fn ego_density(&self, neighbours: &HashSet<&str>) -> f64 {
        let n = neighbours.len();
        if n < 2 {
            return 0.0;
        }
        let mut linked = 0_usize;
        for &neighbour in neighbours {
            let mut partners: HashSet<&str> = HashSet::new();
            for &position in self.positions_for(neighbour) {
                let Some(hyperedge) = self.get(position) else {
                    continue;
                };
                partners.extend(
                    hyperedge
                        .entities()
                        .filter(|&other| other > neighbour && neighbours.contains(other)),
                );
            }
            linked += partners.len();
        }
        let possible = n * (n - 1) / 2;
        linked as f64 / possible as f64
    }
}
