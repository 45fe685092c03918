//! Hyperpath core library.
//!
//! An in-memory hypergraph of n-ary relations with an entity index, the
//! s-adjacency relation it induces, constrained breadth-first search,
//! K-shortest s-paths, s-connected components, and structural metrics.
//! Reads work on immutable [`Hypergraph`] snapshots; [`Hyperpath`] serialises
//! insertions and publishes new generations.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod builder;
mod components;
mod engine;
mod error;
mod hyperedge;
mod hypergraph;
mod index;
mod params;
mod traversal;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    analysis::{
        Anomaly, CoOccurrence, DEFAULT_RICH_CLUB_THRESHOLDS, DecisionPatterns, FeedbackReport,
        Hub, HubAnalysis, HypergraphStatistics, ParticipantPattern, PowerLawFit,
        RESOLUTION_DEGREE, RESOLUTION_NEIGHBOURS, ResolutionCandidate, TOP_CO_OCCURRENCES,
        TOP_PARTICIPANT_PATTERNS, UNSPECIFIED_KIND, WEAK_OVERLAP_COVERAGE,
    },
    builder::HyperpathBuilder,
    components::ComponentSummary,
    engine::Hyperpath,
    error::{HyperedgeDefect, HyperpathError, HyperpathErrorCode, Result},
    hyperedge::{DEFAULT_ROLE, Hyperedge, HyperedgeMetadata, Participant},
    hypergraph::Hypergraph,
    index::EntityIndex,
    params::{DEFAULT_K, Intersection, PathParams, TraversalParams},
    traversal::HyperPath,
};
