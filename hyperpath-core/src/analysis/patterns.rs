//! Recurring decision shapes and one-off participants.

use std::{collections::BTreeMap, sync::Arc};

use crate::hypergraph::Hypergraph;

/// Number of participant patterns reported by [`Hypergraph::decision_patterns`].
pub const TOP_PARTICIPANT_PATTERNS: usize = 5;

/// Distribution key for hyperedges without a `kind`.
pub const UNSPECIFIED_KIND: &str = "unspecified";

/// Participants examined per hyperedge when forming a pattern.
const PATTERN_WIDTH: usize = 3;

/// A set of leading participants that recurs across hyperedges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantPattern {
    /// Sorted, distinct entities of the first three participants.
    pub entities: Vec<Arc<str>>,
    /// Number of hyperedges opening with these participants.
    pub count: usize,
}

/// A hyperedge mentioning an entity seen nowhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anomaly {
    /// Position of the hyperedge.
    pub position: usize,
    /// First participant, in participant order, with degree one.
    pub entity: Arc<str>,
}

/// Output of [`Hypergraph::decision_patterns`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionPatterns {
    /// Hyperedge count per metadata kind.
    pub kind_distribution: BTreeMap<String, usize>,
    /// Most common participant patterns, by descending count then entities.
    pub participant_patterns: Vec<ParticipantPattern>,
    /// Hyperedges holding a degree-one entity, in position order.
    pub anomalies: Vec<Anomaly>,
}

impl Hypergraph {
    /// Tallies decision kinds and recurring participant patterns, and flags
    /// hyperedges that mention an entity appearing nowhere else.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::{Hyperedge, Hypergraph};
    ///
    /// let graph = Hypergraph::from_hyperedges([
    ///     Hyperedge::from_entities("h0", ["a", "b"]),
    ///     Hyperedge::from_entities("h1", ["a", "b"]),
    ///     Hyperedge::from_entities("h2", ["b", "c"]),
    /// ])?;
    /// let patterns = graph.decision_patterns();
    /// assert_eq!(patterns.participant_patterns[0].count, 2);
    /// assert_eq!(patterns.anomalies.len(), 1);
    /// assert_eq!(&*patterns.anomalies[0].entity, "c");
    /// # Ok::<(), hyperpath_core::HyperpathError>(())
    /// ```
    #[must_use]
    pub fn decision_patterns(&self) -> DecisionPatterns {
        let mut kind_distribution = BTreeMap::new();
        let mut pattern_counts: BTreeMap<Vec<Arc<str>>, usize> = BTreeMap::new();
        let mut anomalies = Vec::new();

        for (position, hyperedge) in self.iter().enumerate() {
            let kind = hyperedge
                .metadata()
                .kind
                .clone()
                .unwrap_or_else(|| UNSPECIFIED_KIND.to_owned());
            *kind_distribution.entry(kind).or_insert(0) += 1;

            let mut pattern: Vec<Arc<str>> = hyperedge
                .participants()
                .iter()
                .take(PATTERN_WIDTH)
                .map(|participant| Arc::clone(participant.entity_handle()))
                .collect();
            pattern.sort_unstable();
            pattern.dedup();
            *pattern_counts.entry(pattern).or_insert(0) += 1;

            if let Some(lonely) = hyperedge
                .participants()
                .iter()
                .find(|participant| self.degree(participant.entity()) == 1)
            {
                anomalies.push(Anomaly {
                    position,
                    entity: Arc::clone(lonely.entity_handle()),
                });
            }
        }

        let mut participant_patterns: Vec<ParticipantPattern> = pattern_counts
            .into_iter()
            .map(|(entities, count)| ParticipantPattern { entities, count })
            .collect();
        // Stable sort keeps the lexicographic order among equal counts.
        participant_patterns.sort_by(|left, right| right.count.cmp(&left.count));
        participant_patterns.truncate(TOP_PARTICIPANT_PATTERNS);

        DecisionPatterns {
            kind_distribution,
            participant_patterns,
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hyperedge::{Hyperedge, HyperedgeMetadata, Participant},
        test_utils::{chain_graph, with_isolated},
    };

    fn kinded(id: &str, entities: &[&str], kind: &str) -> Hyperedge {
        Hyperedge::from_entities(id, entities.iter().copied()).with_metadata(HyperedgeMetadata {
            kind: Some(kind.to_owned()),
            ..HyperedgeMetadata::default()
        })
    }

    #[test]
    fn chain_anomalies_name_first_lonely_participant() {
        let patterns = with_isolated(chain_graph()).decision_patterns();
        let anomalies: Vec<(usize, &str)> = patterns
            .anomalies
            .iter()
            .map(|anomaly| (anomaly.position, &*anomaly.entity))
            .collect();
        assert_eq!(anomalies, [(0, "a"), (3, "f"), (4, "x")]);
        assert_eq!(
            patterns.kind_distribution,
            BTreeMap::from([(UNSPECIFIED_KIND.to_owned(), 5)])
        );
    }

    #[test]
    fn distinct_patterns_are_listed_lexicographically() {
        let patterns = with_isolated(chain_graph()).decision_patterns();
        let listed: Vec<Vec<&str>> = patterns
            .participant_patterns
            .iter()
            .map(|pattern| pattern.entities.iter().map(|entity| &**entity).collect())
            .collect();
        assert_eq!(
            listed,
            [
                vec!["a", "b", "c"],
                vec!["b", "c", "d"],
                vec!["c", "d", "e"],
                vec!["d", "e", "f"],
                vec!["x", "y", "z"],
            ]
        );
        assert!(patterns.participant_patterns.iter().all(|pattern| pattern.count == 1));
    }

    #[test]
    fn kinds_and_recurring_patterns_are_counted() {
        let graph = Hypergraph::from_hyperedges([
            kinded("h0", &["ae", "deal", "vp"], "approval"),
            kinded("h1", &["ae", "deal", "vp"], "approval"),
            kinded("h2", &["ae", "deal", "vp", "legal"], "escalation"),
            kinded("h3", &["ae", "legal"], "approval"),
        ])
        .expect("fixture is valid");
        let patterns = graph.decision_patterns();

        assert_eq!(
            patterns.kind_distribution,
            BTreeMap::from([("approval".to_owned(), 3), ("escalation".to_owned(), 1)])
        );
        let top = patterns.participant_patterns.first().expect("a pattern");
        assert_eq!(top.count, 3);
        assert_eq!(
            top.entities.iter().map(|entity| &**entity).collect::<Vec<_>>(),
            ["ae", "deal", "vp"]
        );
        assert_eq!(patterns.participant_patterns.len(), 2);
        assert!(patterns.anomalies.is_empty());
    }

    #[test]
    fn patterns_use_leading_participants_only() {
        let graph = Hypergraph::from_hyperedges([
            Hyperedge::new(
                "h0",
                vec![
                    Participant::new("vp", "approver"),
                    Participant::new("vp", "notified"),
                    Participant::new("deal", "subject"),
                    Participant::new("cfo", "observer"),
                ],
            ),
            Hyperedge::from_entities("h1", ["cfo", "deal", "vp"]),
        ])
        .expect("fixture is valid");
        let patterns = graph.decision_patterns();
        let first: Vec<Vec<&str>> = patterns
            .participant_patterns
            .iter()
            .map(|pattern| pattern.entities.iter().map(|entity| &**entity).collect())
            .collect();
        assert_eq!(first, [vec!["cfo", "deal", "vp"], vec!["deal", "vp"]]);
    }

    #[test]
    fn empty_store_has_no_patterns() {
        let graph = Hypergraph::default();
        assert_eq!(graph.decision_patterns(), DecisionPatterns::default());
    }
}
