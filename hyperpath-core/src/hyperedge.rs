//! Hyperedge records: the only shape of data the engine accepts.
//!
//! A [`Hyperedge`] pairs a unique identifier with a list of `(entity, role)`
//! participants and optional metadata. Roles and metadata travel with the
//! record for downstream explanation; adjacency only ever looks at
//! [`Hyperedge::entities`].

use std::{collections::HashSet, sync::Arc};

use crate::error::{HyperedgeDefect, HyperpathError, Result};

/// Role label assigned to participants that were supplied without one.
pub const DEFAULT_ROLE: &str = "participant";

/// One entity taking part in a hyperedge under a role label.
///
/// # Examples
/// ```
/// use hyperpath_core::Participant;
///
/// let participant = Participant::new("cust_acme", "customer");
/// assert_eq!(participant.entity(), "cust_acme");
/// assert_eq!(participant.role(), "customer");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Participant {
    entity: Arc<str>,
    role: Arc<str>,
}

impl Participant {
    /// Creates a participant from an entity reference and a role label.
    #[must_use]
    pub fn new(entity: impl Into<Arc<str>>, role: impl Into<Arc<str>>) -> Self {
        Self {
            entity: entity.into(),
            role: role.into(),
        }
    }

    /// Creates a participant carrying [`DEFAULT_ROLE`].
    #[must_use]
    pub fn unlabelled(entity: impl Into<Arc<str>>) -> Self {
        Self::new(entity, DEFAULT_ROLE)
    }

    /// Returns the opaque entity reference.
    #[must_use]
    #[rustfmt::skip]
    pub fn entity(&self) -> &str { &self.entity }

    /// Returns the role label.
    #[must_use]
    #[rustfmt::skip]
    pub fn role(&self) -> &str { &self.role }

    pub(crate) fn entity_handle(&self) -> &Arc<str> {
        &self.entity
    }
}

/// Optional descriptive data attached to a hyperedge.
///
/// None of these fields influence traversal; they are returned untouched so
/// presentation layers can explain a path step by step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HyperedgeMetadata {
    /// Kind of decision or event the hyperedge records (e.g. `approval`).
    pub kind: Option<String>,
    /// Relation verb describing the hyperedge (e.g. `approved`).
    pub relation: Option<String>,
    /// Opaque timestamp, typically ISO-8601.
    pub timestamp: Option<String>,
    /// Extraction confidence in `[0, 1]`.
    pub confidence: Option<f64>,
    /// Free-text rationale captured with the record.
    pub rationale: Option<String>,
    /// Systems the record was assembled from.
    pub provenance: Vec<String>,
    /// Policies, procedures, or metric definitions the record references.
    pub context: Vec<String>,
}

impl HyperedgeMetadata {
    /// Returns `true` when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.relation.is_none()
            && self.timestamp.is_none()
            && self.confidence.is_none()
            && self.rationale.is_none()
            && self.provenance.is_empty()
            && self.context.is_empty()
    }
}

/// An n-ary relation between two or more entities.
///
/// Duplicate `(entity, role)` pairs collapse to one participant. The derived
/// entity set is sorted and deduplicated, so an entity appearing under two
/// roles counts once towards intersections.
///
/// # Examples
/// ```
/// use hyperpath_core::{Hyperedge, Participant};
///
/// let edge = Hyperedge::new(
///     "approval-17",
///     vec![
///         Participant::new("vp_sales", "approver"),
///         Participant::new("deal_001", "subject"),
///         Participant::new("vp_sales", "notified"),
///     ],
/// );
/// assert_eq!(edge.participants().len(), 3);
/// assert_eq!(edge.entities().collect::<Vec<_>>(), ["deal_001", "vp_sales"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Hyperedge {
    id: Arc<str>,
    participants: Vec<Participant>,
    entities: Vec<Arc<str>>,
    metadata: HyperedgeMetadata,
}

impl Hyperedge {
    /// Creates a hyperedge without metadata.
    ///
    /// Construction never fails; validity is checked when the hyperedge is
    /// inserted into a store.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>, participants: Vec<Participant>) -> Self {
        let mut seen: HashSet<Participant> = HashSet::with_capacity(participants.len());
        let unique: Vec<Participant> = participants
            .into_iter()
            .filter(|participant| seen.insert(participant.clone()))
            .collect();
        let mut entities: Vec<Arc<str>> = unique
            .iter()
            .map(|participant| Arc::clone(participant.entity_handle()))
            .collect();
        entities.sort_unstable();
        entities.dedup();
        Self {
            id: id.into(),
            participants: unique,
            entities,
            metadata: HyperedgeMetadata::default(),
        }
    }

    /// Creates a hyperedge whose participants all carry [`DEFAULT_ROLE`].
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::Hyperedge;
    ///
    /// let edge = Hyperedge::from_entities("h0", ["a", "b", "c"]);
    /// assert_eq!(edge.cardinality(), 3);
    /// ```
    #[must_use]
    pub fn from_entities<I, S>(id: impl Into<Arc<str>>, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::new(
            id,
            entities.into_iter().map(Participant::unlabelled).collect(),
        )
    }

    /// Attaches metadata, replacing any previously attached value.
    #[must_use]
    pub fn with_metadata(mut self, metadata: HyperedgeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the hyperedge identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> &str { &self.id }

    /// Returns the deduplicated participants in their original order.
    #[must_use]
    #[rustfmt::skip]
    pub fn participants(&self) -> &[Participant] { &self.participants }

    /// Returns the attached metadata.
    #[must_use]
    #[rustfmt::skip]
    pub fn metadata(&self) -> &HyperedgeMetadata { &self.metadata }

    /// Iterates the distinct entity references in ascending order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entities.iter().map(|entity| &**entity)
    }

    /// Number of distinct entities connected by the hyperedge.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` when `entity` participates in the hyperedge.
    #[must_use]
    pub fn contains(&self, entity: &str) -> bool {
        self.entities
            .binary_search_by(|candidate| candidate.as_ref().cmp(entity))
            .is_ok()
    }

    /// Number of entities shared with `other`.
    ///
    /// # Examples
    /// ```
    /// use hyperpath_core::Hyperedge;
    ///
    /// let left = Hyperedge::from_entities("h0", ["a", "b", "c"]);
    /// let right = Hyperedge::from_entities("h1", ["b", "c", "d"]);
    /// assert_eq!(left.intersection_size(&right), 2);
    /// ```
    #[must_use]
    pub fn intersection_size(&self, other: &Self) -> usize {
        self.shared_entities(other).count()
    }

    /// Iterates the entities shared with `other` in ascending order.
    pub fn shared_entities<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a str> + 'a {
        SortedIntersection {
            left: &self.entities,
            right: &other.entities,
        }
    }

    pub(crate) fn entity_handles(&self) -> &[Arc<str>] {
        &self.entities
    }

    pub(crate) fn id_handle(&self) -> &Arc<str> {
        &self.id
    }

    /// Checks the structural rules enforced at the insertion boundary.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(HyperpathError::invalid_hyperedge(
                &self.id,
                HyperedgeDefect::EmptyId,
            ));
        }
        if self.entities.iter().any(|entity| entity.is_empty()) {
            return Err(HyperpathError::invalid_hyperedge(
                &self.id,
                HyperedgeDefect::EmptyEntity,
            ));
        }
        if self.entities.len() < 2 {
            return Err(HyperpathError::invalid_hyperedge(
                &self.id,
                HyperedgeDefect::TooFewEntities {
                    found: self.entities.len(),
                },
            ));
        }
        Ok(())
    }
}

/// Merge-walk over two sorted entity lists.
struct SortedIntersection<'a> {
    left: &'a [Arc<str>],
    right: &'a [Arc<str>],
}

impl<'a> Iterator for SortedIntersection<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (left, left_rest) = self.left.split_first()?;
            let (right, right_rest) = self.right.split_first()?;
            match left.cmp(right) {
                std::cmp::Ordering::Less => self.left = left_rest,
                std::cmp::Ordering::Greater => self.right = right_rest,
                std::cmp::Ordering::Equal => {
                    self.left = left_rest;
                    self.right = right_rest;
                    return Some(left.as_ref());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn duplicate_participants_collapse() {
        let edge = Hyperedge::new(
            "h",
            vec![
                Participant::new("a", "r"),
                Participant::new("a", "r"),
                Participant::new("b", "r"),
            ],
        );
        assert_eq!(edge.participants().len(), 2);
        assert_eq!(edge.cardinality(), 2);
    }

    #[test]
    fn wide_hyperedges_keep_first_seen_participant_order() {
        let participants: Vec<Participant> = (0..2_000)
            .chain(0..2_000)
            .map(|index| Participant::new(format!("e{}", 1_999 - index), "member"))
            .collect();
        let edge = Hyperedge::new("wide", participants);
        assert_eq!(edge.participants().len(), 2_000);
        assert_eq!(edge.participants()[0].entity(), "e1999");
        assert_eq!(edge.participants()[1_999].entity(), "e0");
        assert_eq!(edge.cardinality(), 2_000);
    }

    #[test]
    fn entities_strip_roles() {
        let edge = Hyperedge::new(
            "h",
            vec![
                Participant::new("b", "approver"),
                Participant::new("a", "subject"),
                Participant::new("b", "notified"),
            ],
        );
        let entities: Vec<&str> = edge.entities().collect();
        assert_eq!(entities, ["a", "b"]);
        assert!(edge.contains("a"));
        assert!(!edge.contains("c"));
    }

    #[rstest]
    #[case::disjoint(&["a", "b"], &["c", "d"], &[])]
    #[case::partial(&["a", "b", "c"], &["b", "c", "d"], &["b", "c"])]
    #[case::identical(&["a", "b"], &["a", "b"], &["a", "b"])]
    #[case::uneven(&["a", "m", "z"], &["b", "m", "n", "o", "z"], &["m", "z"])]
    fn shared_entities_walks_both_lists(
        #[case] left: &[&str],
        #[case] right: &[&str],
        #[case] expected: &[&str],
    ) {
        let left = Hyperedge::from_entities("l", left.iter().copied());
        let right = Hyperedge::from_entities("r", right.iter().copied());
        let shared: Vec<&str> = left.shared_entities(&right).collect();
        assert_eq!(shared, expected);
        assert_eq!(left.intersection_size(&right), expected.len());
    }

    #[rstest]
    #[case::empty_id(Hyperedge::from_entities("", ["a", "b"]), HyperedgeDefect::EmptyId)]
    #[case::empty_entity(Hyperedge::from_entities("h", ["a", ""]), HyperedgeDefect::EmptyEntity)]
    #[case::single_entity(
        Hyperedge::new("h", vec![Participant::new("a", "x"), Participant::new("a", "y")]),
        HyperedgeDefect::TooFewEntities { found: 1 },
    )]
    #[case::no_entities(Hyperedge::new("h", Vec::new()), HyperedgeDefect::TooFewEntities { found: 0 })]
    fn validate_rejects_malformed_hyperedges(
        #[case] edge: Hyperedge,
        #[case] expected: HyperedgeDefect,
    ) {
        let err = edge.validate().expect_err("hyperedge must be rejected");
        assert_eq!(err.defect(), Some(&expected));
    }

    #[test]
    fn metadata_defaults_to_empty() {
        let edge = Hyperedge::from_entities("h", ["a", "b"]);
        assert!(edge.metadata().is_empty());
        let annotated = edge.with_metadata(HyperedgeMetadata {
            relation: Some("approved".into()),
            ..HyperedgeMetadata::default()
        });
        assert!(!annotated.metadata().is_empty());
    }
}
