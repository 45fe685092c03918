//! Wire shape of one JSON Lines record.

use hyperpath_core::{Hyperedge, HyperedgeMetadata, Participant};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct HyperedgeRecord {
    #[serde(alias = "hyperedge_id")]
    id: String,
    participants: Vec<ParticipantRecord>,
    #[serde(default)]
    metadata: MetadataRecord,
}

/// A bare entity reference or an `{entity, role}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParticipantRecord {
    Bare(String),
    Labelled {
        #[serde(alias = "entity_id")]
        entity: String,
        #[serde(default)]
        role: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataRecord {
    #[serde(alias = "decision_type")]
    kind: Option<String>,
    relation: Option<String>,
    timestamp: Option<String>,
    confidence: Option<f64>,
    rationale: Option<String>,
    provenance: Vec<String>,
    context: Vec<String>,
}

impl From<ParticipantRecord> for Participant {
    fn from(record: ParticipantRecord) -> Self {
        match record {
            ParticipantRecord::Bare(entity)
            | ParticipantRecord::Labelled { entity, role: None } => Self::unlabelled(entity),
            ParticipantRecord::Labelled {
                entity,
                role: Some(role),
            } => Self::new(entity, role),
        }
    }
}

impl From<MetadataRecord> for HyperedgeMetadata {
    fn from(record: MetadataRecord) -> Self {
        Self {
            kind: record.kind,
            relation: record.relation,
            timestamp: record.timestamp,
            confidence: record.confidence,
            rationale: record.rationale,
            provenance: record.provenance,
            context: record.context,
        }
    }
}

impl From<HyperedgeRecord> for Hyperedge {
    fn from(record: HyperedgeRecord) -> Self {
        let participants = record.participants.into_iter().map(Participant::from).collect();
        Self::new(record.id, participants).with_metadata(record.metadata.into())
    }
}
