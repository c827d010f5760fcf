use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Qualifier;

/// Where a fallback match points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    Template(String),
    Entity { entity_id: String, name: String },
}

/// Outcome of reconciling one actor reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconciledActor {
    LinkedByTemplate {
        template: String,
        qualifier: Option<Qualifier>,
    },
    LinkedByEntity {
        entity_id: String,
        label: String,
        qualifier: Option<Qualifier>,
    },
    /// Single-candidate guess from the artwork entity; unverified
    LinkedViaFallback {
        target: LinkTarget,
        qualifier: Option<Qualifier>,
    },
    Unlinked {
        name: String,
        qualifier: Option<Qualifier>,
    },
    Anonymous,
}

impl ReconciledActor {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ReconciledActor::Anonymous)
    }

    pub fn qualifier(&self) -> Option<Qualifier> {
        match self {
            ReconciledActor::LinkedByTemplate { qualifier, .. }
            | ReconciledActor::LinkedByEntity { qualifier, .. }
            | ReconciledActor::LinkedViaFallback { qualifier, .. }
            | ReconciledActor::Unlinked { qualifier, .. } => *qualifier,
            ReconciledActor::Anonymous => None,
        }
    }

    /// Entity id this actor was linked to, if any
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            ReconciledActor::LinkedByEntity { entity_id, .. } => Some(entity_id),
            ReconciledActor::LinkedViaFallback {
                target: LinkTarget::Entity { entity_id, .. },
                ..
            } => Some(entity_id),
            _ => None,
        }
    }
}

/// Flags marking a record for manual follow-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceIssue {
    UnlinkedArtist,
    UnlinkedDepicted,
    DateFormat,
    NoKnowledgeEntity,
}

/// Per-record issues and queued categories, threaded from reconciliation
/// into rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTracker {
    pub issues: BTreeSet<MaintenanceIssue>,
    pub artist_categories: BTreeSet<String>,
    pub depicted_categories: BTreeSet<String>,
}

impl RecordTracker {
    pub fn flag(&mut self, issue: MaintenanceIssue) {
        self.issues.insert(issue);
    }

    pub fn queue_artist_categories<'a>(&mut self, categories: impl IntoIterator<Item = &'a String>) {
        self.artist_categories.extend(categories.into_iter().cloned());
    }

    pub fn queue_depicted_categories<'a>(
        &mut self,
        categories: impl IntoIterator<Item = &'a String>,
    ) {
        self.depicted_categories.extend(categories.into_iter().cloned());
    }

    pub fn has_issue(&self, issue: MaintenanceIssue) -> bool {
        self.issues.contains(&issue)
    }
}

/// An unresolved local id that had candidates but was not eligible for the
/// fallback match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCase {
    pub obj_id: String,
    pub local_id: String,
    pub name: String,
    pub candidates: Vec<String>,
    pub actor_count: usize,
}

/// Run-wide reconciliation statistics, merged per record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Local id -> number of records referencing it
    pub local_id_frequency: BTreeMap<String, usize>,
    /// Local ids seen without a name
    pub anonymous_ids: BTreeSet<String>,
    /// Local ids absent from the knowledge base -> fallback guesses made
    pub missing_ids: BTreeMap<String, BTreeSet<String>>,
    pub review: Vec<ReviewCase>,
}

impl Diagnostics {
    pub fn count_local_id(&mut self, local_id: &str) {
        *self
            .local_id_frequency
            .entry(local_id.to_string())
            .or_insert(0) += 1;
    }

    pub fn note_missing(&mut self, local_id: &str, guess: Option<&str>) {
        let guesses = self.missing_ids.entry(local_id.to_string()).or_default();
        if let Some(guess) = guess {
            guesses.insert(guess.to_string());
        }
    }

    /// Fold another record's diagnostics into this one
    pub fn merge(&mut self, other: Diagnostics) {
        for (id, count) in other.local_id_frequency {
            *self.local_id_frequency.entry(id).or_insert(0) += count;
        }
        self.anonymous_ids.extend(other.anonymous_ids);
        for (id, guesses) in other.missing_ids {
            self.missing_ids.entry(id).or_default().extend(guesses);
        }
        self.review.extend(other.review);
    }
}
