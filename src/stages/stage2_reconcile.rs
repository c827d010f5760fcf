use tracing::debug;

use crate::kb::KnowledgeBase;
use crate::models::{
    ActorRef, CatalogRecord, Diagnostics, LinkTarget, MaintenanceIssue, PaintingEntity, Qualifier,
    ReconciledActor, RecordTracker, ReviewCase,
};

/// Marker rendered for creators without a name
pub const UNKNOWN_AUTHOR: &str = "{{unknown|author}}";

/// Configuration for Stage 2 reconciliation
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Placeholder entity standing for "anonymous" in the knowledge base
    pub anonymous_entity: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            anonymous_entity: "Q4233718".to_string(),
        }
    }
}

/// Result of reconciling one record
#[derive(Debug, Clone, Default)]
pub struct ReconciliationOutcome {
    /// Creators in local id order
    pub creators: Vec<ReconciledActor>,
    pub depicted: Vec<ReconciledActor>,
    /// Local ids of creators found in the creators table
    pub matched_creators: Vec<String>,
    pub tracker: RecordTracker,
    pub diagnostics: Diagnostics,
}

/// Which reference list an actor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorKind {
    Creator,
    Depicted,
}

/// Painting-level context shared by every actor of one kind
struct Candidates<'a> {
    kind: ActorKind,
    obj_id: &'a str,
    painting: Option<&'a PaintingEntity>,
    /// Painting-level entity ids (P)
    entities: Vec<String>,
    /// References of this kind in the record (N)
    actor_count: usize,
}

/// Execute Stage 2 for one record
///
/// For every creator and depicted person:
/// 1. Nameless references become anonymous
/// 2. Museum artist ids in the creators table link directly
/// 3. A single painting-level candidate is used as fallback when the record
///    has only one reference of that kind
/// 4. Anything else stays unlinked and is flagged
pub fn reconcile_record(
    record: &CatalogRecord,
    kb: &KnowledgeBase,
    config: &ReconcileConfig,
) -> ReconciliationOutcome {
    let mut outcome = ReconciliationOutcome::default();
    let painting = kb.painting(&record.obj_id);

    if painting.is_none() {
        outcome.tracker.flag(MaintenanceIssue::NoKnowledgeEntity);
    }

    let creator_candidates = Candidates {
        kind: ActorKind::Creator,
        obj_id: &record.obj_id,
        painting,
        entities: painting
            .map(|p| p.named_creators(&config.anonymous_entity))
            .unwrap_or_default(),
        actor_count: record.creators.len(),
    };
    for actor in record.creators.values() {
        let reconciled = reconcile_actor(actor, &creator_candidates, kb, config, &mut outcome);
        outcome.creators.push(reconciled);
    }

    let depicted_candidates = Candidates {
        kind: ActorKind::Depicted,
        obj_id: &record.obj_id,
        painting,
        entities: painting
            .map(|p| p.depicted_persons.clone())
            .unwrap_or_default(),
        actor_count: record.depicted.len(),
    };
    for actor in &record.depicted {
        let reconciled = reconcile_actor(actor, &depicted_candidates, kb, config, &mut outcome);
        outcome.depicted.push(reconciled);
    }

    debug!(
        "Reconciled {}: {} creators, {} depicted, {} issues",
        record.obj_id,
        outcome.creators.len(),
        outcome.depicted.len(),
        outcome.tracker.issues.len()
    );

    outcome
}

fn reconcile_actor(
    actor: &ActorRef,
    candidates: &Candidates<'_>,
    kb: &KnowledgeBase,
    config: &ReconcileConfig,
    outcome: &mut ReconciliationOutcome,
) -> ReconciledActor {
    let local_id = actor.local_id();
    let qualifier = actor.qualifier;
    outcome.diagnostics.count_local_id(local_id);

    let name = match &actor.name {
        Some(name) => name,
        None => {
            outcome.diagnostics.anonymous_ids.insert(local_id.to_string());
            return ReconciledActor::Anonymous;
        }
    };

    let known = actor.id.nsid().and_then(|nsid| kb.creator(nsid));
    if let Some(entity) = known.filter(|e| e.entity_id != config.anonymous_entity) {
        let label = if entity.label.is_empty() {
            name.clone()
        } else {
            entity.label.clone()
        };

        return match candidates.kind {
            ActorKind::Creator => {
                outcome.matched_creators.push(local_id.to_string());
                outcome.tracker.queue_artist_categories(&entity.categories);
                match entity.single_template() {
                    Some(template) => ReconciledActor::LinkedByTemplate {
                        template: template.to_string(),
                        qualifier,
                    },
                    None => ReconciledActor::LinkedByEntity {
                        entity_id: entity.entity_id.clone(),
                        label,
                        qualifier,
                    },
                }
            }
            ActorKind::Depicted => {
                outcome.tracker.queue_depicted_categories(&entity.categories);
                ReconciledActor::LinkedByEntity {
                    entity_id: entity.entity_id.clone(),
                    label,
                    qualifier,
                }
            }
        };
    }

    let single_candidate = match candidates.entities.as_slice() {
        [entity_id] => Some(entity_id.as_str()),
        _ => None,
    };
    if known.is_none() && actor.id.nsid().is_some() {
        outcome.diagnostics.note_missing(local_id, single_candidate);
    }

    if let Some(entity_id) = single_candidate.filter(|_| candidates.actor_count < 2) {
        let target = match candidates.kind {
            ActorKind::Creator => {
                if let Some(painting) = candidates.painting {
                    outcome
                        .tracker
                        .queue_artist_categories(&painting.creator_categories);
                }
                match candidates.painting.and_then(PaintingEntity::single_creator_template) {
                    Some(template) => LinkTarget::Template(template.to_string()),
                    None => LinkTarget::Entity {
                        entity_id: entity_id.to_string(),
                        name: name.clone(),
                    },
                }
            }
            ActorKind::Depicted => {
                if let Some(painting) = candidates.painting {
                    outcome
                        .tracker
                        .queue_depicted_categories(&painting.depicted_categories);
                }
                LinkTarget::Entity {
                    entity_id: entity_id.to_string(),
                    name: name.clone(),
                }
            }
        };
        return ReconciledActor::LinkedViaFallback { target, qualifier };
    }

    outcome.tracker.flag(match candidates.kind {
        ActorKind::Creator => MaintenanceIssue::UnlinkedArtist,
        ActorKind::Depicted => MaintenanceIssue::UnlinkedDepicted,
    });
    if !candidates.entities.is_empty() {
        outcome.diagnostics.review.push(ReviewCase {
            obj_id: candidates.obj_id.to_string(),
            local_id: local_id.to_string(),
            name: name.clone(),
            candidates: candidates.entities.clone(),
            actor_count: candidates.actor_count,
        });
    }

    ReconciledActor::Unlinked {
        name: name.clone(),
        qualifier,
    }
}

/// Render one creator for the artist field
pub fn format_artist(actor: &ReconciledActor) -> String {
    let creator_template = |template: &str, qualifier: Option<Qualifier>| {
        match qualifier {
            Some(q) => format!("{{{{Creator:{}|{}}}}}", template, q.creator_param()),
            None => format!("{{{{Creator:{}}}}}", template),
        }
    };
    let entity_link = |entity_id: &str, name: &str, qualifier: Option<Qualifier>| {
        let link = format!("[[:d:{}|{}]]", entity_id, name);
        match qualifier {
            Some(q) => q.wrap_name(&link),
            None => link,
        }
    };

    match actor {
        ReconciledActor::LinkedByTemplate {
            template,
            qualifier,
        } => creator_template(template, *qualifier),
        ReconciledActor::LinkedByEntity {
            entity_id,
            label,
            qualifier,
        } => entity_link(entity_id, label, *qualifier),
        ReconciledActor::LinkedViaFallback { target, qualifier } => match target {
            LinkTarget::Template(template) => creator_template(template, *qualifier),
            LinkTarget::Entity { entity_id, name } => entity_link(entity_id, name, *qualifier),
        },
        ReconciledActor::Unlinked { name, qualifier } => match qualifier {
            Some(q) => q.wrap_name(name),
            None => name.clone(),
        },
        ReconciledActor::Anonymous => UNKNOWN_AUTHOR.to_string(),
    }
}

/// Combine all reconciled creators into the artist field
pub fn aggregate_creators(creators: &[ReconciledActor]) -> String {
    match creators {
        [] => String::new(),
        [single] => format_artist(single),
        _ => {
            let named: Vec<&ReconciledActor> =
                creators.iter().filter(|c| !c.is_anonymous()).collect();
            match named.as_slice() {
                [] => UNKNOWN_AUTHOR.to_string(),
                [only] if only.qualifier().is_some() => format_artist(only),
                _ => named
                    .iter()
                    .map(|c| format_artist(c))
                    .collect::<Vec<_>>()
                    .join("\n "),
            }
        }
    }
}
