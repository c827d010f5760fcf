use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::error::{PipelineError, PipelineResult};
use crate::kb::KnowledgeBase;
use crate::models::{CatalogRecord, RunLog};

/// Configuration for Stage 1 record selection
#[derive(Debug, Clone, Default)]
pub struct SelectConfig {
    /// Skip records whose artwork has no knowledge base entry
    pub require_knowledge_entity: bool,
}

/// A record paired with the single on-disk image it will be rendered for
#[derive(Debug, Clone)]
pub struct SelectedRecord {
    pub record: CatalogRecord,
    pub image: String,
}

/// Result of Stage 1 selection
#[derive(Debug, Default)]
pub struct SelectionResult {
    pub selected: Vec<SelectedRecord>,
    pub log: RunLog,
}

/// Find the one image on disk belonging to a record
pub fn match_image(record: &CatalogRecord, on_disk: &HashSet<&str>) -> PipelineResult<String> {
    if record.images.is_empty() {
        return Err(PipelineError::NoImage {
            obj_id: record.obj_id.clone(),
        });
    }

    let matches: Vec<&String> = record
        .images
        .keys()
        .filter(|image| on_disk.contains(image.as_str()))
        .collect();

    match matches.as_slice() {
        [] => Err(PipelineError::NoMatchingImage {
            obj_id: record.obj_id.clone(),
        }),
        [image] => Ok((*image).clone()),
        _ => Err(PipelineError::MultipleMatchingImages {
            obj_id: record.obj_id.clone(),
            images: matches.into_iter().cloned().collect(),
        }),
    }
}

/// Perform Stage 1: keep every record matching exactly one image on disk
pub fn execute_stage1(
    records: BTreeMap<String, CatalogRecord>,
    image_files: &[String],
    kb: &KnowledgeBase,
    config: &SelectConfig,
) -> SelectionResult {
    let on_disk: HashSet<&str> = image_files.iter().map(String::as_str).collect();
    let record_count = records.len();
    let mut result = SelectionResult::default();

    for record in records.into_values() {
        let image = match match_image(&record, &on_disk) {
            Ok(image) => image,
            Err(e) => {
                result.log.record(&e);
                continue;
            }
        };

        if config.require_knowledge_entity && kb.painting(&record.obj_id).is_none() {
            result.log.record(&PipelineError::MissingKnowledgeEntity {
                obj_id: record.obj_id.clone(),
            });
            continue;
        }

        result.selected.push(SelectedRecord { record, image });
    }

    info!(
        "Identified {} valid paintings out of {} records and {} files",
        result.selected.len(),
        record_count,
        image_files.len()
    );

    result
}
