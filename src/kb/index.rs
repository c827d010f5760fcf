use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::{info, warn};

use super::client::SparqlClient;
use super::queries::{CREATORS_QUERY, PAINTINGS_QUERY};
use crate::error::{PipelineError, PipelineResult};
use crate::models::{CreatorEntity, PaintingEntity};

/// Prefix stripped from entity URIs
pub const ENTITY_URI_PREFIX: &str = "http://www.wikidata.org/entity/";

/// `application/sparql-results+json` document
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResults {
    pub head: SparqlHead,
    pub results: SparqlBindings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlHead {
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlBindings {
    pub bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Column name -> cleaned values
pub type CleanRow = HashMap<String, Vec<String>>;

/// Key the result rows by one column, splitting `|`-joined values and
/// stripping entity URI prefixes
pub fn clean_sparql_output(
    results: &SparqlResults,
    key: &str,
) -> PipelineResult<BTreeMap<String, CleanRow>> {
    if !results.head.vars.iter().any(|v| v == key) {
        return Err(PipelineError::KnowledgeBaseUnavailable(format!(
            "The expected key '{}' was not present in the sparql output keys: {}",
            key,
            results.head.vars.join(", ")
        )));
    }

    let mut cleaned = BTreeMap::new();
    for binding in &results.results.bindings {
        let Some(row_key) = binding.get(key).map(|v| v.value.trim().to_string()) else {
            warn!("Dropping sparql row without {}", key);
            continue;
        };

        let row: CleanRow = binding
            .iter()
            .map(|(column, value)| {
                let values = value
                    .value
                    .split('|')
                    .map(|v| v.replace(ENTITY_URI_PREFIX, "").trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                (column.clone(), values)
            })
            .collect();

        cleaned.insert(row_key, row);
    }

    Ok(cleaned)
}

fn column(row: &CleanRow, name: &str) -> Vec<String> {
    row.get(name).cloned().unwrap_or_default()
}

fn first(row: &CleanRow, name: &str) -> String {
    row.get(name)
        .and_then(|values| values.first())
        .cloned()
        .unwrap_or_default()
}

/// Read-only lookup tables loaded once per run
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// Artwork entities keyed by local object id
    pub paintings: BTreeMap<String, PaintingEntity>,
    /// Person entities keyed by local actor id
    pub creators: BTreeMap<String, CreatorEntity>,
}

impl KnowledgeBase {
    /// Query both tables from the endpoint; any failure is fatal
    pub async fn load(client: &SparqlClient) -> PipelineResult<Self> {
        info!("Loading knowledge base from {}", client.endpoint());

        let paintings = client
            .select(PAINTINGS_QUERY)
            .await
            .map_err(|e| PipelineError::KnowledgeBaseUnavailable(format!("{:#}", e)))?;
        let creators = client
            .select(CREATORS_QUERY)
            .await
            .map_err(|e| PipelineError::KnowledgeBaseUnavailable(format!("{:#}", e)))?;

        let kb = Self::from_results(&paintings, &creators)?;
        info!(
            "Loaded {} paintings and {} artists from the knowledge base",
            kb.paintings.len(),
            kb.creators.len()
        );
        Ok(kb)
    }

    pub fn from_results(paintings: &SparqlResults, creators: &SparqlResults) -> PipelineResult<Self> {
        let paintings = clean_sparql_output(paintings, "obj_id")?
            .into_iter()
            .map(|(obj_id, row)| {
                let painting = PaintingEntity {
                    entity_id: first(&row, "item"),
                    obj_id: obj_id.clone(),
                    types: column(&row, "types"),
                    creators: column(&row, "creators"),
                    creator_templates: column(&row, "creator_templates"),
                    creator_categories: column(&row, "creator_cats"),
                    creator_death_dates: column(&row, "death_dates"),
                    depicted_persons: column(&row, "depicted_persons"),
                    depicted_categories: column(&row, "depicted_cats"),
                    categories: column(&row, "commons_cats"),
                };
                (obj_id, painting)
            })
            .collect();

        let creators = clean_sparql_output(creators, "nsid")?
            .into_iter()
            .map(|(local_id, row)| {
                let creator = CreatorEntity {
                    entity_id: first(&row, "item"),
                    label: first(&row, "itemLabel"),
                    local_id: local_id.clone(),
                    templates: column(&row, "creator_templates"),
                    categories: column(&row, "commons_cats"),
                    death_dates: column(&row, "death_dates"),
                };
                (local_id, creator)
            })
            .collect();

        Ok(Self {
            paintings,
            creators,
        })
    }

    pub fn painting(&self, obj_id: &str) -> Option<&PaintingEntity> {
        self.paintings.get(obj_id)
    }

    pub fn creator(&self, local_id: &str) -> Option<&CreatorEntity> {
        self.creators.get(local_id)
    }

    /// Add manually resolved local ids to the creators table
    ///
    /// An override naming an entity already known under another local id
    /// copies that row; otherwise a bare row is created.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (local_id, entity_id) in overrides {
            let entity_id = entity_id.trim_start_matches(ENTITY_URI_PREFIX);
            let known = self
                .creators
                .values()
                .find(|c| c.entity_id == entity_id)
                .cloned();

            let creator = match known {
                Some(known) => CreatorEntity {
                    local_id: local_id.clone(),
                    ..known
                },
                None => CreatorEntity {
                    entity_id: entity_id.to_string(),
                    local_id: local_id.clone(),
                    ..Default::default()
                },
            };

            if self.creators.insert(local_id.clone(), creator).is_some() {
                warn!("Override replaced knowledge base entry for {}", local_id);
            }
        }
        info!("Applied {} overrides", overrides.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(json: &str) -> SparqlResults {
        serde_json::from_str(json).unwrap()
    }

    fn paintings() -> SparqlResults {
        results(
            r#"{
              "head": {"vars": ["item", "obj_id", "types", "creators", "creator_templates",
                                "creator_cats", "death_dates", "depicted_persons",
                                "depicted_cats", "commons_cats"]},
              "results": {"bindings": [
                {
                  "item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q100"},
                  "obj_id": {"type": "literal", "value": "17"},
                  "types": {"type": "literal", "value": "http://www.wikidata.org/entity/Q3305213"},
                  "creators": {"type": "literal", "value": "http://www.wikidata.org/entity/Q5598"},
                  "creator_templates": {"type": "literal", "value": "Rembrandt"},
                  "creator_cats": {"type": "literal", "value": "Rembrandt"},
                  "death_dates": {"type": "literal", "value": "1669-10-04T00:00:00Z"},
                  "depicted_persons": {"type": "literal", "value": ""},
                  "depicted_cats": {"type": "literal", "value": ""},
                  "commons_cats": {"type": "literal", "value": ""}
                }
              ]}
            }"#,
        )
    }

    fn creators() -> SparqlResults {
        results(
            r#"{
              "head": {"vars": ["item", "itemLabel", "nsid", "creator_templates",
                                "commons_cats", "death_dates"]},
              "results": {"bindings": [
                {
                  "item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q5598"},
                  "itemLabel": {"type": "literal", "value": "Rembrandt"},
                  "nsid": {"type": "literal", "value": "1001"},
                  "creator_templates": {"type": "literal", "value": "Rembrandt|Rembrandt van Rijn"},
                  "commons_cats": {"type": "literal", "value": "Rembrandt"},
                  "death_dates": {"type": "literal", "value": "1669-10-04T00:00:00Z"}
                }
              ]}
            }"#,
        )
    }

    #[test]
    fn test_clean_sparql_output() {
        let cleaned = clean_sparql_output(&paintings(), "obj_id").unwrap();
        let row = &cleaned["17"];
        assert_eq!(row["item"], vec!["Q100".to_string()]);
        assert_eq!(row["creators"], vec!["Q5598".to_string()]);
        assert!(row["depicted_persons"].is_empty());
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        let err = clean_sparql_output(&paintings(), "nsid").unwrap_err();
        assert!(matches!(err, PipelineError::KnowledgeBaseUnavailable(_)));
        assert_eq!(err.code(), "kb");
    }

    #[test]
    fn test_from_results() {
        let kb = KnowledgeBase::from_results(&paintings(), &creators()).unwrap();

        let painting = kb.painting("17").unwrap();
        assert_eq!(painting.entity_id, "Q100");
        assert_eq!(painting.types, vec!["Q3305213".to_string()]);

        let creator = kb.creator("1001").unwrap();
        assert_eq!(creator.label, "Rembrandt");
        assert_eq!(creator.templates.len(), 2);
        assert_eq!(creator.single_template(), None);
    }

    #[test]
    fn test_apply_overrides() {
        let mut kb = KnowledgeBase::from_results(&paintings(), &creators()).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert("2002".to_string(), "Q5598".to_string());
        overrides.insert("3003".to_string(), "Q41264".to_string());

        kb.apply_overrides(&overrides);

        let copied = kb.creator("2002").unwrap();
        assert_eq!(copied.entity_id, "Q5598");
        assert_eq!(copied.label, "Rembrandt");
        assert_eq!(copied.local_id, "2002");

        let bare = kb.creator("3003").unwrap();
        assert_eq!(bare.entity_id, "Q41264");
        assert!(bare.templates.is_empty());
    }
}
