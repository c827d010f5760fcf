use std::collections::BTreeMap;

use tracing::info;

use crate::io::{RenderedBatch, RenderedRecord};
use crate::kb::KnowledgeBase;
use crate::models::{CatalogRecord, Diagnostics, MaintenanceIssue};
use crate::parsers::parse_creation_date;
use crate::render::{
    CategoryBase, SubCollection, build_categories, death_year, filename_description,
    find_sub_collection, format_accession_link, format_creation_place, format_date,
    format_depicted, format_dimensions, format_filename, format_institution,
    format_original_caption, format_permission, format_source, language_wrapped,
    resolve_object_type,
};

use super::stage1_select::SelectedRecord;
use super::stage2_reconcile::{
    ReconcileConfig, ReconciliationOutcome, aggregate_creators, reconcile_record,
};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Language order for wrapped values, titles and dates
    pub language_priority: Vec<String>,
    /// Collection name used in sources and filenames
    pub collection: String,
    pub institution: String,
    pub base_category: String,
    pub batch_category: String,
    /// Knowledge base type id -> object type
    pub type_mappings: BTreeMap<String, String>,
    /// Swedish place name -> entity id
    pub place_mappings: BTreeMap<String, String>,
    pub sub_collections: Vec<SubCollection>,
    /// Maximum length of the descriptive part of a filename
    pub max_description_chars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let type_mappings = [("Q132137", "icon"), ("Q3305213", "painting")];
        let place_mappings = [
            ("Moskva", "Q649"),
            ("Kina", "Q29520"),
            ("Leiden", "Q43631"),
            ("Frankrike", "Q142"),
            ("Haarlem", "Q9920"),
            ("Danmark", "Q35"),
            ("München", "Q1726"),
            ("Paris", "Q90"),
            ("Italien", "Q38"),
            ("England", "Q21"),
            ("Sverige", "Q34"),
            ("Stockholm", "Q1754"),
            ("Jämtland", "Q211661"),
            ("Fontainebleau", "Q182872"),
            ("Florens", "Q2044"),
            ("Nederländerna", "Q55"),
            ("Rom", "Q220"),
            ("Antwerpen", "Q12892"),
        ];

        Self {
            language_priority: vec!["_".to_string(), "en".to_string(), "sv".to_string()],
            collection: "Nationalmuseum".to_string(),
            institution: "{{Institution:Nationalmuseum Stockholm}}".to_string(),
            base_category: "Paintings in the Nationalmuseum Stockholm".to_string(),
            batch_category: "Media contributed by Nationalmuseum Stockholm".to_string(),
            type_mappings: type_mappings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            place_mappings: place_mappings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            sub_collections: vec![
                SubCollection::new(
                    "TiP",
                    "{{Institution:Institut_Tessin}}",
                    "Centre culturel suédois",
                ),
                SubCollection::new(
                    "Grh",
                    "{{Institution:Gripsholm Castle}}",
                    "Art in Gripsholms slott",
                ),
                SubCollection::new(
                    "Drh",
                    "[[Drottningholms slott]]",
                    "Paintings_at_Royal_Domain_of_Drottningholm",
                ),
            ],
            max_description_chars: 100,
        }
    }
}

impl RenderConfig {
    pub fn priority(&self) -> Vec<&str> {
        self.language_priority.iter().map(String::as_str).collect()
    }
}

/// Result of Stage 3 rendering
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub batch: RenderedBatch,
    /// Run-wide reconciliation report
    pub diagnostics: Diagnostics,
}

/// Render one reconciled record into its file page
pub fn render_record(
    record: &CatalogRecord,
    image: &str,
    outcome: &ReconciliationOutcome,
    kb: &KnowledgeBase,
    config: &RenderConfig,
) -> RenderedRecord {
    let priority = config.priority();
    let painting = kb.painting(&record.obj_id);
    let sub_collection = find_sub_collection(image, &config.sub_collections);
    let mut issues = outcome.tracker.issues.clone();

    let (date, bad_date) = format_date(&parse_creation_date(&record.creation_date, &priority));
    if bad_date {
        issues.insert(MaintenanceIssue::DateFormat);
    }

    // painting-level dates plus every directly matched creator
    let death_dates = painting
        .map(|p| p.creator_death_dates.iter())
        .into_iter()
        .flatten()
        .chain(
            outcome
                .matched_creators
                .iter()
                .filter_map(|local_id| kb.creator(local_id))
                .flat_map(|c| c.death_dates.iter()),
        );
    let permission = format_permission(death_year(death_dates), record.image_license.as_deref());

    let description = language_wrapped(&record.description, &priority);
    let photographer = record.images.get(image).and_then(|p| p.as_deref());

    let fields = [
        ("other_fields_1", format_depicted(&outcome.depicted)),
        ("artist", aggregate_creators(&outcome.creators)),
        ("title", language_wrapped(&record.title, &priority)),
        (
            "wikidata",
            painting.map(|p| p.entity_id.clone()).unwrap_or_default(),
        ),
        (
            "object_type",
            painting
                .map(|p| resolve_object_type(&record.obj_id, &p.types, &config.type_mappings))
                .unwrap_or_default(),
        ),
        ("description", description.clone()),
        ("other_fields_2", format_original_caption(&description)),
        ("date", date),
        ("medium", language_wrapped(&record.technique, &priority)),
        ("dimensions", format_dimensions(&record.dimensions)),
        (
            "institution",
            format_institution(&config.institution, sub_collection),
        ),
        ("inscriptions", language_wrapped(&record.inscription, &priority)),
        (
            "accession number",
            format_accession_link(&record.obj_id, &record.inv_nr),
        ),
        (
            "place of creation",
            format_creation_place(&record.obj_id, &record.creation_place, &config.place_mappings),
        ),
        ("source", format_source(photographer, &config.collection)),
        ("permission", permission),
        ("other_versions", String::new()),
    ];

    let mut text = String::from("{{Artwork\n");
    for (name, value) in &fields {
        text.push_str(&format!(" |{:<21}= {}\n", name, value));
    }
    text.push_str("}}");

    let categories = build_categories(
        &CategoryBase {
            base_category: &config.base_category,
            batch_category: &config.batch_category,
            sub_collection,
        },
        &outcome.tracker,
        &issues,
        painting.map(|p| p.categories.as_slice()).unwrap_or(&[]),
    );

    let filename = format_filename(
        &filename_description(record, &priority),
        &config.collection,
        &record.obj_id,
        image,
        config.max_description_chars,
    );

    RenderedRecord {
        obj_id: record.obj_id.clone(),
        image: image.to_string(),
        filename,
        text,
        categories,
    }
}

/// Execute Stage 3: reconcile and render every selected record
///
/// Per-record diagnostics are merged into one run-wide report.
pub fn execute_stage3(
    selected: &[SelectedRecord],
    kb: &KnowledgeBase,
    reconcile_config: &ReconcileConfig,
    render_config: &RenderConfig,
) -> Stage3Result {
    let mut result = Stage3Result::default();

    for SelectedRecord { record, image } in selected {
        let outcome = reconcile_record(record, kb, reconcile_config);
        result
            .batch
            .insert(render_record(record, image, &outcome, kb, render_config));
        result.diagnostics.merge(outcome.diagnostics);
    }

    info!(
        "Rendered {} records ({} local ids missing from the knowledge base, {} for review)",
        result.batch.len(),
        result.diagnostics.missing_ids.len(),
        result.diagnostics.review.len()
    );

    result
}
