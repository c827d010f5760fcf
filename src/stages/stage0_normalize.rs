use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::io::{XmlElement, find_catalog_files, parse_xml};
use crate::models::{
    ActorId, ActorRef, CatalogRecord, CatalogRecordBuilder, CreationDate, RunLog,
};
use crate::parsers::{
    RoleClass, TaggedValue, classify_qualifier, classify_role, collect_lang_values,
    parse_dimensions,
};

/// Configuration for Stage 0 normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Legal body id every record's current repository must carry
    pub repository_id: String,
    /// Event type concept marking the creation event
    pub creation_concept: String,
    /// Other event concepts that are expected but not used
    pub known_concepts: Vec<String>,
    /// Actor id type of the primary (artist) namespace
    pub primary_id_type: String,
    /// Actor names that mean "unknown"
    pub unknown_names: Vec<String>,
    /// Resource formats treated as local master images
    pub image_formats: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            repository_id: "http://viaf.org/viaf/147742988".to_string(),
            creation_concept: "http://terminology.lido-schema.org/lido00012".to_string(),
            known_concepts: vec!["http://terminology.lido-schema.org/lido00001".to_string()],
            primary_id_type: "Nationalmuseum Sweden artist ID; NSID".to_string(),
            unknown_names: vec!["Okänd".to_string()],
            image_formats: vec!["tif".to_string(), "tiff".to_string()],
        }
    }
}

/// Result of Stage 0 normalization
#[derive(Debug, Default)]
pub struct NormalizationResult {
    /// Records keyed by object id
    pub records: BTreeMap<String, CatalogRecord>,
    /// Skipped documents and vocabulary problems
    pub log: RunLog,
    /// Number of documents seen
    pub documents_read: usize,
}

/// Normalize every catalog document in a directory
pub fn normalize_directory(dir: &Path, config: &NormalizeConfig) -> Result<NormalizationResult> {
    let files = find_catalog_files(dir)?;
    info!("Found {} .xml files", files.len());

    let documents = files.iter().map(|path| {
        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Xml {
            source_file: source_file.clone(),
            message: e.to_string(),
        });
        (source_file, content)
    });

    Ok(normalize_documents(documents, config))
}

/// Perform Stage 0 over a batch of (source file, document text) pairs
///
/// This stage:
/// 1. Parses each document, skipping malformed ones
/// 2. Extracts a canonical record per document
/// 3. Drops documents repeating an already-seen object id
pub fn normalize_documents<I>(documents: I, config: &NormalizeConfig) -> NormalizationResult
where
    I: IntoIterator<Item = (String, PipelineResult<String>)>,
{
    let mut result = NormalizationResult::default();

    for (source_file, content) in documents {
        result.documents_read += 1;

        let record = content
            .and_then(|xml| {
                parse_xml(&xml).map_err(|e| PipelineError::Xml {
                    source_file: source_file.clone(),
                    message: format!("{:#}", e),
                })
            })
            .and_then(|root| normalize_document(&root, &source_file, config, &mut result.log));

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                result.log.record(&e);
                continue;
            }
        };

        if let Some(existing) = result.records.get(&record.obj_id) {
            result.log.record(&PipelineError::DuplicateObjectId {
                obj_id: record.obj_id.clone(),
                kept_file: existing.source_file.clone(),
                duplicate_file: record.source_file.clone(),
            });
            continue;
        }

        result.records.insert(record.obj_id.clone(), record);
    }

    info!(
        "Normalized {} records from {} documents ({} log entries)",
        result.records.len(),
        result.documents_read,
        result.log.len()
    );

    result
}

/// Extract a canonical record from one parsed document
///
/// Missing mandatory structure fails the document; vocabulary problems are
/// added to `log` and only drop the affected sub-field.
pub fn normalize_document(
    root: &XmlElement,
    source_file: &str,
    config: &NormalizeConfig,
    log: &mut RunLog,
) -> PipelineResult<CatalogRecord> {
    debug!("Normalizing {}", source_file);

    let lido = match root.local_name() {
        "lidoWrap" => root.child("lido"),
        "lido" => Some(root),
        _ => None,
    }
    .ok_or_else(|| PipelineError::schema(source_file, "lidoWrap/lido"))?;

    let mut builder = CatalogRecordBuilder::new(source_file);

    let admin = lido
        .child("administrativeMetadata")
        .ok_or_else(|| PipelineError::schema(source_file, "administrativeMetadata"))?;
    builder.obj_id = admin
        .text_at(&["recordWrap", "recordID"])
        .map(str::to_string);
    for resource_set in admin.find_all(&["resourceWrap", "resourceSet"]) {
        add_image_data(resource_set, &mut builder, source_file, config);
    }

    let descriptive = lido
        .child("descriptiveMetadata")
        .ok_or_else(|| PipelineError::schema(source_file, "descriptiveMetadata"))?;

    match descriptive.child("objectIdentificationWrap") {
        Some(identification) => {
            add_identification_data(identification, &mut builder, source_file, config, log)
        }
        None => warn!("No object identification for {}", source_file),
    }

    add_event_data(
        &descriptive.find_all(&["eventWrap", "eventSet", "event"]),
        &mut builder,
        source_file,
        config,
        log,
    );

    if let Some(relations) = descriptive.child("objectRelationWrap") {
        builder.depicted = relations
            .find_all(&["subjectWrap", "subjectSet", "subject", "subjectActor", "actor"])
            .into_iter()
            .filter_map(|actor| handle_actor(actor, config))
            .collect();
    }

    builder.build()
}

fn tagged(element: &XmlElement) -> Option<TaggedValue> {
    element
        .text()
        .map(|text| TaggedValue::new(element.attr("lang"), text))
}

fn collect_at(element: &XmlElement, path: &[&str]) -> crate::models::LangMap {
    collect_lang_values(element.find_all(path).into_iter().filter_map(tagged))
}

/// Match local images to their attributions and pick up the license
fn add_image_data(
    resource_set: &XmlElement,
    builder: &mut CatalogRecordBuilder,
    source_file: &str,
    config: &NormalizeConfig,
) {
    let images: Vec<&str> = resource_set
        .find_all(&["resourceRepresentation", "linkResource"])
        .into_iter()
        .filter(|link| {
            link.attr("formatResource").is_some_and(|format| {
                config
                    .image_formats
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(format))
            })
        })
        .filter_map(XmlElement::text)
        .filter(|text| !text.starts_with("http"))
        .collect();

    let attributions: Vec<Option<&str>> = resource_set
        .find_all(&["rightsResource", "rightsHolder"])
        .into_iter()
        .map(|holder| holder.text_at(&["legalBodyName", "appellationValue"]))
        .collect();

    if !attributions.is_empty() && attributions.len() != images.len() {
        warn!(
            "image-attribution mismatch in {} ({} images, {} attributions)",
            source_file,
            images.len(),
            attributions.len()
        );
    }

    // positional pairing; images beyond the attribution list get none
    for (i, image) in images.iter().enumerate() {
        let photographer = attributions.get(i).copied().flatten().map(str::to_string);
        builder.images.insert(image.to_string(), photographer);
    }

    if let Some(license) = resource_set.text_at(&["rightsResource", "rightsType", "term"]) {
        builder.image_license = Some(license.to_string());
    }
}

fn add_identification_data(
    identification: &XmlElement,
    builder: &mut CatalogRecordBuilder,
    source_file: &str,
    config: &NormalizeConfig,
    log: &mut RunLog,
) {
    builder.title = collect_at(identification, &["titleWrap", "titleSet", "appellationValue"]);
    builder.inscription = collect_at(
        identification,
        &["inscriptionsWrap", "inscriptions", "inscriptionTranscription"],
    );
    builder.description = collect_at(
        identification,
        &[
            "objectDescriptionWrap",
            "objectDescriptionSet",
            "descriptiveNoteValue",
        ],
    );

    let measurements: Vec<&str> = identification
        .find_all(&[
            "objectMeasurementsWrap",
            "objectMeasurementsSet",
            "displayObjectMeasurements",
        ])
        .into_iter()
        .filter_map(XmlElement::text)
        .collect();
    builder.dimensions = parse_dimensions(&measurements, source_file, log);

    for repository in identification.find_all(&["repositoryWrap", "repositorySet"]) {
        if let Some(inv_nr) = repository.text_at(&["workID"]) {
            builder.inv_nr = Some(inv_nr.to_string());
        }
        if repository.attr("type") == Some("current") {
            let authority = repository.text_at(&["repositoryName", "legalBodyID"]);
            if authority != Some(config.repository_id.as_str()) {
                warn!(
                    "Unexpected repository in {}: {}",
                    source_file,
                    authority.unwrap_or("<none>")
                );
            }
        }
    }

    if builder.inv_nr.is_none() {
        warn!("No inventory number for {}", source_file);
    }
}

fn add_event_data(
    events: &[&XmlElement],
    builder: &mut CatalogRecordBuilder,
    source_file: &str,
    config: &NormalizeConfig,
    log: &mut RunLog,
) {
    let mut found_creation = false;

    for event in events {
        let concept = event.text_at(&["eventType", "conceptID"]).unwrap_or("");
        if concept == config.creation_concept {
            if found_creation {
                warn!("Multiple creation events for {}", source_file);
                continue;
            }
            found_creation = true;
            add_creation(event, builder, source_file, config, log);
        } else if !config.known_concepts.iter().any(|c| c == concept) {
            warn!("Unrecognized event concept for {}: {}", source_file, concept);
        }
    }

    if !found_creation {
        warn!("No creation event for {}", source_file);
    }
}

fn add_creation(
    event: &XmlElement,
    builder: &mut CatalogRecordBuilder,
    source_file: &str,
    config: &NormalizeConfig,
    log: &mut RunLog,
) {
    handle_creators(event, builder, source_file, config, log);

    if let Some(event_date) = event.child("eventDate") {
        builder.creation_date = CreationDate {
            earliest: event_date
                .text_at(&["date", "earliestDate"])
                .map(str::to_string),
            latest: event_date
                .text_at(&["date", "latestDate"])
                .map(str::to_string),
            text: collect_lang_values(event_date.children_named("displayDate").filter_map(tagged)),
        };
    }

    builder.creation_place = collect_at(
        event,
        &["eventPlace", "place", "namePlaceSet", "appellationValue"],
    );
    builder.technique = collect_at(
        event,
        &["eventMaterialsTech", "materialsTech", "termMaterialsTech", "term"],
    );
}

fn handle_creators(
    event: &XmlElement,
    builder: &mut CatalogRecordBuilder,
    source_file: &str,
    config: &NormalizeConfig,
    log: &mut RunLog,
) {
    for event_actor in event.children_named("eventActor") {
        if !event_actor.has_children() {
            continue;
        }
        let actor_in_role = match event_actor.child("actorInRole") {
            Some(a) if event_actor.children.len() == 1 => a,
            _ => {
                warn!("Unexpected actor tag for {}", source_file);
                continue;
            }
        };

        // empty role means an empty entry
        let role = match actor_in_role.text_at(&["roleActor", "term"]) {
            Some(role) => role,
            None => continue,
        };
        let role_class = match classify_role(role) {
            Some(RoleClass::Skip) => continue,
            Some(class) => class,
            None => {
                log.record(&PipelineError::UnknownVocabulary {
                    source_file: source_file.to_string(),
                    vocabulary: "actor role".to_string(),
                    value: role.to_string(),
                });
                continue;
            }
        };

        let label_qualifier = match actor_in_role.text_at(&["attributionQualifierActor"]) {
            Some(label) => match classify_qualifier(label) {
                Some(qualifier) => qualifier,
                None => {
                    log.record(&PipelineError::UnknownVocabulary {
                        source_file: source_file.to_string(),
                        vocabulary: "actor qualifier".to_string(),
                        value: label.to_string(),
                    });
                    continue;
                }
            },
            None => None,
        };

        let actor = match actor_in_role
            .child("actor")
            .and_then(|a| handle_actor(a, config))
        {
            Some(actor) => actor,
            None => {
                warn!("Creator without actor id in {}", source_file);
                continue;
            }
        };

        let qualifier = match role_class {
            RoleClass::Qualified(q) => Some(q),
            _ => label_qualifier,
        };
        builder.add_creator(actor.with_qualifier(qualifier));
    }
}

/// Build an actor reference from a `lido:actor` element
fn handle_actor(actor: &XmlElement, config: &NormalizeConfig) -> Option<ActorRef> {
    let id_element = actor.child("actorID")?;
    let id = id_element.text()?.to_string();
    let id = if id_element.attr("type") == Some(config.primary_id_type.as_str()) {
        ActorId::Nsid(id)
    } else {
        ActorId::Other(id)
    };

    let name = actor
        .text_at(&["nameActorSet", "appellationValue"])
        .filter(|name| !config.unknown_names.iter().any(|u| u == name))
        .map(str::to_string);

    Some(ActorRef::new(id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DimensionKey, Qualifier};

    fn sample_document(obj_id: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<lido:lidoWrap xmlns:lido="http://www.lido-schema.org">
 <lido:lido>
  <lido:lidoRecID>1</lido:lidoRecID>
  <lido:descriptiveMetadata xml:lang="sv">
   <lido:objectIdentificationWrap>
    <lido:titleWrap>
     <lido:titleSet><lido:appellationValue xml:lang="sv">Flicka med katt</lido:appellationValue></lido:titleSet>
     <lido:titleSet><lido:appellationValue xml:lang="en">Girl with cat</lido:appellationValue></lido:titleSet>
    </lido:titleWrap>
    <lido:inscriptionsWrap>
     <lido:inscriptions><lido:inscriptionTranscription>Signerad</lido:inscriptionTranscription></lido:inscriptions>
    </lido:inscriptionsWrap>
    <lido:repositoryWrap>
     <lido:repositorySet lido:type="current">
      <lido:repositoryName><lido:legalBodyID>http://viaf.org/viaf/147742988</lido:legalBodyID></lido:repositoryName>
     </lido:repositorySet>
     <lido:repositorySet><lido:workID>NM 1234</lido:workID></lido:repositorySet>
    </lido:repositoryWrap>
    <lido:objectDescriptionWrap>
     <lido:objectDescriptionSet><lido:descriptiveNoteValue xml:lang="sv">En flicka.</lido:descriptiveNoteValue></lido:objectDescriptionSet>
    </lido:objectDescriptionWrap>
    <lido:objectMeasurementsWrap>
     <lido:objectMeasurementsSet>
      <lido:displayObjectMeasurements>Mått 61 x 50 cm</lido:displayObjectMeasurements>
      <lido:displayObjectMeasurements>Ram 45,5 x 38 cm</lido:displayObjectMeasurements>
      <lido:displayObjectMeasurements>Vikt 3 kg</lido:displayObjectMeasurements>
     </lido:objectMeasurementsSet>
    </lido:objectMeasurementsWrap>
   </lido:objectIdentificationWrap>
   <lido:eventWrap>
    <lido:eventSet>
     <lido:event>
      <lido:eventType><lido:conceptID>http://terminology.lido-schema.org/lido00012</lido:conceptID></lido:eventType>
      <lido:eventActor>
       <lido:actorInRole>
        <lido:actor>
         <lido:actorID lido:type="Nationalmuseum Sweden artist ID; NSID">1001</lido:actorID>
         <lido:nameActorSet><lido:appellationValue>Carl Larsson</lido:appellationValue></lido:nameActorSet>
        </lido:actor>
        <lido:roleActor><lido:term>Konstnär</lido:term></lido:roleActor>
       </lido:actorInRole>
      </lido:eventActor>
      <lido:eventActor>
       <lido:actorInRole>
        <lido:actor>
         <lido:actorID lido:type="Nationalmuseum Sweden artist ID; NSID">1002</lido:actorID>
         <lido:nameActorSet><lido:appellationValue>Peter Paul Rubens</lido:appellationValue></lido:nameActorSet>
        </lido:actor>
        <lido:roleActor><lido:term>Konstnär</lido:term></lido:roleActor>
        <lido:attributionQualifierActor>Hans skola</lido:attributionQualifierActor>
       </lido:actorInRole>
      </lido:eventActor>
      <lido:eventActor>
       <lido:actorInRole>
        <lido:actor>
         <lido:actorID lido:type="Nationalmuseum Sweden artist ID; NSID">1003</lido:actorID>
         <lido:nameActorSet><lido:appellationValue>Beställaren</lido:appellationValue></lido:nameActorSet>
        </lido:actor>
        <lido:roleActor><lido:term>Beställare</lido:term></lido:roleActor>
       </lido:actorInRole>
      </lido:eventActor>
      <lido:eventActor>
       <lido:actorInRole>
        <lido:actor>
         <lido:actorID lido:type="Nationalmuseum Sweden artist ID; NSID">1004</lido:actorID>
         <lido:nameActorSet><lido:appellationValue>Någon</lido:appellationValue></lido:nameActorSet>
        </lido:actor>
        <lido:roleActor><lido:term>Gravör</lido:term></lido:roleActor>
       </lido:actorInRole>
      </lido:eventActor>
      <lido:eventDate>
       <lido:displayDate xml:lang="sv">1650-1660</lido:displayDate>
       <lido:date><lido:earliestDate>1650</lido:earliestDate><lido:latestDate>1660</lido:latestDate></lido:date>
      </lido:eventDate>
      <lido:eventPlace><lido:place><lido:namePlaceSet><lido:appellationValue xml:lang="sv">Paris (Frankrike)</lido:appellationValue></lido:namePlaceSet></lido:place></lido:eventPlace>
      <lido:eventMaterialsTech><lido:materialsTech><lido:termMaterialsTech><lido:term xml:lang="sv">Olja på duk</lido:term></lido:termMaterialsTech></lido:materialsTech></lido:eventMaterialsTech>
     </lido:event>
    </lido:eventSet>
    <lido:eventSet>
     <lido:event>
      <lido:eventType><lido:conceptID>http://terminology.lido-schema.org/lido00001</lido:conceptID></lido:eventType>
     </lido:event>
    </lido:eventSet>
   </lido:eventWrap>
   <lido:objectRelationWrap>
    <lido:subjectWrap><lido:subjectSet><lido:subject>
     <lido:subjectActor><lido:actor>
      <lido:actorID lido:type="Nationalmuseum Sweden artist ID; NSID">2001</lido:actorID>
      <lido:nameActorSet><lido:appellationValue>Gustav III</lido:appellationValue></lido:nameActorSet>
     </lido:actor></lido:subjectActor>
     <lido:subjectActor><lido:actor>
      <lido:actorID lido:type="local person id">x-9</lido:actorID>
      <lido:nameActorSet><lido:appellationValue>Okänd</lido:appellationValue></lido:nameActorSet>
     </lido:actor></lido:subjectActor>
    </lido:subject></lido:subjectSet></lido:subjectWrap>
   </lido:objectRelationWrap>
  </lido:descriptiveMetadata>
  <lido:administrativeMetadata xml:lang="sv">
   <lido:recordWrap><lido:recordID lido:type="local">{obj_id}</lido:recordID></lido:recordWrap>
   <lido:resourceWrap>
    <lido:resourceSet>
     <lido:resourceRepresentation><lido:linkResource lido:formatResource="tif">NMGrh 1234.tif</lido:linkResource></lido:resourceRepresentation>
     <lido:resourceRepresentation><lido:linkResource lido:formatResource="jpg">http://example.org/1234.jpg</lido:linkResource></lido:resourceRepresentation>
     <lido:rightsResource>
      <lido:rightsType><lido:term>Public Domain</lido:term></lido:rightsType>
      <lido:rightsHolder><lido:legalBodyName><lido:appellationValue>Cecilia Heisser</lido:appellationValue></lido:legalBodyName></lido:rightsHolder>
     </lido:rightsResource>
    </lido:resourceSet>
   </lido:resourceWrap>
  </lido:administrativeMetadata>
 </lido:lido>
</lido:lidoWrap>"#,
            obj_id = obj_id
        )
    }

    fn normalize_sample(obj_id: &str) -> (CatalogRecord, RunLog) {
        let root = parse_xml(&sample_document(obj_id)).unwrap();
        let mut log = RunLog::new();
        let record =
            normalize_document(&root, "sample.xml", &NormalizeConfig::default(), &mut log).unwrap();
        (record, log)
    }

    #[test]
    fn test_normalize_identification() {
        let (record, _) = normalize_sample("17");

        assert_eq!(record.obj_id, "17");
        assert_eq!(record.inv_nr, "NM 1234");
        assert_eq!(record.title.get("sv"), Some("Flicka med katt"));
        assert_eq!(record.title.get("en"), Some("Girl with cat"));
        assert_eq!(record.inscription.get("_"), Some("Signerad"));
        assert_eq!(record.description.get("sv"), Some("En flicka."));
        assert_eq!(record.technique.get("sv"), Some("Olja på duk"));
        assert_eq!(record.creation_place.get("sv"), Some("Paris (Frankrike)"));
        assert_eq!(record.dimensions.len(), 2);
        assert_eq!(record.dimensions[&DimensionKey::Framed].height, "45.5");
    }

    #[test]
    fn test_normalize_images() {
        let (record, _) = normalize_sample("17");

        assert_eq!(record.images.len(), 1);
        assert_eq!(
            record.images.get("NMGrh 1234.tif"),
            Some(&Some("Cecilia Heisser".to_string()))
        );
        assert_eq!(record.image_license.as_deref(), Some("Public Domain"));
    }

    #[test]
    fn test_measurement_vocabulary_is_logged() {
        let document = sample_document("17")
            .replace("Mått 61 x 50 cm", "Okänt 10 x 10 cm")
            .replace("Ram 45,5 x 38 cm", "Mått 10 x 20 tum");
        let root = parse_xml(&document).unwrap();
        let mut log = RunLog::new();
        let record =
            normalize_document(&root, "sample.xml", &NormalizeConfig::default(), &mut log).unwrap();

        assert!(record.dimensions.is_empty());
        // two measurements plus the unknown role
        assert_eq!(log.count("vocabulary"), 3);
        assert!(log.format().contains("unknown measurement prefix: Okänt"));
        assert!(log.format().contains("unknown measurement unit: Mått 10 x 20 tum"));
    }

    #[test]
    fn test_normalize_creators() {
        let (record, log) = normalize_sample("17");

        // skipped role and unknown role are both left out
        assert_eq!(record.creators.len(), 2);
        assert_eq!(record.creators["nsid:1001"].qualifier, None);
        assert_eq!(record.creators["nsid:1002"].qualifier, Some(Qualifier::SchoolOf));
        assert_eq!(record.creators["nsid:1001"].id, ActorId::Nsid("1001".to_string()));
        assert_eq!(log.count("vocabulary"), 1);

        assert_eq!(record.creation_date.earliest.as_deref(), Some("1650"));
        assert_eq!(record.creation_date.text.get("sv"), Some("1650-1660"));
    }

    #[test]
    fn test_normalize_depicted() {
        let (record, _) = normalize_sample("17");

        assert_eq!(record.depicted.len(), 2);
        assert_eq!(record.depicted[0].name.as_deref(), Some("Gustav III"));
        assert_eq!(record.depicted[1].id, ActorId::Other("x-9".to_string()));
        assert_eq!(record.depicted[1].name, None);
    }

    #[test]
    fn test_missing_record_id_is_schema_violation() {
        let xml = sample_document("");
        let root = parse_xml(&xml).unwrap();
        let mut log = RunLog::new();
        let err = normalize_document(&root, "broken.xml", &NormalizeConfig::default(), &mut log)
            .unwrap_err();
        assert_eq!(err.code(), "schema");
    }

    #[test]
    fn test_duplicate_object_id_keeps_first() {
        let documents = vec![
            ("first.xml".to_string(), Ok(sample_document("17"))),
            ("second.xml".to_string(), Ok(sample_document("17"))),
            ("broken.xml".to_string(), Ok("<lido:lidoWrap>".to_string())),
        ];

        let result = normalize_documents(documents, &NormalizeConfig::default());

        assert_eq!(result.documents_read, 3);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records["17"].source_file, "first.xml");
        assert_eq!(result.log.count("duplicate"), 1);
        assert_eq!(result.log.count("xml"), 1);

        let duplicate = result
            .log
            .entries
            .iter()
            .find(|e| e.code == "duplicate")
            .unwrap();
        assert!(duplicate.message.contains("first.xml"));
        assert!(duplicate.message.contains("second.xml"));
    }

    #[test]
    fn test_normalize_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.xml"), sample_document("1")).unwrap();
        std::fs::write(dir.path().join("b.xml"), sample_document("2")).unwrap();

        let result = normalize_directory(dir.path(), &NormalizeConfig::default()).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records["2"].source_file, "b.xml");
    }
}
