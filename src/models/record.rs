use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Language key used for values without a language tag
pub const UNTAGGED_LANG: &str = "_";

/// Language -> text map; untagged values live under [`UNTAGGED_LANG`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangMap(BTreeMap<String, String>);

impl LangMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Insert a value, returning the previous value for that language
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.0.insert(lang.into(), text.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First value found following the given language priority
    pub fn first_by_priority(&self, priority: &[&str]) -> Option<(&str, &str)> {
        priority
            .iter()
            .find_map(|lang| self.0.get_key_value(*lang))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for LangMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named dimension sets a record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKey {
    /// Plain object measurements
    Unlabeled,
    /// Measurements including the frame
    Framed,
}

/// One measured dimension set; numbers are kept as normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub unit: String,
    pub height: String,
    pub width: Option<String>,
    pub depth: Option<String>,
}

pub type DimensionSet = BTreeMap<DimensionKey, Dimension>;

/// Creation date as found in the creation event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationDate {
    pub earliest: Option<String>,
    pub latest: Option<String>,
    /// Free-text display date per language
    pub text: LangMap,
}

impl CreationDate {
    pub fn is_empty(&self) -> bool {
        self.earliest.is_none() && self.latest.is_none() && self.text.is_empty()
    }
}

/// Attribution-confidence modifier on a creator reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    #[serde(rename = "P1773")]
    AttributedTo,
    #[serde(rename = "P1774")]
    WorkshopOf,
    #[serde(rename = "P1780")]
    SchoolOf,
    #[serde(rename = "P1777")]
    MannerOf,
    #[serde(rename = "P1877")]
    After,
}

impl Qualifier {
    /// Knowledge-base property backing this qualifier
    pub fn property_id(&self) -> &'static str {
        match self {
            Qualifier::AttributedTo => "P1773",
            Qualifier::WorkshopOf => "P1774",
            Qualifier::SchoolOf => "P1780",
            Qualifier::MannerOf => "P1777",
            Qualifier::After => "P1877",
        }
    }

    /// Parameter appended to a creator template
    pub fn creator_param(&self) -> &'static str {
        match self {
            Qualifier::AttributedTo => "attributed to",
            Qualifier::WorkshopOf => "workshop of",
            Qualifier::SchoolOf => "school of",
            Qualifier::MannerOf => "manner of",
            Qualifier::After => "after",
        }
    }

    /// Wrap a plain or linked name in the stand-alone qualifier template
    pub fn wrap_name(&self, name: &str) -> String {
        match self {
            Qualifier::AttributedTo => format!("{{{{Attributed to|{}}}}}", name),
            Qualifier::WorkshopOf => format!("{{{{Name|workshop of|{}}}}}", name),
            Qualifier::SchoolOf => format!("{{{{Name|school of|{}}}}}", name),
            Qualifier::MannerOf => format!("{{{{Manner of|{}}}}}", name),
            Qualifier::After => format!("{{{{After|{}}}}}", name),
        }
    }
}

/// Local person identifier; the museum runs two namespaces
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "namespace", content = "id", rename_all = "snake_case")]
pub enum ActorId {
    /// Museum artist id
    Nsid(String),
    Other(String),
}

impl ActorId {
    pub fn as_str(&self) -> &str {
        match self {
            ActorId::Nsid(id) | ActorId::Other(id) => id,
        }
    }

    /// Museum artist id, the only namespace the creators table is keyed by
    pub fn nsid(&self) -> Option<&str> {
        match self {
            ActorId::Nsid(id) => Some(id),
            ActorId::Other(_) => None,
        }
    }

    /// Map key that keeps the two namespaces apart
    pub fn key(&self) -> String {
        match self {
            ActorId::Nsid(id) => format!("nsid:{}", id),
            ActorId::Other(id) => format!("other:{}", id),
        }
    }
}

/// Reference to a person embedded in a catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: ActorId,
    /// None when the catalog gives no name or a name meaning "unknown"
    pub name: Option<String>,
    pub qualifier: Option<Qualifier>,
}

impl ActorRef {
    pub fn new(id: ActorId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            qualifier: None,
        }
    }

    pub fn with_qualifier(mut self, qualifier: Option<Qualifier>) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn local_id(&self) -> &str {
        self.id.as_str()
    }
}

/// Canonical record extracted from one catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub obj_id: String,
    pub inv_nr: String,
    pub source_file: String,
    pub title: LangMap,
    pub description: LangMap,
    pub inscription: LangMap,
    pub technique: LangMap,
    pub dimensions: DimensionSet,
    pub creation_place: LangMap,
    pub creation_date: CreationDate,
    /// Creators keyed by [`ActorId::key`]
    pub creators: BTreeMap<String, ActorRef>,
    pub depicted: Vec<ActorRef>,
    /// Image filename -> photographer
    pub images: BTreeMap<String, Option<String>>,
    pub image_license: Option<String>,
}

/// Builder validating the required fields of a [`CatalogRecord`]
#[derive(Debug, Clone, Default)]
pub struct CatalogRecordBuilder {
    pub obj_id: Option<String>,
    pub inv_nr: Option<String>,
    pub source_file: Option<String>,
    pub title: LangMap,
    pub description: LangMap,
    pub inscription: LangMap,
    pub technique: LangMap,
    pub dimensions: DimensionSet,
    pub creation_place: LangMap,
    pub creation_date: CreationDate,
    pub creators: BTreeMap<String, ActorRef>,
    pub depicted: Vec<ActorRef>,
    pub images: BTreeMap<String, Option<String>>,
    pub image_license: Option<String>,
}

impl CatalogRecordBuilder {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: Some(source_file.into()),
            ..Default::default()
        }
    }

    /// Add a creator; a repeated local id replaces the earlier entry
    pub fn add_creator(&mut self, actor: ActorRef) {
        self.creators.insert(actor.id.key(), actor);
    }

    pub fn build(self) -> PipelineResult<CatalogRecord> {
        let source_file = self
            .source_file
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::schema("<unknown>", "source file"))?;
        let obj_id = self
            .obj_id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::schema(&source_file, "recordWrap/recordID"))?;

        Ok(CatalogRecord {
            obj_id,
            inv_nr: self.inv_nr.unwrap_or_default(),
            source_file,
            title: self.title,
            description: self.description,
            inscription: self.inscription,
            technique: self.technique,
            dimensions: self.dimensions,
            creation_place: self.creation_place,
            creation_date: self.creation_date,
            creators: self.creators,
            depicted: self.depicted,
            images: self.images,
            image_license: self.image_license,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_obj_id() {
        let builder = CatalogRecordBuilder::new("a.xml");
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("recordID"));
    }

    #[test]
    fn test_creator_collision_keeps_last() {
        let mut builder = CatalogRecordBuilder::new("a.xml");
        builder.obj_id = Some("1".to_string());
        builder.add_creator(ActorRef::new(ActorId::Nsid("5".into()), Some("First".into())));
        builder.add_creator(ActorRef::new(ActorId::Nsid("5".into()), Some("Second".into())));
        let record = builder.build().unwrap();

        assert_eq!(record.creators.len(), 1);
        assert_eq!(record.creators["nsid:5"].name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_creator_namespaces_do_not_collide() {
        let mut builder = CatalogRecordBuilder::new("a.xml");
        builder.obj_id = Some("1".to_string());
        builder.add_creator(ActorRef::new(ActorId::Other("1001".into()), Some("Other".into())));
        builder.add_creator(ActorRef::new(ActorId::Nsid("1001".into()), Some("Artist".into())));
        let record = builder.build().unwrap();

        assert_eq!(record.creators.len(), 2);
        assert_eq!(record.creators["other:1001"].name.as_deref(), Some("Other"));
        assert_eq!(record.creators["nsid:1001"].id.nsid(), Some("1001"));
    }

    #[test]
    fn test_snapshot_rejects_missing_required_field() {
        let json = r#"{"obj_id": "1", "source_file": "a.xml"}"#;
        assert!(serde_json::from_str::<CatalogRecord>(json).is_err());
    }

    #[test]
    fn test_qualifier_wrap() {
        assert_eq!(
            Qualifier::After.wrap_name("Rubens"),
            "{{After|Rubens}}"
        );
        assert_eq!(Qualifier::SchoolOf.property_id(), "P1780");
    }

    #[test]
    fn test_lang_priority() {
        let mut map = LangMap::new();
        map.insert("sv", "Flicka");
        map.insert("en", "Girl");
        assert_eq!(map.first_by_priority(&["_", "en", "sv"]), Some(("en", "Girl")));
    }
}
