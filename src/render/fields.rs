use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{
    DimensionKey, DimensionSet, LangMap, LinkTarget, ReconciledActor, UNTAGGED_LANG,
};
use crate::parsers::ParsedDate;

/// Department and category for images from one sub-collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCollection {
    /// Image filename prefix identifying the sub-collection
    pub prefix: String,
    pub link: String,
    pub category: String,
}

impl SubCollection {
    pub fn new(prefix: &str, link: &str, category: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            link: link.to_string(),
            category: category.to_string(),
        }
    }
}

/// Wrap text in its language template; untagged text is left bare
pub fn wrap_language(lang: &str, text: &str) -> String {
    if lang == UNTAGGED_LANG {
        text.to_string()
    } else {
        format!("{{{{{}|{}}}}}", lang, text)
    }
}

/// Every value present in a priority language, wrapped and space separated
pub fn language_wrapped(map: &LangMap, priority: &[&str]) -> String {
    priority
        .iter()
        .filter_map(|lang| map.get(lang).map(|text| wrap_language(lang, text)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_dimensions(dimensions: &DimensionSet) -> String {
    let measures: Vec<String> = dimensions
        .iter()
        .map(|(key, dim)| {
            let label = match key {
                DimensionKey::Unlabeled => "",
                DimensionKey::Framed => "{{en|Framed}}: ",
            };
            format!(
                "{}{{{{Size|unit={}|width={}|height={}|depth={}}}}}",
                label,
                dim.unit,
                dim.width.as_deref().unwrap_or(""),
                dim.height,
                dim.depth.as_deref().unwrap_or("")
            )
        })
        .collect();

    match measures.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        _ => format!("\n* {}", measures.join("\n* ")),
    }
}

/// Depicted persons as an information field
pub fn format_depicted(depicted: &[ReconciledActor]) -> String {
    let linked: Vec<&str> = depicted
        .iter()
        .filter_map(|actor| match actor {
            ReconciledActor::LinkedByEntity { entity_id, .. } => Some(entity_id.as_str()),
            ReconciledActor::LinkedViaFallback { target, .. } => match target {
                LinkTarget::Entity { entity_id, .. } => Some(entity_id.as_str()),
                LinkTarget::Template(template) => Some(template.as_str()),
            },
            ReconciledActor::LinkedByTemplate { template, .. } => Some(template.as_str()),
            ReconciledActor::Unlinked { name, .. } => Some(name.as_str()),
            ReconciledActor::Anonymous => None,
        })
        .collect();

    if linked.is_empty() {
        return String::new();
    }
    format!(
        "{{{{depicted person|{}|style=information field}}}}",
        linked.join("|")
    )
}

/// Description repeated as the original museum caption
pub fn format_original_caption(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }
    format!(
        "{{{{Information field|name={{{{original caption/i18n|header}}}}|value={}}}}}",
        description
    )
}

/// Date field text; the flag is set when the date could not be normalized
pub fn format_date(date: &ParsedDate) -> (String, bool) {
    match date {
        ParsedDate::Normalized(text) => (text.clone(), false),
        ParsedDate::Unparsed { lang, text } => (wrap_language(lang, text), true),
        ParsedDate::Missing => (String::new(), false),
    }
}

/// Map knowledge base type ids to an object type; ambiguity leaves it empty
pub fn resolve_object_type(
    obj_id: &str,
    types: &[String],
    mappings: &BTreeMap<String, String>,
) -> String {
    let mut found: Vec<&str> = types
        .iter()
        .filter_map(|t| mappings.get(t).map(String::as_str))
        .collect();
    found.dedup();

    match found.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        _ => {
            warn!("Found {} matching types for {}", found.len(), obj_id);
            String::new()
        }
    }
}

pub fn find_sub_collection<'a>(
    image: &str,
    sub_collections: &'a [SubCollection],
) -> Option<&'a SubCollection> {
    sub_collections
        .iter()
        .find(|sub| image.starts_with(sub.prefix.as_str()))
}

pub fn format_institution(institution: &str, sub_collection: Option<&SubCollection>) -> String {
    match sub_collection {
        Some(sub) => format!(
            "{}\n |department           = {}",
            institution, sub.link
        ),
        None => institution.to_string(),
    }
}

/// Linked creation places from Swedish `place (country), place` text
pub fn format_creation_place(
    obj_id: &str,
    place: &LangMap,
    mappings: &BTreeMap<String, String>,
) -> String {
    if place.is_empty() {
        return String::new();
    }
    let text = match place.get("sv") {
        Some(text) if place.len() == 1 => text,
        _ => {
            warn!(
                "Found unexpected creation place language for {}: {}",
                obj_id,
                place.languages().collect::<Vec<_>>().join(", ")
            );
            return String::new();
        }
    };

    text.split(", ")
        .filter_map(|p| {
            let name = p.split('(').next().unwrap_or(p).trim();
            mappings.get(name).map(|qid| format!("{{{{city|{}}}}}", qid))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_source(photographer: Option<&str>, collection: &str) -> String {
    match photographer {
        Some(photographer) => format!("{} / {}", photographer, collection),
        None => collection.to_string(),
    }
}

pub fn format_accession_link(obj_id: &str, inv_nr: &str) -> String {
    format!("{{{{Nationalmuseum Stockholm link|{}|{}}}}}", obj_id, inv_nr)
}
