use std::path::Path;

use crate::models::{CatalogRecord, Qualifier};

/// Creators fit for the filename: named and either unqualified or only
/// attributed
pub fn named_creators(record: &CatalogRecord) -> Vec<&str> {
    record
        .creators
        .values()
        .filter(|c| matches!(c.qualifier, None | Some(Qualifier::AttributedTo)))
        .filter_map(|c| c.name.as_deref())
        .collect()
}

/// Title by language priority followed by the named creators, falling back
/// to the inventory number and then the object id
pub fn filename_description(record: &CatalogRecord, priority: &[&str]) -> String {
    let title = record.title.first_by_priority(priority).map(|(_, t)| t);
    let creators = named_creators(record).join(" & ");

    match (title, creators.is_empty()) {
        (Some(title), false) => format!("{} ({})", title, creators),
        (Some(title), true) => title.to_string(),
        (None, false) => creators,
        (None, true) if !record.inv_nr.is_empty() => record.inv_nr.clone(),
        (None, true) => record.obj_id.clone(),
    }
}

/// Replace characters that are not allowed in page titles and tidy spacing
pub fn clean_page_title(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '[' | '{' | '<' => '(',
            ']' | '}' | '>' => ')',
            '#' | '|' | '/' | '\\' | ':' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();

    replaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', ' '])
        .to_string()
}

/// Shorten to at most `max_chars`, cutting at a word boundary when possible
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    cut.trim_end_matches([' ', ',', '.', '-', '&', '(']).to_string()
}

/// `{description} - {collection} - {obj_id}.{ext}`, without the leading part
/// when the description cleans down to nothing
pub fn format_filename(
    description: &str,
    collection: &str,
    obj_id: &str,
    image: &str,
    max_chars: usize,
) -> String {
    let description = truncate_description(&clean_page_title(description), max_chars);
    let base = if description.is_empty() {
        format!("{} - {}", collection, obj_id)
    } else {
        format!("{} - {} - {}", description, collection, obj_id)
    };
    match Path::new(image).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", base, ext),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActorId, ActorRef, CatalogRecordBuilder};

    const PRIORITY: &[&str] = &["_", "en", "sv"];

    fn record() -> CatalogRecord {
        let mut builder = CatalogRecordBuilder::new("17.xml");
        builder.obj_id = Some("17".to_string());
        builder.inv_nr = Some("NM 1234".to_string());
        builder.title.insert("sv", "Flicka med katt");
        builder.title.insert("en", "Girl with cat");
        builder.add_creator(ActorRef::new(
            ActorId::Nsid("1".to_string()),
            Some("Carl Larsson".to_string()),
        ));
        builder.add_creator(
            ActorRef::new(ActorId::Nsid("2".to_string()), Some("Anders Zorn".to_string()))
                .with_qualifier(Some(Qualifier::AttributedTo)),
        );
        builder.add_creator(
            ActorRef::new(ActorId::Nsid("3".to_string()), Some("Rubens".to_string()))
                .with_qualifier(Some(Qualifier::SchoolOf)),
        );
        builder.add_creator(ActorRef::new(ActorId::Nsid("4".to_string()), None));
        builder.build().unwrap()
    }

    #[test]
    fn test_filename_description() {
        assert_eq!(
            filename_description(&record(), PRIORITY),
            "Girl with cat (Carl Larsson & Anders Zorn)"
        );
    }

    #[test]
    fn test_description_without_title() {
        let mut record = record();
        record.title = Default::default();
        record.creators.clear();
        assert_eq!(filename_description(&record, PRIORITY), "NM 1234");

        record.inv_nr.clear();
        assert_eq!(filename_description(&record, PRIORITY), "17");
    }

    #[test]
    fn test_empty_description_has_no_leading_separator() {
        assert_eq!(
            format_filename(" . ", "Nationalmuseum", "17", "NM 1234.tif", 100),
            "Nationalmuseum - 17.tif"
        );
    }

    #[test]
    fn test_clean_page_title() {
        assert_eq!(clean_page_title("Porträtt [kopia] #2 / skiss."), "Porträtt (kopia) -2 - skiss");
        assert_eq!(clean_page_title("  a\n b  "), "a b");
    }

    #[test]
    fn test_format_filename() {
        assert_eq!(
            format_filename("Girl with cat (Carl Larsson)", "Nationalmuseum", "17", "NM 1234.tif", 100),
            "Girl with cat (Carl Larsson) - Nationalmuseum - 17.tif"
        );
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("one two three", 9), "one two");
        assert_eq!(truncate_description("short", 9), "short");
    }
}
