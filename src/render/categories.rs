use std::collections::BTreeSet;

use crate::models::{MaintenanceIssue, RecordTracker};

use super::fields::SubCollection;

/// Maintenance category suffix for an issue
pub fn issue_category(issue: MaintenanceIssue) -> &'static str {
    match issue {
        MaintenanceIssue::UnlinkedArtist => "check artist",
        MaintenanceIssue::UnlinkedDepicted => "check depicted",
        MaintenanceIssue::DateFormat => "check date",
        MaintenanceIssue::NoKnowledgeEntity => "connect to wikidata item",
    }
}

/// Fixed categories every file gets
#[derive(Debug, Clone)]
pub struct CategoryBase<'a> {
    pub base_category: &'a str,
    pub batch_category: &'a str,
    pub sub_collection: Option<&'a SubCollection>,
}

/// Collect base, content and maintenance categories
pub fn build_categories(
    base: &CategoryBase<'_>,
    tracker: &RecordTracker,
    issues: &BTreeSet<MaintenanceIssue>,
    existing: &[String],
) -> Vec<String> {
    let mut categories = BTreeSet::new();
    categories.insert(base.base_category.to_string());
    categories.insert(base.batch_category.to_string());
    if let Some(sub) = base.sub_collection {
        categories.insert(sub.category.clone());
    }

    let content: BTreeSet<String> = tracker
        .artist_categories
        .iter()
        .chain(&tracker.depicted_categories)
        .chain(existing)
        .filter(|c| !c.is_empty())
        .cloned()
        .collect();

    if content.is_empty() {
        categories.insert(format!("{}: needs categorisation", base.batch_category));
    }
    categories.extend(content);

    for issue in issues {
        categories.insert(format!("{}: {}", base.batch_category, issue_category(*issue)));
    }

    categories.into_iter().collect()
}
