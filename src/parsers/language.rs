use tracing::warn;

use crate::models::{LangMap, UNTAGGED_LANG};

/// A possibly language-tagged text value from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedValue {
    pub lang: Option<String>,
    pub text: String,
}

impl TaggedValue {
    pub fn new(lang: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            lang: lang.filter(|l| !l.is_empty()).map(str::to_string),
            text: text.into(),
        }
    }
}

/// Collect language-tagged values into a [`LangMap`]
///
/// Empty values are skipped. When a language repeats with a different value
/// the conflict is logged and the newest value is kept.
pub fn collect_lang_values(values: impl IntoIterator<Item = TaggedValue>) -> LangMap {
    let mut result = LangMap::new();

    for value in values {
        let text = value.text.trim();
        if text.is_empty() {
            continue;
        }
        let lang = value.lang.unwrap_or_else(|| UNTAGGED_LANG.to_string());

        if let Some(previous) = result.get(&lang) {
            if previous != text {
                warn!(
                    "Found double entries for the same language ({}): {} <-> {}",
                    lang, text, previous
                );
            }
        }
        result.insert(lang, text);
    }

    result
}
