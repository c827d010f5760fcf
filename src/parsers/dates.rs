use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CreationDate;

static FILLER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:signerad och daterad|signerad|daterad|utförd|målad|dated|executed)\s+")
        .expect("valid filler regex")
});

static BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:mellan|between)\s+(ca\.?\s+)?(\d{3,4})\s+(?:och|and)\s+(?:ca\.?\s+)?(\d{3,4})$",
    )
    .expect("valid between regex")
});

static EXACT: Lazy<Regex> =
    Lazy::new(|| {
        Regex::new(r"^\d{3,4}(?:-(?:0[1-9]|1[0-2])(?:-\d{2})?)?$").expect("valid exact regex")
    });

static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3,4})\s*[-–]\s*(\d{2,4})$").expect("valid range regex")
});

static CIRCA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:ca\.?|c\.|circa|omkring)\s*(\d{3,4})$").expect("valid circa regex")
});

static CIRCA_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:ca\.?|c\.|circa|omkring)\s*(\d{3,4})\s*[-–]\s*(\d{2,4})$")
        .expect("valid circa range regex")
});

static PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{3,4})-tal(?:et)?$").expect("valid period regex"));

/// Result of interpreting a record's creation date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDate {
    /// Date ready for the date field
    Normalized(String),
    /// Display text that could not be normalized, with its language
    Unparsed { lang: String, text: String },
    Missing,
}

/// Interpret a creation date
///
/// Equal earliest/latest values win outright. Otherwise the display text
/// (first by language priority) is cleaned and normalized; if there is no
/// display text an earliest/latest pair is used as a plain range.
pub fn parse_creation_date(date: &CreationDate, language_priority: &[&str]) -> ParsedDate {
    if let (Some(earliest), Some(latest)) = (&date.earliest, &date.latest) {
        if earliest == latest {
            return ParsedDate::Normalized(earliest.clone());
        }
    }

    let (lang, text) = match date.text.first_by_priority(language_priority) {
        Some(found) => found,
        None => {
            return match (&date.earliest, &date.latest) {
                (Some(earliest), Some(latest)) => {
                    ParsedDate::Normalized(format!("{{{{other date|-|{}|{}}}}}", earliest, latest))
                }
                (Some(single), None) | (None, Some(single)) => {
                    ParsedDate::Normalized(single.clone())
                }
                (None, None) => ParsedDate::Missing,
            };
        }
    };

    let cleaned = rewrite_between(strip_filler(text.trim()));
    match normalize_date_range(&cleaned) {
        Some(normalized) => ParsedDate::Normalized(normalized),
        None => ParsedDate::Unparsed {
            lang: lang.to_string(),
            text: text.to_string(),
        },
    }
}

fn strip_filler(text: &str) -> &str {
    match FILLER_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Rewrite "mellan (ca) Y och Y" into "(ca) Y-Y"
fn rewrite_between(text: &str) -> String {
    match BETWEEN.captures(text) {
        Some(caps) => {
            let circa = if caps.get(1).is_some() { "ca " } else { "" };
            format!("{}{}-{}", circa, &caps[2], &caps[3])
        }
        None => text.to_string(),
    }
}

/// Expand a shortened range end, e.g. 1650-55 -> 1655
fn expand_range_end(start: &str, end: &str) -> String {
    if end.len() < start.len() {
        format!("{}{}", &start[..start.len() - end.len()], end)
    } else {
        end.to_string()
    }
}

fn circa(year: &str) -> String {
    format!("{{{{other date|ca|{}}}}}", year)
}

/// Normalize a free-text date or date range into a date field value
pub fn normalize_date_range(text: &str) -> Option<String> {
    let text = text.trim();

    if EXACT.is_match(text) {
        return Some(text.to_string());
    }

    if let Some(caps) = RANGE.captures(text) {
        let end = expand_range_end(&caps[1], &caps[2]);
        return Some(format!("{{{{other date|-|{}|{}}}}}", &caps[1], end));
    }

    if let Some(caps) = CIRCA.captures(text) {
        return Some(circa(&caps[1]));
    }

    if let Some(caps) = CIRCA_RANGE.captures(text) {
        let end = expand_range_end(&caps[1], &caps[2]);
        return Some(format!(
            "{{{{other date|-|{}|{}}}}}",
            circa(&caps[1]),
            circa(&end)
        ));
    }

    if let Some(caps) = PERIOD.captures(text) {
        let year: u32 = caps[1].parse().ok()?;
        if year % 100 == 0 {
            return Some(format!("{{{{other date|century|{}}}}}", year / 100 + 1));
        }
        if year % 10 == 0 {
            return Some(format!("{{{{other date|decade|{}}}}}", year));
        }
        return None;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LangMap;

    const PRIORITY: &[&str] = &["_", "en", "sv"];

    fn date(earliest: Option<&str>, latest: Option<&str>, sv: Option<&str>) -> CreationDate {
        let mut text = LangMap::new();
        if let Some(sv) = sv {
            text.insert("sv", sv);
        }
        CreationDate {
            earliest: earliest.map(str::to_string),
            latest: latest.map(str::to_string),
            text,
        }
    }

    #[test]
    fn test_equal_bounds_win() {
        let parsed = parse_creation_date(&date(Some("1650"), Some("1650"), Some("ca 1650")), PRIORITY);
        assert_eq!(parsed, ParsedDate::Normalized("1650".to_string()));
    }

    #[test]
    fn test_between_pattern() {
        let parsed = parse_creation_date(
            &date(Some("1650"), Some("1660"), Some("mellan ca 1650 och 1660")),
            PRIORITY,
        );
        assert_eq!(
            parsed,
            ParsedDate::Normalized(
                "{{other date|-|{{other date|ca|1650}}|{{other date|ca|1660}}}}".to_string()
            )
        );
    }

    #[test]
    fn test_filler_prefix_stripped() {
        let parsed = parse_creation_date(
            &date(Some("1650"), Some("1655"), Some("Utförd 1650-55")),
            PRIORITY,
        );
        assert_eq!(
            parsed,
            ParsedDate::Normalized("{{other date|-|1650|1655}}".to_string())
        );
    }

    #[test]
    fn test_unparsed_keeps_language() {
        let parsed = parse_creation_date(
            &date(Some("1650"), Some("1699"), Some("senare hälften av 1600-talet")),
            PRIORITY,
        );
        assert_eq!(
            parsed,
            ParsedDate::Unparsed {
                lang: "sv".to_string(),
                text: "senare hälften av 1600-talet".to_string()
            }
        );
    }

    #[test]
    fn test_periods() {
        assert_eq!(
            normalize_date_range("1600-talet"),
            Some("{{other date|century|17}}".to_string())
        );
        assert_eq!(
            normalize_date_range("1650-tal"),
            Some("{{other date|decade|1650}}".to_string())
        );
    }

    #[test]
    fn test_missing_text_uses_bounds() {
        let parsed = parse_creation_date(&date(Some("1650"), Some("1660"), None), PRIORITY);
        assert_eq!(
            parsed,
            ParsedDate::Normalized("{{other date|-|1650|1660}}".to_string())
        );
        assert_eq!(parse_creation_date(&date(None, None, None), PRIORITY), ParsedDate::Missing);
    }
}
