use tracing::warn;

use crate::error::PipelineError;
use crate::models::{Dimension, DimensionKey, DimensionSet, RunLog};

/// Units accepted in measurement strings
const RECOGNISED_UNITS: &[&str] = &["cm", "mm"];

/// Measurement prefixes that carry no dimension data of interest
const SKIPPED_PREFIXES: &[&str] = &[
    "Vikt",
    "Trpram",
    "Spännram",
    "Montering",
    "Yttermått",
    "Rymd",
    "Passepartout",
];

/// Outcome of parsing a single measurement string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionOutcome {
    Parsed(DimensionKey, Dimension),
    /// Known but irrelevant prefix
    Ignored,
    Rejected(DimensionRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionRejection {
    UnknownPrefix(String),
    UnknownUnit,
    BadValueCount(usize),
}

fn prefix_key(prefix: &str) -> Option<DimensionKey> {
    match prefix {
        "_" | "Mått" => Some(DimensionKey::Unlabeled),
        "Ram" => Some(DimensionKey::Framed),
        _ => None,
    }
}

fn is_unit(token: &str) -> bool {
    RECOGNISED_UNITS.contains(&token)
}

/// Parse `<prefix> <h>[x<w>[x<d>]] <unit>`
pub fn parse_dimension(measurement: &str) -> DimensionOutcome {
    let mut parts: Vec<&str> = measurement.split_whitespace().collect();
    if parts.is_empty() {
        return DimensionOutcome::Ignored;
    }

    // a numeric first part means there is no prefix
    if parts[0].starts_with(|c: char| c.is_ascii_digit()) {
        parts.insert(0, "_");
    }

    let prefix = parts[0].trim_end_matches(':');
    let key = match prefix_key(prefix) {
        Some(key) => key,
        None if SKIPPED_PREFIXES.contains(&prefix) => return DimensionOutcome::Ignored,
        None => {
            return DimensionOutcome::Rejected(DimensionRejection::UnknownPrefix(
                prefix.to_string(),
            ));
        }
    };

    // unit out of place: retry assuming one, two, then three values
    if !parts.last().is_some_and(|p| is_unit(p)) {
        match [2usize, 4, 6]
            .into_iter()
            .find(|&i| parts.get(i).is_some_and(|p| is_unit(p)))
        {
            Some(unit_index) => parts.truncate(unit_index + 1),
            None => return DimensionOutcome::Rejected(DimensionRejection::UnknownUnit),
        }
    }

    let unit = parts[parts.len() - 1];
    let joined = parts[1..parts.len() - 1]
        .concat()
        .replace(',', ".")
        .replace('×', "x");
    let values: Vec<&str> = joined.split('x').collect();

    if values.is_empty() || values.len() > 3 || values.iter().any(|v| v.is_empty()) {
        return DimensionOutcome::Rejected(DimensionRejection::BadValueCount(values.len()));
    }

    DimensionOutcome::Parsed(
        key,
        Dimension {
            unit: unit.to_string(),
            height: values[0].to_string(),
            width: values.get(1).map(|v| v.to_string()),
            depth: values.get(2).map(|v| v.to_string()),
        },
    )
}

/// Parse every display measurement of a record into a dimension set
///
/// A repeated key keeps the first occurrence. Unknown prefixes and units go
/// to `log` as vocabulary problems; nothing here aborts the record.
pub fn parse_dimensions<S: AsRef<str>>(
    measurements: &[S],
    source_file: &str,
    log: &mut RunLog,
) -> DimensionSet {
    let mut result = DimensionSet::new();

    for measurement in measurements {
        let measurement = measurement.as_ref();
        match parse_dimension(measurement) {
            DimensionOutcome::Parsed(key, dimension) => {
                if result.contains_key(&key) {
                    warn!(
                        "Reused prefix in measurement for {}: {}",
                        source_file, measurement
                    );
                    continue;
                }
                result.insert(key, dimension);
            }
            DimensionOutcome::Ignored => {}
            DimensionOutcome::Rejected(DimensionRejection::UnknownPrefix(prefix)) => {
                log.record(&PipelineError::UnknownVocabulary {
                    source_file: source_file.to_string(),
                    vocabulary: "measurement prefix".to_string(),
                    value: prefix,
                });
            }
            DimensionOutcome::Rejected(DimensionRejection::UnknownUnit) => {
                log.record(&PipelineError::UnknownVocabulary {
                    source_file: source_file.to_string(),
                    vocabulary: "measurement unit".to_string(),
                    value: measurement.to_string(),
                });
            }
            DimensionOutcome::Rejected(DimensionRejection::BadValueCount(count)) => {
                warn!(
                    "Unexpected formatting ({} values) of measurement for {}: {}",
                    count, source_file, measurement
                );
            }
        }
    }

    result
}
