use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CatalogRecord, Diagnostics, RunLog};

/// Interchange document holding every normalized record of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Records keyed by object id
    pub records: BTreeMap<String, CatalogRecord>,
}

impl Snapshot {
    pub fn new(records: BTreeMap<String, CatalogRecord>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            records,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_pretty_json(path, self)
    }
}

/// Final output for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRecord {
    pub obj_id: String,
    /// Original image filename on disk
    pub image: String,
    /// Descriptive target filename
    pub filename: String,
    pub text: String,
    pub categories: Vec<String>,
}

/// All rendered records of a run, keyed by original image filename
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedBatch {
    pub records: BTreeMap<String, RenderedRecord>,
}

impl RenderedBatch {
    pub fn insert(&mut self, record: RenderedRecord) {
        self.records.insert(record.image.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_pretty_json(path, &self.records)
    }
}

/// Write the run log as plain text
pub fn write_run_log(log: &RunLog, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    writeln!(file, "{}", log.format())?;
    Ok(())
}

pub fn write_diagnostics(diagnostics: &Diagnostics, path: &Path) -> Result<()> {
    write_pretty_json(path, diagnostics)
}

fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}
