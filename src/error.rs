use thiserror::Error;

/// Errors raised while normalizing, selecting or reconciling catalog records.
///
/// Everything except [`PipelineError::KnowledgeBaseUnavailable`] is recoverable:
/// the affected document or record is skipped and the error lands in the
/// run log.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{source_file}: missing or malformed {path}")]
    SchemaViolation { source_file: String, path: String },

    #[error("{source_file}: malformed XML: {message}")]
    Xml { source_file: String, message: String },

    #[error("multiple files for same object {obj_id}: {duplicate_file} (dropped), {kept_file} (kept)")]
    DuplicateObjectId {
        obj_id: String,
        kept_file: String,
        duplicate_file: String,
    },

    #[error("{obj_id} did not have any associated images in LIDO")]
    NoImage { obj_id: String },

    #[error("{obj_id} did not have any associated images on disk")]
    NoMatchingImage { obj_id: String },

    #[error("{obj_id} had multiple matching images: {}", images.join(", "))]
    MultipleMatchingImages { obj_id: String, images: Vec<String> },

    #[error("{obj_id} did not have any associated knowledge base entry")]
    MissingKnowledgeEntity { obj_id: String },

    #[error("{source_file}: unknown {vocabulary}: {value}")]
    UnknownVocabulary {
        source_file: String,
        vocabulary: String,
        value: String,
    },

    #[error("knowledge base unavailable: {0}")]
    KnowledgeBaseUnavailable(String),
}

impl PipelineError {
    /// Short stable code used as the run log prefix
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::SchemaViolation { .. } => "schema",
            PipelineError::Xml { .. } => "xml",
            PipelineError::DuplicateObjectId { .. } => "duplicate",
            PipelineError::NoImage { .. } => "skip_1",
            PipelineError::NoMatchingImage { .. } => "skip_2",
            PipelineError::MultipleMatchingImages { .. } => "skip_3",
            PipelineError::MissingKnowledgeEntity { .. } => "skip_4",
            PipelineError::UnknownVocabulary { .. } => "vocabulary",
            PipelineError::KnowledgeBaseUnavailable(_) => "kb",
        }
    }

    pub fn schema(source_file: impl Into<String>, path: impl Into<String>) -> Self {
        PipelineError::SchemaViolation {
            source_file: source_file.into(),
            path: path.into(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
