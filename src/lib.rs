pub mod error;
pub mod io;
pub mod kb;
pub mod models;
pub mod parsers;
pub mod render;
pub mod stages;

pub use error::{PipelineError, PipelineResult};
pub use io::{
    RenderedBatch, RenderedRecord, Snapshot, load_image_list, load_overrides, load_snapshot,
    write_diagnostics, write_run_log,
};
pub use kb::{KnowledgeBase, KnowledgeBaseConfig, SparqlClient};
pub use models::{CatalogRecord, Diagnostics, RunLog};
pub use stages::{
    NormalizeConfig, ReconcileConfig, RenderConfig, SelectConfig, execute_stage1, execute_stage3,
    normalize_directory, reconcile_record, render_record,
};
