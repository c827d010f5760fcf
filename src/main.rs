use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use lido_artwork::{
    CatalogRecord, KnowledgeBase, KnowledgeBaseConfig, NormalizeConfig, ReconcileConfig, RenderConfig,
    SelectConfig, Snapshot, SparqlClient, execute_stage1, execute_stage3, load_image_list,
    load_overrides, load_snapshot, normalize_directory, write_diagnostics, write_run_log,
};

#[derive(Parser)]
#[command(name = "lido-artwork")]
#[command(author, version, about = "LIDO artwork batch preparation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a directory of LIDO documents into a snapshot
    Preprocess {
        /// Directory containing the LIDO .xml files
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output file for the normalized snapshot (JSON)
        #[arg(short, long, default_value = "processed_lido.json")]
        output: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Reconcile a snapshot against the knowledge base and render file pages
    Render {
        /// Snapshot written by `preprocess`
        #[arg(short, long)]
        records: PathBuf,

        /// Newline-delimited list of image files on disk
        #[arg(short, long)]
        image_files: PathBuf,

        /// JSON map of local actor ids to entity ids
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Base name for the output files (<base>.json, <base>.log, <base>_diagnostics.json)
        #[arg(short, long, default_value = "nationalmuseum_output")]
        base_name: PathBuf,

        /// Skip records without a knowledge base entry
        #[arg(long)]
        skip_non_kb: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a snapshot without querying the knowledge base
    Analyze {
        /// Snapshot written by `preprocess`
        #[arg(short, long)]
        records: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            data_dir,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            preprocess(&data_dir, &output)
        }
        Commands::Render {
            records,
            image_files,
            overrides,
            base_name,
            skip_non_kb,
            verbose,
        } => {
            setup_logging(verbose);
            render(
                &records,
                &image_files,
                overrides.as_deref(),
                &base_name,
                skip_non_kb,
            )
            .await
        }
        Commands::Analyze { records, verbose } => {
            setup_logging(verbose);
            analyze(&records)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// `<base><suffix>` next to the base path
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn preprocess(data_dir: &Path, output: &Path) -> Result<()> {
    info!("Stage 0: Normalizing documents in {:?}", data_dir);
    let result = normalize_directory(data_dir, &NormalizeConfig::default())
        .context("Failed to normalize catalog documents")?;

    let snapshot = Snapshot::new(result.records);
    snapshot.write_json(output)?;
    info!(
        "Snapshot {} with {} records written to {:?}",
        snapshot.run_id,
        snapshot.records.len(),
        output
    );

    let log_path = output.with_extension("log");
    write_run_log(&result.log, &log_path)?;
    info!("{} log entries written to {:?}", result.log.len(), log_path);

    Ok(())
}

async fn render(
    records: &Path,
    image_files: &Path,
    overrides: Option<&Path>,
    base_name: &Path,
    skip_non_kb: bool,
) -> Result<()> {
    info!("Loading snapshot from {:?}", records);
    let snapshot = load_snapshot(records)?;
    let images = load_image_list(image_files)?;
    info!(
        "Loaded {} records and {} image files",
        snapshot.records.len(),
        images.len()
    );

    let client = SparqlClient::new(KnowledgeBaseConfig::from_env())?;
    let mut kb = KnowledgeBase::load(&client).await?;
    if let Some(path) = overrides {
        kb.apply_overrides(&load_overrides(path)?);
    }

    // Stage 1: Selection
    info!("Stage 1: Matching records to images...");
    let select_config = SelectConfig {
        require_knowledge_entity: skip_non_kb,
    };
    let selection = execute_stage1(snapshot.records, &images, &kb, &select_config);

    // Stage 2 & 3: Reconciliation and rendering
    info!("Stage 2: Reconciling and rendering...");
    let result = execute_stage3(
        &selection.selected,
        &kb,
        &ReconcileConfig::default(),
        &RenderConfig::default(),
    );

    let output_path = with_suffix(base_name, ".json");
    result.batch.write_json(&output_path)?;
    info!("{} rendered records written to {:?}", result.batch.len(), output_path);

    let log_path = with_suffix(base_name, ".log");
    write_run_log(&selection.log, &log_path)?;
    info!("Created {:?}", log_path);

    let diagnostics_path = with_suffix(base_name, "_diagnostics.json");
    write_diagnostics(&result.diagnostics, &diagnostics_path)?;
    info!("Created {:?}", diagnostics_path);

    info!(
        "Complete: {} rendered, {} skipped",
        result.batch.len(),
        selection.log.len()
    );

    Ok(())
}

fn count_records(snapshot: &Snapshot, predicate: impl Fn(&CatalogRecord) -> bool) -> usize {
    snapshot.records.values().filter(|r| predicate(r)).count()
}

fn analyze(records: &Path) -> Result<()> {
    info!("Analyzing snapshot from {:?}", records);
    let snapshot = load_snapshot(records)?;

    println!("Snapshot Analysis");
    println!("=================");
    println!("Run: {} ({})", snapshot.run_id, snapshot.created_at);
    println!("Records: {}", snapshot.records.len());
    println!();

    println!("Coverage");
    println!("--------");
    println!("Without title: {}", count_records(&snapshot, |r| r.title.is_empty()));
    println!("Without creators: {}", count_records(&snapshot, |r| r.creators.is_empty()));
    println!("Without images: {}", count_records(&snapshot, |r| r.images.is_empty()));
    println!(
        "With multiple images: {}",
        count_records(&snapshot, |r| r.images.len() > 1)
    );
    println!(
        "Without creation date: {}",
        count_records(&snapshot, |r| r.creation_date.is_empty())
    );
    println!("Without dimensions: {}", count_records(&snapshot, |r| r.dimensions.is_empty()));
    println!();

    let anonymous = snapshot
        .records
        .values()
        .flat_map(|r| r.creators.values())
        .filter(|c| c.name.is_none())
        .count();
    let qualified = snapshot
        .records
        .values()
        .flat_map(|r| r.creators.values())
        .filter(|c| c.qualifier.is_some())
        .count();
    let depicted: usize = snapshot.records.values().map(|r| r.depicted.len()).sum();

    println!("Actors");
    println!("------");
    println!("Anonymous creators: {}", anonymous);
    println!("Qualified creators: {}", qualified);
    println!("Depicted persons: {}", depicted);

    Ok(())
}
