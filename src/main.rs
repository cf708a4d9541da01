use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use escrow_indexer_rs::db::{JsonLinesStore, MemoryStore, RecordStore};
use escrow_indexer_rs::transformations::{CollectingSink, MappingEngine, TracingSink};
use escrow_indexer_rs::types::config::MapperConfig;

const DEFAULT_CONFIG_PATH: &str = "config/config.json";

fn config_path(args: &[String]) -> anyhow::Result<PathBuf> {
    match args.iter().position(|a| a == "--config") {
        Some(i) => args
            .get(i + 1)
            .map(PathBuf::from)
            .context("--config requires a path"),
        None => Ok(PathBuf::from(DEFAULT_CONFIG_PATH)),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let config = MapperConfig::load(&config_path(&args)?)?;

    let envelope = std::fs::read(&config.envelope_path).with_context(|| {
        format!(
            "failed to read envelope {}",
            config.envelope_path.display()
        )
    })?;

    if dry_run {
        tracing::info!("Running in dry-run mode (records are not written)");
        return dry_run_envelope(&envelope);
    }

    let mut engine = MappingEngine::new(TracingSink);
    match &config.output_path {
        Some(path) => {
            let mut store = JsonLinesStore::new(BufWriter::new(create_output(path)?));
            process(&mut engine, &envelope, &mut store)?;
            tracing::info!("Wrote {} records to {}", store.written(), path.display());
        }
        None => {
            let mut store = JsonLinesStore::new(io::stdout().lock());
            process(&mut engine, &envelope, &mut store)?;
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

fn process(
    engine: &mut MappingEngine<TracingSink>,
    envelope: &[u8],
    store: &mut dyn RecordStore,
) -> anyhow::Result<()> {
    engine
        .process(envelope, store)
        .context("envelope processing failed")?;
    Ok(())
}

/// Map into memory and print skip diagnostics to stdout.
fn dry_run_envelope(envelope: &[u8]) -> anyhow::Result<()> {
    let mut engine = MappingEngine::new(CollectingSink::new());
    let mut store = MemoryStore::new();
    let summary = engine
        .process(envelope, &mut store)
        .context("envelope processing failed")?;

    for message in engine.sink().messages() {
        println!("skipped: {}", message);
    }
    for (kind, count) in &summary.per_kind {
        println!("{}: {}", kind, count);
    }
    println!(
        "{} entries, {} records, {} skipped, {} unrecognized",
        summary.entries,
        store.len(),
        summary.skipped,
        summary.unrecognized
    );

    Ok(())
}
