use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};

use zrapor_core::{ReportStatus, ZReport};
use zrapor_extract::{ExtractConfig, ZReportExtractor};

mod export;
mod input;

/// Batch extraction of daily figures from recognized Z-report token streams.
#[derive(Parser, Debug)]
#[command(name = "zrapor", version, about)]
struct Args {
    /// Recognizer output files (JSON token streams), or directories of them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Destination CSV, one row per receipt in input order.
    #[arg(short, long, default_value = "zrapor.csv")]
    output: PathBuf,

    /// TOML file overriding the extraction defaults (keywords, tolerances).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExtractConfig::from_toml_file(path).expect("Failed to load config file"),
        None => ExtractConfig::default(),
    };
    let extractor = Arc::new(ZReportExtractor::new(config));

    let files = collect_inputs(&args.inputs);
    if files.is_empty() {
        warn!("No input files found");
    }

    // ── Extraction fan-out ────────────────────────────────────────────────────
    // One task per receipt — the engine is stateless across images, so the
    // batch needs no ordering dependency or shared lock. Results carry their
    // batch position so the CSV keeps input order.
    let (tx, mut rx) = mpsc::channel::<(usize, ZReport)>(64);

    for (index, path) in files.iter().cloned().enumerate() {
        let extractor = Arc::clone(&extractor);
        let tx = tx.clone();
        tokio::spawn(async move {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            let record = match input::read_tokens(&path) {
                Ok(tokens) => {
                    info!("Processing {}: {} tokens", path.display(), tokens.len());
                    extractor.extract(&name, &tokens)
                }
                Err(e) => {
                    warn!("Unreadable token stream {}: {e}", path.display());
                    ZReport::empty(name)
                }
            };
            let _ = tx.send((index, record)).await;
        });
    }
    drop(tx);

    let mut indexed = Vec::with_capacity(files.len());
    while let Some(item) = rx.recv().await {
        indexed.push(item);
    }
    indexed.sort_by_key(|(i, _)| *i);
    let records: Vec<ZReport> = indexed.into_iter().map(|(_, r)| r).collect();

    let passed = records
        .iter()
        .filter(|r| r.status == ReportStatus::Pass)
        .count();
    info!(
        "Extracted {} records ({} pass, {} for review)",
        records.len(),
        passed,
        records.len() - passed
    );

    export::write_csv(&args.output, &records).expect("Failed to write CSV");
    info!("Wrote {}", args.output.display());
}

/// Expand directories into their `.json` members, sorted; keep plain files
/// as given.
fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in inputs {
        if path.is_dir() {
            let mut batch: Vec<PathBuf> = std::fs::read_dir(path)
                .map(|entries| {
                    entries
                        .flatten()
                        .map(|e| e.path())
                        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                        .collect()
                })
                .unwrap_or_default();
            batch.sort();
            files.extend(batch);
        } else {
            files.push(path.clone());
        }
    }
    files
}
