use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};

use ftbq_keygen::{discovery, lang, parallel_processing, KeygenConfig};

#[derive(Parser, Debug)]
#[command(name = "ftbq-keygen")]
#[command(about = "Generate localization keys for FTB Quests")]
#[command(version)]
struct Args {
    /// Path to the ftbquests folder
    #[arg(short, long)]
    folder: PathBuf,

    /// Show detailed processing log
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .init();

    info!(?args, "Parsed CLI arguments");

    // nothing may be touched when the folder is unusable
    discovery::validate_root(&args.folder)?;

    let config = KeygenConfig::default();
    let discovery_config = discovery::DiscoveryConfig {
        extension: config.extension.clone(),
        ..discovery::DiscoveryConfig::default()
    };

    let discovered = discovery::discover_files_async(&args.folder, discovery_config).await?;
    info!("Found {} files to process.", discovered.files.len());
    for walk_error in &discovered.walk_errors {
        error!("Could not search: {}", walk_error);
    }

    let file_count = discovered.files.len();
    let report = parallel_processing::process_files_parallel(discovered.files, &config).await?;

    // files that succeeded already reference their keys, so the table is
    // written even when some siblings failed
    lang::write_lang_file(&config.output_path, &report.tables.lang)?;

    info!("ALL Done!");
    info!("Processed {} files.", report.files_processed);
    info!("Total unique keys: {}", report.unique_keys());
    info!("Total character count: {}", report.total_chars());

    let mut problems = Vec::new();
    if !report.is_success() {
        problems.push(format!("{} of {} files failed", report.files_failed(), file_count));
    }
    if !discovered.walk_errors.is_empty() {
        problems.push(format!("{} entries could not be searched", discovered.walk_errors.len()));
    }
    if !problems.is_empty() {
        anyhow::bail!("{}", problems.join("; "));
    }

    Ok(())
}
