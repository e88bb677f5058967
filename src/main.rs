// src/main.rs
mod extractors;
mod server;
mod storage;
mod utils;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use extractors::ReportExtractor;
use server::ServerConfig;
use storage::StorageManager;
use utils::error::StorageError;
use utils::AppError;

/// Extracts audit findings from report text using its table of contents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Default log filter when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract records from a TOC file and a body text file
    Extract {
        /// File holding the table of contents text
        #[arg(long)]
        toc: PathBuf,

        /// File holding the extracted body text of the report
        #[arg(long)]
        text: PathBuf,

        /// Write results and metadata files here instead of printing to stdout
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Pretty-print JSON written to stdout
        #[arg(long)]
        pretty: bool,

        /// Debug mode - save the normalized body with located anchors marked
        #[arg(short, long)]
        debug: bool,
    },

    /// Serve the JSON extraction API
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = server::DEFAULT_BIND_ADDR)]
        bind: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = server::DEFAULT_PORT)]
        port: u16,

        /// Maximum request body size in bytes
        #[arg(long, env = "BODY_LIMIT", default_value_t = server::DEFAULT_BODY_LIMIT)]
        body_limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Setup Logging (RUST_LOG overrides --log-level)
    utils::logging::setup_logging(&args.log_level);
    tracing::debug!("Parsed args: {:?}", args);

    match args.command {
        Command::Extract { toc, text, output_dir, pretty, debug } => {
            run_extract(&toc, &text, output_dir.as_deref(), pretty, debug)
        }
        Command::Serve { bind, port, body_limit } => {
            if body_limit == 0 {
                return Err(AppError::Config("--body-limit must be greater than zero".to_string()));
            }
            server::serve(ServerConfig { bind_addr: bind, port, body_limit }).await
        }
    }
}

fn run_extract(
    toc_path: &Path,
    text_path: &Path,
    output_dir: Option<&Path>,
    pretty: bool,
    debug: bool,
) -> Result<(), AppError> {
    let toc_text = std::fs::read_to_string(toc_path)?;
    let body_text = std::fs::read_to_string(text_path)?;

    if toc_text.trim().is_empty() || body_text.trim().is_empty() {
        return Err(AppError::Config(format!(
            "Both {} and {} must contain text",
            toc_path.display(),
            text_path.display()
        )));
    }

    if debug {
        let debug_dir = output_dir.unwrap_or(Path::new(".")).join("debug");
        match utils::segment_debug::create_segment_debug(&toc_text, &body_text, &debug_dir) {
            Ok(paths) => tracing::info!("Wrote {} debug files to {}", paths.len(), debug_dir.display()),
            Err(e) => tracing::warn!("Failed to write debug files: {}", e),
        }
    }

    let extraction = ReportExtractor::new().extract(&toc_text, &body_text)?;

    match output_dir {
        Some(dir) => {
            let storage = StorageManager::new(dir)?;
            let stem = text_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("report");

            let results_path = storage.save_results(stem, &extraction)?;
            tracing::info!("Saved {} records to: {}", extraction.records.len(), results_path.display());

            match storage.save_metadata(stem, &extraction, toc_path, text_path) {
                Ok(path) => tracing::info!("Saved run metadata to: {}", path.display()),
                Err(e) => tracing::error!("Failed to save run metadata: {}", e),
            }
        }
        None => {
            let body = serde_json::json!({
                "results": extraction.records,
                "skipped": extraction.skipped,
            });
            let rendered = if pretty {
                serde_json::to_string_pretty(&body)
            } else {
                serde_json::to_string(&body)
            }
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
            println!("{}", rendered);
        }
    }

    if !extraction.skipped.is_empty() {
        tracing::warn!("{} TOC entries could not be located in the body text", extraction.skipped.len());
    }

    Ok(())
}
