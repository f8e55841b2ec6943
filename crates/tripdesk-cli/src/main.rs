//! Tripdesk CLI - Operator interface for the extraction pipeline
//!
//! Usage:
//!   tripdesk extract <file>       run the full pipeline, print JSON
//!   tripdesk parse <file>         print the normalized parsed text
//!   tripdesk labels               list the entity label inventory

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tripdesk_core::{AppConfig, BioLabel, EntityCategory, LABEL_COUNT};
use tripdesk_extract::Extractor;

#[derive(Parser)]
#[command(name = "tripdesk")]
#[command(about = "Travel quotation extraction pipeline CLI")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (env vars still take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a structured form from a quotation document
    Extract {
        /// Path to the document (txt, xlsx, xls, pdf, docx)
        file: PathBuf,
    },
    /// Print the normalized text a document parses into
    Parse {
        /// Path to the document
        file: PathBuf,
    },
    /// List the entity label inventory
    Labels,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    match cli.command {
        Commands::Extract { file } => {
            tracing::info!(file = %file.display(), "starting extraction");
            let extractor = Arc::new(Extractor::new(config));
            let result = extractor.extract_with_timeout(file).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Parse { file } => {
            print!("{}", tripdesk_parser::parse_file(&file));
        }
        Commands::Labels => {
            println!("{LABEL_COUNT} labels, {} categories", EntityCategory::all().len());
            println!("O");
            for category in EntityCategory::all() {
                println!("{}", BioLabel::Begin(*category));
                println!("{}", BioLabel::Inside(*category));
            }
        }
    }

    Ok(())
}
