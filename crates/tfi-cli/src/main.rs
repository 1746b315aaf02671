mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tfi_analyzer::{analyze, classify, EmbeddingBackend};
use tfi_core::{load_app_config_from_env, load_table, EmbedderKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tfi-cli")]
#[command(about = "Training feedback intelligence command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full analysis on a survey export and print a report
    Analyze {
        /// CSV/TSV file or spreadsheet (xlsx, xls, ods, ...)
        path: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the embedding backend from `TFI_EMBEDDER`
        #[arg(long, value_enum)]
        embedder: Option<EmbedderArg>,
    },
    /// Show how each column would be classified
    Classify {
        /// CSV/TSV file or spreadsheet
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmbedderArg {
    Tei,
    Hashing,
}

impl From<EmbedderArg> for EmbedderKind {
    fn from(arg: EmbedderArg) -> Self {
        match arg {
            EmbedderArg::Tei => EmbedderKind::Tei,
            EmbedderArg::Hashing => EmbedderKind::Hashing,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();
    run(cli).await
}

/// `RUST_LOG` wins; otherwise `TFI_LOG_LEVEL`, and `info` when that is unset or unparsable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("TFI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Analyze {
            path,
            format,
            out,
            embedder,
        }) => run_analyze(&path, format, out.as_deref(), embedder).await,
        Some(Commands::Classify { path }) => run_classify(&path),
        None => {
            println!("tfi-cli: run `tfi-cli analyze <PATH>` or `tfi-cli --help`");
            Ok(())
        }
    }
}

/// Loads the embedding configuration; `classify` never reads it.
async fn run_analyze(
    path: &Path,
    format: OutputFormat,
    out: Option<&Path>,
    embedder: Option<EmbedderArg>,
) -> anyhow::Result<()> {
    let mut config = load_app_config_from_env().context("failed to load configuration")?;
    if let Some(kind) = embedder {
        config.embedder = kind.into();
    }
    tracing::debug!(env = %config.env, embedder = %config.embedder, "configuration loaded");

    let table = load_table(path).with_context(|| format!("failed to load {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.row_count(),
        "survey loaded"
    );

    let backend = EmbeddingBackend::from_config(&config)?;
    let report = analyze(&table, &backend)
        .await
        .context("analysis failed")?;

    let rendered = match format {
        OutputFormat::Markdown => {
            report::render_markdown(&report, &path.display().to_string(), Utc::now())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match out {
        Some(out_path) => {
            std::fs::write(out_path, rendered)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            println!("report written to {}", out_path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_classify(path: &Path) -> anyhow::Result<()> {
    let table = load_table(path).with_context(|| format!("failed to load {}", path.display()))?;
    let partition = classify(table.columns());
    print!("{}", report::render_partition(&partition));
    Ok(())
}
