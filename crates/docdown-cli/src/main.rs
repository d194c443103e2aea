//! docdown command-line interface

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docdown::api::{ApiState, fetch_url};
use docdown::{ConversionOutcome, Converter, ResolvedType, ServiceConfig, SourceHints, resolve_hints};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SERVE_LOG_FILTER: &str = "info,docdown=debug";
const COMMAND_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "docdown")]
#[command(about = "Detect document types and convert them to Markdown", long_about = None, version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP conversion service
    Serve {
        /// Interface to bind
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a docdown.toml (discovered from the current directory if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert a local file or an http(s) URL to Markdown on stdout
    Convert {
        /// File path or URL
        input: String,

        /// Declared MIME type, overriding any other hint
        #[arg(short, long)]
        mime: Option<String>,

        /// Path to a docdown.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the full result with metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved MIME type and extension of a file as JSON
    Detect {
        path: PathBuf,

        /// Declared MIME type
        #[arg(short, long)]
        mime: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => SERVE_LOG_FILTER,
        _ => COMMAND_LOG_FILTER,
    };
    init_tracing(default_filter);

    match cli.command {
        Commands::Serve { host, port, config } => {
            let mut config = ServiceConfig::load(config.as_deref()).context("Failed to load configuration")?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.validate()?;

            docdown::api::serve(config).await?;
            Ok(())
        }

        Commands::Convert {
            input,
            mime,
            config,
            json,
        } => {
            let config = ServiceConfig::load(config.as_deref()).context("Failed to load configuration")?;
            let outcome = convert_input(config, &input, mime).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.markdown);
            }
            Ok(())
        }

        Commands::Detect { path, mime } => {
            let resolved = detect_file(&path, mime).await?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_remote(input: &str) -> bool {
    let lowered = input.trim_start().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

async fn convert_input(config: ServiceConfig, input: &str, mime: Option<String>) -> Result<ConversionOutcome> {
    if is_remote(input) {
        let state = ApiState::new(config)?;
        let fetched = fetch_url(&state.http, input, state.config.max_upload_bytes)
            .await
            .with_context(|| format!("Failed to fetch {}", input))?;

        let hints = override_mime(fetched.hints, mime);
        let resolved = resolve_hints(&fetched.content, &hints);
        tracing::debug!(resolved = %resolved, "Resolved remote content");
        return Ok(state.converter.convert(&fetched.content, &resolved).await?);
    }

    let path = Path::new(input);
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let hints = override_mime(SourceHints::new().with_origin(input), mime);
    let resolved = resolve_hints(&content, &hints);
    tracing::debug!(resolved = %resolved, "Resolved local file");

    let converter = Converter::with_defaults(&config.converter);
    Ok(converter.convert(&content, &resolved).await?)
}

async fn detect_file(path: &Path, mime: Option<String>) -> Result<ResolvedType> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let hints = override_mime(SourceHints::new().with_origin(path.to_string_lossy()), mime);
    Ok(resolve_hints(&content, &hints))
}

fn override_mime(hints: SourceHints, mime: Option<String>) -> SourceHints {
    match mime {
        Some(mime) => hints.with_mime(mime),
        None => hints,
    }
}
