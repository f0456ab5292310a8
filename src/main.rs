use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use cinqueterre::documents::{is_valid, render_prompt};
use cinqueterre::logging::{self, Verbosity};
use cinqueterre::storage::{document_path, load_document};
use cinqueterre::summary::{record_noun, write_summary};
use cinqueterre::{AnthropicClient, CinqueTerreConfig, CinqueTerreError, DocumentKind, Fetcher};

#[derive(Parser)]
#[command(
    name = "cinqueterre",
    version,
    about = "Fetch structured travel data for Riomaggiore, Cinque Terre"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only log errors and skip progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the model for a document, validate it and save it
    Fetch {
        /// Document kind to fetch
        #[arg(value_enum)]
        kind: DocumentKind,

        /// Directory the document is written to
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Model to use instead of the configured one
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Print the summary of a saved document
    Show {
        /// Document kind of the file
        #[arg(value_enum)]
        kind: DocumentKind,

        /// Document to read (defaults to the file in the output directory)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print the prompt that would be sent, without calling the API
    Prompt {
        /// Document kind
        #[arg(value_enum)]
        kind: DocumentKind,
    },
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CinqueTerreConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging, cli.verbosity());
    debug!("Loaded configuration: model {}", config.anthropic.model);

    let result = match &cli.command {
        Commands::Fetch {
            kind,
            output_dir,
            model,
        } => {
            let outcome = fetch(&config, *kind, output_dir.as_deref(), model.clone(), cli.quiet).await;
            if let Err(e) = &outcome {
                eprintln!();
                eprintln!("✗ Failed to fetch or validate {} data", kind.label());
                eprintln!("  Error: {}", describe(e));
                return ExitCode::FAILURE;
            }
            outcome
        }
        Commands::Show { kind, file } => show(&config, *kind, file.as_deref()),
        Commands::Prompt { kind } => {
            println!("{}", render_prompt(*kind, &config.defaults.location));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Prefer the friendly message when the failure came from the library
fn describe(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CinqueTerreError>() {
        Some(e) => e.user_message(),
        None => format!("{error:#}"),
    }
}

async fn fetch(
    config: &CinqueTerreConfig,
    kind: DocumentKind,
    output_dir: Option<&Path>,
    model: Option<String>,
    quiet: bool,
) -> Result<()> {
    let output_dir = output_dir.unwrap_or(config.output.directory.as_path());
    let client = AnthropicClient::new(config)?;

    let mut fetcher = Fetcher::from_config(client, config);
    if let Some(model) = model {
        fetcher = fetcher.with_model(model);
    }

    if !quiet {
        println!("Fetching {} data with web search...", kind.label());
        println!("Location: {}", fetcher.location());
        println!("Model: {}", fetcher.model());
        println!("This may take a few minutes.");
    }

    let outcome = fetcher.run(kind, output_dir).await?;

    if !quiet {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_summary(kind, &outcome.document, &mut out)?;
        writeln!(out)?;
        writeln!(out, "✓ Successfully saved {} {}", outcome.records, record_noun(kind))?;
        writeln!(out, "  File: {}", outcome.path.display())?;
    }
    Ok(())
}

fn show(config: &CinqueTerreConfig, kind: DocumentKind, file: Option<&Path>) -> Result<()> {
    let path = file.map_or_else(
        || document_path(&config.output.directory, kind),
        Path::to_path_buf,
    );
    let document = load_document(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if !is_valid(kind, &document) {
        warn!("{} does not look like a complete {} document", path.display(), kind);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(kind, &document, &mut out)?;
    Ok(())
}
