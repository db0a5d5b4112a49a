//! Kapu - Main entrypoint.
//!
//! Loads configuration, initializes logging, builds the moderation gate and
//! checks text against the configured vocabulary.

use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use kapu_lib::config::{
    get_global_config, init_global_config, ConfigLoader, KapuConfig, LogConfig, SourceConfig,
    ENV_PREFIX,
};
use kapu_lib::error::{report_error, set_error_reporter, ErrorContext, TracingErrorReporter};
use kapu_lib::moderation::{ModerationGate, Verdict};

/// Exit status when the checked text is rejected.
const EXIT_REJECTED: i32 = 1;

/// Exit status when no vocabulary could be loaded.
const EXIT_NO_VOCABULARY: i32 = 2;

/// Command line arguments for Kapu.
#[derive(Parser, Debug)]
#[clap(name = "kapu", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Word-list file; replaces the configured sources (repeatable)
    #[clap(long = "vocab", value_parser)]
    vocab: Vec<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Check text against the vocabulary (reads stdin when TEXT is omitted)
    Check {
        /// Text to check
        text: Option<String>,

        /// Print the verdict as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration and load the vocabulary
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_writer(std::io::stderr);

    let result = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("Failed to set global tracing subscriber: {e}"))
}

fn build_gate(config: &KapuConfig) -> ModerationGate {
    match ModerationGate::from_config(&config.vocabulary, &config.matching) {
        Ok(gate) => gate,
        Err(e) => {
            report_error(
                &ErrorContext::new(e, "moderation").with_details("initial vocabulary load"),
            );
            process::exit(EXIT_NO_VOCABULARY);
        }
    }
}

fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            Ok(buffer)
        }
    }
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::GenConfig { output } = &args.command {
        let toml = KapuConfig::default().to_toml_string()?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(output, toml)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Default configuration written to {}", output.display());
        return Ok(());
    }

    let mut config = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX)
        .load()
        .context("Failed to load configuration")?;
    if !args.vocab.is_empty() {
        config.vocabulary.sources = args
            .vocab
            .iter()
            .cloned()
            .map(SourceConfig::from_path)
            .collect();
    }

    init_logging(&config.log)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    init_global_config(config);
    let config = get_global_config().ok_or_else(|| anyhow!("Global configuration not set"))?;

    match args.command {
        Command::Check { text, json } => {
            let gate = build_gate(&config);
            let verdict = gate.check(read_text(text)?);

            if json {
                println!("{}", serde_json::to_string(&verdict)?);
            } else {
                match &verdict {
                    Verdict::Accepted => println!("accepted"),
                    Verdict::Rejected { term } => println!("rejected: {term}"),
                }
            }

            if verdict.is_rejected() {
                process::exit(EXIT_REJECTED);
            }
            Ok(())
        }
        Command::Validate => {
            let gate = build_gate(&config);
            info!(sources = ?gate.source_names(), "Configuration validated successfully");
            println!(
                "ok: {} patterns from {} sources",
                gate.trie().len(),
                gate.source_names().len()
            );
            Ok(())
        }
        Command::GenConfig { .. } => Ok(()),
    }
}
