use clap::{Parser, Subcommand};
use console::style;
use std::any::Any;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openwiki::ConfigLoader;
use openwiki::cli::commands::ingest::{DocumentFormat, IngestOptions};

#[derive(Parser)]
#[command(name = "openwiki")]
#[command(
    version,
    about = "AI-synthesized documentation for remote repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Load this config file instead of the layered sources")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repository and generate its documentation
    Ingest {
        #[arg(help = "Repository as owner/repo or https URL")]
        repo: String,
        #[arg(
            short = 'f',
            long,
            default_value = "markdown",
            help = "Output format: markdown, json"
        )]
        format: DocumentFormat,
        #[arg(long, short, help = "Write the document to this file instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Completion endpoint base URL")]
        api_base: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string())
}

/// Report panics as a one-line crash notice before the default hook runs
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let payload = panic_message(info.payload());
        let location = info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();

        eprintln!(
            "{} openwiki crashed{}: {}",
            style("✗").red().bold(),
            style(location).dim(),
            payload
        );
        eprintln!(
            "  {}",
            style("rerun with --verbose and RUST_BACKTRACE=1 for details").dim()
        );

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_panic_hook();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // stdout is reserved for the rendered document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    match cli.command {
        Commands::Ingest {
            repo,
            format,
            output,
            model,
            api_base,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(openwiki::cli::commands::ingest::run(
                config,
                IngestOptions {
                    repo,
                    format,
                    output,
                    model,
                    api_base,
                    quiet: cli.quiet,
                },
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                openwiki::cli::commands::config::show(&config, &format)?;
            }
            ConfigAction::Path => {
                openwiki::cli::commands::config::path()?;
            }
        },
    }

    Ok(())
}
