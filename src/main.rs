use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repo_viewer::cli::commands::{config, scan};
use repo_viewer::cli::{Output, OutputFormat, ScanOptions};

#[derive(Parser)]
#[command(name = "repo-viewer")]
#[command(version, about = "Structural outline extractor for Python codebases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        long,
        short,
        global = true,
        help = "Use this config file instead of global/project config"
    )]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Outline every Python file under a directory
    Scan {
        #[arg(help = "Repository directory to scan")]
        path: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "json",
            value_parser = clap::value_parser!(OutputFormat),
            help = "Output format: json, text"
        )]
        format: OutputFormat,
        #[arg(long, help = "Include per-file diagnostics alongside modules")]
        report: bool,
        #[arg(long, help = "Pretty-print JSON output")]
        pretty: bool,
        #[arg(long, help = "Record functions nested inside other functions")]
        nested: bool,
        #[arg(long = "ignore-dir", value_name = "NAME", help = "Additional directory name to skip")]
        ignore_dirs: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, default_value = "toml", help = "Output format: toml, json")]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Create .repo-viewer.toml in the current directory
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mrepo-viewer encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&e.to_string());
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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Scan {
            path,
            format,
            report,
            pretty,
            nested,
            ignore_dirs,
        } => {
            scan::run(ScanOptions {
                path,
                format,
                report,
                pretty,
                nested,
                ignore_dirs,
                config_path: cli.config,
            })?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                config::show(&format, cli.config.as_deref())?;
            }
            ConfigAction::Path => {
                config::path()?;
            }
            ConfigAction::Init { force } => {
                config::init_project(force)?;
            }
        },
    }

    Ok(())
}
