//! querylens CLI - validate a query and print its findings in place.
//!
//! ```text
//! main() -> load config -> Workbench::validate -> settle -> render listing
//!                                                   |
//!                                              (--fix) suggest_fix -> settle -> render suggestion
//! ```
//!
//! Everything interactive lives in [`querylens_engine`]; this binary is a
//! one-shot driver over it. Logs go to a file so they never interleave with
//! the listing on stdout.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::{self, OpenOptions},
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use querylens_engine::{QuerylensConfig, Workbench};
use querylens_services::HttpQueryService;

use render::{Glyphs, render_issues, render_listing, render_suggestion};

#[derive(Parser)]
#[command(name = "querylens")]
#[command(version)]
#[command(about = "Validate a query and show the validator's findings on its lines")]
struct Cli {
    /// Ask the fix-suggestion service for a corrected query when there are findings
    #[arg(long)]
    fix: bool,

    /// Use ASCII-only glyphs in the listing
    #[arg(long)]
    ascii: bool,

    /// Query file to validate, or `-` for stdin
    input: PathBuf,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file means no logs; stdout carries the listing.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.querylens/logs/querylens.log
    if let Some(config_path) = QuerylensConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("querylens.log"));
    }

    // Fallback: ./.querylens/logs/querylens.log
    candidates.push(PathBuf::from(".querylens").join("logs").join("querylens.log"));

    candidates
}

fn read_query(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read query from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

fn load_config() -> QuerylensConfig {
    match QuerylensConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}; using defaults");
            QuerylensConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config();
    let glyphs = Glyphs::new(cli.ascii || config.ascii_only());
    let service_config = config
        .service_config()
        .context("invalid service configuration")?;
    let service = HttpQueryService::new(service_config).context("failed to build HTTP client")?;

    let query = read_query(&cli.input)?;
    let mut bench = Workbench::new(service, query);

    bench.validate();
    bench.settle().await;

    let session = bench.session();
    print!("{}", render_issues(session.issues()));
    if !session.overlay().is_empty() {
        println!();
        print!("{}", render_listing(session.document(), session.overlay(), glyphs));
    }

    if cli.fix {
        if bench.suggest_fix() {
            bench.settle().await;
            if let Some(suggestion) = bench.session().suggestion() {
                println!();
                print!("{}", render_suggestion(suggestion));
            }
        } else {
            println!();
            println!("Nothing to fix.");
        }
    }

    Ok(())
}
