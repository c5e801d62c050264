//! typolens CLI.
//!
//! `check` feeds one save through the tracker: the baseline file (or nothing)
//! is opened, the file is saved over it, and whatever the source flags in the
//! added lines is reported against the full file.

mod args;
mod report;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::{fs, path};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::{Cli, Command};
use typolens_config::TypolensConfig;
use typolens_core::{AnalysisOutcome, TypoTracker, find_differences};
use typolens_types::DocumentId;

const EXIT_TYPOS_FOUND: u8 = 1;
const EXIT_ANALYSIS_FAILED: u8 = 3;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<TypolensConfig> {
    match explicit {
        Some(path) => Ok(TypolensConfig::load_from(path)?),
        None => Ok(TypolensConfig::load()?.unwrap_or_default()),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

async fn check(
    config: &TypolensConfig,
    file: &Path,
    baseline: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let text = read(file)?;
    let previous = baseline.map(read).transpose()?.unwrap_or_default();

    let absolute = path::absolute(file).with_context(|| format!("resolving {}", file.display()))?;
    let id = DocumentId::from_path(&absolute)?;

    let source = typolens_source::build_source(&config.source())?;
    let mut tracker = TypoTracker::with_source(source, &config.tracker());

    tracker.open(&id, &previous);
    tracker.save(&id, &text);
    let mut failed = false;
    while let Some(completion) = tracker.next_event().await {
        if completion.outcome == AnalysisOutcome::Failed {
            tracing::error!(path = %file.display(), seq = completion.seq, "Typo analysis failed");
            failed = true;
        }
    }

    let diagnostics = tracker.diagnostics_for(&id).unwrap_or_default();
    let output = if json {
        let mut out = report::render_json(file, diagnostics)?;
        out.push('\n');
        out
    } else {
        report::render_text(file, diagnostics)
    };
    io::stdout().write_all(output.as_bytes())?;

    Ok(ExitCode::from(check_status(failed, diagnostics.len())))
}

/// Exit status of `check`: the source failing outranks any typos found.
fn check_status(failed: bool, diagnostics: usize) -> u8 {
    if failed {
        EXIT_ANALYSIS_FAILED
    } else if diagnostics > 0 {
        EXIT_TYPOS_FOUND
    } else {
        0
    }
}

fn diff(before: &Path, after: &Path) -> Result<ExitCode> {
    let blocks = find_differences(&read(before)?, &read(after)?);
    tracing::info!(blocks = blocks.len(), "Computed added blocks");
    io::stdout().write_all(report::render_blocks(&blocks).as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            file,
            baseline,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            check(&config, &file, baseline.as_deref(), json).await
        }
        Command::Diff { before, after } => diff(&before, &after),
    }
}
