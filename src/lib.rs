// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod input;
pub mod logging;
pub mod output;
pub mod tree;
pub mod types;

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_and_validate_with_fs, ConfigFile};
use crate::engine::{ParseReport, TreeParser};
use crate::fs::{FileSystem, RealFileSystem};
use crate::input::load_document;
use crate::output::TreeOutput;
use crate::tree::verify::{verify, Violation};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus CLI overrides)
/// - tree document loading
/// - the parse/repair/injection pipeline
/// - output or `--check` reporting
pub fn run(args: CliArgs) -> Result<()> {
    run_with_fs(&args, &RealFileSystem)
}

/// Same as [`run`], reading and writing through `fs`.
pub fn run_with_fs(args: &CliArgs, fs: &dyn FileSystem) -> Result<()> {
    let config = resolve_config(args, fs)?;

    let doc = load_document(fs, Path::new(&args.input), config.input.sanitize_encoding)?;
    let inject = args.inject || config.injection.enabled;

    let mut parser = TreeParser::new(doc, config);
    let parsed = parser.reparse(inject);
    let violations = verify(&parsed.graph);

    if args.check {
        print_report(&parsed.report, &violations);
        if !violations.is_empty() {
            return Err(anyhow!("{} invariant violation(s) remain", violations.len()));
        }
        return Ok(());
    }

    let json = TreeOutput::from_graph(&parsed.graph).to_json_pretty()?;
    match &args.output {
        Some(path) => {
            fs.write(Path::new(path), json.as_bytes())?;
            info!(path = %path, "wrote finalized tree");
        }
        None => println!("{json}"),
    }

    debug!(violations = violations.len(), fingerprint = %parsed.graph.fingerprint(), "run complete");
    Ok(())
}

/// Load the config named on the CLI, else `Spelltree.toml` if present, else
/// defaults; then apply `--seed`.
fn resolve_config(args: &CliArgs, fs: &dyn FileSystem) -> Result<ConfigFile> {
    let mut config = match &args.config {
        Some(path) => load_and_validate_with_fs(fs, path)?,
        None => {
            let default_path = default_config_path();
            if fs.exists(&default_path) {
                load_and_validate_with_fs(fs, &default_path)?
            } else {
                ConfigFile::default()
            }
        }
    };

    if let Some(seed) = args.seed {
        config.injection.seed = Some(seed);
    }
    Ok(config)
}

/// Human-readable summary for `--check`.
fn print_report(report: &ParseReport, violations: &[Violation]) {
    println!("spelltree check");
    println!("  nodes ingested = {}", report.ingested_ids.len());
    if report.root_edges_removed > 0 {
        println!("  root prerequisites removed = {}", report.root_edges_removed);
    }
    println!();

    println!("schools ({}):", report.schools.len());
    for school in &report.schools {
        println!("  - {}", school.school);
        println!("      orphans reattached: {}", school.orphans_reattached);
        println!("      fixes: {}", school.fixes);
        if school.injected > 0 {
            println!("      injected: {}", school.injected);
        }
        println!("      fully reachable: {}", school.fully_reachable);
    }

    if !report.failures.is_empty() {
        println!();
        println!("skipped schools ({}):", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.school, failure.reason);
        }
    }

    println!();
    if violations.is_empty() {
        println!("all invariants hold");
    } else {
        println!("violations ({}):", violations.len());
        for v in violations {
            println!("  - {v}");
        }
    }
}
