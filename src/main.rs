// ============================================================
// File: main.rs
//
// Description:
//   Entry point for the mortality index benchmark. Parses the
//   command line, loads the CSV data file, builds the selected
//   structures (hash table, red-black tree, or both), reports
//   build timings, then hands off to the query REPL.
//
// Notes:
//   * Set RUST_LOG (e.g. RUST_LOG=info) to see ingestion and
//     build logs on stderr.
// ============================================================
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use diseasedb::config::{DATA_FILE, DEFAULT_BUCKET_COUNT};
use diseasedb::{load_data, repl_loop, Config, IndexChoice, Session};

/// Benchmark a hash table against a red-black tree on mortality data.
#[derive(Debug, Parser)]
#[command(name = "diseasedb", version)]
struct Args {
    /// CSV file with year,state,disease,indicator,deaths rows.
    #[arg(long, env = "DISEASES_DATA_FILE", default_value = DATA_FILE)]
    data_file: PathBuf,

    /// Number of hash table buckets.
    #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,

    /// Structures to build: hash, tree, or both (or 1, 2, 3).
    #[arg(long, default_value = "both")]
    structure: IndexChoice,
}


fn main() {
    if let Err(e) = run() {
        eprintln!("diseasedb: error: {:#}", e);
        std::process::exit(1);
    }
}


fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    let config = Config::new(args.data_file, args.buckets, args.structure)
        .context("invalid configuration")?;

    let ingested = load_data(&config)
        .with_context(|| format!("could not load {}", config.data_file.display()))?;

    let mut session = Session::build(&config, &ingested.records);

    println!("Mortality Index ({})", config.choice);
    if let Some(elapsed) = session.report.hash {
        println!("Hash Table build took {} microseconds", elapsed.as_micros());
    }
    if let Some(elapsed) = session.report.tree {
        println!("Red-Black Tree build took {} microseconds", elapsed.as_micros());
    }
    if let Some(cmp) = session.build_comparison() {
        println!("{}", cmp);
    }
    println!(
        "Total records processed: {} ({} indexed, {} skipped)",
        ingested.processed,
        ingested.records.len(),
        ingested.skipped
    );

    // Hand off to the main command loop
    repl_loop(&mut session);
    Ok(())
}
