//! # diseasedb
//! Point lookups of mortality counts by state and disease, served from
//! two interchangeable indexes so their build and query times can be
//! compared on identical input.
//!
//! ## Features
//! - Bucketed hash table index ([`BucketedIndex`]) with chained buckets
//! - Red-black tree index ([`OrderedIndex`]) over an arena of nodes
//! - Max-merge of duplicate (disease, year, mortality) records
//! - CSV ingestion filtered to mortality rows
//! - Timed REPL queries with a side-by-side speed comparison
//!
//! ## Usage
//! This crate is primarily consumed by the binary in `main.rs`,
//! which provides the REPL interface. All reusable logic and
//! unit tests live here so the project can be tested with `cargo test`.
// =====================================================================
// File: lib.rs
//
//   This module implements the command-line interface (CLI)
//   that accepts the following commands:
//
//     `GET <state>, <disease>` -> Death counts per year, from every built index
//     `DEL <state>`            -> Removes a state: 1 if removed, 0 if not found
//     `DISEASES`               -> Lists example disease names
//     `STATS`                  -> Index sizes and build timings
//     `EXIT` / `QUIT`          -> Terminate the program
//
//   Arguments are separated by commas so that multi-word state and
//   disease names ("New York", "Chronic Kidney Disease") survive intact.
// =====================================================================
pub mod error;
pub use error::{ConfigError, IngestError, InvariantViolation, LookupMiss};

pub mod record;
pub use record::{DiseaseRecord, StateEntry};

pub mod lookup;
pub use lookup::DiseaseIndex;

pub mod hash;
pub use hash::BucketedIndex;

pub mod index;
pub use index::OrderedIndex;

pub mod config;
pub use config::{Config, IndexChoice};

pub mod ingest;
pub use ingest::{Ingested, ParsedRecord};

pub mod timing;

pub mod session;
pub use session::Session;

use std::io::{self, BufRead};

use tracing::warn;

use timing::{timed, Comparison};

/// Example disease names accepted by `GET`.
pub const EXAMPLE_DISEASES: [&str; 7] = [
    "Alcohol",
    "Asthma",
    "Cancer",
    "Chronic Kidney Disease",
    "Chronic Obstructive Pulmonary Disease",
    "Cardiovascular Disease",
    "Overarching Conditions",
];

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
pub enum CommandResult {
    Continue,
    Exit,
}


/// Load the configured data file.
///
/// Malformed rows are logged and skipped inside ingestion; only an
/// unreadable file is returned as an error.
///
/// # Example
/// ```no_run
/// use diseasedb::{Config, load_data};
///
/// let ingested = load_data(&Config::default()).unwrap();
/// println!("{} mortality rows", ingested.records.len());
/// ```
pub fn load_data(config: &Config) -> Result<Ingested, IngestError> {
    ingest::read_records(&config.data_file)
}


/// Read–Evaluate–Print Loop (REPL) to handle interactive command input.
///
/// Continuously reads user commands from standard input, executes them
/// against the current [`Session`], and prints responses back to
/// standard output.
///
/// # Example
/// ```no_run
/// use diseasedb::{Config, Session, repl_loop};
///
/// let mut session = Session::new(&Config::default());
/// repl_loop(&mut session); // <- waits for user input interactively
/// ```
pub fn repl_loop(session: &mut Session) {
    let stdin = io::stdin();
    let proper_syntax = "Syntax Usage: GET <state>, <disease> | DEL <state> | DISEASES | STATS | EXIT";

    // Form a loop to iterate over each input line; lock mutex
    for input_line in stdin.lock().lines() {
        let full_command = match input_line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading input: {}", e);
                break;
            }
        };
        let (cmd, args) = parse_command(&full_command);

        // Process command and arguments
        match handle_command(&cmd, &args, proper_syntax, session) {
            CommandResult::Exit => break,
            CommandResult::Continue => (),
        }
    }
}


/// Parses a raw input line into a command and its arguments.
///
/// The first whitespace-delimited token is the command (normalized to
/// uppercase). The rest of the line is split on commas, each argument
/// trimmed, and empty arguments dropped.
fn parse_command(line: &str) -> (String, Vec<String>) {
    let trimmed_line = line.trim();
    let (cmd, rest) = trimmed_line
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed_line, ""));

    let args: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    (cmd.to_uppercase(), args)
}


/// One output line per matching record.
pub fn format_rows(state: &str, disease: &str, records: &[&DiseaseRecord]) -> Vec<String> {
    records
        .iter()
        .map(|rec| {
            format!(
                "State: {} Disease: {} Year: {} Death Count: {} Mortality: {}",
                state, disease, rec.year, rec.death_count, rec.mortality
            )
        })
        .collect()
}


/// Handles a single user command and returns whether the REPL should continue or exit.
///
/// - Only supported commands will operate - Any other input: Prints an error and redisplays the syntax.
///
/// Returns:
/// - `CommandResult::Continue` if the loop should keep running.
/// - `CommandResult::Exit` if the user requested termination.
///
/// The `proper_syntax` argument is displayed in error messages to guide the user.
fn handle_command(cmd: &str, args: &[String], proper_syntax: &str, session: &mut Session) -> CommandResult {
    match cmd {

        // Query format:  GET <state>, <disease>
        "GET" => {
            if args.len() != 2 {
                println!("ERR: GET requires a state and a disease separated by a comma");
                return CommandResult::Continue;
            }
            let (state, disease) = (&args[0], &args[1]);

            // Run the same lookup against each built structure
            let mut timings = Vec::new();
            for index in session.indexes() {
                let (outcome, elapsed) = timed(|| index.query(state, disease));
                match outcome {
                    Ok(records) => {
                        for row in format_rows(state, disease, &records) {
                            println!("{}", row);
                        }
                    }
                    Err(miss) => println!("{}", miss),
                }
                println!("{} search took {} microseconds", index.label(), elapsed.as_micros());
                timings.push((index.label(), elapsed));
            }

            if let [first, second] = timings[..] {
                println!("{}", Comparison::between("searching", first, second));
            }
            CommandResult::Continue
        }

        // Delete format:  DEL <state>
        "DEL" => {
            if args.len() != 1 {
                println!("ERR: DEL requires exactly one state");
                return CommandResult::Continue;
            }

            // Removes from every built structure; any hit counts
            let mut removed = false;
            for index in session.indexes_mut() {
                if index.remove(&args[0]) {
                    removed = true;
                } else {
                    warn!(state = %args[0], index = index.label(), "key not found; nothing removed");
                }
            }
            println!("{}", if removed { "1" } else { "0" });
            CommandResult::Continue
        }

        "DISEASES" => {
            for disease in EXAMPLE_DISEASES {
                println!("{}", disease);
            }
            CommandResult::Continue
        }

        "STATS" => {
            println!("Records indexed: {}", session.report.records);
            if let Some(hash) = &session.hash {
                println!("Hash Table: {} states in {} buckets", hash.len(), hash.bucket_count());
            }
            if let Some(tree) = &session.tree {
                println!("Red-Black Tree: {} states, height {}", tree.len(), tree.height());
            }
            if let Some(elapsed) = session.report.hash {
                println!("Build time for Hash Table: {} microseconds", elapsed.as_micros());
            }
            if let Some(elapsed) = session.report.tree {
                println!("Build time for Red-Black Tree: {} microseconds", elapsed.as_micros());
            }
            if let Some(cmp) = session.build_comparison() {
                println!("{}", cmp);
            }
            CommandResult::Continue
        }

        // Exit command
        "EXIT" | "QUIT" => {
            println!("Exiting...");
            CommandResult::Exit
        }

        // Empty input
        "" => {
            println!("Enter a command.");
            CommandResult::Continue
        }

        // Everything else will be noted and returned as an error
        _ => {
            println!("ERROR: command '{}' not handled", cmd);
            println!("{}", proper_syntax);
            CommandResult::Continue
        }
    }
}



// =================================================================
// lib.rs Unit tests
// =================================================================
