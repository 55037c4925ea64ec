//! Command-line entry point for the derivation engine.
//!
//! Reads a consultation JSON file, runs the engine, and prints the
//! report JSON to stdout.
//!
//! ```text
//! jafr <consultation.json> [--profile classic|weighted] [--lines]
//! ```

use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use jafr_engine::{Consultation, Constants, JafrEngine, Profile};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut path = None;
    let mut profile = Profile::Classic;
    let mut print_lines = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--profile" => {
                i += 1;
                let Some(name) = args.get(i) else {
                    error!("--profile requires a value");
                    return ExitCode::FAILURE;
                };
                let Some(parsed) = Profile::from_str(name) else {
                    error!(profile = %name, "unknown profile, expected classic or weighted");
                    return ExitCode::FAILURE;
                };
                profile = parsed;
            }
            "--lines" => print_lines = true,
            other => path = Some(other.to_string()),
        }
        i += 1;
    }

    let Some(path) = path else {
        eprintln!("usage: jafr <consultation.json> [--profile classic|weighted] [--lines]");
        return ExitCode::FAILURE;
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            error!(path = %path, error = %e, "cannot read consultation file");
            return ExitCode::FAILURE;
        }
    };

    let consultation: Consultation = match serde_json::from_str(&raw) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %path, error = %e, "cannot parse consultation");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = JafrEngine::with_profile(Constants::new(), profile);
    engine.set_consultation(consultation);

    let result = engine.run_with_progress(|percent, message| {
        debug!(percent, message, "stage completed");
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "derivation failed");
            return ExitCode::FAILURE;
        }
    };

    if print_lines {
        for (id, value) in report.lines.entries() {
            eprintln!("{:2}. {} ({}): {}", id.number(), id.title(), id, value);
        }
    }

    info!(fingerprint = %report.fingerprint(), "report ready");
    match serde_json::to_string_pretty(report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "cannot serialize report");
            ExitCode::FAILURE
        }
    }
}
