//! Run the style advisor on a photo from disk.
//!
//! Usage:
//!   cargo run --example analyze_photo --features rustface -- <photo> <seeta_fd_frontal_v1.0.bin> [config.json]
//!
//! Set `RUST_LOG=zerkalo=debug` to see detection details.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use zerkalo::{AdvisorConfig, AnalysisOutcome, StyleAdvisor};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (photo_path, model_path) = match (args.first(), args.get(1)) {
        (Some(photo), Some(model)) => (photo, model),
        _ => {
            eprintln!("usage: analyze_photo <photo> <model> [config.json]");
            return ExitCode::FAILURE;
        }
    };

    let config = match args.get(2) {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("failed to read {path}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match AdvisorConfig::from_json_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => AdvisorConfig::default(),
    };

    let (photo, model) = match (std::fs::read(photo_path), std::fs::read(model_path)) {
        (Ok(photo), Ok(model)) => (photo, model),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut advisor = match StyleAdvisor::rustface(model, config) {
        Ok(advisor) => advisor,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match advisor.analyze_bytes(&photo) {
        AnalysisOutcome::Profile(profile) => {
            println!("{}", profile.name);
            println!();
            println!("{}", profile.description);
            println!();
            println!("{}", profile.tone_caption());
            for item in &profile.items {
                println!("  - {} <{}>", item.name, item.link);
            }
            ExitCode::SUCCESS
        }
        outcome @ AnalysisOutcome::NoFaceFound => {
            println!("{}", outcome.message().unwrap_or_default());
            ExitCode::SUCCESS
        }
        outcome @ AnalysisOutcome::AnalysisError { .. } => {
            eprintln!("{}", outcome.message().unwrap_or_default());
            ExitCode::FAILURE
        }
    }
}
