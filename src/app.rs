//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the model artifact
//! - runs the prediction pipeline
//! - prints reports
//! - launches the TUI

use clap::Parser;

use crate::cli::{ApplicantArgs, CheckArgs, Command, InitModelArgs};
use crate::error::AppError;
use crate::io::{candidate_paths, list_directory, load_artifact, write_artifact_json};

pub mod pipeline;

/// Entry point for the `loanrisk` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `loanrisk` and `loanrisk -m model.json` to behave like
    // `loanrisk tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Check(args) => handle_check(args),
        Command::InitModel(args) => handle_init_model(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_predict(args: ApplicantArgs) -> Result<(), AppError> {
    let candidates = candidate_paths(args.model.as_deref());
    let loaded = load_artifact(&candidates)?;

    print!("{}", crate::report::format_loaded(&loaded));

    let profile = args.profile();
    let output = pipeline::run_prediction(&loaded.artifact, &profile)?;

    println!();
    print!("{}", crate::report::format_prediction(&profile, &output));

    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let candidates = candidate_paths(args.model.as_deref());

    match load_artifact(&candidates) {
        Ok(loaded) => {
            print!("{}", crate::report::format_loaded(&loaded));
            println!(
                "Features ({}): {}",
                loaded.artifact.feature_count(),
                loaded.artifact.feature_names.join(", ")
            );
            println!(
                "Probability scores: {}",
                if loaded.artifact.supports_probabilities() {
                    "supported"
                } else {
                    "not supported"
                }
            );
            Ok(())
        }
        Err(err) => {
            let listing = list_directory(std::path::Path::new("."));
            Err(AppError::new(
                2,
                crate::report::format_check_failure(&err, &listing),
            ))
        }
    }
}

fn handle_init_model(args: InitModelArgs) -> Result<(), AppError> {
    if args.out.exists() {
        return Err(AppError::new(
            2,
            format!(
                "Refusing to overwrite existing '{}'. Move it aside first.",
                args.out.display()
            ),
        ));
    }

    let artifact = crate::models::builtin_logistic();
    write_artifact_json(&args.out, &artifact)?;
    println!("Wrote starter model to: {}", args.out.display());
    Ok(())
}

/// Rewrite argv so `loanrisk` defaults to `loanrisk tui`.
///
/// Rules:
/// - `loanrisk`                      -> `loanrisk tui`
/// - `loanrisk -m model.json ...`    -> `loanrisk tui -m model.json ...`
/// - `loanrisk --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "check" | "init-model" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
