//! `flc` - the compiler tool (§6 "Compiler tool").
//!
//! One positional argument: a path to a source file. Reads it, scans,
//! parses, indexes function declarations, locates `Main`, evaluates it with
//! an empty environment, and prints `Result: <double>`. Exit 0 on success;
//! 1 on a missing argument, a file error, a missing `Main`, or any fatal
//! error surfaced from a stage (§7).

use std::process::ExitCode;

use flc_drv::{diagnostic_for, run, Config};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let mut positional = None;
    let mut verbose = false;
    for arg in std::env::args_os().skip(1) {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if positional.is_none() {
            positional = Some(arg);
        }
    }

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let source_path = match positional {
        Some(path) => path,
        None => {
            let diagnostic = flc_util::diagnostic::Diagnostic::error("expected a source file path argument", flc_util::span::Span::DUMMY)
                .with_code(flc_util::diagnostic::DiagnosticCode::I_ARGUMENT);
            eprintln!("{diagnostic}");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::new(source_path);

    match run(&config) {
        Ok(result) => {
            println!("Result: {}", format_result(result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", diagnostic_for(&e));
            ExitCode::FAILURE
        }
    }
}

/// Formats a result the way the end-to-end scenarios expect: `14`, not
/// `14.0`, for an integral value; the full `f64` rendering otherwise
/// (§8 "Result: 14", "Result: 2.5", "Result: -4").
fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
