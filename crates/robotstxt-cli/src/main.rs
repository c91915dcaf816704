//! robots.txt Checker CLI
//!
//! A command-line tool for testing paths against a robots.txt file.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig};
use cli::output::{CheckReport, HumanOutput, JsonParseFailure};
use robotstxt_core::{RobotsError, from_status_with_config};

fn main() -> StdExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose, args.json);

    let exit_code = run(args);

    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Run the checker with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let use_colors = !args.json && io::stderr().is_terminal();
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let use_colors = !config.json_output && io::stdout().is_terminal();

    debug!("Validated configuration: {:?}", config.parser_config);
    info!("robots.txt source: {} ({} bytes)", config.source, config.body.len());
    info!("Status code: {}", config.status);

    let data = match from_status_with_config(config.status, &config.body, &config.parser_config) {
        Ok(data) => data,
        Err(RobotsError::Parse(e)) => {
            if config.json_output {
                if let Err(e) = JsonParseFailure::new(&e).write(&mut stdout) {
                    error!("Failed to write JSON output: {}", e);
                }
            } else {
                let _ = HumanOutput::new(&mut stderr, use_colors).write_parse_failure(&e);
            }
            return ExitCode::ParseFailed;
        }
        Err(e) => {
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let report = CheckReport::build(&data, &config.user_agent, &config.paths);
    debug!(
        "Checked {} path(s), {} disallowed",
        report.results.len(),
        report.disallowed()
    );

    // Output results
    let written = if config.json_output {
        report.write_json(&mut stdout)
    } else {
        report.write_human(&mut stdout, use_colors)
    };
    if let Err(e) = written {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    config.exit_code_for_results(report.disallowed())
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    let _ = HumanOutput::new(writer, use_colors).write_error(message);
}
