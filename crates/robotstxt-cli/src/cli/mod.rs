//! CLI module for the robots.txt checker.
//!
//! Command-line arguments are parsed with Clap, and every option can also
//! be supplied through an environment variable.

pub mod config;
pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// robots.txt checker - tests whether a crawler may fetch the given paths.
///
/// Reads a robots.txt body, applies the HTTP status policy, then reports
/// the verdict for each path along with the rule that decided it.
#[derive(Parser, Debug)]
#[command(name = "robotstxt-check")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Paths to test, e.g. `/private/page.html`.
    pub paths: Vec<String>,

    /// Path to the robots.txt file. Use '-' to read from stdin.
    #[arg(long, short = 'f', env = "ROBOTSTXT_FILE")]
    pub robots_file: PathBuf,

    /// User agent to test the paths for.
    #[arg(long, short = 'a', env = "ROBOTSTXT_USER_AGENT", default_value = "*")]
    pub user_agent: String,

    /// HTTP status the robots.txt was served with.
    /// 4xx allows everything, 5xx disallows everything.
    #[arg(long, short = 's', env = "ROBOTSTXT_STATUS_CODE", default_value_t = 200)]
    pub status_code: u16,

    /// Fail on malformed values that are normally skipped.
    #[arg(long, env = "ROBOTSTXT_STRICT")]
    pub strict: bool,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns true if the robots.txt body comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.robots_file.as_os_str() == "-"
    }
}
