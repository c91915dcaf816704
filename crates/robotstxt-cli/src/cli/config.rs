//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types
//! and loads the robots.txt body.

use crate::cli::Args;
use http::StatusCode;
use robotstxt_core::ParserConfig;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Failed to read the robots.txt file.
    #[error("failed to read robots.txt '{path}': {source}")]
    ReadRobots {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every path is allowed.
    Success = 0,
    /// Application startup failed (wrong configuration, unreadable input,
    /// or a status code with no policy).
    StartupFailure = 1,
    /// The robots.txt body could not be parsed.
    ParseFailed = 2,
    /// At least one path is disallowed.
    Disallowed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Where the robots.txt body was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Validated and processed configuration for running the checker.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Where the body came from.
    pub source: InputSource,
    /// The raw robots.txt body.
    pub body: Vec<u8>,
    /// The status the body was served with.
    pub status: StatusCode,
    /// The crawler to test for.
    pub user_agent: String,
    /// Paths to test, in the order given.
    pub paths: Vec<String>,
    /// Configuration for the parser.
    pub parser_config: ParserConfig,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments, reading stdin
    /// when the robots file is `-`.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.reads_stdin() {
            let mut body = Vec::new();
            std::io::stdin().lock().read_to_end(&mut body)?;
            return Self::from_args_with_body(args, InputSource::Stdin, body);
        }

        let body = read_robots_file(&args.robots_file)?;
        Self::from_args_with_body(args, InputSource::File(args.robots_file.clone()), body)
    }

    /// Creates a validated configuration from CLI arguments and an already loaded body.
    pub fn from_args_with_body(
        args: &Args,
        source: InputSource,
        body: Vec<u8>,
    ) -> Result<Self, ConfigError> {
        let status = StatusCode::from_u16(args.status_code).map_err(|_| {
            ConfigError::Invalid(format!(
                "status code {} is outside 100-999",
                args.status_code
            ))
        })?;

        if args.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user agent must not be empty".to_string()));
        }

        if let Some(path) = args.paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid(format!(
                "path '{}' must start with '/'",
                path
            )));
        }

        let parser_config = if args.strict {
            ParserConfig::strict()
        } else {
            ParserConfig::lenient()
        };

        Ok(Self {
            source,
            body,
            status,
            user_agent: args.user_agent.clone(),
            paths: args.paths.clone(),
            parser_config,
            json_output: args.json,
        })
    }

    /// Determines the exit code from the number of disallowed paths.
    pub fn exit_code_for_results(&self, disallowed: usize) -> ExitCode {
        if disallowed > 0 {
            ExitCode::Disallowed
        } else {
            ExitCode::Success
        }
    }
}

/// Reads a robots.txt file from disk.
pub fn read_robots_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::ReadRobots {
        path: path.to_path_buf(),
        source,
    })
}
