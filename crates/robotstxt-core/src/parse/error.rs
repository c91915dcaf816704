//! Error types for robots.txt parsing.
//!
//! Only problems the parser cannot recover from are errors. Unknown
//! directives and empty values are skipped without being reported.

use crate::scan::Span;
use thiserror::Error;

/// A structural problem on a single line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineError {
    /// A group member appeared before any `User-agent` line.
    #[error("line {line}: {directive} before User-agent")]
    OutsideGroup {
        /// The line number (1-based).
        line: usize,
        /// The directive that has no group to attach to.
        directive: String,
        /// Location in the source.
        span: Span,
    },

    /// A wildcard path could not be compiled.
    #[error("line {line}: invalid path pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The line number (1-based).
        line: usize,
        /// The path as written.
        pattern: String,
        /// Why compilation failed.
        message: String,
        /// Location in the source.
        span: Span,
    },

    /// A `Crawl-delay` value is not a non-negative number of seconds.
    ///
    /// Only reported by the strict parser.
    #[error("line {line}: invalid Crawl-delay value '{value}'")]
    InvalidCrawlDelay {
        /// The line number (1-based).
        line: usize,
        /// The value as written.
        value: String,
        /// Location in the source.
        span: Span,
    },
}

impl LineError {
    /// Creates an outside-group error.
    pub fn outside_group(directive: impl Into<String>, span: Span) -> Self {
        Self::OutsideGroup {
            line: span.line,
            directive: directive.into(),
            span,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(
        pattern: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::InvalidPattern {
            line: span.line,
            pattern: pattern.into(),
            message: message.into(),
            span,
        }
    }

    /// Creates an invalid crawl-delay error.
    pub fn invalid_crawl_delay(value: impl Into<String>, span: Span) -> Self {
        Self::InvalidCrawlDelay {
            line: span.line,
            value: value.into(),
            span,
        }
    }

    /// Returns the span associated with this error.
    pub fn span(&self) -> &Span {
        match self {
            LineError::OutsideGroup { span, .. } => span,
            LineError::InvalidPattern { span, .. } => span,
            LineError::InvalidCrawlDelay { span, .. } => span,
        }
    }

    /// Returns the line number where this error occurred.
    pub fn line(&self) -> usize {
        match self {
            LineError::OutsideGroup { line, .. } => *line,
            LineError::InvalidPattern { line, .. } => *line,
            LineError::InvalidCrawlDelay { line, .. } => *line,
        }
    }
}

/// A failed parse, carrying every structural error in file order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("robots.txt parse failed with {} error(s){}", .errors.len(), render_causes(.errors))]
pub struct ParseError {
    /// The underlying line errors.
    pub errors: Vec<LineError>,
}

impl ParseError {
    /// Creates a parse error from its causes.
    pub fn new(errors: Vec<LineError>) -> Self {
        Self { errors }
    }

    /// Returns the number of underlying errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no underlying errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns an iterator over the underlying errors.
    pub fn iter(&self) -> std::slice::Iter<'_, LineError> {
        self.errors.iter()
    }
}

fn render_causes(errors: &[LineError]) -> String {
    errors.iter().map(|e| format!("\n  {}", e)).collect()
}
