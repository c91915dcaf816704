//! Scanner for robots.txt content.
//!
//! Turns raw bytes into an ordered stream of [`Token`]s, one per directive
//! line. Comments, blank lines and line terminators are consumed here; the
//! parser only ever sees `keyword: value` pairs in file order.
//!
//! # Example
//!
//! ```rust
//! use robotstxt_core::scan::{scan, Directive};
//!
//! let tokens: Vec<_> = scan(b"User-agent: *  # everyone\nDisallow: /tmp\n").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].directive, Directive::UserAgent);
//! assert_eq!(tokens[1].value, "/tmp");
//! ```

mod lexer;
pub mod span;
mod token;

pub use span::Span;
pub use token::{Directive, Token};

use log::trace;

/// Configuration options for the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// If true, a leading byte order mark is skipped and values are trimmed.
    /// If false, values are kept exactly as written after the colon.
    pub normalize: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl ScanConfig {
    /// Creates a scanner config with default settings (normalizing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that keeps values verbatim.
    pub fn raw() -> Self {
        Self { normalize: false }
    }

    /// Sets whether values are normalized.
    pub fn with_normalize(mut self, value: bool) -> Self {
        self.normalize = value;
        self
    }
}

/// A single-pass token stream over robots.txt bytes.
///
/// Scanning never fails: lines that are not `keyword: value` pairs come
/// out as [`Directive::Unknown`] tokens and are left for the parser to
/// ignore.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    offset: usize,
    line: usize,
    config: ScanConfig,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `input`.
    pub fn new(input: &'a [u8], config: ScanConfig) -> Self {
        let mut scanner = Self {
            input,
            offset: 0,
            line: 1,
            config,
        };
        if config.normalize {
            if let Ok((rest, Some(bom))) = lexer::byte_order_mark(input) {
                trace!("Skipping byte order mark");
                scanner.input = rest;
                scanner.offset = bom.len();
            }
        }
        scanner
    }

    /// Turns one physical line into a token, if it holds a directive.
    fn scan_line(&self, raw: &[u8], line_span: Span) -> Option<Token> {
        let content = lexer::content(raw).map_or(raw, |(_, content)| content);
        if lexer::is_blank(content) {
            return None;
        }

        let (trimmed, leading) = lexer::trim(content);
        let span = line_span.sub(leading, trimmed.len());

        let Ok((_, field)) = lexer::field(trimmed) else {
            return Some(Token::new(
                Directive::Unknown(String::from_utf8_lossy(trimmed).into_owned()),
                "",
                span,
            ));
        };

        let (key, _) = lexer::trim(field.key);
        let keyword = String::from_utf8_lossy(key);

        let Some(value) = field.value else {
            trace!("Line {}: no separator, keeping as unknown", span.line);
            return Some(Token::new(
                Directive::Unknown(String::from_utf8_lossy(trimmed).into_owned()),
                "",
                span,
            ));
        };

        let value = if self.config.normalize {
            lexer::trim(value).0
        } else {
            // Re-read the value from the untrimmed content so trailing
            // whitespace before a comment survives.
            &content[leading + field.value_offset()..]
        };

        Some(Token::new(
            Directive::from_keyword(&keyword),
            String::from_utf8_lossy(value).into_owned(),
            span,
        ))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.input.is_empty() {
            let (rest, raw) = match lexer::line(self.input) {
                Ok(split) => split,
                Err(_) => (&self.input[self.input.len()..], self.input),
            };
            let consumed = self.input.len() - rest.len();
            let line_span = Span::new(self.offset, self.line, 1, raw.len());

            self.input = rest;
            self.offset += consumed;
            self.line += 1;

            if let Some(token) = self.scan_line(raw, line_span) {
                trace!("Line {}: {}", token.line(), token);
                return Some(token);
            }
        }
        None
    }
}

/// Scans `input` with default (normalizing) configuration.
pub fn scan(input: &[u8]) -> Scanner<'_> {
    Scanner::new(input, ScanConfig::default())
}

/// Scans `input` with the given configuration.
pub fn scan_with_config(input: &[u8], config: ScanConfig) -> Scanner<'_> {
    Scanner::new(input, config)
}
