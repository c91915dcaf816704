//! Token types produced by the scanner.

use super::span::Span;
use std::fmt::{self, Display};

/// A robots.txt directive keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `User-agent` (also accepts `useragent`).
    UserAgent,
    /// `Allow`.
    Allow,
    /// `Disallow`.
    Disallow,
    /// `Crawl-delay` (also accepts `crawldelay`).
    CrawlDelay,
    /// `Sitemap`.
    Sitemap,
    /// `Host`.
    Host,
    /// Any other keyword, kept as written.
    Unknown(String),
}

impl Directive {
    /// Classifies a keyword, ignoring ASCII case.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "user-agent" | "useragent" => Self::UserAgent,
            "allow" => Self::Allow,
            "disallow" => Self::Disallow,
            "crawl-delay" | "crawldelay" => Self::CrawlDelay,
            "sitemap" => Self::Sitemap,
            "host" => Self::Host,
            _ => Self::Unknown(keyword.to_string()),
        }
    }

    /// Returns the canonical spelling of the directive.
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserAgent => "User-agent",
            Self::Allow => "Allow",
            Self::Disallow => "Disallow",
            Self::CrawlDelay => "Crawl-delay",
            Self::Sitemap => "Sitemap",
            Self::Host => "Host",
            Self::Unknown(keyword) => keyword,
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `keyword: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The directive keyword.
    pub directive: Directive,
    /// The value after the colon (empty when absent).
    pub value: String,
    /// Location of the directive line, excluding any comment.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(directive: Directive, value: impl Into<String>, span: Span) -> Self {
        Self {
            directive,
            value: value.into(),
            span,
        }
    }

    /// Returns the 1-based line number of the token.
    pub fn line(&self) -> usize {
        self.span.line
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.directive, self.value)
    }
}
