//! Parser module for robots.txt files.
//!
//! Builds a [`RobotsData`] from raw bytes: per-agent groups of
//! `Allow`/`Disallow` rules with optional crawl delays, plus the file-wide
//! `Host` and `Sitemap` directives.
//!
//! # Example
//!
//! ```rust
//! use robotstxt_core::parse::parse_str;
//!
//! let input = r#"
//! User-agent: *
//! Disallow: /private
//! Sitemap: http://example.com/sitemap.xml
//! "#;
//!
//! let data = parse_str(input).unwrap();
//! let group = data.group("*").unwrap();
//! assert_eq!(group.rules.len(), 1);
//! assert_eq!(data.sitemaps(), ["http://example.com/sitemap.xml"]);
//! ```

mod error;
mod model;
mod parser;

// Re-export public types
pub use error::{LineError, ParseError};
pub use model::{Group, Groups, RobotsData, Rule, RulePath};
pub use parser::{ParserConfig, parse, parse_str, parse_strict, parse_with_config};
