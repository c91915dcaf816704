//! robots.txt Core
//!
//! A library for parsing robots.txt files and deciding whether a crawler
//! may fetch a path.
//!
//! # Features
//!
//! - **Scanner**: Line-oriented tokenizer with span metadata for each directive
//! - **Parser**: Builds per-agent groups, crawl delays, sitemaps and host
//! - **Matcher**: Longest-match rule selection with `*` and `$` wildcards
//! - **Status Policy**: Maps the HTTP status of a robots.txt fetch to a policy
//!
//! # Quick Start
//!
//! ```rust
//! use robotstxt_core::{from_status_and_bytes, query};
//! use http::StatusCode;
//!
//! let body = b"User-agent: *\nDisallow: /private\nAllow: /private/open\n";
//!
//! let data = from_status_and_bytes(StatusCode::OK, body).unwrap();
//!
//! assert!(query(&data, "Googlebot", "/public"));
//! assert!(!query(&data, "Googlebot", "/private/page"));
//! assert!(query(&data, "Googlebot", "/private/open/page"));
//!
//! // A missing robots.txt allows everything
//! let missing = from_status_and_bytes(StatusCode::NOT_FOUND, b"").unwrap();
//! assert!(missing.test_agent("Googlebot", "/private"));
//! ```
//!
//! # Modules
//!
//! - [`scan`]: Tokenizer for robots.txt lines
//! - [`parse`]: Parser producing [`RobotsData`]
//! - [`matching`]: Group and rule selection
//! - [`status`]: HTTP status handling

pub mod matching;
pub mod parse;
pub mod scan;
pub mod status;

#[cfg(feature = "generate")]
pub mod generate;

// Re-export commonly used types at the crate root
pub use matching::{WILDCARD_AGENT, find_group, match_rule, query};
pub use parse::{
    Group, LineError, ParseError, ParserConfig, RobotsData, Rule, RulePath, parse, parse_str,
};
pub use scan::{ScanConfig, Scanner, scan};
pub use status::{
    RobotsError, from_status_and_bytes, from_status_and_reader, from_status_and_str,
    from_status_code, from_status_with_config,
};
