//! Directive parser for robots.txt files.
//!
//! Consumes the scanner's token stream and groups `Allow`/`Disallow`/
//! `Crawl-delay` lines under the `User-agent` lines that precede them.

use super::error::{LineError, ParseError};
use super::model::{Groups, RobotsData, Rule, RulePath};
use crate::scan::{Directive, ScanConfig, Span, Token, scan_with_config};
use log::{debug, trace};
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;

/// Configuration options for the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// If true, a malformed `Crawl-delay` value fails the parse.
    /// If false, the value is skipped and the group keeps no delay.
    pub strict: bool,
    /// Options passed through to the scanner.
    pub scan: ScanConfig,
}

impl ParserConfig {
    /// Creates a new parser config with default settings (lenient mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a strict mode parser config.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    /// Creates a lenient mode parser config.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Default::default()
        }
    }

    /// Sets the scanner options.
    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }
}

/// The agents and members of the group currently being read.
#[derive(Debug, Default)]
struct Block {
    agents: Vec<String>,
    rules: Vec<Rule>,
    crawl_delay: Option<Duration>,
    has_members: bool,
}

impl Block {
    /// Attaches the block's members to every one of its agents.
    fn flush_into(&mut self, groups: &mut Groups) {
        for agent in &self.agents {
            let group = groups.entry(agent);
            group.rules.extend(self.rules.iter().cloned());
            if self.crawl_delay.is_some() {
                group.crawl_delay = self.crawl_delay;
            }
        }
        *self = Block::default();
    }
}

/// Everything the parser extracts from a token stream.
#[derive(Debug, Default)]
struct Directives {
    groups: Groups,
    host: Option<String>,
    sitemaps: Vec<String>,
    errors: Vec<LineError>,
}

struct Parser {
    config: ParserConfig,
    block: Block,
    out: Directives,
    patterns: HashMap<String, Regex>,
}

impl Parser {
    fn new(config: ParserConfig) -> Self {
        Self {
            config,
            block: Block::default(),
            out: Directives::default(),
            patterns: HashMap::new(),
        }
    }

    fn parse_all(mut self, tokens: impl IntoIterator<Item = Token>) -> Directives {
        for token in tokens {
            self.parse_token(token);
        }
        self.block.flush_into(&mut self.out.groups);
        self.out
    }

    fn parse_token(&mut self, token: Token) {
        match token.directive {
            Directive::UserAgent => self.user_agent(token.value),
            Directive::Allow => self.rule(true, &token),
            Directive::Disallow => self.rule(false, &token),
            Directive::CrawlDelay => self.crawl_delay(&token),
            Directive::Sitemap => {
                if !token.value.is_empty() {
                    self.out.sitemaps.push(token.value);
                }
            }
            Directive::Host => {
                if token.value.is_empty() {
                    return;
                }
                if self.out.host.is_none() {
                    self.out.host = Some(token.value);
                } else {
                    debug!("Line {}: ignoring repeated Host", token.span.line);
                }
            }
            Directive::Unknown(ref keyword) => {
                trace!("Line {}: ignoring unknown directive '{}'", token.span.line, keyword);
            }
        }
    }

    fn user_agent(&mut self, agent: String) {
        if agent.is_empty() {
            return;
        }
        // Consecutive User-agent lines share one block of rules.
        if self.block.has_members {
            self.block.flush_into(&mut self.out.groups);
        }
        self.block.agents.push(agent);
    }

    fn rule(&mut self, allow: bool, token: &Token) {
        // An empty path matches nothing, but still ends the agent list.
        if token.value.is_empty() {
            self.mark_member();
            return;
        }
        if self.block.agents.is_empty() {
            self.out
                .errors
                .push(LineError::outside_group(token.directive.as_str(), token.span));
            return;
        }
        match self.rule_path(&token.value, token.span) {
            Ok(path) => {
                self.block.rules.push(Rule::new(allow, path, token.span.line));
                self.block.has_members = true;
            }
            Err(e) => self.out.errors.push(e),
        }
    }

    fn crawl_delay(&mut self, token: &Token) {
        let Some(delay) = parse_delay(&token.value) else {
            if self.config.strict {
                self.out
                    .errors
                    .push(LineError::invalid_crawl_delay(&token.value, token.span));
            } else {
                debug!(
                    "Line {}: skipping invalid Crawl-delay '{}'",
                    token.span.line, token.value
                );
                self.mark_member();
            }
            return;
        };
        if self.block.agents.is_empty() {
            self.out
                .errors
                .push(LineError::outside_group(token.directive.as_str(), token.span));
            return;
        }
        self.block.crawl_delay = Some(delay);
        self.block.has_members = true;
    }

    /// Records a group member line that contributes nothing, so a following
    /// `User-agent` starts a new block. No-op before the first `User-agent`.
    fn mark_member(&mut self) {
        if !self.block.agents.is_empty() {
            self.block.has_members = true;
        }
    }

    /// Normalizes a rule value and decides between prefix and pattern matching.
    fn rule_path(&mut self, value: &str, span: Span) -> Result<RulePath, LineError> {
        let path = normalize_path(value);
        if !path.contains('*') && !path.ends_with('$') {
            return Ok(RulePath::Literal(path));
        }

        if let Some(regex) = self.patterns.get(&path) {
            return Ok(RulePath::Pattern {
                regex: regex.clone(),
                source: path,
            });
        }

        let regex = Regex::new(&wildcard_to_regex(&path))
            .map_err(|e| LineError::invalid_pattern(value, e.to_string(), span))?;
        self.patterns.insert(path.clone(), regex.clone());
        Ok(RulePath::Pattern {
            regex,
            source: path,
        })
    }
}

/// Adds a missing leading `/` and drops redundant trailing `*`s.
fn normalize_path(value: &str) -> String {
    let path = if value.starts_with('/') || value.starts_with('*') {
        value.trim_end_matches('*').to_string()
    } else {
        format!("/{}", value.trim_end_matches('*'))
    };
    // A bare `*` matches every path.
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Builds a start-anchored regex where `*` matches anything and a
/// trailing `$` anchors the end. Everything else matches literally.
fn wildcard_to_regex(path: &str) -> String {
    let (body, anchored) = match path.strip_suffix('$') {
        Some(body) => (body, true),
        None => (path, false),
    };

    let mut pattern = String::with_capacity(path.len() * 2 + 6);
    pattern.push_str("(?s)^");
    for (i, literal) in body.split('*').enumerate() {
        if i > 0 {
            pattern.push_str(".*");
        }
        pattern.push_str(&regex::escape(literal));
    }
    if anchored {
        pattern.push('$');
    }
    pattern
}

/// Parses a delay in (possibly fractional) seconds.
fn parse_delay(value: &str) -> Option<Duration> {
    let seconds: f64 = value.parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

/// Parses a robots.txt file with the given configuration.
///
/// Empty input, whitespace-only input, and input without a single
/// directive all produce the allow-all document.
pub fn parse_with_config(input: &[u8], config: &ParserConfig) -> Result<RobotsData, ParseError> {
    debug!(
        "Parsing robots.txt ({} bytes, strict={})",
        input.len(),
        config.strict
    );

    if input.trim_ascii().is_empty() {
        debug!("Empty robots.txt, allowing everything");
        return Ok(RobotsData::allow_all());
    }

    let tokens: Vec<Token> = scan_with_config(input, config.scan).collect();
    if tokens.is_empty() {
        debug!("No directives found, allowing everything");
        return Ok(RobotsData::allow_all());
    }
    trace!("Scanned {} tokens", tokens.len());

    let directives = Parser::new(*config).parse_all(tokens);

    debug!(
        "Parsing complete: {} groups, {} sitemaps, {} errors",
        directives.groups.len(),
        directives.sitemaps.len(),
        directives.errors.len()
    );
    if !directives.errors.is_empty() {
        return Err(ParseError::new(directives.errors));
    }

    Ok(RobotsData::new(
        directives.groups,
        directives.host,
        directives.sitemaps,
    ))
}

/// Parses a robots.txt file using default (lenient) configuration.
pub fn parse(input: &[u8]) -> Result<RobotsData, ParseError> {
    parse_with_config(input, &ParserConfig::default())
}

/// Parses a robots.txt file held in a string.
pub fn parse_str(input: &str) -> Result<RobotsData, ParseError> {
    parse(input.as_bytes())
}

/// Parses a robots.txt file in strict mode.
pub fn parse_strict(input: &[u8]) -> Result<RobotsData, ParseError> {
    parse_with_config(input, &ParserConfig::strict())
}
