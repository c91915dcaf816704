//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for
//! access check results.

use colored::Colorize;
use robotstxt_core::{LineError, ParseError, RobotsData, find_group, query};
use serde::Serialize;
use std::io::Write;

/// How the document as a whole treats crawlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Everything may be fetched (4xx status or empty body).
    AllowAll,
    /// Nothing may be fetched (5xx status).
    DisallowAll,
    /// Parsed directives decide.
    Directives,
}

impl Policy {
    fn of(data: &RobotsData) -> Self {
        if data.is_allow_all() {
            Self::AllowAll
        } else if data.is_disallow_all() {
            Self::DisallowAll
        } else {
            Self::Directives
        }
    }
}

/// The verdict for one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// The path as given.
    pub path: String,
    /// Whether the crawler may fetch it.
    pub allowed: bool,
    /// The rule that decided the verdict, e.g. `Disallow: /private`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// The line the deciding rule was declared on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Results of checking a set of paths for one user agent.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// The user agent the paths were tested for.
    pub user_agent: String,
    /// The document-wide policy.
    pub policy: Policy,
    /// The agent of the group that applied, if one was declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Crawl delay of the applied group, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_delay: Option<f64>,
    /// The preferred host, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Declared sitemap URLs.
    pub sitemaps: Vec<String>,
    /// Per-path verdicts, in the order given.
    pub results: Vec<PathResult>,
}

impl CheckReport {
    /// Tests every path in `paths` for `user_agent`.
    pub fn build(data: &RobotsData, user_agent: &str, paths: &[String]) -> Self {
        let group = find_group(data, user_agent);

        let results = paths
            .iter()
            .map(|path| {
                let rule = match Policy::of(data) {
                    Policy::Directives => group.find_rule(path),
                    Policy::AllowAll | Policy::DisallowAll => None,
                };
                PathResult {
                    path: path.clone(),
                    allowed: query(data, user_agent, path),
                    rule: rule.map(ToString::to_string),
                    line: rule.map(|r| r.line),
                }
            })
            .collect();

        Self {
            user_agent: user_agent.to_string(),
            policy: Policy::of(data),
            group: (!group.agent.is_empty()).then(|| group.agent.clone()),
            crawl_delay: group.crawl_delay.map(|d| d.as_secs_f64()),
            host: data.host().map(str::to_string),
            sitemaps: data.sitemaps().to_vec(),
            results,
        }
    }

    /// Returns the number of disallowed paths.
    pub fn disallowed(&self) -> usize {
        self.results.iter().filter(|r| !r.allowed).count()
    }

    /// Writes the report in human-readable format.
    pub fn write_human<W: Write>(&self, writer: &mut W, use_colors: bool) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);
        output.write_header(self)?;
        for result in &self.results {
            output.write_result(result)?;
        }
        output.write_summary(self.results.len(), self.disallowed())
    }

    /// Writes the report in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// A single parse issue in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    /// Line number where the issue occurred.
    pub line: usize,
    /// Column number where the issue occurred.
    pub column: usize,
    /// Human-readable message.
    pub message: String,
}

impl From<&LineError> for JsonIssue {
    fn from(error: &LineError) -> Self {
        let span = error.span();
        Self {
            line: span.line,
            column: span.column,
            message: error.to_string(),
        }
    }
}

/// JSON output for a robots.txt that failed to parse.
#[derive(Debug, Serialize)]
pub struct JsonParseFailure {
    /// Every issue found.
    pub errors: Vec<JsonIssue>,
}

impl JsonParseFailure {
    /// Collects the issues of a parse error.
    pub fn new(error: &ParseError) -> Self {
        Self {
            errors: error.iter().map(JsonIssue::from).collect(),
        }
    }

    /// Writes the JSON output to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes the applied group and document-wide directives.
    pub fn write_header(&mut self, report: &CheckReport) -> std::io::Result<()> {
        let group = match (report.policy, &report.group) {
            (Policy::AllowAll, _) => "(allow all)".to_string(),
            (Policy::DisallowAll, _) => "(disallow all)".to_string(),
            (Policy::Directives, Some(agent)) => agent.clone(),
            (Policy::Directives, None) => "(none)".to_string(),
        };
        let header = format!("==> {} ({})", report.user_agent, group);
        if self.use_colors {
            writeln!(self.writer, "{}", header.cyan().bold())?;
        } else {
            writeln!(self.writer, "{}", header)?;
        }

        if let Some(delay) = report.crawl_delay {
            writeln!(self.writer, "  Crawl-delay: {}s", delay)?;
        }
        if let Some(host) = &report.host {
            writeln!(self.writer, "  Host: {}", host)?;
        }
        for sitemap in &report.sitemaps {
            writeln!(self.writer, "  Sitemap: {}", sitemap)?;
        }
        Ok(())
    }

    /// Writes the verdict for a single path.
    pub fn write_result(&mut self, result: &PathResult) -> std::io::Result<()> {
        let label = if result.allowed { "ALLOW" } else { "DENY" };
        let reason = match (&result.rule, result.line) {
            (Some(rule), Some(line)) => format!(" ({}, line {})", rule, line),
            (Some(rule), None) => format!(" ({})", rule),
            _ => String::new(),
        };

        if self.use_colors {
            let colored_label = if result.allowed {
                format!("[{}]", label).green().bold()
            } else {
                format!("[{}]", label).red().bold()
            };
            writeln!(self.writer, "  {} {}{}", colored_label, result.path, reason.dimmed())?;
        } else {
            writeln!(self.writer, "  [{}] {}{}", label, result.path, reason)?;
        }
        Ok(())
    }

    /// Writes a summary line.
    pub fn write_summary(&mut self, total: usize, disallowed: usize) -> std::io::Result<()> {
        if total == 0 {
            return Ok(());
        }
        writeln!(self.writer)?;

        if disallowed == 0 {
            let message = format!("✓ All {} path(s) allowed", total);
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!("✗ {} of {} path(s) disallowed", disallowed, total);
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }
        Ok(())
    }

    /// Writes every issue of a parse failure.
    pub fn write_parse_failure(&mut self, error: &ParseError) -> std::io::Result<()> {
        self.write_error("Failed to parse robots.txt")?;
        for issue in error.iter() {
            writeln!(self.writer, "  {}", issue)?;
        }
        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robotstxt_core::{parse_str, parse::parse_strict};

    const ROBOTS: &str = "\
User-agent: Googlebot
Crawl-delay: 2.5
Disallow: /private
Allow: /private/open

User-agent: *
Disallow: /

Host: example.com
Sitemap: https://example.com/sitemap.xml
";

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report_for_matching_group() {
        let data = parse_str(ROBOTS).unwrap();
        let report = CheckReport::build(
            &data,
            "Googlebot/2.1",
            &paths(&["/public", "/private/x", "/private/open/y"]),
        );

        assert_eq!(report.policy, Policy::Directives);
        assert_eq!(report.group.as_deref(), Some("Googlebot"));
        assert_eq!(report.crawl_delay, Some(2.5));
        assert_eq!(report.host.as_deref(), Some("example.com"));
        assert_eq!(report.sitemaps, vec!["https://example.com/sitemap.xml"]);

        assert!(report.results[0].allowed);
        assert_eq!(report.results[0].rule, None);
        assert!(!report.results[1].allowed);
        assert_eq!(report.results[1].rule.as_deref(), Some("Disallow: /private"));
        assert_eq!(report.results[1].line, Some(3));
        assert!(report.results[2].allowed);
        assert_eq!(report.results[2].rule.as_deref(), Some("Allow: /private/open"));
        assert_eq!(report.disallowed(), 1);
    }

    #[test]
    fn test_report_falls_back_to_wildcard() {
        let data = parse_str(ROBOTS).unwrap();
        let report = CheckReport::build(&data, "Bingbot", &paths(&["/anything"]));

        assert_eq!(report.group.as_deref(), Some("*"));
        assert_eq!(report.crawl_delay, None);
        assert!(!report.results[0].allowed);
        assert_eq!(report.results[0].rule.as_deref(), Some("Disallow: /"));
    }

    #[test]
    fn test_report_for_blanket_policies() {
        let report = CheckReport::build(&RobotsData::disallow_all(), "bot", &paths(&["/"]));
        assert_eq!(report.policy, Policy::DisallowAll);
        assert_eq!(report.group, None);
        assert!(!report.results[0].allowed);
        assert_eq!(report.results[0].rule, None);

        let report = CheckReport::build(&RobotsData::allow_all(), "bot", &paths(&["/"]));
        assert_eq!(report.policy, Policy::AllowAll);
        assert_eq!(report.disallowed(), 0);
    }

    #[test]
    fn test_report_json() {
        let data = parse_str(ROBOTS).unwrap();
        let report = CheckReport::build(&data, "Googlebot", &paths(&["/private"]));

        let mut buf = Vec::new();
        report.write_json(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["policy"], "directives");
        assert_eq!(json["group"], "Googlebot");
        assert_eq!(json["results"][0]["allowed"], false);
        assert_eq!(json["results"][0]["rule"], "Disallow: /private");
        assert!(json["sitemaps"].is_array());
    }

    #[test]
    fn test_report_json_omits_missing_fields() {
        let report = CheckReport::build(&RobotsData::allow_all(), "bot", &paths(&["/"]));

        let mut buf = Vec::new();
        report.write_json(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["policy"], "allow-all");
        assert!(json.get("group").is_none());
        assert!(json.get("host").is_none());
        assert!(json["results"][0].get("rule").is_none());
    }

    #[test]
    fn test_human_output_no_colors() {
        let data = parse_str(ROBOTS).unwrap();
        let report = CheckReport::build(&data, "Googlebot", &paths(&["/public", "/private"]));

        let mut buf = Vec::new();
        report.write_human(&mut buf, false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("==> Googlebot (Googlebot)"));
        assert!(text.contains("Crawl-delay: 2.5s"));
        assert!(text.contains("[ALLOW] /public"));
        assert!(text.contains("[DENY] /private (Disallow: /private, line 3)"));
        assert!(text.contains("1 of 2 path(s) disallowed"));
    }

    #[test]
    fn test_human_output_summary_all_allowed() {
        let mut buf = Vec::new();
        let mut output = HumanOutput::new(&mut buf, false);
        output.write_summary(3, 0).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("All 3 path(s) allowed"));
    }

    #[test]
    fn test_parse_failure_output() {
        let err = parse_strict(b"Disallow: /x\nUser-agent: *\nCrawl-delay: x\n").unwrap_err();

        let mut buf = Vec::new();
        JsonParseFailure::new(&err).write(&mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["errors"].as_array().unwrap().len(), 2);
        assert_eq!(json["errors"][0]["line"], 1);
        assert_eq!(json["errors"][1]["line"], 3);

        let mut buf = Vec::new();
        HumanOutput::new(&mut buf, false)
            .write_parse_failure(&err)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Error: Failed to parse robots.txt"));
        assert!(text.contains("before User-agent"));
    }
}
