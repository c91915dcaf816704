//! Access checks against parsed robots.txt files.
//!
//! Matching happens in two steps, both "most specific wins":
//!
//! - **Group selection**: among the declared agents that are a
//!   case-insensitive prefix of the crawler's name, the longest wins. The
//!   `*` group is the weakest candidate (score 1) and only applies when
//!   nothing more specific does.
//! - **Rule selection**: within the group, the rule whose path is the
//!   longest prefix of the query path wins. Wildcard rules that match
//!   score the length of their rule text. `Disallow: /` and `Allow: /`
//!   score 1 so any other matching rule overrides them.
//!
//! Equal scores keep the first-declared candidate. A query with no
//! matching rule is allowed.

use crate::parse::{Group, RobotsData, Rule, RulePath};
use std::borrow::Cow;
use std::time::Duration;

/// The agent name that applies to every crawler.
pub const WILDCARD_AGENT: &str = "*";

impl Rule {
    /// Returns this rule's specificity for `path`, or `None` if it does not apply.
    ///
    /// A pattern scores the length of its normalized rule text (`/*.pdf$`
    /// scores 7), not the length of the compiled regex, so two patterns
    /// compare by what was written.
    pub fn specificity(&self, path: &str) -> Option<usize> {
        match &self.path {
            RulePath::Pattern { regex, source } => regex.is_match(path).then_some(source.len()),
            // Weakest match possible
            RulePath::Literal(prefix) if prefix == "/" => Some(1),
            RulePath::Literal(prefix) => path.starts_with(prefix.as_str()).then_some(prefix.len()),
        }
    }
}

impl Group {
    /// Returns the most specific rule that applies to `path`.
    pub fn find_rule(&self, path: &str) -> Option<&Rule> {
        match_rule(self, path)
    }

    /// Returns true if this group lets a crawler fetch `path`.
    pub fn test(&self, path: &str) -> bool {
        self.find_rule(path).is_none_or(|rule| rule.allow)
    }
}

impl RobotsData {
    /// Returns the group that governs `agent`.
    ///
    /// Falls back to the `*` group, then to an empty group.
    pub fn find_group(&self, agent: &str) -> Cow<'_, Group> {
        find_group(self, agent)
    }

    /// Returns true if `agent` may fetch `path`.
    pub fn test_agent(&self, agent: &str, path: &str) -> bool {
        query(self, agent, path)
    }

    /// Returns the crawl delay requested of `agent`, if any.
    pub fn crawl_delay(&self, agent: &str) -> Option<Duration> {
        self.find_group(agent).crawl_delay
    }
}

/// Selects the most specific group for `agent`.
pub fn find_group<'a>(data: &'a RobotsData, agent: &str) -> Cow<'a, Group> {
    match select_group(data, agent) {
        Some(group) => Cow::Borrowed(group),
        None => Cow::Owned(Group::default()),
    }
}

fn select_group<'a>(data: &'a RobotsData, agent: &str) -> Option<&'a Group> {
    let groups = data.groups()?;
    let agent = agent.to_lowercase();

    let mut best = groups.get(WILDCARD_AGENT);
    let mut best_len = if best.is_some() { 1 } else { 0 };

    for group in groups {
        let name = group.agent.to_lowercase();
        if name != WILDCARD_AGENT && agent.starts_with(&name) && name.len() > best_len {
            best_len = name.len();
            best = Some(group);
        }
    }
    best
}

/// Selects the most specific rule in `group` that applies to `path`.
pub fn match_rule<'a>(group: &'a Group, path: &str) -> Option<&'a Rule> {
    let mut best = None;
    let mut best_len = 0;

    for rule in &group.rules {
        if let Some(len) = rule.specificity(path) {
            if len > best_len {
                best_len = len;
                best = Some(rule);
            }
        }
    }
    best
}

/// Returns true if `agent` may fetch `path` under `data`.
pub fn query(data: &RobotsData, agent: &str, path: &str) -> bool {
    if data.is_allow_all() {
        return true;
    }
    if data.is_disallow_all() {
        return false;
    }
    find_group(data, agent).test(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_str;

    fn robots(input: &str) -> RobotsData {
        parse_str(input).unwrap()
    }

    #[test]
    fn blanket_documents_short_circuit() {
        let allow = RobotsData::allow_all();
        let deny = RobotsData::disallow_all();
        for (agent, path) in [("*", "/"), ("Googlebot", "/private"), ("", "")] {
            assert!(query(&allow, agent, path));
            assert!(!query(&deny, agent, path));
        }
    }

    #[test]
    fn empty_input_allows_everything() {
        let data = robots("");
        assert!(data.test_agent("AnyBot", "/anything"));
    }

    #[test]
    fn agent_matching_is_case_insensitive() {
        let data = robots("User-agent: GoogleBot\nDisallow: /private\n");
        for agent in ["Googlebot", "googlebot", "GOOGLEBOT"] {
            assert!(!data.test_agent(agent, "/private/page"), "agent {}", agent);
        }
    }

    #[test]
    fn longest_agent_prefix_wins() {
        let data = robots("User-agent: *\nDisallow: /a\n\nUser-agent: Bot\nDisallow: /b\n");
        assert_eq!(find_group(&data, "Botling").agent, "Bot");
        assert_eq!(find_group(&data, "Crawler").agent, "*");
    }

    #[test]
    fn overlapping_agent_names() {
        let data = robots(
            "User-agent: *\nDisallow: /foo\n\n\
             User-agent: Bot\nAllow: /foo/bar\n\n\
             User-agent: Bot-1\nDisallow: /foo/bar/baz\n",
        );
        assert!(!data.test_agent("Spider", "/foo"));
        assert!(data.test_agent("Bot", "/foo/bar"));
        assert!(data.test_agent("Bot-1", "/foo/bar"));
        assert!(!data.test_agent("Bot-1", "/foo/bar/baz"));
        assert_eq!(find_group(&data, "Bot-12").agent, "Bot-1");
    }

    #[test]
    fn wildcard_group_wins_one_character_tie() {
        let data = robots("User-agent: *\nDisallow: /star\n\nUser-agent: b\nDisallow: /b\n");
        assert_eq!(find_group(&data, "bot").agent, "*");
    }

    #[test]
    fn no_matching_group_is_empty() {
        let data = robots("User-agent: Bot\nDisallow: /\n");
        let group = find_group(&data, "Crawler");
        assert!(group.is_empty());
        assert!(matches!(group, Cow::Owned(_)));
        assert!(data.test_agent("Crawler", "/anything"));
    }

    #[test]
    fn blanket_document_has_empty_group() {
        assert!(RobotsData::disallow_all().find_group("*").is_empty());
    }

    #[test]
    fn longer_literal_prefix_wins() {
        let data = robots("User-agent: *\nDisallow: /a\nAllow: /ab\n");
        assert!(data.test_agent("x", "/ab/c"));
        assert!(!data.test_agent("x", "/a/c"));
        assert!(!data.test_agent("x", "/ac"));
    }

    #[test]
    fn rule_order_does_not_matter() {
        let data = robots("User-agent: *\nAllow: /ab\nDisallow: /a\n");
        assert!(data.test_agent("x", "/ab/c"));
        assert!(!data.test_agent("x", "/a/c"));
    }

    #[test]
    fn equal_scores_keep_first_rule() {
        let data = robots("User-agent: *\nDisallow: /page\nAllow: /page\n");
        let group = find_group(&data, "x");
        let rule = match_rule(&group, "/page").unwrap();
        assert!(!rule.allow);
        assert_eq!(rule.line, 2);
    }

    #[test]
    fn root_rule_is_weakest() {
        let data = robots("User-agent: *\nDisallow: /\nAllow: /p\n");
        assert!(data.test_agent("x", "/public"));
        assert!(!data.test_agent("x", "/secret"));

        let data = robots("User-agent: *\nAllow: /p\nDisallow: /\n");
        assert!(data.test_agent("x", "/public"));
        assert!(!data.test_agent("x", "/secret"));
    }

    #[test]
    fn empty_disallow_never_restricts() {
        let data = robots("User-agent: *\nDisallow:\n");
        for path in ["/", "/a", "/a/b/c", ""] {
            assert!(data.test_agent("x", path));
        }
    }

    #[test]
    fn empty_disallow_does_not_borrow_later_rules() {
        let data = robots("User-agent: Googlebot\nDisallow:\n\nUser-agent: *\nDisallow: /\n");
        assert!(query(&data, "Googlebot", "/page"));
        assert!(!query(&data, "OtherBot", "/page"));
    }

    #[test]
    fn skipped_crawl_delay_does_not_borrow_later_rules() {
        let data = robots("User-agent: a\nCrawl-delay: soon\n\nUser-agent: *\nDisallow: /\n");
        assert!(query(&data, "a", "/page"));
        assert!(!query(&data, "b", "/page"));
    }

    #[test]
    fn no_rules_means_allowed() {
        let data = robots("User-agent: *\nDisallow: /private\n");
        assert!(data.test_agent("x", "/public"));
    }

    #[test]
    fn end_anchor_pattern() {
        let data = robots("User-agent: *\nDisallow: /\nAllow: /*.pdf$\n");
        assert!(data.test_agent("x", "/file.pdf"));
        assert!(data.test_agent("x", "/docs/file.pdf"));
        assert!(!data.test_agent("x", "/file.pdf.bak"));
        assert!(!data.test_agent("x", "/file.html"));
    }

    #[test]
    fn wildcard_pattern_matches_from_start() {
        let data = robots("User-agent: *\nDisallow: /a*b\n");
        assert!(!data.test_agent("x", "/a/b"));
        assert!(!data.test_agent("x", "/axxb/more"));
        assert!(data.test_agent("x", "/x/a/b"));
    }

    #[test]
    fn wildcard_escapes_regex_characters() {
        let data = robots("User-agent: *\nDisallow: /*.php?id=\n");
        assert!(!data.test_agent("x", "/index.php?id=7"));
        assert!(data.test_agent("x", "/indexXphp?id=7"));
        assert!(data.test_agent("x", "/index.phpid="));
    }

    #[test]
    fn longer_pattern_beats_shorter() {
        let data = robots("User-agent: *\nDisallow: /*.html\nAllow: /*/public/*.html\n");
        assert!(data.test_agent("x", "/site/public/index.html"));
        assert!(!data.test_agent("x", "/site/private/index.html"));
    }

    #[test]
    fn specificity_scores() {
        assert_eq!(Rule::disallow("/").specificity("/anything"), Some(1));
        assert_eq!(Rule::disallow("/").specificity(""), Some(1));
        assert_eq!(Rule::allow("/abc").specificity("/abcdef"), Some(4));
        assert_eq!(Rule::allow("/abc").specificity("/ab"), None);

        let data = robots("User-agent: *\nDisallow: /*.pdf$\n");
        let rule = &data.group("*").unwrap().rules[0];
        assert_eq!(rule.specificity("/docs/a.pdf"), Some(7));
        assert_eq!(rule.specificity("/docs/a.pdf.html"), None);
    }

    #[test]
    fn crawl_delay_follows_group_selection() {
        let data = robots(
            "User-agent: *\nCrawl-delay: 10\n\nUser-agent: fastbot\nCrawl-delay: 0.5\n",
        );
        assert_eq!(data.crawl_delay("FastBot/2.0"), Some(Duration::from_millis(500)));
        assert_eq!(data.crawl_delay("slowbot"), Some(Duration::from_secs(10)));
        assert_eq!(RobotsData::allow_all().crawl_delay("x"), None);
    }

    #[test]
    fn example_document() {
        let data = robots(
            "User-agent: *\n\
             Disallow: /private\n\
             User-agent: Bot\n\
             Allow: /\n\
             Sitemap: http://example.com/sitemap.xml\n",
        );
        assert!(!query(&data, "OtherAgent", "/private/x"));
        assert!(query(&data, "Bot", "/private/x"));
        assert_eq!(data.sitemaps(), ["http://example.com/sitemap.xml"]);
    }
}
