//! Data structures for parsed robots.txt files.
//!
//! A parsed file is either one of the two blanket policies (allow-all,
//! disallow-all) or a set of per-agent [`Group`]s plus the file-wide
//! `Host` and `Sitemap` values.

use regex::Regex;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::time::Duration;

/// The path half of an `Allow`/`Disallow` rule.
#[derive(Debug, Clone)]
pub enum RulePath {
    /// A plain path, matched as a prefix of the query path.
    Literal(String),
    /// A path containing `*` or ending in `$`, compiled to a regex.
    Pattern {
        /// The compiled, start-anchored expression.
        regex: Regex,
        /// The normalized rule text the regex was built from.
        source: String,
    },
}

impl RulePath {
    /// Returns the rule text as written (after normalization).
    pub fn as_str(&self) -> &str {
        match self {
            RulePath::Literal(path) => path,
            RulePath::Pattern { source, .. } => source,
        }
    }

    /// Returns true if this path uses wildcards or an end anchor.
    pub fn is_pattern(&self) -> bool {
        matches!(self, RulePath::Pattern { .. })
    }
}

impl PartialEq for RulePath {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for RulePath {}

impl Display for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `Allow` or `Disallow` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// True for `Allow`, false for `Disallow`.
    pub allow: bool,
    /// The path or pattern the rule applies to.
    pub path: RulePath,
    /// The line the rule was declared on (1-based).
    pub line: usize,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(allow: bool, path: RulePath, line: usize) -> Self {
        Self { allow, path, line }
    }

    /// Creates an `Allow` rule with a literal path.
    pub fn allow(path: impl Into<String>) -> Self {
        Self::new(true, RulePath::Literal(path.into()), 0)
    }

    /// Creates a `Disallow` rule with a literal path.
    pub fn disallow(path: impl Into<String>) -> Self {
        Self::new(false, RulePath::Literal(path.into()), 0)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.allow { "Allow" } else { "Disallow" };
        write!(f, "{}: {}", keyword, self.path)
    }
}

/// The rules that apply to one user agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// The agent name as first declared.
    pub agent: String,
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
    /// Requested delay between successive requests.
    pub crawl_delay: Option<Duration>,
}

impl Group {
    /// Creates an empty group for `agent`.
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            ..Default::default()
        }
    }

    /// Returns true if the group has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Groups keyed by case-folded agent name, in first-declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl Groups {
    /// Creates an empty group map.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(agent: &str) -> String {
        agent.to_lowercase()
    }

    /// Returns the group for `agent`, ignoring case.
    pub fn get(&self, agent: &str) -> Option<&Group> {
        self.index
            .get(&Self::key(agent))
            .map(|&idx| &self.groups[idx])
    }

    /// Returns the group for `agent`, creating an empty one if needed.
    pub fn entry(&mut self, agent: &str) -> &mut Group {
        let next = self.groups.len();
        let idx = *self.index.entry(Self::key(agent)).or_insert(next);
        if idx == next {
            self.groups.push(Group::new(agent));
        }
        &mut self.groups[idx]
    }

    /// Returns an iterator over all groups in first-declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
enum Content {
    AllowAll,
    DisallowAll,
    Directives {
        groups: Groups,
        host: Option<String>,
        sitemaps: Vec<String>,
    },
}

/// A parsed robots.txt file.
///
/// Immutable once built; queries go through [`RobotsData::test_agent`] and
/// [`RobotsData::find_group`].
#[derive(Debug, Clone)]
pub struct RobotsData {
    content: Content,
}

impl RobotsData {
    /// Creates a document from parsed directives.
    pub fn new(groups: Groups, host: Option<String>, sitemaps: Vec<String>) -> Self {
        Self {
            content: Content::Directives {
                groups,
                host,
                sitemaps,
            },
        }
    }

    /// A document that permits every agent on every path.
    pub fn allow_all() -> Self {
        Self {
            content: Content::AllowAll,
        }
    }

    /// A document that denies every agent on every path.
    pub fn disallow_all() -> Self {
        Self {
            content: Content::DisallowAll,
        }
    }

    /// Returns true if this is the blanket allow-all document.
    pub fn is_allow_all(&self) -> bool {
        matches!(self.content, Content::AllowAll)
    }

    /// Returns true if this is the blanket disallow-all document.
    pub fn is_disallow_all(&self) -> bool {
        matches!(self.content, Content::DisallowAll)
    }

    /// Returns the declared groups, or `None` for blanket documents.
    pub fn groups(&self) -> Option<&Groups> {
        match &self.content {
            Content::Directives { groups, .. } => Some(groups),
            _ => None,
        }
    }

    /// Returns the group declared for exactly `agent`, ignoring case.
    ///
    /// This does not fall back to `*`; see [`RobotsData::find_group`].
    pub fn group(&self, agent: &str) -> Option<&Group> {
        self.groups().and_then(|groups| groups.get(agent))
    }

    /// Returns the `Host` directive, if any.
    pub fn host(&self) -> Option<&str> {
        match &self.content {
            Content::Directives { host, .. } => host.as_deref(),
            _ => None,
        }
    }

    /// Returns the `Sitemap` URLs in declaration order.
    pub fn sitemaps(&self) -> &[String] {
        match &self.content {
            Content::Directives { sitemaps, .. } => sitemaps,
            _ => &[],
        }
    }
}
