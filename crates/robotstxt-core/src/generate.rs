//! Random robots.txt generation for benchmarking and testing.
//!
//! Output is built line by line from a small vocabulary of agents and
//! paths, so it always parses cleanly.

use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Write;

/// Configuration for generating robots.txt files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of user-agent groups to generate.
    pub num_groups: usize,
    /// Maximum rules per group (at least 1).
    pub max_rules_per_group: usize,
    /// Number of sitemap lines to append.
    pub num_sitemaps: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_groups: 10,
            max_rules_per_group: 8,
            num_sitemaps: 2,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given number of groups.
    pub fn new(num_groups: usize) -> Self {
        Self {
            num_groups,
            ..Default::default()
        }
    }

    /// Small fixture (~5 groups).
    pub fn small() -> Self {
        Self::new(5)
    }

    /// Medium fixture (~50 groups).
    pub fn medium() -> Self {
        Self::new(50)
    }

    /// Large fixture (~500 groups).
    pub fn large() -> Self {
        Self::new(500)
    }

    /// Extra large fixture (~5000 groups).
    pub fn xlarge() -> Self {
        Self::new(5000)
    }

    /// Generate a file targeting approximately the given byte size.
    ///
    /// Note: Actual size varies with the rules drawn.
    pub fn target_bytes(bytes: usize) -> Self {
        // An average group is ~120 bytes
        Self::new(bytes.saturating_div(120).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum rules per group.
    pub fn with_max_rules(mut self, max: usize) -> Self {
        self.max_rules_per_group = max.max(1);
        self
    }

    /// Set the number of sitemaps.
    pub fn with_sitemaps(mut self, num_sitemaps: usize) -> Self {
        self.num_sitemaps = num_sitemaps;
        self
    }
}

/// Vocabulary for generating realistic groups.
mod vocabulary {
    pub const AGENTS: &[&str] = &[
        "Googlebot",
        "Googlebot-Image",
        "Bingbot",
        "Slurp",
        "DuckDuckBot",
        "Baiduspider",
        "YandexBot",
        "facebot",
        "ia_archiver",
    ];
    pub const PATH_TEMPLATES: &[&str] = &[
        "/{dir}/",
        "/{dir}/{page}",
        "/{dir}/*.{ext}",
        "/*.{ext}$",
        "/{dir}/*/{page}",
        "/{page}?*",
        "/",
    ];
    pub const DIRECTORIES: &[&str] = &[
        "admin", "cgi-bin", "private", "tmp", "search", "api", "assets", "user",
    ];
    pub const PAGES: &[&str] = &["index.html", "login", "cart", "print", "feed", "preview"];
    pub const EXTENSIONS: &[&str] = &["php", "pdf", "json", "xml", "gif", "js"];
}

/// Probability of a group declaring a second agent (percentage).
const SHARED_GROUP_PROBABILITY: u32 = 20;
/// Probability of a rule being `Allow` (percentage).
const ALLOW_PROBABILITY: u32 = 30;
/// Probability of a group carrying a crawl delay (percentage).
const CRAWL_DELAY_PROBABILITY: u32 = 25;

/// Generates a robots.txt file as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = String::with_capacity(config.num_groups * 128);

    out.push_str("# Auto-generated robots.txt for benchmarking\n");

    for idx in 0..config.num_groups {
        out.push('\n');
        if idx == 0 {
            out.push_str("User-agent: *\n");
        } else {
            let agent = AGENTS[rng.random_range(0..AGENTS.len())];
            let _ = writeln!(out, "User-agent: {}-{}", agent, idx);
            if rng.random_ratio(SHARED_GROUP_PROBABILITY, 100) {
                let _ = writeln!(out, "User-agent: {}", agent.to_lowercase());
            }
        }

        if rng.random_ratio(CRAWL_DELAY_PROBABILITY, 100) {
            let _ = writeln!(out, "Crawl-delay: {}", rng.random_range(1..=30));
        }

        let num_rules = rng.random_range(1..=config.max_rules_per_group);
        for _ in 0..num_rules {
            let keyword = if rng.random_ratio(ALLOW_PROBABILITY, 100) {
                "Allow"
            } else {
                "Disallow"
            };
            let _ = writeln!(out, "{}: {}", keyword, generate_path(&mut rng));
        }
    }

    if config.num_sitemaps > 0 {
        out.push('\n');
    }
    for idx in 0..config.num_sitemaps {
        let _ = writeln!(out, "Sitemap: https://www.example.com/sitemap-{}.xml", idx);
    }

    out
}

/// Generate a random rule path from the templates.
fn generate_path(rng: &mut StdRng) -> String {
    use vocabulary::*;

    let template = PATH_TEMPLATES[rng.random_range(0..PATH_TEMPLATES.len())];
    template
        .replace("{dir}", DIRECTORIES[rng.random_range(0..DIRECTORIES.len())])
        .replace("{page}", PAGES[rng.random_range(0..PAGES.len())])
        .replace("{ext}", EXTENSIONS[rng.random_range(0..EXTENSIONS.len())])
}

/// Generates query paths that exercise the vocabulary.
pub fn generate_queries(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| generate_path(&mut rng).replace(['*', '$'], "x")).collect()
}
