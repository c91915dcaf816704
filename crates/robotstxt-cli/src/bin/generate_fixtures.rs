//! Generate robots.txt fixtures for benchmarking.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Writes one robots.txt per preset plus a `queries.txt` of paths to test
//! against them, one path per line.

use robotstxt_core::generate::{GeneratorConfig, generate, generate_queries};
use robotstxt_core::{WILDCARD_AGENT, parse_str, query};
use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};

/// Presets written to disk, matching benches/fixtures.rs.
const PRESETS: &[(&str, fn() -> GeneratorConfig)] = &[
    ("small", GeneratorConfig::small),
    ("medium", GeneratorConfig::medium),
    ("large", GeneratorConfig::large),
    ("xlarge", GeneratorConfig::xlarge),
];

const QUERY_COUNT: usize = 256;
const QUERY_SEED: u64 = 7;

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/fixtures"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    let queries = generate_queries(QUERY_COUNT, QUERY_SEED);
    let queries_path = output_dir.join("queries.txt");
    fs::write(&queries_path, queries.join("\n") + "\n")?;
    println!("Generated {} ({} paths)", queries_path.display(), queries.len());

    for (name, config_fn) in PRESETS {
        let config = config_fn();
        let content = generate(&config);
        let path = output_dir.join(format!("{name}.robots.txt"));
        fs::write(&path, &content)?;

        let data = parse_str(&content).map_err(io::Error::other)?;
        let groups = data.groups().map_or(0, |g| g.len());
        let disallowed = queries
            .iter()
            .filter(|q| !query(&data, WILDCARD_AGENT, q))
            .count();
        println!(
            "Generated {} ({} bytes, {} groups, {} sitemaps, {}/{} queries disallowed for '*')",
            path.display(),
            content.len(),
            groups,
            data.sitemaps().len(),
            disallowed,
            queries.len()
        );
    }

    Ok(())
}
