pub mod config;
pub mod emit;
pub mod error;
pub mod filter;
pub mod ir;
pub mod path;
pub mod read;
pub mod redirect;
pub mod report;

use config::Config;
use ir::{Conversion, Stats};
use std::path::Path;

pub use error::{Error, Result};

/// Runs the redirect pipeline over lines already filtered by [`read::stage0`].
pub fn convert(lines: &[String]) -> Conversion {
    let mut diagnostics = Vec::new();
    let mut stats = Stats {
        lines: lines.len(),
        ..Stats::default()
    };

    // Stage 1
    let built = redirect::build_all(lines);
    stats.malformed = built.diagnostics.len();
    diagnostics.extend(built.diagnostics);

    // Stage 2
    let unique_pairs = filter::filter_duplicates(built.redirects);
    stats.duplicates = unique_pairs.diagnostics.len();
    diagnostics.extend(unique_pairs.diagnostics);

    // Stage 3
    let collapsed = filter::collapse_repeats(unique_pairs.redirects);
    stats.repeats = collapsed
        .diagnostics
        .iter()
        .map(|d| match d {
            ir::Diagnostic::Repeat { count, .. } => *count,
            _ => 0,
        })
        .sum();
    diagnostics.extend(collapsed.diagnostics);

    stats.unique = collapsed.redirects.len();
    Conversion {
        redirects: collapsed.redirects,
        diagnostics,
        stats,
    }
}

/// Rewrite-map name for an input file: the configured override, else the
/// file name without directory or extension.
pub fn map_name(input: &Path, config: &Config) -> String {
    if let Some(ref name) = config.map_name {
        return name.clone();
    }
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads `input`, converts it and writes the rewrite map to `config.output`.
/// Nothing is written unless the input was read in full.
pub fn run(input: &Path, config: &Config) -> Result<Conversion> {
    let lines = read::read_lines(input)?;
    let conversion = convert(&lines);
    let xml = emit::render_xml(&map_name(input, config), &conversion.redirects, config);
    emit::write_xml(&config.output, &xml)?;
    Ok(conversion)
}
