use crate::ir::{Diagnostic, Redirect, StageResult};
use crate::path::{extract_path, RE_SCHEME_AUTHORITY};
use regex::Regex;
use std::sync::LazyLock;

/// A tab (with any surrounding blanks) or two or more whitespace characters.
/// Single spaces stay inside a field so unencoded query values survive.
static RE_FIELD_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\t\s*|\s{2,}").unwrap());
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

fn looks_like_target(token: &str) -> bool {
    token.starts_with('/') || RE_SCHEME_AUTHORITY.is_match(token)
}

/// Splits a redirect line into fields.
///
/// Tab-separated or column-aligned fields are preferred. When that yields
/// fewer than two fields, single spaces separate them: the first token is
/// the source and the destination runs from the last later token that
/// starts with `/` or a scheme to the end of the line. Without such a
/// token only the source is returned.
pub fn split_fields(line: &str) -> Vec<&str> {
    let line = line.trim();
    let fields: Vec<&str> = RE_FIELD_SEP
        .split(line)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if fields.len() >= 2 {
        return fields;
    }

    let tokens: Vec<_> = RE_TOKEN.find_iter(line).collect();
    let Some(first) = tokens.first() else {
        return Vec::new();
    };
    match tokens[1..].iter().rev().find(|m| looks_like_target(m.as_str())) {
        Some(to) => vec![first.as_str(), &line[to.start()..]],
        None => vec![first.as_str()],
    }
}

/// Builds a redirect from the first and last fields of `line`. Middle
/// fields are ignored. Returns `None` when the line has fewer than two.
pub fn build(line: &str) -> Option<Redirect> {
    let fields = split_fields(line);
    if fields.len() < 2 {
        return None;
    }
    let from = fields[0];
    let to = fields[fields.len() - 1];
    Some(Redirect {
        from: extract_path(from, false),
        to: extract_path(to, true),
        line: line.to_string(),
    })
}

pub fn build_all(lines: &[String]) -> StageResult {
    let mut redirects = Vec::with_capacity(lines.len());
    let mut diagnostics = Vec::new();

    for line in lines {
        match build(line) {
            Some(redirect) => redirects.push(redirect),
            None => {
                tracing::warn!(line = %line, "skipping line without two fields");
                diagnostics.push(Diagnostic::Malformed { line: line.clone() });
            }
        }
    }

    StageResult {
        redirects,
        diagnostics,
    }
}
