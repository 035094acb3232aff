use crate::ir::{Diagnostic, Redirect, StageResult};
use indexmap::IndexMap;

/// Drops redirects that point at themselves (ignoring ASCII case).
pub fn filter_duplicates(redirects: Vec<Redirect>) -> StageResult {
    let mut kept = Vec::with_capacity(redirects.len());
    let mut diagnostics = Vec::new();

    for redirect in redirects {
        if redirect.from.eq_ignore_ascii_case(&redirect.to) {
            diagnostics.push(Diagnostic::Duplicate {
                from: redirect.from,
                to: redirect.to,
            });
        } else {
            kept.push(redirect);
        }
    }

    tracing::debug!(kept = kept.len(), dropped = diagnostics.len(), "filtered duplicates");
    StageResult {
        redirects: kept,
        diagnostics,
    }
}

/// Keeps the first redirect for each lowercased `from`.
///
/// Groups come out in order of first appearance. One diagnostic is produced
/// per group that had later repeats, carrying the number dropped.
pub fn collapse_repeats(redirects: Vec<Redirect>) -> StageResult {
    let mut groups: IndexMap<String, (Redirect, usize)> = IndexMap::new();

    for redirect in redirects {
        groups
            .entry(redirect.from.to_lowercase())
            .and_modify(|(_, repeats)| *repeats += 1)
            .or_insert((redirect, 0));
    }

    let mut kept = Vec::with_capacity(groups.len());
    let mut diagnostics = Vec::new();
    for (_, (redirect, repeats)) in groups {
        if repeats > 0 {
            diagnostics.push(Diagnostic::Repeat {
                from: redirect.from.clone(),
                to: redirect.to.clone(),
                count: repeats,
            });
        }
        kept.push(redirect);
    }

    tracing::debug!(kept = kept.len(), groups_repeated = diagnostics.len(), "collapsed repeats");
    StageResult {
        redirects: kept,
        diagnostics,
    }
}
