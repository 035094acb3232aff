use crate::ir::{Conversion, Diagnostic, Stats};

const RULE: &str = "------------------------------------";

pub fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::Malformed { line } => format!("MALFORMED: {}", line),
        Diagnostic::Duplicate { from, to } => format!("DUPLICATE: {} --> {}", from, to),
        Diagnostic::Repeat { from, to, count } => format!("REPEAT ({}): {} --> {}", count, from, to),
    }
}

pub fn stats_block(stats: &Stats) -> Vec<String> {
    let mut out = vec!["----------------STATS---------------".to_string()];
    out.push(format!("LINES: {}", stats.lines));
    if stats.malformed > 0 {
        out.push(format!("MALFORMED: {}", stats.malformed));
    }
    out.push(format!("DUPLICATES: {}", stats.duplicates));
    out.push(format!("REPEATS: {}", stats.repeats));
    out.push(format!("OK: {}", stats.unique));
    out.push(RULE.to_string());
    out
}

/// Diagnostics in pipeline order, then the stats block.
pub fn render(conversion: &Conversion) -> Vec<String> {
    let mut out: Vec<String> = conversion.diagnostics.iter().map(diagnostic_line).collect();
    out.extend(stats_block(&conversion.stats));
    out
}
