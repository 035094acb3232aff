use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Splits input text into redirect lines.
///
/// Line endings are normalized and trailing whitespace trimmed. Lines
/// without a `/` are headers or comments and are dropped.
pub fn stage0(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split('\n')
        .map(|l| l.trim_end())
        .filter(|l| l.contains('/'))
        .map(str::to_string)
        .collect()
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = stage0(&text);
    tracing::debug!(path = %path.display(), lines = lines.len(), "read redirect lines");
    Ok(lines)
}
