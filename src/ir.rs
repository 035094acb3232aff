/// One redirect rule: an old path and the path it now lives at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    /// Raw input line, kept for diagnostics.
    pub line: String,
}

/// Something a stage dropped, reported after the pipeline finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Line had a `/` but did not split into two fields.
    Malformed { line: String },
    /// `from` and `to` are the same path ignoring case.
    Duplicate { from: String, to: String },
    /// Later lines repeated the `from` of the kept redirect.
    Repeat { from: String, to: String, count: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub lines: usize,
    pub malformed: usize,
    pub duplicates: usize,
    pub repeats: usize,
    pub unique: usize,
}

/// Output of a stage: survivors plus what was dropped.
pub struct StageResult {
    pub redirects: Vec<Redirect>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct Conversion {
    pub redirects: Vec<Redirect>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: Stats,
}
