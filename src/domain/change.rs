// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Unmerged,
    Untracked,
    Unknown,
}

impl ChangeStatus {
    /// Derive a status from a porcelain code such as `M`, `AM`, `??` or `R`.
    ///
    /// Codes carry one letter per column, so the first letter that matches in
    /// the order added, deleted, modified, renamed, copied, unmerged wins.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code == "??" {
            return Self::Untracked;
        }

        [
            ('A', Self::Added),
            ('D', Self::Deleted),
            ('M', Self::Modified),
            ('R', Self::Renamed),
            ('C', Self::Copied),
            ('U', Self::Unmerged),
        ]
        .into_iter()
        .find(|(letter, _)| code.contains(*letter))
        .map(|(_, status)| status)
        .unwrap_or(Self::Unknown)
    }

    /// Added to the index or not yet tracked at all.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Added | Self::Untracked)
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Added => "[+]",
            Self::Modified => "[M]",
            Self::Deleted => "[-]",
            Self::Renamed => "[R]",
            Self::Copied => "[C]",
            Self::Unmerged => "[U]",
            Self::Untracked => "[?]",
            Self::Unknown => "[ ]",
        }
    }
}

/// One entry from `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    /// Raw porcelain code, both columns (`"M "`, `" M"`, `"??"`, ...).
    pub status_code: String,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, status_code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status_code: status_code.into(),
        }
    }

    pub fn status(&self) -> ChangeStatus {
        ChangeStatus::from_code(&self.status_code)
    }

    /// Whether the index column records a change, i.e. `git commit` would
    /// pick this file up without a further `git add`.
    pub fn is_staged(&self) -> bool {
        matches!(self.status_code.chars().next(), Some(c) if c != ' ' && c != '?')
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Structural facts pulled from a unified diff. Heuristic, never exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFacts {
    pub lines_added: usize,
    pub lines_removed: usize,
    /// Declared identifiers on added lines, in order of appearance.
    pub function_names: Vec<String>,
    /// Trimmed text of added import/include lines.
    pub import_lines: Vec<String>,
}

impl DiffFacts {
    pub fn is_empty(&self) -> bool {
        self.lines_added == 0
            && self.lines_removed == 0
            && self.function_names.is_empty()
            && self.import_lines.is_empty()
    }

    pub fn has_functions(&self) -> bool {
        !self.function_names.is_empty()
    }

    pub fn has_imports(&self) -> bool {
        !self.import_lines.is_empty()
    }

    /// The detected name when exactly one declaration was found.
    pub fn sole_function(&self) -> Option<&str> {
        match self.function_names.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn total_lines(&self) -> usize {
        self.lines_added + self.lines_removed
    }
}

#[derive(Debug, Default)]
pub struct DiffStats {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn from_facts<'a>(facts: impl IntoIterator<Item = &'a DiffFacts>) -> Self {
        facts.into_iter().fold(Self::default(), |mut stats, f| {
            stats.files_changed += 1;
            stats.insertions += f.lines_added;
            stats.deletions += f.lines_removed;
            stats
        })
    }
}
