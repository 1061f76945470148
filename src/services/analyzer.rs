// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DiffFacts;

/// Declaration keywords per language family. Every entry is tried on every
/// added line, so a line may contribute more than one name.
static DECLARATION_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        ("rust", Regex::new(r"\bfn\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()),
        (
            "go",
            Regex::new(r"\bfunc\s+(?:\([^)]*\)\s*)?([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        ),
        ("python", Regex::new(r"\bdef\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()),
        (
            "javascript",
            Regex::new(r"\bfunction\b\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)").unwrap(),
        ),
        ("class", Regex::new(r"\bclass\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap()),
    ]
});

static IMPORT_PATTERNS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    vec![
        ("import", Regex::new(r"^import\b").unwrap()),
        ("from", Regex::new(r"^from\s+\S+\s+import\b").unwrap()),
        ("include", Regex::new(r"^#\s*include\b").unwrap()),
        ("use", Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?use\s+[A-Za-z_:{]").unwrap()),
        ("extern", Regex::new(r"^extern\s+crate\b").unwrap()),
        ("require", Regex::new(r"\brequire\s*[\s(]").unwrap()),
        ("using", Regex::new(r"^using\s+[A-Za-z_]").unwrap()),
    ]
});

pub struct DiffAnalyzer;

impl DiffAnalyzer {
    /// Scan one file's unified diff for line counts, declarations and imports.
    pub fn analyze(diff: &str) -> DiffFacts {
        let mut facts = DiffFacts::default();

        for line in diff.lines() {
            if let Some(added) = line.strip_prefix('+') {
                if line.starts_with("+++") {
                    continue;
                }
                facts.lines_added += 1;
                facts.function_names.extend(Self::declared_names(added));
                if Self::is_import(added) {
                    facts.import_lines.push(added.trim().to_string());
                }
            } else if line.starts_with('-') && !line.starts_with("---") {
                facts.lines_removed += 1;
            }
        }

        facts
    }

    /// Identifiers declared on a single source line, table order.
    pub fn declared_names(line: &str) -> Vec<String> {
        DECLARATION_PATTERNS
            .iter()
            .filter_map(|(_, pattern)| pattern.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn is_import(line: &str) -> bool {
        let trimmed = line.trim();
        IMPORT_PATTERNS.iter().any(|(_, p)| p.is_match(trimmed))
    }
}
