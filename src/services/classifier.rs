// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;

use crate::domain::{ChangeStatus, ClassifiedChange, CommitType, DiffFacts, FileChange, file_name};
use crate::services::composer::MessageComposer;

/// Everything a rule may look at.
pub struct Evidence<'a> {
    pub path: &'a Path,
    pub status: ChangeStatus,
    pub facts: &'a DiffFacts,
}

struct Rule {
    name: &'static str,
    applies: fn(&Evidence<'_>) -> bool,
    commit_type: CommitType,
}

/// Evaluated top to bottom, first match wins. The last entry always matches.
static RULES: &[Rule] = &[
    Rule {
        name: "new-test",
        applies: |e| e.status.is_new() && (is_test_path(e.path) || has_test_name(e.path)),
        commit_type: CommitType::Test,
    },
    Rule {
        name: "new-docs",
        applies: |e| e.status.is_new() && is_doc_path(e.path),
        commit_type: CommitType::Docs,
    },
    Rule {
        name: "new-function",
        applies: |e| e.status.is_new() && e.facts.has_functions(),
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "new-file",
        applies: |e| e.status.is_new(),
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "deleted",
        applies: |e| e.status == ChangeStatus::Deleted,
        commit_type: CommitType::Chore,
    },
    Rule {
        name: "modified-docs",
        applies: |e| is_modified(e) && is_doc_path(e.path),
        commit_type: CommitType::Docs,
    },
    Rule {
        name: "modified-test",
        applies: |e| is_modified(e) && (is_test_path(e.path) || has_test_name(e.path)),
        commit_type: CommitType::Test,
    },
    Rule {
        name: "modified-config",
        applies: |e| is_modified(e) && is_config_path(e.path),
        commit_type: CommitType::Chore,
    },
    Rule {
        name: "manifest-imports",
        applies: |e| is_modified(e) && is_dependency_manifest(e.path) && e.facts.has_imports(),
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "manifest",
        applies: |e| is_modified(e) && is_dependency_manifest(e.path),
        commit_type: CommitType::Chore,
    },
    Rule {
        name: "net-removal",
        applies: |e| {
            is_modified(e) && e.facts.lines_removed > 0 && e.facts.lines_added < e.facts.lines_removed
        },
        commit_type: CommitType::Fix,
    },
    Rule {
        name: "growth",
        applies: |e| {
            is_modified(e)
                && (e.facts.has_functions() || e.facts.lines_added > 2 * e.facts.lines_removed)
        },
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "rebalance",
        applies: |e| {
            is_modified(e)
                && e.facts.lines_added > 0
                && e.facts.lines_removed > 0
                && e.facts.lines_added.abs_diff(e.facts.lines_removed) < 10
        },
        commit_type: CommitType::Refactor,
    },
    Rule {
        name: "small-edit",
        applies: |e| is_modified(e) && e.facts.total_lines() < 10,
        commit_type: CommitType::Fix,
    },
    Rule {
        name: "modified",
        applies: is_modified,
        commit_type: CommitType::Feat,
    },
    Rule {
        name: "fallback",
        applies: |_| true,
        commit_type: CommitType::Chore,
    },
];

const DEPENDENCY_MANIFESTS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "requirements.txt",
    "pyproject.toml",
    "Pipfile",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "composer.json",
];

const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];

pub struct ChangeClassifier;

impl ChangeClassifier {
    pub fn classify(path: &Path, status: ChangeStatus, facts: &DiffFacts) -> CommitType {
        Self::matching_rule(path, status, facts).commit_type
    }

    /// Name of the rule that decides this change.
    pub fn rule_name(path: &Path, status: ChangeStatus, facts: &DiffFacts) -> &'static str {
        Self::matching_rule(path, status, facts).name
    }

    fn matching_rule(path: &Path, status: ChangeStatus, facts: &DiffFacts) -> &'static Rule {
        let evidence = Evidence {
            path,
            status,
            facts,
        };
        // The fallback rule always applies, so the search cannot come up empty.
        RULES
            .iter()
            .find(|rule| (rule.applies)(&evidence))
            .unwrap_or(&RULES[RULES.len() - 1])
    }

    /// Scope from the leading directory, or from the file name for root files.
    pub fn scope(path: &Path) -> String {
        let path_str = path.to_string_lossy();
        let parts: Vec<&str> = path_str.split('/').filter(|p| !p.is_empty()).collect();

        match parts.as_slice() {
            [] => String::new(),
            [name] => Self::root_file_scope(name),
            [top, rest @ ..] => match *top {
                "src" | "lib" => match rest {
                    [nested, _, ..] => nested.to_string(),
                    _ => "core".to_string(),
                },
                "tests" | "test" => "test".to_string(),
                "docs" | "documentation" => "docs".to_string(),
                "config" | "configs" => "config".to_string(),
                "api" | "backend" | "server" => "api".to_string(),
                "ui" | "frontend" | "client" => "ui".to_string(),
                "scripts" | "tools" => "tools".to_string(),
                other => other.to_string(),
            },
        }
    }

    fn root_file_scope(name: &str) -> String {
        if name.contains("test") {
            "test".to_string()
        } else if name.ends_with(".md") {
            "docs".to_string()
        } else if name.contains("config") {
            "config".to_string()
        } else {
            String::new()
        }
    }

    /// Type, scope and subject for one change in a single pass.
    pub fn classify_change(change: FileChange, facts: DiffFacts) -> ClassifiedChange {
        let status = change.status();
        let commit_type = Self::classify(&change.path, status, &facts);
        let scope = Self::scope(&change.path);
        let message = MessageComposer::compose(&change.path, status, &facts, commit_type);

        ClassifiedChange {
            change,
            facts,
            commit_type,
            scope,
            message,
        }
    }
}

fn is_modified(e: &Evidence<'_>) -> bool {
    e.status == ChangeStatus::Modified
}

/// Case-insensitive `doc` substring, with `docker` excluded.
pub fn is_doc_path(path: &Path) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    path.extension().is_some_and(|e| e == "md")
        || file_name(path).contains("README")
        || lower.replace("docker", "").contains("doc")
}

pub fn is_test_path(path: &Path) -> bool {
    path.parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| c.as_os_str().to_str())
        .any(|dir| matches!(dir, "test" | "tests" | "__tests__" | "spec"))
}

/// Test markers in the file name: `test_x`, `x_test`, `x_spec`, `x.test.ts`,
/// `FooTest`, `tests.rs`, `conftest.py`.
pub fn has_test_name(path: &Path) -> bool {
    let name = file_name(path);
    let stem = name.split('.').next().unwrap_or("");
    stem == "conftest"
        || name.contains(".test.")
        || name.contains(".spec.")
        || stem_words(stem)
            .iter()
            .any(|w| matches!(w.as_str(), "test" | "tests" | "spec"))
}

/// Lower-cased words of a file stem, split on punctuation and camelCase.
fn stem_words(stem: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in stem.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn is_config_path(path: &Path) -> bool {
    let name = file_name(path);
    path.to_string_lossy().to_lowercase().contains("config")
        || path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| CONFIG_EXTENSIONS.contains(&e))
        || matches!(name, "Dockerfile" | "Makefile")
        || name.starts_with(".env")
}

pub fn is_dependency_manifest(path: &Path) -> bool {
    DEPENDENCY_MANIFESTS.contains(&file_name(path))
}
