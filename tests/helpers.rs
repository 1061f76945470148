// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use chrono::DateTime;

use commitsense::domain::{ClassifiedChange, CommitType, DiffFacts, FileChange, HistoricalCommit};
use commitsense::services::classifier::ChangeClassifier;

/// DiffFacts with the given line counts and declared names
#[allow(dead_code)]
pub fn make_facts(added: usize, removed: usize, functions: &[&str]) -> DiffFacts {
    DiffFacts {
        lines_added: added,
        lines_removed: removed,
        function_names: functions.iter().map(|f| f.to_string()).collect(),
        import_lines: Vec::new(),
    }
}

/// Run a change through the classifier the way the app does
#[allow(dead_code)]
pub fn make_change(path: &str, code: &str, facts: DiffFacts) -> ClassifiedChange {
    ChangeClassifier::classify_change(FileChange::new(path, code), facts)
}

/// A classified change with type, scope and message fixed by hand
#[allow(dead_code)]
pub fn make_classified(path: &str, commit_type: CommitType, scope: &str) -> ClassifiedChange {
    make_change(path, " M", DiffFacts::default())
        .with_type(commit_type)
        .with_scope(scope)
        .with_message(format!("touch {path}"))
}

/// A parsed commit with a fixed hash and date
#[allow(dead_code)]
pub fn make_commit(hash: &str, commit_type: &str, scope: &str, subject: &str) -> HistoricalCommit {
    HistoricalCommit {
        hash: hash.to_string(),
        commit_type: String::new(),
        scope: scope.to_string(),
        subject: subject.to_string(),
        body: String::new(),
        author: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        date: DateTime::parse_from_rfc3339("2024-03-01T10:15:00+00:00").unwrap(),
        breaking: false,
        validated: false,
    }
    .with_type(commit_type)
}
