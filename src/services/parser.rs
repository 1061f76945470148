// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use tracing::debug;

use crate::domain::{CommitType, HistoricalCommit};

/// `type(scope)!: subject`; scope and `!` are optional.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]+)(?:\(([^)]+)\))?(!)?\s*:\s*(.+)$").unwrap()
});

/// Separator emitted by `%x1e` between log records.
pub const RECORD_SEPARATOR: char = '\x1e';

/// Field layout produced by `--pretty=format:%H|%s|%an|%ae|%ad|%b`.
const MIN_LOG_FIELDS: usize = 5;

const LOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Keyword fallbacks for free-form subjects, checked in order.
const KEYWORD_TYPES: &[(&[&str], CommitType)] = &[
    (&["fix", "bug"], CommitType::Fix),
    (&["feat", "add"], CommitType::Feat),
    (&["doc"], CommitType::Docs),
    (&["test"], CommitType::Test),
    (&["refactor"], CommitType::Refactor),
    (&["style", "format"], CommitType::Style),
    (&["perf", "performance"], CommitType::Perf),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSubject {
    /// Raw type token; may be outside the accepted set.
    pub commit_type: String,
    pub scope: String,
    pub subject: String,
    /// Header carried the `!` marker.
    pub marked_breaking: bool,
    /// Header matched the conventional grammar rather than the keyword guess.
    pub conventional: bool,
}

impl ParsedSubject {
    pub fn is_valid(&self) -> bool {
        is_valid_type(&self.commit_type)
    }
}

/// Split a subject line into type, scope and subject.
///
/// Lines that do not follow the grammar get a keyword-guessed type, the whole
/// line as subject and no scope.
pub fn parse_subject(line: &str) -> ParsedSubject {
    let line = line.trim();

    if let Some(caps) = HEADER_REGEX.captures(line) {
        return ParsedSubject {
            commit_type: caps[1].to_string(),
            scope: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            subject: caps[4].trim().to_string(),
            marked_breaking: caps.get(3).is_some(),
            conventional: true,
        };
    }

    ParsedSubject {
        commit_type: guess_type(line).as_str().to_string(),
        scope: String::new(),
        subject: line.to_string(),
        marked_breaking: false,
        conventional: false,
    }
}

pub fn guess_type(subject: &str) -> CommitType {
    let lower = subject.to_lowercase();
    KEYWORD_TYPES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, ty)| *ty)
        .unwrap_or(CommitType::Chore)
}

pub fn is_breaking(subject: &str, body: &str) -> bool {
    subject.to_lowercase().contains("breaking") || body.to_lowercase().contains("breaking change")
}

pub fn is_valid_type(commit_type: &str) -> bool {
    CommitType::parse(commit_type).is_some()
}

/// Parse one `hash|subject|author|email|date|body` record.
pub fn parse_log_record(record: &str) -> Option<HistoricalCommit> {
    let record = record.trim_matches(|c: char| c == '\n' || c == '\r');
    if record.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = record.splitn(6, '|').collect();
    if fields.len() < MIN_LOG_FIELDS {
        return None;
    }

    let date = parse_log_date(fields[4].trim())?;
    let body = fields.get(5).map(|b| b.trim()).unwrap_or_default();
    let parsed = parse_subject(fields[1]);
    let breaking = parsed.marked_breaking || is_breaking(&parsed.subject, body);

    let commit = HistoricalCommit {
        hash: fields[0].trim().to_string(),
        commit_type: String::new(),
        scope: parsed.scope,
        subject: parsed.subject,
        body: body.to_string(),
        author: fields[2].to_string(),
        email: fields[3].to_string(),
        date,
        breaking,
        validated: false,
    };

    Some(commit.with_type(parsed.commit_type))
}

/// Parse `git log` output, newest first. Malformed records are skipped.
pub fn parse_log(output: &str) -> Vec<HistoricalCommit> {
    let records: Vec<&str> = if output.contains(RECORD_SEPARATOR) {
        output.split(RECORD_SEPARATOR).collect()
    } else {
        output.lines().collect()
    };

    let mut commits: Vec<HistoricalCommit> = records
        .into_iter()
        .filter_map(|record| {
            let commit = parse_log_record(record);
            if commit.is_none() && !record.trim().is_empty() {
                debug!(record = %record.trim(), "skipping malformed log record");
            }
            commit
        })
        .collect();

    commits.sort_by(|a, b| b.date.cmp(&a.date));
    commits
}

fn parse_log_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, LOG_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}
