// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};

use crate::config::ChangelogConfig;
use crate::domain::{CommitType, HistoricalCommit};
use crate::error::{Error, Result};

/// Section order for grouped output.
pub const TYPE_ORDER: &[CommitType] = &[
    CommitType::Feat,
    CommitType::Fix,
    CommitType::Perf,
    CommitType::Refactor,
    CommitType::Docs,
    CommitType::Style,
    CommitType::Test,
    CommitType::Chore,
    CommitType::Ci,
    CommitType::Build,
    CommitType::Revert,
];

const PREVIEW_WIDTH: usize = 55;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogFormat {
    Markdown,
    Json,
    Text,
}

impl ChangelogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(Error::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// One row of the grouped preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub label: String,
    pub count: usize,
    pub preview: String,
}

fn label_for<'a>(labels: &'a BTreeMap<String, String>, commit_type: CommitType) -> &'a str {
    labels
        .get(commit_type.as_str())
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .unwrap_or(commit_type.as_str())
}

/// Validated commits bucketed by type, in `TYPE_ORDER`.
fn grouped(commits: &[HistoricalCommit]) -> Vec<(CommitType, Vec<&HistoricalCommit>)> {
    TYPE_ORDER
        .iter()
        .map(|ty| {
            let members: Vec<_> = commits
                .iter()
                .filter(|c| c.validated && c.known_type() == Some(*ty))
                .collect();
            (*ty, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

/// Truncate to `max` characters, ending in `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub fn preview(commits: &[HistoricalCommit], labels: &BTreeMap<String, String>) -> Vec<PreviewRow> {
    grouped(commits)
        .into_iter()
        .map(|(ty, members)| {
            let mut preview = truncate(&members[0].subject, PREVIEW_WIDTH);
            if members.len() > 1 {
                let _ = write!(preview, " (+{} more)", members.len() - 1);
            }
            PreviewRow {
                label: label_for(labels, ty).to_string(),
                count: members.len(),
                preview,
            }
        })
        .collect()
}

/// Render `commits` in the configured format.
///
/// Fails on an unknown format before producing any output.
pub fn render<Tz: TimeZone>(
    commits: &[HistoricalCommit],
    settings: &ChangelogConfig,
    generated_at: &DateTime<Tz>,
) -> Result<String>
where
    Tz::Offset: std::fmt::Display,
{
    let format = ChangelogFormat::parse(&settings.output_format)?;
    let generated = generated_at.format(TIMESTAMP_FORMAT).to_string();

    let content = match format {
        ChangelogFormat::Markdown => render_markdown(commits, settings, &generated),
        ChangelogFormat::Json => serde_json::to_string_pretty(commits)?,
        ChangelogFormat::Text => render_text(commits, settings, &generated),
    };

    Ok(content)
}

fn breaking_suffix(commit: &HistoricalCommit, settings: &ChangelogConfig, text: &str) -> String {
    if settings.include_breaking && commit.breaking {
        text.to_string()
    } else {
        String::new()
    }
}

fn render_markdown(
    commits: &[HistoricalCommit],
    settings: &ChangelogConfig,
    generated: &str,
) -> String {
    let mut out = String::new();
    out.push_str("# Changelog\n\n");
    let _ = write!(out, "Generated on {generated}\n\n");

    if settings.group_by_type {
        for (ty, members) in grouped(commits) {
            let _ = write!(
                out,
                "## {} ({})\n\n",
                label_for(&settings.type_labels, ty),
                members.len()
            );
            for commit in members {
                let _ = writeln!(
                    out,
                    "- {}{}{}",
                    markdown_scope(commit),
                    commit.subject,
                    breaking_suffix(commit, settings, " ⚠️ **BREAKING CHANGE**")
                );
            }
            out.push('\n');
        }
    } else {
        out.push_str("## Commits\n\n");
        for commit in commits.iter().filter(|c| c.validated) {
            let _ = writeln!(
                out,
                "- **{}**: {}{}{} ({})",
                commit.commit_type,
                markdown_scope(commit),
                commit.subject,
                breaking_suffix(commit, settings, " ⚠️ **BREAKING CHANGE**"),
                commit.short_hash()
            );
        }
    }

    out
}

fn markdown_scope(commit: &HistoricalCommit) -> String {
    if commit.scope.is_empty() {
        String::new()
    } else {
        format!("**{}**: ", commit.scope)
    }
}

fn render_text(commits: &[HistoricalCommit], settings: &ChangelogConfig, generated: &str) -> String {
    let mut out = String::new();
    out.push_str("CHANGELOG\n");
    out.push_str("=========\n\n");
    let _ = write!(out, "Generated on {generated}\n\n");

    for commit in commits.iter().filter(|c| c.validated) {
        let scope = if commit.scope.is_empty() {
            String::new()
        } else {
            format!("({}) ", commit.scope)
        };
        let _ = writeln!(
            out,
            "{} - {}: {}{}{}",
            commit.short_hash(),
            commit.commit_type,
            scope,
            commit.subject,
            breaking_suffix(commit, settings, " [BREAKING CHANGE]")
        );
        let _ = writeln!(out, "  Author: {} <{}>", commit.author, commit.email);
        let _ = write!(out, "  Date: {}\n\n", commit.date.format(TIMESTAMP_FORMAT));
    }

    out
}
