// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use crate::config::{Config, Grouping};
use crate::domain::{ClassifiedChange, CommitSuggestion, CommitType};

/// Confidence for a suggestion backed by exactly one file.
pub const SINGLE_FILE_CONFIDENCE: f32 = 0.9;
/// Confidence for a suggestion summarizing several files.
pub const GROUP_CONFIDENCE: f32 = 0.8;

/// Merges per-file classifications into a short, ordered list of candidates.
#[derive(Debug, Clone)]
pub struct SuggestionAggregator {
    pub grouping: Grouping,
    pub max_suggestions: usize,
    /// Per-file suggestions are listed only up to this many files.
    pub individual_limit: usize,
}

impl Default for SuggestionAggregator {
    fn default() -> Self {
        Self {
            grouping: Grouping::ByType,
            max_suggestions: 5,
            individual_limit: 3,
        }
    }
}

impl SuggestionAggregator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            grouping: config.grouping,
            max_suggestions: config.max_suggestions,
            individual_limit: config.individual_limit,
        }
    }

    /// Combined suggestion first, then per-file or per-group entries, capped
    /// at `max_suggestions`. Empty input yields nothing.
    pub fn aggregate(&self, changes: &[ClassifiedChange]) -> Vec<CommitSuggestion> {
        if changes.is_empty() {
            return Vec::new();
        }

        let mut suggestions = vec![Self::combined(changes)];

        match self.grouping {
            Grouping::ByType => {
                if changes.len() <= self.individual_limit {
                    suggestions.extend(
                        changes
                            .iter()
                            .map(|c| c.to_suggestion(SINGLE_FILE_CONFIDENCE)),
                    );
                }
            }
            Grouping::ByTypeScope => suggestions.extend(Self::scoped_groups(changes)),
        }

        suggestions.truncate(self.max_suggestions.max(1));
        suggestions
    }

    /// One suggestion standing for the whole changeset.
    pub fn combined(changes: &[ClassifiedChange]) -> CommitSuggestion {
        let tally = Self::tally(changes);
        // Strictly-greater comparison keeps the first-seen type on ties.
        let (dominant, _) = tally
            .iter()
            .copied()
            .fold(None, |best: Option<(CommitType, usize)>, (ty, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((ty, count)),
            })
            .unwrap_or((CommitType::Chore, 0));

        let mut message = if tally.len() == 1 {
            Self::uniform_phrase(dominant).to_string()
        } else {
            "update multiple files".to_string()
        };
        if changes.len() > 1 {
            message.push_str(&format!(" ({} files)", changes.len()));
        }

        let scope = match changes.split_first() {
            Some((first, rest)) if rest.iter().all(|c| c.scope == first.scope) => {
                first.scope.clone()
            }
            _ => String::new(),
        };

        let confidence = if changes.len() > 1 {
            GROUP_CONFIDENCE
        } else {
            SINGLE_FILE_CONFIDENCE
        };

        CommitSuggestion::new(dominant, scope, message, confidence)
    }

    /// Occurrences per type, in first-seen order.
    pub fn tally(changes: &[ClassifiedChange]) -> Vec<(CommitType, usize)> {
        let mut counts: Vec<(CommitType, usize)> = Vec::new();
        for change in changes {
            match counts.iter_mut().find(|(ty, _)| *ty == change.commit_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((change.commit_type, 1)),
            }
        }
        counts
    }

    fn uniform_phrase(commit_type: CommitType) -> &'static str {
        match commit_type {
            CommitType::Feat => "add features",
            CommitType::Fix => "fix issues",
            CommitType::Docs => "update docs",
            CommitType::Test => "update tests",
            CommitType::Chore => "update config",
            CommitType::Refactor => "refactor code",
            _ => "update files",
        }
    }

    /// One suggestion per `(type, scope)` pair, first-seen order.
    fn scoped_groups(changes: &[ClassifiedChange]) -> Vec<CommitSuggestion> {
        let mut groups: Vec<((CommitType, &str), Vec<&ClassifiedChange>)> = Vec::new();
        for change in changes {
            let key = (change.commit_type, change.scope.as_str());
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(change),
                None => groups.push((key, vec![change])),
            }
        }

        groups
            .into_iter()
            .map(|((commit_type, scope), members)| match members.as_slice() {
                [only] => only.to_suggestion(SINGLE_FILE_CONFIDENCE),
                _ => CommitSuggestion::new(
                    commit_type,
                    scope,
                    Self::group_phrase(commit_type, scope),
                    GROUP_CONFIDENCE,
                ),
            })
            .collect()
    }

    fn group_phrase(commit_type: CommitType, scope: &str) -> String {
        let (verb, noun) = match commit_type {
            CommitType::Feat => ("add", "functionality"),
            CommitType::Fix => ("fix", "issues"),
            CommitType::Docs => ("update", "documentation"),
            CommitType::Test => ("add", "tests"),
            CommitType::Chore => ("update", "configuration"),
            _ if scope.is_empty() => ("update", "files"),
            _ => ("update", ""),
        };

        [verb, scope, noun]
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
