// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use super::{CommitType, DiffFacts, FileChange};

/// A file change annotated with its commit type, scope and subject phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedChange {
    pub change: FileChange,
    pub facts: DiffFacts,
    pub commit_type: CommitType,
    pub scope: String,
    pub message: String,
}

impl ClassifiedChange {
    pub fn with_type(self, commit_type: CommitType) -> Self {
        Self {
            commit_type,
            ..self
        }
    }

    pub fn with_scope(self, scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// The standalone suggestion for this single file.
    pub fn to_suggestion(&self, confidence: f32) -> CommitSuggestion {
        CommitSuggestion::new(self.commit_type, &self.scope, &self.message, confidence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitSuggestion {
    pub commit_type: CommitType,
    pub scope: String,
    pub message: String,
    pub breaking: bool,
    /// Always within `0.0..=1.0`.
    pub confidence: f32,
}

impl CommitSuggestion {
    pub fn new(
        commit_type: CommitType,
        scope: impl Into<String>,
        message: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            commit_type,
            scope: scope.into(),
            message: message.into(),
            breaking: false,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// `type(scope): message`, or `type: message` without a scope.
    pub fn header(&self) -> String {
        if self.scope.is_empty() {
            format!("{}: {}", self.commit_type, self.message)
        } else {
            format!("{}({}): {}", self.commit_type, self.scope, self.message)
        }
    }

    /// Full text passed to `git commit -m`.
    ///
    /// A breaking suggestion gets a `BREAKING CHANGE:` footer; an empty note
    /// falls back to the subject.
    pub fn to_commit_message(&self, breaking_note: Option<&str>) -> String {
        let header = self.header();
        if !self.breaking {
            return header;
        }

        let note = breaking_note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.message);
        format!("{header}\n\nBREAKING CHANGE: {note}")
    }

    pub fn with_type(self, commit_type: CommitType) -> Self {
        Self {
            commit_type,
            ..self
        }
    }

    pub fn with_scope(self, scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn with_breaking(self, breaking: bool) -> Self {
        Self { breaking, ..self }
    }
}

impl std::fmt::Display for CommitSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.header())?;
        if self.breaking {
            f.write_str(" [breaking]")?;
        }
        Ok(())
    }
}
