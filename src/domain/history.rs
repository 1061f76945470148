// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::CommitType;

/// A commit read back from `git log`, split into conventional parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalCommit {
    pub hash: String,
    #[serde(rename = "type")]
    pub commit_type: String,
    pub scope: String,
    pub subject: String,
    pub body: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<FixedOffset>,
    pub breaking: bool,
    pub validated: bool,
}

impl HistoricalCommit {
    /// Replace the type and recompute `validated`.
    pub fn with_type(self, commit_type: impl Into<String>) -> Self {
        let commit_type = commit_type.into();
        let validated = CommitType::parse(&commit_type).is_some();
        Self {
            commit_type,
            validated,
            ..self
        }
    }

    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(&self.hash)
    }

    /// The parsed type, when it is one of the accepted ones.
    pub fn known_type(&self) -> Option<CommitType> {
        CommitType::parse(&self.commit_type)
    }

    pub fn status_label(&self) -> &'static str {
        if self.breaking {
            "Breaking"
        } else if self.validated {
            "Valid"
        } else {
            "Invalid"
        }
    }
}
