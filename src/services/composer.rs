// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;

use crate::domain::{ChangeStatus, CommitType, DiffFacts, file_name};

pub struct MessageComposer;

impl MessageComposer {
    /// Imperative, lower-case subject phrase for one change. Never ends in a
    /// period; file and function names are kept verbatim.
    pub fn compose(
        path: &Path,
        status: ChangeStatus,
        facts: &DiffFacts,
        commit_type: CommitType,
    ) -> String {
        let file_name = file_name(path);
        let stem = path.file_stem().and_then(|n| n.to_str()).unwrap_or(file_name);

        match status {
            ChangeStatus::Added | ChangeStatus::Untracked => match facts.sole_function() {
                Some(func) => format!("add {func} function"),
                None => format!("add {file_name}"),
            },
            ChangeStatus::Deleted => format!("remove {file_name}"),
            ChangeStatus::Modified => match (commit_type, facts.sole_function()) {
                (CommitType::Test, _) => format!("update {stem} tests"),
                (CommitType::Docs, _) | (_, None) => format!("update {stem}"),
                (_, Some(func)) => format!("update {func} function"),
            },
            ChangeStatus::Renamed => format!("rename {file_name}"),
            _ => format!("modify {file_name}"),
        }
    }
}
