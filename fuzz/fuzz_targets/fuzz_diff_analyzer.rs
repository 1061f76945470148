// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use std::path::Path;

use commitsense::domain::ChangeStatus;
use commitsense::services::analyzer::DiffAnalyzer;
use commitsense::services::classifier::ChangeClassifier;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let facts = DiffAnalyzer::analyze(data);
    let first_line = data.lines().next().unwrap_or_default();
    let path = Path::new(first_line);
    for status in [ChangeStatus::Added, ChangeStatus::Modified, ChangeStatus::Deleted] {
        let _ = ChangeClassifier::classify(path, status, &facts);
    }
    let _ = ChangeClassifier::scope(path);
});
