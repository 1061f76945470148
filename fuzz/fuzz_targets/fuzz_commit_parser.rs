// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use commitsense::services::parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let parsed = parser::parse_subject(data);
    if parsed.conventional {
        assert!(!parsed.commit_type.is_empty());
    }
    let _ = parser::parse_log(data);
});
