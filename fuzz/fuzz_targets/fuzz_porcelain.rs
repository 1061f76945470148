// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use commitsense::services::git::parse_porcelain;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for change in parse_porcelain(data) {
        assert!(!change.path.as_os_str().is_empty());
        let _ = change.status();
    }
});
