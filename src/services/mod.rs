// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod aggregator;
pub mod analyzer;
pub mod changelog;
pub mod classifier;
pub mod composer;
pub mod git;
pub mod parser;
