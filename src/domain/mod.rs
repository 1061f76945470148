// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod change;
mod commit;
mod history;
mod suggestion;

pub use change::*;
pub use commit::*;
pub use history::*;
pub use suggestion::*;
