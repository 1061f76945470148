// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "commitsense")]
#[command(version)]
#[command(about = "Conventional commit suggestions from your pending git changes", long_about = None)]
pub struct Cli {
    /// Accept the first suggestion and commit without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print suggestions only, don't commit
    #[arg(long)]
    pub dry_run: bool,

    /// Stage every change (git add -A) before committing
    #[arg(short, long)]
    pub all: bool,

    /// Push after a successful commit
    #[arg(long)]
    pub push: bool,

    /// Suggestion grouping (type, type-scope)
    #[arg(short, long, env = "COMMITSENSE_GROUP")]
    pub group: Option<String>,

    /// Mark the commit as breaking, with this note in the footer
    #[arg(long, value_name = "NOTE")]
    pub breaking: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Suggest a commit message for pending changes (default)
    Suggest,
    /// Show how each changed file is classified
    Files,
    /// Parse and validate recent commit messages
    Log {
        /// Start of the range (exclusive)
        #[arg(long)]
        from: Option<String>,
        /// End of the range
        #[arg(long)]
        to: Option<String>,
    },
    /// Render a changelog for a commit range to stdout
    Changelog {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// markdown, json or text
        #[arg(short, long)]
        format: Option<String>,
        /// Show a per-type summary instead of the full changelog
        #[arg(long)]
        preview: bool,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
