// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::io::IsTerminal;

use console::style;
use dialoguer::{Confirm, Input, Select};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{ClassifiedChange, CommitSuggestion, CommitType, DiffStats};
use crate::error::{Error, Result};
use crate::services::{
    aggregator::SuggestionAggregator, changelog, classifier::ChangeClassifier, git::GitService,
    parser,
};

const WRITE_OWN: &str = "✎ write my own";

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            grouping = %config.grouping,
            max_suggestions = config.max_suggestions,
            individual_limit = config.individual_limit,
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup Ctrl+C handler with CancellationToken
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        match self.cli.command {
            None | Some(Commands::Suggest) => self.suggest().await,
            Some(Commands::Files) => self.show_files().await,
            Some(Commands::Log { .. }) => self.show_log().await,
            Some(Commands::Changelog { preview, .. }) => self.show_changelog(preview).await,
            Some(Commands::Init) => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Some(Commands::Config) => {
                self.show_config();
                Ok(())
            }
            Some(Commands::Completions { shell }) => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(shell, &mut cmd, "commitsense", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Status scan, per-file diffs and classification.
    async fn classify_pending(&self, git: &GitService) -> Result<Vec<ClassifiedChange>> {
        self.print_status("Scanning pending changes...");

        let changes = git.status().await?;
        if changes.is_empty() {
            return Err(Error::NoChanges);
        }
        self.check_cancelled()?;

        let facts = git.diff_facts(&changes).await;
        self.check_cancelled()?;

        let classified: Vec<ClassifiedChange> = changes
            .into_iter()
            .zip(facts)
            .map(|(change, facts)| {
                debug!(
                    path = %change.path.display(),
                    rule = ChangeClassifier::rule_name(&change.path, change.status(), &facts),
                    "classified"
                );
                ChangeClassifier::classify_change(change, facts)
            })
            .collect();

        let stats = DiffStats::from_facts(classified.iter().map(|c| &c.facts));
        self.print_info(&format!(
            "{} files with changes detected (+{} -{})",
            stats.files_changed, stats.insertions, stats.deletions
        ));

        Ok(classified)
    }

    async fn suggest(&self) -> Result<()> {
        let git = GitService::discover()?;
        git.check_state()?;

        let classified = self.classify_pending(&git).await?;

        let aggregator = SuggestionAggregator::from_config(&self.config);
        let breaking = self.cli.breaking.is_some();
        let suggestions: Vec<CommitSuggestion> = aggregator
            .aggregate(&classified)
            .into_iter()
            .map(|s| s.with_breaking(breaking))
            .collect();
        debug!(count = suggestions.len(), "suggestions built");

        self.check_cancelled()?;

        if self.cli.dry_run {
            for suggestion in &suggestions {
                println!("{}", suggestion.to_commit_message(self.cli.breaking.as_deref()));
            }
            return Ok(());
        }

        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();

        let message = if self.cli.yes {
            suggestions
                .first()
                .map(|s| s.to_commit_message(self.cli.breaking.as_deref()))
                .ok_or(Error::NoChanges)?
        } else if !is_interactive {
            eprintln!("{}", style("warning:").yellow().bold());
            eprintln!("  Not a terminal. Use --yes to auto-confirm in scripts/hooks.");
            for suggestion in &suggestions {
                println!("{}", suggestion.header());
            }
            return Ok(());
        } else {
            let chosen = self.pick_suggestion(&suggestions)?;
            let message = chosen.to_commit_message(self.cli.breaking.as_deref());

            eprintln!("\n{}", style("Commit message:").bold());
            eprintln!("{}", style(&message).green());
            eprintln!();

            let confirm = Confirm::new()
                .with_prompt("Create commit with this message?")
                .default(true)
                .interact()?;
            if !confirm {
                return Err(Error::Cancelled);
            }
            message
        };

        self.check_cancelled()?;

        if self.cli.all {
            git.stage_all().await?;
        } else if !classified.iter().any(|c| c.change.is_staged()) {
            return Err(Error::NothingStaged);
        }

        git.commit(&message).await?;
        eprintln!("{} Committed!", style("✓").green().bold());

        if self.cli.push {
            self.print_status("Pushing...");
            git.push().await?;
            eprintln!("{} Pushed!", style("✓").green().bold());
        }

        Ok(())
    }

    // ─── Suggestion Selection ───

    fn pick_suggestion(&self, suggestions: &[CommitSuggestion]) -> Result<CommitSuggestion> {
        let mut items: Vec<String> = suggestions
            .iter()
            .map(|s| format!("{}  ({:.0}%)", s.header(), s.confidence * 100.0))
            .collect();
        items.push(WRITE_OWN.to_string());

        eprintln!();
        let selection = Select::new()
            .with_prompt("Pick a commit message")
            .items(&items)
            .default(0)
            .interact()?;

        let initial = suggestions
            .get(selection)
            .map(CommitSuggestion::header)
            .unwrap_or_default();

        self.edit_header(initial)
    }

    /// Let the user edit a header until its type is one of the accepted ones.
    fn edit_header(&self, mut text: String) -> Result<CommitSuggestion> {
        loop {
            text = Input::<String>::new()
                .with_prompt("Commit message")
                .with_initial_text(text)
                .interact_text()?;

            match Self::suggestion_from_header(&text) {
                Ok(suggestion) => {
                    let breaking = suggestion.breaking || self.cli.breaking.is_some();
                    return Ok(suggestion.with_breaking(breaking));
                }
                Err(e) => self.print_warning(&e.to_string()),
            }
        }
    }

    /// Rebuild a suggestion from an edited `type(scope): subject` line.
    pub fn suggestion_from_header(header: &str) -> Result<CommitSuggestion> {
        let parsed = parser::parse_subject(header);
        if !parsed.conventional {
            return Err(Error::InvalidCommitMessage(format!(
                "'{}' is not of the form type(scope): subject",
                header.trim()
            )));
        }

        let commit_type = CommitType::parse(&parsed.commit_type).ok_or_else(|| {
            Error::InvalidCommitMessage(format!(
                "unknown type '{}', expected one of: {}",
                parsed.commit_type,
                CommitType::ALL.join(", ")
            ))
        })?;

        let breaking = parsed.marked_breaking || parser::is_breaking(&parsed.subject, "");
        Ok(CommitSuggestion::new(commit_type, parsed.scope, parsed.subject, 1.0).with_breaking(breaking))
    }

    // ─── Files / History ───

    async fn show_files(&self) -> Result<()> {
        let git = GitService::discover()?;
        let classified = self.classify_pending(&git).await?;

        eprintln!();
        for c in &classified {
            let header = c.to_suggestion(1.0).header();
            println!(
                "{} {:<50} {} (+{} -{})",
                c.change.status().marker(),
                header,
                style(c.change.path.display()).dim(),
                c.facts.lines_added,
                c.facts.lines_removed,
            );
        }
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<crate::domain::HistoricalCommit>> {
        let git = GitService::discover()?;
        let range = &self.config.changelog;
        self.print_status(&format!("Loading history {}..{}", range.from, range.to));
        let commits = git.log(&range.from, &range.to).await?;
        self.check_cancelled()?;
        Ok(commits)
    }

    async fn show_log(&self) -> Result<()> {
        let commits = self.load_history().await?;

        for commit in &commits {
            let status = match commit.status_label() {
                "Breaking" => style("Breaking").yellow().bold(),
                "Valid" => style("Valid").green(),
                other => style(other).red(),
            };
            println!(
                "{:<8} {:<10} {:<12} {:<38} {:<13} {:<11} {}",
                commit.short_hash(),
                commit.commit_type,
                changelog::truncate(&commit.scope, 12),
                changelog::truncate(&commit.subject, 38),
                changelog::truncate(&commit.author, 13),
                commit.date.format("%m-%d %H:%M"),
                status,
            );
        }

        let invalid = commits.iter().filter(|c| !c.validated).count();
        self.print_info(&format!(
            "{} commits loaded, {} not conventional",
            commits.len(),
            invalid
        ));
        Ok(())
    }

    async fn show_changelog(&self, preview: bool) -> Result<()> {
        // Reject an unknown format before touching git
        changelog::ChangelogFormat::parse(&self.config.changelog.output_format)?;

        let commits = self.load_history().await?;

        if preview {
            for row in changelog::preview(&commits, &self.config.changelog.type_labels) {
                println!("{:<18} {:>5}  {}", row.label, row.count, row.preview);
            }
            return Ok(());
        }

        let content = changelog::render(&commits, &self.config.changelog, &chrono::Local::now())?;
        print!("{content}");
        Ok(())
    }

    fn show_config(&self) {
        println!("Grouping: {}", self.config.grouping);
        println!("Max suggestions: {}", self.config.max_suggestions);
        println!("Individual limit: {}", self.config.individual_limit);
        println!();
        println!("[changelog]");
        println!("  from: {}", self.config.changelog.from);
        println!("  to: {}", self.config.changelog.to);
        println!("  output_format: {}", self.config.changelog.output_format);
        println!(
            "  include_breaking: {}",
            self.config.changelog.include_breaking
        );
        println!("  group_by_type: {}", self.config.changelog.group_by_type);
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            println!();
            println!("Config file: {} ({})", path.display(), status);
        }
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}
