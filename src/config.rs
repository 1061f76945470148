// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};
use crate::error::{Error, Result};

/// How per-file classifications are folded into suggestions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grouping {
    /// One combined suggestion, plus per-file ones for small changesets.
    #[default]
    #[serde(rename = "type")]
    ByType,
    /// One suggestion per `(type, scope)` pair after the combined one.
    #[serde(rename = "type-scope")]
    ByTypeScope,
}

impl Grouping {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "type" => Some(Self::ByType),
            "type-scope" | "scope" => Some(Self::ByTypeScope),
            _ => None,
        }
    }
}

impl std::fmt::Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByType => write!(f, "type"),
            Self::ByTypeScope => write!(f, "type-scope"),
        }
    }
}

/// Changelog rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Start of the log range (exclusive)
    #[serde(default = "default_from")]
    pub from: String,

    /// End of the log range (inclusive)
    #[serde(default = "default_to")]
    pub to: String,

    /// markdown, json or text
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Mark breaking changes in rendered entries (default: true)
    #[serde(default = "default_true")]
    pub include_breaking: bool,

    /// Group entries under per-type headings (default: true)
    #[serde(default = "default_true")]
    pub group_by_type: bool,

    /// Section heading per commit type
    #[serde(default = "default_type_labels")]
    pub type_labels: BTreeMap<String, String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            to: default_to(),
            output_format: default_output_format(),
            include_breaking: true,
            group_by_type: true,
            type_labels: default_type_labels(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_from() -> String {
    "HEAD~10".into()
}
fn default_to() -> String {
    "HEAD".into()
}
fn default_output_format() -> String {
    "markdown".into()
}

fn default_type_labels() -> BTreeMap<String, String> {
    [
        ("feat", "✨ Features"),
        ("fix", "🐛 Bug Fixes"),
        ("docs", "📚 Documentation"),
        ("style", "💄 Styles"),
        ("refactor", "♻️ Refactoring"),
        ("test", "🧪 Tests"),
        ("chore", "🔧 Chore"),
        ("perf", "⚡ Performance"),
        ("ci", "👷 CI/CD"),
        ("build", "📦 Build"),
        ("revert", "⏪ Reverts"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grouping: Grouping,

    /// Upper bound on listed suggestions, combined one included (default 5)
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Largest changeset that still lists per-file suggestions (default 3)
    #[serde(default = "default_individual_limit")]
    pub individual_limit: usize,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_max_suggestions() -> usize {
    5
}
fn default_individual_limit() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grouping: Grouping::default(),
            max_suggestions: default_max_suggestions(),
            individual_limit: default_individual_limit(),
            changelog: ChangelogConfig::default(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.commitsense.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".commitsense.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // COMMITSENSE_GROUPING, COMMITSENSE_CHANGELOG__OUTPUT_FORMAT, ...
        figment = figment.merge(Env::prefixed("COMMITSENSE_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "commitsense").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref g) = cli.group {
            self.grouping = Grouping::parse(g).ok_or_else(|| {
                Error::Config(format!("grouping must be 'type' or 'type-scope', got '{g}'"))
            })?;
        }

        match &cli.command {
            Some(Commands::Log { from, to }) => self.apply_range(from, to),
            Some(Commands::Changelog {
                from, to, format, ..
            }) => {
                self.apply_range(from, to);
                if let Some(format) = format {
                    self.changelog.output_format = format.clone();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_range(&mut self, from: &Option<String>, to: &Option<String>) {
        if let Some(from) = from {
            self.changelog.from = from.clone();
        }
        if let Some(to) = to {
            self.changelog.to = to.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=20).contains(&self.max_suggestions) {
            return Err(Error::Config(format!(
                "max_suggestions must be 1–20, got {}",
                self.max_suggestions
            )));
        }

        if self.individual_limit > 20 {
            return Err(Error::Config(format!(
                "individual_limit must be 0–20, got {}",
                self.individual_limit
            )));
        }

        if self.changelog.from.trim().is_empty() || self.changelog.to.trim().is_empty() {
            return Err(Error::Config(
                "changelog.from and changelog.to cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# commitsense configuration

# How suggestions are grouped: "type" or "type-scope"
grouping = "type"

# Maximum number of suggestions shown, combined suggestion included
max_suggestions = 5

# Per-file suggestions are listed only for changesets up to this size
individual_limit = 3

[changelog]
# Revision range used by `log` and `changelog`
from = "HEAD~10"
to = "HEAD"

# markdown, json or text
output_format = "markdown"

# Mark breaking changes in the rendered changelog
include_breaking = true

# Group entries under per-type headings
group_by_type = true

# Override section headings, e.g.
# [changelog.type_labels]
# feat = "Features"
"#;

        fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
