// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::{ChangeStatus, DiffFacts, FileChange, HistoricalCommit};
use crate::error::{Error, Result};
use crate::services::analyzer::DiffAnalyzer;
use crate::services::parser;

const LOG_FORMAT: &str = "--pretty=format:%H|%s|%an|%ae|%ad|%b%x1e";

/// Fallback when the host parallelism cannot be queried.
const DEFAULT_DIFF_CONCURRENCY: usize = 4;

pub struct GitService {
    repo: gix::Repository,
    work_dir: PathBuf,
}

impl GitService {
    pub fn discover() -> Result<Self> {
        Self::discover_at(".")
    }

    pub fn discover_at(path: impl AsRef<Path>) -> Result<Self> {
        let repo = gix::discover(path.as_ref()).map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .workdir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        Ok(Self { repo, work_dir })
    }

    pub fn check_state(&self) -> Result<()> {
        if matches!(self.repo.state(), Some(gix::state::InProgress::Merge)) {
            return Err(Error::MergeInProgress);
        }
        Ok(())
    }

    /// Pending changes from `git status --porcelain -z`, in git's order.
    pub async fn status(&self) -> Result<Vec<FileChange>> {
        let stdout = run_checked(
            &self.work_dir,
            ["status", "--porcelain", "-z", "--untracked-files=all"],
        )
        .await?;
        let changes = parse_porcelain(&stdout);
        debug!(files = changes.len(), "status scanned");
        Ok(changes)
    }

    /// Diff facts for every change, fetched concurrently and returned in
    /// input order. At most `diff_concurrency()` git processes run at once.
    /// A failed retrieval counts as an empty diff.
    pub async fn diff_facts(&self, changes: &[FileChange]) -> Vec<DiffFacts> {
        let permits = Arc::new(Semaphore::new(diff_concurrency()));
        let mut tasks = JoinSet::new();
        for (index, change) in changes.iter().cloned().enumerate() {
            let work_dir = self.work_dir.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire().await else {
                    return (index, DiffFacts::default());
                };
                let diff = file_diff(&work_dir, &change).await;
                (index, DiffAnalyzer::analyze(&diff))
            });
        }

        let mut facts = vec![DiffFacts::default(); changes.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, f)) => facts[index] = f,
                Err(e) => warn!(error = %e, "diff task failed"),
            }
        }
        facts
    }

    /// Commits in `from..to`, newest first.
    pub async fn log(&self, from: &str, to: &str) -> Result<Vec<HistoricalCommit>> {
        let range = format!("{from}..{to}");
        let stdout =
            run_checked(&self.work_dir, ["log", range.as_str(), LOG_FORMAT, "--date=iso"]).await?;
        let commits = parser::parse_log(&stdout);
        debug!(range = %range, commits = commits.len(), "history loaded");
        Ok(commits)
    }

    pub async fn stage_all(&self) -> Result<()> {
        run_checked(&self.work_dir, ["add", "-A"]).await.map(|_| ())
    }

    pub async fn commit(&self, message: &str) -> Result<()> {
        run_checked(&self.work_dir, ["commit", "-m", message])
            .await
            .map(|_| ())
    }

    pub async fn push(&self) -> Result<()> {
        run_checked(&self.work_dir, ["push"]).await.map(|_| ())
    }
}

fn diff_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_DIFF_CONCURRENCY)
}

/// Parse `git status --porcelain -z` output.
///
/// Entries are NUL-terminated `XY path` records with paths left unquoted.
/// Renames and copies carry the source path as an extra record, which is
/// skipped so the destination path is kept.
pub fn parse_porcelain(output: &str) -> Vec<FileChange> {
    let mut changes = Vec::new();
    let mut records = output.split('\0');

    while let Some(record) = records.next() {
        let (Some(code), Some(path)) = (record.get(..2), record.get(3..)) else {
            continue;
        };
        if code.contains(['R', 'C']) {
            records.next();
        }
        if path.is_empty() {
            continue;
        }
        changes.push(FileChange::new(path, code));
    }

    changes
}

/// Staged diff first, then the unstaged one; untracked files are diffed
/// against `/dev/null`. Errors are logged and read as "no diff".
async fn file_diff(work_dir: &Path, change: &FileChange) -> String {
    let path = change.path.as_os_str();

    if change.status() == ChangeStatus::Untracked {
        let args = ["diff", "--no-index", "--", "/dev/null"].map(OsStr::new);
        // --no-index exits 1 whenever the files differ
        return match git(work_dir, args.into_iter().chain([path])).await {
            Ok(out) if matches!(out.status.code(), Some(0 | 1)) => {
                String::from_utf8_lossy(&out.stdout).into_owned()
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                warn!(path = %change.path.display(), stderr = %stderr.trim(), "untracked diff failed");
                String::new()
            }
            Err(e) => {
                warn!(path = %change.path.display(), error = %e, "untracked diff failed");
                String::new()
            }
        };
    }

    let staged = ["diff", "--cached", "--no-ext-diff", "--unified=3", "--"].map(OsStr::new);
    let unstaged = ["diff", "--no-ext-diff", "--unified=3", "--"].map(OsStr::new);
    for args in [&staged[..], &unstaged[..]] {
        match run_checked(work_dir, args.iter().copied().chain([path])).await {
            Ok(diff) if !diff.trim().is_empty() => return diff,
            Ok(_) => {}
            Err(e) => warn!(path = %change.path.display(), error = %e, "diff retrieval failed"),
        }
    }

    String::new()
}

async fn git<I, S>(work_dir: &Path, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    debug!(args = ?args.iter().map(|a| a.as_ref()).collect::<Vec<_>>(), "running git");
    let output = Command::new("git")
        .args(&args)
        .current_dir(work_dir)
        .output()
        .await?;
    Ok(output)
}

async fn run_checked<I, S>(work_dir: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = git(work_dir, args).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Git(stderr.trim().to_string()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
