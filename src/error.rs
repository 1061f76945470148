// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No pending changes found")]
    #[diagnostic(
        code(commitsense::git::no_changes),
        help("Modify or add files, then run commitsense again")
    )]
    NoChanges,

    #[error("Nothing staged for commit")]
    #[diagnostic(
        code(commitsense::git::nothing_staged),
        help("Stage files with: git add <files>, or pass --all")
    )]
    NothingStaged,

    #[error("Not a git repository")]
    #[diagnostic(
        code(commitsense::git::not_repo),
        help("Run this command inside a git repository")
    )]
    NotAGitRepo,

    #[error("Merge in progress")]
    #[diagnostic(
        code(commitsense::git::merge),
        help("Complete or abort the merge: git merge --abort")
    )]
    MergeInProgress,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Invalid commit message: {0}")]
    #[diagnostic(
        code(commitsense::commit::invalid),
        help("Use the form type(scope): subject, e.g. feat(auth): add login")
    )]
    InvalidCommitMessage(String),

    #[error("Unsupported output format: {format}")]
    #[diagnostic(
        code(commitsense::changelog::format),
        help("Use one of: markdown, json, text")
    )]
    UnsupportedFormat { format: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(commitsense::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(commitsense::git::error))]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
