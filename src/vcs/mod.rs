//
//  bucket-link
//  vcs/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Version Control Backends
//!
//! A uniform interface over Git and Mercurial working copies.
//!
//! ## Detection Order
//!
//! [`detect`] runs each backend's status command in the target directory and
//! keeps the first one that succeeds. Git is tried first, so a directory that
//! is both a Git and a Mercurial working copy is treated as Git.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bucket_link::vcs::detect;
//! use std::path::Path;
//!
//! let backend = detect(Path::new("."))?;
//! println!("{} repository at {}", backend.kind(), backend.root()?.display());
//! println!("Checked out: {}", backend.current_revision()?);
//! # Ok::<(), bucket_link::LinkError>(())
//! ```

mod exec;
mod git;
mod hg;
mod merge;

pub use exec::{CommandRunner, ProcessRunner};
pub use git::{GitBackend, FALLBACK_BRANCH};
pub use hg::{HgBackend, DEFAULT_BRANCH};
pub use merge::find_merge;

#[cfg(test)]
pub(crate) use exec::testing;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LinkError, Result};

/// Which version control system a backend drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    Mercurial,
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsKind::Git => write!(f, "git"),
            VcsKind::Mercurial => write!(f, "hg"),
        }
    }
}

/// Read-only queries every supported VCS answers.
///
/// Revisions are opaque strings: full hashes for Git, short changeset ids for
/// Mercurial. All operations that shell out report a non-zero exit as
/// [`LinkError::CommandExecution`].
pub trait VcsBackend {
    fn kind(&self) -> VcsKind;

    /// Absolute path of the working copy root.
    fn root(&self) -> Result<PathBuf>;

    /// Raw remote descriptor lines (`git remote -v`, `hg paths`).
    fn list_remotes(&self) -> Result<Vec<String>>;

    /// The commit or changeset currently checked out.
    fn current_revision(&self) -> Result<String>;

    fn current_branch(&self) -> Result<String>;

    /// The branch changes are merged into, as seen from `remote`.
    ///
    /// Never fails because a lookup came up empty; backends fall back to a
    /// fixed name instead.
    fn default_branch(&self, remote: &str) -> Result<String>;

    /// The revision that last touched the 1-based `line` of `path`.
    ///
    /// `path` is relative to the repository root.
    fn selected_revision(&self, path: &str, line: usize) -> Result<String>;

    /// Full subject and body of `revision`.
    fn commit_message(&self, revision: &str) -> Result<String>;

    /// The merge commit that brought `target` into `default_branch`.
    fn merge_revision(&self, target: &str, default_branch: &str) -> Result<String>;
}

/// Probes `dir` and returns the backend for the VCS that manages it.
pub fn detect(dir: &Path) -> Result<Box<dyn VcsBackend>> {
    detect_with(ProcessRunner::new(dir), dir)
}

/// Builds the backend for `kind` with every command running in `root`.
///
/// Paths handed to the backend are repository-relative, so the runner must
/// sit at the working copy root rather than wherever detection started.
pub fn open(kind: VcsKind, root: &Path) -> Box<dyn VcsBackend> {
    let runner = ProcessRunner::new(root);
    match kind {
        VcsKind::Git => Box::new(GitBackend::new(runner)),
        VcsKind::Mercurial => Box::new(HgBackend::new(runner)),
    }
}

/// Same as [`detect`], with an explicit runner.
pub fn detect_with<R>(runner: R, dir: &Path) -> Result<Box<dyn VcsBackend>>
where
    R: CommandRunner + Clone + 'static,
{
    match GitBackend::probe(runner.clone()) {
        Ok(git) => return Ok(Box::new(git)),
        Err(e) => tracing::debug!("Not a Git working copy: {}", e),
    }

    match HgBackend::probe(runner) {
        Ok(hg) => return Ok(Box::new(hg)),
        Err(e) => tracing::debug!("Not a Mercurial working copy: {}", e),
    }

    Err(LinkError::NoRepositoryFound(dir.to_path_buf()))
}
