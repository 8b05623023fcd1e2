//
//  bucket-link
//  vcs/git.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Git Backend
//!
//! Implements [`VcsBackend`] by shelling out to `git` and parsing its text
//! output.
//!
//! | Operation | Command |
//! |-----------|---------|
//! | probe | `git status --porcelain` |
//! | root | `git rev-parse --show-toplevel` |
//! | remotes | `git remote -v` |
//! | current revision | `git show --no-patch HEAD` |
//! | current branch | `git branch` |
//! | remote default branch | `git rev-parse --abbrev-ref refs/remotes/<remote>/HEAD` |
//! | line attribution | `git blame --porcelain -L n,n -- <path>` |
//! | commit message | `git show --no-patch --format=%B <rev>` |
//! | merge lookup | `git rev-list --merges --ancestry-path` / `--first-parent` |

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::exec::CommandRunner;
use super::merge::find_merge;
use super::{VcsBackend, VcsKind};
use crate::error::{LinkError, Result};

/// Branch used when neither the remote HEAD nor the current branch resolves.
pub const FALLBACK_BRANCH: &str = "master";

/// Matches the `commit <hash>` header printed by `git show`.
static COMMIT_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^commit (\w+)").unwrap());

/// Matches the hash that opens each `git blame --porcelain` entry.
static BLAME_HASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\^?([0-9a-f]{7,64})\b").unwrap());

/// A Git working copy driven through the `git` executable.
pub struct GitBackend<R> {
    runner: R,
}

type BranchStep<'a> = (&'static str, Box<dyn Fn() -> Result<String> + 'a>);

impl<R: CommandRunner> GitBackend<R> {
    /// Wraps `runner` without checking that it points at a Git repository.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns a backend if `git status` succeeds in the runner's directory.
    pub fn probe(runner: R) -> Result<Self> {
        runner.run("git", &["status", "--porcelain"])?;
        Ok(Self::new(runner))
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.runner.run("git", args)
    }

    /// Branch recorded for the remote's HEAD, e.g. `origin/main`.
    fn remote_head(&self, remote: &str) -> Result<String> {
        let reference = format!("refs/remotes/{}/HEAD", remote);
        let output = self.git(&["rev-parse", "--abbrev-ref", &reference])?;
        Ok(output.trim().to_string())
    }

    fn rev_list(&self, range: &str, walk: &str) -> Result<Vec<String>> {
        let output = self.git(&["rev-list", "--merges", walk, range])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

impl<R: CommandRunner> VcsBackend for GitBackend<R> {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn root(&self) -> Result<PathBuf> {
        let output = self.git(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(output.trim()))
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        let output = self.git(&["remote", "-v"])?;
        Ok(output
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .collect())
    }

    fn current_revision(&self) -> Result<String> {
        let output = self.git(&["show", "--no-patch", "HEAD"])?;
        COMMIT_HEADER
            .captures(&output)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| LinkError::CommandExecution {
                command: "git show --no-patch HEAD".to_string(),
                exit_code: Some(0),
                output: "no commit header in output".to_string(),
            })
    }

    fn current_branch(&self) -> Result<String> {
        let output = self.git(&["branch"])?;
        let marked = output
            .lines()
            .find_map(|line| line.strip_prefix("* "))
            .map(str::trim)
            .ok_or_else(|| LinkError::BranchResolution("no branch is checked out".to_string()))?;

        if marked.starts_with('(') {
            return Err(LinkError::BranchResolution(format!(
                "HEAD is detached {}",
                marked
            )));
        }

        Ok(marked.to_string())
    }

    fn default_branch(&self, remote: &str) -> Result<String> {
        let steps: Vec<BranchStep<'_>> = vec![
            ("remote HEAD", Box::new(|| self.remote_head(remote))),
            ("current branch", Box::new(|| self.current_branch())),
        ];

        for (name, step) in steps {
            match step() {
                Ok(branch) if !branch.is_empty() => {
                    tracing::debug!("Default branch from {}: {}", name, branch);
                    return Ok(branch);
                }
                Ok(_) => tracing::debug!("Default branch lookup via {} was empty", name),
                Err(e @ (LinkError::CommandExecution { .. } | LinkError::BranchResolution(_))) => {
                    tracing::debug!("Default branch lookup via {} failed: {}", name, e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("Falling back to default branch {}", FALLBACK_BRANCH);
        Ok(FALLBACK_BRANCH.to_string())
    }

    fn selected_revision(&self, path: &str, line: usize) -> Result<String> {
        let attribution = |reason: String| LinkError::Attribution {
            path: path.to_string(),
            line,
            reason,
        };

        if line == 0 {
            return Err(attribution("line numbers start at 1".to_string()));
        }

        let span = format!("{},{}", line, line);
        let output = self
            .git(&["blame", "--porcelain", "-L", &span, "--", path])
            .map_err(|e| match e {
                LinkError::CommandExecution { output, .. } => attribution(output),
                other => other,
            })?;

        let revision = output
            .lines()
            .next()
            .and_then(|first| BLAME_HASH.captures(first))
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| attribution("blame produced no revision".to_string()))?;

        if revision.chars().all(|c| c == '0') {
            return Err(attribution("line is not committed yet".to_string()));
        }

        Ok(revision)
    }

    fn commit_message(&self, revision: &str) -> Result<String> {
        let output = self.git(&["show", "--no-patch", "--format=%B", revision])?;
        Ok(output.trim_end().to_string())
    }

    fn merge_revision(&self, target: &str, default_branch: &str) -> Result<String> {
        let range = format!("{}..{}", target, default_branch);
        let ancestry_path = self.rev_list(&range, "--ancestry-path")?;
        let first_parent = self.rev_list(&range, "--first-parent")?;
        tracing::debug!(
            "{}: {} ancestry-path merges, {} first-parent merges",
            range,
            ancestry_path.len(),
            first_parent.len()
        );
        find_merge(&ancestry_path, &first_parent, target, default_branch)
    }
}
