//
//  bucket-link
//  vcs/hg.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Mercurial Backend
//!
//! Implements [`VcsBackend`] on top of the `hg` executable.
//!
//! Mercurial differs from Git in three places:
//! - the default branch is always the named branch `default`
//! - `hg annotate` has no line filter, so the whole file is attributed and
//!   indexed by line number
//! - the pull request merge is found with a single revset query rather than
//!   by intersecting two ancestry walks

use std::path::PathBuf;

use super::exec::CommandRunner;
use super::{VcsBackend, VcsKind};
use crate::error::{LinkError, Result};

/// The branch every Mercurial repository integrates into.
pub const DEFAULT_BRANCH: &str = "default";

/// A Mercurial working copy driven through the `hg` executable.
pub struct HgBackend<R> {
    runner: R,
}

impl<R: CommandRunner> HgBackend<R> {
    /// Wraps `runner` without checking that it points at a Mercurial repository.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns a backend if `hg status` succeeds in the runner's directory.
    pub fn probe(runner: R) -> Result<Self> {
        runner.run("hg", &["status", "-q"])?;
        Ok(Self::new(runner))
    }

    fn hg(&self, args: &[&str]) -> Result<String> {
        self.runner.run("hg", args)
    }
}

impl<R: CommandRunner> VcsBackend for HgBackend<R> {
    fn kind(&self) -> VcsKind {
        VcsKind::Mercurial
    }

    fn root(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(self.hg(&["root"])?.trim()))
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        let output = self.hg(&["paths"])?;
        Ok(output
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .collect())
    }

    fn current_revision(&self) -> Result<String> {
        // `hg id -i` appends `+` when the working copy has local changes.
        let output = self.hg(&["id", "-i"])?;
        Ok(output.trim().trim_end_matches('+').to_string())
    }

    fn current_branch(&self) -> Result<String> {
        let branch = self.hg(&["branch"])?.trim().to_string();
        if branch.is_empty() {
            return Err(LinkError::BranchResolution(
                "hg branch printed nothing".to_string(),
            ));
        }
        Ok(branch)
    }

    fn default_branch(&self, _remote: &str) -> Result<String> {
        Ok(DEFAULT_BRANCH.to_string())
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

        let output = self.hg(&["annotate", "-c", path]).map_err(|e| match e {
            LinkError::CommandExecution { output, .. } => attribution(output),
            other => other,
        })?;

        let entry = output.lines().nth(line - 1).ok_or_else(|| {
            attribution(format!(
                "file has {} annotated lines",
                output.lines().count()
            ))
        })?;

        entry
            .split_once(':')
            .map(|(revision, _)| revision.trim().to_string())
            .filter(|revision| !revision.is_empty())
            .ok_or_else(|| attribution("annotate produced no revision".to_string()))
    }

    fn commit_message(&self, revision: &str) -> Result<String> {
        let output = self.hg(&["log", "-r", revision, "--template", "{desc}"])?;
        Ok(output.trim_end().to_string())
    }

    fn merge_revision(&self, target: &str, default_branch: &str) -> Result<String> {
        let revset = format!(
            "first(descendants({}) and merge() and desc(\"pull request\"))",
            target
        );
        let output = self.hg(&["log", "-r", &revset, "--template", "{node|short}"])?;
        let revision = output.trim();
        if revision.is_empty() {
            return Err(LinkError::MergeNotFound {
                target: target.to_string(),
                branch: default_branch.to_string(),
            });
        }
        Ok(revision.to_string())
    }
}
