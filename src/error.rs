//
//  bucket-link
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Types
//!
//! Every failure the link engine can report, as a single `thiserror` enum.
//!
//! The variants split into two groups:
//!
//! | Group | Variants | Meaning |
//! |-------|----------|---------|
//! | Not found | `NoRepositoryFound`, `RemoteNotFound`, `MergeNotFound`, `PullRequestNotFound`, `IssueNotFound` | A genuine precondition does not hold (no Bitbucket remote, unmerged commit, ...) |
//! | Failure | `BranchResolution`, `Attribution`, `CommandExecution`, `FileOutsideRepository`, `InvalidConfig`, `Io` | Something could not be computed |
//!
//! The CLI uses [`LinkError::is_not_found`] to pick the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results produced by the link engine.
pub type Result<T, E = LinkError> = std::result::Result<T, E>;

/// Unified error type for repository inspection and link resolution.
///
/// # Example
///
/// ```rust
/// use bucket_link::LinkError;
///
/// let err = LinkError::PullRequestNotFound { revision: "abc123".to_string() };
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "No pull request number found in the message of abc123");
/// ```
#[derive(Error, Debug)]
pub enum LinkError {
    /// Neither Git nor Mercurial recognises the directory.
    #[error("No Git or Mercurial repository found in {}", .0.display())]
    NoRepositoryFound(PathBuf),

    /// No remote line matched any configured Bitbucket host.
    #[error("No remote points at a Bitbucket host (tried: {})", .tried_hosts.join(", "))]
    RemoteNotFound { tried_hosts: Vec<String> },

    /// The current branch could not be determined (detached HEAD, empty output).
    #[error("Could not determine the current branch: {0}")]
    BranchResolution(String),

    /// Blame/annotate produced no revision for the requested line.
    #[error("Could not attribute line {line} of {path}: {reason}")]
    Attribution {
        path: String,
        line: usize,
        reason: String,
    },

    /// The target revision was never merged into the default branch with a merge commit.
    #[error("No merge commit brings {target} into {branch}")]
    MergeNotFound { target: String, branch: String },

    /// The merge commit message carries no `pull request #N` marker.
    #[error("No pull request number found in the message of {revision}")]
    PullRequestNotFound { revision: String },

    /// None of the configured issue trackers recognised an issue in the commit messages.
    #[error("No issue reference found for {revision}")]
    IssueNotFound { revision: String },

    /// A VCS subprocess exited unsuccessfully or could not be spawned.
    #[error("`{command}` failed (exit code {}): {output}", .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandExecution {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The requested file does not live under the repository root.
    #[error("{} is not inside the repository at {}", .file.display(), .root.display())]
    FileOutsideRepository { file: PathBuf, root: PathBuf },

    /// The configuration file violates an invariant.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LinkError {
    /// Returns `true` for errors that mean "the thing you asked for does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LinkError::NoRepositoryFound(_)
                | LinkError::RemoteNotFound { .. }
                | LinkError::MergeNotFound { .. }
                | LinkError::PullRequestNotFound { .. }
                | LinkError::IssueNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_execution_message() {
        let err = LinkError::CommandExecution {
            command: "git status --porcelain".to_string(),
            exit_code: Some(128),
            output: "fatal: not a git repository".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`git status --porcelain` failed (exit code 128): fatal: not a git repository"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_remote_not_found_lists_hosts() {
        let err = LinkError::RemoteNotFound {
            tried_hosts: vec!["bitbucket.org".to_string(), "git.example.com".to_string()],
        };
        assert!(err.to_string().ends_with("(tried: bitbucket.org, git.example.com)"));
        assert!(err.is_not_found());
    }
}
