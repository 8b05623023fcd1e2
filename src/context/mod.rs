//
//  bucket-link
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Context Module
//!
//! Ties a VCS backend to the Bitbucket remote it was cloned from, and answers
//! the questions the commands ask: which revision touched this line, which
//! merge brought it in, which pull request or issue that merge belongs to.
//!
//! ## Architecture
//!
//! - [`RemoteMatcher`]: finds the Bitbucket remote among the VCS remotes
//! - [`ContextResolver`]: probes the directory and builds the context
//! - [`RepoContext`]: the resolved repository, scoped to a single action
//!
//! ## Example
//!
//! ```rust,no_run
//! use bucket_link::config::Config;
//! use bucket_link::context::ContextResolver;
//! use std::path::Path;
//!
//! let ctx = ContextResolver::new(Config::default()).resolve_in(Path::new("."), &[])?;
//! let target = ctx.target_revision("src/lib.rs", Some(42))?;
//! let (merge, pr) = ctx.pull_request(&target)?;
//! println!("Line 42 arrived in {} via pull request #{}", merge, pr);
//! # Ok::<(), bucket_link::LinkError>(())
//! ```

mod remote;
mod resolver;

pub use remote::*;
pub use resolver::*;

use std::path::{Component, Path, PathBuf};

use crate::error::{LinkError, Result};
use crate::tracker::{
    extract_pull_request_id, find_issue_link, strip_pull_request_marker, IssueLink, IssueTracker,
};
use crate::vcs::VcsBackend;

/// Everything known about the repository for the current action.
///
/// # Fields
///
/// * `backend` - The Git or Mercurial backend driving the working copy
/// * `remote` - The remote pointing at Bitbucket
/// * `root` - Absolute path of the working copy root
/// * `dir` - The directory the action was started from; relative file
///   arguments are resolved against it
pub struct RepoContext {
    pub backend: Box<dyn VcsBackend>,
    pub remote: RemoteMatch,
    pub root: PathBuf,
    pub dir: PathBuf,
}

impl RepoContext {
    /// Returns the repository path in the format "owner/repo".
    pub fn full_name(&self) -> &str {
        &self.remote.repo_slug
    }

    /// Returns the repository's home page.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}", self.remote.host, self.remote.repo_slug)
    }

    /// Returns `file` relative to the repository root, `/`-separated.
    ///
    /// Relative paths are taken relative to [`RepoContext::dir`]. The file
    /// must exist.
    pub fn relative_path(&self, file: &Path) -> Result<String> {
        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dir.join(file)
        };
        let absolute = absolute.canonicalize()?;
        let root = self.root.canonicalize()?;

        let relative = absolute
            .strip_prefix(&root)
            .map_err(|_| LinkError::FileOutsideRepository {
                file: absolute.clone(),
                root: root.clone(),
            })?;

        Ok(relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// The branch merges are looked up against.
    pub fn default_branch(&self) -> Result<String> {
        self.backend.default_branch(self.remote.remote_name())
    }

    /// The revision behind `line` of `path`, or the checked-out revision.
    pub fn target_revision(&self, path: &str, line: Option<usize>) -> Result<String> {
        match line {
            Some(line) => self.backend.selected_revision(path, line),
            None => self.backend.current_revision(),
        }
    }

    /// The merge commit that brought `target` into the default branch.
    pub fn merge_revision(&self, target: &str) -> Result<String> {
        let branch = self.default_branch()?;
        self.backend.merge_revision(target, &branch)
    }

    /// Finds the merge for `target` and the pull request number it records.
    pub fn pull_request(&self, target: &str) -> Result<(String, u64)> {
        let merge = self.merge_revision(target)?;
        let message = self.backend.commit_message(&merge)?;
        let id = extract_pull_request_id(&message, &merge)?;
        tracing::debug!("{} was merged in {} (pull request #{})", target, merge, id);
        Ok((merge, id))
    }

    /// Looks for an issue reference for `target`.
    ///
    /// The target's own message is scanned first. If nothing matches, the
    /// message of the merge that integrated it is scanned, minus the
    /// `pull request #N` marker. A merge that cannot be found just ends the
    /// search.
    pub fn find_issue(&self, target: &str, trackers: &[IssueTracker]) -> Result<IssueLink> {
        let message = self.backend.commit_message(target)?;
        if let Some(link) = find_issue_link(trackers, self.full_name(), &message) {
            return Ok(link);
        }

        match self.merge_revision(target) {
            Ok(merge) => {
                let message = self.backend.commit_message(&merge)?;
                let message = strip_pull_request_marker(&message);
                if let Some(link) = find_issue_link(trackers, self.full_name(), &message) {
                    tracing::debug!("Issue {} found on merge {}", link.id, merge);
                    return Ok(link);
                }
            }
            Err(e @ (LinkError::MergeNotFound { .. } | LinkError::CommandExecution { .. })) => {
                tracing::debug!("No merge to scan for issues: {}", e);
            }
            Err(e) => return Err(e),
        }

        Err(LinkError::IssueNotFound {
            revision: target.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::IssueTrackerConfig;
    use crate::vcs::testing::ScriptedRunner;
    use crate::vcs::GitBackend;

    fn context(runner: ScriptedRunner) -> RepoContext {
        RepoContext {
            backend: Box::new(GitBackend::new(Rc::new(runner))),
            remote: RemoteMatch {
                host: "bitbucket.org".to_string(),
                repo_slug: "acme/widgets".to_string(),
                raw_remote_line: "origin\tgit@bitbucket.org:acme/widgets.git (fetch)".to_string(),
            },
            root: PathBuf::from("/work/widgets"),
            dir: PathBuf::from("/work/widgets"),
        }
    }

    fn merged_runner(merge_message: &str) -> ScriptedRunner {
        ScriptedRunner::new()
            .ok("git rev-parse --abbrev-ref refs/remotes/origin/HEAD", "origin/master\n")
            .ok("git rev-list --merges --ancestry-path abc..origin/master", "m2\nm1\n")
            .ok("git rev-list --merges --first-parent abc..origin/master", "m2\nm1\n")
            .ok("git show --no-patch --format=%B m1", merge_message)
    }

    #[test]
    fn test_pull_request_for_target() {
        let ctx = context(merged_runner("Merged in feature (pull request #7)\n"));
        assert_eq!(ctx.pull_request("abc").unwrap(), ("m1".to_string(), 7));
    }

    #[test]
    fn test_pull_request_missing_marker() {
        let ctx = context(merged_runner("Merge branch 'feature'\n"));
        assert!(matches!(
            ctx.pull_request("abc"),
            Err(LinkError::PullRequestNotFound { revision }) if revision == "m1"
        ));
    }

    #[test]
    fn test_issue_found_on_target_message() {
        let runner = ScriptedRunner::new().ok("git show --no-patch --format=%B abc", "Fix crash (#12)\n");
        let ctx = context(runner);
        let trackers = vec![IssueTracker::new(&IssueTrackerConfig::default())];
        let link = ctx.find_issue("abc", &trackers).unwrap();
        assert_eq!(link.url, "https://bitbucket.org/acme/widgets/issues/12");
    }

    #[test]
    fn test_issue_falls_back_to_merge_message() {
        let runner = merged_runner("Merged in ABC-4 (pull request #7)\n")
            .ok("git show --no-patch --format=%B abc", "tidy up\n");
        let ctx = context(runner);
        let trackers = vec![IssueTracker::new(&IssueTrackerConfig::Jira {
            host: "https://jira.example.com".to_string(),
            project_keys: vec!["ABC".to_string()],
        })];
        let link = ctx.find_issue("abc", &trackers).unwrap();
        assert_eq!(link.id, "ABC-4");
        assert_eq!(link.url, "https://jira.example.com/browse/ABC-4");
    }

    #[test]
    fn test_merge_marker_is_not_a_bitbucket_issue() {
        let runner = merged_runner("Merged in feature (pull request #7)\n")
            .ok("git show --no-patch --format=%B abc", "Add widget\n");
        let ctx = context(runner);
        let trackers = vec![IssueTracker::new(&IssueTrackerConfig::default())];
        assert!(matches!(
            ctx.find_issue("abc", &trackers),
            Err(LinkError::IssueNotFound { revision }) if revision == "abc"
        ));
    }

    #[test]
    fn test_bitbucket_issue_on_merge_message() {
        let runner = merged_runner("Merged in feature (pull request #7)\n\nFixes #31\n")
            .ok("git show --no-patch --format=%B abc", "Add widget\n");
        let ctx = context(runner);
        let trackers = vec![IssueTracker::new(&IssueTrackerConfig::default())];
        let link = ctx.find_issue("abc", &trackers).unwrap();
        assert_eq!(link.url, "https://bitbucket.org/acme/widgets/issues/31");
    }

    #[test]
    fn test_issue_not_found_when_unmerged() {
        let runner = ScriptedRunner::new()
            .ok("git show --no-patch --format=%B abc", "tidy up\n")
            .ok("git rev-parse --abbrev-ref refs/remotes/origin/HEAD", "origin/master\n")
            .ok("git rev-list --merges --ancestry-path abc..origin/master", "")
            .ok("git rev-list --merges --first-parent abc..origin/master", "");
        let ctx = context(runner);
        let trackers = vec![IssueTracker::new(&IssueTrackerConfig::default())];
        assert!(matches!(
            ctx.find_issue("abc", &trackers),
            Err(LinkError::IssueNotFound { revision }) if revision == "abc"
        ));
    }

    #[test]
    fn test_relative_path_inside_and_outside_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("src/deep")).unwrap();
        std::fs::write(root.path().join("src/deep/mod.rs"), "").unwrap();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("x.rs"), "").unwrap();

        let mut ctx = context(ScriptedRunner::new());
        ctx.root = root.path().to_path_buf();
        ctx.dir = root.path().join("src");

        assert_eq!(ctx.relative_path(Path::new("deep/mod.rs")).unwrap(), "src/deep/mod.rs");
        assert!(matches!(
            ctx.relative_path(&outside.path().join("x.rs")),
            Err(LinkError::FileOutsideRepository { .. })
        ));
    }
}
