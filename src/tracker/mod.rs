//
//  bucket-link
//  tracker/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Issue and Pull Request Extraction
//!
//! Scans commit messages for references that can be turned into links.
//!
//! | Reference | Pattern | Link |
//! |-----------|---------|------|
//! | Bitbucket issue | `#123` | `<host>/<repo>/issues/123` |
//! | Jira issue | `ABC-123` for each configured key | `<host>/browse/ABC-123` |
//! | Pull request | `pull request #123` (merge commit) | built by [`crate::links`] |
//!
//! An issue that is not found is `None`, not an error; the caller decides
//! whether that is worth reporting. A missing pull request number is an
//! error because the merge commit is expected to carry one.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::IssueTrackerConfig;
use crate::error::{LinkError, Result};

/// Bitbucket's merge commit marker, e.g. `Merged in feature (pull request #42)`.
static PULL_REQUEST: Lazy<Regex> = Lazy::new(|| Regex::new(r"pull request #(\d+)").unwrap());

static BITBUCKET_ISSUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\d+)\b").unwrap());

/// Extracts the pull request number from a merge commit message.
///
/// # Example
///
/// ```rust
/// use bucket_link::tracker::extract_pull_request_id;
///
/// let id = extract_pull_request_id("Merged in login (pull request #42)\n\nApproved", "abc")?;
/// assert_eq!(id, 42);
/// # Ok::<(), bucket_link::LinkError>(())
/// ```
pub fn extract_pull_request_id(message: &str, revision: &str) -> Result<u64> {
    PULL_REQUEST
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| LinkError::PullRequestNotFound {
            revision: revision.to_string(),
        })
}

/// Removes Bitbucket's `pull request #N` markers from a merge message.
///
/// The Bitbucket issue pattern would otherwise read the pull request number
/// as an issue number.
pub fn strip_pull_request_marker(message: &str) -> Cow<'_, str> {
    PULL_REQUEST.replace_all(message, "")
}

/// A configured issue tracker with its compiled patterns.
#[derive(Debug, Clone)]
pub enum IssueTracker {
    Bitbucket { host: String },
    Jira { host: String, keys: Vec<(String, Regex)> },
}

/// An issue reference found in a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueLink {
    /// `42` for Bitbucket, `ABC-42` for Jira.
    pub id: String,
    pub url: String,
}

impl IssueTracker {
    pub fn new(config: &IssueTrackerConfig) -> Self {
        match config {
            IssueTrackerConfig::Bitbucket { host } => Self::Bitbucket {
                host: trim_host(host),
            },
            IssueTrackerConfig::Jira { host, project_keys } => Self::Jira {
                host: trim_host(host),
                keys: project_keys
                    .iter()
                    .map(|key| {
                        let pattern = format!(r"\b{}-\d+\b", regex::escape(key.trim()));
                        (key.trim().to_string(), Regex::new(&pattern).unwrap())
                    })
                    .collect(),
            },
        }
    }

    /// Finds the issue id referenced by `message`, if any.
    ///
    /// Bitbucket returns the first `#N` in the text. Jira tries each project
    /// key in configured order and returns the first key that occurs
    /// anywhere, so an earlier key wins over an earlier position.
    pub fn find_issue(&self, message: &str) -> Option<String> {
        match self {
            Self::Bitbucket { .. } => BITBUCKET_ISSUE
                .captures(message)
                .map(|caps| caps[1].to_string()),
            Self::Jira { keys, .. } => keys
                .iter()
                .find_map(|(_, pattern)| pattern.find(message))
                .map(|m| m.as_str().to_string()),
        }
    }

    /// Builds the browser URL for issue `id` of `repo_slug`.
    pub fn issue_url(&self, repo_slug: &str, id: &str) -> String {
        match self {
            Self::Bitbucket { host } => format!("{}/{}/issues/{}", host, repo_slug, id),
            Self::Jira { host, .. } => format!("{}/browse/{}", host, id),
        }
    }
}

fn trim_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

/// Asks each tracker in order for an issue in `message`; the first hit wins.
pub fn find_issue_link(
    trackers: &[IssueTracker],
    repo_slug: &str,
    message: &str,
) -> Option<IssueLink> {
    trackers.iter().find_map(|tracker| {
        tracker.find_issue(message).map(|id| IssueLink {
            url: tracker.issue_url(repo_slug, &id),
            id,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira(keys: &[&str]) -> IssueTracker {
        IssueTracker::new(&IssueTrackerConfig::Jira {
            host: "https://jira.example.com/".to_string(),
            project_keys: keys.iter().map(|k| k.to_string()).collect(),
        })
    }

    fn bitbucket() -> IssueTracker {
        IssueTracker::new(&IssueTrackerConfig::default())
    }

    #[test]
    fn test_pull_request_id() {
        assert_eq!(
            extract_pull_request_id("Merged in feature/x (pull request #17)", "m").unwrap(),
            17
        );
    }

    #[test]
    fn test_pull_request_marker_is_case_sensitive() {
        let err = extract_pull_request_id("Merged Pull Request #17", "deadbeef").unwrap_err();
        match err {
            LinkError::PullRequestNotFound { revision } => assert_eq!(revision, "deadbeef"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bitbucket_first_issue_in_text() {
        let tracker = bitbucket();
        assert_eq!(tracker.find_issue("Fix #12, see also #7"), Some("12".to_string()));
        assert_eq!(tracker.find_issue("no refs here"), None);
        assert_eq!(tracker.find_issue("colour #12ab"), None);
    }

    #[test]
    fn test_bitbucket_issue_url() {
        assert_eq!(
            bitbucket().issue_url("acme/widgets", "12"),
            "https://bitbucket.org/acme/widgets/issues/12"
        );
    }

    #[test]
    fn test_jira_first_configured_key_wins() {
        let tracker = jira(&["ABC", "XYZ"]);
        assert_eq!(tracker.find_issue("see XYZ-1 and ABC-2"), Some("ABC-2".to_string()));
    }

    #[test]
    fn test_jira_requires_word_boundary() {
        let tracker = jira(&["ABC"]);
        assert_eq!(tracker.find_issue("XABC-1"), None);
        assert_eq!(tracker.find_issue("(ABC-99)"), Some("ABC-99".to_string()));
    }

    #[test]
    fn test_jira_issue_url_collapses_slash() {
        assert_eq!(
            jira(&["ABC"]).issue_url("acme/widgets", "ABC-2"),
            "https://jira.example.com/browse/ABC-2"
        );
    }

    #[test]
    fn test_find_issue_link_uses_tracker_order() {
        let trackers = vec![jira(&["OPS"]), bitbucket()];
        let link = find_issue_link(&trackers, "acme/widgets", "Fix #3 (OPS-8)").unwrap();
        assert_eq!(link.id, "OPS-8");
        assert_eq!(link.url, "https://jira.example.com/browse/OPS-8");

        let link = find_issue_link(&trackers, "acme/widgets", "Fix #3").unwrap();
        assert_eq!(link.url, "https://bitbucket.org/acme/widgets/issues/3");

        assert!(find_issue_link(&trackers, "acme/widgets", "tidy up").is_none());
    }

    #[test]
    fn test_strip_pull_request_marker_keeps_issue_references() {
        let stripped = strip_pull_request_marker("Merged in fix-#3 (pull request #7)\n\nCloses #5");
        assert!(!stripped.contains("#7"));
        let tracker = IssueTracker::new(&IssueTrackerConfig::default());
        assert_eq!(tracker.find_issue(&stripped), Some("3".to_string()));
        assert_eq!(
            tracker.find_issue(&strip_pull_request_marker("Merged in feature (pull request #7)")),
            None
        );
    }
}
