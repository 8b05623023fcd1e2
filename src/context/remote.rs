//
//  bucket-link
//  context/remote.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Remote Matching
//!
//! Finds the remote that points at a Bitbucket host in the raw output of
//! `git remote -v` or `hg paths`.
//!
//! ## Supported Remote Formats
//!
//! Anything of the form `<host>[:/]<owner>/<repo>[.git]` anywhere in the line:
//! - Git SSH: `origin  git@bitbucket.org:acme/widgets.git (fetch)`
//! - Git HTTPS: `origin  https://dev@bitbucket.org/acme/widgets.git (push)`
//! - Mercurial: `default = ssh://hg@bitbucket.org/acme/widgets`
//!
//! ## Precedence
//!
//! Hosts are tried in configured order and, for each host, every line is
//! searched. The first host that matches any line wins, so a Bitbucket Cloud
//! remote beats a self-hosted one even when it is listed later.

use regex::Regex;

use crate::error::{LinkError, Result};

/// A remote line that points at a Bitbucket host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMatch {
    /// Host as written in the matched pattern (e.g. `bitbucket.org`).
    pub host: String,
    /// `owner/repo` with any `.git` suffix removed.
    pub repo_slug: String,
    /// The full remote line the match came from.
    pub raw_remote_line: String,
}

impl RemoteMatch {
    /// Name of the remote (`origin`, `default`, ...): the line's first token.
    pub fn remote_name(&self) -> &str {
        self.raw_remote_line
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }
}

/// Searches remote lines for a set of hosts, in order.
///
/// # Example
///
/// ```rust
/// use bucket_link::context::RemoteMatcher;
///
/// let matcher = RemoteMatcher::new(vec!["bitbucket.org".to_string()]);
/// let lines = vec![
///     "upstream\tgit@github.com:x/y.git (fetch)".to_string(),
///     "origin\tgit@bitbucket.org:acme/widgets.git (fetch)".to_string(),
/// ];
/// let remote = matcher.find(&lines)?;
/// assert_eq!(remote.repo_slug, "acme/widgets");
/// assert_eq!(remote.remote_name(), "origin");
/// # Ok::<(), bucket_link::LinkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RemoteMatcher {
    hosts: Vec<String>,
    patterns: Vec<Regex>,
}

impl RemoteMatcher {
    pub fn new(hosts: Vec<String>) -> Self {
        let patterns = hosts
            .iter()
            .map(|host| {
                let pattern = format!(
                    r"((?i:{}))[:/]([\w.\-]+/[\w.\-]+?)(?:\.git)?(?:[\s/]|$)",
                    regex::escape(host)
                );
                Regex::new(&pattern).unwrap()
            })
            .collect();
        Self { hosts, patterns }
    }

    /// Returns the first match, giving precedence to host order.
    ///
    /// Hosts compare case-insensitively; the match reports the configured
    /// spelling.
    pub fn find(&self, lines: &[String]) -> Result<RemoteMatch> {
        for (host, pattern) in self.hosts.iter().zip(&self.patterns) {
            for line in lines {
                if let Some(caps) = pattern.captures(line) {
                    let remote = RemoteMatch {
                        host: host.clone(),
                        repo_slug: caps[2].to_string(),
                        raw_remote_line: line.clone(),
                    };
                    tracing::debug!(
                        "Remote {} points at {}/{}",
                        remote.remote_name(),
                        remote.host,
                        remote.repo_slug
                    );
                    return Ok(remote);
                }
            }
        }

        Err(LinkError::RemoteNotFound {
            tried_hosts: self.hosts.clone(),
        })
    }
}
