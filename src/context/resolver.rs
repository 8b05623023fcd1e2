//
//  bucket-link
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Context Resolver
//!
//! Turns a working directory into a [`RepoContext`]: which VCS manages it,
//! where its root is, and which remote points at Bitbucket.
//!
//! ## Resolution Steps
//!
//! 1. Probe the directory for a Git, then a Mercurial, working copy
//! 2. Ask the backend for the repository root and run everything after
//!    that from there
//! 3. Match the backend's remote list against Bitbucket Cloud, the configured
//!    hosts, and any `--host` flags, in that order
//!
//! ## Example
//!
//! ```rust,no_run
//! use bucket_link::config::Config;
//! use bucket_link::context::ContextResolver;
//! use std::path::Path;
//!
//! let resolver = ContextResolver::new(Config::default());
//! let ctx = resolver.resolve_in(Path::new("."), &[])?;
//! println!("{} via {}", ctx.web_url(), ctx.remote.remote_name());
//! # Ok::<(), bucket_link::LinkError>(())
//! ```

use std::path::{Path, PathBuf};

use super::{RemoteMatcher, RepoContext};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::vcs::{self, VcsBackend};

/// Resolves repository context for one action.
///
/// Holds the configuration used to build the host list; a fresh resolver
/// and context are created per invocation.
pub struct ContextResolver {
    config: Config,
}

impl ContextResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves context from the global CLI options.
    ///
    /// Uses `--directory` when given, otherwise the process working directory.
    pub fn resolve(&self, options: &GlobalOptions) -> Result<RepoContext> {
        let dir = match &options.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        self.resolve_in(&dir, &options.hosts)
    }

    /// Detects the VCS in `dir` and resolves context against it.
    ///
    /// Detection runs in `dir`; later commands run in the working copy root.
    pub fn resolve_in(&self, dir: &Path, extra_hosts: &[String]) -> Result<RepoContext> {
        let detected = vcs::detect(dir)?;
        let root = detected.root()?;
        tracing::debug!(
            "Detected {} working copy at {} from {}",
            detected.kind(),
            root.display(),
            dir.display()
        );
        self.resolve_backend(vcs::open(detected.kind(), &root), dir, extra_hosts)
    }

    /// Resolves context for an already selected backend.
    pub fn resolve_backend(
        &self,
        backend: Box<dyn VcsBackend>,
        dir: &Path,
        extra_hosts: &[String],
    ) -> Result<RepoContext> {
        let root = backend.root()?;
        let matcher = RemoteMatcher::new(self.config.hosts_with(extra_hosts));
        let remote = matcher.find(&backend.list_remotes()?)?;

        Ok(RepoContext {
            backend,
            remote,
            root,
            dir: PathBuf::from(dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::LinkError;
    use crate::vcs::testing::ScriptedRunner;
    use crate::vcs::{GitBackend, HgBackend};

    #[test]
    fn test_resolve_git_backend() {
        let runner = Rc::new(
            ScriptedRunner::new()
                .ok("git rev-parse --show-toplevel", "/work/widgets\n")
                .ok(
                    "git remote -v",
                    "origin\tgit@bitbucket.org:acme/widgets.git (fetch)\norigin\tgit@bitbucket.org:acme/widgets.git (push)\n",
                ),
        );
        let resolver = ContextResolver::new(Config::default());
        let ctx = resolver
            .resolve_backend(Box::new(GitBackend::new(runner)), Path::new("/work/widgets"), &[])
            .unwrap();

        assert_eq!(ctx.root, PathBuf::from("/work/widgets"));
        assert_eq!(ctx.full_name(), "acme/widgets");
        assert_eq!(ctx.web_url(), "https://bitbucket.org/acme/widgets");
    }

    #[test]
    fn test_resolve_uses_extra_hosts() {
        let runner = Rc::new(
            ScriptedRunner::new()
                .ok("hg root", "/work/app\n")
                .ok("hg paths", "default = https://hg.example.com/team/app\n"),
        );
        let resolver = ContextResolver::new(Config::default());
        let ctx = resolver
            .resolve_backend(
                Box::new(HgBackend::new(runner)),
                Path::new("/work/app"),
                &["hg.example.com".to_string()],
            )
            .unwrap();
        assert_eq!(ctx.remote.host, "hg.example.com");
        assert_eq!(ctx.remote.remote_name(), "default");
    }

    #[test]
    fn test_resolve_without_bitbucket_remote() {
        let runner = Rc::new(
            ScriptedRunner::new()
                .ok("git rev-parse --show-toplevel", "/work/y\n")
                .ok("git remote -v", "origin\tgit@github.com:x/y.git (fetch)\n"),
        );
        let resolver = ContextResolver::new(Config::default());
        let result = resolver.resolve_backend(Box::new(GitBackend::new(runner)), Path::new("/work/y"), &[]);
        assert!(matches!(result, Err(LinkError::RemoteNotFound { .. })));
    }
}
