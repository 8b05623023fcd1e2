//
//  bucket-link
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bucket Link Library
//!
//! Turns a position in a local Git or Mercurial checkout into the matching
//! Bitbucket page: the source view, the changeset that last touched a line,
//! the pull request that merged it, or the issue it mentions.
//!
//! ## Overview
//!
//! Everything is derived from the local repository. There is no API client;
//! the VCS command-line tools are run as subprocesses and their output is
//! parsed.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`context`]: Repository detection and Bitbucket remote matching
//! - [`vcs`]: Git and Mercurial backends behind one trait
//! - [`tracker`]: Pull request and issue reference extraction
//! - [`links`]: Bitbucket URL construction
//! - [`output`]: Printing, JSON, and browser delivery of links
//! - [`error`]: Error taxonomy
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bucket_link::context::ContextResolver;
//! use bucket_link::Config;
//!
//! let config = Config::load().expect("Failed to load config");
//! let resolver = ContextResolver::new(config);
//! let ctx = resolver
//!     .resolve_in(std::path::Path::new("."), &[])
//!     .expect("Not in a Bitbucket repository");
//! println!("Repository: {}", ctx.web_url());
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands and arguments defined using the clap derive API.
pub mod cli;

/// Configuration file management.
///
/// The configuration lives in a platform-specific location:
/// - Linux: `~/.config/bkt/config.toml`
/// - macOS: `~/Library/Application Support/bkt/config.toml`
/// - Windows: `%APPDATA%\bkt\config.toml`
pub mod config;

/// Repository context detection.
///
/// Finds the VCS in use, matches a remote against the known Bitbucket hosts,
/// and answers revision, merge, and issue questions for one repository.
pub mod context;

/// Error types shared by the library.
pub mod error;

/// Bitbucket URL builders.
pub mod links;

/// Output delivery for resolved links.
pub mod output;

/// Pull request and issue tracker references in commit messages.
pub mod tracker;

/// Utility functions and helpers.
pub mod util;

/// Version control backends.
///
/// Git and Mercurial are driven through their command-line tools behind the
/// [`vcs::VcsBackend`] trait.
pub mod vcs;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the repository context struct.
pub use context::RepoContext;

/// Re-export of the library error type.
pub use error::LinkError;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "bkt";

/// Application version constant, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1`: General error
/// - `2`: Invalid usage (reported by clap)
/// - `8`: The repository, remote, revision, merge, pull request, or issue
///   being looked up was not found
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Lookup found nothing.
    pub const NOT_FOUND: i32 = 8;
}
