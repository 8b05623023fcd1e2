//
//  bucket-link
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod commit;
mod completion;
mod config;
mod issue;
mod open;
mod pr;

pub use commit::CommitCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use issue::IssueCommand;
pub use open::OpenCommand;
pub use pr::PrCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::context::{ContextResolver, RepoContext};

#[derive(Parser, Debug)]
#[command(
    name = "bkt",
    version,
    about = "Open the Bitbucket page behind a line of code",
    long_about = "bkt inspects the local Git or Mercurial repository and opens the matching\n\
                  Bitbucket source view, changeset, pull request, or issue in your browser.",
    propagate_version = true,
    after_help = "Use 'bkt <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Run as if started in DIR
    #[arg(long, short = 'C', global = true, env = "BKT_DIRECTORY", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Additional Bitbucket host (repeatable)
    #[arg(long = "host", global = true, env = "BKT_HOSTS", value_delimiter = ',', value_name = "HOST")]
    pub hosts: Vec<String>,

    /// Use this config file instead of the default one
    #[arg(long, global = true, env = "BKT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the URL instead of opening it
    #[arg(long, short = 'p', global = true)]
    pub print: bool,

    /// Print the result as JSON instead of opening it
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the config file selected by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        Ok(config?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a file (and selected lines) at the checked-out revision
    #[command(visible_alias = "src")]
    Open(OpenCommand),

    /// Open the changeset that last touched a line
    #[command(visible_alias = "changeset")]
    Commit(CommitCommand),

    /// Open the pull request that merged a line
    Pr(PrCommand),

    /// Open the issue referenced by the change behind a line
    Issue(IssueCommand),

    /// Inspect the configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the version
    Version,
}

/// Loads the configuration and resolves the repository for one command.
pub(crate) fn resolve_context(global: &GlobalOptions) -> Result<(Config, RepoContext)> {
    let config = global.load_config()?;
    let resolver = ContextResolver::new(config.clone());
    let ctx = resolver
        .resolve(global)
        .context("Could not resolve the Bitbucket repository")?;
    tracing::debug!(
        "Resolved {} ({} remote {})",
        ctx.web_url(),
        ctx.backend.kind(),
        ctx.remote.remote_name()
    );
    Ok((config, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_open_with_ranges() {
        let cli = Cli::try_parse_from([
            "bkt", "--print", "--host", "a.io,b.io", "open", "src/lib.rs", "-l", "10:5", "-l", "7",
        ])
        .unwrap();
        assert!(cli.global.print);
        assert_eq!(cli.global.hosts, vec!["a.io", "b.io"]);
        match cli.command {
            Commands::Open(cmd) => {
                assert_eq!(cmd.file, PathBuf::from("src/lib.rs"));
                let ranges: Vec<String> = cmd.lines.iter().map(|r| r.to_string()).collect();
                assert_eq!(ranges, vec!["5:10", "7"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_range() {
        assert!(Cli::try_parse_from(["bkt", "open", "a.rs", "-l", "x"]).is_err());
    }

    #[test]
    fn test_parse_pr_with_diff() {
        let cli = Cli::try_parse_from(["bkt", "pr", "a.rs", "--line", "3", "--diff"]).unwrap();
        match cli.command {
            Commands::Pr(cmd) => {
                assert_eq!(cmd.line, Some(3));
                assert!(cmd.diff);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
