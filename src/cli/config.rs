//
//  bucket-link
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! The configuration file is edited by hand; these commands show where it
//! lives and what bkt makes of it.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::Config;

use super::GlobalOptions;

/// Inspect the configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Show => self.show(global),
        }
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = match &global.config {
            Some(path) => path.clone(),
            None => Config::config_path()?,
        };

        if global.json {
            let result = serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": config_path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }

    /// Show the configuration with defaults and `--host` flags applied
    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let effective = Config {
            bitbucket_hosts: config.hosts_with(&global.hosts),
            issue_trackers: config.trackers(),
        };

        if global.json {
            println!("{}", serde_json::to_string_pretty(&effective)?);
            return Ok(());
        }

        let rendered = toml::to_string_pretty(&effective)
            .context("Failed to render configuration")?;
        println!("{} {}", style("#").dim(), style("effective configuration").dim());
        print!("{}", rendered);
        Ok(())
    }
}
