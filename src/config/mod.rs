//
//  bucket-link
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads the user's settings from a TOML file in the platform config
//! directory. The loaded [`Config`] is handed explicitly to the context
//! resolver and the issue lookup; nothing reads settings from global state.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bkt/config.toml`
//! - **macOS**: `~/Library/Application Support/bkt/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bkt\config\config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! ## Example Configuration File
//!
//! ```toml
//! # Self-hosted Bitbucket instances, checked after bitbucket.org
//! bitbucket_hosts = ["bitbucket.example.com"]
//!
//! [[issue_trackers]]
//! type = "jira"
//! host = "https://jira.example.com"
//! project_keys = ["ABC", "XYZ"]
//!
//! [[issue_trackers]]
//! type = "bitbucket"   # host defaults to https://bitbucket.org
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O
//! - [`hosts`]: Bitbucket host list construction and normalization

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LinkError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Extra hostnames that serve Bitbucket, in precedence order.
    #[serde(default)]
    pub bitbucket_hosts: Vec<String>,

    /// Issue trackers consulted by `bkt issue`, in order.
    #[serde(default)]
    pub issue_trackers: Vec<IssueTrackerConfig>,
}

/// One issue tracker entry.
///
/// # Invariants
///
/// - `jira` entries carry at least one project key
/// - `bitbucket` entries default their host to `https://bitbucket.org`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IssueTrackerConfig {
    Bitbucket {
        #[serde(default = "default_bitbucket_tracker_host")]
        host: String,
    },
    Jira {
        host: String,
        #[serde(default)]
        project_keys: Vec<String>,
    },
}

fn default_bitbucket_tracker_host() -> String {
    BITBUCKET_CLOUD_URL.to_string()
}

impl Default for IssueTrackerConfig {
    fn default() -> Self {
        Self::Bitbucket {
            host: default_bitbucket_tracker_host(),
        }
    }
}

impl IssueTrackerConfig {
    pub fn host(&self) -> &str {
        match self {
            Self::Bitbucket { host } | Self::Jira { host, .. } => host,
        }
    }

    /// Checks the entry's invariants.
    pub fn validate(&self) -> Result<()> {
        let host = self.host();
        match Url::parse(host) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(LinkError::InvalidConfig(format!(
                    "issue tracker host '{}' must be an http(s) URL",
                    host
                )))
            }
        }

        if let Self::Jira { project_keys, .. } = self {
            if project_keys.is_empty() {
                return Err(LinkError::InvalidConfig(format!(
                    "jira tracker at {} needs at least one project key",
                    host
                )));
            }
            if let Some(key) = project_keys.iter().find(|k| k.trim().is_empty()) {
                return Err(LinkError::InvalidConfig(format!(
                    "jira tracker at {} has an empty project key '{}'",
                    host, key
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        tracing::debug!("Loading config from {}", path.display());
        Self::parse(&read_config_file(path)?)
    }

    /// Parses and validates TOML configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| LinkError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.issue_trackers
            .iter()
            .try_for_each(IssueTrackerConfig::validate)
    }

    /// Path of the configuration file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME).ok_or_else(|| {
            LinkError::InvalidConfig("could not determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Bitbucket Cloud, the configured hosts, then `extra`, deduplicated.
    pub fn hosts_with(&self, extra: &[String]) -> Vec<String> {
        bitbucket_hosts(self.bitbucket_hosts.iter().chain(extra))
    }

    /// The configured trackers, or a Bitbucket Cloud tracker when none are set.
    pub fn trackers(&self) -> Vec<IssueTrackerConfig> {
        if self.issue_trackers.is_empty() {
            vec![IssueTrackerConfig::default()]
        } else {
            self.issue_trackers.clone()
        }
    }
}
