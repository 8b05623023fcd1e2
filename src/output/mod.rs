//
//  bucket-link
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Delivers a resolved link in one of three ways:
//!
//! - **Browser** (default): announce the target and open the URL
//! - **Print** (`--print`): write the bare URL to stdout, for piping
//! - **JSON** (`--json`): write a [`LinkOutput`] object for scripting
//!
//! ## Example
//!
//! ```rust,ignore
//! use bucket_link::output::LinkOutput;
//!
//! LinkOutput::new("pull-request", url)
//!     .with_revision(merge)
//!     .emit(global, "pull request #42")?;
//! ```

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::cli::GlobalOptions;
use crate::util::open_browser;

/// Writes `value` as pretty-printed JSON on stdout.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// A link produced by one of the commands.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkOutput {
    /// `source`, `changeset`, `pull-request`, or `issue`.
    pub kind: &'static str,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl LinkOutput {
    pub fn new(kind: &'static str, url: String) -> Self {
        Self {
            kind,
            url,
            revision: None,
            path: None,
            id: None,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Prints or opens the link according to the global flags.
    ///
    /// `target` describes the page in the "Opening ..." message.
    pub fn emit(&self, global: &GlobalOptions, target: &str) -> Result<()> {
        if global.json {
            return write_json(self);
        }

        if global.print {
            println!("{}", self.url);
            return Ok(());
        }

        println!("{} Opening {} in browser...", style("→").cyan(), target);
        open_browser(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_skips_missing_fields() {
        let output = LinkOutput::new("pull-request", "https://bitbucket.org/a/b/pull-requests/3".to_string())
            .with_id("3");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "pull-request",
                "url": "https://bitbucket.org/a/b/pull-requests/3",
                "id": "3",
            })
        );
    }
}
