//
//  bucket-link
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue command - open the issue a change refers to
//!
//! Trackers come from the `issue_trackers` config list and are consulted in
//! order. Without any configured tracker, Bitbucket Cloud issues are assumed.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::output::LinkOutput;
use crate::tracker::IssueTracker;

use super::{resolve_context, GlobalOptions};

/// Open the issue referenced by the change behind a line
#[derive(Args, Debug)]
pub struct IssueCommand {
    /// File containing the line
    pub file: PathBuf,

    /// 1-based line number; defaults to the checked-out revision
    #[arg(long, short = 'l')]
    pub line: Option<usize>,
}

impl IssueCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (config, ctx) = resolve_context(global)?;
        let trackers: Vec<IssueTracker> = config.trackers().iter().map(IssueTracker::new).collect();

        let path = ctx.relative_path(&self.file)?;
        let target = ctx.target_revision(&path, self.line)?;
        let issue = ctx.find_issue(&target, &trackers)?;

        LinkOutput::new("issue", issue.url)
            .with_revision(target)
            .with_path(path)
            .with_id(issue.id.clone())
            .emit(global, &format!("issue {}", issue.id))
    }
}
