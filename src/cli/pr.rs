//
//  bucket-link
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request command - find the pull request that merged a line
//!
//! Resolves the revision behind the line, climbs to the merge commit that
//! brought it into the default branch, and reads the pull request number
//! Bitbucket writes into merge messages.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::links::pull_request_url;
use crate::output::LinkOutput;

use super::{resolve_context, GlobalOptions};

/// Open the pull request that merged a line
#[derive(Args, Debug)]
pub struct PrCommand {
    /// File containing the line
    pub file: PathBuf,

    /// 1-based line number; defaults to the checked-out revision
    #[arg(long, short = 'l')]
    pub line: Option<usize>,

    /// Open the pull request diff scrolled to the file
    #[arg(long)]
    pub diff: bool,
}

impl PrCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (_, ctx) = resolve_context(global)?;
        let path = ctx.relative_path(&self.file)?;
        let target = ctx.target_revision(&path, self.line)?;
        let (merge, id) = ctx.pull_request(&target)?;

        let url = pull_request_url(
            &ctx.remote.host,
            ctx.full_name(),
            id,
            self.diff.then_some(path.as_str()),
        );

        LinkOutput::new("pull-request", url)
            .with_revision(merge)
            .with_path(path)
            .with_id(id.to_string())
            .emit(global, &format!("pull request #{}", id))
    }
}
