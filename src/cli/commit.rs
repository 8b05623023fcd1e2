//
//  bucket-link
//  cli/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit command - open the changeset behind a line

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::links::changeset_url;
use crate::output::LinkOutput;

use super::{resolve_context, GlobalOptions};

/// Open the changeset that last touched a line
#[derive(Args, Debug)]
pub struct CommitCommand {
    /// File whose change to show
    pub file: PathBuf,

    /// 1-based line number; defaults to the checked-out revision
    #[arg(long, short = 'l')]
    pub line: Option<usize>,
}

impl CommitCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (_, ctx) = resolve_context(global)?;
        let path = ctx.relative_path(&self.file)?;
        let revision = ctx.target_revision(&path, self.line)?;

        let url = changeset_url(&ctx.remote.host, ctx.full_name(), &revision, &path);

        LinkOutput::new("changeset", url)
            .with_revision(revision)
            .with_path(path)
            .emit(global, "changeset")
    }
}
