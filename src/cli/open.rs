//
//  bucket-link
//  cli/open.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Open command - show a file in the Bitbucket source browser
//!
//! Links to the checked-out revision rather than a branch, so the lines
//! stay highlighted correctly after the branch moves on.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::links::{source_url, LineRange};
use crate::output::LinkOutput;

use super::{resolve_context, GlobalOptions};

/// Open a file in the source browser
#[derive(Args, Debug)]
pub struct OpenCommand {
    /// File to open
    pub file: PathBuf,

    /// Line or range to highlight, as N or N:M (repeatable)
    #[arg(long = "line", short = 'l', value_name = "RANGE")]
    pub lines: Vec<LineRange>,
}

impl OpenCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (_, ctx) = resolve_context(global)?;
        let path = ctx.relative_path(&self.file)?;
        let revision = ctx.backend.current_revision()?;

        let url = source_url(
            &ctx.remote.host,
            ctx.full_name(),
            &revision,
            &path,
            &self.lines,
        );

        LinkOutput::new("source", url)
            .with_revision(revision)
            .with_path(path)
            .emit(global, "file")
    }
}
