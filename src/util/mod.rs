//
//  bucket-link
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! System helpers shared by the commands.

use anyhow::{Context, Result};

/// Opens a URL in the user's default web browser.
///
/// Returns as soon as the browser has been launched.
///
/// # Example
///
/// ```rust,no_run
/// use bucket_link::util::open_browser;
///
/// open_browser("https://bitbucket.org/acme/widgets/pull-requests/42")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn open_browser(url: &str) -> Result<()> {
    tracing::debug!("Opening {}", url);
    webbrowser::open(url).with_context(|| format!("Failed to open {} in a browser", url))
}
