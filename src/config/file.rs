//
//  bucket-link
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration file I/O.

use std::path::Path;

use crate::error::Result;

/// Reads the contents of a configuration file.
pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Checks whether a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}
