//
//  bucket-link
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host List Module
//!
//! Builds the ordered list of hostnames a remote may point at to count as
//! "on Bitbucket".
//!
//! Bitbucket Cloud is always first; user-configured hosts (from the config
//! file and `--host`) follow in the order given. The order matters: the remote
//! matcher gives precedence to the earliest host that matches any remote.
//!
//! ## Usage
//!
//! ```rust
//! use bucket_link::config::{bitbucket_hosts, normalize_host};
//!
//! assert_eq!(normalize_host("https://Bitbucket.Example.com/"), "bitbucket.example.com");
//!
//! let hosts = bitbucket_hosts(["git.example.com", "bitbucket.org"]);
//! assert_eq!(hosts, vec!["bitbucket.org", "git.example.com"]);
//! ```

/// The hostname for Bitbucket Cloud.
///
/// # Value
///
/// `"bitbucket.org"`
pub const BITBUCKET_CLOUD: &str = "bitbucket.org";

/// Web root of Bitbucket Cloud, the default issue tracker host.
pub const BITBUCKET_CLOUD_URL: &str = "https://bitbucket.org";

/// Normalizes a host string for comparison and matching.
///
/// Strips the scheme and any trailing slash, trims whitespace and lowercases
/// the result.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.strip_suffix('/').unwrap_or(host);
    host.to_lowercase()
}

/// Returns Bitbucket Cloud followed by `extra` hosts, normalized and deduplicated.
///
/// Empty entries are dropped. The first occurrence of a host keeps its
/// position.
pub fn bitbucket_hosts<I, S>(extra: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hosts = vec![BITBUCKET_CLOUD.to_string()];
    for host in extra {
        let host = normalize_host(host.as_ref());
        if !host.is_empty() && !hosts.contains(&host) {
            hosts.push(host);
        }
    }
    hosts
}
