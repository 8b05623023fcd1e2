//
//  bucket-link
//  links/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Link Builders
//!
//! Formats the browser URLs for the pages `bkt` opens.
//!
//! | Page | URL |
//! |------|-----|
//! | Source | `https://<host>/<repo>/src/<rev>/<path>#<file>-<ranges>` |
//! | Changeset | `https://<host>/<repo>/commits/<rev>#chg-<path>` |
//! | Pull request | `https://<host>/<repo>/pull-requests/<id>` |
//! | Pull request diff | `https://<host>/<repo>/pull-requests/<id>/diff#chg-<path>` |
//!
//! ## Example
//!
//! ```rust
//! use bucket_link::links::{source_url, LineRange};
//!
//! let ranges: Vec<LineRange> = vec!["4".parse()?, "12:9".parse()?];
//! let url = source_url("bitbucket.org", "acme/widgets", "3f2a9c1", "src/lib.rs", &ranges);
//! assert_eq!(url, "https://bitbucket.org/acme/widgets/src/3f2a9c1/src/lib.rs#lib.rs-4,9:12");
//! # Ok::<(), String>(())
//! ```

use std::fmt;
use std::str::FromStr;

/// An inclusive, 1-based span of lines.
///
/// Always stored low-to-high, so a selection made bottom-up formats the same
/// as one made top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Creates a range from two line numbers in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for LineRange {
    type Err = String;

    /// Parses `N`, `N:M`, or `M:N` (also accepting `-` as the separator).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_line = |part: &str| -> Result<usize, String> {
            match part.trim().parse::<usize>() {
                Ok(0) => Err(format!("line numbers start at 1, got '{}'", s)),
                Ok(n) => Ok(n),
                Err(_) => Err(format!("invalid line range '{}', expected N or N:M", s)),
            }
        };

        match s.split_once([':', '-']) {
            Some((a, b)) => Ok(Self::new(parse_line(a)?, parse_line(b)?)),
            None => Ok(Self::single(parse_line(s)?)),
        }
    }
}

/// Joins ranges into the `N,N:M` form Bitbucket uses in source fragments.
pub fn format_line_ranges(ranges: &[LineRange]) -> String {
    ranges
        .iter()
        .map(LineRange::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn repo_base(host: &str, repo: &str) -> String {
    format!("https://{}/{}", host, repo)
}

/// Source view of `path` at `revision`, highlighting `ranges`.
///
/// With no ranges the fragment is left off.
pub fn source_url(host: &str, repo: &str, revision: &str, path: &str, ranges: &[LineRange]) -> String {
    let mut url = format!("{}/src/{}/{}", repo_base(host, repo), revision, path);
    if !ranges.is_empty() {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        url.push_str(&format!("#{}-{}", file_name, format_line_ranges(ranges)));
    }
    url
}

/// Changeset view of `revision`, scrolled to `path`.
pub fn changeset_url(host: &str, repo: &str, revision: &str, path: &str) -> String {
    format!("{}/commits/{}#chg-{}", repo_base(host, repo), revision, path)
}

/// Pull request overview, or its diff scrolled to `diff_path`.
pub fn pull_request_url(host: &str, repo: &str, id: u64, diff_path: Option<&str>) -> String {
    let base = format!("{}/pull-requests/{}", repo_base(host, repo), id);
    match diff_path {
        Some(path) => format!("{}/diff#chg-{}", base, path),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_single_line_formats_plain() {
        assert_eq!(LineRange::single(7).to_string(), "7");
        assert_eq!("7".parse::<LineRange>().unwrap().to_string(), "7");
        assert_eq!("7:7".parse::<LineRange>().unwrap().to_string(), "7");
    }

    #[test]
    fn test_bottom_up_selection_is_normalized() {
        assert_eq!(LineRange::new(10, 5).to_string(), "5:10");
        assert_eq!("10:5".parse::<LineRange>().unwrap(), LineRange::new(5, 10));
        assert_eq!("3-8".parse::<LineRange>().unwrap().to_string(), "3:8");
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!("0".parse::<LineRange>().is_err());
        assert!("a:3".parse::<LineRange>().is_err());
        assert!("".parse::<LineRange>().is_err());
    }

    #[test]
    fn test_source_url_without_ranges() {
        assert_eq!(
            source_url("bitbucket.org", "acme/widgets", "abc", "README.md", &[]),
            "https://bitbucket.org/acme/widgets/src/abc/README.md"
        );
    }

    #[test]
    fn test_source_url_round_trip() {
        let ranges = vec![LineRange::single(3), LineRange::new(20, 11)];
        let url = source_url("git.example.com", "team/app", "c0ffee", "lib/core/io.rs", &ranges);

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("git.example.com"));
        let path = parsed.path().strip_prefix("/team/app/src/c0ffee/").unwrap();
        assert_eq!(path, "lib/core/io.rs");

        let fragment = parsed.fragment().unwrap();
        let tokens = fragment.strip_prefix("io.rs-").unwrap();
        let recovered: Vec<LineRange> = tokens.split(',').map(|t| t.parse().unwrap()).collect();
        assert_eq!(recovered, ranges);
    }

    #[test]
    fn test_changeset_url() {
        assert_eq!(
            changeset_url("bitbucket.org", "acme/widgets", "abc", "src/a.rs"),
            "https://bitbucket.org/acme/widgets/commits/abc#chg-src/a.rs"
        );
    }

    #[test]
    fn test_pull_request_urls() {
        assert_eq!(
            pull_request_url("bitbucket.org", "acme/widgets", 42, None),
            "https://bitbucket.org/acme/widgets/pull-requests/42"
        );
        assert_eq!(
            pull_request_url("bitbucket.org", "acme/widgets", 42, Some("src/a.rs")),
            "https://bitbucket.org/acme/widgets/pull-requests/42/diff#chg-src/a.rs"
        );
    }
}
