//
//  bucket-link
//  vcs/merge.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Merge commit resolution.
//!
//! Given the merge commits of `target..branch` listed two ways (along the
//! ancestry path, and along the first-parent chain), the merge that brought
//! `target` into `branch` is the oldest ancestry-path merge that also sits on
//! the mainline spine.

use std::collections::HashSet;

use crate::error::{LinkError, Result};

/// Finds the merge that integrated `target` into `branch`.
///
/// `ancestry_path` is newest-first, as `git rev-list` prints it. The scan
/// walks it oldest-first and returns the first entry also present in
/// `first_parent`.
///
/// # Example
///
/// ```rust
/// use bucket_link::vcs::find_merge;
///
/// let ancestry = vec!["C".to_string(), "B".to_string(), "A".to_string()];
/// let first_parent = vec!["A".to_string(), "D".to_string()];
/// let merge = find_merge(&ancestry, &first_parent, "t", "master")?;
/// assert_eq!(merge, "A");
/// # Ok::<(), bucket_link::LinkError>(())
/// ```
pub fn find_merge(
    ancestry_path: &[String],
    first_parent: &[String],
    target: &str,
    branch: &str,
) -> Result<String> {
    let mainline: HashSet<&str> = first_parent.iter().map(String::as_str).collect();

    ancestry_path
        .iter()
        .rev()
        .find(|rev| mainline.contains(rev.as_str()))
        .cloned()
        .ok_or_else(|| LinkError::MergeNotFound {
            target: target.to_string(),
            branch: branch.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_oldest_common_merge_wins() {
        let merge = find_merge(&revs(&["C", "B", "A"]), &revs(&["A", "D"]), "t", "master").unwrap();
        assert_eq!(merge, "A");
    }

    #[test]
    fn test_prefers_closest_ancestor_when_several_are_common() {
        // Both B and C are on the mainline; B is closer to the target.
        let merge = find_merge(&revs(&["C", "B", "A"]), &revs(&["C", "B", "D"]), "t", "master").unwrap();
        assert_eq!(merge, "B");
    }

    #[test]
    fn test_no_intersection_is_merge_not_found() {
        let err = find_merge(&revs(&["C", "B"]), &revs(&["D"]), "abc", "main").unwrap_err();
        match err {
            LinkError::MergeNotFound { target, branch } => {
                assert_eq!(target, "abc");
                assert_eq!(branch, "main");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_lists_are_merge_not_found() {
        assert!(matches!(
            find_merge(&[], &[], "abc", "main"),
            Err(LinkError::MergeNotFound { .. })
        ));
    }
}
