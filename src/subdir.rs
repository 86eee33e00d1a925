//! Package subdirectory extraction and path cleaning.

use tracing::trace;

use crate::constants::SUBDIR_SEPARATOR;
use crate::error::SubdirError;
use crate::hostname::RegistryKind;

/// Splits `input` at the first `//` into the package address and a cleaned
/// subdirectory.
///
/// A missing separator, an empty subdirectory, or one that cleans down to
/// `.` all yield `None`. Backslashes in the subdirectory are treated as
/// forward slashes.
///
/// # Errors
///
/// Returns `SubdirError` when the cleaned subdirectory would climb above
/// the package root.
///
/// # Examples
///
/// ```
/// use registry_address::{split_subdir, RegistryKind};
///
/// let (package, subdir) = split_subdir("hashicorp/k8-cluster//examples/./foo", RegistryKind::Component).unwrap();
/// assert_eq!(package, "hashicorp/k8-cluster");
/// assert_eq!(subdir.as_deref(), Some("examples/foo"));
///
/// assert!(split_subdir("hashicorp/k8-cluster//../nope", RegistryKind::Component).is_err());
/// ```
pub fn split_subdir(input: &str, kind: RegistryKind) -> Result<(&str, Option<String>), SubdirError> {
    let Some((package, raw_subdir)) = input.split_once(SUBDIR_SEPARATOR) else {
        return Ok((input, None));
    };

    if raw_subdir.is_empty() {
        return Ok((package, None));
    }

    let cleaned = clean_path(raw_subdir);
    trace!(subdir = raw_subdir, cleaned = %cleaned, "cleaned package subdirectory");

    if escapes_root(&cleaned) {
        return Err(SubdirError {
            path: raw_subdir.to_string(),
            kind,
        });
    }

    if cleaned == "." {
        return Ok((package, None));
    }

    Ok((package, Some(cleaned)))
}

/// Lexically cleans a slash-separated path.
///
/// Backslashes become forward slashes, repeated slashes collapse, `.`
/// segments are dropped, and `..` removes the preceding segment where there
/// is one. An empty result is `.`. A rooted path stays rooted and cannot
/// climb above `/`.
///
/// # Examples
///
/// ```
/// use registry_address::clean_path;
///
/// assert_eq!(clean_path("./nope/../child"), "child");
/// assert_eq!(clean_path(r"a\b//c/./d"), "a/b/c/d");
/// assert_eq!(clean_path("a/../../b"), "../b");
/// assert_eq!(clean_path(""), ".");
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let rooted = normalized.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

fn escapes_root(cleaned: &str) -> bool {
    cleaned == ".." || cleaned.starts_with("../")
}
