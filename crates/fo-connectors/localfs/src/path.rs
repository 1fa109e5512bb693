// path.rs — Lexical path cleaning and root confinement.
//
// Every caller path goes through `confine()` before it is joined onto the
// connector root. Cleaning is purely textual (no filesystem access):
//
//   - runs of '/' collapse to one
//   - '.' segments are dropped
//   - 'name/..' pairs cancel
//   - '..' above an absolute root is dropped; above a relative start it stays
//   - an empty result becomes "."
//
// After cleaning, the path must name something strictly below the root.
// `ensure_contained()` is the optional symlink-aware second check.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::LocalFsError;

/// Lexically clean a '/'-separated path.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // '..' at an absolute root stays at the root.
                _ if rooted => {}
                _ => parts.push(".."),
            },
            name => parts.push(name),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Component-wise cleaning for native paths (the configured root).
///
/// Same rules as [`clean_path`], but platform separators and prefixes are
/// kept intact.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let last_is_name = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if last_is_name {
                    out.pop();
                } else if !at_root {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// True for cleaned paths that name no object: empty, "." or "..".
pub fn is_degenerate(cleaned: &str) -> bool {
    matches!(cleaned, "" | "." | "..")
}

/// Clean a caller path and return its root-relative form.
///
/// Absolute paths are taken as relative to the root. Fails with
/// [`LocalFsError::InvalidPath`] when the path resolves to the root itself
/// or climbs above it.
pub fn confine(path: &str) -> Result<String, LocalFsError> {
    let cleaned = clean_path(path);

    if is_degenerate(&cleaned) || cleaned == "/" || cleaned.starts_with("../") {
        return Err(LocalFsError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(cleaned.trim_start_matches('/').to_string())
}

/// Verify that the real (symlink-resolved) location of `full` is under
/// `canonical_root`.
///
/// `full` may not exist yet; the deepest existing ancestor is checked
/// instead. A dangling symlink on the way counts as an escape, since
/// creating through it would land wherever it points.
pub fn ensure_contained(
    canonical_root: &Path,
    full: &Path,
    original: &str,
) -> Result<(), LocalFsError> {
    let escape = || LocalFsError::PathEscapesRoot {
        path: original.to_string(),
    };

    for ancestor in full.ancestors() {
        match fs::canonicalize(ancestor) {
            Ok(real) => {
                return if real.starts_with(canonical_root) {
                    Ok(())
                } else {
                    Err(escape())
                };
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if fs::symlink_metadata(ancestor).is_ok() {
                    return Err(escape());
                }
            }
            Err(source) => {
                return Err(LocalFsError::IoError {
                    path: ancestor.to_path_buf(),
                    source,
                });
            }
        }
    }

    Err(escape())
}
