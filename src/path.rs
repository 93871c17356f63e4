//! Repository path normalization.
//!
//! Paths are normalized lexically: relative paths are anchored at the
//! current directory, `~` expands to `$HOME`, and `.`/`..` segments are
//! collapsed. Surrounding whitespace is part of the path and is kept.
//! The filesystem is never consulted, so the result is usable as
//! a stable identity key even for paths that do not exist yet.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Repository path must not be empty")]
    Empty,

    #[error("Invalid repository path '{path}': {reason}")]
    Invalid { path: String, reason: &'static str },
}

/// Normalize a caller-supplied path into an absolute, canonical form.
pub fn normalize(raw: &str) -> Result<PathBuf, PathError> {
    if raw.trim().is_empty() {
        return Err(PathError::Empty);
    }
    if raw.contains('\0') {
        return Err(PathError::Invalid {
            path: raw.escape_default().to_string(),
            reason: "contains a NUL byte",
        });
    }

    let expanded = expand_home(raw)?;
    let anchored = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir().map_err(|_| PathError::Invalid {
            path: raw.to_string(),
            reason: "relative path with no current directory",
        })?;
        cwd.join(expanded)
    };

    Ok(collapse(&anchored))
}

fn expand_home(path: &str) -> Result<PathBuf, PathError> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };

    let home = std::env::var_os("HOME").ok_or_else(|| PathError::Invalid {
        path: path.to_string(),
        reason: "HOME is not set",
    })?;
    Ok(PathBuf::from(home).join(rest))
}

/// Collapse `.` and `..` segments. `..` at the root stays at the root.
fn collapse(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}
