//! Repository probing and opening

use std::path::{Path, PathBuf};

use crate::{GitError, GitResult, RepoHandle};

/// Open the repository at exactly `path`.
pub async fn open_repo<P: AsRef<Path>>(path: P) -> GitResult<RepoHandle> {
    let path: PathBuf = path.as_ref().to_path_buf();

    tokio::task::spawn_blocking(move || {
        if !path.exists() {
            return Err(GitError::RepoNotFound(path));
        }
        let repo = gix::open(&path)?;
        Ok(RepoHandle::new(repo))
    })
    .await
    .map_err(|e| GitError::Gix(Box::new(e)))?
}

/// Whether `path` is a git repository.
///
/// Never fails: inaccessible or non-repository paths report `false`.
pub async fn is_repository<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref().to_path_buf();

    tokio::task::spawn_blocking(move || gix::open(&path).is_ok())
        .await
        .unwrap_or(false)
}
