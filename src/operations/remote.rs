//! Git remote operations

use std::collections::HashSet;

use gix::bstr::ByteSlice;

use crate::operations::command::{GitCommandOpts, run_git_checked};
use crate::{GitError, GitResult, RemoteDescriptor, RepoHandle};

/// Add a new remote to repository configuration
pub async fn add_remote(
    repo: RepoHandle,
    name: &str,
    url: &str,
    opts: &GitCommandOpts,
) -> GitResult<()> {
    if !is_valid_git_url(url) {
        return Err(GitError::InvalidUrl(url.to_string()));
    }

    if remote_exists(repo, name).await? {
        return Err(GitError::RemoteExists(name.to_string()));
    }

    run_git_checked(&["remote", "add", "--", name, url], opts, Some(url)).await?;
    Ok(())
}

/// List configured remotes in configuration order.
///
/// A remote may be split over several `[remote "<name>"]` sections (for
/// example one in the global config and one local); the first section that
/// names a remote fixes its position.
pub async fn list_remotes(repo: RepoHandle) -> GitResult<Vec<RemoteDescriptor>> {
    let repo_clone = repo.clone_inner();

    tokio::task::spawn_blocking(move || {
        let snapshot = repo_clone.config_snapshot();
        let config = snapshot.plumbing();

        let mut order: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut fetch_urls: Vec<Option<String>> = Vec::new();
        let mut push_urls: Vec<Option<String>> = Vec::new();

        let Some(sections) = config.sections_by_name("remote") else {
            return Ok(Vec::new());
        };

        for section in sections {
            let Some(name) = section.header().subsection_name() else {
                continue;
            };
            let name = name.to_str_lossy().into_owned();

            let index = if seen.insert(name.clone()) {
                order.push(name);
                fetch_urls.push(None);
                push_urls.push(None);
                order.len() - 1
            } else {
                order.iter().position(|n| *n == name).unwrap_or(0)
            };

            if let Some(url) = section.value("url") {
                fetch_urls[index] = Some(url.to_str_lossy().into_owned());
            }
            if let Some(url) = section.value("pushurl") {
                push_urls[index] = Some(url.to_str_lossy().into_owned());
            }
        }

        let remotes = order
            .into_iter()
            .zip(fetch_urls.into_iter().zip(push_urls))
            .filter_map(|(name, (fetch, push))| {
                // A section without any URL does not define a usable remote
                let fetch_url = fetch.or_else(|| push.clone())?;
                let push_url = push.unwrap_or_else(|| fetch_url.clone());
                Some(RemoteDescriptor {
                    name,
                    fetch_url,
                    push_url,
                })
            })
            .collect();

        Ok(remotes)
    })
    .await
    .map_err(|e| GitError::Gix(Box::new(e)))?
}

/// Whether a remote named `name` is configured.
pub async fn remote_exists(repo: RepoHandle, name: &str) -> GitResult<bool> {
    let remotes = list_remotes(repo).await?;
    Ok(remotes.iter().any(|r| r.name == name))
}

/// The configured remote named `name`, or [`GitError::RemoteNotFound`].
pub async fn find_remote(repo: RepoHandle, name: &str) -> GitResult<RemoteDescriptor> {
    list_remotes(repo)
        .await?
        .into_iter()
        .find(|r| r.name == name)
        .ok_or_else(|| GitError::RemoteNotFound(name.to_string()))
}

/// Validate Git URL format
pub fn is_valid_git_url(url: &str) -> bool {
    const SCHEMES: [&str; 5] = ["https://", "http://", "git://", "ssh://", "file://"];

    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }

    if let Some(scheme) = SCHEMES.iter().find(|s| url.starts_with(**s)) {
        return url.len() > scheme.len();
    }

    // SSH format like git@github.com:user/repo.git
    match url.split_once(':') {
        Some((user_host, path)) => {
            let host = user_host.rsplit('@').next().unwrap_or_default();
            user_host.contains('@') && !host.is_empty() && !path.is_empty()
        }
        None => false,
    }
}
