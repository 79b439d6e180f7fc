//! Clone-and-resolve for documentation sources

use engrain_fs::{NormalizedPath, io};
use git2::Repository;
use git2::build::CheckoutBuilder;

use crate::error::{Error, Result};

/// A fetched source checkout.
#[derive(Debug, Clone)]
pub struct FetchedRepo {
    /// Local checkout the caller can read files from.
    pub local_path: NormalizedPath,
    /// Full hex commit hash the checkout is at.
    pub commit: String,
    /// The ref that was resolved: the caller's ref, or the HEAD shorthand
    /// when none was given.
    pub resolved_ref: String,
}

/// Clone `url` into `dest` and check out `reference` (HEAD when `None`).
///
/// Any stale checkout at `dest` is removed first; the result is always a
/// fresh clone. Branch and tag refs are checked out detached at their
/// resolved commit.
pub fn fetch_source(
    url: &str,
    reference: Option<&str>,
    dest: &NormalizedPath,
) -> Result<FetchedRepo> {
    io::remove_tree(dest)?;
    tracing::debug!(url, dest = %dest, "cloning source repository");

    let repo = Repository::clone(url, dest.to_native()).map_err(|e| Error::CloneFailed {
        url: url.to_string(),
        message: e.message().to_string(),
    })?;

    let (commit, resolved_ref) = match reference {
        Some(r) => {
            let object = repo.revparse_single(r).map_err(|_| Error::RefNotFound {
                url: url.to_string(),
                reference: r.to_string(),
            })?;
            let commit = object.peel_to_commit().map_err(|_| Error::RefNotFound {
                url: url.to_string(),
                reference: r.to_string(),
            })?;
            repo.checkout_tree(
                commit.as_object(),
                Some(CheckoutBuilder::default().force()),
            )?;
            repo.set_head_detached(commit.id())?;
            (commit.id().to_string(), r.to_string())
        }
        None => {
            let head = repo.head()?;
            let commit = head.peel_to_commit()?;
            let resolved = if head.is_branch() {
                head.shorthand().unwrap_or("HEAD").to_string()
            } else {
                "HEAD".to_string()
            };
            (commit.id().to_string(), resolved)
        }
    };

    tracing::debug!(url, %commit, %resolved_ref, "source resolved");
    Ok(FetchedRepo {
        local_path: dest.clone(),
        commit,
        resolved_ref,
    })
}
