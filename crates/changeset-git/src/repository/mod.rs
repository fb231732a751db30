mod tag;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{GitError, Result};

/// A git repository whose tags back a [`crate::TagResolver`].
///
/// Bare repositories are accepted; their root is the git directory itself.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// Opens the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if no repository encloses `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|source| {
            debug!(path = %path.display(), %source, "repository discovery failed");
            GitError::NotARepository {
                path: path.to_path_buf(),
            }
        })?;

        let root = inner.workdir().unwrap_or_else(|| inner.path());
        let root = dunce::simplified(root).to_path_buf();
        debug!(root = %root.display(), bare = inner.is_bare(), "opened repository");

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.inner.is_bare()
    }
}
