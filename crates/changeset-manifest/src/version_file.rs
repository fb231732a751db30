use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use changeset_core::Version;
use tracing::debug;

use crate::Result;
use crate::error::ManifestError;
use crate::store::VersionStore;

const DISABLED_MARKER: &str = "false";

/// A text file holding a single version line.
///
/// A missing file reads as `0.0.0`. The content `false` (any case) turns
/// versioning off for the project.
#[derive(Debug, Clone)]
pub struct VersionFileStore {
    path: PathBuf,
}

impl VersionFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_trimmed(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ManifestError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn is_disabled_marker(content: &str) -> bool {
    content.eq_ignore_ascii_case(DISABLED_MARKER)
}

impl VersionStore for VersionFileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Version> {
        let Some(content) = self.read_trimmed()? else {
            return Ok(Version::default());
        };

        if is_disabled_marker(&content) {
            return Err(ManifestError::VersioningDisabled {
                path: self.path.clone(),
            });
        }

        Version::parse(&content).map_err(|source| ManifestError::InvalidVersion {
            path: self.path.clone(),
            version: content,
            source,
        })
    }

    fn write(&self, version: &Version) -> Result<()> {
        std::fs::write(&self.path, format!("{version}\n")).map_err(|source| {
            ManifestError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), %version, "wrote version file");
        Ok(())
    }

    fn is_enabled(&self) -> Result<bool> {
        Ok(self
            .read_trimmed()?
            .is_none_or(|content| !is_disabled_marker(&content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> VersionFileStore {
        VersionFileStore::new(dir.path().join("VERSION"))
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = store_in(&dir);

        assert_eq!(store.read().expect("read"), Version::new(0, 0, 0));
        assert!(store.is_enabled().expect("is_enabled"));
    }

    #[test]
    fn reads_trimmed_version() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("VERSION"), "  v1.4.2\n\n").expect("write");

        let store = store_in(&dir);
        assert_eq!(store.read().expect("read"), Version::new(1, 4, 2));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = store_in(&dir);
        let version = Version::new(2, 0, 1).with_prerelease("rc3");

        store.write(&version).expect("write");

        let raw = std::fs::read_to_string(store.path()).expect("read raw");
        assert_eq!(raw, "2.0.1-rc3\n");
        assert_eq!(store.read().expect("read"), version);
    }

    #[test]
    fn false_marker_disables_versioning() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("VERSION"), "FALSE\n").expect("write");

        let store = store_in(&dir);
        assert!(!store.is_enabled().expect("is_enabled"));
        assert!(matches!(
            store.read(),
            Err(ManifestError::VersioningDisabled { .. })
        ));
    }

    #[test]
    fn garbage_is_an_invalid_version() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("VERSION"), "one.two.three").expect("write");

        let store = store_in(&dir);
        assert!(store.is_enabled().expect("is_enabled"));
        let err = store.read().expect_err("should fail");
        assert!(matches!(err, ManifestError::InvalidVersion { .. }));
        assert!(err.to_string().contains("one.two.three"));
    }
}
