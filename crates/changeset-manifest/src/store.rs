use std::path::Path;

use changeset_core::{Project, ProjectType, Version};

use crate::Result;
use crate::package_json::PackageJsonStore;
use crate::version_file::VersionFileStore;

pub const DEFAULT_VERSION_FILE: &str = "VERSION";

/// Persisted current version of one project.
pub trait VersionStore: Send + Sync {
    fn path(&self) -> &Path;

    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or holds an invalid
    /// version, or if versioning is disabled for the project.
    fn read(&self) -> Result<Version>;

    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or written.
    fn write(&self, version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read.
    fn is_enabled(&self) -> Result<bool>;
}

/// Go projects keep a bare version file in the project root, Node projects
/// keep the `version` field of their manifest.
#[must_use]
pub fn version_store_for(project: &Project, version_file: &str) -> Box<dyn VersionStore> {
    match project.project_type {
        ProjectType::Go => Box::new(VersionFileStore::new(project.root.join(version_file))),
        ProjectType::Node => Box::new(PackageJsonStore::new(project.manifest_path.clone())),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn go_project_uses_version_file_in_root() {
        let project = Project::new(
            "auth",
            "/repo/services/auth",
            "/repo/services/auth/go.mod",
            ProjectType::Go,
        );

        let store = version_store_for(&project, DEFAULT_VERSION_FILE);
        assert_eq!(store.path(), PathBuf::from("/repo/services/auth/VERSION"));
    }

    #[test]
    fn node_project_uses_manifest() {
        let project = Project::new(
            "web",
            "/repo/apps/web",
            "/repo/apps/web/package.json",
            ProjectType::Node,
        );

        let store = version_store_for(&project, DEFAULT_VERSION_FILE);
        assert_eq!(store.path(), PathBuf::from("/repo/apps/web/package.json"));
    }
}
