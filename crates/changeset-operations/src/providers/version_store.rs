use changeset_core::Project;
use changeset_manifest::{VersionStore, version_store_for};
use changeset_project::ReleaseConfig;

use crate::traits::VersionStoreProvider;

/// Picks the on-disk version backend from each project's type.
pub struct FileSystemVersionStores {
    version_file: String,
}

impl FileSystemVersionStores {
    #[must_use]
    pub fn new(config: &ReleaseConfig) -> Self {
        Self {
            version_file: config.version_file().to_string(),
        }
    }
}

impl VersionStoreProvider for FileSystemVersionStores {
    fn store_for(&self, project: &Project) -> Box<dyn VersionStore + '_> {
        version_store_for(project, &self.version_file)
    }
}
