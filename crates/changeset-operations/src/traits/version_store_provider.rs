use changeset_core::Project;
use changeset_manifest::VersionStore;

pub trait VersionStoreProvider: Send + Sync {
    fn store_for(&self, project: &Project) -> Box<dyn VersionStore + '_>;
}

impl<T: VersionStoreProvider + ?Sized> VersionStoreProvider for &T {
    fn store_for(&self, project: &Project) -> Box<dyn VersionStore + '_> {
        (**self).store_for(project)
    }
}
