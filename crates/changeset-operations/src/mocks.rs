use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use changeset_core::{ChangeRecord, Project, ProjectType, Version};
use changeset_manifest::{ManifestError, VersionStore};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetReader, ChangesetWriter, VersionStoreProvider};

#[derive(Default)]
pub struct MockChangesetStore {
    records: Mutex<Vec<ChangeRecord>>,
    deleted: Mutex<Vec<String>>,
}

impl MockChangesetStore {
    #[must_use]
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| {
                let path = PathBuf::from(format!("/mock/.changeset/{}.md", record.id));
                record.with_source_path(path)
            })
            .collect();
        Self {
            records: Mutex::new(records),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn remaining(&self) -> Vec<String> {
        self.records
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }
}

impl MockChangesetStore {
    /// # Panics
    ///
    /// Panics if the lock is poisoned or no record has this id.
    #[must_use]
    pub fn record(&self, id: &str) -> ChangeRecord {
        self.records
            .lock()
            .expect("lock poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .expect("record exists")
    }
}

impl ChangesetReader for MockChangesetStore {
    fn read_all(&self) -> Result<Vec<ChangeRecord>> {
        Ok(self.records.lock().expect("lock poisoned").clone())
    }
}

impl ChangesetWriter for MockChangesetStore {
    fn write(&self, record: &ChangeRecord) -> Result<PathBuf> {
        let path = PathBuf::from(format!("/mock/.changeset/{}.md", record.id));
        let stored = record.clone().with_source_path(&path);
        let mut records = self.records.lock().expect("lock poisoned");
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = stored,
            None => records.push(stored),
        }
        Ok(path)
    }

    fn delete(&self, record: &ChangeRecord) -> Result<()> {
        if record.source_path.is_none() {
            return Err(OperationError::RecordWithoutPath {
                id: record.id.clone(),
            });
        }
        self.records
            .lock()
            .expect("lock poisoned")
            .retain(|r| r.id != record.id);
        self.deleted
            .lock()
            .expect("lock poisoned")
            .push(record.id.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockVersionStore {
    path: PathBuf,
    version: Arc<Mutex<Version>>,
    enabled: bool,
}

impl MockVersionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, version: Version) -> Self {
        Self {
            path: path.into(),
            version: Arc::new(Mutex::new(version)),
            enabled: true,
        }
    }

    #[must_use]
    pub fn disabled(path: impl Into<PathBuf>) -> Self {
        Self {
            enabled: false,
            ..Self::new(path, Version::default())
        }
    }

    /// # Panics
    ///
    /// Panics if the lock is poisoned.
    #[must_use]
    pub fn current(&self) -> Version {
        self.version.lock().expect("lock poisoned").clone()
    }
}

impl VersionStore for MockVersionStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> changeset_manifest::Result<Version> {
        if !self.enabled {
            return Err(ManifestError::VersioningDisabled {
                path: self.path.clone(),
            });
        }
        Ok(self.current())
    }

    fn write(&self, version: &Version) -> changeset_manifest::Result<()> {
        *self.version.lock().expect("lock poisoned") = version.clone();
        Ok(())
    }

    fn is_enabled(&self) -> changeset_manifest::Result<bool> {
        Ok(self.enabled)
    }
}

#[derive(Default)]
pub struct MockVersionStores {
    stores: HashMap<String, MockVersionStore>,
}

impl MockVersionStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `version` is not a valid version.
    #[must_use]
    pub fn with_version(mut self, project: &str, version: &str) -> Self {
        let version = Version::parse(version).expect("valid version");
        self.stores.insert(
            project.to_string(),
            MockVersionStore::new(format!("/mock/{project}/VERSION"), version),
        );
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, project: &str) -> Self {
        self.stores.insert(
            project.to_string(),
            MockVersionStore::disabled(format!("/mock/{project}/VERSION")),
        );
        self
    }

    /// # Panics
    ///
    /// Panics if no store was registered for `project`.
    #[must_use]
    pub fn get(&self, project: &str) -> &MockVersionStore {
        self.stores.get(project).expect("store registered")
    }
}

impl VersionStoreProvider for MockVersionStores {
    fn store_for(&self, project: &Project) -> Box<dyn VersionStore + '_> {
        let store = self
            .stores
            .get(&project.name)
            .cloned()
            .unwrap_or_else(|| MockVersionStore::new(project.root.join("VERSION"), Version::default()));
        Box::new(store)
    }
}

#[must_use]
pub fn go_project(name: &str, root: impl AsRef<Path>) -> Project {
    let root = root.as_ref();
    Project::new(name, root, root.join("go.mod"), ProjectType::Go)
}

#[must_use]
pub fn mock_project(name: &str) -> Project {
    go_project(name, format!("/mock/{name}"))
}
