use std::path::PathBuf;

use changeset_core::ChangeRecord;

use crate::Result;

pub trait ChangesetReader: Send + Sync {
    /// Every readable change record. Records that fail to parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the record directory cannot be listed.
    fn read_all(&self) -> Result<Vec<ChangeRecord>>;
}

pub trait ChangesetWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn write(&self, record: &ChangeRecord) -> Result<PathBuf>;

    /// # Errors
    ///
    /// Returns an error if the record has no backing file or it cannot be
    /// removed.
    fn delete(&self, record: &ChangeRecord) -> Result<()>;
}

impl<T: ChangesetReader + ?Sized> ChangesetReader for &T {
    fn read_all(&self) -> Result<Vec<ChangeRecord>> {
        (**self).read_all()
    }
}

impl<T: ChangesetWriter + ?Sized> ChangesetWriter for &T {
    fn write(&self, record: &ChangeRecord) -> Result<PathBuf> {
        (**self).write(record)
    }

    fn delete(&self, record: &ChangeRecord) -> Result<()> {
        (**self).delete(record)
    }
}
