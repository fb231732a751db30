use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use changeset_core::ChangeRecord;
use changeset_parse::{parse_change_record, serialize_change_record};
use rand::distributions::{Alphanumeric, DistString};
use tracing::{debug, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangesetReader, ChangesetWriter};

const RECORD_EXTENSION: &str = "md";
const ID_WORDS: u8 = 2;
const ID_SEPARATOR: &str = "-";
const ID_SUFFIX_LEN: usize = 4;
const FALLBACK_ID_PREFIX: &str = "change";

/// Change records stored as `<id>.md` files in one directory.
pub struct FileSystemChangesetIO {
    changeset_dir: PathBuf,
}

impl FileSystemChangesetIO {
    #[must_use]
    pub fn new(changeset_dir: impl Into<PathBuf>) -> Self {
        Self {
            changeset_dir: changeset_dir.into(),
        }
    }

    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    fn record_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.changeset_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.changeset_dir.display(), "changeset directory does not exist");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(OperationError::ChangesetList {
                    path: self.changeset_dir.clone(),
                    source,
                });
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangesetList {
                path: self.changeset_dir.clone(),
                source,
            })?;
            let path = entry.path();

            if !path.is_file() || path.extension().is_none_or(|ext| ext != RECORD_EXTENSION) {
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}

impl ChangesetReader for FileSystemChangesetIO {
    fn read_all(&self) -> Result<Vec<ChangeRecord>> {
        let mut records = Vec::new();

        for path in self.record_files()? {
            let record = fs::read_to_string(&path)
                .map_err(|source| OperationError::ChangesetFileRead {
                    path: path.clone(),
                    source,
                })
                .and_then(|content| parse_record_file(&path, &content));

            match record {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable change record");
                }
            }
        }

        debug!(
            dir = %self.changeset_dir.display(),
            count = records.len(),
            "read change records"
        );
        Ok(records)
    }
}

impl ChangesetWriter for FileSystemChangesetIO {
    fn write(&self, record: &ChangeRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.changeset_dir).map_err(|source| {
            OperationError::ChangesetDirCreate {
                path: self.changeset_dir.clone(),
                source,
            }
        })?;

        let path = self
            .changeset_dir
            .join(format!("{}.{RECORD_EXTENSION}", record.id));
        let content = serialize_change_record(record)?;
        fs::write(&path, content).map_err(|source| OperationError::ChangesetFileWrite {
            path: path.clone(),
            source,
        })?;

        debug!(id = %record.id, path = %path.display(), "wrote change record");
        Ok(path)
    }

    fn delete(&self, record: &ChangeRecord) -> Result<()> {
        let path = record
            .source_path
            .as_deref()
            .ok_or_else(|| OperationError::RecordWithoutPath {
                id: record.id.clone(),
            })?;

        fs::remove_file(path).map_err(|source| OperationError::ChangesetFileDelete {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(id = %record.id, path = %path.display(), "deleted change record");
        Ok(())
    }
}

/// Parses the content of a record file. The record id is the file name
/// without its extension.
///
/// # Errors
///
/// Returns an error if `path` has no usable file name or the content is not a
/// valid change record.
pub fn parse_record_file(path: &Path, content: &str) -> Result<ChangeRecord> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| OperationError::InvalidChangesetPath {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8",
        })?;

    let record =
        parse_change_record(id, content).map_err(|source| OperationError::ChangesetParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(record.with_source_path(path))
}

/// A human-readable id such as `brave-otter-x7k2`. Uniqueness is
/// probabilistic.
#[must_use]
pub fn generate_record_id() -> String {
    let words = petname::petname(ID_WORDS, ID_SEPARATOR)
        .unwrap_or_else(|| FALLBACK_ID_PREFIX.to_string());
    let suffix = Alphanumeric
        .sample_string(&mut rand::thread_rng(), ID_SUFFIX_LEN)
        .to_ascii_lowercase();
    format!("{words}{ID_SEPARATOR}{suffix}")
}
