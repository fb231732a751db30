mod changeset_io;
mod version_store;

pub use changeset_io::{FileSystemChangesetIO, generate_record_id, parse_record_file};
pub use version_store::FileSystemVersionStores;
