mod changeset_io;
mod version_store_provider;

pub use changeset_io::{ChangesetReader, ChangesetWriter};
pub use version_store_provider::VersionStoreProvider;
