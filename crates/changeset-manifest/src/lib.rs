mod error;
mod package_json;
mod store;
mod version_file;

pub use error::ManifestError;
pub use package_json::{PackageJsonStore, replace_version_field};
pub use store::{DEFAULT_VERSION_FILE, VersionStore, version_store_for};
pub use version_file::VersionFileStore;

pub type Result<T> = std::result::Result<T, ManifestError>;
