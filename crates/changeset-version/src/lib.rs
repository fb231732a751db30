mod bump;
mod error;
mod version;

pub use bump::BumpType;
pub use error::VersionError;
pub use version::Version;

pub type Result<T> = std::result::Result<T, VersionError>;
