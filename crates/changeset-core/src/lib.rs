mod record;
pub mod types;

pub use changeset_version::{BumpType, Version, VersionError};
pub use record::{filter_by_project, highest_bump};
pub use types::*;
