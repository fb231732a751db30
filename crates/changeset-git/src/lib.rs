mod error;
mod repository;
mod resolver;
mod source;
mod tag;

pub use error::GitError;
pub use repository::Repository;
pub use resolver::TagResolver;
pub use source::{InMemoryTags, TagSource};
pub use tag::{
    extract_prerelease_number, extract_rc_number, prerelease_pattern, tag_name, tag_pattern,
    version_from_tag,
};

pub type Result<T> = std::result::Result<T, GitError>;
