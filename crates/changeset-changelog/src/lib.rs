mod changelog;
mod entry;
mod error;
mod format;
mod render;
mod template;

pub use changelog::Changelog;
pub use entry::{ChangeItem, ChangeSection, ChangelogEntry, group_records, split_message};
pub use error::ChangelogError;
pub use format::{CHANGELOG_DESCRIPTION, CHANGELOG_TITLE, SECTION_PREFIX, new_changelog};
pub use render::ChangelogRenderer;
pub use template::{
    ChangelogTemplate, DEFAULT_TEMPLATE, TEMPLATE_OVERRIDE_PATH, TemplateCache, TemplateKey,
    find_template_override,
};

pub type Result<T> = std::result::Result<T, ChangelogError>;
