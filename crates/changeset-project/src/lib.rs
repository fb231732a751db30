mod config;
mod error;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE: &str = "config.toml";

pub use config::{ReleaseConfig, load_release_config, parse_release_config};
pub use error::ProjectError;

pub type Result<T> = std::result::Result<T, ProjectError>;
