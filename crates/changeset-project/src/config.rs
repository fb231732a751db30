use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ProjectError;
use crate::{CONFIG_FILE, DEFAULT_CHANGESET_DIR};

const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
const DEFAULT_VERSION_FILE: &str = "VERSION";
const DEFAULT_PRERELEASE_LABEL: &str = "rc";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawReleaseConfig {
    changeset_dir: Option<String>,
    changelog_file: Option<String>,
    version_file: Option<String>,
    prerelease_label: Option<String>,
    keep_changesets: Option<bool>,
}

/// Workspace-wide release settings from `.changeset/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    changeset_dir: PathBuf,
    changelog_file: String,
    version_file: String,
    prerelease_label: String,
    keep_changesets: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            changeset_dir: PathBuf::from(DEFAULT_CHANGESET_DIR),
            changelog_file: DEFAULT_CHANGELOG_FILE.to_string(),
            version_file: DEFAULT_VERSION_FILE.to_string(),
            prerelease_label: DEFAULT_PRERELEASE_LABEL.to_string(),
            keep_changesets: false,
        }
    }
}

impl ReleaseConfig {
    /// Directory holding change records, relative to the workspace root.
    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    #[must_use]
    pub fn changelog_file(&self) -> &str {
        &self.changelog_file
    }

    #[must_use]
    pub fn version_file(&self) -> &str {
        &self.version_file
    }

    #[must_use]
    pub fn prerelease_label(&self) -> &str {
        &self.prerelease_label
    }

    #[must_use]
    pub fn keep_changesets(&self) -> bool {
        self.keep_changesets
    }

    #[must_use]
    pub fn changelog_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.changelog_file)
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_keep_changesets(mut self, keep_changesets: bool) -> Self {
        self.keep_changesets = keep_changesets;
        self
    }

    #[cfg(any(test, feature = "testing"))]
    #[must_use]
    pub fn with_changeset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.changeset_dir = dir.into();
        self
    }
}

impl From<RawReleaseConfig> for ReleaseConfig {
    fn from(raw: RawReleaseConfig) -> Self {
        let defaults = Self::default();
        Self {
            changeset_dir: raw
                .changeset_dir
                .map_or(defaults.changeset_dir, PathBuf::from),
            changelog_file: raw.changelog_file.unwrap_or(defaults.changelog_file),
            version_file: raw.version_file.unwrap_or(defaults.version_file),
            prerelease_label: raw.prerelease_label.unwrap_or(defaults.prerelease_label),
            keep_changesets: raw.keep_changesets.unwrap_or(defaults.keep_changesets),
        }
    }
}

/// # Errors
///
/// Returns `ProjectError::ConfigParse` if `content` is not a valid config.
pub fn parse_release_config(content: &str, path: &Path) -> Result<ReleaseConfig, ProjectError> {
    let raw: RawReleaseConfig =
        toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw.into())
}

/// Loads `.changeset/config.toml` under `workspace_root`. A missing file
/// yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_release_config(workspace_root: &Path) -> Result<ReleaseConfig, ProjectError> {
    let path = workspace_root.join(DEFAULT_CHANGESET_DIR).join(CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_release_config(&content, &path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReleaseConfig::default()),
        Err(source) => Err(ProjectError::ConfigRead { path, source }),
    }
}
