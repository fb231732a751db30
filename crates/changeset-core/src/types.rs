use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use changeset_version::BumpType;

/// Pull request metadata resolved ahead of time by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A pending change, stored as one markdown file per record.
///
/// The identifier is the backing file name without its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub id: String,
    pub project_bumps: IndexMap<String, BumpType>,
    pub message: String,
    pub source_path: Option<PathBuf>,
    pub pull_request: Option<PullRequest>,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_bumps: IndexMap::new(),
            message: message.into(),
            source_path: None,
            pull_request: None,
        }
    }

    /// Later calls for the same project replace the earlier bump.
    #[must_use]
    pub fn with_bump(mut self, project: impl Into<String>, bump: BumpType) -> Self {
        self.project_bumps.insert(project.into(), bump);
        self
    }

    #[must_use]
    pub fn with_pull_request(mut self, pull_request: PullRequest) -> Self {
        self.pull_request = Some(pull_request);
        self
    }

    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn affects(&self, project: &str) -> bool {
        self.project_bumps.contains_key(project)
    }

    #[must_use]
    pub fn bump_for(&self, project: &str) -> Option<BumpType> {
        self.project_bumps.get(project).copied()
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.project_bumps.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Go,
    Node,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Go => f.write_str("Go"),
            Self::Node => f.write_str("Node"),
        }
    }
}

/// A releasable project inside the workspace, supplied by workspace discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub project_type: ProjectType,
}

impl Project {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        manifest_path: impl Into<PathBuf>,
        project_type: ProjectType,
    ) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            manifest_path: manifest_path.into(),
            project_type,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_affects_only_listed_projects() {
        let record = ChangeRecord::new("brave-otter-x1y2", "Fix login")
            .with_bump("auth", BumpType::Patch)
            .with_bump("api", BumpType::Minor);

        assert!(record.affects("auth"));
        assert!(record.affects("api"));
        assert!(!record.affects("web"));
        assert_eq!(record.bump_for("api"), Some(BumpType::Minor));
        assert_eq!(record.bump_for("web"), None);
    }

    #[test]
    fn with_bump_keeps_keys_unique() {
        let record = ChangeRecord::new("id", "msg")
            .with_bump("auth", BumpType::Patch)
            .with_bump("auth", BumpType::Major);

        assert_eq!(record.project_bumps.len(), 1);
        assert_eq!(record.bump_for("auth"), Some(BumpType::Major));
    }

    #[test]
    fn projects_preserve_insertion_order() {
        let record = ChangeRecord::new("id", "msg")
            .with_bump("zebra", BumpType::Patch)
            .with_bump("apple", BumpType::Patch);

        let projects: Vec<&str> = record.projects().collect();
        assert_eq!(projects, vec!["zebra", "apple"]);
    }

    #[test]
    fn project_type_display() {
        assert_eq!(ProjectType::Go.to_string(), "Go");
        assert_eq!(ProjectType::Node.to_string(), "Node");
    }
}
