use changeset_core::Version;
use glob::Pattern;
use tracing::debug;

use crate::error::GitError;
use crate::source::TagSource;
use crate::tag::{tag_pattern, version_from_tag};
use crate::Result;

/// Version-aware queries over the tags of a [`TagSource`].
///
/// Matching and ordering happen here rather than in the source, so a
/// repository and an in-memory listing with the same tags give the same
/// answers.
#[derive(Debug, Clone)]
pub struct TagResolver<S> {
    source: S,
}

impl<S: TagSource> TagResolver<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Tags matching the glob `pattern`, ascending by version. Tags whose
    /// version part does not parse are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the source fails.
    pub fn tags_with_prefix(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = Pattern::new(pattern).map_err(|source| GitError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut versioned: Vec<(Version, String)> = self
            .source
            .tag_names()?
            .into_iter()
            .filter(|tag| matcher.matches(tag))
            .filter_map(|tag| match version_from_tag(&tag) {
                Some(version) => Some((version, tag)),
                None => {
                    debug!(%tag, "skipping tag without a parsable version");
                    None
                }
            })
            .collect();

        versioned.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(versioned.into_iter().map(|(_, tag)| tag).collect())
    }

    /// The highest-versioned release tag of `project`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoTags` if the project has never been tagged.
    pub fn latest_tag(&self, project: &str) -> Result<String> {
        self.tags_with_prefix(&tag_pattern(project))?
            .pop()
            .ok_or_else(|| GitError::NoTags {
                project: project.to_string(),
            })
    }

    /// Version of [`TagResolver::latest_tag`].
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoTags` if the project has never been tagged.
    pub fn latest_version(&self, project: &str) -> Result<Version> {
        let tag = self.latest_tag(project)?;
        version_from_tag(&tag).ok_or(GitError::NoTags {
            project: project.to_string(),
        })
    }
}
