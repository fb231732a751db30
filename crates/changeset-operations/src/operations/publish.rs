use changeset_core::{Project, Version};
use changeset_git::{GitError, TagResolver, TagSource};
use tracing::info;

use crate::Result;
use crate::traits::VersionStoreProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishReason {
    /// The project has no release tag yet.
    Untagged,
    /// The persisted version is above the latest tag.
    NewerThan(Version),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishDecision {
    Publish { reason: PublishReason },
    Skip { latest: Version },
}

impl PublishDecision {
    #[must_use]
    pub fn should_publish(&self) -> bool {
        matches!(self, Self::Publish { .. })
    }
}

/// Decides whether the persisted version of `project` still needs a release.
///
/// Publishes when the project was never tagged or its persisted version is
/// strictly greater than the latest tag. Re-running with an unchanged version
/// after tagging skips.
///
/// # Errors
///
/// Returns an error if the persisted version cannot be read or the tags
/// cannot be listed.
pub fn publish_decision<S, T>(
    project: &Project,
    stores: &S,
    resolver: &TagResolver<T>,
) -> Result<PublishDecision>
where
    S: VersionStoreProvider + ?Sized,
    T: TagSource,
{
    let current = stores.store_for(project).read()?;

    let decision = match resolver.latest_version(&project.name) {
        Ok(latest) if current > latest => PublishDecision::Publish {
            reason: PublishReason::NewerThan(latest),
        },
        Ok(latest) => PublishDecision::Skip { latest },
        Err(GitError::NoTags { .. }) => PublishDecision::Publish {
            reason: PublishReason::Untagged,
        },
        Err(e) => return Err(e.into()),
    };

    info!(
        project = %project.name,
        %current,
        ?decision,
        "publish decision"
    );
    Ok(decision)
}
