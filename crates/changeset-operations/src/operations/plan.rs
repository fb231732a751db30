use changeset_core::{BumpType, ChangeRecord, Project, Version, filter_by_project, highest_bump};
use tracing::debug;

use crate::Result;
use crate::traits::VersionStoreProvider;

/// The next release of one project and the records that justify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub project: Project,
    pub current: Version,
    pub next: Version,
    pub bump: BumpType,
    pub records: Vec<ChangeRecord>,
}

/// Plans a release for every project with at least one relevant record.
///
/// Projects whose version store is disabled are left out.
///
/// # Errors
///
/// Returns an error if a project's current version cannot be read.
pub fn plan_releases<S>(
    projects: &[Project],
    records: &[ChangeRecord],
    stores: &S,
) -> Result<Vec<ReleasePlan>>
where
    S: VersionStoreProvider + ?Sized,
{
    let mut plans = Vec::new();

    for project in projects {
        let relevant = filter_by_project(records, &project.name);
        if relevant.is_empty() {
            continue;
        }

        let store = stores.store_for(project);
        if !store.is_enabled()? {
            debug!(
                project = %project.name,
                path = %store.path().display(),
                "versioning disabled, skipping project"
            );
            continue;
        }

        let current = store.read()?;
        let bump = highest_bump(relevant.iter().copied(), &project.name);
        let next = current.bump(bump)?;

        debug!(
            project = %project.name,
            %current,
            %next,
            %bump,
            records = relevant.len(),
            "planned release"
        );

        plans.push(ReleasePlan {
            project: project.clone(),
            current,
            next,
            bump,
            records: relevant.into_iter().cloned().collect(),
        });
    }

    Ok(plans)
}
