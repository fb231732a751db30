use std::collections::HashSet;

use changeset_changelog::{ChangelogEntry, ChangelogRenderer};
use changeset_core::{ChangeRecord, Project};
use changeset_project::ReleaseConfig;
use chrono::{Local, NaiveDate};
use tracing::debug;

use super::plan::{ReleasePlan, plan_releases};
use crate::Result;
use crate::traits::{ChangesetReader, ChangesetWriter, VersionStoreProvider};

/// What a versioning run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionOutcome {
    pub releases: Vec<ReleasePlan>,
    /// Ids of consumed records whose files were removed.
    pub deleted: Vec<String>,
    /// Ids of records that also target projects outside this run. They were
    /// rewritten without the projects versioned here.
    pub trimmed: Vec<String>,
    /// Ids of consumed records left untouched because records are kept.
    pub retained: Vec<String>,
}

/// Applies pending change records: bumps versions, appends changelog entries
/// and removes each versioned project from the records that requested it.
/// A record is deleted once no project is left in it.
pub struct VersionOperation<C, S> {
    changesets: C,
    stores: S,
    renderer: ChangelogRenderer,
    config: ReleaseConfig,
}

impl<C, S> VersionOperation<C, S>
where
    C: ChangesetReader + ChangesetWriter,
    S: VersionStoreProvider,
{
    pub fn new(changesets: C, stores: S, config: ReleaseConfig) -> Self {
        Self {
            changesets,
            stores,
            renderer: ChangelogRenderer::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: ChangelogRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn renderer(&self) -> &ChangelogRenderer {
        &self.renderer
    }

    /// Plans releases for `projects` from the stored change records without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the records or current versions cannot be read.
    pub fn plan(&self, projects: &[Project]) -> Result<Vec<ReleasePlan>> {
        let records = self.changesets.read_all()?;
        plan_releases(projects, &records, &self.stores)
    }

    /// Versions every project with pending changes, dating changelog entries
    /// today.
    ///
    /// # Errors
    ///
    /// Returns an error if any version, changelog or record file operation
    /// fails. Work done before the failure is not rolled back.
    pub fn version_projects(&self, projects: &[Project]) -> Result<VersionOutcome> {
        self.version_projects_on(projects, Local::now().date_naive())
    }

    /// [`VersionOperation::version_projects`] with an explicit entry date.
    ///
    /// # Errors
    ///
    /// Returns an error if any version, changelog or record file operation
    /// fails.
    pub fn version_projects_on(
        &self,
        projects: &[Project],
        date: NaiveDate,
    ) -> Result<VersionOutcome> {
        let records = self.changesets.read_all()?;
        let releases = plan_releases(projects, &records, &self.stores)?;

        for release in &releases {
            self.apply(release, date)?;
        }

        let versioned: HashSet<&str> = releases
            .iter()
            .map(|release| release.project.name.as_str())
            .collect();
        let consumed = self.consume(&records, &versioned)?;

        Ok(VersionOutcome {
            releases,
            deleted: consumed.deleted,
            trimmed: consumed.trimmed,
            retained: consumed.retained,
        })
    }

    fn apply(&self, release: &ReleasePlan, date: NaiveDate) -> Result<()> {
        let project = &release.project;

        let store = self.stores.store_for(project);
        store.write(&release.next)?;
        debug!(
            project = %project.name,
            path = %store.path().display(),
            from = %release.current,
            to = %release.next,
            "wrote version"
        );

        let entry = ChangelogEntry::new(release.next.clone(), date, release.records.clone());
        self.renderer.append_entry(
            &self.config.changelog_path(project.root()),
            project.root(),
            &project.name,
            &entry,
        )?;
        Ok(())
    }

    fn consume(&self, records: &[ChangeRecord], versioned: &HashSet<&str>) -> Result<Consumed> {
        let mut consumed = Consumed::default();

        for record in records {
            if !record.projects().any(|name| versioned.contains(name)) {
                continue;
            }

            if self.config.keep_changesets() {
                debug!(id = %record.id, "keeping consumed change record");
                consumed.retained.push(record.id.clone());
                continue;
            }

            let mut remaining = record.clone();
            remaining
                .project_bumps
                .retain(|name, _| !versioned.contains(name.as_str()));

            if remaining.project_bumps.is_empty() {
                self.changesets.delete(record)?;
                consumed.deleted.push(record.id.clone());
            } else {
                self.changesets.write(&remaining)?;
                debug!(
                    id = %record.id,
                    left = remaining.project_bumps.len(),
                    "removed versioned projects from change record"
                );
                consumed.trimmed.push(record.id.clone());
            }
        }

        Ok(consumed)
    }
}

#[derive(Default)]
struct Consumed {
    deleted: Vec<String>,
    trimmed: Vec<String>,
    retained: Vec<String>,
}
