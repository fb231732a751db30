use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use changeset_core::ChangeRecord;

use crate::Result;
use crate::changelog::Changelog;
use crate::entry::{ChangeSection, ChangelogEntry, group_records};
use crate::template::TemplateCache;

#[derive(Serialize)]
struct RenderContext<'a> {
    project: &'a str,
    version: Option<String>,
    date: Option<String>,
    sections: Vec<ChangeSection>,
}

/// Renders change records through the template resolved for a project root.
///
/// Parsed templates live in the renderer's [`TemplateCache`], which can be
/// shared between renderers and cleared explicitly.
#[derive(Debug, Clone, Default)]
pub struct ChangelogRenderer {
    cache: Arc<TemplateCache>,
}

impl ChangelogRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache(cache: Arc<TemplateCache>) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Renders a dated release section headed by `## <version> (<date>)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be resolved or rendered.
    pub fn render_entry(&self, root: &Path, project: &str, entry: &ChangelogEntry) -> Result<String> {
        self.render(
            root,
            RenderContext {
                project,
                version: Some(entry.version.to_string()),
                date: Some(entry.date.to_string()),
                sections: group_records(&entry.records, project),
            },
        )
    }

    /// Renders the pending change sections without a version header.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be resolved or rendered.
    pub fn render_preview(
        &self,
        root: &Path,
        project: &str,
        records: &[ChangeRecord],
    ) -> Result<String> {
        self.render(
            root,
            RenderContext {
                project,
                version: None,
                date: None,
                sections: group_records(records, project),
            },
        )
    }

    /// Renders `entry` and inserts it as the newest section of the changelog
    /// at `changelog_path`, creating the document if needed.
    ///
    /// Appending the same entry twice yields two sections.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the changelog cannot be read or
    /// written.
    pub fn append_entry(
        &self,
        changelog_path: &Path,
        root: &Path,
        project: &str,
        entry: &ChangelogEntry,
    ) -> Result<()> {
        let rendered = self.render_entry(root, project, entry)?;

        let mut changelog = Changelog::from_file_or_empty(changelog_path)?;
        changelog.add_entry(&rendered);
        changelog.write_to_file(changelog_path)?;

        debug!(
            path = %changelog_path.display(),
            project,
            version = %entry.version,
            records = entry.records.len(),
            "appended changelog entry"
        );
        Ok(())
    }

    fn render(&self, root: &Path, context: RenderContext<'_>) -> Result<String> {
        let template = self.cache.resolve(root)?;
        let rendered = template.render(&context)?;
        let mut output = rendered.trim_end().to_string();
        output.push('\n');
        Ok(output)
    }
}
