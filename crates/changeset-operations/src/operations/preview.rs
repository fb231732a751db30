use changeset_changelog::ChangelogRenderer;
use changeset_core::{ChangeRecord, Project, filter_by_project};

use crate::Result;

/// Renders the pending changes of `project` as they would appear in its next
/// changelog section, without the version header. `None` if nothing is
/// pending.
///
/// # Errors
///
/// Returns an error if the changelog template cannot be resolved or rendered.
pub fn preview_changelog(
    renderer: &ChangelogRenderer,
    project: &Project,
    records: &[ChangeRecord],
) -> Result<Option<String>> {
    let relevant: Vec<ChangeRecord> = filter_by_project(records, &project.name)
        .into_iter()
        .cloned()
        .collect();
    if relevant.is_empty() {
        return Ok(None);
    }

    let preview = renderer.render_preview(project.root(), &project.name, &relevant)?;
    Ok(Some(preview))
}
