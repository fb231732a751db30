use changeset_core::Version;
use changeset_git::{TagResolver, TagSource, extract_prerelease_number, prerelease_pattern};
use tracing::debug;

use crate::Result;

/// The next candidate of `next` for `project`: one past the highest existing
/// `<project>@v<next>-<label>N` tag, or `<label>0` if there is none.
///
/// # Errors
///
/// Returns an error if the tags cannot be listed.
pub fn next_prerelease<T: TagSource>(
    resolver: &TagResolver<T>,
    project: &str,
    next: &Version,
    label: &str,
) -> Result<Version> {
    let highest = resolver
        .tags_with_prefix(&prerelease_pattern(project, next, label))?
        .iter()
        .filter_map(|tag| extract_prerelease_number(tag, label))
        .max();

    let number = highest.map_or(0, |n| n + 1);
    let candidate = next.with_prerelease(format!("{label}{number}"));

    debug!(project, %candidate, previous = ?highest, "selected prerelease candidate");
    Ok(candidate)
}
