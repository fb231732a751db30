use changeset_version::BumpType;

use crate::types::ChangeRecord;

#[must_use]
pub fn filter_by_project<'a>(records: &'a [ChangeRecord], project: &str) -> Vec<&'a ChangeRecord> {
    records.iter().filter(|r| r.affects(project)).collect()
}

/// Highest bump requested for `project`, defaulting to `Patch` when no record
/// applies. Callers that must tell "no changes" from "patch" check emptiness first.
#[must_use]
pub fn highest_bump<'a, I>(records: I, project: &str) -> BumpType
where
    I: IntoIterator<Item = &'a ChangeRecord>,
{
    let mut highest = BumpType::Patch;
    for bump in records.into_iter().filter_map(|r| r.bump_for(project)) {
        match bump {
            BumpType::Major => return BumpType::Major,
            BumpType::Minor => highest = BumpType::Minor,
            BumpType::Patch => {}
        }
    }
    highest
}
