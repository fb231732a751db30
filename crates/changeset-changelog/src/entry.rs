use chrono::NaiveDate;
use serde::Serialize;

use changeset_core::{BumpType, ChangeRecord, PullRequest, Version};

const BUCKET_ORDER: [BumpType; 3] = [BumpType::Major, BumpType::Minor, BumpType::Patch];

/// One release worth of records for a single project. Only its rendered text
/// is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: Version,
    pub date: NaiveDate,
    pub records: Vec<ChangeRecord>,
}

impl ChangelogEntry {
    #[must_use]
    pub fn new(version: Version, date: NaiveDate, records: Vec<ChangeRecord>) -> Self {
        Self {
            version,
            date,
            records,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeItem {
    pub headline: String,
    pub continuation_lines: Vec<String>,
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSection {
    pub title: String,
    #[serde(skip)]
    pub bump: BumpType,
    pub items: Vec<ChangeItem>,
}

/// Splits a message into its first non-blank line and the remaining
/// non-blank lines. Blank lines are dropped.
#[must_use]
pub fn split_message(message: &str) -> (String, Vec<String>) {
    let mut lines = message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let headline = lines.next().unwrap_or_default().to_string();
    let continuation = lines.map(str::to_string).collect();
    (headline, continuation)
}

fn section_title(bump: BumpType) -> &'static str {
    match bump {
        BumpType::Major => "Major Changes",
        BumpType::Minor => "Minor Changes",
        BumpType::Patch => "Patch Changes",
    }
}

/// Buckets the records relevant to `project` into major, minor and patch
/// sections, in that order. Empty sections are left out; records keep their
/// input order within a section.
#[must_use]
pub fn group_records(records: &[ChangeRecord], project: &str) -> Vec<ChangeSection> {
    BUCKET_ORDER
        .into_iter()
        .filter_map(|bump| {
            let items: Vec<ChangeItem> = records
                .iter()
                .filter(|record| record.bump_for(project) == Some(bump))
                .map(|record| {
                    let (headline, continuation_lines) = split_message(&record.message);
                    ChangeItem {
                        headline,
                        continuation_lines,
                        pull_request: record.pull_request.clone(),
                    }
                })
                .collect();

            (!items.is_empty()).then(|| ChangeSection {
                title: section_title(bump).to_string(),
                bump,
                items,
            })
        })
        .collect()
}
