use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, ChangeRecord};

use crate::error::{FormatError, FrontMatterError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct ProjectBumps {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    bumps: IndexMap<String, String>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(FrontMatterError::MissingOpeningDelimiter.into());
    }

    let after_opening = strip_line_ending(&trimmed[FRONT_MATTER_DELIMITER.len()..]);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FrontMatterError::MissingClosingDelimiter.into());
    };

    let yaml_content = after_opening[..closing_pos].trim_end_matches('\r');
    let body = strip_line_ending(&after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..]);

    Ok((yaml_content, body))
}

/// Parses a change record file. `id` is the file name without extension.
///
/// # Errors
///
/// Returns `FormatError` if the front matter is missing or malformed, if a
/// bump type is not `patch`, `minor` or `major`, or if no project is listed.
#[must_use = "parsing result should be handled"]
pub fn parse_change_record(id: &str, content: &str) -> Result<ChangeRecord, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml_content, body) = extract_front_matter(content)?;

    if yaml_content.trim().is_empty() {
        return Err(ValidationError::NoProjects.into());
    }

    let parsed: ProjectBumps = serde_yml::from_str(yaml_content)?;
    if parsed.bumps.is_empty() {
        return Err(ValidationError::NoProjects.into());
    }

    let mut record = ChangeRecord::new(id, body.trim());
    for (project, raw) in parsed.bumps {
        let bump: BumpType = raw
            .parse()
            .map_err(|source| ValidationError::InvalidBumpType {
                project: project.clone(),
                source,
            })?;
        record.project_bumps.insert(project, bump);
    }

    Ok(record)
}
