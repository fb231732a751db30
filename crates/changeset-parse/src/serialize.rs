use indexmap::IndexMap;

use changeset_core::{BumpType, ChangeRecord};

use crate::error::{FormatError, ValidationError};
use crate::parse::FRONT_MATTER_DELIMITER;

/// Renders a record as front matter (`project: bump` per line), a blank line
/// and the message.
///
/// # Errors
///
/// Returns `FormatError` if the record targets no project or the front matter
/// cannot be serialized.
#[must_use = "serialization result should be handled"]
pub fn serialize_change_record(record: &ChangeRecord) -> Result<String, FormatError> {
    if record.project_bumps.is_empty() {
        return Err(ValidationError::NoProjects.into());
    }

    let front_matter: IndexMap<&str, BumpType> = record
        .project_bumps
        .iter()
        .map(|(name, bump)| (name.as_str(), *bump))
        .collect();

    let yaml = serde_yml::to_string(&front_matter)?;

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    if !yaml.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    let message = record.message.trim();
    if !message.is_empty() {
        output.push('\n');
        output.push_str(message);
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_change_record;

    #[test]
    fn writes_one_line_per_project() {
        let record = ChangeRecord::new("id", "Add SSO support")
            .with_bump("auth", BumpType::Minor)
            .with_bump("web", BumpType::Patch);

        let serialized = serialize_change_record(&record).expect("should serialize");
        assert_eq!(
            serialized,
            "---\nauth: minor\nweb: patch\n---\n\nAdd SSO support\n"
        );
    }

    #[test]
    fn roundtrip_preserves_order_and_message() {
        let original = ChangeRecord::new("calm-heron-k2p9", "First line\n\n  detail line")
            .with_bump("zebra", BumpType::Major)
            .with_bump("apple", BumpType::Minor)
            .with_bump("banana", BumpType::Patch);

        let serialized = serialize_change_record(&original).expect("should serialize");
        let parsed = parse_change_record(&original.id, &serialized).expect("should parse");

        assert_eq!(parsed, original);
    }

    #[test]
    fn empty_message_omits_body() {
        let record = ChangeRecord::new("id", "   ").with_bump("auth", BumpType::Patch);

        let serialized = serialize_change_record(&record).expect("should serialize");
        assert_eq!(serialized, "---\nauth: patch\n---\n");
    }

    #[test]
    fn error_no_projects() {
        let record = ChangeRecord::new("id", "Orphan change");

        let err = serialize_change_record(&record).expect_err("should fail");
        assert!(err.to_string().contains("at least one project"));
    }
}
