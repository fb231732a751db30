pub const CHANGELOG_TITLE: &str = "# Changelog";

pub const CHANGELOG_DESCRIPTION: &str =
    "All notable changes to this project will be documented in this file.";

/// Prefix of a version section line, e.g. `## 1.2.0 (2025-01-15)`.
pub const SECTION_PREFIX: &str = "## ";

#[must_use]
pub fn new_changelog() -> String {
    format!("{CHANGELOG_TITLE}\n\n{CHANGELOG_DESCRIPTION}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_changelog_has_title_and_description() {
        let changelog = new_changelog();
        assert!(changelog.starts_with("# Changelog\n"));
        assert!(changelog.contains(CHANGELOG_DESCRIPTION));
        assert!(!changelog.contains(SECTION_PREFIX));
    }
}
