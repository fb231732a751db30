use std::io::ErrorKind;
use std::path::Path;

use changeset_core::Version;

use crate::error::ChangelogError;
use crate::format::{CHANGELOG_TITLE, SECTION_PREFIX, new_changelog};

/// A changelog document with newest-first `## <version>` sections.
#[derive(Debug, Clone)]
pub struct Changelog {
    content: String,
}

impl Default for Changelog {
    fn default() -> Self {
        Self::new()
    }
}

impl Changelog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: new_changelog(),
        }
    }

    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    /// Like [`Changelog::from_file`], but a missing file yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file exists but cannot be read.
    pub fn from_file_or_empty(path: &Path) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self { content }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::from_content("")),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.content
            .lines()
            .any(|line| line.trim_end() == CHANGELOG_TITLE)
    }

    /// Inserts a rendered section as the newest entry.
    ///
    /// Everything before the first `## ` line is kept as the header and older
    /// sections follow the new one unchanged. A document without the
    /// `# Changelog` title gets the standard header, with any prior content
    /// kept after the new section.
    pub fn add_entry(&mut self, rendered: &str) {
        let entry = rendered.trim_end();

        let synthesized;
        let (header, rest) = if self.has_header() {
            match first_section_offset(&self.content) {
                Some(offset) => self.content.split_at(offset),
                None => (self.content.as_str(), ""),
            }
        } else {
            synthesized = new_changelog();
            (synthesized.as_str(), self.content.as_str())
        };

        let mut new_content = String::with_capacity(header.len() + entry.len() + rest.len() + 4);
        new_content.push_str(header);
        if !ends_with_blank_line(header) {
            if !header.ends_with('\n') {
                new_content.push('\n');
            }
            new_content.push('\n');
        }
        new_content.push_str(entry);
        new_content.push('\n');

        let rest = rest.trim_start_matches(['\n', '\r']);
        if !rest.is_empty() {
            new_content.push('\n');
            new_content.push_str(rest);
            if !rest.ends_with('\n') {
                new_content.push('\n');
            }
        }

        self.content = new_content;
    }

    /// Returns the section for `version`, from its `## <version>` line up to
    /// the next section or the end of the document.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::SectionNotFound` if no section matches.
    pub fn section(&self, version: &Version) -> Result<&str, ChangelogError> {
        let marker = format!("{SECTION_PREFIX}{version}");

        let mut start = None;
        let mut offset = 0;
        for line in self.content.split_inclusive('\n') {
            match start {
                None => {
                    if let Some(tail) = line.trim_end().strip_prefix(&marker) {
                        if tail.is_empty() || tail.starts_with(' ') {
                            start = Some(offset);
                        }
                    }
                }
                Some(begin) => {
                    if line.starts_with(SECTION_PREFIX) {
                        return Ok(&self.content[begin..offset]);
                    }
                }
            }
            offset += line.len();
        }

        start
            .map(|begin| &self.content[begin..])
            .ok_or_else(|| ChangelogError::SectionNotFound {
                version: version.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn ends_with_blank_line(text: &str) -> bool {
    text.strip_suffix('\n')
        .and_then(|body| body.rsplit('\n').next())
        .is_some_and(|line| line.trim().is_empty())
}

fn first_section_offset(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(SECTION_PREFIX) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(version: &str, body: &str) -> String {
        format!("## {version} (2025-01-01)\n\n### Patch Changes\n\n- {body}\n")
    }

    fn v(s: &str) -> Version {
        Version::parse(s).expect("valid version")
    }

    #[test]
    fn new_changelog_has_header() {
        let changelog = Changelog::new();
        assert!(changelog.has_header());
        assert!(changelog.content().contains("All notable changes"));
    }

    #[test]
    fn empty_document_gets_synthesized_header() {
        let mut changelog = Changelog::from_content("");
        changelog.add_entry(&section("1.0.0", "First"));

        assert_eq!(
            changelog.content(),
            "# Changelog\n\n\
             All notable changes to this project will be documented in this file.\n\
             \n\
             ## 1.0.0 (2025-01-01)\n\n### Patch Changes\n\n- First\n"
        );
    }

    #[test]
    fn appends_newest_first_without_duplicating_header() {
        let mut changelog = Changelog::from_content("");
        changelog.add_entry(&section("1.0.0", "First"));
        changelog.add_entry(&section("1.1.0", "Second"));

        let content = changelog.content();
        assert_eq!(content.matches("# Changelog").count(), 1);
        let newer = content.find("## 1.1.0").expect("1.1.0 exists");
        let older = content.find("## 1.0.0").expect("1.0.0 exists");
        assert!(newer < older);
    }

    #[test]
    fn custom_header_lines_are_preserved() {
        let original = format!(
            "# Changelog\n\nHand-written intro.\nSee docs/releasing.md.\n\n{}",
            section("0.1.0", "Old")
        );
        let mut changelog = Changelog::from_content(original);

        changelog.add_entry(&section("0.2.0", "New"));

        assert_eq!(
            changelog.content(),
            format!(
                "# Changelog\n\nHand-written intro.\nSee docs/releasing.md.\n\n{}\n{}",
                section("0.2.0", "New"),
                section("0.1.0", "Old")
            )
        );
    }

    #[test]
    fn trailing_blank_lines_of_header_are_kept() {
        let original = format!(
            "# Changelog\n\nHand-written intro.\n\n\n{}",
            section("0.1.0", "Old")
        );
        let mut changelog = Changelog::from_content(original);

        changelog.add_entry(&section("0.2.0", "New"));

        assert_eq!(
            changelog.content(),
            format!(
                "# Changelog\n\nHand-written intro.\n\n\n{}\n{}",
                section("0.2.0", "New"),
                section("0.1.0", "Old")
            )
        );
    }

    #[test]
    fn header_without_trailing_newline_gets_separator() {
        let mut changelog = Changelog::from_content("# Changelog");
        changelog.add_entry(&section("0.1.0", "First"));

        assert_eq!(
            changelog.content(),
            format!("# Changelog\n\n{}", section("0.1.0", "First"))
        );
    }

    #[test]
    fn header_without_sections_gets_first_entry() {
        let mut changelog = Changelog::new();
        changelog.add_entry(&section("0.1.0", "First"));

        assert!(changelog.content().starts_with("# Changelog\n"));
        assert!(changelog.content().ends_with(&section("0.1.0", "First")));
    }

    #[test]
    fn document_without_title_keeps_prior_content_below() {
        let mut changelog = Changelog::from_content("Some stray notes\n");
        changelog.add_entry(&section("1.0.0", "First"));

        let content = changelog.content();
        assert!(content.starts_with("# Changelog\n"));
        assert!(content.find("## 1.0.0").expect("entry") < content.find("Some stray notes").expect("notes"));
    }

    #[test]
    fn same_entry_twice_stacks_two_sections() {
        let mut changelog = Changelog::new();
        changelog.add_entry(&section("1.0.0", "Same"));
        changelog.add_entry(&section("1.0.0", "Same"));

        assert_eq!(changelog.content().matches("## 1.0.0").count(), 2);
    }

    #[test]
    fn section_lookup_spans_to_next_section() {
        let mut changelog = Changelog::new();
        changelog.add_entry(&section("1.0.0", "First"));
        changelog.add_entry(&section("1.1.0", "Second"));

        let found = changelog.section(&v("1.1.0")).expect("section exists");
        assert_eq!(found, format!("{}\n", section("1.1.0", "Second")));
    }

    #[test]
    fn section_lookup_of_oldest_runs_to_end() {
        let mut changelog = Changelog::new();
        changelog.add_entry(&section("1.0.0", "First"));
        changelog.add_entry(&section("1.1.0", "Second"));

        let found = changelog.section(&v("1.0.0")).expect("section exists");
        assert_eq!(found, section("1.0.0", "First"));
    }

    #[test]
    fn section_lookup_does_not_match_prerelease_prefix() {
        let mut changelog = Changelog::new();
        changelog.add_entry(&section("1.0.0-rc1", "Candidate"));

        let err = changelog.section(&v("1.0.0")).expect_err("should not match");
        assert!(matches!(err, ChangelogError::SectionNotFound { .. }));
        assert!(changelog.section(&v("1.0.0-rc1")).is_ok());
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let file_path = temp_dir.path().join("nonexistent.md");

        let result = Changelog::from_file(&file_path);
        assert!(matches!(result, Err(ChangelogError::Read { .. })));

        let empty = Changelog::from_file_or_empty(&file_path).expect("missing is empty");
        assert!(empty.content().is_empty());
    }

    #[test]
    fn write_then_read_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let file_path = temp_dir.path().join("CHANGELOG.md");

        let changelog = Changelog::new();
        changelog.write_to_file(&file_path).expect("write file");

        let read = Changelog::from_file(&file_path).expect("read file");
        assert_eq!(read.content(), changelog.content());
    }
}
