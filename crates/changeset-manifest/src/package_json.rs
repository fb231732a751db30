use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use changeset_core::Version;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::Result;
use crate::error::ManifestError;
use crate::store::VersionStore;

const VERSION_KEY: &str = "\"version\"";

static VERSION_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\A("version"\s*:\s*)(?:"(?:[^"\\]|\\.)*"|null)"#).expect("valid pattern")
});

/// The `version` field of a `package.json`.
///
/// Writes touch only the field's value so the rest of the manifest keeps its
/// formatting and key order.
#[derive(Debug, Clone)]
pub struct PackageJsonStore {
    path: PathBuf,
}

impl PackageJsonStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_content(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| ManifestError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn parse_object(&self, content: &str) -> Result<Map<String, Value>> {
        let document: Value =
            serde_json::from_str(content).map_err(|source| ManifestError::Json {
                path: self.path.clone(),
                source,
            })?;

        match document {
            Value::Object(object) => Ok(object),
            _ => Err(ManifestError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }
}

impl VersionStore for PackageJsonStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Version> {
        let content = self.read_content()?;
        let object = self.parse_object(&content)?;

        match object.get("version") {
            None | Some(Value::Null) => Ok(Version::default()),
            Some(Value::String(raw)) => {
                Version::parse(raw).map_err(|source| ManifestError::InvalidVersion {
                    path: self.path.clone(),
                    version: raw.clone(),
                    source,
                })
            }
            Some(_) => Err(ManifestError::VersionNotString {
                path: self.path.clone(),
            }),
        }
    }

    fn write(&self, version: &Version) -> Result<()> {
        let content = self.read_content()?;
        let object = self.parse_object(&content)?;
        if matches!(object.get("version"), Some(value) if !value.is_string() && !value.is_null()) {
            return Err(ManifestError::VersionNotString {
                path: self.path.clone(),
            });
        }

        let updated =
            replace_version_field(&content, version).ok_or_else(|| ManifestError::NotAnObject {
                path: self.path.clone(),
            })?;

        std::fs::write(&self.path, updated).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), %version, "wrote manifest version");
        Ok(())
    }

    fn is_enabled(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Rewrites the value of the top-level `"version"` key in `content`. Keys of
/// the same name inside nested objects are left alone.
///
/// When the top-level key is absent it is inserted right after the opening
/// brace, using the indentation of the following line. Returns `None` if the
/// content has no opening brace or the existing value is neither a string nor
/// `null`.
#[must_use]
pub fn replace_version_field(content: &str, version: &Version) -> Option<String> {
    if let Some(offset) = top_level_version_key(content) {
        let (before, field) = content.split_at(offset);
        let caps = VERSION_VALUE.captures(field)?;
        let matched = caps.get(0)?;
        return Some(format!(
            "{before}{}\"{version}\"{}",
            &caps[1],
            &field[matched.end()..]
        ));
    }

    let brace = content.find('{')?;
    let (head, rest) = content.split_at(brace + 1);
    let field = format!("{VERSION_KEY}: \"{version}\"");

    let eol = if rest.starts_with("\r\n") { "\r\n" } else { "\n" };
    let after_newline = rest.strip_prefix(eol);

    let inserted = if rest.trim_start().starts_with('}') {
        format!("{head}{eol}  {field}{eol}{}", rest.trim_start())
    } else if let Some(after) = after_newline {
        let indent: String = after
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        format!("{head}{eol}{indent}{field},{rest}")
    } else {
        format!("{head}{field}, {}", rest.trim_start())
    };

    Some(inserted)
}

/// Byte offset of the `"version"` key of the outermost object. String
/// contents and nested containers are skipped.
fn top_level_version_key(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let close = closing_quote(bytes, i)?;
                let is_key = content[close + 1..].trim_start().starts_with(':');
                if depth == 1 && is_key && &content[i..=close] == VERSION_KEY {
                    return Some(i);
                }
                i = close + 1;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    None
}

fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}
