use changeset_core::Version;

const NAMESPACE_SEPARATOR: char = '@';
const RC_LABEL: &str = "rc";

/// `<project>@v<version>`, e.g. `auth@v1.2.0-rc1`.
#[must_use]
pub fn tag_name(project: &str, version: &Version) -> String {
    format!("{project}{NAMESPACE_SEPARATOR}{}", version.to_tag())
}

/// Glob matching every release tag of `project`.
#[must_use]
pub fn tag_pattern(project: &str) -> String {
    format!("{}{NAMESPACE_SEPARATOR}v*", glob::Pattern::escape(project))
}

/// Glob matching the `<label>N` candidates of `version` for `project`.
#[must_use]
pub fn prerelease_pattern(project: &str, version: &Version, label: &str) -> String {
    format!(
        "{}{NAMESPACE_SEPARATOR}{}-{}*",
        glob::Pattern::escape(project),
        version.strip_prerelease().to_tag(),
        glob::Pattern::escape(label)
    )
}

/// The version part of a tag: everything after the last `@`, or the whole
/// tag if it has no namespace.
#[must_use]
pub fn version_from_tag(tag: &str) -> Option<Version> {
    let raw = tag
        .rsplit_once(NAMESPACE_SEPARATOR)
        .map_or(tag, |(_, version)| version);
    Version::parse(raw).ok()
}

/// The `N` of a tag ending in `-rcN`. Anything else yields `None`.
#[must_use]
pub fn extract_rc_number(tag: &str) -> Option<u64> {
    extract_prerelease_number(tag, RC_LABEL)
}

/// The `N` of a tag ending in `-<label>N`.
#[must_use]
pub fn extract_prerelease_number(tag: &str, label: &str) -> Option<u64> {
    let marker = format!("-{label}");
    let (_, digits) = tag.rsplit_once(marker.as_str())?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
