use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::bump::BumpType;
use crate::error::VersionError;

/// A `major.minor.patch[-prerelease]` version.
///
/// Values are never mutated in place: bumping and prerelease changes return a
/// new `Version`. An empty prerelease label denotes a release.
///
/// Ordering compares the numeric triple first. On a tie a release sorts above
/// any prerelease, and two prerelease labels are compared as plain strings,
/// so `rc10` sorts below `rc2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: String,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    /// Parses `1.2.3`, `v1.2.3` or `1.2.3-rc0`. The empty string parses as `0.0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::SegmentCount`] if the core is not exactly three
    /// dot-separated segments, or [`VersionError::InvalidSegment`] if a segment
    /// is not a non-negative integer.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let unprefixed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (core, prerelease) = match unprefixed.split_once('-') {
            Some((core, prerelease)) => (core, prerelease),
            None => (unprefixed, ""),
        };

        let segments: Vec<&str> = core.split('.').collect();
        if segments.len() != 3 {
            return Err(VersionError::SegmentCount {
                input: input.to_string(),
                count: segments.len(),
            });
        }

        let parse_segment = |segment: &str| -> Result<u64, VersionError> {
            let invalid = || VersionError::InvalidSegment {
                input: input.to_string(),
                segment: segment.to_string(),
            };
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            segment.parse().map_err(|_| invalid())
        };

        Ok(Self {
            major: parse_segment(segments[0])?,
            minor: parse_segment(segments[1])?,
            patch: parse_segment(segments[2])?,
            prerelease: prerelease.to_string(),
        })
    }

    #[must_use]
    pub fn major(&self) -> u64 {
        self.major
    }

    #[must_use]
    pub fn minor(&self) -> u64 {
        self.minor
    }

    #[must_use]
    pub fn patch(&self) -> u64 {
        self.patch
    }

    #[must_use]
    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// The version with a leading `v`, e.g. `v1.2.3-rc0`.
    #[must_use]
    pub fn to_tag(&self) -> String {
        format!("v{self}")
    }

    /// Bumping always produces a release version.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] if the bumped segment is already
    /// `u64::MAX`.
    pub fn bump(&self, bump_type: BumpType) -> Result<Self, VersionError> {
        let overflow = || VersionError::Overflow {
            version: self.to_string(),
            bump: bump_type,
        };
        let bumped = match bump_type {
            BumpType::Major => Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpType::Minor => {
                Self::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            BumpType::Patch => Self::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        Ok(bumped)
    }

    #[must_use]
    pub fn with_prerelease(&self, label: impl Into<String>) -> Self {
        Self {
            prerelease: label.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn strip_prerelease(&self) -> Self {
        Self::new(self.major, self.minor, self.patch)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| {
                match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.prerelease.cmp(&other.prerelease),
                }
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
