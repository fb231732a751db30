use thiserror::Error;

use crate::bump::BumpType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version '{input}': segment '{segment}' is not a non-negative integer")]
    InvalidSegment { input: String, segment: String },

    #[error("invalid version '{input}': expected 3 dot-separated segments, found {count}")]
    SegmentCount { input: String, count: usize },

    #[error("invalid bump type '{value}': expected one of patch, minor, major")]
    InvalidBumpType { value: String },

    #[error("cannot apply {bump} bump to '{version}': segment overflow")]
    Overflow { version: String, bump: BumpType },
}
