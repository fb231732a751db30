use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Severity of a change. Ordered `Patch < Minor < Major`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(VersionError::InvalidBumpType {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_type_ordering_patch_is_smallest() {
        assert!(BumpType::Patch < BumpType::Minor);
        assert!(BumpType::Patch < BumpType::Major);
    }

    #[test]
    fn bump_type_ordering_major_is_largest() {
        assert!(BumpType::Major > BumpType::Patch);
        assert!(BumpType::Major > BumpType::Minor);
    }

    #[test]
    fn bump_type_max_returns_largest() {
        let bumps = [BumpType::Patch, BumpType::Minor, BumpType::Major];
        assert_eq!(bumps.iter().max(), Some(&BumpType::Major));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Minor".parse::<BumpType>(), Ok(BumpType::Minor));
        assert_eq!(" MAJOR ".parse::<BumpType>(), Ok(BumpType::Major));
        assert_eq!("patch".parse::<BumpType>(), Ok(BumpType::Patch));
    }

    #[test]
    fn rejects_unknown_bump_type() {
        let err = "huge".parse::<BumpType>().expect_err("should fail");
        assert!(err.to_string().contains("invalid bump type"));
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn display_matches_serde_form() {
        for bump in [BumpType::Patch, BumpType::Minor, BumpType::Major] {
            let json = serde_json::to_string(&bump).expect("serialize");
            assert_eq!(json, format!("\"{bump}\""));
        }
    }
}
