//! Version identifiers and the two sentinels the status pipeline needs.

use std::fmt;

use pep508_rs::pep440_rs::Version;
use tracing::warn;

/// The lowest practical version, used to mean "no version found".
///
/// The packaging repo not carrying a template at all is an expected state
/// ("not yet packaged"), represented by this value rather than an error.
pub fn zero_version() -> Version {
    Version::new([0u64])
}

/// A parsed package version, or the marker for "version is rendered at
/// package build time and cannot be compared statically".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionIdentifier {
    /// Version is computed at build time; exempt from comparison.
    Unset,
    /// A concrete PEP 440 version.
    Version(Version),
}

impl VersionIdentifier {
    /// The zero-version sentinel wrapped as an identifier.
    pub fn zero() -> Self {
        VersionIdentifier::Version(zero_version())
    }

    /// Parse a version string under PEP 440 semantics.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse::<Version>()
            .map(VersionIdentifier::Version)
            .inspect_err(|err| warn!("unparseable version '{raw}': {err}"))
            .ok()
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, VersionIdentifier::Unset)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            VersionIdentifier::Version(version) => *version == zero_version(),
            VersionIdentifier::Unset => false,
        }
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionIdentifier::Unset => write!(f, "version unset"),
            VersionIdentifier::Version(version) => write!(f, "{version}"),
        }
    }
}
