//! Project records and status classification.

use std::cmp::Ordering;
use std::fmt;

use pep508_rs::pep440_rs::Version;
use tracing::debug;

use crate::version::{VersionIdentifier, zero_version};

/// One row of the status report. Built once per project per run and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    /// Project name, the unique key for the run.
    pub name: String,
    /// Highest version in the upstream release catalog.
    pub release: Version,
    /// Pinned version from the constraints file, when one exists.
    pub upper_constraint: Option<Version>,
    /// Version declared in the packaging template; zero sentinel when the
    /// template is missing or unreadable.
    pub packaging: VersionIdentifier,
    /// Open review numbers touching the project's packaging template.
    pub reviews: Vec<u64>,
    /// Version published by the build service; `None` when no manifest was
    /// supplied for the run.
    pub obs_published: Option<Version>,
}

/// Status label for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Unpackaged,
    NeedsUpgrade,
    NeedsDowngrade,
    /// Packaged version matches the release but the release exceeds the
    /// upper constraint. Historically this label was always overwritten
    /// with `ok` before being reported; [`classify`] keeps that behavior,
    /// so the variant is part of the output vocabulary but never emitted.
    NeedsDowngradeConstraint,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Unpackaged => "unpackaged",
            Status::NeedsUpgrade => "needs upgrade",
            Status::NeedsDowngrade => "needs downgrade",
            Status::NeedsDowngradeConstraint => "needs downgrade (u-c)",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a record's version fields to a status label, first match wins:
///
/// 1. packaging version unset -> `ok`
/// 2. packaging version is the zero sentinel -> `unpackaged`
/// 3. packaging < release -> `needs upgrade`
/// 4. packaging == release -> `ok`
/// 5. packaging > release -> `needs downgrade`
///
/// Rule 4 historically carried a `needs downgrade (u-c)` sub-case that was
/// always overwritten before being returned; the condition is still
/// evaluated and logged so it stays visible, but the emitted label keeps
/// parity with the historical output.
pub fn classify(record: &ProjectRecord) -> Status {
    let packaging = match &record.packaging {
        VersionIdentifier::Unset => return Status::Ok,
        VersionIdentifier::Version(version) => version,
    };
    if *packaging == zero_version() {
        return Status::Unpackaged;
    }
    match packaging.cmp(&record.release) {
        Ordering::Less => Status::NeedsUpgrade,
        Ordering::Equal => {
            if let Some(constraint) = &record.upper_constraint {
                if record.release > *constraint {
                    debug!(
                        project = %record.name,
                        "release {} exceeds upper constraint {}, still reported as ok",
                        record.release,
                        constraint
                    );
                }
            }
            Status::Ok
        }
        Ordering::Greater => Status::NeedsDowngrade,
    }
}
