//! Extractors for the three on-disk source formats.
//! - `deliverable`: release catalog YAML, one file per project
//! - `template`: packaging spec templates (`*.spec.j2`)
//! - `constraints`: requirements-style `upper-constraints.txt`

pub mod constraints;
pub mod deliverable;
pub mod template;

pub use constraints::parse_upper_constraints;
pub use deliverable::{HighestRelease, highest_release};
pub use template::TemplateScanner;
