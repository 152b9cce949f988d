//! Lookups enriching the core report: open Gerrit reviews and
//! build-service publication state. Both are best effort; failures degrade
//! to empty results instead of aborting the run.

pub mod gerrit;
pub mod obs;

pub use gerrit::GerritClient;
pub use obs::{PublishedManifest, module2package, split_rpm_filename};
