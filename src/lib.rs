//! Cross-reference rpm packaging versions with upstream releases.
//!
//! One run walks three local git checkouts (release catalog, packaging
//! repo, requirements repo), optionally consults a build-service
//! publication manifest and a Gerrit instance, and renders a per-project
//! status table.
//!
//! # Modules
//!
//! - [`extract`]: parsers for the three on-disk source formats
//! - [`lookup`]: Gerrit review and build-service publication lookups
//! - [`status`]: project records and status classification
//! - [`report`]: table assembly and text/HTML rendering
//! - [`run`]: pipeline orchestration
//! - [`version`]: version identifiers and sentinels

pub mod extract;
pub mod lookup;
pub mod report;
pub mod run;
pub mod status;
pub mod version;
