//! Release catalog ("deliverables") extractor.
//!
//! Each project has one YAML file listing its release entries. Only the
//! entry with the highest version matters for the status report.

use pep508_rs::pep440_rs::Version;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct Deliverable {
    /// Some deliverable files carry no releases at all; those projects are
    /// skipped for the run.
    #[serde(default)]
    releases: Option<Vec<ReleaseEntry>>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    /// Usually a string, but bare numeric scalars show up in the wild.
    version: serde_norway::Value,
    #[serde(default)]
    projects: Vec<ReleaseProject>,
}

#[derive(Debug, Deserialize)]
struct ReleaseProject {
    #[serde(rename = "tarball-base")]
    tarball_base: Option<String>,
}

/// The winning release entry of a deliverable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighestRelease {
    pub version: Version,
    /// Packaging name override from the release entry, when present.
    pub tarball_base: Option<String>,
}

/// Parse a deliverable blob and select the entry with the highest version
/// under the PEP 440 total order. Returns `None` when the file has no
/// usable `releases` list, which callers treat as "skip this project".
pub fn highest_release(project: &str, content: &str) -> Option<HighestRelease> {
    let deliverable: Deliverable = match serde_norway::from_str(content) {
        Ok(deliverable) => deliverable,
        Err(err) => {
            warn!("skipping {project}: unparseable deliverable: {err}");
            return None;
        }
    };
    let releases = deliverable.releases?;

    let mut best: Option<(Version, &ReleaseEntry)> = None;
    for entry in &releases {
        let Some(raw) = scalar_version(&entry.version) else {
            warn!("{project}: release entry without a scalar version");
            continue;
        };
        let Ok(version) = raw.parse::<Version>().inspect_err(|err| {
            warn!("{project}: ignoring release version '{raw}': {err}");
        }) else {
            continue;
        };
        if best.as_ref().is_none_or(|(top, _)| version > *top) {
            best = Some((version, entry));
        }
    }

    let Some((version, entry)) = best else {
        warn!("skipping {project}: no parseable release version");
        return None;
    };
    Some(HighestRelease {
        version,
        tarball_base: entry
            .projects
            .first()
            .and_then(|p| p.tarball_base.clone()),
    })
}

fn scalar_version(value: &serde_norway::Value) -> Option<String> {
    match value {
        serde_norway::Value::String(s) => Some(s.clone()),
        serde_norway::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
