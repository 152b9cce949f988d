//! Open-review lookup against a Gerrit instance.
//!
//! Queries the open changes on the packaging repo's branch for a release
//! and maps each change to the projects whose packaging template it
//! touches.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// The current in-development release; its packaging work happens on
/// `master` instead of a stable branch.
pub const CURRENT_MASTER: &str = "stein";

/// Default Gerrit instance to query for open packaging reviews.
pub const DEFAULT_GERRIT_HOST: &str = "https://review.openstack.org";

/// Gerrit prefixes JSON responses with `)]}'` to defeat XSSI.
const XSSI_PREFIX: &[char] = &[')', ']', '}', '\'', '\n'];

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Subset of a Gerrit change we care about.
#[derive(Debug, Deserialize)]
struct Change {
    change_id: String,
    #[serde(rename = "_number")]
    number: u64,
}

/// Blocking Gerrit REST client.
pub struct GerritClient {
    client: Client,
    base_url: String,
}

impl GerritClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Map a release name to the Gerrit branch carrying its packaging work.
    pub fn branch_for_release(release: &str) -> String {
        if release == CURRENT_MASTER {
            "master".to_string()
        } else {
            format!("stable/{release}")
        }
    }

    /// Open reviews touching each project's packaging template, keyed by
    /// project name. Any failure degrades to an empty result; the report
    /// simply shows no reviews.
    pub fn open_reviews_per_project(&self, release: &str) -> HashMap<String, Vec<u64>> {
        match self.try_open_reviews(release) {
            Ok(reviews) => reviews,
            Err(err) => {
                warn!("review lookup failed, continuing without reviews: {err}");
                HashMap::new()
            }
        }
    }

    fn try_open_reviews(&self, release: &str) -> Result<HashMap<String, Vec<u64>>, LookupError> {
        let branch = Self::branch_for_release(release);
        let url = format!(
            "{}/changes/?q=status:open+project:openstack/rpm-packaging+branch:{branch}",
            self.base_url
        );
        debug!("fetching open reviews: {url}");
        let changes: Vec<Change> = self.get_json(&url)?;

        let mut reviews: HashMap<String, Vec<u64>> = HashMap::new();
        for change in changes {
            let url = format!(
                "{}/changes/{}/revisions/current/files/",
                self.base_url, change.change_id
            );
            let files: HashMap<String, serde_json::Value> = match self.get_json(&url) {
                Ok(files) => files,
                Err(err) => {
                    warn!("skipping review {}: {err}", change.number);
                    continue;
                }
            };
            for file in files.keys() {
                if let Some(project) = project_from_template_path(file) {
                    reviews
                        .entry(project.to_string())
                        .or_default()
                        .push(change.number);
                }
            }
        }
        Ok(reviews)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(LookupError::InvalidResponse(format!(
                "gerrit returned status {} for {url}",
                response.status()
            )));
        }
        let body = response.text()?;
        serde_json::from_str(body.trim_start_matches(XSSI_PREFIX))
            .map_err(|err| LookupError::InvalidResponse(err.to_string()))
    }
}

/// Extract the project name from a changed-file path when the file is a
/// packaging template (`openstack/<project>/<project>.spec.j2`).
fn project_from_template_path(path: &str) -> Option<&str> {
    if path.starts_with("openstack/") && path.ends_with("spec.j2") {
        path.split('/').nth(1)
    } else {
        None
    }
}
