//! Packaging template (`*.spec.j2`) version extractor.
//!
//! Templates declare their version either through a rendered
//! `upstream_version` assignment or a plain `Version:` field. A template
//! may also defer the version to build time via a macro placeholder.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::error;

use crate::version::VersionIdentifier;

/// Placeholder emitted when the version is rendered at package build time.
const VERSION_PLACEHOLDER: &str = "{{ py2rpmversion() }}";

/// Line scanner for spec.j2 templates with precompiled patterns.
pub struct TemplateScanner {
    /// `{% set upstream_version = '1.2.3' %}`, also the
    /// `upstream_version('1.2.3')` call form.
    upstream_re: Regex,
    /// `Version: 1.2.3`
    version_re: Regex,
}

impl TemplateScanner {
    pub fn new() -> Self {
        Self {
            upstream_re: Regex::new(
                r"\{%\s*set upstream_version\s*=\s*(?:upstream_version\()?'(?P<version>[^']*)'\)?\s*%\}$",
            )
            .unwrap(),
            version_re: Regex::new(r"^Version:\s*(?P<version>.*?)\s*$").unwrap(),
        }
    }

    /// Scan template content for the declared version. Lines are checked in
    /// order and the first match wins, with the `upstream_version` pattern
    /// tried before the `Version:` field on every line. `None` when no line
    /// matches at all.
    pub fn scan(&self, content: &str) -> Option<VersionIdentifier> {
        for line in content.lines() {
            if let Some(caps) = self.upstream_re.captures(line) {
                return Some(parse_or_zero(&caps["version"]));
            }
            if let Some(caps) = self.version_re.captures(line) {
                let value = &caps["version"];
                if value == VERSION_PLACEHOLDER {
                    return Some(VersionIdentifier::Unset);
                }
                return Some(parse_or_zero(value));
            }
        }
        None
    }

    /// Extract the declared version from a template file.
    ///
    /// A missing file is the expected "not yet packaged" state and maps to
    /// the zero sentinel without any noise; a file with no recognizable
    /// version line is diagnosed on stderr and also maps to zero.
    pub fn version_from_file(&self, path: &Path) -> VersionIdentifier {
        let Ok(content) = fs::read_to_string(path) else {
            return VersionIdentifier::zero();
        };
        match self.scan(&content) {
            Some(version) => version,
            None => {
                error!("no version in {} found", path.display());
                VersionIdentifier::zero()
            }
        }
    }
}

impl Default for TemplateScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or_zero(raw: &str) -> VersionIdentifier {
    VersionIdentifier::parse(raw).unwrap_or_else(VersionIdentifier::zero)
}
