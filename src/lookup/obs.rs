//! Build-service publication lookup.
//!
//! Reads an OBS "published" XML listing and extracts the published version
//! for a distro package, following the `[epoch:]name-version-release.arch.rpm`
//! filename convention.

use std::str::FromStr;

use pep508_rs::pep440_rs::Version;
use regex::Regex;
use tracing::warn;

use crate::version::zero_version;

/// Components of an rpm filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmFilename {
    pub name: String,
    pub version: String,
    pub release: String,
    pub epoch: String,
    pub arch: String,
}

/// Split a full rpm filename into its components, right-to-left as yum
/// does it.
///
/// `foo-1.0-1.i386.rpm` -> (foo, 1.0, 1, "", i386)
/// `1:bar-9-123a.ia64.rpm` -> (bar, 9, 123a, 1, ia64)
pub fn split_rpm_filename(filename: &str) -> Option<RpmFilename> {
    let stem = filename.strip_suffix(".rpm").unwrap_or(filename);

    let arch_idx = stem.rfind('.')?;
    let arch = &stem[arch_idx + 1..];

    let rel_idx = stem[..arch_idx].rfind('-')?;
    let release = &stem[rel_idx + 1..arch_idx];

    let ver_idx = stem[..rel_idx].rfind('-')?;
    let version = &stem[ver_idx + 1..rel_idx];

    let (epoch, name_start) = match stem.find(':') {
        Some(idx) => (&stem[..idx], idx + 1),
        None => ("", 0),
    };
    if name_start > ver_idx {
        return None;
    }
    let name = &stem[name_start..ver_idx];

    Some(RpmFilename {
        name: name.to_string(),
        version: version.to_string(),
        release: release.to_string(),
        epoch: epoch.to_string(),
        arch: arch.to_string(),
    })
}

/// Binary packages listed in a published manifest, parsed once per run.
pub struct PublishedManifest {
    entries: Vec<RpmFilename>,
}

impl PublishedManifest {
    /// Parse the manifest XML. Entries are `name="..."` attributes;
    /// metadata entries (`_`-prefixed), non-rpm files and source packages
    /// are ignored.
    pub fn parse(xml: &str) -> Self {
        let name_re = Regex::new(r#"name="([^"]+)""#).unwrap();
        let mut entries = Vec::new();
        for caps in name_re.captures_iter(xml) {
            let filename = &caps[1];
            if filename.starts_with('_')
                || !filename.ends_with(".rpm")
                || filename.ends_with(".src.rpm")
            {
                continue;
            }
            if let Some(split) = split_rpm_filename(filename) {
                entries.push(split);
            }
        }
        Self { entries }
    }

    /// Published version for a distro package name; the zero sentinel when
    /// the package has not been published.
    pub fn version_for(&self, distro_pkg_name: &str) -> Version {
        for entry in &self.entries {
            if entry.name == distro_pkg_name {
                match Version::from_str(&entry.version) {
                    Ok(version) => return version,
                    Err(err) => warn!(
                        "unparseable published version '{}' for {distro_pkg_name}: {err}",
                        entry.version
                    ),
                }
            }
        }
        zero_version()
    }
}

/// Map an upstream project name to the distro package name. Python
/// modules get a `python-` prefix; names already carrying a distro prefix
/// pass through unchanged.
pub fn module2package(name: &str) -> String {
    if name.starts_with("python-") || name.starts_with("openstack-") {
        name.to_string()
    } else {
        format!("python-{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo-1.0-1.i386.rpm", "foo", "1.0", "1", "", "i386")]
    #[case("1:bar-9-123a.ia64.rpm", "bar", "9", "123a", "1", "ia64")]
    #[case(
        "python-oslo.config-6.4.0-1.2.noarch.rpm",
        "python-oslo.config",
        "6.4.0",
        "1.2",
        "",
        "noarch"
    )]
    fn split_rpm_filename_follows_yum_convention(
        #[case] filename: &str,
        #[case] name: &str,
        #[case] version: &str,
        #[case] release: &str,
        #[case] epoch: &str,
        #[case] arch: &str,
    ) {
        let split = split_rpm_filename(filename).unwrap();
        assert_eq!(split.name, name);
        assert_eq!(split.version, version);
        assert_eq!(split.release, release);
        assert_eq!(split.epoch, epoch);
        assert_eq!(split.arch, arch);
    }

    #[test]
    fn split_rpm_filename_rejects_undashed_names() {
        assert_eq!(split_rpm_filename("garbage.rpm"), None);
    }

    const MANIFEST: &str = r#"
<directory>
  <entry name="_repository"/>
  <entry name="python-demo-2.0.0-1.1.noarch.rpm"/>
  <entry name="python-demo-2.0.0-1.1.src.rpm"/>
  <entry name="python-other-1.0.0-3.2.x86_64.rpm"/>
  <entry name="README.txt"/>
</directory>
"#;

    #[test]
    fn version_for_finds_published_binary() {
        let manifest = PublishedManifest::parse(MANIFEST);
        assert_eq!(manifest.version_for("python-demo").to_string(), "2.0.0");
    }

    #[test]
    fn version_for_ignores_source_and_metadata_entries() {
        let manifest = PublishedManifest::parse("<directory><entry name=\"_repository\"/><entry name=\"python-demo-2.0.0-1.1.src.rpm\"/></directory>");
        assert_eq!(manifest.version_for("python-demo"), zero_version());
    }

    #[test]
    fn version_for_unknown_package_is_zero() {
        let manifest = PublishedManifest::parse(MANIFEST);
        assert_eq!(manifest.version_for("python-unknown"), zero_version());
    }

    #[rstest]
    #[case("nova", "python-nova")]
    #[case("oslo.config", "python-oslo.config")]
    #[case("python-demo", "python-demo")]
    #[case("openstack-macros", "openstack-macros")]
    fn module2package_applies_distro_prefix(#[case] module: &str, #[case] package: &str) {
        assert_eq!(module2package(module), package);
    }
}
