//! Pipeline orchestration: walk the checkouts, build one record per
//! project, classify and assemble the report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::debug;

use crate::extract::constraints::parse_upper_constraints;
use crate::extract::deliverable::highest_release;
use crate::extract::template::TemplateScanner;
use crate::lookup::gerrit::GerritClient;
use crate::lookup::obs::{PublishedManifest, module2package};
use crate::report::Report;
use crate::status::ProjectRecord;

/// Everything one run needs; mirrors the CLI surface.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base directory of the releases git repo.
    pub releases_dir: PathBuf,
    /// Base directory of the rpm-packaging git repo.
    pub rpm_packaging_dir: PathBuf,
    /// Base directory of the requirements git repo.
    pub requirements_dir: PathBuf,
    /// Release name, e.g. "mitaka".
    pub release: String,
    /// Optional path to a published xml file from the build service.
    pub obs_published_xml: Option<PathBuf>,
    /// When non-empty, only these projects are checked.
    pub include_projects: Vec<String>,
    /// Gerrit instance queried for open reviews.
    pub gerrit_host: String,
}

/// Build the full report for one run.
///
/// Missing required directories or files are fatal; everything else
/// degrades per project (skip, sentinel or empty lookup result).
pub fn build_report(config: &RunConfig) -> Result<Report> {
    let constraints_path = config.requirements_dir.join("upper-constraints.txt");
    let constraints_text = fs::read_to_string(&constraints_path)
        .with_context(|| format!("reading {}", constraints_path.display()))?;
    let upper_constraints = parse_upper_constraints(&constraints_text);

    let gerrit = GerritClient::new(config.gerrit_host.clone());
    let open_reviews = gerrit.open_reviews_per_project(&config.release);

    // The manifest is read and split once per run; the per-project work is
    // only the name match.
    let manifest = match &config.obs_published_xml {
        Some(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(PublishedManifest::parse(&xml))
        }
        None => None,
    };

    let scanner = TemplateScanner::new();

    let deliverables_dir = config.releases_dir.join("deliverables");
    let mut yaml_files = list_yaml_files(&deliverables_dir.join("_independent"))?;
    yaml_files.extend(list_yaml_files(&deliverables_dir.join(&config.release))?);

    let mut records: IndexMap<String, ProjectRecord> = IndexMap::new();
    for yaml_file in yaml_files {
        let Some(project_name) = project_name_from_path(&yaml_file) else {
            continue;
        };
        if !config.include_projects.is_empty()
            && !config.include_projects.iter().any(|p| *p == project_name)
        {
            continue;
        }

        let content = fs::read_to_string(&yaml_file)
            .with_context(|| format!("reading {}", yaml_file.display()))?;
        let Some(release) = highest_release(&project_name, &content) else {
            debug!("skipping {project_name}: no usable releases");
            continue;
        };
        // tarball-base overrides the packaging directory name
        let pkg_name = release
            .tarball_base
            .clone()
            .unwrap_or_else(|| project_name.clone());

        let template_path = config
            .rpm_packaging_dir
            .join("openstack")
            .join(&pkg_name)
            .join(format!("{pkg_name}.spec.j2"));
        let packaging = scanner.version_from_file(&template_path);

        let obs_published = manifest
            .as_ref()
            .map(|m| m.version_for(&module2package(&project_name)));

        let reviews = open_reviews
            .get(&project_name)
            .cloned()
            .unwrap_or_default();
        let upper_constraint = upper_constraints.get(&project_name).cloned();

        records.insert(
            project_name.clone(),
            ProjectRecord {
                name: project_name,
                release: release.version,
                upper_constraint,
                packaging,
                reviews,
                obs_published,
            },
        );
    }

    Ok(Report::new(
        config.release.clone(),
        config.obs_published_xml.is_some(),
        records.into_values().collect(),
    ))
}

/// Yaml files in one deliverables directory, sorted for stable iteration.
fn list_yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn project_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
