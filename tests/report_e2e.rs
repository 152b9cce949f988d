use std::fs;
use std::path::Path;

use mockito::{Matcher, Server, ServerGuard};
use tempfile::TempDir;

use rpm_packaging_status::report::{Report, render_text};
use rpm_packaging_status::run::{RunConfig, build_report};

/// Lay out minimal releases/rpm-packaging/requirements checkouts.
struct Checkouts {
    root: TempDir,
}

impl Checkouts {
    fn new(release: &str) -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("releases/deliverables/_independent")).unwrap();
        fs::create_dir_all(root.path().join("releases/deliverables").join(release)).unwrap();
        fs::create_dir_all(root.path().join("rpm-packaging/openstack")).unwrap();
        fs::create_dir_all(root.path().join("requirements")).unwrap();
        fs::write(
            root.path().join("requirements/upper-constraints.txt"),
            "",
        )
        .unwrap();
        Self { root }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn add_deliverable(&self, release: &str, project: &str, yaml: &str) {
        fs::write(
            self.path()
                .join("releases/deliverables")
                .join(release)
                .join(format!("{project}.yaml")),
            yaml,
        )
        .unwrap();
    }

    fn add_template(&self, pkg: &str, content: &str) {
        let dir = self.path().join("rpm-packaging/openstack").join(pkg);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{pkg}.spec.j2")), content).unwrap();
    }

    fn set_constraints(&self, content: &str) {
        fs::write(
            self.path().join("requirements/upper-constraints.txt"),
            content,
        )
        .unwrap();
    }

    fn config(&self, release: &str, gerrit_host: &str) -> RunConfig {
        RunConfig {
            releases_dir: self.path().join("releases"),
            rpm_packaging_dir: self.path().join("rpm-packaging"),
            requirements_dir: self.path().join("requirements"),
            release: release.to_string(),
            obs_published_xml: None,
            include_projects: Vec::new(),
            gerrit_host: gerrit_host.to_string(),
        }
    }
}

/// Gerrit mock answering the open-changes query with an empty list.
fn quiet_gerrit() -> ServerGuard {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/changes/.*".to_string()))
        .with_status(200)
        .with_body(")]}'\n[]")
        .create();
    server
}

fn row_for(report: &Report, name: &str) -> Vec<String> {
    let row = report
        .rows
        .iter()
        .find(|row| row.record.name == name)
        .unwrap();
    report.cells(row)
}

#[test]
fn matching_versions_report_ok() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable(
        "mitaka",
        "demo",
        "releases:\n  - version: 2.0.0\n    projects:\n      - repo: openstack/demo\n",
    );
    checkouts.add_template("demo", "Name: demo\nVersion: 2.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();

    assert_eq!(report.rows.len(), 1);
    let cells = row_for(&report, "demo");
    assert_eq!(cells, vec!["demo", "2.0.0", "-", "2.0.0", "[]", "ok"]);

    let text = render_text(&report);
    assert!(text.contains("| demo"));
    assert!(text.contains("| ok"));
}

#[test]
fn outdated_packaging_reports_needs_upgrade() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable(
        "mitaka",
        "demo",
        "releases:\n  - version: 1.0.0\n  - version: 2.0.0\n",
    );
    checkouts.add_template("demo", "Version: 1.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    assert_eq!(row_for(&report, "demo")[5], "needs upgrade");
}

#[test]
fn missing_template_reports_unpackaged() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable("mitaka", "demo", "releases:\n  - version: 2.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    let cells = row_for(&report, "demo");
    assert_eq!(cells[3], "0");
    assert_eq!(cells[5], "unpackaged");
}

#[test]
fn build_time_version_reports_ok_and_constraint_is_shown() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable("mitaka", "demo", "releases:\n  - version: 2.0.0\n");
    checkouts.add_template("demo", "Version: {{ py2rpmversion() }}\n");
    checkouts.set_constraints("demo===1.5.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    let cells = row_for(&report, "demo");
    assert_eq!(cells[2], "1.5.0");
    assert_eq!(cells[3], "version unset");
    assert_eq!(cells[5], "ok");
}

#[test]
fn tarball_base_redirects_template_lookup() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable(
        "mitaka",
        "demo",
        "releases:\n  - version: 2.0.0\n    projects:\n      - repo: openstack/demo\n        tarball-base: demo-base\n",
    );
    checkouts.add_template("demo-base", "Version: 2.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    assert_eq!(row_for(&report, "demo")[5], "ok");
}

#[test]
fn deliverable_without_releases_is_skipped() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable("mitaka", "empty", "launchpad: empty\n");
    checkouts.add_deliverable("mitaka", "demo", "releases:\n  - version: 2.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].record.name, "demo");
}

#[test]
fn include_projects_filters_by_file_stem() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable("mitaka", "demo", "releases:\n  - version: 2.0.0\n");
    checkouts.add_deliverable("mitaka", "other", "releases:\n  - version: 1.0.0\n");

    let mut config = checkouts.config("mitaka", &gerrit.url());
    config.include_projects = vec!["demo".to_string()];
    let report = build_report(&config).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].record.name, "demo");
}

#[test]
fn independent_deliverables_are_included() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    fs::write(
        checkouts
            .path()
            .join("releases/deliverables/_independent/indep.yaml"),
        "releases:\n  - version: 3.0.0\n",
    )
    .unwrap();

    let report = build_report(&checkouts.config("mitaka", &gerrit.url())).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].record.name, "indep");
}

#[test]
fn open_reviews_show_up_in_the_reviews_column() {
    let mut server = Server::new();
    server
        .mock("GET", Matcher::Regex("^/changes/\\?q=.*".to_string()))
        .with_status(200)
        .with_body(")]}'\n[{\"change_id\": \"Iabc\", \"_number\": 680230}]")
        .create();
    server
        .mock("GET", "/changes/Iabc/revisions/current/files/")
        .with_status(200)
        .with_body(")]}'\n{\"openstack/demo/demo.spec.j2\": {}}")
        .create();

    let checkouts = Checkouts::new("mitaka");
    checkouts.add_deliverable("mitaka", "demo", "releases:\n  - version: 2.0.0\n");
    checkouts.add_template("demo", "Version: 2.0.0\n");

    let report = build_report(&checkouts.config("mitaka", &server.url())).unwrap();
    assert_eq!(row_for(&report, "demo")[4], "[680230]");
}

#[test]
fn missing_requirements_file_is_fatal() {
    let gerrit = quiet_gerrit();
    let checkouts = Checkouts::new("mitaka");
    fs::remove_file(checkouts.path().join("requirements/upper-constraints.txt")).unwrap();

    let result = build_report(&checkouts.config("mitaka", &gerrit.url()));
    assert!(result.is_err());
}
