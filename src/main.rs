use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use rpm_packaging_status::lookup::gerrit::DEFAULT_GERRIT_HOST;
use rpm_packaging_status::report::{render_html, render_text};
use rpm_packaging_status::run::{RunConfig, build_report};

/// Output format for the status table.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

#[derive(Parser)]
#[command(
    name = "rpm-packaging-status",
    version,
    about = "Compare rpm-packaging with OpenStack releases"
)]
struct Cli {
    /// Base directory of the openstack/releases git repo
    releases_git_dir: PathBuf,

    /// Base directory of the openstack/rpm-packaging git repo
    rpm_packaging_git_dir: PathBuf,

    /// Base directory of the openstack/requirements git repo
    requirements_git_dir: PathBuf,

    /// Name of the release, e.g. "mitaka"
    release: String,

    /// Path to a published xml file from the openbuildservice
    #[arg(long)]
    obs_published_xml: Option<PathBuf>,

    /// If given, only these projects are checked
    #[arg(long = "include-projects", value_name = "project-name")]
    include_projects: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Gerrit instance to query for open reviews
    #[arg(long, default_value = DEFAULT_GERRIT_HOST)]
    gerrit_host: String,
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RunConfig {
        releases_dir: cli.releases_git_dir,
        rpm_packaging_dir: cli.rpm_packaging_git_dir,
        requirements_dir: cli.requirements_git_dir,
        release: cli.release,
        obs_published_xml: cli.obs_published_xml,
        include_projects: cli.include_projects,
        gerrit_host: cli.gerrit_host,
    };

    let report = build_report(&config)?;
    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Html => print!("{}", render_html(&report)),
    }
    Ok(())
}
