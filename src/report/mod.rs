//! Report assembly and rendering.

mod html;
mod text;

pub use html::render_html;
pub use text::render_text;

use crate::status::{ProjectRecord, Status, classify};

/// A classified row ready for rendering.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub record: ProjectRecord,
    pub status: Status,
}

/// The finished report for one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub release: String,
    /// Whether the obs column is part of the output (a publication
    /// manifest was supplied).
    pub include_obs: bool,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Classify records and sort rows by status label, then by name so the
    /// output is stable across runs.
    pub fn new(release: impl Into<String>, include_obs: bool, records: Vec<ProjectRecord>) -> Self {
        let mut rows: Vec<ReportRow> = records
            .into_iter()
            .map(|record| {
                let status = classify(&record);
                ReportRow { record, status }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.status
                .as_str()
                .cmp(b.status.as_str())
                .then_with(|| a.record.name.cmp(&b.record.name))
        });
        Self {
            release: release.into(),
            include_obs,
            rows,
        }
    }

    /// Column headers for the configured run.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "name".to_string(),
            format!("release ({})", self.release),
            format!("u-c ({})", self.release),
            format!("rpm packaging ({})", self.release),
            "reviews".to_string(),
        ];
        if self.include_obs {
            headers.push("obs".to_string());
        }
        headers.push("comment".to_string());
        headers
    }

    /// Cell values for one row, in header order.
    pub fn cells(&self, row: &ReportRow) -> Vec<String> {
        let record = &row.record;
        let mut cells = vec![
            record.name.clone(),
            record.release.to_string(),
            record
                .upper_constraint
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            record.packaging.to_string(),
            format!("{:?}", record.reviews),
        ];
        if self.include_obs {
            cells.push(
                record
                    .obs_published
                    .as_ref()
                    .map_or_else(|| "0".to_string(), ToString::to_string),
            );
        }
        cells.push(row.status.to_string());
        cells
    }
}
