//! HTML table rendering with status-colored comment cells.

use super::Report;
use crate::status::Status;

/// Background color for a comment cell. The constraint-downgrade label has
/// never been colored in the rendered dashboard, so it stays plain.
fn status_color(status: Status) -> Option<&'static str> {
    match status {
        Status::Unpackaged => Some("yellow"),
        Status::NeedsUpgrade => Some("LightYellow"),
        Status::NeedsDowngrade => Some("red"),
        Status::Ok => Some("green"),
        Status::NeedsDowngradeConstraint => None,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the report as a standalone HTML table.
pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<table style=\"border-collapse: collapse;\">\n");
    out.push_str("<tr style=\"border-bottom:1pt solid black;\">");
    for header in report.headers() {
        out.push_str(&format!("<th>{}</th>", escape(&header)));
    }
    out.push_str("</tr>\n");
    for row in &report.rows {
        out.push_str("<tr style=\"border-bottom:1pt solid black;\">");
        let cells = report.cells(row);
        let comment_idx = cells.len() - 1;
        for (idx, cell) in cells.iter().enumerate() {
            let cell = escape(cell);
            if idx == comment_idx {
                match status_color(row.status) {
                    Some(color) => out.push_str(&format!(
                        "<td style=\"background-color:{color}\">{cell}</td>"
                    )),
                    None => out.push_str(&format!("<td>{cell}</td>")),
                }
            } else {
                out.push_str(&format!("<td>{cell}</td>"));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}
