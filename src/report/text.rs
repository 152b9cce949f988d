//! Plain-text table rendering.

use super::Report;

/// Render the report as an ASCII box table.
pub fn render_text(report: &Report) -> String {
    let headers = report.headers();
    let rows: Vec<Vec<String>> = report.rows.iter().map(|row| report.cells(row)).collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.len());
        }
    }

    let rule = rule(&widths);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&line(&headers, &widths));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row, &widths));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn rule(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (cell, width) in cells.iter().zip(widths.iter().copied()) {
        out.push_str(&format!(" {cell:<width$} |"));
    }
    out
}
