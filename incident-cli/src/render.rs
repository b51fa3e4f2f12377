//! Plain-text rendering of a list page.

use incident_core::{messages, Pager};
use incident_model::{Choice, DisplayStyle, Incident};
use std::fmt::Write;

const HEADERS: [&str; 7] = ["ID", "TITLE", "SERVICE", "SEVERITY", "STATUS", "CREATED AT", "OWNER"];

fn cells(incident: &Incident) -> [String; 7] {
    [
        incident.id.to_string(),
        incident.title.clone(),
        incident.service.as_str().to_string(),
        incident.severity.as_str().to_string(),
        incident.status.as_str().to_string(),
        incident.created_display(DisplayStyle::Short),
        incident.owner_or_dash().to_string(),
    ]
}

/// Column-aligned table followed by the pager label.
pub fn incident_table(rows: &[Incident], pager: Pager) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "{}", messages::NO_RESULTS);
        let _ = writeln!(out, "{}", pager.label());
        return out;
    }

    let body: Vec<[String; 7]> = rows.iter().map(cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut line = |cols: &[String]| {
        let padded: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };
    line(HEADERS.map(String::from).as_slice());
    for row in &body {
        line(row.as_slice());
    }
    let _ = writeln!(out, "{}", pager.label());
    out
}
