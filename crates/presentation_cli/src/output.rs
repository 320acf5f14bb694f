//! Text rendering of command results

use std::fmt::Write as _;

use application::{AddressRow, BatchOutcome, BatchReport, ParseMethod};
use domain::{FilteredPosition, GeocodeResult, ParsedAddress};

/// Parse a batch input line; `None` for blank lines and comments
#[must_use]
pub fn parse_batch_line(line: &str) -> Option<AddressRow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.split_once('|') {
        Some((address, note)) => Some(AddressRow::from_free_text(address).with_note(note.trim())),
        None => Some(AddressRow::from_free_text(line)),
    }
}

#[must_use]
pub fn render_parsed(parsed: &ParsedAddress, method: ParseMethod) -> String {
    format!(
        "street:       {}\nhouse number: {}\nlocality:     {}\nmethod:       {method}",
        parsed.street, parsed.house_number, parsed.locality
    )
}

#[must_use]
pub fn render_result(result: &GeocodeResult) -> String {
    let mut out = format!(
        "{}  [{}] via {} ({})",
        result.location, result.accuracy, result.provider_id, result.strategy
    );
    if !result.display_name.is_empty() {
        let _ = write!(out, "\n{}", result.display_name);
    }
    if let Some(note) = result.reduction_note() {
        let _ = write!(out, "\n{note}");
    }
    out
}

fn row_label(row: &AddressRow) -> String {
    ParsedAddress::new(
        row.street.as_str(),
        row.house_number.as_str(),
        row.locality.as_str(),
    )
    .to_string()
}

/// One line per row, hints indented below, then a summary
#[must_use]
pub fn render_batch(report: &BatchReport) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        let label = row_label(&entry.row);
        match &entry.outcome {
            BatchOutcome::Resolved { result } => {
                let _ = writeln!(out, "OK    {label} -> {} ({})", result.location, result.accuracy);
                if let Some(note) = result.reduction_note() {
                    let _ = writeln!(out, "      ! {note}");
                }
            },
            BatchOutcome::Unresolved => {
                let _ = writeln!(out, "FAIL  {label}");
            },
            BatchOutcome::Skipped => {
                let _ = writeln!(out, "SKIP  {label}");
            },
        }
        if !entry.row.note.trim().is_empty() {
            let _ = writeln!(out, "      ! {}", entry.row.note.trim());
        }
    }
    let _ = write!(
        out,
        "{} resolved, {} failed, {} skipped",
        report.resolved, report.failed, report.skipped
    );
    out
}

#[must_use]
pub fn render_position(position: &FilteredPosition) -> String {
    let mut out = format!("{}  ±{:.1} m", position.location, position.accuracy_m);
    if let Some(heading) = position.heading_deg {
        let _ = write!(out, "  heading {heading:.0}°");
    }
    if let Some(kmh) = position.speed_kmh() {
        let _ = write!(out, "  {kmh} km/h");
    }
    out
}
