//! CLI presentation: text and json formatters for batch reports.

use crate::error::ApiError;
use crate::manifest::BatchReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_batch_report(report: &BatchReport, format: &str) -> Result<String, ApiError> {
    match format {
        "json" => format_batch_report_json(report),
        "text" => Ok(format_batch_report_text(report)),
        other => Err(ApiError::OutputError(format!(
            "Unknown format '{}' (expected text or json)",
            other
        ))),
    }
}

pub fn format_batch_report_json(report: &BatchReport) -> Result<String, ApiError> {
    let out = serde_json::json!({
        "entries": report.rows,
        "all_match": report.all_match(),
    });
    serde_json::to_string_pretty(&out).map_err(|e| ApiError::OutputError(e.to_string()))
}

pub fn format_batch_report_text(report: &BatchReport) -> String {
    if report.rows.is_empty() {
        return "Manifest has no entries.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Target", "Outcome", "Expected"]);
    for row in &report.rows {
        let expected = match (&row.expected, row.matches) {
            (Some(_), Some(true)) => "ok".to_string(),
            (Some(expected), _) => format!("MISMATCH ({})", expected),
            (None, _) => "-".to_string(),
        };
        table.add_row(vec![
            row.target.display().to_string(),
            row.outcome.clone(),
            expected,
        ]);
    }

    format!(
        "{}\n{}",
        format!("Applied {} patches", report.rows.len()).bold(),
        table
    )
}
