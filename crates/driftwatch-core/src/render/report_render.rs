use std::fmt::Write;

use crate::model::{DriftReport, SingleResult};
use crate::render::OutputFormat;

const TABLE_HEADERS: [&str; 3] = ["INSTANCE ID", "DRIFT DETECTED", "DRIFTED ATTRIBUTES"];
const TABLE_PADDING: usize = 2;

/// Render a report in the requested format
///
/// Every format ends with a newline.
pub fn render_report(report: &DriftReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
        OutputFormat::Table => render_table(report),
        OutputFormat::Compact => render_compact(report),
    }
}

/// Render a single-instance result as a one-entry report
pub fn render_single(result: &SingleResult, format: OutputFormat) -> String {
    render_report(&DriftReport::single(result.clone()), format)
}

fn render_json(report: &DriftReport) -> String {
    // Serializing plain data with string keys cannot fail
    match serde_json::to_string_pretty(report) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
    }
}

fn render_text(report: &DriftReport) -> String {
    let mut out = String::new();
    out.push_str("Drift Detection Report\n");
    out.push_str("======================\n\n");

    for result in &report.results {
        let _ = writeln!(out, "Instance: {}", result.instance_id);

        if let Some(error) = &result.error {
            let _ = writeln!(out, "  Error: {}\n", error);
            continue;
        }

        if !result.has_drift {
            out.push_str("  Status: No drift detected\n\n");
            continue;
        }

        out.push_str("  Status: DRIFT DETECTED\n");
        out.push_str("  Drifted Attributes:\n");
        for attr in &result.drifted_attributes {
            let _ = writeln!(out, "    - {}:", attr.path);
            let _ = writeln!(out, "        Actual:  {}", attr.actual_value);
            let _ = writeln!(out, "        Desired: {}", attr.desired_value);
        }
        out.push('\n');
    }

    out.push_str("Summary\n");
    out.push_str("-------\n");
    let _ = writeln!(out, "Total instances checked: {}", report.total_instances);
    let _ = writeln!(out, "Instances with drift:    {}", report.drifted_instances);
    let _ = writeln!(
        out,
        "Instances without drift: {}",
        report.total_instances.saturating_sub(report.drifted_instances)
    );
    out
}

fn table_row(result: &SingleResult) -> [String; 3] {
    let status = if result.has_drift { "Yes" } else { "No" };
    let attributes = match &result.error {
        Some(error) => format!("ERROR: {}", error),
        None if result.drifted_attributes.is_empty() => "-".to_string(),
        None => result
            .drifted_attributes
            .iter()
            .map(|a| a.path.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    };
    [result.instance_id.clone(), status.to_string(), attributes]
}

fn render_table(report: &DriftReport) -> String {
    let underline = TABLE_HEADERS.map(|h| "-".repeat(h.len()));
    let header = TABLE_HEADERS.map(str::to_string);

    let mut rows = vec![header, underline];
    rows.extend(report.results.iter().map(table_row));

    // Last column is left ragged
    let mut widths = [0usize; 2];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for [id, status, attributes] in &rows {
        let _ = writeln!(
            out,
            "{:<id_w$}{:<status_w$}{}",
            id,
            status,
            attributes,
            id_w = widths[0] + TABLE_PADDING,
            status_w = widths[1] + TABLE_PADDING,
        );
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Summary: {}/{} instances with drift",
        report.drifted_instances, report.total_instances
    );
    out
}

fn render_compact(report: &DriftReport) -> String {
    if report.drifted_instances == 0 {
        format!(
            "OK: No drift detected in {} instances\n",
            report.total_instances
        )
    } else {
        format!(
            "DRIFT: {}/{} instances have drift\n",
            report.drifted_instances, report.total_instances
        )
    }
}
