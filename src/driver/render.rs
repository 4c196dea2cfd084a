//! Output Rendering
//!
//! 集計結果・州一覧・地区一覧の表示

use anyhow::{Context, Result};
use serde_json::json;

use crate::domain::entities::region::{District, State};
use crate::domain::entities::slot_record::{AvailabilityReport, SlotColumn};

/// Render rows as an aligned text table followed by the status line
pub fn render_table(report: &AvailabilityReport) -> String {
    let mut out = String::new();

    if !report.rows.is_empty() {
        let widths: Vec<usize> = SlotColumn::ALL
            .iter()
            .map(|column| {
                report
                    .rows
                    .iter()
                    .map(|row| row.cell(*column).chars().count())
                    .chain(std::iter::once(column.header().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = SlotColumn::ALL
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:<width$}", column.header(), width = *width))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');

        for row in &report.rows {
            let cells: Vec<String> = SlotColumn::ALL
                .iter()
                .zip(&widths)
                .map(|(column, width)| format!("{:<width$}", row.cell(*column), width = *width))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
    }

    let status = report.status_text();
    if !status.is_empty() {
        out.push_str(status);
        out.push('\n');
    }

    out
}

/// Render the report as `{"rows": [...], "status": "..."}`
pub fn render_json(report: &AvailabilityReport) -> Result<String> {
    let value = json!({
        "rows": report.rows,
        "status": report.status_text(),
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize report")
}

pub fn render_states(states: &[State]) -> String {
    states
        .iter()
        .map(|state| format!("{:>4}  {}\n", state.state_id, state.state_name))
        .collect()
}

pub fn render_districts(districts: &[District]) -> String {
    if districts.is_empty() {
        return "No districts found\n".to_string();
    }
    districts
        .iter()
        .map(|district| format!("{:>4}  {}\n", district.id, district.name))
        .collect()
}
