//! Rendering of finished runs.
//!
//! Two formats:
//! - a three-line human summary (best design, cost, elapsed time)
//! - pretty JSON of the full [`RunRecord`], including the seed for replay

use aadp_core::swarm::RunReport;

use crate::RunRecord;

/// Human-readable summary of a run.
///
/// ```text
/// Global Best: { 0.61, 0.98, 1.5 }
/// Cost: -3.54
/// Time Elapsed: 812.4ms
/// ```
pub fn render_text(report: &RunReport) -> String {
    format!(
        "Global Best: {}\nCost: {}\nTime Elapsed: {}ms",
        format_design(&report.design),
        report.cost,
        report.elapsed_ms
    )
}

/// Pretty-printed JSON for a run record.
pub fn render_json(record: &RunRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

fn format_design(design: &[f64]) -> String {
    let elements = design
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {elements} }}")
}
