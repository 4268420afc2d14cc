//! Plain-text and JSON renderings of an [`AnalysisReport`].

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use armory_core::aggregation::DetailLine;

use crate::pipeline::AnalysisReport;

/// Placeholder for a resolved item that carries no weapon subtype.
const UNKNOWN_TYPE: &str = "Unknown";

/// Render the report as console text.
///
/// The per-character listing is only included when `show_details` is set.
pub fn render_text(report: &AnalysisReport, show_details: bool) -> String {
    let mut out = String::new();

    if report.stats.characters_found == 0 {
        out.push_str("No characters found.\n");
        return out;
    }

    for (weapon_type, count) in &report.weapon_counts {
        let _ = writeln!(
            out,
            "The weapon type '{weapon_type}' is equipped {} times across all characters.",
            count.count
        );
    }

    if show_details {
        out.push_str("\nDetailed Character Equipment:\n");
        for character in &report.characters {
            let _ = writeln!(out, "Character: {}", character.character);
            for line in &character.items {
                let _ = writeln!(out, "{}", detail_line(line));
            }
        }
    }

    out.push_str("\nDone!\n");
    out
}

fn detail_line(line: &DetailLine) -> String {
    match &line.item {
        Some(item) => format!(
            "  - {} ({} [Template '{}'])",
            item.name,
            item.weapon_type.as_deref().unwrap_or(UNKNOWN_TYPE),
            line.template
        ),
        None => format!("  - Item ID {}: Not found in cache.", line.item_id),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

/// Render the whole report as pretty-printed JSON, stamped with
/// `generated_at`.
pub fn render_json(
    report: &AnalysisReport,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        generated_at,
        report,
    })
}
