//! Report rendering: `comfy-table` tables for people, JSON for tools.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;
use znato_dedup::{DetectionReport, Inventory};

/// Title printed above the duplicate table.
pub const DUPLICATES_TITLE: &str = "Equivalent RDF Classes";

/// Printed instead of a table when nothing was found.
pub const NO_DUPLICATES: &str = "No equivalent classes detected.";

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

/// Renders the duplicate candidates as a titled table.
#[must_use]
pub fn duplicates_table(report: &DetectionReport) -> String {
    if report.is_empty() {
        return NO_DUPLICATES.to_owned();
    }
    let mut rows = table(&["Class 1", "Class 2", "Reason"]);
    for candidate in &report.candidates {
        rows.add_row(vec![
            candidate.first.to_string(),
            candidate.second.to_string(),
            candidate.reason.to_string(),
        ]);
    }
    format!("{DUPLICATES_TITLE}\n{rows}")
}

/// Renders the class and property listings.
#[must_use]
pub fn inventory_table(inventory: &Inventory) -> String {
    let mut classes = table(&["Class", "Label"]);
    for class in &inventory.classes {
        classes.add_row(vec![class.iri.as_str(), class.label.as_str()]);
    }
    let mut out = format!("Classes ({})\n{classes}\n", inventory.classes.len());

    if !inventory.properties.is_empty() {
        let mut properties = table(&["Property", "Label", "Kind"]);
        for property in &inventory.properties {
            properties.add_row(vec![
                property.iri.clone(),
                property.label.clone(),
                property.kind.to_string(),
            ]);
        }
        out.push_str(&format!(
            "\nProperties ({})\n{properties}\n",
            inventory.properties.len()
        ));
    }
    out
}

/// Pretty-prints any report as JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if the value cannot be serialized.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
