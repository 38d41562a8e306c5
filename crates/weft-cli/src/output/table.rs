//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Listing data for a single compiled entry.
pub struct EntryRow {
    /// Entry name.
    pub name: String,
    /// Number of call parameters the entry takes.
    pub params: usize,
    /// Attribute names the entry's instances carry.
    pub attributes: Vec<String>,
    /// Number of compiled alternatives (matchers).
    pub alternatives: usize,
}

/// Format compiled entries as an ASCII table.
pub fn format_entry_table(rows: &[EntryRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Entry", "Params", "Attributes", "Alternatives"]);

    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            row.params.to_string(),
            row.attributes.join(", "),
            row.alternatives.to_string(),
        ]);
    }

    table
}
