//! CSV output formatting for block records.

use super::record::BlockRecord;
use super::terminal::format_field;
use itertools::Itertools;

const HEADER: [&str; 8] = [
    "label",
    "network",
    "broadcast",
    "mask",
    "prefix",
    "usable_first",
    "usable_last",
    "usable_count",
];

/// Render records as CSV, one row per block, header first.
pub fn render_csv(records: &[BlockRecord]) -> String {
    let mut out = HEADER.iter().map(|h| format!("\"{h}\"")).join(",");
    out.push('\n');
    for record in records {
        out.push_str(&csv_row(record));
        out.push('\n');
    }
    out
}

fn csv_row(record: &BlockRecord) -> String {
    let none = || "none".to_string();
    [
        format_field(escape_csv_field(&record.label), 18),
        format_field(record.network, 17),
        format_field(record.broadcast, 17),
        format_field(record.mask, 17),
        format_field(record.prefix_len, 4),
        format_field(record.usable_first.map_or_else(none, |a| a.to_string()), 17),
        format_field(record.usable_last.map_or_else(none, |a| a.to_string()), 17),
        format_field(record.usable_count, 12),
    ]
    .join(",")
}

/// Double any quotes so the value survives inside a quoted field.
fn escape_csv_field(input: &str) -> String {
    input.replace('"', "\"\"")
}
