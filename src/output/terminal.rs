//! Colored terminal output.

use super::record::{allocation_records, summary_record, BlockRecord};
use crate::models::{AllocationResult, Method, SummaryResult};
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn render_record(lines: &mut Vec<String>, record: &BlockRecord) {
    lines.push(String::new());
    lines.push(format!("{}:", record.label).red().bold().to_string());
    for (name, value) in record.fields() {
        let line = format!("  {name}: {value}");
        let line = match name {
            "Prefix Length" => line.blue(),
            "Subnet Mask" => line.magenta(),
            _ => line.green(),
        };
        lines.push(line.to_string());
    }
    if record.usable_range().is_none() {
        lines.push("  No usable IPs in this subnet.".red().to_string());
    }
}

/// One output line per entry, each newline-terminated.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Render an FLSM or VLSM result for the terminal.
pub fn render_allocation(result: &AllocationResult) -> String {
    let network = &result.network;
    let mut lines = vec![
        format!("Original Network: {network}").cyan().bold().to_string(),
        format!("Original Subnet Mask: {}", network.mask())
            .green()
            .to_string(),
        format!("Number of Subnets Requested: {}", result.requested)
            .yellow()
            .to_string(),
    ];
    if let Method::Flsm { new_prefix } = result.method {
        let new_mask = std::net::Ipv4Addr::from(crate::models::cidr_mask(new_prefix));
        lines.push(format!("New Prefix Length: /{new_prefix}").blue().to_string());
        lines.push(format!("New Subnet Mask: {new_mask}").magenta().to_string());
    }
    for record in allocation_records(result) {
        render_record(&mut lines, &record);
    }
    join_lines(lines)
}

/// Render a summarization result for the terminal.
pub fn render_summary(result: &SummaryResult) -> String {
    let mut lines = vec!["Input Networks:".yellow().to_string()];
    for (i, network) in result.networks.iter().enumerate() {
        lines.push(format!("  Network {}: {network}", i + 1).green().to_string());
    }
    let record = summary_record(result);
    render_record(&mut lines, &record);
    lines.push(
        format!("  Address Range: {} - {}", record.network, record.broadcast)
            .green()
            .to_string(),
    );
    join_lines(lines)
}
