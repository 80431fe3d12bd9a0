//! Terminal output utilities.
//!
//! Field formatting plus the coloured fact sheet printed for the base network.

use crate::models::{CalculationRecord, NetworkFacts};
use crate::store::HistoryLog;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Label/value pairs describing a network, in display order.
pub fn facts_lines(facts: &NetworkFacts) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Network address", facts.network_address.to_string()),
        ("Broadcast address", facts.broadcast_address.to_string()),
        ("First usable", or_dash(facts.first_usable)),
        ("Last usable", or_dash(facts.last_usable)),
        ("Subnet mask", facts.subnet_mask.to_string()),
        ("Mask (binary)", facts.subnet_mask_binary()),
        ("Prefix", format!("/{}", facts.prefix)),
        ("Total IPs", facts.total_ips.to_string()),
        ("Usable hosts", facts.usable_hosts().to_string()),
        ("Delta", or_dash(facts.delta)),
    ];
    if let Some(borrow) = facts.borrow {
        lines.extend([
            ("Borrowed bits", borrow.subnet_bits.to_string()),
            ("Subnet increment", borrow.subnet_increment.to_string()),
            ("Host bits", borrow.host_bits.to_string()),
            ("Total subnets", borrow.total_subnets.to_string()),
        ]);
    }
    lines
}

/// Print the fact sheet for the base network.
pub fn print_facts(facts: &NetworkFacts) {
    println!(
        "{} {}/{}",
        "Network".on_blue(),
        facts.network_address,
        facts.prefix
    );
    for (label, value) in facts_lines(facts) {
        println!("  {:<18} {}", format!("{label}:"), value.bold());
    }
}

pub fn print_record(record: &CalculationRecord) {
    println!("{}", record.to_string().green());
}

/// Print the history log, newest first.
pub fn print_history(history: &HistoryLog) {
    if history.is_empty() {
        println!("{}", "history is empty".yellow());
        return;
    }
    for (i, record) in history.records().iter().enumerate() {
        println!("{:>2}. {record}", i + 1);
    }
}
