//! CSV output of allocated subnets.

use super::terminal::format_field;
use crate::models::AllocatedSubnet;
use colored::Colorize;

const HEADER: &str = r#" "pos",        "name",       "subnet_cidr",      "mask",  "first_usable",   "last_usable",     "broadcast", "required", "allocated", "wasted", "delta""#;

/// One CSV row for an allocated subnet. `pos` is the 1-based output row.
pub fn csv_row(pos: usize, s: &AllocatedSubnet) -> String {
    let dash = || "-".to_string();
    format!(
        r#"{pos},{name},{cidr},{mask},{first},{last},{broadcast},{required},{allocated},{wasted},{delta}"#,
        pos = format_field(s.position.map_or(pos, |p| p as usize), 6),
        name = format_field(&s.name, 14),
        cidr = format_field(s.cidr(), 19),
        mask = format_field(s.facts.subnet_mask, 17),
        first = format_field(s.facts.first_usable.map_or_else(dash, |a| a.to_string()), 16),
        last = format_field(s.facts.last_usable.map_or_else(dash, |a| a.to_string()), 16),
        broadcast = format_field(s.facts.broadcast_address, 16),
        required = format_field(s.required_hosts, 11),
        allocated = format_field(s.allocated_hosts, 12),
        wasted = format_field(s.wasted_hosts(), 9),
        delta = format_field(s.facts.delta.map_or_else(dash, |d| d.to_string()), 8),
    )
}

/// Print allocated subnets as CSV to stdout.
pub fn subnet_print(subnets: &[AllocatedSubnet]) {
    log::info!("#Start subnet_print() {} subnets", subnets.len());
    println!("{HEADER}");
    for (i, s) in subnets.iter().enumerate() {
        println!("{}", csv_row(i + 1, s));
    }
    let wasted: u64 = subnets.iter().map(|s| s.wasted_hosts()).sum();
    if wasted > 0 {
        println!("#{}# {wasted} usable addresses allocated but not required", "NOTE".on_red());
    }
}
