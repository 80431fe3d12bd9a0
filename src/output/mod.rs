//! Output formatting for calculation results.
//!
//! - [`csv`] - CSV table of allocated subnets
//! - [`terminal`] - fact sheet and history listing with colors

mod csv;
mod terminal;

pub use csv::{csv_row, subnet_print};
pub use terminal::{facts_lines, format_field, print_facts, print_history, print_record};
