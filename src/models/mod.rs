//! Domain models for the subnet calculator.
//!
//! - [`ipv4`] - address codec and [`Cidr`] notation
//! - [`facts`] - [`NetworkFacts`] derived from an address and prefix
//! - [`subnet`] - requirements and allocated subnets
//! - [`calculation`] - inputs, results and history records

mod calculation;
mod facts;
mod ipv4;
mod subnet;

// Re-export public types
pub use calculation::{Calculation, CalculationInput, CalculationRecord, Mode, Request};
pub use facts::{compute_delta, compute_facts, compute_increment, BorrowFacts, NetworkFacts};
pub use ipv4::{
    block_size, broadcast_addr, format_address, get_cidr_mask, mask_for_prefix, network_addr,
    parse_address, parse_octets, parse_prefix, to_binary, Cidr, MAX_LENGTH,
};
pub use subnet::{AllocatedSubnet, SubnetRequirement};
