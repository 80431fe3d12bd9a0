//! Subnet allocation logic.
//!
//! - [`validate`] - feasibility checks, always run before allocating
//! - [`vlsm`] - largest-first variable length allocation
//! - [`equal_split`] - equal sized subnets by borrowed bits
//! - [`search`] - position range filter over equal-split results
//! - [`scenario`] - random feasible inputs

mod equal_split;
mod scenario;
mod search;
mod validate;
mod vlsm;

// Re-export public functions
pub use equal_split::allocate_equal;
pub use scenario::{
    generate_scenario, generate_scenario_within, random_address, random_prefix,
    random_requirements, random_subnet_count,
};
pub use search::search_range;
pub use validate::{
    actual_subnet_size, host_bits_needed, parse_subnet_count, validate_equal_split, validate_vlsm,
};
pub use vlsm::allocate;
