//! IPv4 subnet calculator: VLSM allocation and equal-split subnetting.
//!
//! [`calculate`] validates a [`models::CalculationInput`], computes the base
//! network's [`models::NetworkFacts`] and runs the matching allocator.

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;
pub mod store;

pub use error::VlsmError;

use models::{compute_facts, Calculation, CalculationInput, Request};
use processing::{allocate, allocate_equal, validate_equal_split, validate_vlsm};

/// Validate `input` and allocate its subnets.
pub fn calculate(input: &CalculationInput) -> Result<Calculation, VlsmError> {
    log::info!(
        "#Start calculate() {mode} {addr}/{prefix}",
        mode = input.mode(),
        addr = input.address,
        prefix = input.prefix
    );
    let calculation = match &input.request {
        Request::Vlsm { requirements } => {
            validate_vlsm(input.prefix, requirements)?;
            let facts = compute_facts(input.address, input.prefix, None)?;
            let subnets = allocate(input.address, input.prefix, requirements);
            Calculation { facts, subnets }
        }
        Request::Subnetting { subnet_count } => {
            let borrowed_bits = validate_equal_split(input.prefix, *subnet_count)?;
            let facts = compute_facts(input.address, input.prefix, Some(borrowed_bits))?;
            let subnets = allocate_equal(input.address, input.prefix, *subnet_count, borrowed_bits);
            Calculation { facts, subnets }
        }
    };
    log::info!("# calculate() produced {} subnets", calculation.subnets.len());
    Ok(calculation)
}
