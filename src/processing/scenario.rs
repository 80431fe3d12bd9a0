//! Random, always feasible, calculation inputs for demos and practice.

use super::validate::{validate_equal_split, validate_vlsm};
use crate::config;
use crate::error::VlsmError;
use crate::models::{block_size, CalculationInput, Mode, SubnetRequirement, MAX_LENGTH};
use rand::Rng;
use std::net::Ipv4Addr;

const MIN_BLOCK: u64 = 4;

fn floor_log2(n: u64) -> u32 {
    63 - n.max(1).leading_zeros()
}

/// Random unicast-looking address: first octet 1-223, the rest 0-255.
pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    let (lo, hi) = config::SCENARIO_FIRST_OCTET;
    Ipv4Addr::new(rng.gen_range(lo..=hi), rng.gen(), rng.gen(), rng.gen())
}

pub fn random_prefix<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    let (lo, hi) = config::SCENARIO_PREFIX;
    rng.gen_range(lo..=hi)
}

/// Random subnet count for equal-split, at most 16 and never more than
/// `2^min(30 - prefix, 8)`.
pub fn random_subnet_count<R: Rng + ?Sized>(rng: &mut R, prefix: u8) -> u32 {
    let max_borrowed = (MAX_LENGTH - config::MIN_HOST_BITS)
        .saturating_sub(prefix)
        .min(config::SCENARIO_MAX_BORROWED_BITS);
    let max_subnets = (1u32 << max_borrowed).min(config::SCENARIO_MAX_SUBNET_COUNT);
    if max_subnets < 2 {
        return 1;
    }
    rng.gen_range(2..=max_subnets)
}

/// Random requirements sized top-down from `available_hosts`.
///
/// Picks 2-10 subnets (usually 3-5), gives each a power-of-two block that
/// leaves at least four addresses per remaining subnet, and the last one the
/// biggest block that still fits.
pub fn random_requirements<R: Rng + ?Sized>(
    rng: &mut R,
    available_hosts: u64,
) -> Vec<SubnetRequirement> {
    let total_ips = available_hosts + 2;

    let roll: f64 = rng.gen();
    let mut num_subnets: u64 = if roll < 0.6 {
        rng.gen_range(3..=5)
    } else if roll < 0.8 {
        2
    } else {
        rng.gen_range(6..=10)
    };
    if available_hosts < num_subnets * MIN_BLOCK {
        num_subnets = (available_hosts / MIN_BLOCK).max(2);
    }
    if num_subnets * MIN_BLOCK > total_ips {
        num_subnets = (total_ips / MIN_BLOCK).max(1);
    }

    let mut requirements = Vec::new();
    let mut remaining = total_ips;
    for i in 0..num_subnets {
        let bits = if i == num_subnets - 1 {
            floor_log2(remaining)
        } else {
            let min_remaining = (num_subnets - i - 1) * MIN_BLOCK;
            let max_bits = floor_log2(remaining.saturating_sub(min_remaining));
            if max_bits <= 2 {
                2
            } else {
                rng.gen_range(2..=max_bits)
            }
        };
        let usable = (1u64 << bits).saturating_sub(2);
        if usable < 2 {
            break;
        }
        let required = rng.gen_range(2..=usable.min(u32::MAX as u64)) as u32;
        requirements.push(SubnetRequirement::new(
            (i + 1).to_string(),
            format!("Subnet {}", i + 1),
            required,
        ));
        remaining = remaining.saturating_sub(1u64 << bits);
    }

    if requirements.is_empty() {
        let usable = (1u64 << floor_log2(total_ips)).saturating_sub(2).max(2);
        requirements.push(SubnetRequirement::new("1", "Subnet 1", usable as u32));
    }
    requirements
}

/// Generate a random input for `mode` that passes validation.
///
/// Gives up with [`VlsmError::ScenarioExhausted`] after
/// [`config::SCENARIO_MAX_ATTEMPTS`] infeasible draws.
pub fn generate_scenario<R: Rng + ?Sized>(
    rng: &mut R,
    mode: Mode,
) -> Result<CalculationInput, VlsmError> {
    generate_scenario_within(rng, mode, config::SCENARIO_MAX_ATTEMPTS)
}

/// [`generate_scenario`] with an explicit cap on the number of draws.
pub fn generate_scenario_within<R: Rng + ?Sized>(
    rng: &mut R,
    mode: Mode,
    max_attempts: usize,
) -> Result<CalculationInput, VlsmError> {
    for attempt in 1..=max_attempts {
        let address = random_address(rng);
        let prefix = random_prefix(rng);
        let input = match mode {
            Mode::Vlsm => {
                let requirements = random_requirements(rng, block_size(prefix) - 2);
                if let Err(e) = validate_vlsm(prefix, &requirements) {
                    log::debug!("scenario attempt {attempt} rejected: {e}");
                    continue;
                }
                CalculationInput::vlsm(address, prefix, requirements)
            }
            Mode::Subnetting => {
                let count = random_subnet_count(rng, prefix);
                if let Err(e) = validate_equal_split(prefix, count) {
                    log::debug!("scenario attempt {attempt} rejected: {e}");
                    continue;
                }
                CalculationInput::subnetting(address, prefix, count)
            }
        };
        log::info!("generated {mode} scenario {address}/{prefix} after {attempt} attempt(s)");
        return Ok(input);
    }
    log::warn!("no {mode} scenario found in {max_attempts} attempt(s)");
    Err(VlsmError::ScenarioExhausted {
        attempts: max_attempts,
    })
}
