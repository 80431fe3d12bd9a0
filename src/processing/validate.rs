//! Feasibility checks run before either allocator.

use crate::config::MIN_HOST_BITS;
use crate::error::VlsmError;
use crate::models::{block_size, SubnetRequirement, MAX_LENGTH};

/// Host bits needed to fit `required_hosts` plus network and broadcast.
pub fn host_bits_needed(required_hosts: u64) -> u8 {
    // ceil(log2(n)) for n >= 1
    let hosts_needed = required_hosts + 2;
    hosts_needed.next_power_of_two().trailing_zeros() as u8
}

/// Usable hosts in the smallest block that fits `required_hosts`.
pub fn actual_subnet_size(required_hosts: u64) -> u64 {
    (1u64 << host_bits_needed(required_hosts)) - 2
}

/// Check that every requirement asks for at least one host and that the
/// power-of-two blocks they round up to fit into `/base_prefix`.
///
/// # Examples
/// ```
/// use vlsm_calculator::models::SubnetRequirement;
/// use vlsm_calculator::processing::validate_vlsm;
/// let reqs = vec![SubnetRequirement::new("1", "lan", 10)];
/// assert!(validate_vlsm(24, &reqs).is_ok());
/// assert!(validate_vlsm(30, &reqs).is_err());
/// ```
pub fn validate_vlsm(
    base_prefix: u8,
    requirements: &[SubnetRequirement],
) -> Result<(), VlsmError> {
    if base_prefix > MAX_LENGTH {
        return Err(VlsmError::InvalidPrefix(base_prefix.to_string()));
    }
    if requirements.is_empty() {
        return Err(VlsmError::InvalidRequirement {
            name: "(none)".to_string(),
        });
    }
    if let Some(bad) = requirements.iter().find(|r| r.required_hosts == 0) {
        return Err(VlsmError::InvalidRequirement {
            name: bad.name.clone(),
        });
    }

    let available = block_size(base_prefix) as i64 - 2;
    let total_needed: u64 = requirements
        .iter()
        .map(|r| actual_subnet_size(r.required_hosts as u64))
        .sum();
    log::debug!(
        "validate_vlsm /{base_prefix}: need {total_needed} usable of {available} for {} subnets",
        requirements.len()
    );
    if total_needed as i64 > available {
        return Err(VlsmError::CapacityExceeded {
            total_needed,
            available,
            base_prefix,
        });
    }

    // Usable counts drop two addresses per block, so they can fit while the
    // blocks themselves overflow the base network.
    let total_block: u64 = requirements
        .iter()
        .map(|r| 1u64 << host_bits_needed(r.required_hosts as u64))
        .sum();
    let available_addresses = block_size(base_prefix);
    if total_block > available_addresses {
        log::debug!(
            "validate_vlsm /{base_prefix}: blocks need {total_block} addresses of {available_addresses}"
        );
        return Err(VlsmError::BlockOverflow {
            total_addresses: total_block,
            available_addresses,
            base_prefix,
        });
    }
    Ok(())
}

/// Check that `subnet_count` equal subnets fit into `/base_prefix` while each
/// keeps at least [`MIN_HOST_BITS`] host bits. Returns the borrowed bit count.
pub fn validate_equal_split(base_prefix: u8, subnet_count: u32) -> Result<u8, VlsmError> {
    if base_prefix > MAX_LENGTH {
        return Err(VlsmError::InvalidPrefix(base_prefix.to_string()));
    }
    if subnet_count == 0 {
        return Err(VlsmError::InvalidSubnetCount(subnet_count.to_string()));
    }
    let borrowed_bits = subnet_count
        .checked_next_power_of_two()
        .map_or(MAX_LENGTH, |n| n.trailing_zeros() as u8);
    if base_prefix + borrowed_bits > MAX_LENGTH - MIN_HOST_BITS {
        return Err(VlsmError::InsufficientHostBits {
            subnet_count,
            base_prefix,
        });
    }
    log::debug!("validate_equal_split /{base_prefix} x{subnet_count}: borrow {borrowed_bits} bits");
    Ok(borrowed_bits)
}

/// Parse a subnet count typed by a user.
pub fn parse_subnet_count(text: &str) -> Result<u32, VlsmError> {
    match text.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(VlsmError::InvalidSubnetCount(text.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(hosts: &[u32]) -> Vec<SubnetRequirement> {
        hosts
            .iter()
            .enumerate()
            .map(|(i, h)| {
                SubnetRequirement::new((i + 1).to_string(), format!("Subnet {}", i + 1), *h)
            })
            .collect()
    }

    #[test]
    fn test_host_bits_needed() {
        assert_eq!(host_bits_needed(1), 2);
        assert_eq!(host_bits_needed(2), 2);
        assert_eq!(host_bits_needed(3), 3);
        assert_eq!(host_bits_needed(6), 3);
        assert_eq!(host_bits_needed(62), 6);
        assert_eq!(host_bits_needed(63), 7);
        assert_eq!(host_bits_needed(100), 7);
    }

    #[test]
    fn test_actual_subnet_size() {
        assert_eq!(actual_subnet_size(1), 2);
        assert_eq!(actual_subnet_size(10), 14);
        assert_eq!(actual_subnet_size(50), 62);
        assert_eq!(actual_subnet_size(126), 126);
        assert_eq!(actual_subnet_size(127), 254);
    }

    #[test]
    fn test_validate_vlsm_ok() {
        assert!(validate_vlsm(24, &reqs(&[100, 50, 20])).is_ok());
        assert!(validate_vlsm(24, &reqs(&[126, 126])).is_ok());
        assert!(validate_vlsm(30, &reqs(&[2])).is_ok());
    }

    #[test]
    fn test_validate_vlsm_capacity() {
        assert_eq!(
            validate_vlsm(30, &reqs(&[10])).unwrap_err(),
            VlsmError::CapacityExceeded {
                total_needed: 14,
                available: 2,
                base_prefix: 30
            }
        );
        assert!(validate_vlsm(24, &reqs(&[200, 100])).is_err());
        assert!(validate_vlsm(32, &reqs(&[1])).is_err());
    }

    #[test]
    fn test_validate_vlsm_block_overflow() {
        // 4 x 62 + 2 = 250 usable fits 254, but 4 x 64 + 4 = 260 addresses does not fit 256
        let err = validate_vlsm(24, &reqs(&[60, 60, 60, 60, 2])).unwrap_err();
        assert_eq!(
            err,
            VlsmError::BlockOverflow {
                total_addresses: 260,
                available_addresses: 256,
                base_prefix: 24
            }
        );
        assert_eq!(
            err.to_string(),
            "subnet blocks need 260 addresses but /24 only has 256"
        );
        // exactly filling the base network is fine
        assert!(validate_vlsm(24, &reqs(&[60, 60, 60, 60])).is_ok());
    }

    #[test]
    fn test_validate_vlsm_invalid() {
        assert_eq!(
            validate_vlsm(24, &reqs(&[10, 0])).unwrap_err(),
            VlsmError::InvalidRequirement {
                name: "Subnet 2".to_string()
            }
        );
        assert!(validate_vlsm(24, &[]).is_err());
        assert!(validate_vlsm(33, &reqs(&[1])).is_err());
    }

    #[test]
    fn test_validate_equal_split() {
        assert_eq!(validate_equal_split(24, 4).unwrap(), 2);
        assert_eq!(validate_equal_split(24, 5).unwrap(), 3);
        assert_eq!(validate_equal_split(24, 1).unwrap(), 0);
        assert_eq!(validate_equal_split(24, 64).unwrap(), 6);
        assert_eq!(
            validate_equal_split(24, 65).unwrap_err(),
            VlsmError::InsufficientHostBits {
                subnet_count: 65,
                base_prefix: 24
            }
        );
        assert!(validate_equal_split(31, 1).is_err());
        assert!(validate_equal_split(24, 0).is_err());
    }

    #[test]
    fn test_parse_subnet_count() {
        assert_eq!(parse_subnet_count(" 4 ").unwrap(), 4);
        assert!(parse_subnet_count("0").is_err());
        assert!(parse_subnet_count("-3").is_err());
        assert!(parse_subnet_count("four").is_err());
    }
}
