//! Equal sized subnetting by borrowed bits.

use crate::models::{compute_facts, network_addr, AllocatedSubnet, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Split `base/base_prefix` into `2^borrowed_bits` equal subnets.
///
/// `borrowed_bits` comes from [`super::validate_equal_split`]; when
/// `subnet_count` is not a power of two the surplus subnets are still returned.
/// Subnet `i` has the borrowed region set to `i` and carries position `i + 1`.
pub fn allocate_equal(
    base: Ipv4Addr,
    base_prefix: u8,
    subnet_count: u32,
    borrowed_bits: u8,
) -> Vec<AllocatedSubnet> {
    let subnet_prefix = base_prefix + borrowed_bits;
    let host_bits = MAX_LENGTH.saturating_sub(subnet_prefix);
    let base_network = network_addr(base, base_prefix.min(MAX_LENGTH)).unwrap_or(base);
    let actual_count = 1u64 << borrowed_bits;
    let usable = (1u64 << host_bits).saturating_sub(2);

    log::info!(
        "allocate_equal {base_network}/{base_prefix}: asked {subnet_count}, creating {actual_count} x /{subnet_prefix}"
    );

    let mut subnets = Vec::with_capacity(actual_count as usize);
    for i in 0..actual_count {
        let network = u32::from(base_network) as u64 | (i << host_bits);
        let Ok(facts) = compute_facts(Ipv4Addr::from(network as u32), subnet_prefix, None) else {
            log::error!("allocate_equal: /{subnet_prefix} is not a valid prefix");
            break;
        };
        let position = i as u32 + 1;
        log::trace!("  subnet {position} -> {}/{subnet_prefix}", facts.network_address);
        subnets.push(AllocatedSubnet {
            id: position.to_string(),
            name: format!("Subnet {position}"),
            required_hosts: usable,
            allocated_hosts: usable,
            borrowed_bits,
            position: Some(position),
            facts,
        });
    }
    subnets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::validate_equal_split;
    use itertools::Itertools;

    #[test]
    fn test_allocate_equal_scenario() {
        let bits = validate_equal_split(24, 4).unwrap();
        assert_eq!(bits, 2);
        let result = allocate_equal(Ipv4Addr::new(10, 0, 0, 0), 24, 4, bits);
        let cidrs: Vec<String> = result.iter().map(|s| s.cidr().to_string()).collect();
        assert_eq!(
            cidrs,
            vec!["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]
        );
        assert_eq!(result[3].position, Some(4));
        assert_eq!(result[3].name, "Subnet 4");
        assert_eq!(result[3].required_hosts, 62);
        assert_eq!(result[3].allocated_hosts, 62);
        assert_eq!(result[3].wasted_hosts(), 0);
    }

    #[test]
    fn test_allocate_equal_rounds_up() {
        let bits = validate_equal_split(16, 5).unwrap();
        let result = allocate_equal(Ipv4Addr::new(172, 20, 9, 9), 16, 5, bits);
        assert_eq!(result.len(), 8);
        assert_eq!(result[7].name, "Subnet 8");
        assert_eq!(result[1].cidr().to_string(), "172.20.32.0/19");
        assert_eq!(result[1].facts.delta, Some(32));
    }

    #[test]
    fn test_allocate_equal_tiles_base() {
        let base = Ipv4Addr::new(192, 168, 64, 0);
        let bits = validate_equal_split(18, 100).unwrap();
        let result = allocate_equal(base, 18, 100, bits);
        assert_eq!(result.len(), 1 << bits);
        assert_eq!(result[0].facts.network_address, base);
        assert_eq!(
            result.last().unwrap().facts.broadcast_address,
            Ipv4Addr::new(192, 168, 127, 255)
        );
        let size = 1u64 << (32 - 18 - bits);
        assert!(result.iter().all(|s| s.facts.total_ips == size));
        for (a, b) in result.iter().tuple_windows() {
            assert_eq!(
                u32::from(a.facts.broadcast_address) + 1,
                u32::from(b.facts.network_address)
            );
        }
    }

    #[test]
    fn test_allocate_equal_single() {
        let result = allocate_equal(Ipv4Addr::new(10, 1, 2, 3), 24, 1, 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].cidr().to_string(), "10.1.2.0/24");
        assert_eq!(result[0].borrowed_bits, 0);
    }
}
