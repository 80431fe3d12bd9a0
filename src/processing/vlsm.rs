//! Variable length subnet allocation.
//!
//! Requirements are placed largest first against a cursor that only moves
//! forward, so every block starts on a boundary of its own size.

use super::validate::host_bits_needed;
use crate::models::{
    block_size, compute_facts, network_addr, AllocatedSubnet, SubnetRequirement, MAX_LENGTH,
};
use itertools::Itertools;
use std::cmp::Reverse;
use std::net::Ipv4Addr;

/// Allocate right-sized subnets for `requirements` inside `base/base_prefix`.
///
/// The result is ordered by required hosts, descending; requirements with equal
/// host counts keep their input order. Input must have passed
/// [`super::validate_vlsm`].
pub fn allocate(
    base: Ipv4Addr,
    base_prefix: u8,
    requirements: &[SubnetRequirement],
) -> Vec<AllocatedSubnet> {
    let base_network = network_addr(base, base_prefix.min(MAX_LENGTH)).unwrap_or(base);
    let base_end = u32::from(base_network) as u64 + block_size(base_prefix);
    let mut cursor = u32::from(base_network) as u64;

    log::info!(
        "allocate {} subnets in {base_network}/{base_prefix}",
        requirements.len()
    );

    let mut subnets = Vec::with_capacity(requirements.len());
    for req in requirements
        .iter()
        .sorted_by_key(|r| Reverse(r.required_hosts))
    {
        let bits_needed = host_bits_needed(req.required_hosts as u64);
        let subnet_prefix = MAX_LENGTH - bits_needed;
        let size = 1u64 << bits_needed;
        debug_assert!(
            cursor + size <= base_end,
            "subnet '{}' overflows {base_network}/{base_prefix}, requirements were not validated",
            req.name
        );

        // facts for a /subnet_prefix block always succeed
        let Ok(facts) = compute_facts(Ipv4Addr::from(cursor as u32), subnet_prefix, None) else {
            break;
        };
        log::debug!(
            "  {name:>12} needs {hosts:>6} -> {net}/{subnet_prefix}",
            name = req.name,
            hosts = req.required_hosts,
            net = facts.network_address
        );

        subnets.push(AllocatedSubnet {
            id: req.id.clone(),
            name: req.name.clone(),
            required_hosts: req.required_hosts as u64,
            allocated_hosts: size - 2,
            borrowed_bits: subnet_prefix.saturating_sub(base_prefix),
            position: None,
            facts,
        });

        cursor += size;
    }
    subnets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(hosts: &[u32]) -> Vec<SubnetRequirement> {
        hosts
            .iter()
            .enumerate()
            .map(|(i, h)| SubnetRequirement::new((i + 1).to_string(), format!("net{}", i + 1), *h))
            .collect()
    }

    #[test]
    fn test_allocate_scenario() {
        let result = allocate(Ipv4Addr::new(192, 168, 1, 0), 24, &reqs(&[100, 50, 20]));
        assert_eq!(result.len(), 3);

        assert_eq!(result[0].cidr().to_string(), "192.168.1.0/25");
        assert_eq!(result[0].allocated_hosts, 126);
        assert_eq!(result[0].facts.broadcast_address, Ipv4Addr::new(192, 168, 1, 127));
        assert_eq!(result[0].borrowed_bits, 1);

        assert_eq!(result[1].cidr().to_string(), "192.168.1.128/26");
        assert_eq!(result[1].allocated_hosts, 62);
        assert_eq!(result[1].facts.broadcast_address, Ipv4Addr::new(192, 168, 1, 191));

        assert_eq!(result[2].cidr().to_string(), "192.168.1.192/27");
        assert_eq!(result[2].allocated_hosts, 30);
        assert_eq!(result[2].facts.broadcast_address, Ipv4Addr::new(192, 168, 1, 223));
        assert_eq!(result[2].wasted_hosts(), 10);
        assert!(result.iter().all(|s| s.position.is_none()));
    }

    #[test]
    fn test_allocate_sorts_descending_stable() {
        let result = allocate(Ipv4Addr::new(10, 0, 0, 0), 24, &reqs(&[10, 60, 10, 30]));
        let order: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["net2", "net4", "net1", "net3"]);
        assert_eq!(result[2].cidr().to_string(), "10.0.0.96/28");
        assert_eq!(result[3].cidr().to_string(), "10.0.0.112/28");
    }

    #[test]
    fn test_allocate_uses_network_of_base() {
        let result = allocate(Ipv4Addr::new(172, 16, 5, 77), 16, &reqs(&[1000]));
        assert_eq!(result[0].cidr().to_string(), "172.16.0.0/22");
        assert_eq!(result[0].allocated_hosts, 1022);
        assert_eq!(result[0].borrowed_bits, 6);
        assert_eq!(result[0].facts.first_usable, Some(Ipv4Addr::new(172, 16, 0, 1)));
        assert_eq!(result[0].facts.last_usable, Some(Ipv4Addr::new(172, 16, 3, 254)));
    }

    #[test]
    fn test_allocate_fills_to_top_of_space() {
        let result = allocate(Ipv4Addr::new(255, 255, 255, 0), 24, &reqs(&[126, 126]));
        assert_eq!(result[1].facts.broadcast_address, Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_allocate_no_overlap() {
        let result = allocate(Ipv4Addr::new(10, 20, 0, 0), 20, &reqs(&[300, 5, 120, 1, 17, 60, 2]));
        for s in &result {
            assert!(s.allocated_hosts >= s.required_hosts);
            assert_eq!(s.allocated_hosts, (1u64 << host_bits_needed(s.required_hosts)) - 2);
        }
        for (a, b) in result.iter().tuple_windows() {
            assert!(a.facts.broadcast_address < b.facts.network_address);
        }
    }
}
