//! Derived addressing facts for a network block.

use super::ipv4::{
    block_size, broadcast_addr, mask_for_prefix, network_addr, to_binary, MAX_LENGTH,
};
use crate::error::VlsmError;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Facts that only exist when bits are borrowed from the host portion.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowFacts {
    /// Address step between consecutive subnets, within the boundary octet.
    pub subnet_increment: u32,
    /// Bits borrowed from the host portion.
    pub subnet_bits: u8,
    /// Host bits left in each subnet.
    pub host_bits: u8,
    /// Number of subnets the borrowed bits can address.
    pub total_subnets: u64,
}

/// Addressing facts for one block, derived from (address, prefix[, borrowed bits]).
///
/// `first_usable` and `last_usable` are `None` for /31 and /32 blocks, which
/// have no room for hosts once network and broadcast are reserved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkFacts {
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub first_usable: Option<Ipv4Addr>,
    pub last_usable: Option<Ipv4Addr>,
    pub subnet_mask: Ipv4Addr,
    pub prefix: u8,
    pub total_ips: u64,
    /// Octet increment; undefined when the prefix sits on an octet boundary.
    pub delta: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrow: Option<BorrowFacts>,
}

impl NetworkFacts {
    /// Addresses left for hosts once network and broadcast are reserved.
    pub fn usable_hosts(&self) -> u64 {
        self.total_ips.saturating_sub(2)
    }

    /// Subnet mask in dotted binary form.
    pub fn subnet_mask_binary(&self) -> String {
        to_binary(self.subnet_mask)
    }
}

/// Compute the facts for `address/prefix`, optionally with `borrowed_bits`
/// taken from the host portion.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use vlsm_calculator::models::compute_facts;
/// let facts = compute_facts(Ipv4Addr::new(192, 168, 1, 1), 26, None).unwrap();
/// assert_eq!(facts.delta, Some(64));
/// assert_eq!(facts.network_address, Ipv4Addr::new(192, 168, 1, 0));
/// ```
pub fn compute_facts(
    address: Ipv4Addr,
    prefix: u8,
    borrowed_bits: Option<u8>,
) -> Result<NetworkFacts, VlsmError> {
    let network_address = network_addr(address, prefix)?;
    let broadcast_address = broadcast_addr(address, prefix)?;

    let (first_usable, last_usable) = if prefix >= MAX_LENGTH - 1 {
        (None, None)
    } else {
        (
            Some(Ipv4Addr::from(u32::from(network_address) + 1)),
            Some(Ipv4Addr::from(u32::from(broadcast_address) - 1)),
        )
    };

    let borrow = match borrowed_bits {
        Some(bits) => {
            let subnet_prefix = prefix
                .checked_add(bits)
                .filter(|p| *p <= MAX_LENGTH)
                .ok_or_else(|| VlsmError::InvalidPrefix(format!("{prefix}+{bits}")))?;
            Some(BorrowFacts {
                subnet_increment: compute_increment(subnet_prefix),
                subnet_bits: bits,
                host_bits: MAX_LENGTH - subnet_prefix,
                total_subnets: 1u64 << bits,
            })
        }
        None => None,
    };

    let facts = NetworkFacts {
        network_address,
        broadcast_address,
        first_usable,
        last_usable,
        subnet_mask: mask_for_prefix(prefix)?,
        prefix,
        total_ips: block_size(prefix),
        delta: compute_delta(prefix),
        borrow,
    };
    log::trace!("compute_facts({address}/{prefix}, {borrowed_bits:?}) => {facts:?}");
    Ok(facts)
}

/// Octet increment for a prefix: `2^(boundary - prefix)` where boundary is the
/// next octet boundary above the prefix. Undefined on 0, 8, 16, 24 and 32.
pub fn compute_delta(prefix: u8) -> Option<u32> {
    if prefix % 8 == 0 || prefix > MAX_LENGTH {
        None
    } else {
        let boundary = (prefix / 8 + 1) * 8;
        Some(1u32 << (boundary - prefix))
    }
}

/// Like [`compute_delta`], but defined on octet boundaries as well: a prefix
/// that ends an octet steps by 1 in that octet, /0 steps by 256.
pub fn compute_increment(prefix: u8) -> u32 {
    let boundary = match prefix {
        0..=8 => 8,
        9..=16 => 16,
        17..=24 => 24,
        _ => 32,
    };
    1u32 << (boundary - prefix.min(boundary))
}
