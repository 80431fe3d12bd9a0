//! Subnet requirement and allocation records.

use super::{Cidr, NetworkFacts};
use serde::{Deserialize, Serialize};

/// A caller's request for one VLSM subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRequirement {
    pub id: String,
    pub name: String,
    pub required_hosts: u32,
}

impl SubnetRequirement {
    pub fn new(id: impl Into<String>, name: impl Into<String>, required_hosts: u32) -> Self {
        SubnetRequirement {
            id: id.into(),
            name: name.into(),
            required_hosts,
        }
    }
}

/// A subnet placed by one of the allocators.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AllocatedSubnet {
    /// Requirement id, or the 1-based index for equal-split subnets.
    pub id: String,
    pub name: String,
    pub required_hosts: u64,
    /// Usable hosts actually granted (block size minus network and broadcast).
    pub allocated_hosts: u64,
    /// Bits borrowed relative to the base prefix.
    pub borrowed_bits: u8,
    /// 1-based position, set for equal-split subnets only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(flatten)]
    pub facts: NetworkFacts,
}

impl AllocatedSubnet {
    pub fn cidr(&self) -> Cidr {
        Cidr {
            addr: self.facts.network_address,
            mask: self.facts.prefix,
        }
    }

    /// Usable addresses granted beyond what was asked for.
    pub fn wasted_hosts(&self) -> u64 {
        self.allocated_hosts.saturating_sub(self.required_hosts)
    }
}
