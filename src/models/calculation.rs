//! Calculation inputs, results and history records.

use super::{AllocatedSubnet, NetworkFacts, SubnetRequirement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Which allocator a calculation used.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Vlsm,
    Subnetting,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Vlsm => write!(f, "vlsm"),
            Mode::Subnetting => write!(f, "subnetting"),
        }
    }
}

/// Mode specific part of a calculation input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Request {
    Vlsm { requirements: Vec<SubnetRequirement> },
    Subnetting { subnet_count: u32 },
}

/// Everything a calculation needs, already parsed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalculationInput {
    pub address: Ipv4Addr,
    pub prefix: u8,
    #[serde(flatten)]
    pub request: Request,
}

impl CalculationInput {
    pub fn vlsm(address: Ipv4Addr, prefix: u8, requirements: Vec<SubnetRequirement>) -> Self {
        CalculationInput {
            address,
            prefix,
            request: Request::Vlsm { requirements },
        }
    }

    pub fn subnetting(address: Ipv4Addr, prefix: u8, subnet_count: u32) -> Self {
        CalculationInput {
            address,
            prefix,
            request: Request::Subnetting { subnet_count },
        }
    }

    pub fn mode(&self) -> Mode {
        match self.request {
            Request::Vlsm { .. } => Mode::Vlsm,
            Request::Subnetting { .. } => Mode::Subnetting,
        }
    }
}

/// Base network fact sheet plus the ordered allocated subnets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub facts: NetworkFacts,
    pub subnets: Vec<AllocatedSubnet>,
}

/// One entry of the calculation history.
///
/// Stored verbatim: the subnet list is never recomputed on reload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalculationRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub input: CalculationInput,
    pub facts: NetworkFacts,
    pub subnets: Vec<AllocatedSubnet>,
}

impl CalculationRecord {
    pub fn new(input: CalculationInput, calculation: Calculation) -> Self {
        CalculationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            input,
            facts: calculation.facts,
            subnets: calculation.subnets,
        }
    }

    pub fn mode(&self) -> Mode {
        self.input.mode()
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{} [{}] {} subnets",
            self.id,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.input.address,
            self.input.prefix,
            self.mode(),
            self.subnets.len()
        )
    }
}
