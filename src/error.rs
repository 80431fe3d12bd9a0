//! Error values surfaced by the calculation engine.
//!
//! All of these are recoverable: they describe input that is malformed or
//! infeasible, and the presentation layer decides how to show them.

use thiserror::Error;

/// Why a subnet-position range was rejected by [`crate::processing::search_range`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeProblem {
    #[error("subnet numbers must be positive")]
    NonPositive,
    #[error("subnet numbers must be between 1 and {count}")]
    OutOfBounds { count: usize },
    #[error("start subnet must be less than or equal to end subnet")]
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlsmError {
    #[error("invalid IPv4 address: '{0}'")]
    InvalidAddress(String),

    #[error("invalid prefix length: '{0}' (expected 0-32)")]
    InvalidPrefix(String),

    #[error("subnet '{name}' must require at least 1 host")]
    InvalidRequirement { name: String },

    #[error("invalid number of subnets: '{0}'")]
    InvalidSubnetCount(String),

    #[error(
        "total subnet size ({total_needed}) exceeds available hosts ({available}) for /{base_prefix} prefix"
    )]
    CapacityExceeded {
        total_needed: u64,
        available: i64,
        base_prefix: u8,
    },

    #[error(
        "subnet blocks need {total_addresses} addresses but /{base_prefix} only has {available_addresses}"
    )]
    BlockOverflow {
        total_addresses: u64,
        available_addresses: u64,
        base_prefix: u8,
    },

    #[error("cannot create {subnet_count} subnets with /{base_prefix} prefix, not enough host bits")]
    InsufficientHostBits { subnet_count: u32, base_prefix: u8 },

    #[error("invalid subnet range {start}..{end}: {problem}")]
    SearchRangeInvalid {
        start: i64,
        end: i64,
        problem: RangeProblem,
    },

    #[error("no feasible scenario generated after {attempts} attempts")]
    ScenarioExhausted { attempts: usize },

    #[error("history error: {0}")]
    History(String),
}
