//! Application constants and environment overrides.

/// Most recent calculations kept in the history log.
pub const MAX_HISTORY_ITEMS: usize = 10;
/// History file used when `VLSM_HISTORY_FILE` is not set.
pub const DEFAULT_HISTORY_FILE: &str = "vlsm_history.json";
pub const HISTORY_FILE_ENV: &str = "VLSM_HISTORY_FILE";

/// Equal-split never produces a subnet with fewer host bits than this.
pub const MIN_HOST_BITS: u8 = 2;

// Scenario generator ranges
pub const SCENARIO_FIRST_OCTET: (u8, u8) = (1, 223);
pub const SCENARIO_PREFIX: (u8, u8) = (16, 28);
pub const SCENARIO_MAX_BORROWED_BITS: u8 = 8;
pub const SCENARIO_MAX_SUBNET_COUNT: u32 = 16;
pub const SCENARIO_MAX_ATTEMPTS: usize = 64;

/// History file path, `VLSM_HISTORY_FILE` (also read from `.env`) wins over the default.
pub fn history_file() -> String {
    std::env::var(HISTORY_FILE_ENV).unwrap_or_else(|_| DEFAULT_HISTORY_FILE.to_string())
}
