//! IPv4 address codec and CIDR notation utilities.
//!
//! Converts between dotted-decimal text and [`Ipv4Addr`], derives masks from
//! prefix lengths, and provides the [`Cidr`] value used for display.

use crate::error::VlsmError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Parse dotted-decimal text into an [`Ipv4Addr`].
///
/// Every part must be a non-empty run of decimal digits in `0..=255`, and there
/// must be exactly four parts. Leading zeros are tolerated (`"010"` is 10).
///
/// # Examples
/// ```
/// use vlsm_calculator::models::parse_address;
/// assert_eq!(parse_address("192.168.1.1").unwrap(), std::net::Ipv4Addr::new(192, 168, 1, 1));
/// assert!(parse_address("192.168.1").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr, VlsmError> {
    let parts: Vec<&str> = text.trim().split('.').collect();
    if parts.len() != 4 {
        return Err(VlsmError::InvalidAddress(text.to_string()));
    }
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        octets[i] = parse_octet(part).ok_or_else(|| VlsmError::InvalidAddress(text.to_string()))?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Parse the four octet fields of an address form.
pub fn parse_octets(parts: [&str; 4]) -> Result<Ipv4Addr, VlsmError> {
    let mut octets = [0u8; 4];
    for (i, part) in parts.iter().enumerate() {
        octets[i] = parse_octet(part.trim())
            .ok_or_else(|| VlsmError::InvalidAddress(parts.join(".")))?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_octet(part: &str) -> Option<u8> {
    // str::parse accepts a leading '+', an address octet must not
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u32>().ok().and_then(|v| u8::try_from(v).ok())
}

/// Canonical dotted-decimal text for an address.
pub fn format_address(addr: Ipv4Addr) -> String {
    addr.to_string()
}

/// Parse a prefix length from text, accepting `0..=32`.
pub fn parse_prefix(text: &str) -> Result<u8, VlsmError> {
    let text = text.trim().trim_start_matches('/');
    match text.parse::<u8>() {
        Ok(len) if len <= MAX_LENGTH => Ok(len),
        _ => Err(VlsmError::InvalidPrefix(text.to_string())),
    }
}

/// Convert a prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use vlsm_calculator::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, VlsmError> {
    if len > MAX_LENGTH {
        Err(VlsmError::InvalidPrefix(len.to_string()))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Subnet mask for a prefix length, e.g. `/26` is `255.255.255.192`.
pub fn mask_for_prefix(len: u8) -> Result<Ipv4Addr, VlsmError> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Dotted binary form of an address, e.g. `11111111.11111111.11111111.11000000`.
pub fn to_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|o| format!("{o:08b}"))
        .collect::<Vec<String>>()
        .join(".")
}

/// Network address: `addr` with the low `32 - len` bits cleared.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, VlsmError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Broadcast address: `addr` with the low `32 - len` bits set.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, VlsmError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// IPv4 network in CIDR notation (`a.b.c.d/p`).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl Cidr {
    /// Create a new [`Cidr`] from a string such as `"10.0.0.0/24"`.
    pub fn new(addr_cidr: &str) -> Result<Cidr, VlsmError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| VlsmError::InvalidPrefix(addr_cidr.to_string()))?;
        Ok(Cidr {
            addr: parse_address(addr)?,
            mask: parse_prefix(mask)?,
        })
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask_bits())
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask_bits())
    }

    /// Check if an address lies within this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    fn mask_bits(&self) -> u32 {
        // mask is range checked on construction; clamp for hand-built values
        get_cidr_mask(self.mask.min(MAX_LENGTH)).unwrap_or(u32::MAX)
    }
}

impl FromStr for Cidr {
    type Err = VlsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cidr::new(s)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
