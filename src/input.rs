//! Parsing of subnet requirements typed on the command line.

use crate::error::VlsmError;
use crate::models::SubnetRequirement;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REQ_RE: Regex =
        Regex::new(r"^\s*(?:(?P<name>[^:=]*[^:=\s])\s*[:=]\s*)?(?P<hosts>[+-]?\d+)\s*$")
            .expect("Invalid Regex?");
}

/// Parse one requirement, `hosts` or `name:hosts` (`name=hosts` also works).
///
/// Unnamed requirements are called `Subnet {index}`; `index` is 1-based and
/// also becomes the id.
pub fn parse_requirement(text: &str, index: usize) -> Result<SubnetRequirement, VlsmError> {
    let caps = REQ_RE
        .captures(text)
        .ok_or_else(|| VlsmError::InvalidRequirement {
            name: text.to_string(),
        })?;
    let name = caps
        .name("name")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| format!("Subnet {index}"));
    log::trace!("parse_requirement({text}) name={name}");

    let hosts: i64 = caps["hosts"]
        .parse()
        .map_err(|_| VlsmError::InvalidRequirement { name: name.clone() })?;
    let required_hosts = u32::try_from(hosts)
        .ok()
        .filter(|h| *h > 0)
        .ok_or_else(|| VlsmError::InvalidRequirement { name: name.clone() })?;

    Ok(SubnetRequirement::new(index.to_string(), name, required_hosts))
}

/// Parse a list of requirements, numbering them from 1.
pub fn parse_requirements<S: AsRef<str>>(items: &[S]) -> Result<Vec<SubnetRequirement>, VlsmError> {
    items
        .iter()
        .enumerate()
        .map(|(i, s)| parse_requirement(s.as_ref(), i + 1))
        .collect()
}
