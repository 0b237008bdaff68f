//! Network allow-lists: the IP (`/ip-address`) and MAC (`/mac-address`)
//! addresses staff may sign in from. Both lists share one record shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ip,
    Mac,
}

impl AddressKind {
    /// Path segment of the collection under the API base
    pub fn resource(&self) -> &'static str {
        match self {
            AddressKind::Ip => "ip-address",
            AddressKind::Mac => "mac-address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddressKind::Ip => "IP address",
            AddressKind::Mac => "MAC address",
        }
    }

    /// Canonical form of an address of this kind
    pub fn normalize(&self, address: &str) -> Result<String> {
        let address = address.trim();
        match self {
            AddressKind::Ip => normalize_ip(address),
            AddressKind::Mac => normalize_mac(address),
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedAddress {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInput {
    pub name: String,
    pub address: String,
    pub created_by: String,
}

impl AddressInput {
    pub fn new(kind: AddressKind, name: &str, address: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::field_error("name", "Name is required"));
        }
        if address.trim().is_empty() {
            return Err(Error::field_error("address", format!("{} is required", kind.label())));
        }

        Ok(Self {
            name: name.to_string(),
            address: kind.normalize(address)?,
            created_by: String::new(),
        })
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }
}

/// A single address or a CIDR block
fn normalize_ip(address: &str) -> Result<String> {
    let invalid = || Error::field_error("address", format!("'{}' is not a valid IP address", address));

    match address.split_once('/') {
        None => Ok(IpAddr::from_str(address).map_err(|_| invalid())?.to_string()),
        Some((ip, prefix)) => {
            let ip = IpAddr::from_str(ip).map_err(|_| invalid())?;
            let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
            let max = if ip.is_ipv4() { 32 } else { 128 };
            if prefix > max {
                return Err(invalid());
            }
            Ok(format!("{}/{}", ip, prefix))
        }
    }
}

/// Accepts `aa:bb:..`, `aa-bb-..`, `aabb.ccdd.eeff` or bare hex; returns
/// upper-case colon-separated octets
fn normalize_mac(address: &str) -> Result<String> {
    let digits: String = address
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect();

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::field_error(
            "address",
            format!("'{}' is not a valid MAC address", address),
        ));
    }

    let upper = digits.to_ascii_uppercase();
    let octets: Vec<&str> = (0..12).step_by(2).map(|i| &upper[i..i + 2]).collect();
    Ok(octets.join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_forms() {
        assert_eq!(AddressKind::Ip.normalize(" 10.0.0.7 ").unwrap(), "10.0.0.7");
        assert_eq!(AddressKind::Ip.normalize("192.168.1.0/24").unwrap(), "192.168.1.0/24");
        assert_eq!(AddressKind::Ip.normalize("2001:DB8::1").unwrap(), "2001:db8::1");
        assert!(AddressKind::Ip.normalize("10.0.0.0/33").is_err());
        assert!(AddressKind::Ip.normalize("300.1.1.1").is_err());
    }

    #[test]
    fn test_mac_forms() {
        assert_eq!(AddressKind::Mac.normalize("aa-bb-cc-dd-ee-0f").unwrap(), "AA:BB:CC:DD:EE:0F");
        assert_eq!(AddressKind::Mac.normalize("aabb.ccdd.ee0f").unwrap(), "AA:BB:CC:DD:EE:0F");
        assert!(AddressKind::Mac.normalize("aa:bb:cc").is_err());
        assert!(AddressKind::Mac.normalize("zz:bb:cc:dd:ee:ff").is_err());
    }

    #[test]
    fn test_input_requires_name_and_address() {
        let err = AddressInput::new(AddressKind::Ip, " ", "10.0.0.1").unwrap_err();
        assert!(matches!(err, Error::FieldErrors { ref field_errors, .. } if field_errors.contains_key("name")));

        let err = AddressInput::new(AddressKind::Mac, "Front desk", "").unwrap_err();
        assert_eq!(err.to_string(), "MAC address is required");

        let input = AddressInput::new(AddressKind::Ip, "Office", "10.0.0.1")
            .unwrap()
            .with_created_by("u1");
        assert_eq!(input.created_by, "u1");
    }
}
