//! Pool identity.
//!
//! A `PoolId` names a pool inside an address space, optionally narrowed to a
//! child subnet carved from it. Its string form is the persisted contract:
//!
//! ```text
//! <space>/<addr>/<bits>
//! <space>/<addr>/<bits>/<child addr>/<child bits>
//! ```

use crate::error::{IpamError, Result};
use crate::prefix;
use ipnet::IpNet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Composite key of a pool within an address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetKey {
    /// Top-level registered subnet.
    pub subnet: IpNet,
    /// Child subnet carved from `subnet`, if any.
    pub child_subnet: Option<IpNet>,
}

impl SubnetKey {
    pub fn new(subnet: IpNet) -> Self {
        Self {
            subnet,
            child_subnet: None,
        }
    }

    pub fn is_6(&self) -> bool {
        prefix::is_6(&self.subnet)
    }
}

/// Identifier of a pool (or a child of a pool) in an address space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolId {
    pub address_space: String,
    pub key: SubnetKey,
}

impl PoolId {
    pub fn new(address_space: impl Into<String>, subnet: IpNet) -> Self {
        Self {
            address_space: address_space.into(),
            key: SubnetKey::new(subnet),
        }
    }

    pub fn with_child(address_space: impl Into<String>, subnet: IpNet, child: IpNet) -> Self {
        Self {
            address_space: address_space.into(),
            key: SubnetKey {
                subnet,
                child_subnet: Some(child),
            },
        }
    }

    pub fn subnet(&self) -> IpNet {
        self.key.subnet
    }

    pub fn child_subnet(&self) -> Option<IpNet> {
        self.key.child_subnet
    }

    pub fn is_6(&self) -> bool {
        self.key.is_6()
    }

    /// Identifier of the top-level pool, without the child subnet.
    pub fn parent(&self) -> PoolId {
        PoolId::new(self.address_space.clone(), self.key.subnet)
    }
}

fn invalid(s: &str) -> IpamError {
    IpamError::InvalidFormat(s.to_string())
}

impl FromStr for PoolId {
    type Err = IpamError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(invalid(s));
        }

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 && parts.len() != 5 {
            return Err(invalid(s));
        }

        let parse_pair = |addr: &str, bits: &str| -> Result<IpNet> {
            format!("{}/{}", addr, bits)
                .parse::<IpNet>()
                .map_err(|_| invalid(s))
        };

        let subnet = parse_pair(parts[1], parts[2])?;
        let child_subnet = if parts.len() == 5 {
            Some(parse_pair(parts[3], parts[4])?)
        } else {
            None
        };

        Ok(Self {
            address_space: parts[0].to_string(),
            key: SubnetKey {
                subnet,
                child_subnet,
            },
        })
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key.child_subnet {
            None => write!(f, "{}/{}", self.address_space, self.key.subnet),
            Some(child) => write!(f, "{}/{}/{}", self.address_space, self.key.subnet, child),
        }
    }
}

impl Serialize for PoolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PoolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
