//! Address tracking within a single subnet.
//!
//! `AddrTracker` is the contract a pool uses to select and release
//! individual addresses. `AddrSet` is the in-memory implementation: it keeps
//! the offsets of selected addresses in an ordered set, so it works for any
//! prefix length including `::/0`.

use crate::capacity::{subnet_capacity, Capacity};
use crate::error::{IpamError, Result};
use crate::prefix::{addr_bits, addr_from_bits, is_6};
use ipnet::IpNet;
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Tracks which addresses of one subnet are selected.
///
/// Each address is handed out at most once until it is deselected.
pub trait AddrTracker: fmt::Debug + Send + Sync {
    /// The tracked prefix.
    fn pool(&self) -> IpNet;

    /// Number of addresses not yet selected, saturated to `u64::MAX`.
    fn unselected(&self) -> u64;

    /// Number of selected addresses.
    fn selected(&self) -> u64;

    /// Select a specific address.
    fn select(&mut self, addr: IpAddr) -> Result<()>;

    /// Select the lowest unselected address.
    fn select_next(&mut self) -> Result<IpAddr>;

    /// Return a selected address.
    fn deselect(&mut self, addr: IpAddr) -> Result<()>;
}

/// Ordered-set address tracker.
#[derive(Debug, Clone)]
pub struct AddrSet {
    pool: IpNet,
    /// Offsets from the network address.
    selected: BTreeSet<u128>,
}

impl AddrSet {
    pub fn new(pool: IpNet) -> Self {
        Self {
            pool: pool.trunc(),
            selected: BTreeSet::new(),
        }
    }

    fn offset(&self, addr: IpAddr) -> Result<u128> {
        if !self.pool.contains(&addr) {
            return Err(IpamError::AddressOutOfRange {
                pool: self.pool.to_string(),
                addr: addr.to_string(),
            });
        }
        Ok(addr_bits(addr) - addr_bits(self.pool.network()))
    }
}

impl AddrTracker for AddrSet {
    fn pool(&self) -> IpNet {
        self.pool
    }

    fn unselected(&self) -> u64 {
        subnet_capacity(&self.pool)
            .saturating_sub(Capacity::from(self.selected.len() as u64))
            .saturating_u64()
    }

    fn selected(&self) -> u64 {
        self.selected.len() as u64
    }

    fn select(&mut self, addr: IpAddr) -> Result<()> {
        let offset = self.offset(addr)?;
        if !self.selected.insert(offset) {
            return Err(IpamError::AddressInUse(addr.to_string()));
        }
        Ok(())
    }

    fn select_next(&mut self) -> Result<IpAddr> {
        // First gap in the sorted offsets
        let mut candidate: u128 = 0;
        for &offset in &self.selected {
            if offset != candidate {
                break;
            }
            candidate += 1;
        }

        if Capacity::from(candidate) >= subnet_capacity(&self.pool) {
            return Err(IpamError::NoAvailableAddress(self.pool.to_string()));
        }

        self.selected.insert(candidate);
        let base = addr_bits(self.pool.network());
        Ok(addr_from_bits(is_6(&self.pool), base + candidate))
    }

    fn deselect(&mut self, addr: IpAddr) -> Result<()> {
        let offset = self.offset(addr)?;
        if !self.selected.remove(&offset) {
            return Err(IpamError::AddressNotSelected(addr.to_string()));
        }
        Ok(())
    }
}
