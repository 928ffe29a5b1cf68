//! Per-pool ledger record.
//!
//! A pool runs in one of two modes: it either hands out individual addresses
//! through its tracker, or it acts as a supernet and hands out child subnets.
//! The two modes never mix on the same pool.

use crate::addrset::{AddrSet, AddrTracker};
use crate::capacity::{subnet_capacity, Capacity};
use crate::error::{IpamError, Result};
use ipnet::IpNet;
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Mutable state of one registered pool.
///
/// Children passed to [`PoolData::add_child`] must be contained in the pool
/// and disjoint from each other; `AddressSpace` checks this before calling.
#[derive(Debug)]
pub struct PoolData {
    addrs: Box<dyn AddrTracker>,
    children: BTreeSet<IpNet>,
    /// Release the pool once it has no children and no selected addresses.
    auto_release: bool,
}

impl PoolData {
    /// Create a pool backed by an [`AddrSet`].
    pub fn new(subnet: IpNet, auto_release: bool) -> Self {
        Self::with_tracker(Box::new(AddrSet::new(subnet)), auto_release)
    }

    /// Create a pool backed by a caller-supplied tracker.
    pub fn with_tracker(addrs: Box<dyn AddrTracker>, auto_release: bool) -> Self {
        Self {
            addrs,
            children: BTreeSet::new(),
            auto_release,
        }
    }

    /// The tracked subnet.
    pub fn subnet(&self) -> IpNet {
        self.addrs.pool()
    }

    pub fn auto_release(&self) -> bool {
        self.auto_release
    }

    pub fn children(&self) -> impl Iterator<Item = &IpNet> {
        self.children.iter()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_child(&self, child: &IpNet) -> bool {
        self.children.contains(child)
    }

    /// Number of individually selected addresses.
    pub fn selected(&self) -> u64 {
        self.addrs.selected()
    }

    /// No children and no selected addresses.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.addrs.selected() == 0
    }

    /// Total usable space: the whole subnet in address mode, the union of
    /// carved children in supernet mode.
    pub fn capacity_range(&self) -> Capacity {
        if self.children.is_empty() {
            return subnet_capacity(&self.addrs.pool());
        }
        self.children.iter().map(subnet_capacity).sum()
    }

    /// Capacity still obtainable from this pool.
    pub fn available_range(&self) -> Capacity {
        self.capacity_range()
            .saturating_sub(Capacity::from(self.addrs.selected()))
    }

    /// `(available_subnet, available_range)`: the tracker's unselected count
    /// and the available range narrowed to `u64`, saturating at `u64::MAX`.
    pub fn available_addrs(&self) -> (u64, u64) {
        (
            self.addrs.unselected(),
            self.available_range().saturating_u64(),
        )
    }

    /// Record a carved child. Returns false if it was already present.
    pub fn add_child(&mut self, child: IpNet) -> bool {
        self.children.insert(child)
    }

    /// Forget a carved child. Returns false if it was not present.
    pub fn remove_child(&mut self, child: &IpNet) -> bool {
        self.children.remove(child)
    }

    pub fn select(&mut self, addr: IpAddr) -> Result<()> {
        self.ensure_address_mode()?;
        self.addrs.select(addr)
    }

    pub fn select_next(&mut self) -> Result<IpAddr> {
        self.ensure_address_mode()?;
        self.addrs.select_next()
    }

    pub fn deselect(&mut self, addr: IpAddr) -> Result<()> {
        self.addrs.deselect(addr)
    }

    fn ensure_address_mode(&self) -> Result<()> {
        if !self.children.is_empty() {
            return Err(IpamError::MixedAllocation {
                pool: self.subnet().to_string(),
                message: format!(
                    "{} child subnet(s) carved; addresses cannot be allocated directly",
                    self.children.len()
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PoolData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolData[Children: {}]", self.children.len())
    }
}
