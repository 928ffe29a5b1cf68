//! Address space ledger.
//!
//! An `AddressSpace` owns the pools registered under one name and is the
//! only place that mutates them. It checks the preconditions `PoolData`
//! relies on (children contained and disjoint, no mixing of address and
//! child allocation) and removes auto-release pools once they empty out.

use crate::capacity::Capacity;
use crate::config::PredefinedPool;
use crate::error::{IpamError, Result};
use crate::event::{events, EventEmitter, IpamEvent};
use crate::merge::MergeIter;
use crate::pool::PoolData;
use crate::pool_id::PoolId;
use crate::prefix::{bounds, compare_prefixes, contains, is_6, net_from_bits, overlaps};
use ipnet::IpNet;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Pools registered under one address space name.
#[derive(Debug)]
pub struct AddressSpace {
    name: String,
    /// Top-level subnet → pool record. Keys are truncated, so the map order
    /// matches [`compare_prefixes`].
    pools: Mutex<BTreeMap<IpNet, PoolData>>,
    events: Option<EventEmitter>,
}

impl AddressSpace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pools: Mutex::new(BTreeMap::new()),
            events: None,
        }
    }

    /// Create an address space that reports pool lifecycle events.
    pub fn with_events(name: impl Into<String>, emitter: EventEmitter) -> Self {
        Self {
            events: Some(emitter),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.pools.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.lock().is_empty()
    }

    /// Registered pools, sorted by subnet.
    pub fn pool_ids(&self) -> Vec<PoolId> {
        self.pools
            .lock()
            .keys()
            .map(|subnet| PoolId::new(self.name.clone(), *subnet))
            .collect()
    }

    /// True if the pool (and child, when the id names one) is registered.
    pub fn contains(&self, id: &PoolId) -> bool {
        if id.address_space != self.name {
            return false;
        }
        let pools = self.pools.lock();
        match (pools.get(&id.subnet().trunc()), id.child_subnet()) {
            (Some(pool), Some(child)) => pool.has_child(&child.trunc()),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Run `f` against the pool record named by `id`.
    pub fn with_pool<R>(&self, id: &PoolId, f: impl FnOnce(&PoolData) -> R) -> Result<R> {
        let key = self.key(id)?;
        let pools = self.pools.lock();
        let pool = pools.get(&key).ok_or_else(|| self.not_found(id))?;
        Ok(f(pool))
    }

    /// `(available_subnet, available_range)` of a pool.
    pub fn available_addrs(&self, id: &PoolId) -> Result<(u64, u64)> {
        self.with_pool(id, PoolData::available_addrs)
    }

    /// Usable capacity of a pool.
    pub fn capacity(&self, id: &PoolId) -> Result<Capacity> {
        self.with_pool(id, PoolData::capacity_range)
    }

    /// Register a top-level pool.
    pub fn request_pool(&self, subnet: IpNet, auto_release: bool) -> Result<PoolId> {
        let subnet = subnet.trunc();
        let mut pools = self.pools.lock();
        self.check_overlap(&pools, &subnet)?;

        pools.insert(subnet, PoolData::new(subnet, auto_release));
        let id = PoolId::new(self.name.clone(), subnet);
        tracing::info!(space = %self.name, pool = %id, auto_release, "Registered pool");
        self.emit(events::POOL_REGISTERED, &id);
        Ok(id)
    }

    /// Remove a pool that holds no children and no addresses.
    ///
    /// An id naming a child subnet releases that child instead.
    pub fn release_pool(&self, id: &PoolId) -> Result<()> {
        if id.child_subnet().is_some() {
            return self.release_child(id);
        }

        let key = self.key(id)?;
        let mut pools = self.pools.lock();
        let pool = pools.get(&key).ok_or_else(|| self.not_found(id))?;

        if !pool.is_empty() {
            return Err(IpamError::PoolInUse {
                pool: id.to_string(),
                children: pool.child_count(),
                addresses: pool.selected(),
            });
        }

        pools.remove(&key);
        tracing::info!(space = %self.name, pool = %id, "Released pool");
        self.emit(events::POOL_RELEASED, id);
        Ok(())
    }

    /// Carve `child` out of the pool named by `parent`.
    ///
    /// An unregistered parent is registered on the spot with auto-release
    /// set, so it goes away again with its last child.
    pub fn allocate_child(&self, parent: &PoolId, child: IpNet) -> Result<PoolId> {
        let key = self.key(parent)?;
        let child = child.trunc();

        let invalid = |reason: String| IpamError::InvalidChild {
            pool: key.to_string(),
            child: child.to_string(),
            reason,
        };

        if !contains(&key, &child) {
            return Err(invalid("not contained in pool".to_string()));
        }

        let mut pools = self.pools.lock();
        if !pools.contains_key(&key) {
            self.check_overlap(&pools, &key)?;
            pools.insert(key, PoolData::new(key, true));
            let implicit = PoolId::new(self.name.clone(), key);
            tracing::info!(space = %self.name, pool = %implicit, "Registered implicit pool");
            self.emit(events::POOL_REGISTERED, &implicit);
        }
        let pool = pools.get_mut(&key).ok_or_else(|| self.not_found(parent))?;

        if pool.selected() > 0 {
            return Err(IpamError::MixedAllocation {
                pool: parent.to_string(),
                message: format!(
                    "{} address(es) allocated; child subnets cannot be carved",
                    pool.selected()
                ),
            });
        }

        if let Some(sibling) = pool.children().find(|c| overlaps(c, &child)) {
            return Err(invalid(format!("overlaps {}", sibling)));
        }

        pool.add_child(child);
        let id = PoolId::with_child(self.name.clone(), key, child);
        tracing::debug!(space = %self.name, pool = %key, child = %child, "Allocated child subnet");
        self.emit(events::CHILD_ALLOCATED, &id);
        Ok(id)
    }

    /// Return a child subnet, releasing the parent if it is auto-release and
    /// now empty.
    pub fn release_child(&self, id: &PoolId) -> Result<()> {
        let key = self.key(id)?;
        let child = id
            .child_subnet()
            .ok_or_else(|| IpamError::ChildNotFound {
                pool: id.to_string(),
                child: "<none>".to_string(),
            })?
            .trunc();

        let mut pools = self.pools.lock();
        let pool = pools.get_mut(&key).ok_or_else(|| self.not_found(id))?;

        if !pool.remove_child(&child) {
            return Err(IpamError::ChildNotFound {
                pool: key.to_string(),
                child: child.to_string(),
            });
        }

        tracing::debug!(space = %self.name, pool = %key, child = %child, "Released child subnet");
        self.emit(events::CHILD_RELEASED, id);
        self.auto_release(&mut pools, key);
        Ok(())
    }

    /// Select `addr`, or the lowest free address when `None`.
    pub fn request_address(&self, id: &PoolId, addr: Option<IpAddr>) -> Result<IpAddr> {
        if id.child_subnet().is_some() {
            return Err(IpamError::MixedAllocation {
                pool: id.to_string(),
                message: "addresses are allocated from the top-level pool".to_string(),
            });
        }

        let key = self.key(id)?;
        let mut pools = self.pools.lock();
        let pool = pools.get_mut(&key).ok_or_else(|| self.not_found(id))?;

        let addr = match addr {
            Some(addr) => {
                pool.select(addr)?;
                addr
            }
            None => pool.select_next()?,
        };

        tracing::debug!(space = %self.name, pool = %key, addr = %addr, "Allocated address");
        Ok(addr)
    }

    /// Return an address, releasing the pool if it is auto-release and now
    /// empty.
    pub fn release_address(&self, id: &PoolId, addr: IpAddr) -> Result<()> {
        if id.child_subnet().is_some() {
            return Err(IpamError::MixedAllocation {
                pool: id.to_string(),
                message: "addresses are released to the top-level pool".to_string(),
            });
        }

        let key = self.key(id)?;
        let mut pools = self.pools.lock();
        let pool = pools.get_mut(&key).ok_or_else(|| self.not_found(id))?;

        pool.deselect(addr)?;
        tracing::debug!(space = %self.name, pool = %key, addr = %addr, "Released address");
        self.auto_release(&mut pools, key);
        Ok(())
    }

    /// Register the first free subnet from `predefined`.
    ///
    /// Candidates must not overlap a registered pool or any `reserved`
    /// prefix. The registered pools and the reserved prefixes are walked
    /// together in address order.
    pub fn allocate_predefined(
        &self,
        predefined: &[PredefinedPool],
        reserved: &[IpNet],
    ) -> Result<PoolId> {
        let mut pools = self.pools.lock();

        let allocated: Vec<IpNet> = pools.keys().copied().collect();
        let mut reserved: Vec<IpNet> = reserved.iter().map(IpNet::trunc).collect();
        reserved.sort_by(compare_prefixes);

        for candidate in predefined {
            if let Some(subnet) = first_free(candidate, &allocated, &reserved) {
                pools.insert(subnet, PoolData::new(subnet, false));
                let id = PoolId::new(self.name.clone(), subnet);
                tracing::info!(
                    space = %self.name,
                    pool = %id,
                    base = %candidate.base,
                    "Allocated predefined pool"
                );
                self.emit(events::POOL_REGISTERED, &id);
                return Ok(id);
            }
            tracing::debug!(space = %self.name, base = %candidate.base, size = candidate.size, "Predefined pool exhausted");
        }

        Err(IpamError::NoAvailablePool(self.name.clone()))
    }

    fn check_overlap(&self, pools: &BTreeMap<IpNet, PoolData>, subnet: &IpNet) -> Result<()> {
        match pools.keys().find(|existing| overlaps(existing, subnet)) {
            Some(existing) => Err(IpamError::PoolOverlap {
                space: self.name.clone(),
                requested: subnet.to_string(),
                existing: existing.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn auto_release(&self, pools: &mut BTreeMap<IpNet, PoolData>, key: IpNet) {
        let release = pools
            .get(&key)
            .map(|pool| pool.auto_release() && pool.is_empty())
            .unwrap_or(false);

        if release {
            pools.remove(&key);
            let id = PoolId::new(self.name.clone(), key);
            tracing::info!(space = %self.name, pool = %id, "Auto-released pool");
            self.emit(events::POOL_AUTO_RELEASED, &id);
        }
    }

    fn key(&self, id: &PoolId) -> Result<IpNet> {
        if id.address_space != self.name {
            return Err(self.not_found(id));
        }
        Ok(id.subnet().trunc())
    }

    fn not_found(&self, id: &PoolId) -> IpamError {
        IpamError::PoolNotFound {
            space: id.address_space.clone(),
            subnet: id.subnet().to_string(),
        }
    }

    fn emit(&self, key: &str, id: &PoolId) {
        if let Some(events) = &self.events {
            events.emit(IpamEvent::with_string(key, id.to_string()));
        }
    }
}

/// First `size`-bit subnet of `pool.base` overlapping nothing in `allocated`
/// or `reserved`. Both lists must be sorted with [`compare_prefixes`].
fn first_free(pool: &PredefinedPool, allocated: &[IpNet], reserved: &[IpNet]) -> Option<IpNet> {
    let base = pool.base.trunc();
    let v6 = is_6(&base);
    if pool.size < base.prefix_len() || pool.size > base.max_prefix_len() {
        return None;
    }

    let host_bits = u32::from(base.max_prefix_len() - pool.size);
    let mask: u128 = if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    };
    let (first, last) = bounds(&base);

    let mut start = first;
    let mut end = start + mask;

    for taken in MergeIter::new(allocated, reserved, compare_prefixes) {
        if is_6(taken) != v6 {
            continue;
        }
        let (taken_first, taken_last) = bounds(taken);
        if taken_last < start {
            continue;
        }
        if taken_first > end {
            break;
        }

        // Overlap: move to the next aligned block after `taken`
        start = taken_last.checked_add(1)?.checked_add(mask)? & !mask;
        end = start.checked_add(mask)?;
        if end > last {
            return None;
        }
    }

    net_from_bits(v6, start, pool.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNet {
        s.parse().unwrap()
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn predefined(base: &str, size: u8) -> PredefinedPool {
        PredefinedPool {
            base: net(base),
            size,
        }
    }

    #[test]
    fn test_request_pool() {
        let space = AddressSpace::new("LocalDefault");
        let id = space.request_pool(net("10.0.0.0/24"), false).unwrap();
        assert_eq!(id.to_string(), "LocalDefault/10.0.0.0/24");
        assert!(space.contains(&id));
        assert_eq!(space.len(), 1);
        assert_eq!(space.capacity(&id).unwrap(), Capacity::from(256u64));
    }

    #[test]
    fn test_request_pool_truncates_host_bits() {
        let space = AddressSpace::new("s");
        let id = space.request_pool(net("10.0.0.9/24"), false).unwrap();
        assert_eq!(id.subnet(), net("10.0.0.0/24"));
    }

    #[test]
    fn test_request_pool_overlap() {
        let space = AddressSpace::new("s");
        space.request_pool(net("10.0.0.0/16"), false).unwrap();
        assert!(matches!(
            space.request_pool(net("10.0.3.0/24"), false),
            Err(IpamError::PoolOverlap { .. })
        ));
        assert!(matches!(
            space.request_pool(net("10.0.0.0/16"), false),
            Err(IpamError::PoolOverlap { .. })
        ));
        // Different family never overlaps
        space.request_pool(net("fd00::/64"), false).unwrap();
    }

    #[test]
    fn test_release_pool() {
        let space = AddressSpace::new("s");
        let id = space.request_pool(net("10.0.0.0/24"), false).unwrap();
        space.release_pool(&id).unwrap();
        assert!(space.is_empty());
        assert!(matches!(
            space.release_pool(&id),
            Err(IpamError::PoolNotFound { .. })
        ));
    }

    #[test]
    fn test_release_pool_in_use() {
        let space = AddressSpace::new("s");
        let id = space.request_pool(net("10.0.0.0/24"), false).unwrap();
        space.request_address(&id, None).unwrap();
        assert!(matches!(
            space.release_pool(&id),
            Err(IpamError::PoolInUse { addresses: 1, .. })
        ));
    }

    #[test]
    fn test_wrong_address_space() {
        let space = AddressSpace::new("LocalDefault");
        space.request_pool(net("10.0.0.0/24"), false).unwrap();
        let other = PoolId::new("GlobalDefault", net("10.0.0.0/24"));
        assert!(!space.contains(&other));
        assert!(matches!(
            space.available_addrs(&other),
            Err(IpamError::PoolNotFound { .. })
        ));
    }

    #[test]
    fn test_allocate_child() {
        let space = AddressSpace::new("s");
        let parent = space.request_pool(net("10.0.0.0/16"), false).unwrap();
        let a = space.allocate_child(&parent, net("10.0.0.0/25")).unwrap();
        let b = space.allocate_child(&parent, net("10.0.1.0/25")).unwrap();

        assert_eq!(a.to_string(), "s/10.0.0.0/16/10.0.0.0/25");
        assert!(space.contains(&b));
        assert_eq!(space.capacity(&parent).unwrap(), Capacity::from(256u64));
        assert_eq!(space.available_addrs(&parent).unwrap().1, 256);
    }

    #[test]
    fn test_allocate_child_rejects_overlap_and_outside() {
        let space = AddressSpace::new("s");
        let parent = space.request_pool(net("10.0.0.0/16"), false).unwrap();
        space.allocate_child(&parent, net("10.0.0.0/24")).unwrap();

        assert!(matches!(
            space.allocate_child(&parent, net("10.0.0.128/25")),
            Err(IpamError::InvalidChild { .. })
        ));
        assert!(matches!(
            space.allocate_child(&parent, net("10.1.0.0/24")),
            Err(IpamError::InvalidChild { .. })
        ));
        assert!(matches!(
            space.allocate_child(&parent, net("10.0.0.0/8")),
            Err(IpamError::InvalidChild { .. })
        ));
    }

    #[test]
    fn test_modes_do_not_mix() {
        let space = AddressSpace::new("s");
        let direct = space.request_pool(net("10.0.0.0/24"), false).unwrap();
        space.request_address(&direct, None).unwrap();
        assert!(matches!(
            space.allocate_child(&direct, net("10.0.0.128/25")),
            Err(IpamError::MixedAllocation { .. })
        ));

        let supernet = space.request_pool(net("10.1.0.0/16"), false).unwrap();
        let child = space.allocate_child(&supernet, net("10.1.2.0/24")).unwrap();
        assert!(matches!(
            space.request_address(&supernet, None),
            Err(IpamError::MixedAllocation { .. })
        ));
        assert!(matches!(
            space.request_address(&child, None),
            Err(IpamError::MixedAllocation { .. })
        ));
    }

    #[test]
    fn test_auto_release_after_last_child() {
        let space = AddressSpace::new("s");
        let parent = space.request_pool(net("10.0.0.0/16"), true).unwrap();
        let a = space.allocate_child(&parent, net("10.0.1.0/24")).unwrap();
        let b = space.allocate_child(&parent, net("10.0.2.0/24")).unwrap();

        space.release_child(&a).unwrap();
        assert!(space.contains(&parent));

        space.release_pool(&b).unwrap();
        assert!(!space.contains(&parent));
        assert!(space.is_empty());
    }

    #[test]
    fn test_auto_release_after_last_address() {
        let space = AddressSpace::new("s");
        let id = space.request_pool(net("10.0.0.0/30"), true).unwrap();
        let first = space.request_address(&id, None).unwrap();
        let second = space.request_address(&id, Some(ip("10.0.0.3"))).unwrap();
        assert_eq!(first, ip("10.0.0.0"));
        assert_eq!(space.available_addrs(&id).unwrap(), (2, 2));

        space.release_address(&id, first).unwrap();
        assert!(space.contains(&id));
        space.release_address(&id, second).unwrap();
        assert!(!space.contains(&id));
    }

    #[test]
    fn test_no_auto_release_without_flag() {
        let space = AddressSpace::new("s");
        let parent = space.request_pool(net("10.0.0.0/16"), false).unwrap();
        let child = space.allocate_child(&parent, net("10.0.1.0/24")).unwrap();
        space.release_child(&child).unwrap();
        assert!(space.contains(&parent));
    }

    #[test]
    fn test_allocate_child_registers_implicit_parent() {
        let space = AddressSpace::new("s");
        let parent = PoolId::new("s", net("10.0.0.0/16"));
        let child = space.allocate_child(&parent, net("10.0.1.0/24")).unwrap();

        assert!(space.contains(&parent));
        assert!(space.with_pool(&parent, PoolData::auto_release).unwrap());

        space.release_child(&child).unwrap();
        assert!(!space.contains(&parent));
        assert!(space.is_empty());
    }

    #[test]
    fn test_implicit_parent_rejects_overlap_and_bad_child() {
        let space = AddressSpace::new("s");
        space.request_pool(net("10.0.5.0/24"), false).unwrap();

        let parent = PoolId::new("s", net("10.0.0.0/16"));
        assert!(matches!(
            space.allocate_child(&parent, net("10.0.1.0/24")),
            Err(IpamError::PoolOverlap { .. })
        ));

        let other = PoolId::new("s", net("10.1.0.0/16"));
        assert!(matches!(
            space.allocate_child(&other, net("10.2.0.0/24")),
            Err(IpamError::InvalidChild { .. })
        ));
        assert!(!space.contains(&other));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_release_address_rejects_child_id() {
        let space = AddressSpace::new("s");
        let id = space.request_pool(net("10.0.0.0/24"), true).unwrap();
        let addr = space.request_address(&id, None).unwrap();

        let child = PoolId::with_child("s", net("10.0.0.0/24"), net("10.0.0.0/25"));
        assert!(matches!(
            space.release_address(&child, addr),
            Err(IpamError::MixedAllocation { .. })
        ));
        assert_eq!(space.available_addrs(&id).unwrap(), (255, 255));

        space.release_address(&id, addr).unwrap();
        assert!(!space.contains(&id));
    }

    #[test]
    fn test_release_unknown_child() {
        let space = AddressSpace::new("s");
        let parent = space.request_pool(net("10.0.0.0/16"), false).unwrap();
        let missing = PoolId::with_child("s", net("10.0.0.0/16"), net("10.0.9.0/24"));
        assert!(matches!(
            space.release_child(&missing),
            Err(IpamError::ChildNotFound { .. })
        ));
        assert!(matches!(
            space.release_child(&parent),
            Err(IpamError::ChildNotFound { .. })
        ));
    }

    #[test]
    fn test_pool_ids_sorted() {
        let space = AddressSpace::new("s");
        space.request_pool(net("10.0.2.0/24"), false).unwrap();
        space.request_pool(net("fd00::/64"), false).unwrap();
        space.request_pool(net("10.0.1.0/24"), false).unwrap();
        space.request_pool(net("10.0.1.0/28"), false).unwrap_err();
        space.request_pool(net("9.0.0.0/8"), false).unwrap();
        let ids: Vec<PoolId> = space.pool_ids();
        let names: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(
            names,
            vec!["s/9.0.0.0/8", "s/10.0.1.0/24", "s/10.0.2.0/24", "s/fd00::/64"]
        );
        assert!(ids
            .windows(2)
            .all(|w| compare_prefixes(&w[0].subnet(), &w[1].subnet()) == std::cmp::Ordering::Less));
    }

    #[test]
    fn test_allocate_predefined_skips_taken() {
        let space = AddressSpace::new("s");
        space.request_pool(net("172.17.0.0/16"), false).unwrap();

        let pools = [predefined("172.17.0.0/16", 16), predefined("172.18.0.0/16", 16)];
        let id = space.allocate_predefined(&pools, &[]).unwrap();
        assert_eq!(id.subnet(), net("172.18.0.0/16"));
        assert!(matches!(
            space.allocate_predefined(&pools, &[]),
            Err(IpamError::NoAvailablePool(_))
        ));
    }

    #[test]
    fn test_allocate_predefined_walks_reserved_and_allocated() {
        let space = AddressSpace::new("s");
        space.request_pool(net("192.168.0.0/20"), false).unwrap();
        space.request_pool(net("192.168.32.0/20"), false).unwrap();

        let pools = [predefined("192.168.0.0/16", 20)];
        let reserved = [net("192.168.16.0/24"), net("192.168.48.0/21")];

        let id = space.allocate_predefined(&pools, &reserved).unwrap();
        assert_eq!(id.subnet(), net("192.168.64.0/20"));

        let id = space.allocate_predefined(&pools, &reserved).unwrap();
        assert_eq!(id.subnet(), net("192.168.80.0/20"));
    }

    #[test]
    fn test_allocate_predefined_reserved_supernet() {
        let space = AddressSpace::new("s");
        let pools = [predefined("10.0.0.0/16", 24), predefined("10.1.0.0/16", 24)];
        let reserved = [net("10.0.0.0/16")];
        let id = space.allocate_predefined(&pools, &reserved).unwrap();
        assert_eq!(id.subnet(), net("10.1.0.0/24"));
    }

    #[test]
    fn test_allocate_predefined_ipv6() {
        let space = AddressSpace::new("s");
        space.request_pool(net("fd00::/64"), false).unwrap();
        let pools = [predefined("fd00::/56", 64)];
        let id = space.allocate_predefined(&pools, &[]).unwrap();
        assert_eq!(id.subnet(), net("fd00:0:0:1::/64"));
        assert!(id.is_6());
        assert_eq!(space.available_addrs(&id).unwrap(), (u64::MAX, u64::MAX));
    }

    #[test]
    fn test_first_free_whole_ipv6_space() {
        let pool = predefined("::/0", 0);
        assert_eq!(first_free(&pool, &[], &[]), Some(net("::/0")));
        assert_eq!(first_free(&pool, &[net("::1/128")], &[]), None);
    }

    #[tokio::test]
    async fn test_lifecycle_events() {
        let emitter = EventEmitter::new(16);
        let mut rx = emitter.subscribe();
        let space = AddressSpace::with_events("s", emitter);

        let parent = space.request_pool(net("10.0.0.0/16"), true).unwrap();
        let child = space.allocate_child(&parent, net("10.0.1.0/24")).unwrap();
        space.release_child(&child).unwrap();

        let keys: Vec<String> = [
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
            rx.recv().await.unwrap(),
        ]
        .into_iter()
        .map(|e| e.key)
        .collect();

        assert_eq!(
            keys,
            vec![
                events::POOL_REGISTERED,
                events::CHILD_ALLOCATED,
                events::CHILD_RELEASED,
                events::POOL_AUTO_RELEASED,
            ]
        );
    }
}
