//! A3S IPAM Core - Default Pool Ledger
//!
//! Bookkeeping for the default IP address management driver: which pools
//! are registered in which address space, child subnets carved from them,
//! overflow-free capacity arithmetic over the full IPv4/IPv6 range, and a
//! merge iterator for walking two sorted prefix lists in order.

pub mod address_space;
pub mod addrset;
pub mod capacity;
pub mod config;
pub mod error;
pub mod event;
pub mod ipam;
pub mod merge;
pub mod pool;
pub mod pool_id;
pub mod prefix;

// Re-export commonly used types
pub use address_space::AddressSpace;
pub use addrset::{AddrSet, AddrTracker};
pub use capacity::{subnet_capacity, Capacity};
pub use config::{IpamConfig, LogLevel, PredefinedPool};
pub use error::{IpamError, Result};
pub use event::{EventEmitter, IpamEvent};
pub use ipam::Ipam;
pub use merge::MergeIter;
pub use pool::PoolData;
pub use pool_id::{PoolId, SubnetKey};
pub use prefix::compare_prefixes;

/// A3S IPAM version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
