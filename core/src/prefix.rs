//! Prefix helpers shared by the ledger and the predefined-pool search.
//!
//! Addresses of both families are handled as `u128` offsets so the same
//! range arithmetic serves IPv4 and IPv6.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::cmp::Ordering;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// True for IPv6 prefixes.
pub fn is_6(net: &IpNet) -> bool {
    matches!(net, IpNet::V6(_))
}

/// Order prefixes by family (IPv4 first), base address, then prefix length.
pub fn compare_prefixes(a: &IpNet, b: &IpNet) -> Ordering {
    is_6(a)
        .cmp(&is_6(b))
        .then(addr_bits(a.network()).cmp(&addr_bits(b.network())))
        .then(a.prefix_len().cmp(&b.prefix_len()))
}

/// Address as an unsigned integer.
pub fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(v4) as u128,
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Inverse of [`addr_bits`] for the given family.
pub fn addr_from_bits(is_6: bool, bits: u128) -> IpAddr {
    if is_6 {
        IpAddr::V6(Ipv6Addr::from(bits))
    } else {
        IpAddr::V4(Ipv4Addr::from(bits as u32))
    }
}

/// First and last address of `net` as integers.
pub fn bounds(net: &IpNet) -> (u128, u128) {
    (addr_bits(net.network()), addr_bits(net.broadcast()))
}

/// Build a prefix from an integer base address.
pub fn net_from_bits(is_6: bool, bits: u128, prefix_len: u8) -> Option<IpNet> {
    if is_6 {
        Ipv6Net::new(Ipv6Addr::from(bits), prefix_len)
            .ok()
            .map(IpNet::V6)
    } else {
        Ipv4Net::new(Ipv4Addr::from(bits as u32), prefix_len)
            .ok()
            .map(IpNet::V4)
    }
}

/// True if the two prefixes share at least one address.
pub fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    if is_6(a) != is_6(b) {
        return false;
    }
    let (a_first, a_last) = bounds(a);
    let (b_first, b_last) = bounds(b);
    a_first <= b_last && b_first <= a_last
}

/// True if `inner` lies entirely within `outer`.
pub fn contains(outer: &IpNet, inner: &IpNet) -> bool {
    is_6(outer) == is_6(inner)
        && outer.prefix_len() <= inner.prefix_len()
        && outer.contains(&inner.network())
}
