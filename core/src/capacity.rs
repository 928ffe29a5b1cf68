//! Wide capacity arithmetic.
//!
//! An IPv6 `::/0` holds 2^128 addresses, one more than `u128::MAX`, and the
//! children of a supernet have to be summed without wrapping. `Capacity` is a
//! two-word unsigned integer (64-bit high word, 128-bit low word) wide enough
//! for both. Narrowing to `u64` for external reporting saturates.

use ipnet::IpNet;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;

/// Two-word unsigned integer used for address counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capacity {
    hi: u64,
    lo: u128,
}

impl Capacity {
    pub const ZERO: Capacity = Capacity { hi: 0, lo: 0 };
    pub const ONE: Capacity = Capacity { hi: 0, lo: 1 };
    pub const MAX: Capacity = Capacity {
        hi: u64::MAX,
        lo: u128::MAX,
    };

    /// Build from the raw (high, low) words.
    pub const fn from_words(hi: u64, lo: u128) -> Self {
        Self { hi, lo }
    }

    /// 2^exp, saturating at `MAX` when `exp` is out of range.
    pub fn pow2(exp: u32) -> Self {
        Self::ONE.checked_shl(exp).unwrap_or(Self::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Shift left by `n` bits. `None` if any set bit would be shifted out.
    pub fn checked_shl(self, n: u32) -> Option<Self> {
        if self.is_zero() {
            return Some(self);
        }
        match n {
            0 => Some(self),
            1..=127 => {
                let hi = self.hi as u128;
                if hi != 0 && hi.leading_zeros() < n {
                    return None;
                }
                let hi = (hi << n) | (self.lo >> (128 - n));
                if hi > u64::MAX as u128 {
                    return None;
                }
                Some(Self {
                    hi: hi as u64,
                    lo: self.lo << n,
                })
            }
            128..=191 => {
                let m = n - 128;
                if self.hi != 0 || (m > 0 && self.lo >> (64 - m) != 0) || self.lo > u64::MAX as u128 {
                    return None;
                }
                Some(Self {
                    hi: (self.lo as u64) << m,
                    lo: 0,
                })
            }
            _ => None,
        }
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.checked_add(other.hi)?.checked_add(carry as u64)?;
        Some(Self { hi, lo })
    }

    pub fn saturating_add(self, other: Self) -> Self {
        self.checked_add(other).unwrap_or(Self::MAX)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        if self <= other {
            return Self::ZERO;
        }
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        Self {
            hi: self.hi - other.hi - borrow as u64,
            lo,
        }
    }

    /// Narrow to `u64`, reporting `u64::MAX` for anything larger.
    pub fn saturating_u64(&self) -> u64 {
        if self.hi != 0 || self.lo > u64::MAX as u128 {
            u64::MAX
        } else {
            self.lo as u64
        }
    }

    /// Exact value if it fits in a `u128`.
    pub fn to_u128(&self) -> Option<u128> {
        (self.hi == 0).then_some(self.lo)
    }

    /// Divide by a small divisor, returning the quotient and remainder.
    fn div_rem_u64(self, d: u64) -> (Self, u64) {
        let d = d as u128;
        let limbs = [self.hi, (self.lo >> 64) as u64, self.lo as u64];
        let mut quotient = [0u64; 3];
        let mut rem: u128 = 0;
        for (i, limb) in limbs.iter().enumerate() {
            let cur = (rem << 64) | *limb as u128;
            quotient[i] = (cur / d) as u64;
            rem = cur % d;
        }
        (
            Self {
                hi: quotient[0],
                lo: ((quotient[1] as u128) << 64) | quotient[2] as u128,
            },
            rem as u64,
        )
    }
}

impl Ord for Capacity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for Capacity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Capacity {
    fn from(v: u64) -> Self {
        Self { hi: 0, lo: v as u128 }
    }
}

impl From<u128> for Capacity {
    fn from(v: u128) -> Self {
        Self { hi: 0, lo: v }
    }
}

impl Sum for Capacity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi == 0 {
            return write!(f, "{}", self.lo);
        }

        // Base 10^19 chunks, least significant first
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let mut chunks = Vec::new();
        let mut rest = *self;
        while !rest.is_zero() {
            let (q, r) = rest.div_rem_u64(CHUNK);
            chunks.push(r);
            rest = q;
        }

        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for chunk in iter {
            write!(f, "{:019}", chunk)?;
        }
        Ok(())
    }
}

/// Number of addresses in `subnet`: 2^(address bits − prefix bits).
pub fn subnet_capacity(subnet: &IpNet) -> Capacity {
    let host_bits = u32::from(subnet.max_prefix_len() - subnet.prefix_len());
    Capacity::pow2(host_bits)
}
