//! Total order over mixed-family IP addresses.
//!
//! The range table is one ascending sequence holding both IPv4 and IPv6
//! ranges, so every comparison made while searching it must use the same
//! order the upstream export was sorted with:
//!
//! 1. Family first: every IPv4 address sorts before every IPv6 address.
//! 2. Within a family, addresses compare as unsigned big-endian integers
//!    (`u32` for IPv4, `u128` for IPv6), which is the same as comparing
//!    their octets lexicographically.
//!
//! IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are IPv6 here and are not
//! folded into the IPv4 space.

use std::cmp::Ordering;
use std::net::IpAddr;

/// Address family rank used as the primary sort key.
#[inline]
fn family_rank(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 4,
        IpAddr::V6(_) => 6,
    }
}

/// Compare two addresses under the table order.
#[inline]
pub fn cmp_addr(a: &IpAddr, b: &IpAddr) -> Ordering {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V4(b)) => u32::from(*a).cmp(&u32::from(*b)),
        (IpAddr::V6(a), IpAddr::V6(b)) => u128::from(*a).cmp(&u128::from(*b)),
        _ => family_rank(a).cmp(&family_rank(b)),
    }
}

/// `a < b` under the table order.
#[inline]
pub fn addr_less(a: &IpAddr, b: &IpAddr) -> bool {
    cmp_addr(a, b) == Ordering::Less
}

/// Whether both addresses belong to the same family.
#[inline]
pub fn same_family(a: &IpAddr, b: &IpAddr) -> bool {
    family_rank(a) == family_rank(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_ipv4_before_ipv6() {
        assert!(addr_less(&ip("255.255.255.255"), &ip("::")));
        assert!(addr_less(&ip("0.0.0.0"), &ip("::1")));
        assert!(!addr_less(&ip("::"), &ip("0.0.0.0")));
    }

    #[test]
    fn test_mapped_v6_is_v6() {
        assert!(addr_less(&ip("9.9.9.9"), &ip("::ffff:1.1.1.1")));
        assert!(!same_family(&ip("1.1.1.1"), &ip("::ffff:1.1.1.1")));
    }

    #[test]
    fn test_numeric_order_within_family() {
        assert!(addr_less(&ip("1.0.17.1"), &ip("1.0.64.0")));
        assert!(addr_less(&ip("9.255.255.255"), &ip("10.0.0.0")));
        assert!(addr_less(&ip("2c0f:ff30::"), &ip("2c0f:ffc8::")));
        assert!(addr_less(&ip("2c0f:ffc8::ffff"), &ip("2c0f:ffc8:0:1::")));
        assert_eq!(cmp_addr(&ip("1.0.64.0"), &ip("1.0.64.0")), Ordering::Equal);
        assert_eq!(cmp_addr(&ip("fe00::"), &ip("2c0f::")), Ordering::Greater);
    }
}
