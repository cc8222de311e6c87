//! Address-to-ASN lookup and metadata accessors.

use serde::Serialize;
use std::net::IpAddr;

use crate::addr::addr_less;
use crate::table::{AsnMap, Range};

/// Everything known about the ASN routing an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsnInfo {
    /// Autonomous system number
    pub asn: u32,
    /// Registered AS description
    pub name: String,
    /// Registry country code
    pub country: String,
    /// The range containing the queried address
    pub range: Range,
}

impl AsnMap {
    /// Get the ASN routing `ip`.
    ///
    /// Returns 0 when no range covers the address. 0 is not a valid ASN.
    pub fn as_of_ip(&self, ip: IpAddr) -> u32 {
        self.range_of(ip).map_or(0, |range| range.asn)
    }

    /// Get the range containing `ip`, if any.
    ///
    /// Relies on the ranges being sorted by start and non-overlapping; this
    /// is not re-checked per query.
    pub fn range_of(&self, ip: IpAddr) -> Option<&Range> {
        // Index of the first range starting strictly after `ip`.
        let upper = self
            .ranges
            .partition_point(|range| !addr_less(&ip, &range.start));
        self.candidate_with(upper.checked_sub(1)?, &ip)
    }

    /// Return `ranges[i]` if it contains `ip`.
    fn candidate_with(&self, i: usize, ip: &IpAddr) -> Option<&Range> {
        let range = self.ranges.get(i)?;
        if addr_less(&range.end, ip) {
            return None;
        }
        if addr_less(ip, &range.start) {
            return None;
        }
        Some(range)
    }

    /// Look up the ASN routing `ip` together with its metadata.
    pub fn lookup(&self, ip: IpAddr) -> Option<AsnInfo> {
        let range = *self.range_of(ip)?;
        Some(AsnInfo {
            asn: range.asn,
            name: self.as_name(range.asn).to_string(),
            country: self.as_country(range.asn).to_string(),
            range,
        })
    }

    /// Get the registered description of `asn`, or `""` if unknown.
    pub fn as_name(&self, asn: u32) -> &str {
        self.meta.get(&asn).map_or("", |meta| meta.name.as_str())
    }

    /// Get the registry country code of `asn`, or `""` if unknown.
    pub fn as_country(&self, asn: u32) -> &str {
        self.meta.get(&asn).map_or("", |meta| meta.country.as_str())
    }
}
