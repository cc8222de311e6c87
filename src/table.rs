//! Immutable range table and per-ASN metadata.

use ahash::AHashMap;
use serde::Serialize;
use std::net::IpAddr;

use crate::addr::{addr_less, same_family};
use crate::loader::LoaderConfig;
use crate::parser::{trim_newline, Record};
use crate::{Error, Result};

/// A contiguous block of address space owned by one ASN.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    /// First address of the range
    pub start: IpAddr,
    /// Last address of the range
    pub end: IpAddr,
    /// Owning autonomous system number
    pub asn: u32,
}

impl Range {
    /// Check if `addr` lies within this range under the table order.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        !addr_less(addr, &self.start) && !addr_less(&self.end, addr)
    }
}

/// Registered description and country of an ASN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AsnMeta {
    pub(crate) name: String,
    pub(crate) country: String,
}

/// A loaded IP-to-ASN dataset.
///
/// Built once by [`AsnMap::open_file`] or [`AsnMap::open_reader`] and never
/// mutated afterwards, so it can be shared across threads without locking.
/// To refresh the data, load a new map and swap it in with
/// [`SharedAsnMap`](crate::SharedAsnMap).
#[derive(Debug, Clone, Default)]
pub struct AsnMap {
    /// Ranges sorted by start address, non-overlapping
    pub(crate) ranges: Vec<Range>,
    /// Metadata from the first line seen for each ASN
    pub(crate) meta: AHashMap<u32, AsnMeta>,
}

impl AsnMap {
    /// Get the number of routed ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the map holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Get the number of distinct ASNs seen while loading.
    pub fn asn_count(&self) -> usize {
        self.meta.len()
    }

    /// Get the ranges in table order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

/// Load-local accumulator that is frozen into an [`AsnMap`].
#[derive(Debug, Default)]
pub(crate) struct AsnMapBuilder {
    ranges: Vec<Range>,
    meta: AHashMap<u32, AsnMeta>,
    verify_order: bool,
}

impl AsnMapBuilder {
    pub(crate) fn new(config: &LoaderConfig) -> Self {
        Self {
            verify_order: config.verify_order,
            ..Self::default()
        }
    }

    /// Append a parsed record.
    ///
    /// `line` is only used for error reporting by the ordering check.
    pub(crate) fn push(&mut self, record: Record<'_>, line: &[u8]) -> Result<()> {
        let range = Range {
            start: record.start,
            end: record.end,
            asn: record.asn,
        };

        if self.verify_order {
            self.check_order(&range, line)?;
        }

        // First sighting wins; later lines never overwrite.
        self.meta.entry(record.asn).or_insert_with(|| AsnMeta {
            name: record.description.into_owned(),
            country: record.country.into_owned(),
        });

        self.ranges.push(range);
        Ok(())
    }

    fn check_order(&self, range: &Range, raw: &[u8]) -> Result<()> {
        let line = || String::from_utf8_lossy(trim_newline(raw)).into_owned();

        if !same_family(&range.start, &range.end) {
            return Err(Error::MixedFamily { line: line() });
        }
        if addr_less(&range.end, &range.start) {
            return Err(Error::InvertedRange { line: line() });
        }
        if let Some(prev) = self.ranges.last() {
            if !addr_less(&prev.end, &range.start) {
                return Err(Error::OutOfOrder { line: line() });
            }
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> AsnMap {
        self.ranges.shrink_to_fit();
        AsnMap {
            ranges: self.ranges,
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn push_line(builder: &mut AsnMapBuilder, line: &str) -> Result<()> {
        match parse_line(line.as_bytes())? {
            Some(rec) => builder.push(rec, line.as_bytes()),
            None => Ok(()),
        }
    }

    #[test]
    fn test_range_contains() {
        let range = Range {
            start: "1.0.64.0".parse().unwrap(),
            end: "1.0.127.255".parse().unwrap(),
            asn: 18144,
        };
        assert!(range.contains(&"1.0.64.0".parse().unwrap()));
        assert!(range.contains(&"1.0.100.7".parse().unwrap()));
        assert!(range.contains(&"1.0.127.255".parse().unwrap()));
        assert!(!range.contains(&"1.0.128.0".parse().unwrap()));
        assert!(!range.contains(&"1.0.63.255".parse().unwrap()));
        assert!(!range.contains(&"::1.0.100.7".parse().unwrap()));
    }

    #[test]
    fn test_first_seen_metadata_wins() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::default());
        push_line(&mut builder, "1.0.0.0\t1.0.0.255\t13335\tUS\tCLOUDFLARENET\n").unwrap();
        push_line(&mut builder, "1.1.1.0\t1.1.1.0\t13335\tAU\tRenamed\n").unwrap();
        let map = builder.finish();

        assert_eq!(map.len(), 2);
        assert_eq!(map.asn_count(), 1);
        let meta = map.meta.get(&13335).unwrap();
        assert_eq!(meta.name, "CLOUDFLARENET");
        assert_eq!(meta.country, "US");
    }

    #[test]
    fn test_ranges_kept_in_read_order() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::default());
        push_line(&mut builder, "1.1.1.0\t1.1.1.255\t2\tUS\tB\n").unwrap();
        push_line(&mut builder, "1.0.0.0\t1.0.0.255\t1\tUS\tA\n").unwrap();
        let map = builder.finish();

        let asns: Vec<u32> = map.ranges().iter().map(|r| r.asn).collect();
        assert_eq!(asns, vec![2, 1]);
    }

    #[test]
    fn test_verify_order_rejects_unsorted() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::strict());
        push_line(&mut builder, "1.1.1.0\t1.1.1.255\t2\tUS\tB\n").unwrap();
        let err = push_line(&mut builder, "1.0.0.0\t1.0.0.255\t1\tUS\tA\n").unwrap_err();
        assert!(matches!(err, Error::OutOfOrder { .. }));
    }

    #[test]
    fn test_verify_order_rejects_overlap() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::strict());
        push_line(&mut builder, "1.0.0.0\t1.0.0.255\t1\tUS\tA\n").unwrap();
        let err = push_line(&mut builder, "1.0.0.255\t1.0.1.255\t2\tUS\tB\n").unwrap_err();
        assert!(matches!(err, Error::OutOfOrder { .. }));
    }

    #[test]
    fn test_verify_order_rejects_bad_ranges() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::strict());
        let err = push_line(&mut builder, "1.0.0.255\t1.0.0.0\t1\tUS\tA\n").unwrap_err();
        assert!(matches!(err, Error::InvertedRange { .. }));

        let err = push_line(&mut builder, "1.0.0.0\t::1\t1\tUS\tA\n").unwrap_err();
        assert!(matches!(err, Error::MixedFamily { .. }));
    }

    #[test]
    fn test_verify_order_accepts_v4_then_v6() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::strict());
        push_line(&mut builder, "1.0.0.0\t1.0.0.255\t1\tUS\tA\n").unwrap();
        push_line(&mut builder, "255.255.255.0\t255.255.255.255\t2\tUS\tB\n").unwrap();
        push_line(&mut builder, "::\t::ffff\t3\tUS\tC\n").unwrap();
        assert_eq!(builder.finish().len(), 3);
    }

    #[test]
    fn test_default_config_trusts_input_order() {
        let mut builder = AsnMapBuilder::new(&LoaderConfig::default());
        push_line(&mut builder, "1.0.0.255\t1.0.0.0\t1\tUS\tA\n").unwrap();
        push_line(&mut builder, "1.0.0.0\t1.0.0.255\t1\tUS\tA\n").unwrap();
        assert_eq!(builder.finish().len(), 2);
    }
}
