//! ip2asn - IP-to-ASN lookups over iptoasn.com range exports.
//!
//! This crate loads the tab-separated "IP range → ASN" dataset published by
//! [iptoasn.com](https://iptoasn.com) into an immutable in-memory table and
//! answers, for any IPv4 or IPv6 address, which autonomous system routes it
//! along with that AS's registered description and country.
//!
//! # Features
//!
//! - **Transparent gzip**: `.tsv.gz` exports are detected by magic bytes
//! - **Streaming parser**: the export is read line by line, never held whole
//! - **O(log n) lookups**: binary search over sorted, disjoint ranges
//! - **Mixed families**: IPv4 and IPv6 ranges live in one table
//! - **Thread-safe**: a loaded [`AsnMap`] is immutable and `Send + Sync`
//! - **Hot reload**: [`SharedAsnMap`] swaps in freshly loaded data atomically
//!
//! # Quick Start
//!
//! ```ignore
//! use ip2asn::AsnMap;
//!
//! let map = AsnMap::open_file("ip2asn-combined.tsv.gz")?;
//!
//! let asn = map.as_of_ip("8.8.8.8".parse()?);
//! assert_eq!(asn, 15169);
//! println!("{} ({})", map.as_name(asn), map.as_country(asn));
//! ```
//!
//! # Sentinels
//!
//! Queries never fail. [`AsnMap::as_of_ip`] returns 0 for addresses no
//! range covers, and [`AsnMap::as_name`] / [`AsnMap::as_country`] return
//! `""` for ASNs never seen while loading. [`AsnMap::lookup`] offers the
//! same answer as an `Option`.
//!
//! # Input Format
//!
//! ```text
//! <start-ip>\t<end-ip>\t<asn>\t<country-code>\t<description>\n
//! ```
//!
//! Lines whose description is exactly `Not routed` are dropped. Lines must
//! already be sorted by start address (all IPv4 before all IPv6); this is
//! trusted unless [`LoaderConfig::verify_order`] is set.

mod addr;
mod error;
mod lookup;
mod shared;
mod table;

pub mod framer;
pub mod loader;
pub mod parser;

// Re-export core types
pub use error::{Error, Result};
pub use lookup::AsnInfo;
pub use table::{AsnMap, Range};

// Re-export address ordering
pub use addr::cmp_addr;

// Re-export loading configuration
pub use loader::LoaderConfig;

// Re-export hot reload support
pub use shared::SharedAsnMap;
