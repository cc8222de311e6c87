//! iptoasn.com TSV record parser.
//!
//! Each line of the export is
//!
//! ```text
//! <start-ip>\t<end-ip>\t<asn>\t<country-code>\t<description>\n
//! ```
//!
//! The split is positional: the first four tabs are mandatory and the
//! description is the remainder of the line, tabs included.

use std::borrow::Cow;
use std::net::IpAddr;

use crate::{Error, Result};

/// Description text the export uses for unallocated address space.
pub const NOT_ROUTED: &str = "Not routed";

/// One routed line of the export, borrowing from the line buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// First address of the range (inclusive)
    pub start: IpAddr,
    /// Last address of the range (inclusive)
    pub end: IpAddr,
    /// Autonomous system number
    pub asn: u32,
    /// Registry country code, e.g. `JP`
    pub country: Cow<'a, str>,
    /// AS description
    pub description: Cow<'a, str>,
}

/// Raw fields of a line, before any parsing.
struct Fields<'a> {
    start: &'a [u8],
    end: &'a [u8],
    asn: &'a [u8],
    country: &'a [u8],
    description: &'a [u8],
}

/// Strip one trailing newline, if present.
pub fn trim_newline(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\n', rest)) => rest,
        _ => line,
    }
}

/// Split off the next tab-terminated field.
fn next_field<'a>(rest: &mut &'a [u8], line: &[u8]) -> Result<&'a [u8]> {
    let current: &'a [u8] = *rest;
    let tab = current
        .iter()
        .position(|&b| b == b'\t')
        .ok_or_else(|| Error::ShortLine {
            line: lossy(line),
        })?;
    *rest = &current[tab + 1..];
    Ok(&current[..tab])
}

fn split_fields(line: &[u8]) -> Result<Fields<'_>> {
    let mut rest = line;
    let start = next_field(&mut rest, line)?;
    let end = next_field(&mut rest, line)?;
    let asn = next_field(&mut rest, line)?;
    let country = next_field(&mut rest, line)?;
    Ok(Fields {
        start,
        end,
        asn,
        country,
        description: rest,
    })
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_asn(field: &[u8], line: &[u8]) -> Result<u32> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| Error::InvalidAsn {
            field: lossy(field),
            line: lossy(line),
        })
}

fn parse_addr(field: &[u8], line: &[u8]) -> Result<IpAddr> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<IpAddr>().ok())
        .ok_or_else(|| Error::InvalidAddress {
            field: lossy(field),
            line: lossy(line),
        })
}

/// Parse one line of the export.
///
/// Returns `Ok(None)` for `Not routed` lines, which carry no record.
/// A single trailing newline is ignored.
pub fn parse_line(line: &[u8]) -> Result<Option<Record<'_>>> {
    let line = trim_newline(line);
    let fields = split_fields(line)?;

    if fields.description == NOT_ROUTED.as_bytes() {
        return Ok(None);
    }

    let asn = parse_asn(fields.asn, line)?;
    let start = parse_addr(fields.start, line)?;
    let end = parse_addr(fields.end, line)?;

    Ok(Some(Record {
        start,
        end,
        asn,
        country: String::from_utf8_lossy(fields.country),
        description: String::from_utf8_lossy(fields.description),
    }))
}
