//! Error types for ip2asn.

use thiserror::Error;

/// Error type for ip2asn operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error, including a failed gzip peek or corrupt gzip data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line has fewer than four tab separators
    #[error("short line: {line:?}")]
    ShortLine { line: String },

    /// ASN field is not a base-10 integer
    #[error("bogus ASN {field:?} for line {line:?}")]
    InvalidAsn { field: String, line: String },

    /// Start or end field is not an IP address literal
    #[error("bogus IP {field:?} for line {line:?}")]
    InvalidAddress { field: String, line: String },

    /// Range ends before it starts (only with `LoaderConfig::verify_order`)
    #[error("range end precedes start: {line:?}")]
    InvertedRange { line: String },

    /// Range endpoints belong to different families (only with `LoaderConfig::verify_order`)
    #[error("range mixes IPv4 and IPv6 endpoints: {line:?}")]
    MixedFamily { line: String },

    /// Range does not start after the previous range ended (only with `LoaderConfig::verify_order`)
    #[error("range out of order or overlapping previous range: {line:?}")]
    OutOfOrder { line: String },
}

impl Error {
    /// Whether this error was caused by a malformed input line.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::ShortLine { .. } | Error::InvalidAsn { .. } | Error::InvalidAddress { .. }
        )
    }

    /// Whether this error was raised by the opt-in ordering check.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Error::InvertedRange { .. } | Error::MixedFamily { .. } | Error::OutOfOrder { .. }
        )
    }
}

/// Result type alias for ip2asn operations.
pub type Result<T> = std::result::Result<T, Error>;
