//! Loading datasets from files and streams.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::framer::FramedReader;
use crate::parser::parse_line;
use crate::table::{AsnMap, AsnMapBuilder};
use crate::Result;

/// Configuration for loading a dataset.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Reject ranges that are inverted, mix address families, or do not
    /// start after the previous range ended.
    ///
    /// Off by default: the export is trusted to be sorted and disjoint, and
    /// a dataset that violates that silently yields wrong lookups.
    pub verify_order: bool,
}

impl LoaderConfig {
    /// Create a configuration that verifies range ordering while loading.
    pub fn strict() -> Self {
        Self { verify_order: true }
    }
}

impl AsnMap {
    /// Load a dataset from a file, gzip-compressed or not.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_file_with_config(path, &LoaderConfig::default())
    }

    /// Load a dataset from a file with custom configuration.
    pub fn open_file_with_config(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let map = Self::open_reader_with_config(file, config)?;
        log::debug!("Loaded ASN map from {:?}", path);
        Ok(map)
    }

    /// Load a dataset from a stream, gzip-compressed or not.
    ///
    /// The stream is read to the end; no partial map is returned on error.
    pub fn open_reader<R: Read>(reader: R) -> Result<Self> {
        Self::open_reader_with_config(reader, &LoaderConfig::default())
    }

    /// Load a dataset from a stream with custom configuration.
    pub fn open_reader_with_config<R: Read>(reader: R, config: &LoaderConfig) -> Result<Self> {
        let mut reader = BufReader::new(FramedReader::new(reader)?);
        let mut builder = AsnMapBuilder::new(config);
        let mut line = Vec::new();
        let mut unrouted = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            match parse_line(&line)? {
                Some(record) => builder.push(record, &line)?,
                None => unrouted += 1,
            }
        }

        let map = builder.finish();
        log::debug!("Dropped {} unrouted ranges", unrouted);
        log::info!(
            "Loaded {} ranges for {} ASNs",
            map.len(),
            map.asn_count()
        );
        Ok(map)
    }
}
