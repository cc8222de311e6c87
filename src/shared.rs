//! Hot-swappable handle to an [`AsnMap`].
//!
//! A loaded map is never mutated. Refreshing the dataset means loading a
//! new map off to the side and atomically replacing the shared reference:
//! in-flight queries finish against the map they started with, new queries
//! see the new one.

use arc_swap::{ArcSwap, Guard};
use std::io::Read;
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::loader::LoaderConfig;
use crate::table::AsnMap;
use crate::Result;

/// Shared ASN map with atomic hot reload.
///
/// # Example
///
/// ```ignore
/// use ip2asn::{AsnMap, SharedAsnMap};
///
/// let shared = SharedAsnMap::new(AsnMap::open_file("ip2asn-combined.tsv.gz")?);
/// let asn = shared.as_of_ip("8.8.8.8".parse()?);
///
/// // Later, after downloading a fresh export
/// shared.reload("ip2asn-combined.tsv.gz")?;
/// ```
pub struct SharedAsnMap {
    inner: ArcSwap<AsnMap>,
    config: LoaderConfig,
    /// Incremented on every swap.
    generation: AtomicU64,
}

impl SharedAsnMap {
    /// Wrap a loaded map with the default loader configuration.
    pub fn new(map: AsnMap) -> Self {
        Self::with_config(map, LoaderConfig::default())
    }

    /// Wrap a loaded map; `config` is used by later reloads.
    pub fn with_config(map: AsnMap, config: LoaderConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(map),
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Load the initial map from a file.
    pub fn open_file(path: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        let map = AsnMap::open_file_with_config(path, &config)?;
        Ok(Self::with_config(map, config))
    }

    /// Borrow the current map.
    ///
    /// The guard is meant to be short-lived; use [`snapshot`](Self::snapshot)
    /// to hold on to a map.
    pub fn load(&self) -> Guard<Arc<AsnMap>> {
        self.inner.load()
    }

    /// Get an owned reference to the current map.
    pub fn snapshot(&self) -> Arc<AsnMap> {
        self.inner.load_full()
    }

    /// Atomically replace the current map.
    pub fn replace(&self, map: AsnMap) {
        self.inner.store(Arc::new(map));
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Hot reload from a file.
    ///
    /// On error the current map stays in service.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let map = AsnMap::open_file_with_config(path, &self.config).map_err(|e| {
            log::warn!("Failed to reload ASN map from {:?}: {}", path, e);
            e
        })?;
        self.replace(map);
        log::info!("Hot reloaded ASN map from {:?}", path);
        Ok(())
    }

    /// Hot reload from a stream.
    ///
    /// On error the current map stays in service.
    pub fn reload_from_reader<R: Read>(&self, reader: R) -> Result<()> {
        let map = AsnMap::open_reader_with_config(reader, &self.config).map_err(|e| {
            log::warn!("Failed to reload ASN map: {}", e);
            e
        })?;
        self.replace(map);
        log::info!("Hot reloaded ASN map from reader");
        Ok(())
    }

    /// Get the current generation (incremented on each swap).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Get the ASN routing `ip` in the current map, 0 if unknown.
    pub fn as_of_ip(&self, ip: IpAddr) -> u32 {
        self.inner.load().as_of_ip(ip)
    }

    /// Get the description of `asn` in the current map, empty if unknown.
    pub fn as_name(&self, asn: u32) -> String {
        self.inner.load().as_name(asn).to_string()
    }

    /// Get the country code of `asn` in the current map, empty if unknown.
    pub fn as_country(&self, asn: u32) -> String {
        self.inner.load().as_country(asn).to_string()
    }
}
