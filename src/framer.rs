//! Gzip framing detection for dataset streams.
//!
//! iptoasn.com publishes its exports as `.tsv.gz`, but the same data is
//! often stored decompressed. [`FramedReader`] peeks at the first two bytes
//! and, if they are the gzip magic, decompresses transparently. The peeked
//! bytes are replayed so the logical stream is unchanged.

use flate2::read::MultiGzDecoder;
use std::io::{self, Chain, Cursor, Read};

/// Gzip member header magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check if data starts with the gzip magic bytes.
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == GZIP_MAGIC[0] && data[1] == GZIP_MAGIC[1]
}

type Peeked<R> = Chain<Cursor<[u8; 2]>, R>;

/// A byte stream with any gzip framing removed.
pub enum FramedReader<R: Read> {
    /// Input was not gzip; bytes pass through untouched.
    Plain(Peeked<R>),
    /// Input was gzip; bytes are decompressed on read.
    Gzip(MultiGzDecoder<Peeked<R>>),
}

impl<R: Read> FramedReader<R> {
    /// Peek at the start of `inner` and pick the framing.
    ///
    /// Fails with `UnexpectedEof` if the stream holds fewer than two bytes.
    /// Corrupt gzip data is reported by the first failing `read`.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let mut magic = [0u8; 2];
        inner.read_exact(&mut magic)?;

        let peeked = Cursor::new(magic).chain(inner);
        if is_gzip(&magic) {
            log::debug!("Detected gzip framing");
            Ok(FramedReader::Gzip(MultiGzDecoder::new(peeked)))
        } else {
            Ok(FramedReader::Plain(peeked))
        }
    }

    /// Whether the stream is being decompressed.
    pub fn is_compressed(&self) -> bool {
        matches!(self, FramedReader::Gzip(_))
    }
}

impl<R: Read> Read for FramedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FramedReader::Plain(r) => r.read(buf),
            FramedReader::Gzip(r) => r.read(buf),
        }
    }
}
