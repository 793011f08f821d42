//! Signing and verification of byte streams
//!
//! Both operations make one sequential pass over the source, reading it in
//! fixed-size blocks. Memory use is bounded by the block size (times the
//! lookback depth when verifying), independent of the stream length.

use std::fmt;
use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::accumulator::DigestAccumulator;
use crate::algorithm::HashAlgorithm;
use crate::error::{DigestifyError, Result};
use crate::key::SecretKey;
use crate::trailer::{self, TrailerDefect};
use crate::window::LookbackWindow;
use crate::LOOKBACK_BLOCKS;

/// Outcome of verifying a signed stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Trailer present and matches the content
    Valid,
    /// Trailer present but does not match the content or key
    Mismatch,
    /// No usable trailer at the end of the stream
    Indeterminate(TrailerDefect),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Verification::Indeterminate(_))
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Valid => f.write_str("digest matches"),
            Verification::Mismatch => f.write_str("digest does not match"),
            Verification::Indeterminate(defect) => {
                write!(f, "digest is missing or malformed ({})", defect)
            }
        }
    }
}

/// Fill `buf` from `source` until it is full or the stream ends.
///
/// Short reads (pipes, sockets) are retried, so only the final block of a
/// stream can come back shorter than `buf`. Returns the number of bytes read;
/// zero means end of stream.
pub fn read_block<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Copy `source` to `target` and append the HMAC trailer.
///
/// If this fails partway the target holds an unusable prefix and must be
/// discarded.
pub fn sign<R: Read, W: Write>(
    key: &SecretKey,
    algorithm: HashAlgorithm,
    mut source: R,
    mut target: W,
    block_size: usize,
) -> Result<()> {
    if block_size == 0 {
        return Err(DigestifyError::Configuration(
            "block size must be positive".to_string(),
        ));
    }

    let mut digest = DigestAccumulator::new(key, algorithm)?;
    debug!(%algorithm, block_size, "signing stream");

    let mut block = vec![0u8; block_size];
    loop {
        let n = read_block(&mut source, &mut block)?;
        if n == 0 {
            break;
        }
        target.write_all(&block[..n])?;
        digest.update(&block[..n]);
    }

    let processed = digest.processed();
    let line = trailer::encode(&digest.finalize());
    debug!(
        bytes = processed,
        hmac = %String::from_utf8_lossy(&line).trim_end(),
        "computed HMAC"
    );

    target.write_all(&line)?;
    target.flush()?;
    Ok(())
}

/// Check the HMAC trailer at the end of `source` against its content.
///
/// `block_size` must be larger than the trailer of `algorithm`; otherwise the
/// call fails before anything is read.
pub fn verify<R: Read>(
    key: &SecretKey,
    algorithm: HashAlgorithm,
    mut source: R,
    block_size: usize,
) -> Result<Verification> {
    let trailer_len = algorithm.trailer_len();
    if block_size <= trailer_len {
        return Err(DigestifyError::Configuration(format!(
            "block size {} must exceed the {} byte {} trailer",
            block_size, trailer_len, algorithm
        )));
    }

    let mut digest = DigestAccumulator::new(key, algorithm)?;
    debug!(%algorithm, block_size, trailer_len, "verifying stream");

    let mut window = LookbackWindow::new(LOOKBACK_BLOCKS);
    let mut spare: Option<Vec<u8>> = None;
    loop {
        let mut block = spare.take().unwrap_or_default();
        block.resize(block_size, 0);

        let n = read_block(&mut source, &mut block)?;
        if n == 0 {
            break;
        }
        block.truncate(n);

        if let Some(evicted) = window.push(block) {
            digest.update(&evicted);
            spare = Some(evicted);
        }
    }

    let available = window.retained_len();
    let Some((head, candidate)) = window.split_tail(trailer_len) else {
        debug!(available, trailer_len, "stream too short for a trailer");
        return Ok(Verification::Indeterminate(TrailerDefect::Missing {
            available,
            expected: trailer_len,
        }));
    };
    digest.update(&head);

    let received = match trailer::decode(&candidate, algorithm) {
        Ok(raw) => raw,
        Err(defect) => {
            debug!(%defect, "unusable trailer");
            return Ok(Verification::Indeterminate(defect));
        }
    };

    let processed = digest.processed();
    let computed = digest.finalize();
    debug!(
        bytes = processed,
        received = %String::from_utf8_lossy(&candidate).trim_end(),
        computed = %String::from_utf8_lossy(&trailer::encode(&computed)).trim_end(),
        "comparing HMAC"
    );

    if computed.ct_eq(&received) {
        Ok(Verification::Valid)
    } else {
        Ok(Verification::Mismatch)
    }
}
