//! Streaming digest accumulator
//!
//! Wraps a keyed HMAC over the selected hash and absorbs a stream block by
//! block. Finalizing consumes the accumulator, so no block can be fed after
//! the tag has been produced.

use std::fmt;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use subtle::ConstantTimeEq;

use crate::algorithm::HashAlgorithm;
use crate::error::{DigestifyError, Result};
use crate::key::SecretKey;

enum KeyedHash {
    Md5(Hmac<md5::Md5>),
    Sha1(Hmac<sha1::Sha1>),
    Sha224(Hmac<sha2::Sha224>),
    Sha256(Hmac<sha2::Sha256>),
    Sha384(Hmac<sha2::Sha384>),
    Sha512(Hmac<sha2::Sha512>),
}

fn keyed<M: Mac + KeyInit>(key: &SecretKey, algorithm: HashAlgorithm) -> Result<M> {
    <M as Mac>::new_from_slice(key.as_bytes()).map_err(|e| {
        DigestifyError::Crypto(format!("{} rejected the key: {}", algorithm, e))
    })
}

/// Running HMAC state for one sign or verify pass
pub struct DigestAccumulator {
    algorithm: HashAlgorithm,
    state: KeyedHash,
    processed: u64,
}

impl DigestAccumulator {
    /// Start a new HMAC keyed with `key`
    pub fn new(key: &SecretKey, algorithm: HashAlgorithm) -> Result<Self> {
        let state = match algorithm {
            HashAlgorithm::Md5 => KeyedHash::Md5(keyed(key, algorithm)?),
            HashAlgorithm::Sha1 => KeyedHash::Sha1(keyed(key, algorithm)?),
            HashAlgorithm::Sha224 => KeyedHash::Sha224(keyed(key, algorithm)?),
            HashAlgorithm::Sha256 => KeyedHash::Sha256(keyed(key, algorithm)?),
            HashAlgorithm::Sha384 => KeyedHash::Sha384(keyed(key, algorithm)?),
            HashAlgorithm::Sha512 => KeyedHash::Sha512(keyed(key, algorithm)?),
        };

        Ok(Self {
            algorithm,
            state,
            processed: 0,
        })
    }

    /// Absorb the next block of the stream. Empty blocks are accepted.
    pub fn update(&mut self, block: &[u8]) {
        match &mut self.state {
            KeyedHash::Md5(mac) => mac.update(block),
            KeyedHash::Sha1(mac) => mac.update(block),
            KeyedHash::Sha224(mac) => mac.update(block),
            KeyedHash::Sha256(mac) => mac.update(block),
            KeyedHash::Sha384(mac) => mac.update(block),
            KeyedHash::Sha512(mac) => mac.update(block),
        }
        self.processed += block.len() as u64;
    }

    /// Produce the authentication tag
    pub fn finalize(self) -> Tag {
        let bytes = match self.state {
            KeyedHash::Md5(mac) => mac.finalize().into_bytes().to_vec(),
            KeyedHash::Sha1(mac) => mac.finalize().into_bytes().to_vec(),
            KeyedHash::Sha224(mac) => mac.finalize().into_bytes().to_vec(),
            KeyedHash::Sha256(mac) => mac.finalize().into_bytes().to_vec(),
            KeyedHash::Sha384(mac) => mac.finalize().into_bytes().to_vec(),
            KeyedHash::Sha512(mac) => mac.finalize().into_bytes().to_vec(),
        };
        debug_assert_eq!(bytes.len(), self.algorithm.digest_len());
        Tag(bytes)
    }

    /// Total number of bytes absorbed so far
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

impl fmt::Debug for DigestAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestAccumulator")
            .field("algorithm", &self.algorithm)
            .field("processed", &self.processed)
            .finish_non_exhaustive()
    }
}

/// Raw authentication tag
#[derive(Clone, PartialEq, Eq)]
pub struct Tag(Vec<u8>);

impl Tag {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constant-time comparison against a candidate tag.
    ///
    /// Runs in time independent of where the first differing byte is; a
    /// length mismatch is simply unequal.
    pub fn ct_eq(&self, candidate: &[u8]) -> bool {
        self.0.as_slice().ct_eq(candidate).into()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", hex::encode(&self.0))
    }
}
