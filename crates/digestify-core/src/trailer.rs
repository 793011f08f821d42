//! Trailer encoding
//!
//! The trailer is the last line of a signed stream: the raw tag in padded
//! standard base64 followed by a single `\n`. Its length depends only on the
//! digest length, so a verifier knows exactly how many bytes to peel off the
//! end of a stream before reading any of it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::accumulator::Tag;
use crate::algorithm::HashAlgorithm;

/// Line terminator closing the trailer
pub const TRAILER_TERMINATOR: u8 = b'\n';

/// Why a trailer candidate could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrailerDefect {
    #[error("stream holds {available} bytes, trailer needs {expected}")]
    Missing { available: usize, expected: usize },

    #[error("trailer is not newline terminated")]
    Unterminated,

    #[error("trailer is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("trailer has length {actual}, expected {expected}")]
    WrongLength { actual: usize, expected: usize },
}

/// Encoded trailer length for a digest of `digest_len` bytes
pub fn encoded_len(digest_len: usize) -> usize {
    // 4 output characters per 3 input bytes, padded, plus the terminator
    4 * digest_len.div_ceil(3) + 1
}

/// Encode a tag as a trailer line
pub fn encode(tag: &Tag) -> Vec<u8> {
    let mut line = STANDARD.encode(tag.as_bytes()).into_bytes();
    line.push(TRAILER_TERMINATOR);
    debug_assert_eq!(line.len(), encoded_len(tag.len()));
    line
}

/// Decode a trailer candidate back into raw tag bytes.
///
/// Anything other than a canonical trailer of exactly the algorithm's length
/// is rejected.
pub fn decode(candidate: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>, TrailerDefect> {
    let expected = algorithm.trailer_len();
    if candidate.len() < expected {
        return Err(TrailerDefect::Missing {
            available: candidate.len(),
            expected,
        });
    }
    if candidate.len() != expected {
        return Err(TrailerDefect::WrongLength {
            actual: candidate.len(),
            expected,
        });
    }

    let body = match candidate.split_last() {
        Some((&TRAILER_TERMINATOR, body)) => body,
        _ => return Err(TrailerDefect::Unterminated),
    };

    let raw = STANDARD
        .decode(body)
        .map_err(|e| TrailerDefect::InvalidEncoding(e.to_string()))?;

    if raw.len() != algorithm.digest_len() {
        return Err(TrailerDefect::WrongLength {
            actual: raw.len(),
            expected: algorithm.digest_len(),
        });
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::DigestAccumulator;
    use crate::key::SecretKey;

    fn tag_for(algorithm: HashAlgorithm) -> Tag {
        let mut acc = DigestAccumulator::new(&SecretKey::from("secret"), algorithm).unwrap();
        acc.update(b"hello world");
        acc.finalize()
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(1), 5);
        assert_eq!(encoded_len(3), 5);
        assert_eq!(encoded_len(20), 29);
        assert_eq!(encoded_len(64), 89);
    }

    #[test]
    fn test_encode_known_value() {
        let line = encode(&tag_for(HashAlgorithm::Sha256));
        assert_eq!(line, b"c0zGLzKEFWj0VxWuufTXiRMk5tlI5MbGDAYhzaxIYjo=\n");
    }

    #[test]
    fn test_decode_accepts_encoded() {
        for alg in HashAlgorithm::ALL {
            let tag = tag_for(alg);
            let line = encode(&tag);
            assert_eq!(line.len(), alg.trailer_len());
            assert_eq!(decode(&line, alg).unwrap(), tag.as_bytes());
        }
    }

    #[test]
    fn test_decode_short_candidate() {
        let err = decode(b"abc\n", HashAlgorithm::Sha1).unwrap_err();
        assert_eq!(
            err,
            TrailerDefect::Missing {
                available: 4,
                expected: 29
            }
        );
    }

    #[test]
    fn test_decode_long_candidate() {
        let mut line = encode(&tag_for(HashAlgorithm::Sha1));
        line.insert(0, b'A');
        assert!(matches!(
            decode(&line, HashAlgorithm::Sha1),
            Err(TrailerDefect::WrongLength { actual: 30, expected: 29 })
        ));
    }

    #[test]
    fn test_decode_requires_newline() {
        let mut line = encode(&tag_for(HashAlgorithm::Sha1));
        *line.last_mut().unwrap() = b'\r';
        assert_eq!(decode(&line, HashAlgorithm::Sha1), Err(TrailerDefect::Unterminated));
    }

    #[test]
    fn test_decode_rejects_bad_alphabet() {
        let mut line = encode(&tag_for(HashAlgorithm::Sha256));
        line[3] = b'*';
        assert!(matches!(
            decode(&line, HashAlgorithm::Sha256),
            Err(TrailerDefect::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_digest_length() {
        // 28 characters of unpadded base64 decode to 21 bytes, not 20
        let line = b"AAAAAAAAAAAAAAAAAAAAAAAAAAAA\n";
        assert_eq!(line.len(), HashAlgorithm::Sha1.trailer_len());
        assert_eq!(
            decode(line, HashAlgorithm::Sha1),
            Err(TrailerDefect::WrongLength {
                actual: 21,
                expected: 20
            })
        );
    }
}
