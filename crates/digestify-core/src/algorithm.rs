//! Hash algorithm selection
//!
//! The selector fixes both the HMAC primitive and the byte length of the
//! trailer appended to a signed stream. Digest lengths come from the
//! primitives themselves so the trailer arithmetic cannot drift from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::digest::OutputSizeUser;

use crate::error::DigestifyError;
use crate::trailer;

/// Hash function underlying the HMAC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit), only for files signed by older tooling
    Md5,
    /// SHA-1 (160-bit)
    #[default]
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, shortest digest first
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Names accepted by [`HashAlgorithm::from_str`]
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|alg| alg.name())
    }

    /// Raw digest length in bytes, as reported by the primitive
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => <md5::Md5 as OutputSizeUser>::output_size(),
            HashAlgorithm::Sha1 => <sha1::Sha1 as OutputSizeUser>::output_size(),
            HashAlgorithm::Sha224 => <sha2::Sha224 as OutputSizeUser>::output_size(),
            HashAlgorithm::Sha256 => <sha2::Sha256 as OutputSizeUser>::output_size(),
            HashAlgorithm::Sha384 => <sha2::Sha384 as OutputSizeUser>::output_size(),
            HashAlgorithm::Sha512 => <sha2::Sha512 as OutputSizeUser>::output_size(),
        }
    }

    /// Length in bytes of the encoded trailer, newline included
    pub fn trailer_len(&self) -> usize {
        trailer::encoded_len(self.digest_len())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DigestifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DigestifyError::UnsupportedAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        assert_eq!(HashAlgorithm::Md5.digest_len(), 16);
        assert_eq!(HashAlgorithm::Sha1.digest_len(), 20);
        assert_eq!(HashAlgorithm::Sha224.digest_len(), 28);
        assert_eq!(HashAlgorithm::Sha256.digest_len(), 32);
        assert_eq!(HashAlgorithm::Sha384.digest_len(), 48);
        assert_eq!(HashAlgorithm::Sha512.digest_len(), 64);
    }

    #[test]
    fn test_trailer_lengths() {
        // base64 with padding plus the newline
        assert_eq!(HashAlgorithm::Md5.trailer_len(), 25);
        assert_eq!(HashAlgorithm::Sha1.trailer_len(), 29);
        assert_eq!(HashAlgorithm::Sha224.trailer_len(), 41);
        assert_eq!(HashAlgorithm::Sha256.trailer_len(), 45);
        assert_eq!(HashAlgorithm::Sha384.trailer_len(), 65);
        assert_eq!(HashAlgorithm::Sha512.trailer_len(), 89);
    }

    #[test]
    fn test_parse_names() {
        for alg in HashAlgorithm::ALL {
            assert_eq!(alg.name().parse::<HashAlgorithm>().unwrap(), alg);
            assert_eq!(alg.to_string(), alg.name());
        }
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!(" sha512 ".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "whirlpool".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, DigestifyError::UnsupportedAlgorithm(name) if name == "whirlpool"));
        assert!("".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_default_is_sha1() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha1);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&HashAlgorithm::Sha384).unwrap();
        assert_eq!(json, "\"sha384\"");
        let parsed: HashAlgorithm = serde_json::from_str("\"sha224\"").unwrap();
        assert_eq!(parsed, HashAlgorithm::Sha224);
    }
}
