//! Digestify Core - Streaming HMAC signing with an appended trailer
//!
//! A signed stream is the verbatim source bytes followed by one line holding
//! the base64 encoded HMAC of those bytes. Signing and verification both run
//! in a single sequential pass with memory bounded by the block size, so
//! arbitrarily large files and pipes are supported.

pub mod accumulator;
pub mod algorithm;
pub mod config;
pub mod error;
pub mod key;
pub mod stream;
pub mod trailer;
pub mod window;

pub use accumulator::{DigestAccumulator, Tag};
pub use algorithm::HashAlgorithm;
pub use config::DigestifyConfig;
pub use error::{DigestifyError, Result};
pub use key::SecretKey;
pub use stream::{sign, verify, Verification};
pub use trailer::TrailerDefect;
pub use window::LookbackWindow;

/// Default number of bytes read per block
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Number of most recent blocks held back from the digest during verification
pub const LOOKBACK_BLOCKS: usize = 3;
