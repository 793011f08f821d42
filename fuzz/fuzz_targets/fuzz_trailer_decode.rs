#![no_main]

use libfuzzer_sys::fuzz_target;
use digestify_core::{trailer, HashAlgorithm};

fuzz_target!(|data: &[u8]| {
    for alg in HashAlgorithm::ALL {
        // Try to decode - should not panic
        if let Ok(raw) = trailer::decode(data, alg) {
            // Anything accepted is exactly one trailer line
            assert_eq!(raw.len(), alg.digest_len());
            assert_eq!(data.len(), alg.trailer_len());
            assert_eq!(data.last(), Some(&trailer::TRAILER_TERMINATOR));
        }
    }
});
