#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use digestify_core::{verify, HashAlgorithm, SecretKey};

#[derive(Debug, Arbitrary)]
struct Input {
    key: Vec<u8>,
    algorithm: u8,
    block_extra: u8,
    stream: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let alg = HashAlgorithm::ALL[input.algorithm as usize % HashAlgorithm::ALL.len()];
    let block_size = alg.trailer_len() + 1 + input.block_extra as usize;

    // Arbitrary streams must produce an outcome, never an error or panic
    let outcome = verify(&SecretKey::new(input.key), alg, &input.stream[..], block_size);
    assert!(outcome.is_ok());
});
