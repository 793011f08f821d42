#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use digestify_core::{sign, verify, HashAlgorithm, SecretKey};

#[derive(Debug, Arbitrary)]
struct Input {
    key: Vec<u8>,
    algorithm: u8,
    sign_block: u8,
    verify_extra: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let alg = HashAlgorithm::ALL[input.algorithm as usize % HashAlgorithm::ALL.len()];
    let key = SecretKey::new(input.key);

    let mut signed = Vec::new();
    sign(&key, alg, &input.data[..], &mut signed, input.sign_block as usize + 1).unwrap();
    assert_eq!(&signed[..input.data.len()], &input.data[..]);

    // Signed output must always verify, whatever the block sizes
    let block_size = alg.trailer_len() + 1 + input.verify_extra as usize;
    let outcome = verify(&key, alg, &signed[..], block_size).unwrap();
    assert!(outcome.is_valid());
});
