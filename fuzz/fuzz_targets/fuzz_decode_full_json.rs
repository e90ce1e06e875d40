#![no_main]
use libfuzzer_sys::fuzz_target;
use jayson::{decode, DecodeConfig};

fuzz_target!(|data: &[u8]| {
    // The parser must never panic on arbitrary bytes, valid or not.
    let cfg = DecodeConfig::new();
    let _ = decode(data, &cfg);
});
