#![no_main]
use libfuzzer_sys::fuzz_target;
use jayson::{decode, DecodeConfig};

fuzz_target!(|data: &[u8]| {
    // Only bytes that look like the start of a JSON number are worth
    // spending the fuzzer's budget on.
    if matches!(data.first(), Some(b'-') | Some(b'0'..=b'9')) {
        let cfg = DecodeConfig::new();
        let _ = decode(data, &cfg);
    }
});
