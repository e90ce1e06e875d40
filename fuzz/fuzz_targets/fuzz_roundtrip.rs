#![no_main]
use libfuzzer_sys::fuzz_target;
use jayson::{decode, encode, DecodeConfig, EncodeConfig, Value};

fuzz_target!(|data: &[u8]| {
    // Any document the decoder accepts must re-encode to something the
    // decoder accepts too (spec.md §8 invariant 1, generalized to arbitrary
    // fuzzer-discovered input rather than a fixed corpus).
    let cfg = DecodeConfig::new();
    let Ok(value) = decode(data, &cfg) else { return };
    let encode_cfg = EncodeConfig::new();
    let Ok(text) = encode(&value, &encode_cfg) else { return };
    let Ok(reparsed) = decode(text.as_bytes(), &cfg) else {
        panic!("re-encoded output failed to decode: {text:?}");
    };
    let _: Value = reparsed;
});
