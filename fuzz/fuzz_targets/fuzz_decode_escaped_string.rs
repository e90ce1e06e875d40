#![no_main]
use libfuzzer_sys::fuzz_target;
use jayson::{decode, DecodeConfig};

fuzz_target!(|data: &[u8]| {
    // Wrap arbitrary bytes in quotes so the parser's string path (escape
    // scanning, surrogate-pair handling, UTF-8 validation) is exercised
    // directly instead of only reached through a lucky top-level parse.
    let mut quoted = Vec::with_capacity(data.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(data);
    quoted.push(b'"');
    let cfg = DecodeConfig::new();
    let _ = decode(&quoted, &cfg);
});
