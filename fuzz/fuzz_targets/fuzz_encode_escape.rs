#![no_main]
use libfuzzer_sys::fuzz_target;
use jayson::{encode, EncodeConfig, EscapeMode, Value};

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 (Value::str expects one).
    if let Ok(s) = std::str::from_utf8(data) {
        let v = Value::str(s);
        for mode in [EscapeMode::Json, EscapeMode::HtmlSafe, EscapeMode::Unicode, EscapeMode::JavaScript] {
            let cfg = EncodeConfig::new().escape(mode);
            let _ = encode(&v, &cfg);
        }
    }
});
