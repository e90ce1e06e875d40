//! Integration tests for the testable properties in spec.md §8.
//!
//! Each test function is named after the invariant or concrete scenario it
//! covers, so a failure points straight back at the spec clause.
use jayson::{decode, encode, DecodeConfig, EncodeConfig, EscapeMode, Key, MapsMode, Value};

fn enc(v: &Value) -> String {
    encode(v, &EncodeConfig::new()).unwrap()
}

fn dec(s: &str) -> Value {
    decode(s.as_bytes(), &DecodeConfig::new()).unwrap()
}

fn values_eq(a: &Value, b: &Value) -> bool {
    use Value::*;
    match (a, b) {
        (Null, Null) => true,
        (Bool(x), Bool(y)) => x == y,
        (Int(x), Int(y)) => x == y,
        (Float(x), Float(y)) => x == y,
        (Str(x), Str(y)) => x == y,
        (Array(x), Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_eq(a, b))
        }
        (Object(x), Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((ka, va), (kb, vb))| ka.as_text() == kb.as_text() && values_eq(va, vb))
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// 1. Round-trip of canonical JSON values (spec.md §8 invariant 1)
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_primitives() {
    for v in [
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::from(0i64),
        Value::from(-42i64),
        Value::from(9_223_372_036_854_775_807i64),
        Value::str("hello"),
        Value::str(""),
    ] {
        let back = dec(&enc(&v));
        assert!(values_eq(&v, &back), "roundtrip failed for {v:?}");
    }
}

#[test]
fn roundtrip_compound_values() {
    let v = Value::object([
        (Key::from("a"), Value::from(1i64)),
        (
            Key::from("b"),
            Value::array([Value::Bool(true), Value::Bool(false), Value::Null]),
        ),
        (Key::from("c"), Value::str("nested \"quotes\"")),
    ]);
    let back = dec(&enc(&v));
    assert!(values_eq(&v, &back));
}

#[test]
fn roundtrip_float_normalizes_through_decimal_text() {
    // documented normalization: the decoder sees ryu's shortest round-trip
    // text and reparses it back to the same f64 bit pattern.
    for f in [0.0_f64, -0.0, 1.5, 3.14159, 1e10, 1e-10, f64::MAX, f64::MIN_POSITIVE] {
        let v = Value::Float(f);
        let Value::Float(back) = dec(&enc(&v)) else { panic!("expected float") };
        assert_eq!(back.to_bits(), f.to_bits());
    }
}

// ---------------------------------------------------------------------------
// 2. UTF-8 preservation (spec.md §8 invariant 2)
// ---------------------------------------------------------------------------

#[test]
fn utf8_preservation() {
    for s in ["plain ascii", "héllo wörld", "日本語", "😀🎉", "\u{2028}\u{2029}"] {
        let v = Value::str(s);
        let Value::Str(back) = dec(&enc(&v)) else { panic!("expected string") };
        assert_eq!(std::str::from_utf8(&back).unwrap(), s);
    }
}

// ---------------------------------------------------------------------------
// 3. Escape profile extensions (spec.md §8 invariant 3)
// ---------------------------------------------------------------------------

#[test]
fn json_profile_leaves_line_separator_as_raw_utf8() {
    let cfg = EncodeConfig::new().escape(EscapeMode::Json);
    let out = encode(&Value::str("\u{2028}"), &cfg).unwrap();
    assert_eq!(out.as_bytes(), [b'"', 0xE2, 0x80, 0xA8, b'"']);
}

#[test]
fn javascript_and_html_safe_escape_line_separator() {
    for mode in [EscapeMode::JavaScript, EscapeMode::HtmlSafe] {
        let cfg = EncodeConfig::new().escape(mode);
        let out = encode(&Value::str("\u{2028}"), &cfg).unwrap();
        assert_eq!(out, "\"\\u2028\"");
    }
}

#[test]
fn html_safe_escapes_closing_script_tag() {
    let cfg = EncodeConfig::new().escape(EscapeMode::HtmlSafe);
    let out = encode(&Value::str("</script>"), &cfg).unwrap();
    assert_eq!(out, "\"<\\/script>\"");
}

#[test]
fn unicode_profile_never_emits_a_high_byte() {
    let cfg = EncodeConfig::new().escape(EscapeMode::Unicode);
    let out = encode(&Value::str("é"), &cfg).unwrap();
    assert_eq!(out.to_lowercase(), "\"\\u00e9\"");
    assert!(out.bytes().all(|b| b < 0x80));
}

// ---------------------------------------------------------------------------
// 4. Control characters (spec.md §8 invariant 4)
// ---------------------------------------------------------------------------

#[test]
fn every_control_byte_is_uppercase_hex_in_all_profiles() {
    for mode in [EscapeMode::Json, EscapeMode::JavaScript, EscapeMode::HtmlSafe, EscapeMode::Unicode] {
        for byte in 0u8..0x20 {
            // \b \t \n \f \r have short escapes instead; every other control
            // byte goes through \u00XX.
            if matches!(byte, 0x08 | 0x09 | 0x0a | 0x0c | 0x0d) {
                continue;
            }
            let s = unsafe { String::from_utf8_unchecked(vec![byte]) };
            let cfg = EncodeConfig::new().escape(mode);
            let out = encode(&Value::str(&s), &cfg).unwrap();
            let expect = format!("\"\\u{byte:04X}\"");
            assert_eq!(out, expect, "byte {byte:#04x} under {mode:?}");
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Duplicate detection (spec.md §8 invariant 5)
// ---------------------------------------------------------------------------

#[test]
fn strict_mode_rejects_duplicate_keys_across_key_kinds() {
    let v = Value::Object(vec![
        (Key::Str("foo".to_string()), Value::from(1i64)),
        (Key::Sym("foo".to_string()), Value::from(2i64)),
    ]);
    let cfg = EncodeConfig::new().maps(MapsMode::Strict);
    let err = encode(&v, &cfg).unwrap_err();
    assert_eq!(err.to_string(), "duplicate key: \"foo\"");
}

#[test]
fn naive_mode_emits_both_pairs_in_source_order() {
    let v = Value::Object(vec![
        (Key::Str("foo".to_string()), Value::from(1i64)),
        (Key::Sym("foo".to_string()), Value::from(2i64)),
    ]);
    let cfg = EncodeConfig::new().maps(MapsMode::Naive);
    assert_eq!(encode(&v, &cfg).unwrap(), "{\"foo\":1,\"foo\":2}");
}

// ---------------------------------------------------------------------------
// 6. Invalid input (spec.md §8 invariant 6)
// ---------------------------------------------------------------------------

#[test]
fn byte_0xff_with_no_continuation_fails_to_encode() {
    let v = Value::bytes(vec![0xFFu8]);
    let err = encode(&v, &EncodeConfig::new()).unwrap_err();
    assert!(matches!(err, jayson::EncodeError::InvalidByte { byte: 0xFF, .. }));
}

// ---------------------------------------------------------------------------
// 7. Idempotence of escaping (spec.md §8 invariant 7)
// ---------------------------------------------------------------------------

#[test]
fn double_escape_round_trips_through_two_decodes() {
    let once = enc(&Value::str("a\"b\\c\nd"));
    let twice = enc(&Value::str(&once));
    let decoded_once = match dec(&twice) {
        Value::Str(s) => String::from_utf8(s.to_vec()).unwrap(),
        _ => panic!("expected string"),
    };
    assert_eq!(decoded_once, once);
    let decoded_twice = match dec(&decoded_once) {
        Value::Str(s) => String::from_utf8(s.to_vec()).unwrap(),
        _ => panic!("expected string"),
    };
    assert_eq!(decoded_twice, "a\"b\\c\nd");
}

// ---------------------------------------------------------------------------
// 8. Iodata equivalence (spec.md §8 invariant 8)
// ---------------------------------------------------------------------------

#[test]
fn flat_encode_matches_concatenated_iodata() {
    let v = Value::object([
        (Key::from("x"), Value::str("héllo")),
        (Key::from("y"), Value::array([Value::from(1i64), Value::Float(1.5)])),
    ]);
    let cfg = EncodeConfig::new().maps(MapsMode::Strict);
    let flat = encode(&v, &cfg).unwrap();
    let fragments = jayson::encode_to_iodata(&v, &cfg).unwrap();
    assert_eq!(flat.as_bytes(), fragments.flatten().as_slice());
}

// ---------------------------------------------------------------------------
// Concrete scenarios (spec.md §8)
// ---------------------------------------------------------------------------

#[test]
fn concrete_scenarios() {
    assert_eq!(enc(&Value::Null), "null");
    assert_eq!(
        enc(&Value::array([Value::from(1i64), Value::from(2i64), Value::from(3i64)])),
        "[1,2,3]"
    );
    assert_eq!(
        enc(&Value::object([
            (Key::from("a"), Value::from(1i64)),
            (Key::from("b"), Value::array([Value::Bool(true), Value::Bool(false), Value::Null])),
        ])),
        "{\"a\":1,\"b\":[true,false,null]}"
    );
    assert_eq!(enc(&Value::str("a\nb")), "\"a\\nb\"");

    let html = EncodeConfig::new().escape(EscapeMode::HtmlSafe);
    assert_eq!(encode(&Value::str("</x>"), &html).unwrap(), "\"<\\/x>\"");

    let unicode = EncodeConfig::new().escape(EscapeMode::Unicode);
    let out = encode(&Value::str("\u{1F600}"), &unicode).unwrap();
    assert_eq!(out.to_lowercase(), "\"\\ud83d\\ude00\"");
}

// ---------------------------------------------------------------------------
// Depth guard (spec.md §4.3 — "fail cleanly on overflow")
// ---------------------------------------------------------------------------

#[test]
fn deeply_nested_array_trips_the_depth_guard() {
    let mut v = Value::Null;
    for _ in 0..200 {
        v = Value::array([v]);
    }
    let err = encode(&v, &EncodeConfig::new()).unwrap_err();
    assert!(matches!(err, jayson::EncodeError::DepthExceeded(_)));
}

// ---------------------------------------------------------------------------
// Pretty-printing (SPEC_FULL.md §1 — retained as a pure formatting option)
// ---------------------------------------------------------------------------

#[test]
fn pretty_printing_does_not_change_decoded_value() {
    let v = Value::object([
        (Key::from("a"), Value::from(1i64)),
        (Key::from("b"), Value::array([Value::Bool(true), Value::Null])),
    ]);
    let cfg = EncodeConfig::new().pretty(jayson::PrettyOpts::default());
    let pretty = encode(&v, &cfg).unwrap();
    assert!(pretty.contains('\n'), "pretty output should contain newlines: {pretty:?}");
    assert!(values_eq(&v, &dec(&pretty)));
}

#[test]
fn non_finite_floats_fail_explicitly() {
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = encode(&Value::Float(f), &EncodeConfig::new()).unwrap_err();
        assert_eq!(err, jayson::EncodeError::UnrepresentableNumber);
    }
}
