//! A fresh recursive-descent parser implementing the decoder's public
//! contract (spec.md §6). The escape tables and SIMD scanners built for the
//! encoder can't drive a parser directly — a decoder has to recognize
//! *tokens*, not reproduce verbatim runs — but the low-level byte scanners
//! the teacher wrote for its own decoder (`skip_whitespace`,
//! `skip_ascii_digits`) have no NIF dependency and are reused here as-is for
//! whitespace and digit-run skipping.
use std::sync::Arc;

use num_bigint::BigInt;

use crate::simd_utils;
use crate::value::{Key, Value};

use super::{key_from_decoded, DecodeConfig, DecodeError};

/// Mirrors [`crate::walk::MAX_DEPTH`] — the encoder and decoder each apply
/// their own recursion guard since spec.md scopes the decoder out of §4.3,
/// but there is no reason for the two limits to differ in practice.
const MAX_DEPTH: u32 = 128;

pub struct Parser<'a> {
    pub(crate) input: &'a [u8],
    pub(crate) pos: usize,
    cfg: &'a DecodeConfig,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], cfg: &'a DecodeConfig) -> Self {
        Self { input, pos: 0, cfg }
    }

    pub(crate) fn skip_ws(&mut self) {
        simd_utils::skip_whitespace(self.input, &mut self.pos);
        while self.pos < self.input.len() && is_ws(self.input[self.pos]) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), DecodeError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(DecodeError::UnexpectedByte { byte: b, pos: self.pos }),
            None => Err(DecodeError::UnexpectedEof),
        }
    }

    fn literal(&mut self, text: &'static [u8]) -> Result<(), DecodeError> {
        if self.input[self.pos..].starts_with(text) {
            self.pos += text.len();
            Ok(())
        } else {
            match self.peek() {
                Some(b) => Err(DecodeError::UnexpectedByte { byte: b, pos: self.pos }),
                None => Err(DecodeError::UnexpectedEof),
            }
        }
    }

    pub fn parse_value(&mut self, depth: u32) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::DepthExceeded(MAX_DEPTH));
        }
        self.skip_ws();
        match self.peek() {
            None => Err(DecodeError::UnexpectedEof),
            Some(b'"') => Ok(Value::Str(self.parse_string()?)),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b't') => {
                self.literal(b"true")?;
                Ok(Value::Bool(true))
            }
            Some(b'f') => {
                self.literal(b"false")?;
                Ok(Value::Bool(false))
            }
            Some(b'n') => {
                self.literal(b"null")?;
                Ok(Value::Null)
            }
            Some(b) if b == b'-' || b.is_ascii_digit() => self.parse_number(),
            Some(b) => Err(DecodeError::UnexpectedByte { byte: b, pos: self.pos }),
        }
    }

    fn parse_object(&mut self, depth: u32) -> Result<Value, DecodeError> {
        self.expect(b'{')?;
        self.skip_ws();
        let mut pairs = Vec::new();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(pairs));
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return Err(match self.peek() {
                    Some(b) => DecodeError::UnexpectedByte { byte: b, pos: self.pos },
                    None => DecodeError::UnexpectedEof,
                });
            }
            let key_text = String::from_utf8(self.parse_string()?.to_vec())
                .map_err(|e| DecodeError::InvalidUtf8 { pos: e.utf8_error().valid_up_to() })?;
            let key: Key = key_from_decoded(self.cfg, key_text);

            self.skip_ws();
            self.expect(b':')?;
            let value = self.parse_value(depth + 1)?;
            pairs.push((key, value));

            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b) => return Err(DecodeError::UnexpectedByte { byte: b, pos: self.pos }),
                None => return Err(DecodeError::UnexpectedEof),
            }
        }
        Ok(Value::Object(pairs))
    }

    fn parse_array(&mut self, depth: u32) -> Result<Value, DecodeError> {
        self.expect(b'[')?;
        self.skip_ws();
        let mut items = Vec::new();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b) => return Err(DecodeError::UnexpectedByte { byte: b, pos: self.pos }),
                None => return Err(DecodeError::UnexpectedEof),
            }
        }
        Ok(Value::Array(items))
    }

    /// Parse a `"`-delimited JSON string, unescaping into an owned buffer.
    /// Bulk-copies unescaped runs the same way the encoder's string escaper
    /// does, just in the opposite direction: `simd_utils::find_escape_json`
    /// finds the next byte needing interpretation instead of emission.
    fn parse_string(&mut self) -> Result<Arc<[u8]>, DecodeError> {
        self.expect(b'"')?;
        let start = self.pos;
        // Fast path: if there's no escape before the closing quote, borrow
        // the run directly instead of building an owned buffer.
        let end_quote = simd_utils::find_escape_json(self.input, start);
        if end_quote < self.input.len() && self.input[end_quote] == b'"' {
            let bytes = &self.input[start..end_quote];
            std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
                pos: start + e.valid_up_to(),
            })?;
            self.pos = end_quote + 1;
            return Ok(Arc::from(bytes));
        }

        let mut out = Vec::with_capacity(end_quote.saturating_sub(start));
        let mut pos = start;
        loop {
            let next = simd_utils::find_escape_json(self.input, pos);
            if next >= self.input.len() {
                return Err(DecodeError::UnexpectedEof);
            }
            out.extend_from_slice(&self.input[pos..next]);
            match self.input[next] {
                b'"' => {
                    self.pos = next + 1;
                    std::str::from_utf8(&out)
                        .map_err(|e| DecodeError::InvalidUtf8 { pos: e.valid_up_to() })?;
                    return Ok(Arc::from(out));
                }
                b'\\' => {
                    pos = self.parse_escape(next, &mut out)?;
                }
                b if b < 0x20 => return Err(DecodeError::UnexpectedByte { byte: b, pos: next }),
                _ => unreachable!("find_escape_json only stops at '\"', '\\\\', or control bytes"),
            }
        }
    }

    /// `self.input[at]` is the backslash; append the decoded escape to `out`
    /// and return the position just past it.
    fn parse_escape(&mut self, at: usize, out: &mut Vec<u8>) -> Result<usize, DecodeError> {
        let esc = *self.input.get(at + 1).ok_or(DecodeError::UnexpectedEof)?;
        match esc {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let cp = self.parse_hex4(at + 2)?;
                let scalar = if (0xD800..=0xDBFF).contains(&cp) {
                    if self.input.get(at + 6) != Some(&b'\\') || self.input.get(at + 7) != Some(&b'u') {
                        return Err(DecodeError::InvalidEscape { pos: at });
                    }
                    let low = self.parse_hex4(at + 8)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(DecodeError::InvalidEscape { pos: at });
                    }
                    let combined = 0x10000 + ((cp - 0xD800) << 10) + (low - 0xDC00);
                    self.pos = at + 12;
                    combined
                } else {
                    self.pos = at + 6;
                    cp
                };
                let ch = char::from_u32(scalar).ok_or(DecodeError::InvalidEscape { pos: at })?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                return Ok(self.pos);
            }
            _ => return Err(DecodeError::InvalidEscape { pos: at }),
        }
        self.pos = at + 2;
        Ok(self.pos)
    }

    fn parse_hex4(&self, at: usize) -> Result<u32, DecodeError> {
        let digits = self
            .input
            .get(at..at + 4)
            .ok_or(DecodeError::UnexpectedEof)?;
        let s = std::str::from_utf8(digits).map_err(|_| DecodeError::InvalidEscape { pos: at })?;
        u32::from_str_radix(s, 16).map_err(|_| DecodeError::InvalidEscape { pos: at })
    }

    /// Parse a JSON number literal: `-?(0|[1-9]\d*)(\.\d+)?([eE][+-]?\d+)?`.
    /// Integers with no fractional/exponent part become [`Value::Int`]
    /// (arbitrary-width, via `num-bigint`'s text parser); everything else
    /// becomes [`Value::Float`] via `lexical_core::parse`, the same crate
    /// the teacher's own `direct_decode.rs` reaches for once a number needs
    /// more than the cheap small-integer fast path.
    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        let digits_start = self.pos;
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b) if b.is_ascii_digit() => self.skip_digits(),
            _ => return Err(DecodeError::InvalidNumber { pos: start }),
        }
        if self.pos == digits_start {
            return Err(DecodeError::InvalidNumber { pos: start });
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            let frac_start = self.pos;
            self.skip_digits();
            if self.pos == frac_start {
                return Err(DecodeError::InvalidNumber { pos: start });
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            self.skip_digits();
            if self.pos == exp_start {
                return Err(DecodeError::InvalidNumber { pos: start });
            }
        }

        let text = std::str::from_utf8(&self.input[start..self.pos])
            .expect("number literal is pure ASCII by construction");

        if is_float {
            // Same crate the teacher's own `direct_decode.rs` reaches for
            // once a number literal needs more than the small-integer fast
            // path.
            let f: f64 = lexical_core::parse(text.as_bytes())
                .map_err(|_| DecodeError::InvalidNumber { pos: start })?;
            Ok(Value::Float(f))
        } else {
            let digits = std::str::from_utf8(&self.input[digits_start..self.pos])
                .expect("digits are pure ASCII");
            let n: BigInt = digits.parse().map_err(|_| DecodeError::InvalidNumber { pos: start })?;
            Ok(Value::Int(if negative { -n } else { n }))
        }
    }

    fn skip_digits(&mut self) {
        simd_utils::skip_ascii_digits(self.input, &mut self.pos);
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
    }
}

#[inline(always)]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeConfig;

    fn parse(input: &str) -> Value {
        let cfg = DecodeConfig::new();
        let mut p = Parser::new(input.as_bytes(), &cfg);
        p.parse_value(0).unwrap()
    }

    #[test]
    fn integers_are_bigint() {
        assert!(matches!(parse("42"), Value::Int(_)));
        assert!(matches!(parse("-7"), Value::Int(_)));
    }

    #[test]
    fn floats_need_frac_or_exp() {
        assert!(matches!(parse("1.5"), Value::Float(f) if f == 1.5));
        assert!(matches!(parse("1e10"), Value::Float(f) if f == 1e10));
    }

    #[test]
    fn string_with_simple_escapes() {
        let Value::Str(s) = parse(r#""a\nb\tc""#) else { panic!("expected string") };
        assert_eq!(&*s, b"a\nb\tc");
    }

    #[test]
    fn string_with_unicode_escape() {
        let Value::Str(s) = parse(r#""é""#) else { panic!("expected string") };
        assert_eq!(std::str::from_utf8(&s).unwrap(), "é");
    }

    #[test]
    fn string_with_surrogate_pair() {
        let Value::Str(s) = parse(r#""😀""#) else { panic!("expected string") };
        assert_eq!(std::str::from_utf8(&s).unwrap(), "\u{1F600}");
    }

    #[test]
    fn nested_array_and_object() {
        let v = parse(r#"{"a":1,"b":[true,false,null]}"#);
        let Value::Object(pairs) = v else { panic!("expected object") };
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn empty_array_and_object() {
        assert!(matches!(parse("[]"), Value::Array(v) if v.is_empty()));
        assert!(matches!(parse("{}"), Value::Object(v) if v.is_empty()));
    }
}
