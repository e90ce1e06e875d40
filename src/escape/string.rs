//! The string escaper state machine (spec.md §4.2).
//!
//! Two states, exactly as spec.md describes them: `scan` (no pending
//! verbatim run) and `chunk(len)` (a run of `len` safe bytes pending since
//! `skip`). Below, `pos` plays the role of `skip + len` and `skip` the role
//! of `skip`: each loop iteration finds the next byte that can't stay in
//! `chunk` state (via the bulk scanners ported from the teacher's
//! `simd_utils::find_escape_*`), flushes `bytes[skip..next]` as one
//! borrowed fragment (closing the chunk), handles the one interesting byte
//! or code point, and returns to `scan` by setting `skip` just past it.
//!
//! Property (a) (shared references, no per-byte copy) and (b) (runs emitted
//! in one segment) both fall out of this: the only owned allocations are
//! the escape replacements themselves.
use crate::config::EscapeMode;
use crate::error::EncodeError;
use crate::fragment::Fragments;
use crate::simd_utils;

use super::table::{self, Action};

/// Emit `"`, the escaped contents of `bytes` under `mode`, `"`, then `tail`
/// verbatim (spec.md §4.2: "emit a fragment list `"…"tail`").
pub fn escape_string<'v>(
    bytes: &'v [u8],
    mode: EscapeMode,
    tail: &'static [u8],
    out: &mut Fragments<'v>,
) -> Result<(), EncodeError> {
    let s = match simdutf8::compat::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let pos = e.valid_up_to();
            let byte = bytes.get(pos).copied().unwrap_or(0);
            return Err(EncodeError::InvalidByte {
                byte,
                string: String::from_utf8_lossy(bytes).into_owned(),
            });
        }
    };

    out.push_static(b"\"");
    write_escaped(s.as_bytes(), mode, out);
    out.push_static(b"\"");
    if !tail.is_empty() {
        out.push_static(tail);
    }
    Ok(())
}

fn write_escaped<'v>(bytes: &'v [u8], mode: EscapeMode, out: &mut Fragments<'v>) {
    match mode {
        EscapeMode::Json => write_json(bytes, out),
        EscapeMode::HtmlSafe => write_html_safe(bytes, out),
        EscapeMode::JavaScript => write_javascript(bytes, out),
        EscapeMode::Unicode => write_unicode(bytes, out),
    }
}

#[inline]
fn control_escape(b: u8) -> &'static [u8] {
    &table::CONTROL_ESCAPES[b as usize]
}

/// Dispatch one ASCII byte already known to need escaping through its
/// `Action` (spec.md §4.1).
#[inline]
fn emit_ascii_escape(table: &'static [Action; 128], b: u8, out: &mut Fragments<'_>) {
    match table::classify(table, b) {
        Action::Chunk => unreachable!("scanner only reports bytes that need escaping"),
        Action::Escape(seq) => out.push_static(seq),
        Action::Unicode => out.push_static(control_escape(b)),
    }
}

/// Length, in bytes, of the UTF-8 sequence starting with `b`.
#[inline(always)]
fn utf8_char_len(b: u8) -> usize {
    if b < 0x80 {
        1
    } else if b < 0xE0 {
        2
    } else if b < 0xF0 {
        3
    } else {
        4
    }
}

/// If `bytes[pos..]` starts with the 3-byte encoding of U+2028 or U+2029,
/// return its replacement and the position just past it (spec.md §4.2.1).
#[inline]
fn line_or_para_separator(bytes: &[u8], pos: usize) -> Option<(&'static [u8], usize)> {
    if bytes[pos] == 0xE2 && pos + 2 < bytes.len() && bytes[pos + 1] == 0x80 {
        if bytes[pos + 2] == 0xA8 {
            return Some((b"\\u2028", pos + 3));
        }
        if bytes[pos + 2] == 0xA9 {
            return Some((b"\\u2029", pos + 3));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// json — the ASCII table covers every byte that needs escaping; any
// multi-byte UTF-8 sequence passes through verbatim.
// ---------------------------------------------------------------------------

fn write_json<'v>(bytes: &'v [u8], out: &mut Fragments<'v>) {
    let mut pos = 0;
    while pos < bytes.len() {
        let next = simd_utils::find_escape_json(bytes, pos);
        out.push_borrowed(&bytes[pos..next]);
        if next >= bytes.len() {
            break;
        }
        emit_ascii_escape(&table::STANDARD, bytes[next], out);
        pos = next + 1;
    }
}

// ---------------------------------------------------------------------------
// html_safe — the ASCII table additionally escapes `<`, `>`, `&`, `/`, and
// U+2028/U+2029 are escaped on top of that (spec.md §4.2.1).
// ---------------------------------------------------------------------------

fn write_html_safe<'v>(bytes: &'v [u8], out: &mut Fragments<'v>) {
    let mut pos = 0;
    while pos < bytes.len() {
        let next = simd_utils::find_escape_html(bytes, pos);
        out.push_borrowed(&bytes[pos..next]);
        if next >= bytes.len() {
            break;
        }
        pos = emit_html_event(bytes, next, out);
    }
}

fn emit_html_event<'v>(bytes: &'v [u8], pos: usize, out: &mut Fragments<'v>) -> usize {
    let b = bytes[pos];
    if b < 0x20 || b == b'"' || b == b'\\' {
        emit_ascii_escape(&table::HTML_SAFE, b, out);
        return pos + 1;
    }
    match b {
        b'/' => {
            out.push_static(b"\\/");
            return pos + 1;
        }
        _ => {}
    }
    if let Some((seq, end)) = line_or_para_separator(bytes, pos) {
        out.push_static(seq);
        return end;
    }
    let end = (pos + utf8_char_len(b)).min(bytes.len());
    out.push_borrowed(&bytes[pos..end]);
    end
}

// ---------------------------------------------------------------------------
// javascript — only U+2028/U+2029 get special handling beyond plain json.
// ---------------------------------------------------------------------------

fn write_javascript<'v>(bytes: &'v [u8], out: &mut Fragments<'v>) {
    let mut pos = 0;
    while pos < bytes.len() {
        let next = simd_utils::find_escape_javascript(bytes, pos);
        out.push_borrowed(&bytes[pos..next]);
        if next >= bytes.len() {
            break;
        }
        pos = emit_javascript_event(bytes, next, out);
    }
}

fn emit_javascript_event<'v>(bytes: &'v [u8], pos: usize, out: &mut Fragments<'v>) -> usize {
    let b = bytes[pos];
    if b < 0x20 || b == b'"' || b == b'\\' {
        emit_ascii_escape(&table::STANDARD, b, out);
        return pos + 1;
    }
    if let Some((seq, end)) = line_or_para_separator(bytes, pos) {
        out.push_static(seq);
        return end;
    }
    let end = (pos + utf8_char_len(b)).min(bytes.len());
    out.push_borrowed(&bytes[pos..end]);
    end
}

// ---------------------------------------------------------------------------
// unicode — every non-ASCII code point is escaped (spec.md §4.2.2).
// ---------------------------------------------------------------------------

fn write_unicode<'v>(bytes: &'v [u8], out: &mut Fragments<'v>) {
    let mut pos = 0;
    while pos < bytes.len() {
        let next = simd_utils::find_escape_unicode(bytes, pos);
        out.push_borrowed(&bytes[pos..next]);
        if next >= bytes.len() {
            break;
        }
        pos = emit_unicode_event(bytes, next, out);
    }
}

fn emit_unicode_event<'v>(bytes: &'v [u8], pos: usize, out: &mut Fragments<'v>) -> usize {
    let b = bytes[pos];
    if b < 0x20 || b == b'"' || b == b'\\' {
        emit_ascii_escape(&table::STANDARD, b, out);
        return pos + 1;
    }
    debug_assert!(b >= 0x80, "the json-escape conditions above cover every other ASCII byte");
    let end = (pos + utf8_char_len(b)).min(bytes.len());
    let ch = std::str::from_utf8(&bytes[pos..end])
        .expect("string was validated as UTF-8 before escaping began")
        .chars()
        .next()
        .expect("non-empty slice of a single code point");
    write_unicode_escape(ch as u32, out);
    end
}

/// Encode one code point per spec.md §4.2.2's table. Above U+FFFF this emits
/// a UTF-16 surrogate pair with the *correct* high/low prefixes — the
/// design notes call out a defect in the source where both halves use the
/// same `\uD` prefix; this is the fix they recommend.
fn write_unicode_escape(cp: u32, out: &mut Fragments<'_>) {
    if cp <= 0xFFFF {
        out.push_owned(format!("\\u{:04x}", cp).into_bytes());
    } else {
        let c = cp - 0x10000;
        let high = 0xD800 + (c >> 10);
        let low = 0xDC00 + (c & 0x3FF);
        out.push_owned(format!("\\u{:04x}\\u{:04x}", high, low).into_bytes());
    }
}
