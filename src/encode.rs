//! Public encoder entry points (spec.md §6).
//!
//! The teacher exposes these as four rustler NIFs (`encode`, `encode!`,
//! `encode_to_iodata`, `encode_to_iodata!`) that all funnel into
//! `term_to_json`. This crate keeps the same four-shape API as plain
//! functions: `encode`/`encode_to_iodata` return `Result`, and the two
//! `_bang` wrappers in `lib.rs` panic instead.
use tracing::debug;

use crate::config::EncodeConfig;
use crate::error::EncodeError;
use crate::fragment::Fragments;
use crate::value::Value;
use crate::walk::{walk, WalkCtx};

/// Encode `value` to a flat `String` (spec.md §6 — `encode(value, opts)`).
pub fn encode(value: &Value, cfg: &EncodeConfig) -> Result<String, EncodeError> {
    debug!("encoding value to a flat string");
    let fragments = encode_to_iodata(value, cfg)?;
    let bytes = fragments.flatten();
    Ok(String::from_utf8(bytes).expect("escaper only emits validated UTF-8"))
}

/// Encode `value` to a fragment list, suitable for vectored I/O without a
/// contiguous copy (spec.md §6 — `encode_to_iodata(value, opts)`).
pub fn encode_to_iodata<'v>(value: &'v Value, cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
    debug!("encoding value to a fragment list");
    let mut out = Fragments::new();
    walk(value, WalkCtx::new(cfg), &mut out)?;
    Ok(out)
}
