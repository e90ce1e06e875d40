//! A high-throughput JSON codec over a generic in-memory value tree.
//!
//! The encoder (the hard engineering here) serializes a [`Value`] into RFC
//! 7159 text through a family of byte-oriented escape state machines driven
//! by a compile-time dispatch table. The decoder parses such text back into
//! a `Value`; its internals are a fresh design — only its public contract
//! (`decode`/`decode_bang`) is load-bearing.
#![feature(portable_simd)]

mod array;
mod config;
mod decode;
mod encode;
mod error;
mod escape;
mod ext;
mod fragment;
mod object;
mod simd_utils;
mod value;
mod walk;

pub use config::{EncodeConfig, EscapeMode, MapsMode, PrettyOpts};
pub use decode::{decode, DecodeConfig, DecodeError, KeysMode};
pub use encode::{encode, encode_to_iodata};
pub use error::EncodeError;
pub use ext::{Date, Decimal, Encode, Fragment, MapSet, NaiveDateTime, OffsetDateTime, RangeValue, Time};
pub use fragment::Fragments;
pub use value::{Key, Value};

/// Encode `value`, panicking on error.
///
/// Mirrors the teacher NIF's bang-suffixed encode entry points: the bang
/// variants exist for callers who have already validated their value tree
/// and want a `Result`-free call.
pub fn encode_bang(value: &Value, cfg: &EncodeConfig) -> String {
    encode(value, cfg).expect("jayson::encode_bang: encode failed")
}

/// Encode `value` to a fragment list, panicking on error.
pub fn encode_to_iodata_bang<'v>(value: &'v Value, cfg: &EncodeConfig) -> Fragments<'v> {
    encode_to_iodata(value, cfg).expect("jayson::encode_to_iodata_bang: encode failed")
}

/// Decode `input`, panicking on error.
pub fn decode_bang(input: &[u8], cfg: &DecodeConfig) -> Value {
    decode(input, cfg).expect("jayson::decode_bang: decode failed")
}
