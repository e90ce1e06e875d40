//! The decoder's public contract (spec.md §6 — "Decoder API (boundary
//! only)"). Internals are a fresh design; only `decode`/`decode_bang` and
//! the shapes of [`DecodeConfig`]/[`DecodeError`] are specified.
mod parser;

use tracing::debug;

use crate::value::{Key, Value};

/// How object keys are produced (spec.md §6 — "Recognized option: `keys`").
///
/// The teacher's `atoms`/`atoms!` variants intern Elixir atoms from decoded
/// text; that has no meaning outside the BEAM, so this crate keeps the two
/// variants that do (`Strings`, `Copy`) plus a user-supplied mapper as the
/// generalization of `atoms!`'s "intern, but only from a known set" safety
/// property — the caller supplies the set instead of the atom table.
#[derive(Clone, Default)]
pub enum KeysMode {
    /// Each key becomes a freshly allocated `Key::Str` (default).
    #[default]
    Strings,
    /// Like `Strings`, but documents the caller's intent to deduplicate
    /// identical key strings across the document (e.g. via an interner);
    /// this crate's decoder does not itself intern, since spec.md scopes
    /// decoder internals out — callers wanting interning should post-process
    /// the returned tree, or supply a custom mapper below.
    Copy,
    /// Route every decoded key through a caller-supplied closure.
    Custom(std::sync::Arc<dyn Fn(String) -> Key + Send + Sync>),
}

impl std::fmt::Debug for KeysMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeysMode::Strings => write!(f, "Strings"),
            KeysMode::Copy => write!(f, "Copy"),
            KeysMode::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Decoder configuration (spec.md §6). Unknown options are ignored rather
/// than rejected, matching spec.md's stated reference behavior.
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    pub keys: KeysMode,
}

impl DecodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(mut self, mode: KeysMode) -> Self {
        self.keys = mode;
        self
    }
}

/// A parse error (spec.md §6 — "returning a value tree or a parse error").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unexpected byte {byte:#04x} at position {pos}")]
    UnexpectedByte { byte: u8, pos: usize },

    #[error("invalid number literal at position {pos}")]
    InvalidNumber { pos: usize },

    #[error("invalid unicode escape at position {pos}")]
    InvalidEscape { pos: usize },

    #[error("invalid UTF-8 at byte position {pos}")]
    InvalidUtf8 { pos: usize },

    #[error("nesting depth exceeds maximum of {0}")]
    DepthExceeded(u32),

    #[error("trailing data after the top-level value at position {pos}")]
    TrailingData { pos: usize },
}

/// Parse `input` into a [`Value`] tree (spec.md §6 — `decode(input, opts)`).
pub fn decode(input: &[u8], cfg: &DecodeConfig) -> Result<Value, DecodeError> {
    debug!(len = input.len(), "decoding input");
    let mut p = parser::Parser::new(input, cfg);
    let value = p.parse_value(0)?;
    p.skip_ws();
    if p.pos < p.input.len() {
        return Err(DecodeError::TrailingData { pos: p.pos });
    }
    Ok(value)
}

pub(crate) fn key_from_decoded(cfg: &DecodeConfig, text: String) -> Key {
    match &cfg.keys {
        KeysMode::Strings | KeysMode::Copy => Key::Str(text),
        KeysMode::Custom(f) => f(text),
    }
}
