//! Encode configuration (spec.md §3 — "Configuration").
//!
//! Ported from the teacher's `direct_json::{EscapeMode, FormatContext,
//! FormatOptions}`, generalized from an Elixir options-map lookup to a plain
//! Rust builder.

use smallvec::SmallVec;

/// Selects the string-escape profile (spec.md §3/§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Standard JSON escaping. Default.
    #[default]
    Json,
    /// Escape line/paragraph separators (U+2028/U+2029) for embedding in a
    /// `<script>` tag or a JS string literal.
    JavaScript,
    /// Also escape `<`, `>`, `&`, `/` for safe HTML embedding.
    HtmlSafe,
    /// Escape every non-ASCII code point as `\uXXXX` (or a surrogate pair).
    Unicode,
}

/// Selects whether object emission deduplicates keys (spec.md §3/§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapsMode {
    /// JSON permits duplicate keys; later keys silently override earlier
    /// ones (the `serde_json`/RFC 7159 default).
    #[default]
    Naive,
    /// Reject duplicate keys within one object with
    /// [`crate::EncodeError::DuplicateKey`].
    Strict,
}

/// Pretty-printing separators, ported from the teacher's `FormatContext`.
/// Heap-allocated once and shared across the whole walk rather than cloned
/// per nesting level.
#[derive(Debug, Clone)]
pub struct PrettyOpts {
    pub line_separator: SmallVec<[u8; 16]>,
    pub after_colon: SmallVec<[u8; 16]>,
    pub indent: SmallVec<[u8; 16]>,
}

impl Default for PrettyOpts {
    fn default() -> Self {
        Self {
            line_separator: SmallVec::from_slice(b"\n"),
            after_colon: SmallVec::from_slice(b" "),
            indent: SmallVec::from_slice(b"  "),
        }
    }
}

/// Immutable encode configuration (spec.md §3 — "Configuration"; spec.md §6
/// — the `opts` mapping).
#[derive(Debug, Clone, Default)]
pub struct EncodeConfig {
    pub(crate) escape: EscapeMode,
    pub(crate) maps: MapsMode,
    pub(crate) pretty: Option<PrettyOpts>,
}

impl EncodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escape(mut self, mode: EscapeMode) -> Self {
        self.escape = mode;
        self
    }

    pub fn maps(mut self, mode: MapsMode) -> Self {
        self.maps = mode;
        self
    }

    /// Enable pretty-printing with the given separators/indent. Pretty
    /// printing is a pure formatting concern layered on top of spec.md's
    /// encoder (see SPEC_FULL.md §1) — it changes whitespace only, never the
    /// escaping or key-deduplication semantics spec.md specifies.
    pub fn pretty(mut self, opts: PrettyOpts) -> Self {
        self.pretty = Some(opts);
        self
    }

    pub fn compact(mut self) -> Self {
        self.pretty = None;
        self
    }

    pub(crate) fn escape_mode(&self) -> EscapeMode {
        self.escape
    }

    pub(crate) fn strict_keys(&self) -> bool {
        self.maps == MapsMode::Strict
    }

    pub(crate) fn pretty_opts(&self) -> Option<&PrettyOpts> {
        self.pretty.as_ref()
    }
}
