//! Structured encode errors (spec.md §4.7 / §7 — "Error reporter").
//!
//! The teacher crate raises these as `std::io::Error` wrapping a formatted
//! message, because an NIF can only hand the BEAM a raised term. A library
//! crate has no such constraint, so the taxonomy becomes a real enum —
//! `thiserror` is the idiomatic replacement for the teacher's
//! `std::io::Error::new(ErrorKind::InvalidData, format!(...))` pattern.

/// An error that aborts the current `encode` call.
///
/// Propagation policy: an `EncodeError` unwinds the recursive walk and aborts
/// the top-level call. There is no partial recovery — every fragment written
/// so far is discarded by the caller, since `encode`/`encode_to_iodata` only
/// hand back a finished value on `Ok`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Strict-mode key collision. Raised before any bytes of the offending
    /// key are committed to the output.
    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),

    /// A string value contained a byte that does not begin a valid UTF-8
    /// sequence. `byte` is the offending byte; `string` is the full
    /// original (lossily-displayed) input for diagnostics.
    #[error("invalid byte {byte:#04x} in string {string:?}")]
    InvalidByte { byte: u8, string: String },

    /// NaN or ±Infinity has no JSON representation.
    #[error("cannot encode non-finite float")]
    UnrepresentableNumber,

    /// The value tree nests deeper than the walker's recursion guard allows.
    #[error("nesting depth exceeds maximum of {0}")]
    DepthExceeded(u32),

    /// A user [`crate::Encode`] implementation failed.
    #[error("extension encode failed: {0}")]
    ExtensionError(String),

    /// Catch-all for messages that don't fit the taxonomy above.
    #[error("{0}")]
    Message(String),
}
