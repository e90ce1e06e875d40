//! The in-memory value tree (spec.md §3 — "Value").
use std::sync::Arc;

use num_bigint::BigInt;

use crate::ext::Encode;

/// A JSON object key. Strings and symbolic (atom-like) names are kept
/// distinct per spec.md §4.4/§9 ("atom-like keys") so that `encode_key` can
/// coerce either to text without the caller losing which one it started
/// with — useful to callers that, like the teacher's Elixir host, accept
/// both string and symbolic map keys interchangeably.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// An already-textual key, used as-is.
    Str(String),
    /// A symbolic (atom-like) key; converted to its textual name before
    /// escaping.
    Sym(String),
}

impl Key {
    /// The textual form that gets escaped and written to the output.
    pub fn as_text(&self) -> &str {
        match self {
            Key::Str(s) => s,
            Key::Sym(s) => s,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// A JSON value tree.
///
/// Integers are arbitrary-width (bounded only by the host's memory, via
/// [`BigInt`]); floats are IEEE-754 binary64. Strings are raw bytes, not a
/// validated `str` — spec.md §3 models strings as "UTF-8 byte sequences"
/// that the escaper itself must validate (spec.md §4.2 Failure clause;
/// tested by spec.md §8 scenario 6), matching the teacher's `write_binary`,
/// which runs `simdutf8::basic::from_utf8` on an arbitrary host binary
/// rather than trusting a type-level guarantee. [`Value::Sym`] is spec.md
/// §4.3's atom-like symbolic value, kept as its own variant rather than
/// folded into `Str`. Array/object children and string bytes are
/// reference-counted so a `Value` can be walked and fragmented without an
/// up-front deep copy — the string escaper then borrows directly out of the
/// `Arc<[u8]>` for every unescaped run (spec.md §3 invariant: safe bytes are
/// emitted as shared references to the original slice, never copied).
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Str(Arc<[u8]>),
    /// A value that logically names a string but is not itself a byte
    /// string — spec.md §4.3's "atom-like symbolic value" dispatch arm.
    /// Converted to its textual name and routed through the string escaper,
    /// same as [`Value::Str`], but kept distinct so a caller whose source
    /// values draw symbolic and string names from different pools (the
    /// teacher's Elixir atoms vs. binaries) doesn't have to normalize them
    /// before building a `Value` tree.
    Sym(String),
    Array(Vec<Value>),
    /// An ordered sequence of (key, value) pairs — the source map's
    /// iteration order, preserved exactly (spec.md §4.4).
    Object(Vec<(Key, Value)>),
    /// A value contributed by a user type via the [`Encode`] trait
    /// (spec.md §4.6 — "Extension hook").
    Extension(Arc<dyn Encode>),
}

impl Value {
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    pub fn object(pairs: impl IntoIterator<Item = (Key, Value)>) -> Value {
        Value::Object(pairs.into_iter().collect())
    }

    /// Build a string value from a known-valid `&str`.
    pub fn str(s: impl AsRef<str>) -> Value {
        Value::Str(Arc::from(s.as_ref().as_bytes()))
    }

    /// Build a string value from raw bytes whose UTF-8 validity is not yet
    /// known — the escaper validates it lazily at encode time and fails
    /// with [`crate::EncodeError::InvalidByte`] if it isn't valid UTF-8.
    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Value {
        Value::Str(b.into())
    }

    /// Build an atom-like symbolic value (spec.md §4.3) from its textual
    /// name.
    pub fn sym(name: impl Into<String>) -> Value {
        Value::Sym(name.into())
    }

    pub fn extension(ext: impl Encode + 'static) -> Value {
        Value::Extension(Arc::new(ext))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(BigInt::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Int(BigInt::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
