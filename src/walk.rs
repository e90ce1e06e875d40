//! The value walker (spec.md §4.3).
//!
//! Ported from the teacher's `term_to_json`/`FormatOptions`: dispatch by
//! kind, a `depth` counter threaded through every recursive call and checked
//! against [`MAX_DEPTH`] before any work happens, and a `nested()` step that
//! increments depth and (when pretty-printing) the indent level together.
use itoa::Buffer as IntBuffer;
use ryu::Buffer as FloatBuffer;

use crate::array;
use crate::config::{EncodeConfig, PrettyOpts};
use crate::error::EncodeError;
use crate::escape::escape_string;
use crate::fragment::Fragments;
use crate::object;
use crate::value::{Key, Value};

/// Mirrors the teacher's `const MAX_DEPTH: u32 = 128`.
pub const MAX_DEPTH: u32 = 128;

/// Per-call walk state: the shared config plus the current recursion depth
/// and indent level. Cheap to copy, threaded by value like the teacher's
/// `FormatOptions`.
#[derive(Clone, Copy)]
pub struct WalkCtx<'a> {
    pub cfg: &'a EncodeConfig,
    pub depth: u32,
}

impl<'a> WalkCtx<'a> {
    pub fn new(cfg: &'a EncodeConfig) -> Self {
        Self { cfg, depth: 0 }
    }

    fn nested(self) -> Self {
        Self { cfg: self.cfg, depth: self.depth + 1 }
    }

    fn pretty(&self) -> Option<&'a PrettyOpts> {
        self.cfg.pretty_opts()
    }

    pub(crate) fn write_newline(&self, out: &mut Fragments<'_>) {
        if let Some(p) = self.pretty() {
            out.push_owned(p.line_separator.to_vec());
            for _ in 0..self.depth {
                out.push_owned(p.indent.to_vec());
            }
        }
    }

    pub(crate) fn write_space(&self, out: &mut Fragments<'_>) {
        if let Some(p) = self.pretty() {
            out.push_owned(p.after_colon.to_vec());
        }
    }
}

/// Walk `value`, appending its encoding to `out` (spec.md §4.3).
pub fn walk<'v>(value: &'v Value, ctx: WalkCtx<'_>, out: &mut Fragments<'v>) -> Result<(), EncodeError> {
    if ctx.depth > MAX_DEPTH {
        return Err(EncodeError::DepthExceeded(MAX_DEPTH));
    }

    match value {
        Value::Null => out.push_static(b"null"),
        Value::Bool(true) => out.push_static(b"true"),
        Value::Bool(false) => out.push_static(b"false"),
        Value::Int(n) => write_int(n, out),
        Value::Float(f) => write_float(*f, out)?,
        Value::Str(bytes) => escape_string(bytes, ctx.cfg.escape_mode(), b"", out)?,
        Value::Sym(name) => escape_string(name.as_bytes(), ctx.cfg.escape_mode(), b"", out)?,
        Value::Array(items) => array::write_array(items, ctx.nested(), out)?,
        Value::Object(pairs) => object::write_object(pairs, ctx.nested(), out)?,
        Value::Extension(ext) => {
            let fragments = ext
                .encode(ctx.cfg)
                .map_err(|e| EncodeError::ExtensionError(e.to_string()))?;
            out.extend(fragments);
        }
    }
    Ok(())
}

/// Encode a textual key through the same escaper every string value uses
/// (spec.md §4.4 — `encode_key`). Symbolic keys are converted to text first
/// (spec.md §9 — atom-like keys).
pub fn encode_key<'v>(key: &'v Key, ctx: WalkCtx<'_>, out: &mut Fragments<'v>) -> Result<(), EncodeError> {
    escape_string(key.as_text().as_bytes(), ctx.cfg.escape_mode(), b"", out)
}

/// Base-10 text, sign only if negative (spec.md §4.3). Ported from the
/// teacher's `write_integer`, which tries `i64` before falling back to the
/// arbitrary-width path — `itoa` only handles fixed-width integers, so the
/// fast path covers the overwhelming majority of real values and `BigInt`'s
/// own `Display` covers the rest.
fn write_int(n: &num_bigint::BigInt, out: &mut Fragments<'_>) {
    if let Ok(n) = i64::try_from(n.clone()) {
        let mut buf = IntBuffer::new();
        out.push_owned(buf.format(n).as_bytes().to_vec());
    } else {
        out.push_owned(n.to_string().into_bytes());
    }
}

/// spec.md §4.3: "NaN/Infinity must fail with an encode error since JSON
/// has no syntax for them" — the teacher's `write_float` does exactly this
/// (`Non-finite float` -> `InvalidData`); only small integers use `itoa`, all
/// others route through `ryu`'s shortest-round-trip formatter.
fn write_float(f: f64, out: &mut Fragments<'_>) -> Result<(), EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::UnrepresentableNumber);
    }
    let mut buf = FloatBuffer::new();
    out.push_owned(buf.format(f).as_bytes().to_vec());
    Ok(())
}
