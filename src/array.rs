//! The array emitter (spec.md §4.5).
//!
//! Ported from the teacher's `write_list`: an empty list is the two-byte
//! literal `[]`, otherwise the first element is written with no leading
//! separator and every subsequent one is preceded by `,`.
use crate::error::EncodeError;
use crate::fragment::Fragments;
use crate::value::Value;
use crate::walk::{walk, WalkCtx};

pub fn write_array<'v>(
    items: &'v [Value],
    ctx: WalkCtx<'_>,
    out: &mut Fragments<'v>,
) -> Result<(), EncodeError> {
    if items.is_empty() {
        out.push_static(b"[]");
        return Ok(());
    }

    out.push_static(b"[");
    let mut first = true;
    for item in items {
        if !first {
            out.push_static(b",");
        }
        ctx.write_newline(out);
        walk(item, ctx, out)?;
        first = false;
    }
    let closing = WalkCtx { cfg: ctx.cfg, depth: ctx.depth.saturating_sub(1) };
    closing.write_newline(out);
    out.push_static(b"]");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodeConfig;

    fn encode(items: &[Value]) -> String {
        let cfg = EncodeConfig::new();
        let mut out = Fragments::new();
        write_array(items, WalkCtx::new(&cfg), &mut out).unwrap();
        String::from_utf8(out.flatten()).unwrap()
    }

    #[test]
    fn empty_array_is_two_bytes() {
        assert_eq!(encode(&[]), "[]");
    }

    #[test]
    fn mixed_scalars() {
        let items = vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)];
        assert_eq!(encode(&items), "[1,2,3]");
    }

    #[test]
    fn nested_arrays() {
        let inner = Value::array([Value::Bool(true), Value::Bool(false), Value::Null]);
        assert_eq!(encode(&[inner]), "[[true,false,null]]");
    }
}
