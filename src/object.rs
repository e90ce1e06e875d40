//! The object emitter (spec.md §4.4).
//!
//! Ported from the teacher's `write_map`: bracket with `{`/`}`, comma-join
//! pairs, one pass through `check_strict_key` per pair when strict mode is
//! on. The teacher's visited set is a `HashSet<String>` built from the key's
//! decoded text; this crate's visited set instead holds each key's already
//! *escaped* bytes, since spec.md §4.4 strict mode defines the membership
//! token as "the key's already-escaped fragment flattened into a single
//! byte sequence" — two keys that escape identically are meant to collide
//! even if their source text differs (spec.md §9 open question, resolved:
//! yes, this is intended).
use std::collections::HashSet;

use crate::error::EncodeError;
use crate::fragment::Fragments;
use crate::value::{Key, Value};
use crate::walk::{encode_key, walk, WalkCtx};

pub fn write_object<'v>(
    pairs: &'v [(Key, Value)],
    ctx: WalkCtx<'_>,
    out: &mut Fragments<'v>,
) -> Result<(), EncodeError> {
    out.push_static(b"{");

    let mut seen: Option<HashSet<Vec<u8>>> =
        if ctx.cfg.strict_keys() { Some(HashSet::with_capacity(pairs.len())) } else { None };

    let mut first = true;
    for (key, value) in pairs {
        if !first {
            out.push_static(b",");
        }
        ctx.write_newline(out);

        let mut key_fragment = Fragments::new();
        encode_key(key, ctx, &mut key_fragment)?;

        if let Some(seen) = seen.as_mut() {
            let flat = key_fragment.flatten();
            if !seen.insert(flat) {
                return Err(EncodeError::DuplicateKey(key.as_text().to_owned()));
            }
        }

        out.extend(key_fragment);
        out.push_static(b":");
        ctx.write_space(out);
        walk(value, ctx, out)?;

        first = false;
    }

    if !first {
        // closing brace dedents back to the parent's indent level
        let closing = WalkCtx { cfg: ctx.cfg, depth: ctx.depth.saturating_sub(1) };
        closing.write_newline(out);
    }
    out.push_static(b"}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncodeConfig, MapsMode};

    fn pairs(items: &[(&str, Value)]) -> Vec<(Key, Value)> {
        items.iter().map(|(k, v)| (Key::from(*k), v.clone())).collect()
    }

    fn encode(pairs: &[(Key, Value)], cfg: &EncodeConfig) -> Result<String, EncodeError> {
        let mut out = Fragments::new();
        write_object(pairs, WalkCtx::new(cfg), &mut out)?;
        Ok(String::from_utf8(out.flatten()).unwrap())
    }

    #[test]
    fn empty_object() {
        let cfg = EncodeConfig::new();
        assert_eq!(encode(&[], &cfg).unwrap(), "{}");
    }

    #[test]
    fn preserves_source_order() {
        let cfg = EncodeConfig::new();
        let p = pairs(&[("a", Value::from(1i64)), ("b", Value::Bool(true))]);
        assert_eq!(encode(&p, &cfg).unwrap(), "{\"a\":1,\"b\":true}");
    }

    #[test]
    fn naive_mode_allows_duplicate_keys() {
        let cfg = EncodeConfig::new().maps(MapsMode::Naive);
        let p = pairs(&[("foo", Value::from(1i64)), ("foo", Value::from(2i64))]);
        assert_eq!(encode(&p, &cfg).unwrap(), "{\"foo\":1,\"foo\":2}");
    }

    #[test]
    fn strict_mode_rejects_duplicate_keys() {
        let cfg = EncodeConfig::new().maps(MapsMode::Strict);
        let p = vec![
            (Key::Str("foo".to_string()), Value::from(1i64)),
            (Key::Sym("foo".to_string()), Value::from(2i64)),
        ];
        let err = encode(&p, &cfg).unwrap_err();
        assert_eq!(err, EncodeError::DuplicateKey("foo".to_string()));
    }
}
