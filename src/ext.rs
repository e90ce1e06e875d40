//! The extension hook (spec.md §4.6) and its required built-in types.
//!
//! The teacher crate dispatches on an Elixir struct's `__struct__` atom
//! (`try_format_special_struct_from_name`) and hand-writes each one's
//! ISO-8601 text straight into the output `Write`r. There is no open trait
//! in the teacher — the dispatch is a fixed `match` over known struct names.
//! A library crate has no such closed universe of callers, so spec.md §9's
//! design note applies: "model this as a trait/interface with one method
//! `encode(&self, cfg) → Fragments` plus a marker type for pre-rendered,
//! splice as-is". The built-ins below keep the teacher's actual formatting
//! logic (field layout, zero-padding, fractional-second trimming) and just
//! reach it through the trait instead of a struct-name `match`.
use std::fmt;

use crate::config::EncodeConfig;
use crate::error::EncodeError;
use crate::fragment::Fragments;

/// A user type that contributes its own pre-rendered fragments to an encode
/// (spec.md §4.6).
///
/// Implementations MUST NOT rely on the walker to escape or validate their
/// output — whatever `encode` returns is spliced into the document exactly
/// as given. A type that just wants to emit a quoted string should still go
/// through [`crate::Value::str`] and the ordinary string escaper rather than
/// implementing this trait by hand.
pub trait Encode: fmt::Debug + Send + Sync {
    fn encode<'v>(&'v self, cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError>;
}

/// A marker wrapping bytes that are already valid JSON and should be spliced
/// in verbatim, bypassing the escaper entirely (spec.md §4.6 — "a
/// pre-rendered fragment marker whose payload is spliced in verbatim without
/// re-escaping").
#[derive(Debug, Clone)]
pub struct Fragment(pub Vec<u8>);

impl Encode for Fragment {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        let mut out = Fragments::new();
        out.push_borrowed(&self.0);
        Ok(out)
    }
}

fn quoted(text: String) -> Fragments<'static> {
    let mut out = Fragments::new();
    out.push_static(b"\"");
    out.push_owned(text.into_bytes());
    out.push_static(b"\"");
    out
}

/// A calendar date, ported from the teacher's `write_date` (`direct_json.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Encode for Date {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        Ok(quoted(format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)))
    }
}

/// A time of day, with a caller-supplied fractional-second precision, ported
/// from the teacher's `write_time`/`write_microsecond_frac`: the caller
/// states how many fractional digits are significant (0, 3, or 6 cover the
/// teacher's second/millisecond/microsecond sources) rather than having that
/// inferred back out of the stored microsecond value, which can't tell
/// "exactly 500ms" apart from "500 of 1000000 microseconds, truncated from a
/// finer source that happened to round to a multiple of 1000".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    /// Number of fractional-second digits to render (0..=6).
    pub precision: u32,
}

fn format_time(hour: u32, minute: u32, second: u32, microsecond: u32, precision: u32) -> String {
    let base = format!("{:02}:{:02}:{:02}", hour, minute, second);
    if precision == 0 {
        return base;
    }
    let precision = precision.min(6);
    let scale = 10u32.pow(6 - precision);
    let frac = microsecond / scale;
    format!("{}.{:0width$}", base, frac, width = precision as usize)
}

impl Encode for Time {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        Ok(quoted(format_time(self.hour, self.minute, self.second, self.microsecond, self.precision)))
    }
}

/// A civil (timezone-less) date-time, ported from the teacher's
/// `write_naive_datetime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaiveDateTime {
    pub date: Date,
    pub time: Time,
}

impl Encode for NaiveDateTime {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        Ok(quoted(format!(
            "{:04}-{:02}-{:02}T{}",
            self.date.year,
            self.date.month,
            self.date.day,
            format_time(
                self.time.hour,
                self.time.minute,
                self.time.second,
                self.time.microsecond,
                self.time.precision,
            ),
        )))
    }
}

/// An instant with a fixed UTC offset, ported from the teacher's
/// `write_datetime`: a zero offset renders as `Z`, any other as `+HH:MM` /
/// `-HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetDateTime {
    pub date: Date,
    pub time: Time,
    /// Offset from UTC, in seconds.
    pub utc_offset_secs: i32,
}

impl Encode for OffsetDateTime {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        let naive = format!(
            "{:04}-{:02}-{:02}T{}",
            self.date.year,
            self.date.month,
            self.date.day,
            format_time(
                self.time.hour,
                self.time.minute,
                self.time.second,
                self.time.microsecond,
                self.time.precision,
            ),
        );
        let offset = if self.utc_offset_secs == 0 {
            "Z".to_string()
        } else {
            let sign = if self.utc_offset_secs < 0 { '-' } else { '+' };
            let mag = self.utc_offset_secs.unsigned_abs();
            format!("{}{:02}:{:02}", sign, mag / 3600, (mag % 3600) / 60)
        };
        Ok(quoted(format!("{naive}{offset}")))
    }
}

/// An arbitrary-precision decimal in coefficient/exponent/sign form, ported
/// byte-for-byte from the teacher's `decimal::format_decimal` (the
/// coef/exp/sign shape itself comes from `Decimal.new/1`'s struct layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub coefficient: i128,
    pub exponent: i32,
    pub sign: i32,
}

fn format_decimal(coef: i128, exp: i32, sign: i32) -> String {
    let sign_str = if sign < 0 { "-" } else { "" };

    if exp >= 0 {
        let zeros = "0".repeat(exp as usize);
        format!("{sign_str}{coef}{zeros}")
    } else {
        let coef_str = coef.to_string();
        let decimal_places = (-exp) as usize;

        if decimal_places >= coef_str.len() {
            let leading_zeros = decimal_places - coef_str.len();
            format!("{}0.{}{}", sign_str, "0".repeat(leading_zeros), coef_str)
        } else {
            let (integer_part, decimal_part) = coef_str.split_at(coef_str.len() - decimal_places);
            format!("{sign_str}{integer_part}.{decimal_part}")
        }
    }
}

impl Encode for Decimal {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        Ok(quoted(format_decimal(self.coefficient, self.exponent, self.sign)))
    }
}

/// An unordered collection of values, encoded as a JSON array, ported from
/// the teacher's `try_format_mapset` (`direct_json.rs`): the teacher walks
/// the set's backing map and re-enters `term_to_json` per element; this
/// does the same through [`crate::walk::walk`].
#[derive(Debug, Clone)]
pub struct MapSet(pub Vec<crate::value::Value>);

impl Encode for MapSet {
    fn encode<'v>(&'v self, cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        let mut out = Fragments::new();
        out.push_static(b"[");
        let ctx = crate::walk::WalkCtx::new(cfg);
        let mut first = true;
        for elem in &self.0 {
            if !first {
                out.push_static(b",");
            }
            first = false;
            crate::walk::walk(elem, ctx, &mut out)?;
        }
        out.push_static(b"]");
        Ok(out)
    }
}

/// A range, encoded as `{"first":..,"last":..}`, with `"step"` included only
/// when it isn't 1 — ported from the teacher's `try_format_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValue {
    pub first: i64,
    pub last: i64,
    pub step: i64,
}

impl Encode for RangeValue {
    fn encode<'v>(&'v self, _cfg: &EncodeConfig) -> Result<Fragments<'v>, EncodeError> {
        let mut out = Fragments::new();
        out.push_static(b"{\"first\":");
        out.push_owned(self.first.to_string().into_bytes());
        out.push_static(b",\"last\":");
        out.push_owned(self.last.to_string().into_bytes());
        if self.step != 1 {
            out.push_static(b",\"step\":");
            out.push_owned(self.step.to_string().into_bytes());
        }
        out.push_static(b"}");
        Ok(out)
    }
}
