//! String escaping (spec.md §4.2 — "String escaper").
mod string;
mod table;

pub use string::escape_string;
