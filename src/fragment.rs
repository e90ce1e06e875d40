//! The fragment list (spec.md §3 — "Fragment list"; design notes on
//! "Fragment list representation").
//!
//! The teacher crate writes straight into anything implementing
//! `std::io::Write` (a `Vec<u8>`, a gzip encoder, an NIF-owned binary) and
//! never materializes an intermediate list — because an NIF always hands
//! the finished binary straight back to the BEAM. spec.md's encoder, though,
//! must support `encode_to_iodata` (vectored I/O without a contiguous copy),
//! so this crate keeps a real fragment list: a flat, append-only vector of
//! chunks, per the design notes ("a small append-only arena of `&[u8]`
//! spans... the list/tree nesting in the source is an artifact of cheap
//! cons cells and is not a contract").
use smallvec::SmallVec;

/// One fragment: either a borrow straight out of the value tree (the common
/// case — an unescaped run of string bytes, a literal like `null`) or an
/// owned buffer (an escape sequence, a formatted number).
#[derive(Debug, Clone)]
pub enum Chunk<'v> {
    Borrowed(&'v [u8]),
    Owned(Vec<u8>),
}

impl<'v> Chunk<'v> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Borrowed(b) => b,
            Chunk::Owned(v) => v,
        }
    }
}

/// A fragment list: concatenating `chunks` left-to-right yields the final
/// JSON document (spec.md §3 invariant).
#[derive(Debug, Clone, Default)]
pub struct Fragments<'v> {
    chunks: SmallVec<[Chunk<'v>; 8]>,
}

impl<'v> Fragments<'v> {
    pub fn new() -> Self {
        Self { chunks: SmallVec::new() }
    }

    /// Append a borrowed run. Public so that out-of-crate [`crate::Encode`]
    /// implementations can build a fragment list of their own without a
    /// contiguous copy, same as every built-in emitter does internally.
    #[inline]
    pub fn push_borrowed(&mut self, bytes: &'v [u8]) {
        if !bytes.is_empty() {
            self.chunks.push(Chunk::Borrowed(bytes));
        }
    }

    #[inline]
    pub fn push_static(&mut self, bytes: &'static [u8]) {
        self.chunks.push(Chunk::Borrowed(bytes));
    }

    #[inline]
    pub fn push_owned(&mut self, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.chunks.push(Chunk::Owned(bytes));
        }
    }

    #[inline]
    pub fn extend(&mut self, other: Fragments<'v>) {
        self.chunks.extend(other.chunks);
    }

    /// The chunks in left-to-right emission order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.chunks.iter().map(Chunk::as_bytes)
    }

    /// The total byte length once flattened.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.as_bytes().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.as_bytes().is_empty())
    }

    /// Flatten into a single contiguous buffer. The encoder never does this
    /// implicitly (spec.md §1 non-goals) — only a caller who asked for it
    /// via [`crate::encode`] rather than [`crate::encode_to_iodata`] pays
    /// for the copy.
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }
}
