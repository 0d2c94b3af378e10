//! Read-only character access over the three sequence representations the
//! engine works with: plain bytes, an externally-encoded sequence that may
//! contain "special" (unknown/separator) positions, and the integer
//! sequences produced by recursion.

use std::cell::Cell;
use std::ops::Range;

/// How an encoded sequence should be walked.
///
/// Only `Encoded` views are affected; `Plain` and `Int` views are always
/// read forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Forward,
    Reverse,
    Complement,
    ReverseComplement,
}

impl ReadMode {
    pub fn is_reverse(self) -> bool {
        matches!(self, ReadMode::Reverse | ReadMode::ReverseComplement)
    }

    pub fn is_complement(self) -> bool {
        matches!(self, ReadMode::Complement | ReadMode::ReverseComplement)
    }
}

/// The external collaborator providing character access for the encoded
/// sequence variant. Implementors own the actual storage (e.g. a 2-bit
/// packed array, possibly memory-mapped); the engine never sees it
/// directly.
pub trait EncodedSource {
    /// Number of symbols, excluding the implicit terminator.
    fn total_length(&self) -> usize;

    /// Size of the declared (non-special) alphabet.
    fn alphabet_size(&self) -> u32;

    /// Character code at `i`, `0 <= i < total_length()`. A return value
    /// `>= alphabet_size()` marks a special (unknown/separator) position;
    /// the engine requires such codes to be unique per position.
    fn char_at(&self, i: usize) -> u32;

    /// Occurrence count of symbol `c < alphabet_size()`, if cheaply known
    /// without a scan. Returning `None` falls back to a linear scan.
    fn char_count(&self, _c: u32) -> Option<usize> {
        None
    }

    fn has_special_ranges(&self) -> bool {
        false
    }

    /// Special ranges in forward sequence order, regardless of `reverse`.
    /// Callers that need reverse order reverse the iterator themselves.
    fn special_ranges(&self) -> Vec<Range<usize>> {
        Vec::new()
    }
}

/// A synthetic special code, guaranteed unique per position and
/// `>= alphabet_size` for any reasonable alphabet, matching the source's
/// `GT_UNIQUEINT(length - i)` convention.
pub fn unique_special_code(length: usize, i: usize) -> u32 {
    (length - i) as u32
}

pub(crate) struct EncodedView<'s> {
    source: &'s dyn EncodedSource,
    readmode: ReadMode,
    access_count: Cell<u64>,
    count_char_access: bool,
}

impl<'s> EncodedView<'s> {
    pub(crate) fn new(
        source: &'s dyn EncodedSource,
        readmode: ReadMode,
        count_char_access: bool,
    ) -> Self {
        EncodedView {
            source,
            readmode,
            access_count: Cell::new(0),
            count_char_access,
        }
    }

    fn translate(&self, i: usize) -> usize {
        if self.readmode.is_reverse() {
            self.source.total_length() - 1 - i
        } else {
            i
        }
    }

    pub(crate) fn char_at(&self, i: usize) -> u32 {
        if self.count_char_access {
            self.access_count.set(self.access_count.get() + 1);
        }
        let j = self.translate(i);
        let cc = self.source.char_at(j);
        if self.readmode.is_complement() && cc < self.source.alphabet_size() {
            self.source.alphabet_size() - 1 - cc
        } else {
            cc
        }
    }

    pub(crate) fn length(&self) -> usize {
        self.source.total_length()
    }

    pub(crate) fn alphabet_size(&self) -> u32 {
        self.source.alphabet_size()
    }

    pub(crate) fn char_count(&self, c: u32) -> Option<usize> {
        if self.readmode.is_complement() {
            self.source.char_count(self.alphabet_size() - 1 - c)
        } else {
            self.source.char_count(c)
        }
    }

    pub(crate) fn access_count(&self) -> u64 {
        self.access_count.get()
    }

    /// Special ranges in the order the engine should append them to the
    /// finished suffix array: the source's forward ranges, reversed and
    /// complemented to caller-visible indices when reading reverse-strand.
    pub(crate) fn special_ranges_in_reading_order(&self) -> Vec<Range<usize>> {
        let n = self.length();
        let mut ranges = self.source.special_ranges();
        if self.readmode.is_reverse() {
            ranges.reverse();
            ranges = ranges
                .into_iter()
                .map(|r| (n - r.end)..(n - r.start))
                .collect();
        }
        ranges
    }
}

/// Tagged-union read-only view over the three sequence representations.
///
/// Modeled as a closed enum rather than a trait object so the hot
/// `char_at` path on the induce loops monomorphizes per call site instead
/// of going through dynamic dispatch on every character lookup.
pub(crate) enum SainSeq<'s> {
    Plain(&'s [u8]),
    Encoded(EncodedView<'s>),
    /// Reduced integer sequence built during recursion: symbol codes in
    /// `[0, alphabet_size)`, plus the declared alphabet size.
    Int(&'s [u32], u32),
}

impl<'s> SainSeq<'s> {
    pub(crate) fn length(&self) -> usize {
        match self {
            SainSeq::Plain(s) => s.len(),
            SainSeq::Encoded(e) => e.length(),
            SainSeq::Int(s, _) => s.len(),
        }
    }

    pub(crate) fn alphabet_size(&self) -> u32 {
        match self {
            SainSeq::Plain(_) => 256,
            SainSeq::Encoded(e) => e.alphabet_size(),
            SainSeq::Int(_, sigma) => *sigma,
        }
    }

    #[inline]
    pub(crate) fn char_at(&self, i: usize) -> u32 {
        match self {
            SainSeq::Plain(s) => s[i] as u32,
            SainSeq::Encoded(e) => e.char_at(i),
            SainSeq::Int(s, _) => s[i],
        }
    }

    /// Whether `char_at(i)` can return a special (out-of-alphabet) code.
    pub(crate) fn has_specials(&self) -> bool {
        matches!(self, SainSeq::Encoded(_))
    }

    pub(crate) fn char_count(&self, c: u32) -> Option<usize> {
        match self {
            SainSeq::Encoded(e) => e.char_count(c),
            _ => None,
        }
    }

    pub(crate) fn special_ranges_in_reading_order(&self) -> Vec<Range<usize>> {
        match self {
            SainSeq::Encoded(e) => e.special_ranges_in_reading_order(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn access_count(&self) -> Option<u64> {
        match self {
            SainSeq::Encoded(e) => Some(e.access_count()),
            _ => None,
        }
    }
}
