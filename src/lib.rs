//! Linear-time suffix array construction by induced sorting (SA-IS), for
//! plain byte strings and for encoded sequences with special ranges.
//!
//! The construction itself never allocates a full S/L-type bitmap, never
//! touches disk, and never runs more than one thread: it is a pure,
//! CPU-bound function from a sequence view to a suffix order. See
//! `EncodedSource` for the one external collaborator contract the
//! encoded variant depends on.

mod bucket;
mod classify;
mod induce;
mod naming;
mod recursion;
mod seq;
mod timer;
mod verify;
mod writebuf;

pub use seq::{EncodedSource, ReadMode};
pub use timer::{LogTimer, NoopTimer, Timer};
pub use verify::{FinalVerifier, NoopVerifier};

use seq::{EncodedView, SainSeq};

/// Sort the suffixes of a plain byte string. Returns a permutation of
/// `0..bytes.len()` giving the suffixes in lexicographic order.
///
/// `length` must equal `bytes.len()` and be nonzero; this mirrors the
/// source's own precondition that an empty input is never presented to
/// the engine.
///
/// Progress is reported through `timer`; verbosity is a property of the
/// `Timer` implementation the caller passes in (see `LogTimer::new`),
/// not a flag threaded through this call.
pub fn sort_suffixes_plain(
    bytes: &[u8],
    length: usize,
    intermediate_check: bool,
    timer: &mut dyn Timer,
) -> Vec<i64> {
    assert!(length > 0, "sort_suffixes_plain: length must be nonzero");
    assert_eq!(bytes.len(), length);
    let seq = SainSeq::Plain(bytes);
    recursion::sort_suffixes(&seq, &[], 0, intermediate_check, timer)
}

/// The result of [`sort_suffixes_encoded`]: the finished suffix array,
/// plus the character-access count if one was requested.
pub struct EncodedSortResult {
    /// `suftab` of length `enc.total_length() + 1`:
    /// `suftab[0..nonspecial-1]` holds the order of non-special
    /// suffixes, `suftab[nonspecial..length-1]` holds the special
    /// positions in reading order, and `suftab[length] == length`.
    pub suftab: Vec<i64>,
    /// Number of `char_at` calls the view served, present only when
    /// `count_char_access` was set.
    pub char_accesses: Option<u64>,
}

/// Sort the suffixes of an externally-encoded sequence, appending its
/// special positions in reading order and a trailing sentinel.
///
/// `count_char_access` opts into tracking how many characters the view
/// served over the whole construction; the count comes back on
/// `EncodedSortResult::char_accesses` once the view the engine built
/// internally has otherwise been dropped.
pub fn sort_suffixes_encoded(
    enc: &dyn EncodedSource,
    readmode: ReadMode,
    intermediate_check: bool,
    final_check: bool,
    count_char_access: bool,
    timer: &mut dyn Timer,
    verifier: &dyn FinalVerifier,
) -> EncodedSortResult {
    let length = enc.total_length();
    assert!(length > 0, "sort_suffixes_encoded: length must be nonzero");

    let view = EncodedView::new(enc, readmode, count_char_access);
    let seq = SainSeq::Encoded(view);
    let special_ranges = seq.special_ranges_in_reading_order();
    let special_count: usize = special_ranges.iter().map(|r| r.end - r.start).sum();
    let nonspecial = length - special_count;

    let mut suftab = recursion::sort_suffixes(&seq, &special_ranges, 0, intermediate_check, timer);
    debug_assert_eq!(suftab.len(), nonspecial);

    // Read back before `seq` goes out of scope: the count tracks
    // accesses made while the view served the construction above.
    let char_accesses = if count_char_access {
        seq.access_count()
    } else {
        None
    };

    for r in &special_ranges {
        suftab.extend(r.clone().map(|p| p as i64));
    }
    debug_assert_eq!(suftab.len(), length);
    suftab.push(length as i64);

    if final_check {
        verifier.verify(&suftab);
    }

    EncodedSortResult {
        suftab,
        char_accesses,
    }
}
