//! The four induce-sort passes: L-induce and S-induce, each in a naming
//! variant (Mode 1, used while the S*-order is still being discovered)
//! and a final variant (Mode 2, used once the S*-suffix order is known).
//!
//! L/S classification is never materialized as a bitmap here: a
//! position's type falls out of comparing its character against its
//! induced predecessor's character inline, the same way the algorithm
//! this is grounded on does it.

use std::ops::Range;

use crate::bucket::{BucketTable, RoundTable};
use crate::seq::SainSeq;

/// Seed the S-suffix rooted at `length - 1` into its bucket tail. Only
/// valid for `length > 1`; callers handle `length <= 1` before reaching
/// the induce passes at all.
pub(crate) fn seed_end_singleton_mode1(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    rt: Option<&mut RoundTable>,
    current_round: i64,
) {
    let n = seq.length();
    debug_assert!(n > 1);
    seed_singleton_mode1(seq, suftab, bkt, rt, current_round, (n - 1) as i64);
}

fn seed_singleton_mode1(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    rt: Option<&mut RoundTable>,
    current_round: i64,
    position: i64,
) {
    let currentcc = seq.char_at(position as usize);
    if currentcc >= seq.alphabet_size() {
        return;
    }
    debug_assert!(position > 0);
    let mut position = position - 1;
    let leftcontextcc = seq.char_at(position as usize);
    if let Some(rt) = rt {
        let lower = leftcontextcc > currentcc;
        if rt.get(currentcc, lower) < current_round {
            position += seq.length() as i64;
            rt.set(currentcc, lower, current_round);
        }
    }
    let putidx = bkt.take_tail(currentcc) as usize;
    suftab[putidx] = if leftcontextcc > currentcc {
        !(position + 1)
    } else {
        position
    };
}

/// Seed singletons at every special-range boundary, so S-induce also
/// covers the positions immediately left of a special run.
pub(crate) fn seed_special_ranges_mode1(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    mut rt: Option<&mut RoundTable>,
    current_round: i64,
    ranges: &[Range<usize>],
) {
    for r in ranges {
        if r.start > 1 {
            // `seed_singleton_mode1` takes the L-type position itself (it
            // decrements once more internally to reach that position's own
            // predecessor), so the position just left of the special run
            // is `r.start - 1`, not `r.start` (which is the special code
            // itself and would always fail the `currentcc < alphabet_size`
            // check).
            seed_singleton_mode1(
                seq,
                suftab,
                bkt,
                rt.as_deref_mut(),
                current_round,
                (r.start - 1) as i64,
            );
        }
    }
}

/// Forward scan: induce L-type positions from the seeded/partial
/// S*-order, tagging round-boundaries when a round table is present.
pub(crate) fn l_induce_mode1(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    mut rt: Option<&mut RoundTable>,
    nonspecial: usize,
) {
    let n = seq.length() as i64;
    let sigma = seq.alphabet_size();
    let mut current_round: i64 = 0;

    for idx in 0..nonspecial {
        let mut position = suftab[idx];
        if position > 0 {
            if position >= n {
                debug_assert!(rt.is_some());
                current_round += 1;
                position -= n;
            }
            let currentcc = seq.char_at(position as usize);
            if currentcc < sigma && position > 0 {
                position -= 1;
                let leftcontextcc = seq.char_at(position as usize);
                if let Some(rt) = rt.as_deref_mut() {
                    let lower = leftcontextcc < currentcc;
                    debug_assert!(currentcc > 0);
                    if rt.get(currentcc, lower) < current_round {
                        position += n;
                        rt.set(currentcc, lower, current_round);
                    }
                }
                let bucketptr = bkt.take_head(currentcc) as usize;
                debug_assert!(idx < bucketptr);
                suftab[bucketptr] = if leftcontextcc < currentcc {
                    !position
                } else {
                    position
                };
            }
            suftab[idx] = 0;
        } else if position < 0 {
            suftab[idx] = !position;
        }
    }

    if rt.is_none() {
        return;
    }

    // Move each round-boundary tag to the rightmost untagged position
    // within its run, so the backward S-induce scan and the naming pass
    // see exactly one boundary marker per contiguous same-round group.
    let mut i = nonspecial as isize - 1;
    while i >= 0 {
        let iu = i as usize;
        if suftab[iu] > 0 && suftab[iu] < n {
            suftab[iu] += n;
            let mut j = i - 1;
            while j >= 0 && suftab[j as usize] < n {
                j -= 1;
            }
            if j >= 0 && suftab[j as usize] >= n {
                suftab[j as usize] -= n;
            }
            i = j - 1;
        } else {
            i -= 1;
        }
    }
}

/// Backward scan: induce S-type positions (naming variant).
pub(crate) fn s_induce_mode1(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    mut rt: Option<&mut RoundTable>,
    nonspecial: usize,
    special_ranges: &[Range<usize>],
) {
    let n = seq.length() as i64;
    let sigma = seq.alphabet_size();
    let mut current_round: i64 = 0;

    if seq.length() > 1 {
        seed_end_singleton_mode1(seq, suftab, bkt, rt.as_deref_mut(), current_round);
    }
    if seq.has_specials() {
        seed_special_ranges_mode1(
            seq,
            suftab,
            bkt,
            rt.as_deref_mut(),
            current_round,
            special_ranges,
        );
    }
    if nonspecial == 0 {
        return;
    }

    for idx in (0..nonspecial).rev() {
        let mut position = suftab[idx];
        if position > 0 {
            if position >= n {
                debug_assert!(rt.is_some());
                current_round += 1;
                position -= n;
            }
            if position > 0 {
                let currentcc = seq.char_at(position as usize);
                if currentcc < sigma {
                    position -= 1;
                    let leftcontextcc = seq.char_at(position as usize);
                    if let Some(rt) = rt.as_deref_mut() {
                        let lower = leftcontextcc > currentcc;
                        if rt.get(currentcc, lower) < current_round {
                            position += n;
                            rt.set(currentcc, lower, current_round);
                        }
                    }
                    let bucketptr = bkt.take_tail(currentcc) as usize;
                    suftab[bucketptr] = if leftcontextcc > currentcc {
                        !(position + 1)
                    } else {
                        position
                    };
                }
            }
            suftab[idx] = 0;
        }
    }
}

/// Forward scan, Mode 2 (final): every positive slot derives a
/// predecessor; no round-table bookkeeping.
pub(crate) fn l_induce_mode2(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    nonspecial: usize,
) {
    let sigma = seq.alphabet_size();
    for idx in 0..nonspecial {
        let position = suftab[idx];
        suftab[idx] = !position;
        if position > 0 {
            let position = position - 1;
            let currentcc = seq.char_at(position as usize);
            if currentcc < sigma {
                debug_assert!(currentcc > 0);
                let bucketptr = bkt.take_head(currentcc) as usize;
                debug_assert!(idx < bucketptr);
                let tag_final =
                    position > 0 && seq.char_at((position - 1) as usize) < currentcc;
                suftab[bucketptr] = if tag_final { !position } else { position };
            }
        }
    }
}

fn seed_singleton_mode2(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    position: i64,
) {
    let position = position - 1;
    let currentcc = seq.char_at(position as usize);
    if currentcc >= seq.alphabet_size() {
        return;
    }
    let putidx = bkt.take_tail(currentcc) as usize;
    let tag_final =
        position == 0 || seq.char_at((position - 1) as usize) > currentcc;
    suftab[putidx] = if tag_final { !position } else { position };
}

pub(crate) fn seed_special_ranges_mode2(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    ranges: &[Range<usize>],
) {
    for r in ranges {
        if r.start > 0 {
            seed_singleton_mode2(seq, suftab, bkt, r.start as i64);
        }
    }
}

/// Backward scan, Mode 2 (final).
pub(crate) fn s_induce_mode2(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    nonspecial: usize,
    special_ranges: &[Range<usize>],
) {
    let sigma = seq.alphabet_size();

    seed_singleton_mode2(seq, suftab, bkt, seq.length() as i64);
    if seq.has_specials() {
        seed_special_ranges_mode2(seq, suftab, bkt, special_ranges);
    }
    if nonspecial == 0 {
        return;
    }

    for idx in (0..nonspecial).rev() {
        let position = suftab[idx];
        if position > 0 {
            let position = position - 1;
            let currentcc = seq.char_at(position as usize);
            if currentcc < sigma {
                let bucketptr = bkt.take_tail(currentcc) as usize;
                let tag_final =
                    position == 0 || seq.char_at((position - 1) as usize) > currentcc;
                suftab[bucketptr] = if tag_final { !position } else { position };
            }
        } else {
            // Strip any tag bit left over from Mode 2 L-induce or an
            // earlier write within this same pass, so every slot ends
            // up a plain non-negative position.
            suftab[idx] = !position;
        }
    }
}
