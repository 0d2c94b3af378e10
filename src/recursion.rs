//! The recursion driver: ties together S*-seeding, the two induce
//! passes in each mode, naming, and the recursive call on the reduced
//! sequence of S*-names.
//!
//! Each level allocates its own scratch `suftab` (sized for the
//! sequence it is given plus its own bucket/fillptr/round-table tail)
//! rather than inheriting reclaimed space from its parent's buffer —
//! see the note on `AuxTable` in `bucket.rs`. A side effect of this is
//! that a level's own `bucket_size` / S*-first-char-count tables are
//! never clobbered by the recursive call, so unlike the source, this
//! driver never needs to recompute them after recursion returns.

use std::ops::Range;

use crate::bucket::{should_use_round_table, BucketTable, RoundTable};
use crate::classify;
use crate::induce;
use crate::naming;
use crate::seq::SainSeq;
use crate::timer::Timer;
use crate::verify::checkorder;

/// Sort the suffixes of `seq`, writing the order of its `0..length()`
/// positions (never the trailing sentinel) into a freshly allocated
/// vector of length `seq.length()`.
pub(crate) fn sort_suffixes(
    seq: &SainSeq,
    special_ranges: &[Range<usize>],
    level: u32,
    intermediate_check: bool,
    timer: &mut dyn Timer,
) -> Vec<i64> {
    let n = seq.length();
    let special_count: usize = special_ranges.iter().map(|r| r.end - r.start).sum();
    let nonspecial = n - special_count;
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        debug_assert_eq!(nonspecial, 1);
        return vec![0];
    }

    let sigma = seq.alphabet_size() as usize;
    let use_rt = should_use_round_table(sigma, n);
    let bucket_need = 2 * sigma + if use_rt { 2 * sigma } else { 0 };
    // `n + 1`, not `n`: `move_names_to_front` reads one slot past the
    // S*-name region's natural half-length when `count_sstar == n / 2`.
    let mut suftab = vec![0i64; n + 1 + bucket_need];

    let (work, tail) = suftab.split_at_mut(n + 1);
    let (size_slice, rest) = tail.split_at_mut(sigma);
    let (fillptr_slice, rt_slice) = rest.split_at_mut(sigma);
    let mut bkt = BucketTable::new_borrowed(size_slice, fillptr_slice);
    let mut rt = if use_rt {
        Some(RoundTable::new_borrowed(rt_slice))
    } else {
        None
    };
    if let Some(rt) = rt.as_mut() {
        rt.reset();
    }

    drive_level(
        seq,
        work,
        &mut bkt,
        rt.as_mut(),
        special_ranges,
        level,
        intermediate_check,
        timer,
    );

    suftab.truncate(nonspecial);
    suftab
}

/// Run one full recursion level's worth of induced sorting over
/// `work`, a scratch buffer of exactly `seq.length()` entries.
fn drive_level(
    seq: &SainSeq,
    work: &mut [i64],
    bkt: &mut BucketTable,
    mut rt: Option<&mut RoundTable>,
    special_ranges: &[Range<usize>],
    level: u32,
    intermediate_check: bool,
    timer: &mut dyn Timer,
) {
    let n = seq.length();
    let sigma = seq.alphabet_size() as usize;
    let special_count: usize = special_ranges.iter().map(|r| r.end - r.start).sum();
    let nonspecial = n - special_count;

    for v in work.iter_mut() {
        *v = 0;
    }

    bkt.fill_bucket_size(seq);
    bkt.end_buckets();

    let mut writebuf = crate::writebuf::WriteBuffer::new(sigma, n);
    let sstar_info = classify::seed_sstar(seq, work, bkt, &mut writebuf, true);
    if let Some(wb) = writebuf.as_mut() {
        wb.flush_all(work, bkt);
    }
    timer.checkpoint("insert Sstar suffixes", level);

    let count_sstar = sstar_info.count_sstar;

    if count_sstar > 0 {
        bkt.start_buckets();
        timer.checkpoint("induce L suffixes", level);
        induce::l_induce_mode1(seq, work, bkt, rt.as_deref_mut(), nonspecial);
        bkt.end_buckets();
        timer.checkpoint("induce S suffixes", level);
        induce::s_induce_mode1(seq, work, bkt, rt.as_deref_mut(), nonspecial, special_ranges);

        let number_of_names = if rt.is_none() {
            naming::move_sstar_to_front(work, nonspecial, count_sstar);
            naming::assign_sstar_length(seq, &mut work[count_sstar..]);
            naming::assign_sstar_names(seq, work, count_sstar)
        } else {
            let number_of_names =
                naming::simple_move_sstar_to_front(work, nonspecial, count_sstar, n as i64);
            naming::simple_assign_sstar_names(
                work,
                number_of_names,
                count_sstar,
                nonspecial,
                n as i64,
            );
            number_of_names
        };
        timer.checkpoint("sort names", level);

        debug_assert!(number_of_names <= count_sstar);
        if number_of_names < count_sstar {
            for v in work[..count_sstar].iter_mut() {
                *v = 0;
            }
            naming::move_names_to_front(work, count_sstar, n);

            let names: Vec<u32> = work[count_sstar..2 * count_sstar]
                .iter()
                .map(|&v| v as u32)
                .collect();
            let reduced = SainSeq::Int(&names, number_of_names as u32);
            timer.checkpoint("recurse", level);
            let order = sort_suffixes(&reduced, &[], level + 1, intermediate_check, timer);
            debug_assert_eq!(order.len(), count_sstar);
            work[..count_sstar].copy_from_slice(&order);

            expand_order_to_original(seq, count_sstar, work);
            timer.checkpoint("expand", level);
        }
    }

    if intermediate_check && count_sstar > 0 {
        checkorder(seq, work, 0, count_sstar - 1);
    }

    timer.checkpoint("insert sorted Sstar suffixes", level);
    if count_sstar > 0 {
        let first_char_count = sstar_info
            .first_char_count
            .as_ref()
            .expect("first_char_count tracked unconditionally");
        insert_sorted_sstar_suffixes(bkt, first_char_count, work, count_sstar - 1, nonspecial);
    }

    bkt.start_buckets();
    timer.checkpoint("induce L suffixes (final)", level);
    induce::l_induce_mode2(seq, work, bkt, nonspecial);
    bkt.end_buckets();
    timer.checkpoint("induce S suffixes (final)", level);
    induce::s_induce_mode2(seq, work, bkt, nonspecial, special_ranges);

    if nonspecial > 0 && intermediate_check {
        timer.checkpoint("check suffix array", level);
        checkorder(seq, work, 0, nonspecial - 1);
    }
}

/// Rebuild the ascending list of S* positions with a fresh
/// classification scan (reusing `work[count_sstar..2*count_sstar]` as
/// scratch), then remap the reduced suffix order (indices into that
/// list) back to actual text positions.
fn expand_order_to_original(seq: &SainSeq, count_sstar: usize, work: &mut [i64]) {
    let n = seq.length();
    debug_assert!(work.len() >= 2 * count_sstar);

    let mut write_idx = count_sstar - 1;
    let mut next_cc = seq.char_at(n - 1);
    let mut next_is_s = false;
    for i in (0..n - 1).rev() {
        let cc = seq.char_at(i);
        let is_s = cc < next_cc || (cc == next_cc && next_is_s);
        if !is_s && next_is_s {
            work[count_sstar + write_idx] = (i + 1) as i64;
            if write_idx > 0 {
                write_idx -= 1;
            }
        }
        next_cc = cc;
        next_is_s = is_s;
    }

    for i in 0..count_sstar {
        let idx = work[i] as usize;
        work[i] = work[count_sstar + idx];
    }
}

/// Scatter the sorted S* suffixes (currently packed at the front of
/// `work`, one contiguous run per character) out into their bucket
/// tails, largest symbol first, clearing the gaps left behind.
fn insert_sorted_sstar_suffixes(
    bkt: &BucketTable,
    first_char_count: &[i64],
    work: &mut [i64],
    mut read_idx: usize,
    nonspecial: usize,
) {
    let sigma = bkt.sigma();
    let mut fill_idx = nonspecial as i64;
    for cc in (0..sigma).rev() {
        let per_char = first_char_count[cc];
        if per_char > 0 {
            let put_idx = fill_idx - 1;
            debug_assert!(read_idx as i64 <= put_idx);
            if (read_idx as i64) < put_idx {
                for offset in 0..per_char {
                    let put = (put_idx - offset) as usize;
                    let read = read_idx.wrapping_sub(offset as usize);
                    work[put] = work[read];
                    work[read] = 0;
                }
            }
        }
        let bucket_size = bkt.bucket_size(cc as u32);
        debug_assert!(fill_idx >= bucket_size);
        fill_idx -= bucket_size;
        debug_assert!(bucket_size >= per_char);
        if bucket_size > per_char {
            let lo = fill_idx as usize;
            let hi = (fill_idx + bucket_size - per_char) as usize;
            for idx in lo..hi {
                work[idx] = 0;
            }
        }
        read_idx = read_idx.wrapping_sub(per_char as usize);
        if cc == 0 {
            break;
        }
    }
}
