//! Moves finalized S* positions to the front of `suftab` and assigns
//! each distinct S*-substring a name, via either the slow path (pairwise
//! content comparison) or the fast path (round-table boundary counting).

use std::cmp::Ordering;

use crate::seq::SainSeq;

/// Compact the negative (finalized) entries of `suftab[0..nonspecial]`
/// to the front, stripping their tag. Positions beyond the compacted
/// prefix are zeroed as they're consumed.
pub(crate) fn move_sstar_to_front(suftab: &mut [i64], nonspecial: usize, count_sstar: usize) {
    let mut readidx = 0usize;
    while readidx < nonspecial && suftab[readidx] < 0 {
        suftab[readidx] = !suftab[readidx];
        readidx += 1;
    }
    let mut writeidx = readidx;
    if readidx < count_sstar {
        readidx += 1;
        loop {
            debug_assert!(readidx < nonspecial);
            let v = suftab[readidx];
            if v < 0 {
                let position = !v;
                debug_assert!(writeidx < readidx);
                suftab[writeidx] = position;
                writeidx += 1;
                suftab[readidx] = 0;
                if writeidx == count_sstar {
                    break;
                }
            } else {
                suftab[readidx] = 0;
            }
            readidx += 1;
        }
    }
    debug_assert_eq!(writeidx, count_sstar);
}

/// Same compaction, but also counts how many S*-substrings are
/// necessarily distinct (a round-boundary was seen), which becomes the
/// name count directly — the hallmark of the fast path.
pub(crate) fn simple_move_sstar_to_front(
    suftab: &mut [i64],
    nonspecial: usize,
    count_sstar: usize,
    n: i64,
) -> usize {
    let mut namecount = 0usize;
    let mut readidx = 0usize;
    while readidx < nonspecial {
        let v = suftab[readidx];
        if v >= 0 {
            break;
        }
        let position = !v;
        if position >= n {
            namecount += 1;
        }
        suftab[readidx] = position;
        readidx += 1;
    }
    let mut writeidx = readidx;
    if readidx < count_sstar {
        readidx += 1;
        loop {
            debug_assert!(readidx < nonspecial);
            let v = suftab[readidx];
            if v < 0 {
                let position = !v;
                if position >= n {
                    namecount += 1;
                }
                debug_assert!(writeidx < readidx);
                suftab[writeidx] = position;
                writeidx += 1;
                suftab[readidx] = 0;
                if writeidx == count_sstar {
                    break;
                }
            } else {
                suftab[readidx] = 0;
            }
            readidx += 1;
        }
    }
    debug_assert_eq!(writeidx, count_sstar);
    namecount
}

/// Length of each S*-substring, written into `lentab` at index
/// `sstar_pos / 2` (unique because S* positions differ by at least 2).
/// `lentab` must alias `suftab[count_sstar..]`.
pub(crate) fn assign_sstar_length(seq: &SainSeq, lentab: &mut [i64]) {
    let n = seq.length();
    if n == 0 {
        return;
    }
    // Same right-to-left scan and the same boundary convention as
    // `classify::seed_sstar` (position n-1 is always L-type relative to
    // the sentinel): the two must agree on every S* boundary, since this
    // table is indexed by the positions that scan finds.
    let mut next_cc = seq.char_at(n - 1);
    let mut next_is_s = false;
    let mut next_sstar_pos = n as i64;
    if n == 1 {
        return;
    }
    for position in (0..n - 1).rev() {
        let currentcc = seq.char_at(position);
        let current_is_s = currentcc < next_cc || (currentcc == next_cc && next_is_s);
        if !current_is_s && next_is_s {
            let sstar_pos = position as i64 + 1;
            lentab[(sstar_pos / 2) as usize] = next_sstar_pos - sstar_pos + 1;
            next_sstar_pos = sstar_pos;
        }
        next_is_s = current_is_s;
        next_cc = currentcc;
    }
}

fn compare_sstar_strings(seq: &SainSeq, start1: i64, start2: i64, len: i64) -> Ordering {
    let n = seq.length() as i64;
    let end1 = start1 + len;
    let mut s1 = start1;
    let mut s2 = start2;
    while s1 < end1 {
        if s1 == n {
            return Ordering::Greater;
        }
        if s2 == n {
            return Ordering::Less;
        }
        let c1 = seq.char_at(s1 as usize);
        let c2 = seq.char_at(s2 as usize);
        match c1.cmp(&c2) {
            Ordering::Equal => {}
            other => return other,
        }
        s1 += 1;
        s2 += 1;
    }
    Ordering::Equal
}

/// Slow-path naming: `suftab[0..count_sstar]` holds S* positions in
/// induced order, `suftab[count_sstar..2*count_sstar]` holds their
/// lengths (sparse, indexed by `position/2`); names (1-based) overwrite
/// the length table in place. Returns the number of distinct names.
pub(crate) fn assign_sstar_names(seq: &SainSeq, suftab: &mut [i64], count_sstar: usize) -> usize {
    if count_sstar == 0 {
        return 0;
    }
    let mut current_name: i64 = 1;
    let mut previous_pos = suftab[0];
    let mut previous_len = suftab[count_sstar + (previous_pos / 2) as usize];
    suftab[count_sstar + (previous_pos / 2) as usize] = current_name;
    for i in 1..count_sstar {
        let position = suftab[i];
        let current_len = suftab[count_sstar + (position / 2) as usize];
        let cmp = if previous_len == current_len {
            compare_sstar_strings(seq, previous_pos, position, current_len)
        } else {
            Ordering::Less
        };
        debug_assert!(cmp != Ordering::Greater);
        if cmp == Ordering::Less {
            current_name += 1;
        }
        previous_len = current_len;
        suftab[count_sstar + (position / 2) as usize] = current_name;
        previous_pos = position;
    }
    current_name as usize
}

/// Fast-path naming: round-boundary offsets already mark where a new
/// name starts; just re-scan and scatter names into the length-table
/// slots, decrementing from `number_of_names` as boundaries are seen.
pub(crate) fn simple_assign_sstar_names(
    suftab: &mut [i64],
    number_of_names: usize,
    count_sstar: usize,
    nonspecial: usize,
    n: i64,
) {
    if number_of_names < count_sstar {
        let mut current_name = number_of_names as i64 + 1;
        for idx in (0..nonspecial).rev() {
            let mut position = suftab[idx];
            if position >= n {
                position -= n;
                debug_assert!(current_name > 0);
                current_name -= 1;
            }
            if current_name as usize <= number_of_names {
                suftab[count_sstar + (position / 2) as usize] = current_name;
            }
        }
    } else {
        for idx in 0..nonspecial {
            if suftab[idx] >= n {
                suftab[idx] -= n;
            }
        }
    }
}

/// Compact the `+1`-offset names (stored in `suftab[count_sstar..]`,
/// sparse by `position/2`) down to a dense `0`-based reduced sequence of
/// length `count_sstar`, written into `suftab[count_sstar..2*count_sstar]`.
pub(crate) fn move_names_to_front(suftab: &mut [i64], count_sstar: usize, n: usize) {
    let max_r = count_sstar + n / 2;
    let mut w = count_sstar;
    for r in count_sstar..=max_r {
        let position = suftab[r];
        if position > 0 {
            suftab[w] = position - 1;
            w += 1;
        }
    }
    debug_assert_eq!(w, 2 * count_sstar);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_sstar_to_front_compacts_finalized_entries() {
        // positions 1 and 4 are finalized (bitwise-complemented); the rest
        // are either zero or still-positive scratch.
        let mut suftab = vec![!1i64, 0, 0, !4, 0];
        move_sstar_to_front(&mut suftab, 5, 2);
        assert_eq!(&suftab[..2], &[1, 4]);
    }

    #[test]
    fn assign_sstar_length_matches_manual_derivation_for_banana() {
        // "banana": S*-positions are 1 and 3, each boundary measured
        // inclusive of the next S*-position (or the sentinel past the
        // end): position 1 -> "ana" (length 3, next boundary at 3),
        // position 3 -> "ana$" (length 4, next boundary at the sentinel).
        let seq = SainSeq::Plain(b"banana");
        let mut lentab = vec![0i64; 4];
        assign_sstar_length(&seq, &mut lentab);
        // position 1 -> index 0, position 3 -> index 1
        assert_eq!(lentab[0], 3);
        assert_eq!(lentab[1], 4);
    }

    #[test]
    fn assign_sstar_names_gives_equal_strings_equal_names() {
        // codes[0..3] == codes[3..6] == [0, 1, 2]: two equal-content,
        // equal-length S*-substrings at positions 0 and 3.
        let codes = [0u32, 1, 2, 0, 1, 2, 3];
        let seq = SainSeq::Int(&codes, 4);
        let mut suftab = vec![0i64, 3, 0, 0];
        suftab[2 + 0 / 2] = 3; // length of substring at position 0
        suftab[2 + 3 / 2] = 3; // length of substring at position 3
        let names = assign_sstar_names(&seq, &mut suftab, 2);
        assert_eq!(names, 1);
        assert_eq!(suftab[2 + 0 / 2], suftab[2 + 3 / 2]);
    }

    #[test]
    fn assign_sstar_names_gives_distinct_names_to_distinct_strings() {
        // codes[0..3] == [0, 1, 2], codes[4..7] == [1, 2, 3]: different
        // content, so the two S*-substrings must get distinct names.
        let codes = [0u32, 1, 2, 0, 1, 2, 3];
        let seq = SainSeq::Int(&codes, 4);
        let mut suftab = vec![0i64, 4, 0, 0];
        suftab[2 + 0 / 2] = 3;
        suftab[2 + 4 / 2] = 3;
        let names = assign_sstar_names(&seq, &mut suftab, 2);
        assert_eq!(names, 2);
        assert_ne!(suftab[2 + 0 / 2], suftab[2 + 4 / 2]);
    }

    #[test]
    fn move_names_to_front_compacts_and_zero_bases_the_reduced_alphabet() {
        let mut suftab = vec![0i64, 0, 2, 0, 1];
        move_names_to_front(&mut suftab, 2, 4);
        assert_eq!(&suftab[2..4], &[1, 0]);
    }
}
