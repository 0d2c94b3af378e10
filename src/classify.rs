//! S/L/S*-type classification and S* seeding.
//!
//! The engine never materializes a full S/L bitmap: whether a position
//! is L- or S-type falls out of comparing its character against its
//! successor's (with ties broken by the successor's own type) directly
//! in the induce passes, exactly as the source does. The one place
//! classification needs a dedicated pass is finding the S* positions
//! themselves, which this module does with a single right-to-left scan.

use crate::bucket::BucketTable;
use crate::seq::SainSeq;
use crate::writebuf::WriteBuffer;

pub(crate) struct SstarInfo {
    pub(crate) count_sstar: usize,
    pub(crate) first_char_count: Option<Vec<i64>>,
}

/// Scan `seq` right-to-left, classifying positions into S*/S/L and
/// seeding each S* position into the tail of its bucket. `suftab` must
/// already be blanked (all zero) over `[0, seq.length())`.
///
/// `track_first_char_count`, when true, also tallies the first
/// character of each S*-substring into a fresh `bucket_size`-sized
/// table (used by the recursion driver to rebuild `bucket_size` for the
/// integer sequence without recomputing from scratch).
pub(crate) fn seed_sstar(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    writebuf: &mut Option<WriteBuffer>,
    track_first_char_count: bool,
) -> SstarInfo {
    let n = seq.length();
    let mut first_char_count = if track_first_char_count {
        Some(vec![0i64; bkt.sigma()])
    } else {
        None
    };
    let mut count_sstar = 0usize;

    if n == 0 {
        return SstarInfo {
            count_sstar,
            first_char_count,
        };
    }

    // The sentinel position `n` is conceptually S-type and smaller than
    // every symbol; position `n - 1` is always L-type.
    let mut next_cc = seq.char_at(n - 1);
    let mut next_is_s = false;

    for i in (0..n - 1).rev() {
        let cc = seq.char_at(i);
        let is_s = cc < next_cc || (cc == next_cc && next_is_s);
        if !is_s && next_is_s {
            // i is L-type, i+1 is S-type: i+1 is S*.
            let sstar_pos = i + 1;
            let sstar_cc = next_cc;
            count_sstar += 1;
            if let Some(ref mut counts) = first_char_count {
                if (sstar_cc as usize) < counts.len() {
                    counts[sstar_cc as usize] += 1;
                }
            }
            place_sstar(
                seq, suftab, bkt, writebuf, sstar_cc, sstar_pos,
            );
        }
        next_cc = cc;
        next_is_s = is_s;
    }

    SstarInfo {
        count_sstar,
        first_char_count,
    }
}

fn place_sstar(
    seq: &SainSeq,
    suftab: &mut [i64],
    bkt: &mut BucketTable,
    writebuf: &mut Option<WriteBuffer>,
    cc: u32,
    pos: usize,
) {
    debug_assert!((cc as usize) < bkt.sigma(), "S* seed char out of range");
    let _ = seq;
    match writebuf {
        Some(wb) => wb.update(suftab, bkt, cc, pos as i64),
        None => {
            let slot = bkt.take_tail(cc);
            suftab[slot as usize] = pos as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketTable;

    fn seed(s: &[u8]) -> (SstarInfo, Vec<i64>) {
        let seq = SainSeq::Plain(s);
        let mut suftab = vec![0i64; s.len()];
        let mut bkt = BucketTable::new_owned(256);
        bkt.fill_bucket_size(&seq);
        bkt.end_buckets();
        let mut writebuf = None;
        let info = seed_sstar(&seq, &mut suftab, &mut bkt, &mut writebuf, true);
        (info, suftab)
    }

    #[test]
    fn banana_has_two_sstar_positions() {
        // "banana": S*-positions are 1 and 3 ("ana", "ana$").
        let (info, suftab) = seed(b"banana");
        assert_eq!(info.count_sstar, 2);
        let mut placed: Vec<i64> = suftab.iter().copied().filter(|&v| v != 0).collect();
        placed.sort();
        assert_eq!(placed, vec![1, 3]);
    }

    #[test]
    fn strictly_decreasing_sequence_has_no_sstar_positions() {
        let (info, _) = seed(b"dcba");
        assert_eq!(info.count_sstar, 0);
    }

    #[test]
    fn first_char_count_tallies_the_leading_symbol_of_each_sstar_run() {
        let (info, _) = seed(b"banana");
        let counts = info.first_char_count.expect("tracked");
        // Both S*-substrings start with 'a'.
        assert_eq!(counts[b'a' as usize], 2);
        assert_eq!(counts.iter().sum::<i64>(), 2);
    }
}
