//! Per-symbol bucket sizes and fill cursors, plus the optional round
//! table used by the fast S*-naming path. All three tables are backed
//! either by their own allocation or by a reclaimed tail slice of
//! `suftab`, modeled with [`AuxTable`] so the borrow checker enforces
//! that a borrowed table cannot outlive the recursion frame that lent
//! it out.

use crate::seq::SainSeq;

/// An auxiliary table: either owned independently, or a borrowed slice
/// reclaimed from the unused tail of `suftab`. Only `Owned` is ever
/// freed on drop (that falls out of normal `Vec` ownership); `Borrowed`
/// is a live exclusive reference and cannot outlive the frame that
/// split it off of `suftab`.
pub(crate) enum AuxTable<'a> {
    Owned(Vec<i64>),
    Borrowed(&'a mut [i64]),
}

impl<'a> AuxTable<'a> {
    fn owned(len: usize) -> AuxTable<'static> {
        AuxTable::Owned(vec![0i64; len])
    }

    pub(crate) fn as_slice(&self) -> &[i64] {
        match self {
            AuxTable::Owned(v) => v,
            AuxTable::Borrowed(s) => s,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [i64] {
        match self {
            AuxTable::Owned(v) => v,
            AuxTable::Borrowed(s) => s,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.as_slice().len()
    }
}

/// Bucket sizes and fill cursors for an alphabet of size `sigma`.
pub(crate) struct BucketTable<'a> {
    size: AuxTable<'a>,
    fillptr: AuxTable<'a>,
}

impl<'a> BucketTable<'a> {
    pub(crate) fn new_owned(sigma: usize) -> BucketTable<'static> {
        BucketTable {
            size: AuxTable::owned(sigma),
            fillptr: AuxTable::owned(sigma),
        }
    }

    pub(crate) fn new_borrowed(
        size: &'a mut [i64],
        fillptr: &'a mut [i64],
    ) -> BucketTable<'a> {
        BucketTable {
            size: AuxTable::Borrowed(size),
            fillptr: AuxTable::Borrowed(fillptr),
        }
    }

    pub(crate) fn sigma(&self) -> usize {
        self.size.len()
    }

    /// Populate `bucket_size` from the sequence's precomputed counts
    /// where available, else by a linear scan over `char_at`.
    pub(crate) fn fill_bucket_size(&mut self, seq: &SainSeq) {
        let sigma = self.sigma();
        let sizes = self.size.as_mut_slice();
        for c in sizes.iter_mut() {
            *c = 0;
        }
        let mut all_known = true;
        for c in 0..sigma as u32 {
            match seq.char_count(c) {
                Some(n) => sizes[c as usize] = n as i64,
                None => {
                    all_known = false;
                    break;
                }
            }
        }
        if !all_known {
            for c in sizes.iter_mut() {
                *c = 0;
            }
            for i in 0..seq.length() {
                let cc = seq.char_at(i);
                if (cc as usize) < sigma {
                    sizes[cc as usize] += 1;
                }
            }
        }
    }

    pub(crate) fn bucket_size(&self, c: u32) -> i64 {
        self.size.as_slice()[c as usize]
    }

    /// Cursors point at the first (free) slot of each bucket.
    pub(crate) fn start_buckets(&mut self) {
        let sigma = self.sigma();
        let sizes: Vec<i64> = self.size.as_slice().to_vec();
        let ptrs = self.fillptr.as_mut_slice();
        let mut acc = 0i64;
        for c in 0..sigma {
            ptrs[c] = acc;
            acc += sizes[c];
        }
    }

    /// Cursors point one past the last slot of each bucket.
    pub(crate) fn end_buckets(&mut self) {
        let sigma = self.sigma();
        let sizes: Vec<i64> = self.size.as_slice().to_vec();
        let ptrs = self.fillptr.as_mut_slice();
        let mut acc = 0i64;
        for c in 0..sigma {
            acc += sizes[c];
            ptrs[c] = acc;
        }
    }

    pub(crate) fn fillptr(&self, c: u32) -> i64 {
        self.fillptr.as_slice()[c as usize]
    }

    pub(crate) fn set_fillptr(&mut self, c: u32, v: i64) {
        self.fillptr.as_mut_slice()[c as usize] = v;
    }

    /// Advance the start cursor for `c` by one, returning the prior
    /// value (the slot to write into).
    pub(crate) fn take_head(&mut self, c: u32) -> i64 {
        let slot = self.fillptr.as_mut_slice();
        let v = slot[c as usize];
        slot[c as usize] += 1;
        v
    }

    /// Retreat the end cursor for `c` by one, returning the new value
    /// (the slot to write into).
    pub(crate) fn take_tail(&mut self, c: u32) -> i64 {
        let slot = self.fillptr.as_mut_slice();
        slot[c as usize] -= 1;
        slot[c as usize]
    }
}

/// Round table entries track the most recent induction round in which
/// each `(cc, side)` pair was updated, letting Mode 1 induce detect
/// duplicate S*-substrings without a separate comparison pass.
pub(crate) struct RoundTable<'a> {
    table: AuxTable<'a>,
}

impl<'a> RoundTable<'a> {
    pub(crate) fn new_owned(sigma: usize) -> RoundTable<'static> {
        RoundTable {
            table: AuxTable::owned(2 * sigma),
        }
    }

    pub(crate) fn new_borrowed(table: &'a mut [i64]) -> RoundTable<'a> {
        RoundTable {
            table: AuxTable::Borrowed(table),
        }
    }

    pub(crate) fn reset(&mut self) {
        for v in self.table.as_mut_slice().iter_mut() {
            *v = -1;
        }
    }

    fn index(cc: u32, lower: bool) -> usize {
        2 * cc as usize + if lower { 1 } else { 0 }
    }

    pub(crate) fn get(&self, cc: u32, lower: bool) -> i64 {
        self.table.as_slice()[Self::index(cc, lower)]
    }

    pub(crate) fn set(&mut self, cc: u32, lower: bool, round: i64) {
        self.table.as_mut_slice()[Self::index(cc, lower)] = round;
    }
}

/// Decide whether the round table should be used: `alphabet_size <
/// length/4` and `length > 1024`, matching the source's heuristic for
/// when the fast S*-naming path pays off.
pub(crate) fn should_use_round_table(sigma: usize, length: usize) -> bool {
    length > 1024 && (sigma as u64) < (length as u64) / 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_buckets_are_prefix_sums() {
        let mut bkt = BucketTable::new_owned(4);
        bkt.size.as_mut_slice().copy_from_slice(&[2, 0, 3, 1]);
        bkt.start_buckets();
        assert_eq!(bkt.fillptr(0), 0);
        assert_eq!(bkt.fillptr(1), 2);
        assert_eq!(bkt.fillptr(2), 2);
        assert_eq!(bkt.fillptr(3), 5);

        bkt.end_buckets();
        assert_eq!(bkt.fillptr(0), 2);
        assert_eq!(bkt.fillptr(1), 2);
        assert_eq!(bkt.fillptr(2), 5);
        assert_eq!(bkt.fillptr(3), 6);
    }

    #[test]
    fn take_head_and_take_tail_move_in_opposite_directions() {
        let mut bkt = BucketTable::new_owned(2);
        bkt.size.as_mut_slice().copy_from_slice(&[3, 2]);
        bkt.start_buckets();
        assert_eq!(bkt.take_head(0), 0);
        assert_eq!(bkt.take_head(0), 1);

        bkt.end_buckets();
        assert_eq!(bkt.take_tail(0), 2);
        assert_eq!(bkt.take_tail(0), 1);
    }

    #[test]
    fn borrowed_bucket_table_splits_off_a_caller_owned_slice() {
        let mut storage = vec![0i64; 6];
        let (size, fillptr) = storage.split_at_mut(3);
        let mut bkt = BucketTable::new_borrowed(size, fillptr);
        bkt.fill_bucket_size(&SainSeq::Int(&[0, 1, 2, 1, 0], 3));
        assert_eq!(bkt.bucket_size(0), 2);
        assert_eq!(bkt.bucket_size(1), 2);
        assert_eq!(bkt.bucket_size(2), 1);
    }

    #[test]
    fn round_table_reset_makes_every_entry_fresh_at_round_zero() {
        let mut rt = RoundTable::new_owned(4);
        rt.reset();
        assert!(rt.get(0, false) < 0);
        assert!(rt.get(3, true) < 0);
        rt.set(2, true, 5);
        assert_eq!(rt.get(2, true), 5);
        assert_eq!(rt.get(2, false), -1);
    }

    #[test]
    fn should_use_round_table_matches_the_sigma_and_length_thresholds() {
        assert!(!should_use_round_table(4, 1024));
        assert!(should_use_round_table(4, 1025));
        assert!(!should_use_round_table(300, 1025));
        assert!(should_use_round_table(255, 1025));
    }
}
