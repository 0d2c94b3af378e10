//! Per-symbol write buffer: batches values destined for a bucket's tail
//! so the induce passes do one sequential store per flush instead of one
//! random store per position. Disabled when the alphabet is too large
//! for the per-symbol overhead to pay off.

use crate::bucket::BucketTable;

const MAX_BUFSIZE: usize = 65535;

pub(crate) struct WriteBuffer {
    sigma: usize,
    bufsize: usize,
    values: Vec<i64>,
    nextidx: Vec<u32>,
}

impl WriteBuffer {
    /// `None` when the alphabet is too large (`sigma > 256`) for
    /// per-symbol buffering to be worthwhile.
    pub(crate) fn new(sigma: usize, length: usize) -> Option<WriteBuffer> {
        if sigma > 256 {
            return None;
        }
        let mut bufsize = 1usize;
        while bufsize * 2 <= MAX_BUFSIZE && bufsize * sigma < length {
            bufsize *= 2;
        }
        Some(WriteBuffer {
            sigma,
            bufsize,
            values: vec![0; sigma * bufsize],
            nextidx: vec![0; sigma],
        })
    }

    /// Push `value` into the tail buffer for symbol `c`; flushes into
    /// `suftab` through `bkt`'s tail cursor on overflow.
    pub(crate) fn update(
        &mut self,
        suftab: &mut [i64],
        bkt: &mut BucketTable,
        c: u32,
        value: i64,
    ) {
        let idx = c as usize;
        let n = self.nextidx[idx] as usize;
        self.values[idx * self.bufsize + n] = value;
        self.nextidx[idx] += 1;
        if self.nextidx[idx] as usize == self.bufsize {
            self.flush_one(suftab, bkt, c);
        }
    }

    fn flush_one(&mut self, suftab: &mut [i64], bkt: &mut BucketTable, c: u32) {
        let idx = c as usize;
        let n = self.nextidx[idx] as usize;
        if n == 0 {
            return;
        }
        let mut fillptr = bkt.fillptr(c);
        // Reversed store order mirrors the decrement convention used by
        // the tail cursor: the most recently buffered value lands
        // closest to the current tail.
        for k in (0..n).rev() {
            fillptr -= 1;
            suftab[fillptr as usize] = self.values[idx * self.bufsize + k];
        }
        bkt.set_fillptr(c, fillptr);
        self.nextidx[idx] = 0;
    }

    pub(crate) fn flush_all(&mut self, suftab: &mut [i64], bkt: &mut BucketTable) {
        for c in 0..self.sigma as u32 {
            self.flush_one(suftab, bkt, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_above_sigma_threshold() {
        assert!(WriteBuffer::new(257, 1000).is_none());
        assert!(WriteBuffer::new(256, 1000).is_some());
    }

    #[test]
    fn buffered_values_land_at_the_bucket_tail_in_push_order() {
        let mut bkt = BucketTable::new_owned(2);
        bkt.fill_bucket_size(&crate::seq::SainSeq::Int(&[0, 0, 1, 1], 2));
        bkt.end_buckets();
        let mut suftab = vec![0i64; 4];
        let mut wb = WriteBuffer::new(2, 4).expect("small alphabet buffers");

        wb.update(&mut suftab, &mut bkt, 0, 10);
        wb.update(&mut suftab, &mut bkt, 0, 20);
        wb.flush_all(&mut suftab, &mut bkt);

        assert_eq!(&suftab[..2], &[10, 20]);
    }
}
