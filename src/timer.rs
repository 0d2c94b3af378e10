//! Progress/diagnostic checkpoints reached during construction.
//!
//! `Timer` is purely observational: implementors may log, accumulate
//! metrics, or do nothing. The driver never branches on what a `Timer`
//! does with a checkpoint.

use std::time::Instant;

use log::{debug, info};

pub trait Timer {
    /// `level` is the recursion depth the checkpoint was reached at (0
    /// for the top-level call).
    fn checkpoint(&mut self, label: &str, level: u32);
}

/// A `Timer` that reports each checkpoint through the `log` facade,
/// carrying the elapsed time since the previous checkpoint and the
/// recursion level it was reached at. At `verbose` the records are
/// emitted at `info` level; otherwise at `debug`.
pub struct LogTimer {
    verbose: bool,
    last: Instant,
}

impl LogTimer {
    pub fn new(verbose: bool) -> Self {
        LogTimer {
            verbose,
            last: Instant::now(),
        }
    }
}

impl Timer for LogTimer {
    fn checkpoint(&mut self, label: &str, level: u32) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        if self.verbose {
            info!(
                "[level {}] {}: {:.3}ms",
                level,
                label,
                elapsed.as_secs_f64() * 1000.0
            );
        } else {
            debug!(
                "[level {}] {}: {:.3}ms",
                level,
                label,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }
}

/// A `Timer` that discards every checkpoint, for callers with no
/// interest in progress reporting.
pub struct NoopTimer;

impl Timer for NoopTimer {
    fn checkpoint(&mut self, _label: &str, _level: u32) {}
}
