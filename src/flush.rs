//! Cache flushing between benchmark trials.
//!
//! Timing the same multiply back to back measures warm-cache performance:
//! after the first trial the operands are resident in L1/L2/L3 and every
//! subsequent trial is unrealistically fast. Writing and reading back a
//! scratch buffer larger than the cache hierarchy evicts the operand data, so
//! each trial starts from the same cold state.

use std::hint::black_box;
use std::sync::Mutex;

/// Scratch buffer length in `f64` elements, sized past the cache hierarchy
/// of common desktop and server parts (1500 x 1500 doubles, about 17 MB).
pub const FLUSH_LEN: usize = 1500 * 1500;

/// Owns a scratch buffer used to evict matrix data from CPU caches.
///
/// The buffer is allocated lazily on the first [`flush`](Self::flush) and
/// retained for the lifetime of the handle. Benchmark code that runs sweeps
/// concurrently should give each worker its own `CacheFlusher`; sharing one
/// would let workers warm the cache behind each other's backs.
pub struct CacheFlusher {
    scratch: Vec<f64>,
    len: usize,
}

impl CacheFlusher {
    /// Handle with the default scratch size ([`FLUSH_LEN`]).
    pub const fn new() -> Self {
        Self {
            scratch: Vec::new(),
            len: FLUSH_LEN,
        }
    }

    /// Handle with a custom scratch length in elements.
    ///
    /// Smaller buffers flush faster but may not clear outer cache levels.
    pub const fn with_len(len: usize) -> Self {
        Self {
            scratch: Vec::new(),
            len,
        }
    }

    /// Write every element of the scratch buffer, then read every element
    /// back and accumulate a sum.
    ///
    /// The sum is consumed through [`black_box`] so the read pass cannot be
    /// eliminated as dead code. Infallible and idempotent; call it before
    /// every timed trial.
    pub fn flush(&mut self) {
        if self.scratch.is_empty() {
            self.scratch = vec![0.0; self.len];
        }
        for x in self.scratch.iter_mut() {
            *x = 1e-10;
        }
        let mut sum = 0.0;
        for x in self.scratch.iter() {
            sum += *x;
        }
        black_box(sum);
    }
}

impl Default for CacheFlusher {
    fn default() -> Self {
        Self::new()
    }
}

static FLUSHER: Mutex<CacheFlusher> = Mutex::new(CacheFlusher::new());

/// Flush the process-wide scratch buffer.
///
/// Convenience over a shared [`CacheFlusher`], allocated once on first use
/// and never torn down. All harness runners call this before each trial.
pub fn flush_cache() {
    let mut flusher = match FLUSHER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    flusher.flush();
}
