//! Wall-clock timing primitive.

use std::time::{Duration, Instant};

/// Run `f` exactly once on the calling thread and return its elapsed
/// wall-clock time, measured with the monotonic clock.
///
/// No timeout, no cancellation: the operation is assumed to complete. Every
/// higher-level runner in this crate times through this single seam.
pub fn timeit<F: FnOnce()>(f: F) -> Duration {
    let start = Instant::now();
    f();
    start.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn measures_at_least_the_sleep() {
        let dt = timeit(|| sleep(Duration::from_millis(10)));
        assert!(dt >= Duration::from_millis(10));
    }

    #[test]
    fn runs_the_closure_exactly_once() {
        let mut calls = 0;
        timeit(|| calls += 1);
        assert_eq!(calls, 1);
    }
}
