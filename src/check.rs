//! Correctness oracle: time a multiply once and compare its result against
//! an expected output within a floating-point tolerance.

use std::time::Duration;

use ndarray::linalg::general_mat_mul;
use ndarray::Array2;

use crate::flush::flush_cache;
use crate::timing::timeit;

/// Relative tolerance for near-equality comparison of f64 matrices.
pub const RTOL: f64 = 1e-8;

/// Absolute tolerance floor, for entries near zero where the relative term
/// vanishes.
pub const ATOL: f64 = 1e-10;

/// Element-wise near-equality: shapes must match and every element must
/// satisfy `|got - want| <= ATOL + RTOL * |want|`.
///
/// Exact bit equality is the wrong test here: summation order differs
/// between multiply implementations, so matching results still disagree in
/// the low bits.
pub fn all_close(want: &Array2<f64>, got: &Array2<f64>) -> bool {
    if want.dim() != got.dim() {
        return false;
    }
    want.iter()
        .zip(got.iter())
        .all(|(&w, &g)| (g - w).abs() <= ATOL + RTOL * w.abs())
}

/// Recompute `A*B` with the reference multiply and compare against `c0`.
///
/// A fresh zero matrix sized `A.nrows() x B.ncols()` receives
/// `general_mat_mul(1.0, A, B, 1.0, C)`; the cache is flushed immediately
/// before the computation is timed. Returns the elapsed reference time and
/// whether `c0` matched within [`all_close`] tolerance. A mismatch is
/// reported through the boolean, never as a failure of the call.
pub fn check(a: &Array2<f64>, b: &Array2<f64>, c0: &Array2<f64>) -> (Duration, bool) {
    let mut c = Array2::zeros((a.nrows(), b.ncols()));
    flush_cache();
    let dt = timeit(|| general_mat_mul(1.0, a, b, 1.0, &mut c));
    (dt, all_close(c0, &c))
}

/// Same protocol as [`check`], but `check_fn` supplies the computation.
///
/// Lets an alternative GEMM implementation be benchmarked against the same
/// oracle: `check_fn` writes its product into a fresh zero matrix sized from
/// `c0`, and the result is compared against `c0`.
pub fn check_with_func<F>(
    a: &Array2<f64>,
    b: &Array2<f64>,
    c0: &Array2<f64>,
    check_fn: F,
) -> (Duration, bool)
where
    F: FnOnce(&Array2<f64>, &Array2<f64>, &mut Array2<f64>),
{
    let mut c = Array2::zeros(c0.dim());
    flush_cache();
    let dt = timeit(|| check_fn(a, b, &mut c));
    (dt, all_close(c0, &c))
}
