//! Micro-benchmark harness for dense matrix multiply (GEMM) routines.
//!
//! Measures wall-clock execution time of a matrix-multiply implementation
//! across repeated trials and matrix sizes, optionally validating numerical
//! correctness against a reference computation, and optionally defeating CPU
//! cache effects between trials to obtain cold-cache timings.
//!
//! The harness does no matrix algebra of its own: operands are
//! [`ndarray::Array2<f64>`] and the reference multiply is
//! [`ndarray::linalg::general_mat_mul`]. Any GEMM-shaped function
//! (`fn(&A, &B, &mut C)` accumulating `C += A*B`) can be plugged in and
//! measured uniformly.
//!
//! ## Timing protocol
//!
//! Repeated trials of the same operation are dominated by scheduling noise
//! and cache residency. The harness addresses both:
//!
//! - [`flush_cache`] writes and reads back a scratch buffer larger than the
//!   CPU cache hierarchy before every trial, so each trial starts cold.
//! - [`multiple_size_tests`] retains the *minimum* time across trials per
//!   size, the standard microbenchmark statistic for suppressing transient
//!   outliers while preserving best-case achievable throughput.
//!
//! ## Usage
//!
//! ```
//! use matbench::{gemm_case, multiple_size_tests, single_test};
//!
//! // One checked run at a single shape.
//! let (secs, passed) = single_test("gemm", gemm_case, 64, 64, 64, true, false);
//! assert!(passed);
//! assert!(secs >= 0.0);
//!
//! // Minimum-of-3 sweep over square sizes.
//! let times = multiple_size_tests(gemm_case, &[32, 64], 3, false);
//! assert_eq!(times.len(), 2);
//! ```

pub mod check;
pub mod data;
pub mod flush;
pub mod runner;
pub mod timing;

pub use check::{all_close, check, check_with_func, ATOL, RTOL};
pub use data::make_data;
pub use flush::{flush_cache, CacheFlusher};
pub use runner::{gemm_case, multiple_size_tests, single_test, TestCase, Timings};
pub use timing::timeit;
