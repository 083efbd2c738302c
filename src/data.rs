//! Test operand generation.

use ndarray::{Array1, Array2};
use rand_distr::{Distribution, Normal};

/// Build the three operands for one GEMM benchmark run.
///
/// Returns `(A, B, C)` where A is `m x p`, B is `p x n` and C is an `m x n`
/// zero matrix, the accumulation target of `C += A*B`.
///
/// `random_data` fills A and B with standard-normal samples; otherwise every
/// element is 1.0. `diagonal` builds B as a `p x p` diagonal matrix instead —
/// unit diagonal for constant fill, `p` standard-normal diagonal values (zero
/// elsewhere) for random fill.
///
/// Requesting `diagonal` with `m != n` cannot produce a conformant square
/// diagonal; the request is downgraded to a full B with a warning on stderr,
/// never an error.
pub fn make_data(
    m: usize,
    n: usize,
    p: usize,
    random_data: bool,
    diagonal: bool,
) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    let mut diagonal = diagonal;
    if diagonal && m != n {
        eprintln!("warning: cannot make B diagonal when m != n; using a full matrix");
        diagonal = false;
    }

    let (a, b) = if random_data {
        let mut rng = rand::rng();
        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let a = Array2::from_shape_fn((m, p), |_| normal.sample(&mut rng));
        let b = if diagonal {
            let d = Array1::from_shape_fn(p, |_| normal.sample(&mut rng));
            Array2::from_diag(&d)
        } else {
            Array2::from_shape_fn((p, n), |_| normal.sample(&mut rng))
        };
        (a, b)
    } else {
        let a = Array2::from_elem((m, p), 1.0);
        let b = if diagonal {
            Array2::from_diag_elem(p, 1.0)
        } else {
            Array2::from_elem((p, n), 1.0)
        };
        (a, b)
    };

    let c = Array2::zeros((m, n));
    (a, b, c)
}
