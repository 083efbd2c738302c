//! Demo sweep: cold-cache timings for the reference multiply across a few
//! square sizes, minimum of three trials each.

use matbench::{gemm_case, multiple_size_tests, single_test};

fn main() {
    let sizes = [200, 400, 600, 800];
    let trials = 3;

    eprintln!("single checked run at 400x400x400:");
    let (secs, passed) = single_test("gemm", gemm_case, 400, 400, 400, true, true);
    eprintln!("  {:.3} ms, passed: {}", secs * 1e3, passed);

    eprintln!("sweep, minimum of {} trials per size:", trials);
    let times = multiple_size_tests(gemm_case, &sizes, trials, true);

    for &sz in &sizes {
        let secs = times[&sz];
        // C += A*B at size n is 2n^3 floating-point operations.
        let gflops = 2.0 * (sz as f64).powi(3) / secs / 1e9;
        println!("{:4}: {:10.3} ms  {:8.2} GFLOP/s", sz, secs * 1e3, gflops);
    }
}
