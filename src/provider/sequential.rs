//! Single-threaded provider. Also the correctness baseline for the managed one.

use super::LinearAlgebraProvider;

/// Plain scalar loops, no threading.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialProvider;

impl LinearAlgebraProvider for SequentialProvider {
    fn add_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        for ((r, &a), &b) in result.iter_mut().zip(x).zip(y) {
            *r = a + b;
        }
    }

    fn subtract_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        for ((r, &a), &b) in result.iter_mut().zip(x).zip(y) {
            *r = a - b;
        }
    }

    fn scale_array(&self, alpha: f64, x: &mut [f64]) {
        for v in x.iter_mut() {
            *v *= alpha;
        }
    }

    fn pointwise_multiply_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        for ((r, &a), &b) in result.iter_mut().zip(x).zip(y) {
            *r = a * b;
        }
    }
}
