//! rayon-backed provider.

use super::LinearAlgebraProvider;
use super::SequentialProvider;
use crate::threaded::parallel_by_elements;
use rayon::prelude::*;

/// Work is split into chunks of this many elements, so each task does a
/// sequential sweep over a cache-friendly run.
const CHUNK: usize = 4096;

/// Splits flat arrays into chunks processed on the rayon pool. Short
/// arrays fall back to [`SequentialProvider`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ManagedProvider;

impl ManagedProvider {
    fn zip_chunks<F>(x: &[f64], y: &[f64], result: &mut [f64], op: F)
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        assert_eq!(x.len(), result.len(), "x: expected {} elements", result.len());
        assert_eq!(y.len(), result.len(), "y: expected {} elements", result.len());

        result
            .par_chunks_mut(CHUNK)
            .zip(x.par_chunks(CHUNK))
            .zip(y.par_chunks(CHUNK))
            .for_each(|((r, a), b)| {
                for ((r, &a), &b) in r.iter_mut().zip(a).zip(b) {
                    *r = op(a, b);
                }
            });
    }
}

impl LinearAlgebraProvider for ManagedProvider {
    fn add_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        if !parallel_by_elements(result.len()) {
            return SequentialProvider.add_arrays(x, y, result);
        }
        Self::zip_chunks(x, y, result, |a, b| a + b);
    }

    fn subtract_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        if !parallel_by_elements(result.len()) {
            return SequentialProvider.subtract_arrays(x, y, result);
        }
        Self::zip_chunks(x, y, result, |a, b| a - b);
    }

    fn scale_array(&self, alpha: f64, x: &mut [f64]) {
        if !parallel_by_elements(x.len()) {
            return SequentialProvider.scale_array(alpha, x);
        }
        x.par_chunks_mut(CHUNK).for_each(|chunk| {
            for v in chunk.iter_mut() {
                *v *= alpha;
            }
        });
    }

    fn pointwise_multiply_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]) {
        if !parallel_by_elements(result.len()) {
            return SequentialProvider.pointwise_multiply_arrays(x, y, result);
        }
        Self::zip_chunks(x, y, result, |a, b| a * b);
    }
}
