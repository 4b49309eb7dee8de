//! Representation-agnostic implementations of every operation.
//!
//! These only use [`Matrix::at`] and [`Matrix::set_at`], so they work for
//! any pairing of representations. They are sequential and make no attempt
//! at cache-friendliness beyond walking column-outer. Shapes are validated
//! by [`dispatch`](crate::dispatch) before anything here runs.

use super::{DenseMatrix, Matrix};
use crate::threaded::nan_max;

fn zip_with<F>(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix, op: F)
where
    F: Fn(f64, f64) -> f64,
{
    for j in 0..a.column_count() {
        for i in 0..a.row_count() {
            result.set_at(i, j, op(a.at(i, j), b.at(i, j)));
        }
    }
}

pub fn add(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    zip_with(a, b, result, |x, y| x + y);
}

pub fn subtract(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    zip_with(a, b, result, |x, y| x - y);
}

pub fn pointwise_multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    zip_with(a, b, result, |x, y| x * y);
}

pub fn pointwise_divide(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    zip_with(a, b, result, |x, y| x / y);
}

pub fn scale(a: &dyn Matrix, scalar: f64, result: &mut dyn Matrix) {
    for j in 0..a.column_count() {
        for i in 0..a.row_count() {
            result.set_at(i, j, scalar * a.at(i, j));
        }
    }
}

pub fn negate(a: &dyn Matrix, result: &mut dyn Matrix) {
    for j in 0..a.column_count() {
        for i in 0..a.row_count() {
            result.set_at(i, j, -a.at(i, j));
        }
    }
}

pub fn multiply_vector(a: &dyn Matrix, x: &[f64], y: &mut [f64]) {
    for (i, y_i) in y.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (j, &x_j) in x.iter().enumerate() {
            sum += a.at(i, j) * x_j;
        }
        *y_i = sum;
    }
}

pub fn left_multiply_vector(x: &[f64], a: &dyn Matrix, y: &mut [f64]) {
    for (j, y_j) in y.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &x_i) in x.iter().enumerate() {
            sum += x_i * a.at(i, j);
        }
        *y_j = sum;
    }
}

/// `result = a * b`
pub fn multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    let k = a.column_count();
    for j in 0..b.column_count() {
        for i in 0..a.row_count() {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a.at(i, p) * b.at(p, j);
            }
            result.set_at(i, j, sum);
        }
    }
}

/// `result = a * bᵗ`
pub fn transpose_and_multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    let k = a.column_count();
    for j in 0..b.row_count() {
        for i in 0..a.row_count() {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a.at(i, p) * b.at(j, p);
            }
            result.set_at(i, j, sum);
        }
    }
}

/// `result = aᵗ * b`
pub fn transpose_this_and_multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) {
    let k = a.row_count();
    for j in 0..b.column_count() {
        for i in 0..a.column_count() {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a.at(p, i) * b.at(p, j);
            }
            result.set_at(i, j, sum);
        }
    }
}

pub fn transpose(a: &dyn Matrix) -> DenseMatrix {
    DenseMatrix::from_fn(a.column_count(), a.row_count(), |i, j| a.at(j, i))
}

pub fn l1_norm(a: &dyn Matrix) -> f64 {
    (0..a.column_count())
        .map(|j| (0..a.row_count()).map(|i| a.at(i, j).abs()).sum::<f64>())
        .fold(0.0, nan_max)
}

pub fn infinity_norm(a: &dyn Matrix) -> f64 {
    (0..a.row_count())
        .map(|i| (0..a.column_count()).map(|j| a.at(i, j).abs()).sum::<f64>())
        .fold(0.0, nan_max)
}

/// Same derivation as the dense path: diagonal of `a * aᵗ`.
pub fn frobenius_norm(a: &dyn Matrix) -> f64 {
    let mut gram = DenseMatrix::square(a.row_count());
    transpose_and_multiply(a, a, &mut gram);
    (0..a.row_count())
        .map(|i| gram.at(i, i).abs())
        .sum::<f64>()
        .sqrt()
}

/// Caller guarantees `a` is square.
pub fn trace(a: &dyn Matrix) -> f64 {
    (0..a.row_count()).map(|i| a.at(i, i)).sum()
}
