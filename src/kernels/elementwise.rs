//! Elementwise kernels that don't go through the numeric provider.

use crate::threaded::{for_each_column, parallel_by_elements};

/// `dst = -src`, one task per column.
pub fn negate(src: &[f64], dst: &mut [f64], rows: usize) {
    let parallel = parallel_by_elements(dst.len());
    for_each_column(dst, rows, parallel, |j, column| {
        let source = &src[j * rows..(j + 1) * rows];
        for (d, &s) in column.iter_mut().zip(source) {
            *d = -s;
        }
    });
}

/// `dst = a ./ b`, one task per column. Zero divisors give infinities or
/// NaN, never an error.
pub fn pointwise_divide(a: &[f64], b: &[f64], dst: &mut [f64], rows: usize) {
    zip_columns(a, b, dst, rows, |x, y| x / y);
}

fn zip_columns<F>(a: &[f64], b: &[f64], dst: &mut [f64], rows: usize, op: F)
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    let parallel = parallel_by_elements(dst.len());
    for_each_column(dst, rows, parallel, |j, column| {
        let range = j * rows..(j + 1) * rows;
        for ((d, &x), &y) in column.iter_mut().zip(&a[range.clone()]).zip(&b[range]) {
            *d = op(x, y);
        }
    });
}
