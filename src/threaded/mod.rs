//! Parallel fan-out over disjoint column or index ranges.
//!
//! Every helper here is a blocking join: it returns once all tasks are done.
//! Tasks never share an output offset, so no locking is involved. Small
//! problems skip rayon entirely because the scheduling overhead isn't worth
//! it - the thresholds come from [`Control`].

use crate::control::Control;
use rayon::prelude::*;

/// Whether a multiply-family kernel whose larger result dimension is
/// `order` should fan out.
pub(crate) fn parallel_by_order(order: usize) -> bool {
    worth_splitting(order, Control::global().parallelize_order)
}

/// Whether a kernel touching `elements` values should fan out.
pub(crate) fn parallel_by_elements(elements: usize) -> bool {
    worth_splitting(elements, Control::global().parallelize_elements)
}

fn worth_splitting(size: usize, threshold: usize) -> bool {
    size >= threshold && rayon::current_num_threads() > 1
}

/// Runs `f(column, column_slice)` over every `rows`-long column of a
/// column-major buffer.
pub(crate) fn for_each_column<F>(data: &mut [f64], rows: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    // chunks of length zero are not allowed, and there is nothing to visit
    if rows == 0 {
        return;
    }
    if parallel {
        data.par_chunks_mut(rows)
            .enumerate()
            .for_each(|(j, column)| f(j, column));
    } else {
        data.chunks_mut(rows)
            .enumerate()
            .for_each(|(j, column)| f(j, column));
    }
}

/// Sets `out[i] = f(i)` for every index.
pub(crate) fn fill_indexed<F>(out: &mut [f64], parallel: bool, f: F)
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    if parallel {
        out.par_iter_mut().enumerate().for_each(|(i, x)| *x = f(i));
    } else {
        out.iter_mut().enumerate().for_each(|(i, x)| *x = f(i));
    }
}

/// Sum of `f(i)` over `0..n`. Combination order across tasks is
/// unspecified, so the last bits may vary with the thread count.
pub(crate) fn sum_indexed<F>(n: usize, parallel: bool, f: F) -> f64
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    if parallel {
        (0..n).into_par_iter().map(f).sum()
    } else {
        (0..n).map(f).sum()
    }
}

/// `f64::max` that returns NaN if either side is NaN.
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Maximum of `f(i)` over `0..n`, or `0.0` when `n == 0`. NaN propagates.
pub(crate) fn max_indexed<F>(n: usize, parallel: bool, f: F) -> f64
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    if parallel {
        (0..n).into_par_iter().map(f).reduce(|| 0.0, nan_max)
    } else {
        (0..n).map(f).fold(0.0, nan_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_row_buffer_visits_nothing() {
        let mut data: Vec<f64> = Vec::new();
        for_each_column(&mut data, 0, true, |_, _| panic!("no columns to visit"));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut a = vec![0.0; 12];
        let mut b = vec![0.0; 12];
        for_each_column(&mut a, 4, true, |j, col| {
            for (i, x) in col.iter_mut().enumerate() {
                *x = (j * 10 + i) as f64;
            }
        });
        for_each_column(&mut b, 4, false, |j, col| {
            for (i, x) in col.iter_mut().enumerate() {
                *x = (j * 10 + i) as f64;
            }
        });
        assert_eq!(a, b);
        assert_eq!(a[5], 11.0);

        assert_eq!(sum_indexed(5, true, |i| i as f64), 10.0);
        assert_eq!(max_indexed(5, false, |i| i as f64), 4.0);
        assert_eq!(max_indexed(0, true, |i| i as f64), 0.0);
    }

    #[test]
    fn max_keeps_nan() {
        let f = |i: usize| if i == 2 { f64::NAN } else { i as f64 };
        assert!(max_indexed(5, false, f).is_nan());
        assert!(max_indexed(5, true, f).is_nan());
        assert!(nan_max(f64::NAN, 1.0).is_nan());
        assert!(nan_max(1.0, f64::NAN).is_nan());
        assert_eq!(nan_max(-1.0, 3.0), 3.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(!worth_splitting(63, 64));
        assert_eq!(worth_splitting(64, 64), rayon::current_num_threads() > 1);
    }
}
