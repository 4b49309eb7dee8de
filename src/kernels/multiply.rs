//! Multiplication family over column-major buffers.
//!
//! Matrix products use the i-k-j idea in column-major form: for each result
//! column, sweep the contraction index and add a scaled column of A. Both A
//! and C are then read/written with stride 1, and each element's sum still
//! runs over the contraction index in order, so the result is the same as a
//! per-element scalar accumulation. The products *assign* into C.
//!
//! Parallel work is split by result column (matrix products,
//! vector-matrix) or by result index (matrix-vector).

use crate::threaded::{fill_indexed, for_each_column, parallel_by_order};

/// `y = A * x` where A is `rows × columns`.
pub fn multiply_vector(a: &[f64], x: &[f64], y: &mut [f64], rows: usize, columns: usize) {
    debug_assert_eq!(a.len(), rows * columns);
    let parallel = parallel_by_order(rows);
    fill_indexed(y, parallel, |i| {
        let mut sum = 0.0;
        for (j, &x_j) in x.iter().enumerate().take(columns) {
            sum += a[j * rows + i] * x_j;
        }
        sum
    });
}

/// `y = x * A` where A is `rows × columns`.
pub fn left_multiply_vector(x: &[f64], a: &[f64], y: &mut [f64], rows: usize, columns: usize) {
    debug_assert_eq!(a.len(), rows * columns);
    let parallel = parallel_by_order(columns);
    fill_indexed(y, parallel, |j| dot(x, &a[j * rows..(j + 1) * rows]))
}

/// `C = A * B` with A `m × k`, B `k × n`, C `m × n`.
///
/// # Example
///
/// ```
/// use densemat::kernels::multiply::multiply;
///
/// // column-major [[1, 2], [3, 4]] times itself
/// let a = vec![1.0, 3.0, 2.0, 4.0];
/// let mut c = vec![0.0; 4];
/// multiply(&a, &a, &mut c, 2, 2, 2);
/// assert_eq!(c, vec![7.0, 15.0, 10.0, 22.0]);
/// ```
pub fn multiply(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    let parallel = parallel_by_order(m.max(n));
    for_each_column(c, m, parallel, |j, c_col| {
        c_col.fill(0.0);
        for p in 0..k {
            axpy(b[j * k + p], &a[p * m..(p + 1) * m], c_col);
        }
    });
}

/// `C = A * Bᵗ` with A `m × k`, B `n × k`, C `m × n`.
///
/// B is read as if already transposed, so no transposed copy is made.
pub fn transpose_and_multiply(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), n * k, "B: expected {}x{}={} elements", n, k, n * k);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    let parallel = parallel_by_order(m.max(n));
    for_each_column(c, m, parallel, |j, c_col| {
        c_col.fill(0.0);
        for p in 0..k {
            axpy(b[p * n + j], &a[p * m..(p + 1) * m], c_col);
        }
    });
}

/// `C = Aᵗ * B` with A `k × m`, B `k × n`, C `m × n`.
///
/// Every element is a dot product of two contiguous columns.
pub fn transpose_this_and_multiply(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    n: usize,
    k: usize,
) {
    assert_eq!(a.len(), k * m, "A: expected {}x{}={} elements", k, m, k * m);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    let parallel = parallel_by_order(m.max(n));
    for_each_column(c, m, parallel, |j, c_col| {
        let b_col = &b[j * k..(j + 1) * k];
        for (i, c_ij) in c_col.iter_mut().enumerate() {
            *c_ij = dot(&a[i * k..(i + 1) * k], b_col);
        }
    });
}

#[inline]
fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (y_i, &x_i) in y.iter_mut().zip(x) {
        *y_i += x_i * alpha;
    }
}

#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}
