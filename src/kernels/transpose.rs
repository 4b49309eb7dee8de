//! Out-of-place transpose.

use crate::threaded::{for_each_column, parallel_by_order};

/// Transpose a column-major matrix: dst = src^T
///
/// `src` is `rows × columns` (row count `rows`), `dst` is `columns × rows`
/// (row count `columns`). Row `i` of src becomes column `i` of dst, so the
/// work splits by destination column.
///
/// # Example
///
/// ```
/// use densemat::kernels::transpose::transpose;
///
/// let src = vec![1.0, 4.0,    // 2×3, column-major
///                2.0, 5.0,
///                3.0, 6.0];
/// let mut dst = vec![0.0; 6]; // will be 3×2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1.0, 2.0, 3.0,
///                      4.0, 5.0, 6.0]);
/// ```
pub fn transpose(src: &[f64], dst: &mut [f64], rows: usize, columns: usize) {
    assert_eq!(src.len(), rows * columns, "src: expected {}x{} elements", rows, columns);
    assert_eq!(dst.len(), rows * columns, "dst: expected {}x{} elements", columns, rows);

    let parallel = parallel_by_order(rows.max(columns));
    for_each_column(dst, columns, parallel, |i, dst_col| {
        for (j, d) in dst_col.iter_mut().enumerate() {
            *d = src[j * rows + i];
        }
    });
}
