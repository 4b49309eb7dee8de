//! The matrix contract and its representations.
//!
//! [`Matrix`] is the representation-agnostic interface: shape plus element
//! read/write. Anything implementing it works with every operation in
//! [`dispatch`](crate::dispatch), through the generic fallback in
//! [`generic`]. A representation that can hand out a [`DenseMatrix`] through
//! [`Matrix::as_dense`] gets the buffer-level fast path instead.

pub mod dense;
pub mod generic;
pub mod random;

pub use dense::DenseMatrix;

/// A two-dimensional collection of real scalars.
pub trait Matrix {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Reads the element at `(row, column)`. Indices are assumed valid.
    fn at(&self, row: usize, column: usize) -> f64;

    /// Writes the element at `(row, column)`. Indices are assumed valid.
    fn set_at(&mut self, row: usize, column: usize, value: f64);

    /// `(row_count, column_count)`
    fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Capability check for the dense fast path.
    fn as_dense(&self) -> Option<&DenseMatrix> {
        None
    }

    /// Mutable counterpart of [`Matrix::as_dense`].
    fn as_dense_mut(&mut self) -> Option<&mut DenseMatrix> {
        None
    }
}
