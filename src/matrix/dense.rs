//! Column-major dense storage.
//!
//! Element `(row, column)` lives at offset `column * rows + row`. Every
//! kernel in the crate walks buffers column-outer, row-inner so that reads
//! are sequential.

use super::Matrix;
use crate::dispatch;
use crate::error::{MatrixError, Result};
use crate::kernels::elementwise;
use crate::provider::provider;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A matrix backed by one contiguous column-major buffer.
///
/// # Example
///
/// ```
/// use densemat::DenseMatrix;
///
/// // Row-major literal in, column-major storage inside.
/// let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
/// assert_eq!(m.at(0, 1), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Zero-filled `rows × columns` matrix. Either dimension may be zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        DenseMatrix {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    /// Zero-filled `order × order` matrix.
    pub fn square(order: usize) -> Self {
        Self::new(order, order)
    }

    /// `rows × columns` matrix with every element set to `value`.
    pub fn filled(rows: usize, columns: usize, value: f64) -> Self {
        DenseMatrix {
            rows,
            columns,
            data: vec![value; rows * columns],
        }
    }

    /// Takes ownership of an existing column-major buffer without copying.
    ///
    /// # Errors
    ///
    /// [`MatrixError::ShapeOverflow`] if `rows * columns` does not fit in a
    /// `usize`, [`MatrixError::BufferLength`] if `data.len() != rows * columns`.
    pub fn from_column_major(rows: usize, columns: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows
            .checked_mul(columns)
            .ok_or(MatrixError::ShapeOverflow { rows, columns })?;
        if data.len() != expected {
            return Err(MatrixError::BufferLength {
                expected,
                found: data.len(),
            });
        }
        Ok(DenseMatrix { rows, columns, data })
    }

    /// Copies a row-major two-dimensional array.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the rows are ragged.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let row_count = rows.len();
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut m = Self::new(row_count, columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(MatrixError::DimensionMismatch {
                    operation: "from_rows",
                    expected: (row_count, columns),
                    found: (row_count, row.len()),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                m.data[j * row_count + i] = value;
            }
        }
        Ok(m)
    }

    /// Builds a matrix by evaluating `f(row, column)` for every cell.
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * columns);
        for j in 0..columns {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        DenseMatrix { rows, columns, data }
    }

    /// Copies any representation into dense storage.
    pub fn from_matrix(other: &dyn Matrix) -> Self {
        if let Some(dense) = other.as_dense() {
            return dense.clone();
        }
        Self::from_fn(other.row_count(), other.column_count(), |i, j| {
            other.at(i, j)
        })
    }

    /// `order × order` identity.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimension`] if `order == 0`.
    pub fn identity(order: usize) -> Result<Self> {
        if order < 1 {
            return Err(MatrixError::InvalidDimension {
                rows: order,
                columns: order,
            });
        }
        let mut m = Self::square(order);
        for i in 0..order {
            m.data[i * order + i] = 1.0;
        }
        Ok(m)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    #[inline]
    pub fn at(&self, row: usize, column: usize) -> f64 {
        self.data[column * self.rows + row]
    }

    #[inline]
    pub fn set_at(&mut self, row: usize, column: usize, value: f64) {
        self.data[column * self.rows + row] = value;
    }

    /// Resets every element to zero in place.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Multiplies every element by `scalar` in place.
    pub fn scale_in_place(&mut self, scalar: f64) {
        provider().scale_array(scalar, &mut self.data);
    }

    /// The raw column-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Column `j`, contiguous in storage.
    pub fn column(&self, j: usize) -> &[f64] {
        &self.data[j * self.rows..(j + 1) * self.rows]
    }

    /// Row `i`, gathered from strided storage.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.columns).map(|j| self.at(i, j)).collect()
    }

    /// Row-major copy of the contents.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i)).collect()
    }

    pub fn l1_norm(&self) -> f64 {
        dispatch::l1_norm(self)
    }

    pub fn infinity_norm(&self) -> f64 {
        dispatch::infinity_norm(self)
    }

    pub fn frobenius_norm(&self) -> f64 {
        dispatch::frobenius_norm(self)
    }

    /// Sum of the diagonal.
    ///
    /// # Errors
    ///
    /// [`MatrixError::NotSquare`] for non-square matrices.
    pub fn trace(&self) -> Result<f64> {
        dispatch::trace(self)
    }

    pub fn transpose(&self) -> DenseMatrix {
        dispatch::transpose(self)
    }

    /// Same as [`DenseMatrix::transpose`] for real scalars.
    pub fn conjugate_transpose(&self) -> DenseMatrix {
        self.transpose()
    }

    pub fn add(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, self.columns);
        dispatch::add(self, other, &mut result)?;
        Ok(result)
    }

    pub fn subtract(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, self.columns);
        dispatch::subtract(self, other, &mut result)?;
        Ok(result)
    }

    /// New matrix holding `scalar * self`; `self` is left untouched.
    pub fn scale(&self, scalar: f64) -> DenseMatrix {
        let mut result = self.clone();
        result.scale_in_place(scalar);
        result
    }

    pub fn negate(&self) -> DenseMatrix {
        let mut result = Self::new(self.rows, self.columns);
        elementwise::negate(&self.data, &mut result.data, self.rows);
        result
    }

    pub fn pointwise_multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, self.columns);
        dispatch::pointwise_multiply(self, other, &mut result)?;
        Ok(result)
    }

    pub fn pointwise_divide(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, self.columns);
        dispatch::pointwise_divide(self, other, &mut result)?;
        Ok(result)
    }

    /// `self * vector`
    pub fn multiply_vector(&self, vector: &[f64]) -> Result<Vec<f64>> {
        let mut result = vec![0.0; self.rows];
        dispatch::multiply_vector(self, vector, &mut result)?;
        Ok(result)
    }

    /// `vector * self`
    pub fn left_multiply_vector(&self, vector: &[f64]) -> Result<Vec<f64>> {
        let mut result = vec![0.0; self.columns];
        dispatch::left_multiply_vector(vector, self, &mut result)?;
        Ok(result)
    }

    /// `self * other`
    pub fn multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, other.columns);
        dispatch::multiply(self, other, &mut result)?;
        Ok(result)
    }

    /// `self * otherᵗ`
    pub fn transpose_and_multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.rows, other.rows);
        dispatch::transpose_and_multiply(self, other, &mut result)?;
        Ok(result)
    }

    /// `selfᵗ * other`
    pub fn transpose_this_and_multiply(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        let mut result = Self::new(self.columns, other.columns);
        dispatch::transpose_this_and_multiply(self, other, &mut result)?;
        Ok(result)
    }
}

impl Matrix for DenseMatrix {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn at(&self, row: usize, column: usize) -> f64 {
        DenseMatrix::at(self, row, column)
    }

    fn set_at(&mut self, row: usize, column: usize, value: f64) {
        DenseMatrix::set_at(self, row, column, value)
    }

    fn as_dense(&self) -> Option<&DenseMatrix> {
        Some(self)
    }

    fn as_dense_mut(&mut self) -> Option<&mut DenseMatrix> {
        Some(self)
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        &self.data[column * self.rows + row]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        &mut self.data[column * self.rows + row]
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseMatrix {}x{}", self.rows, self.columns)?;
        for i in 0..self.rows {
            for j in 0..self.columns {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.at(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_invariant_holds_for_every_constructor() {
        let cases = [
            DenseMatrix::new(3, 4),
            DenseMatrix::square(5),
            DenseMatrix::filled(2, 7, 1.5),
            DenseMatrix::new(0, 4),
            DenseMatrix::new(4, 0),
            DenseMatrix::from_fn(3, 2, |i, j| (i + j) as f64),
            DenseMatrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap(),
            DenseMatrix::from_rows::<Vec<f64>>(&[]).unwrap(),
        ];
        for m in &cases {
            assert_eq!(m.as_slice().len(), m.row_count() * m.column_count());
        }
    }

    #[test]
    fn offsets_are_column_major() {
        let mut m = DenseMatrix::new(3, 2);
        m.set_at(2, 1, 9.0);
        assert_eq!(m.as_slice()[3 + 2], 9.0);
        assert_eq!(m[(2, 1)], 9.0);
        m[(0, 1)] = 4.0;
        assert_eq!(m.column(1), &[4.0, 0.0, 9.0]);
        assert_eq!(m.row(2), vec![0.0, 9.0]);
    }

    #[test]
    fn ownership_transfer_checks_length() {
        let m = DenseMatrix::from_column_major(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.at(1, 0), 2.0);
        assert_eq!(
            DenseMatrix::from_column_major(2, 2, vec![1.0; 3]),
            Err(MatrixError::BufferLength { expected: 4, found: 3 })
        );
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let rows = 1usize << (usize::BITS - 1);
        assert_eq!(
            DenseMatrix::from_column_major(rows, 2, Vec::new()),
            Err(MatrixError::ShapeOverflow { rows, columns: 2 })
        );
        assert_eq!(
            DenseMatrix::from_column_major(usize::MAX, usize::MAX, vec![0.0]),
            Err(MatrixError::ShapeOverflow { rows: usize::MAX, columns: usize::MAX })
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            DenseMatrix::from_rows(&rows),
            Err(MatrixError::DimensionMismatch {
                operation: "from_rows",
                expected: (2, 2),
                found: (2, 1),
            })
        );

        let rows = vec![vec![1.0], vec![2.0], vec![3.0, 4.0, 5.0]];
        assert_eq!(
            DenseMatrix::from_rows(&rows),
            Err(MatrixError::DimensionMismatch {
                operation: "from_rows",
                expected: (3, 1),
                found: (3, 3),
            })
        );
    }

    #[test]
    fn clear_zeroes_in_place() {
        let mut m = DenseMatrix::filled(3, 3, 7.0);
        m.clear();
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn display_prints_rows() {
        let m = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "DenseMatrix 2x2\n1 2\n3 4\n");
    }
}
