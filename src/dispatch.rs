//! Two-tier operation layer.
//!
//! Every operation validates shapes first, then asks each operand whether
//! it can be seen as a [`DenseMatrix`]. When all of them can, the
//! buffer-level kernel runs (through the numeric provider for add, subtract
//! and scale). Otherwise the generic implementation in
//! [`matrix::generic`](crate::matrix::generic) does the work through
//! `at`/`set_at`, which is slower but works for any representation.
//!
//! Results are written into a caller-provided target. Sources are shared
//! borrows and the target a unique one, so a matrix can never be both.
//!
//! ```
//! use densemat::{dispatch, DenseMatrix};
//!
//! let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let b = DenseMatrix::identity(2).unwrap();
//! let mut c = DenseMatrix::new(2, 2);
//!
//! dispatch::multiply(&a, &b, &mut c).unwrap();
//! assert_eq!(c, a);
//! ```

use crate::error::{MatrixError, Result};
use crate::kernels::{elementwise, multiply as mul, norms, transpose as tr};
use crate::matrix::{generic, DenseMatrix, Matrix};
use crate::provider::provider;
use log::trace;

fn check_shape(
    operation: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<()> {
    if expected != found {
        return Err(MatrixError::DimensionMismatch {
            operation,
            expected,
            found,
        });
    }
    Ok(())
}

fn dense_pair<'a>(
    a: &'a dyn Matrix,
    b: &'a dyn Matrix,
) -> Option<(&'a DenseMatrix, &'a DenseMatrix)> {
    Some((a.as_dense()?, b.as_dense()?))
}

fn fallback(operation: &str) {
    trace!("{}: operands are not all dense, using generic implementation", operation);
}

/// `result = a + b`
pub fn add(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    check_shape("add", a.shape(), b.shape())?;
    check_shape("add", a.shape(), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            provider().add_arrays(da.as_slice(), db.as_slice(), dr.as_mut_slice());
            return Ok(());
        }
    }
    fallback("add");
    generic::add(a, b, result);
    Ok(())
}

/// `result = a - b`
pub fn subtract(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    check_shape("subtract", a.shape(), b.shape())?;
    check_shape("subtract", a.shape(), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            provider().subtract_arrays(da.as_slice(), db.as_slice(), dr.as_mut_slice());
            return Ok(());
        }
    }
    fallback("subtract");
    generic::subtract(a, b, result);
    Ok(())
}

/// `result = scalar * a`. `a` is never modified.
pub fn scale(a: &dyn Matrix, scalar: f64, result: &mut dyn Matrix) -> Result<()> {
    check_shape("scale", a.shape(), result.shape())?;
    if let Some(da) = a.as_dense() {
        if let Some(dr) = result.as_dense_mut() {
            dr.as_mut_slice().copy_from_slice(da.as_slice());
            provider().scale_array(scalar, dr.as_mut_slice());
            return Ok(());
        }
    }
    fallback("scale");
    generic::scale(a, scalar, result);
    Ok(())
}

/// `result = -a`
pub fn negate(a: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    check_shape("negate", a.shape(), result.shape())?;
    if let Some(da) = a.as_dense() {
        if let Some(dr) = result.as_dense_mut() {
            elementwise::negate(da.as_slice(), dr.as_mut_slice(), da.row_count());
            return Ok(());
        }
    }
    fallback("negate");
    generic::negate(a, result);
    Ok(())
}

/// `result = a .* b`
pub fn pointwise_multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    check_shape("pointwise_multiply", a.shape(), b.shape())?;
    check_shape("pointwise_multiply", a.shape(), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            provider().pointwise_multiply_arrays(da.as_slice(), db.as_slice(), dr.as_mut_slice());
            return Ok(());
        }
    }
    fallback("pointwise_multiply");
    generic::pointwise_multiply(a, b, result);
    Ok(())
}

/// `result = a ./ b`. Zero divisors produce infinities or NaN.
pub fn pointwise_divide(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    check_shape("pointwise_divide", a.shape(), b.shape())?;
    check_shape("pointwise_divide", a.shape(), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            elementwise::pointwise_divide(
                da.as_slice(),
                db.as_slice(),
                dr.as_mut_slice(),
                da.row_count(),
            );
            return Ok(());
        }
    }
    fallback("pointwise_divide");
    generic::pointwise_divide(a, b, result);
    Ok(())
}

/// `result = a * vector`
pub fn multiply_vector(a: &dyn Matrix, vector: &[f64], result: &mut [f64]) -> Result<()> {
    let (rows, columns) = a.shape();
    check_shape("multiply_vector", (columns, 1), (vector.len(), 1))?;
    check_shape("multiply_vector", (rows, 1), (result.len(), 1))?;
    if let Some(da) = a.as_dense() {
        mul::multiply_vector(da.as_slice(), vector, result, rows, columns);
        return Ok(());
    }
    fallback("multiply_vector");
    generic::multiply_vector(a, vector, result);
    Ok(())
}

/// `result = vector * a`
pub fn left_multiply_vector(vector: &[f64], a: &dyn Matrix, result: &mut [f64]) -> Result<()> {
    let (rows, columns) = a.shape();
    check_shape("left_multiply_vector", (rows, 1), (vector.len(), 1))?;
    check_shape("left_multiply_vector", (columns, 1), (result.len(), 1))?;
    if let Some(da) = a.as_dense() {
        mul::left_multiply_vector(vector, da.as_slice(), result, rows, columns);
        return Ok(());
    }
    fallback("left_multiply_vector");
    generic::left_multiply_vector(vector, a, result);
    Ok(())
}

/// `result = a * b`
pub fn multiply(a: &dyn Matrix, b: &dyn Matrix, result: &mut dyn Matrix) -> Result<()> {
    let (m, k) = a.shape();
    let n = b.column_count();
    check_shape("multiply", (k, n), b.shape())?;
    check_shape("multiply", (m, n), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            mul::multiply(da.as_slice(), db.as_slice(), dr.as_mut_slice(), m, n, k);
            return Ok(());
        }
    }
    fallback("multiply");
    generic::multiply(a, b, result);
    Ok(())
}

/// `result = a * bᵗ`
pub fn transpose_and_multiply(
    a: &dyn Matrix,
    b: &dyn Matrix,
    result: &mut dyn Matrix,
) -> Result<()> {
    let (m, k) = a.shape();
    let n = b.row_count();
    check_shape("transpose_and_multiply", (n, k), b.shape())?;
    check_shape("transpose_and_multiply", (m, n), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            mul::transpose_and_multiply(da.as_slice(), db.as_slice(), dr.as_mut_slice(), m, n, k);
            return Ok(());
        }
    }
    fallback("transpose_and_multiply");
    generic::transpose_and_multiply(a, b, result);
    Ok(())
}

/// `result = aᵗ * b`
pub fn transpose_this_and_multiply(
    a: &dyn Matrix,
    b: &dyn Matrix,
    result: &mut dyn Matrix,
) -> Result<()> {
    let (k, m) = a.shape();
    let n = b.column_count();
    check_shape("transpose_this_and_multiply", (k, n), b.shape())?;
    check_shape("transpose_this_and_multiply", (m, n), result.shape())?;
    if let Some((da, db)) = dense_pair(a, b) {
        if let Some(dr) = result.as_dense_mut() {
            mul::transpose_this_and_multiply(
                da.as_slice(),
                db.as_slice(),
                dr.as_mut_slice(),
                m,
                n,
                k,
            );
            return Ok(());
        }
    }
    fallback("transpose_this_and_multiply");
    generic::transpose_this_and_multiply(a, b, result);
    Ok(())
}

/// Maximum absolute column sum.
pub fn l1_norm(a: &dyn Matrix) -> f64 {
    match a.as_dense() {
        Some(da) => norms::l1_norm(da.as_slice(), da.row_count(), da.column_count()),
        None => {
            fallback("l1_norm");
            generic::l1_norm(a)
        }
    }
}

/// Maximum absolute row sum.
pub fn infinity_norm(a: &dyn Matrix) -> f64 {
    match a.as_dense() {
        Some(da) => norms::infinity_norm(da.as_slice(), da.row_count(), da.column_count()),
        None => {
            fallback("infinity_norm");
            generic::infinity_norm(a)
        }
    }
}

/// Square root of the absolute diagonal sum of `a * aᵗ`.
pub fn frobenius_norm(a: &dyn Matrix) -> f64 {
    match a.as_dense() {
        Some(da) => {
            let (m, k) = da.shape();
            let mut gram = DenseMatrix::square(m);
            mul::transpose_and_multiply(
                da.as_slice(),
                da.as_slice(),
                gram.as_mut_slice(),
                m,
                m,
                k,
            );
            norms::frobenius_from_gram(gram.as_slice(), m)
        }
        None => {
            fallback("frobenius_norm");
            generic::frobenius_norm(a)
        }
    }
}

/// Sum of the diagonal.
///
/// # Errors
///
/// [`MatrixError::NotSquare`] when the row and column counts differ.
pub fn trace(a: &dyn Matrix) -> Result<f64> {
    let (rows, columns) = a.shape();
    if rows != columns {
        return Err(MatrixError::NotSquare { rows, columns });
    }
    Ok(match a.as_dense() {
        Some(da) => norms::trace(da.as_slice(), rows),
        None => {
            fallback("trace");
            generic::trace(a)
        }
    })
}

/// New dense matrix holding `aᵗ`.
pub fn transpose(a: &dyn Matrix) -> DenseMatrix {
    match a.as_dense() {
        Some(da) => {
            let (rows, columns) = da.shape();
            let mut result = DenseMatrix::new(columns, rows);
            tr::transpose(da.as_slice(), result.as_mut_slice(), rows, columns);
            result
        }
        None => {
            fallback("transpose");
            generic::transpose(a)
        }
    }
}
