//! Mixed-representation operations must go through the generic path and
//! agree with the dense fast path.

use approx::assert_relative_eq;
use densemat::{dispatch, DenseMatrix, Matrix, MatrixError};

/// Row-major storage, deliberately not exposing a dense view.
#[derive(Debug, Clone)]
struct RowMajor {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl RowMajor {
    fn new(rows: usize, columns: usize) -> Self {
        RowMajor {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    fn from_dense(m: &DenseMatrix) -> Self {
        let mut r = Self::new(m.row_count(), m.column_count());
        for i in 0..r.rows {
            for j in 0..r.columns {
                r.set_at(i, j, m.at(i, j));
            }
        }
        r
    }
}

impl Matrix for RowMajor {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn at(&self, row: usize, column: usize) -> f64 {
        self.data[row * self.columns + column]
    }

    fn set_at(&mut self, row: usize, column: usize, value: f64) {
        self.data[row * self.columns + column] = value;
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn patterned(rows: usize, columns: usize, modulus: usize) -> DenseMatrix {
    DenseMatrix::from_fn(rows, columns, |i, j| ((i * 7 + j * 3) % modulus) as f64 - 2.5)
}

fn assert_same(expected: &DenseMatrix, actual: &dyn Matrix) {
    assert_eq!(expected.shape(), actual.shape());
    for i in 0..expected.row_count() {
        for j in 0..expected.column_count() {
            assert_relative_eq!(expected.at(i, j), actual.at(i, j), epsilon = 1e-10);
        }
    }
}

#[test]
fn elementwise_ops_agree_across_representations() {
    init_logging();
    let a = patterned(6, 4, 9);
    let b = patterned(6, 4, 5).add(&DenseMatrix::filled(6, 4, 0.75)).unwrap();
    let ra = RowMajor::from_dense(&a);

    let mut dense_out = DenseMatrix::new(6, 4);
    let mut generic_out = RowMajor::new(6, 4);

    dispatch::add(&a, &b, &mut dense_out).unwrap();
    dispatch::add(&ra, &b, &mut generic_out).unwrap();
    assert_same(&dense_out, &generic_out);

    dispatch::subtract(&a, &b, &mut dense_out).unwrap();
    dispatch::subtract(&b, &ra, &mut generic_out).unwrap();
    assert_same(&dense_out.negate(), &generic_out);

    dispatch::pointwise_multiply(&a, &b, &mut dense_out).unwrap();
    dispatch::pointwise_multiply(&ra, &b, &mut generic_out).unwrap();
    assert_same(&dense_out, &generic_out);

    dispatch::pointwise_divide(&a, &b, &mut dense_out).unwrap();
    dispatch::pointwise_divide(&ra, &b, &mut generic_out).unwrap();
    assert_same(&dense_out, &generic_out);

    dispatch::scale(&a, 1.5, &mut dense_out).unwrap();
    dispatch::scale(&ra, 1.5, &mut generic_out).unwrap();
    assert_same(&dense_out, &generic_out);

    dispatch::negate(&ra, &mut generic_out).unwrap();
    assert_same(&a.negate(), &generic_out);
}

#[test]
fn dense_sources_into_generic_target() {
    init_logging();
    let a = patterned(5, 5, 7);
    let b = patterned(5, 5, 4);
    let mut out = RowMajor::new(5, 5);

    dispatch::multiply(&a, &b, &mut out).unwrap();
    assert_same(&a.multiply(&b).unwrap(), &out);
}

#[test]
fn products_agree_across_representations() {
    init_logging();
    let a = patterned(4, 6, 11);
    let b = patterned(6, 3, 5);
    let bt = patterned(3, 6, 5);
    let (ra, rb, rbt) = (
        RowMajor::from_dense(&a),
        RowMajor::from_dense(&b),
        RowMajor::from_dense(&bt),
    );

    let mut out = RowMajor::new(4, 3);
    dispatch::multiply(&ra, &rb, &mut out).unwrap();
    assert_same(&a.multiply(&b).unwrap(), &out);

    dispatch::transpose_and_multiply(&ra, &rbt, &mut out).unwrap();
    assert_same(&a.transpose_and_multiply(&bt).unwrap(), &out);

    let c = patterned(4, 3, 6);
    let mut out = RowMajor::new(6, 3);
    dispatch::transpose_this_and_multiply(&ra, &c, &mut out).unwrap();
    assert_same(&a.transpose_this_and_multiply(&c).unwrap(), &out);

    let x = [1.0, -1.0, 2.0, 0.5, 0.0, 3.0];
    let mut y = [0.0; 4];
    dispatch::multiply_vector(&ra, &x, &mut y).unwrap();
    assert_eq!(y.to_vec(), a.multiply_vector(&x).unwrap());

    let x = [2.0, 0.0, -1.0, 1.0];
    let mut y = [0.0; 6];
    dispatch::left_multiply_vector(&x, &ra, &mut y).unwrap();
    assert_eq!(y.to_vec(), a.left_multiply_vector(&x).unwrap());
}

#[test]
fn queries_agree_across_representations() {
    init_logging();
    let a = patterned(7, 7, 13);
    let ra = RowMajor::from_dense(&a);

    assert_eq!(dispatch::l1_norm(&ra), a.l1_norm());
    assert_eq!(dispatch::infinity_norm(&ra), a.infinity_norm());
    assert_relative_eq!(dispatch::frobenius_norm(&ra), a.frobenius_norm(), epsilon = 1e-10);
    assert_relative_eq!(dispatch::trace(&ra).unwrap(), a.trace().unwrap(), epsilon = 1e-10);
    assert_eq!(dispatch::transpose(&ra), a.transpose());
    assert_eq!(DenseMatrix::from_matrix(&ra), a);

    let wide = RowMajor::new(2, 3);
    assert_eq!(
        dispatch::trace(&wide),
        Err(MatrixError::NotSquare { rows: 2, columns: 3 })
    );
}

#[test]
fn generic_norms_propagate_nan() {
    let a = DenseMatrix::from_rows(&[[f64::NAN, 1.0], [2.0, 3.0]]).unwrap();
    let ra = RowMajor::from_dense(&a);
    assert!(dispatch::l1_norm(&ra).is_nan());
    assert!(dispatch::infinity_norm(&ra).is_nan());
    assert!(dispatch::frobenius_norm(&ra).is_nan());
}

#[test]
fn generic_path_validates_shapes_too() {
    let ra = RowMajor::new(2, 3);
    let b = DenseMatrix::new(3, 2);
    let mut out = RowMajor::new(2, 3);

    assert_eq!(
        dispatch::add(&ra, &b, &mut out),
        Err(MatrixError::DimensionMismatch {
            operation: "add",
            expected: (2, 3),
            found: (3, 2),
        })
    );

    let mut square = RowMajor::new(2, 2);
    assert!(dispatch::multiply(&ra, &ra, &mut square).is_err());
    assert!(dispatch::multiply(&ra, &b, &mut square).is_ok());
}
