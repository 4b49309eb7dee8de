//! Column-major dense matrices with parallel kernels.
//!
//! A [`DenseMatrix`] stores every element in one contiguous buffer, column
//! after column. Operations check whether all operands are dense: if so they
//! run buffer-level kernels (split across the rayon pool for big enough
//! inputs), otherwise they fall back to a generic implementation that only
//! needs the [`Matrix`] trait. New representations therefore work out of the
//! box, just slower.
//!
//! ## Usage
//!
//! ```
//! use densemat::DenseMatrix;
//!
//! let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let i = DenseMatrix::identity(2).unwrap();
//!
//! assert_eq!(a.multiply(&i).unwrap(), a);
//! assert_eq!(a.transpose().to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
//! assert_eq!(a.trace().unwrap(), 5.0);
//! ```
//!
//! Writing into a pre-allocated target goes through [`dispatch`]:
//!
//! ```
//! use densemat::{dispatch, DenseMatrix};
//!
//! let a = DenseMatrix::filled(3, 3, 2.0);
//! let b = DenseMatrix::filled(3, 3, 0.5);
//! let mut c = DenseMatrix::new(3, 3);
//!
//! dispatch::pointwise_multiply(&a, &b, &mut c).unwrap();
//! assert!(c.as_slice().iter().all(|&x| x == 1.0));
//! ```
//!
//! ## What's inside
//!
//! - Column-major storage with exact `column * rows + row` indexing
//! - Elementwise, matrix-vector and matrix-matrix kernels split by column
//! - L1, infinity and Frobenius norms, trace, transpose
//! - Pluggable numeric provider for flat array arithmetic
//! - Random matrices from any `rand` distribution

pub mod control;
pub mod dispatch;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod provider;
mod threaded;

pub use control::{Control, ProviderKind};
pub use error::{MatrixError, Result};
pub use matrix::{DenseMatrix, Matrix};
pub use provider::LinearAlgebraProvider;
