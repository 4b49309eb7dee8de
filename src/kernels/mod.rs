//! Buffer-level kernels over column-major storage.
//!
//! These assume shapes were validated by the caller and work on raw
//! slices plus row/column counts. Parallel ones split the *result* into
//! disjoint columns or indices, so sources are only ever read.
//!
//! Available kernels:
//! - `elementwise`: negate, pointwise divide
//! - `multiply`: matrix-vector, vector-matrix, matrix-matrix and the
//!   transposed variants
//! - `norms`: L1, infinity, Frobenius, trace
//! - `transpose`: out-of-place transpose

pub mod elementwise;
pub mod multiply;
pub mod norms;
pub mod transpose;
