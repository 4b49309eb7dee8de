//! Random matrix factories.
//!
//! Columns are filled in parallel. Each column task owns a `StdRng` seeded
//! from the caller's generator before any work is split, so a seeded caller
//! gets the same matrix whatever the thread count.

use super::DenseMatrix;
use crate::error::{MatrixError, Result};
use crate::threaded::{for_each_column, parallel_by_elements};
use num_traits::ToPrimitive;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

impl DenseMatrix {
    /// `rows × columns` matrix sampled from a continuous distribution.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimension`] if either dimension is zero. The
    /// distribution is not sampled in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use densemat::DenseMatrix;
    /// use rand::distributions::Uniform;
    ///
    /// let m = DenseMatrix::random(4, 3, &Uniform::new(0.0, 1.0)).unwrap();
    /// assert!(m.as_slice().iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random<D>(rows: usize, columns: usize, distribution: &D) -> Result<Self>
    where
        D: Distribution<f64> + Sync,
    {
        Self::random_with_rng(rows, columns, distribution, &mut rand::thread_rng())
    }

    /// Like [`DenseMatrix::random`], drawing column seeds from `rng`.
    pub fn random_with_rng<D, R>(
        rows: usize,
        columns: usize,
        distribution: &D,
        rng: &mut R,
    ) -> Result<Self>
    where
        D: Distribution<f64> + Sync,
        R: RngCore + ?Sized,
    {
        fill_columns(rows, columns, rng, |column_rng| {
            distribution.sample(column_rng)
        })
    }

    /// `rows × columns` matrix sampled from a discrete distribution, each
    /// sample converted to `f64`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimension`] if either dimension is zero.
    pub fn random_discrete<D, T>(rows: usize, columns: usize, distribution: &D) -> Result<Self>
    where
        D: Distribution<T> + Sync,
        T: ToPrimitive,
    {
        Self::random_discrete_with_rng(rows, columns, distribution, &mut rand::thread_rng())
    }

    /// Like [`DenseMatrix::random_discrete`], drawing column seeds from `rng`.
    pub fn random_discrete_with_rng<D, T, R>(
        rows: usize,
        columns: usize,
        distribution: &D,
        rng: &mut R,
    ) -> Result<Self>
    where
        D: Distribution<T> + Sync,
        T: ToPrimitive,
        R: RngCore + ?Sized,
    {
        fill_columns(rows, columns, rng, |column_rng| {
            // every primitive integer converts; NaN only for exotic T
            distribution.sample(column_rng).to_f64().unwrap_or(f64::NAN)
        })
    }
}

fn fill_columns<R, F>(rows: usize, columns: usize, rng: &mut R, sample: F) -> Result<DenseMatrix>
where
    R: RngCore + ?Sized,
    F: Fn(&mut StdRng) -> f64 + Send + Sync,
{
    if rows < 1 || columns < 1 {
        return Err(MatrixError::InvalidDimension { rows, columns });
    }

    let seeds: Vec<u64> = (0..columns).map(|_| rng.next_u64()).collect();
    let mut m = DenseMatrix::new(rows, columns);
    let parallel = parallel_by_elements(rows * columns);
    for_each_column(m.as_mut_slice(), rows, parallel, |j, column| {
        let mut column_rng = StdRng::seed_from_u64(seeds[j]);
        for x in column.iter_mut() {
            *x = sample(&mut column_rng);
        }
    });
    Ok(m)
}
