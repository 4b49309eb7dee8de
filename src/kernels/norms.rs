//! Norms and trace.

use crate::threaded::{max_indexed, nan_max, parallel_by_elements, sum_indexed};

/// Maximum absolute column sum. `0.0` for an empty matrix.
pub fn l1_norm(data: &[f64], rows: usize, columns: usize) -> f64 {
    let parallel = parallel_by_elements(data.len());
    max_indexed(columns, parallel, |j| {
        data[j * rows..(j + 1) * rows].iter().map(|x| x.abs()).sum()
    })
}

/// Maximum absolute row sum. `0.0` for an empty matrix.
pub fn infinity_norm(data: &[f64], rows: usize, columns: usize) -> f64 {
    // Row sums are accumulated column by column to keep reads sequential.
    let mut row_sums = vec![0.0; rows];
    for j in 0..columns {
        let column = &data[j * rows..(j + 1) * rows];
        for (sum, x) in row_sums.iter_mut().zip(column) {
            *sum += x.abs();
        }
    }
    row_sums.into_iter().fold(0.0, nan_max)
}

/// Square root of the absolute diagonal sum of `A * Aᵗ`, given that
/// `order × order` product.
pub fn frobenius_from_gram(gram: &[f64], order: usize) -> f64 {
    let parallel = parallel_by_elements(gram.len());
    sum_indexed(order, parallel, |i| gram[i * order + i].abs()).sqrt()
}

/// Sum of the diagonal of an `order × order` buffer.
pub fn trace(data: &[f64], order: usize) -> f64 {
    let parallel = parallel_by_elements(order);
    sum_indexed(order, parallel, |i| data[i * order + i])
}
