//! Horizontal concatenation of matrices.

use crate::error::{LoadError, LoadResult};
use crate::types::Matrix;

/// `(rows, cols)` of `matrix`.
pub fn shape(matrix: &Matrix) -> (usize, usize) {
    matrix.shape()
}

/// Concatenate `left` and `right` along the column axis.
///
/// Row `i` of the result is row `i` of `left` followed by row `i` of `right`. The inputs are not
/// modified.
///
/// Fails with [`LoadError::ShapeMismatch`] when the row counts differ.
pub fn merge(left: &Matrix, right: &Matrix) -> LoadResult<Matrix> {
    if left.rows() != right.rows() {
        return Err(LoadError::ShapeMismatch {
            left_rows: left.rows(),
            right_rows: right.rows(),
        });
    }

    let rows = left.rows();
    let cols = left.cols() + right.cols();
    let mut data = Vec::with_capacity(rows * cols);
    for (l, r) in left.iter_rows().zip(right.iter_rows()) {
        data.extend_from_slice(l);
        data.extend_from_slice(r);
    }
    Ok(Matrix::from_vec(data, rows, cols))
}
