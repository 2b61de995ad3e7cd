//! In-memory matrix utilities.
//!
//! These operate on [`crate::types::Matrix`] values produced by loading and are independent of
//! the typing pipeline.
//!
//! - [`merge()`]: horizontal concatenation of two matrices with equal row counts
//! - [`shape()`]: `(rows, cols)` query
//!
//! ## Example: merge coordinates with loaded metadata
//!
//! ```rust
//! use rust_csv_matrix::processing::{merge, shape};
//! use rust_csv_matrix::types::Matrix;
//!
//! let coords = Matrix::from_vec(vec![0.0, 1.0, 2.0, 3.0], 2, 2);
//! let labels = Matrix::from_vec(vec![5.0, f32::NAN], 2, 1);
//!
//! let merged = merge(&coords, &labels).unwrap();
//! assert_eq!(shape(&merged), (2, 3));
//! assert_eq!(merged.row(1).unwrap()[..2], [2.0, 3.0]);
//! ```

pub mod merge;

pub use merge::{merge, shape};
