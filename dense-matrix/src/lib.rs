//! Small dense row-major matrices for fitting and evaluating sensor-to-actuator mappings.
//!
//! Owned matrices are always stored untransposed. [`Matrix::t`] hands out a
//! [`MatrixView`], a read-only borrow of the same buffer with the row and column
//! strides swapped, so transposing is O(1) and mutating the source while a view
//! is alive is rejected by the borrow checker.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod determinant;
mod error;
mod features;
mod inverse;
mod matrix;
mod view;

pub use error::MatrixError;
pub use inverse::PIVOT_EPSILON;
pub use matrix::Matrix;
pub use view::MatrixView;
