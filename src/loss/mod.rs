//! Error functions for training neural networks
//!
//! An error function scores a batch of model outputs against targets and supplies the
//! gradient that starts backpropagation. Both operations average over the batch in the
//! same way, so the gradient is always the exact derivative of the scalar.

mod cross_entropy;
mod sum_of_squares;

pub use cross_entropy::CrossEntropySoftmaxError;
pub use sum_of_squares::SumOfSquaredDiffsError;

use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::error::{MlpError, Result};

/// Common trait for error functions.
///
/// `outputs` and `targets` are `(batch_size, output_dim)` arrays of identical shape.
/// The `Display` impl is the human-readable label used in logs.
pub trait ErrorFunction: fmt::Display {
    /// Scalar error for the batch
    fn evaluate(&self, outputs: ArrayView2<'_, f64>, targets: ArrayView2<'_, f64>) -> Result<f64>;

    /// Gradient of [`evaluate`](Self::evaluate) with respect to `outputs`, same shape as `outputs`
    fn gradient(
        &self,
        outputs: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>>;
}

impl<E: ErrorFunction + ?Sized> ErrorFunction for Box<E> {
    fn evaluate(&self, outputs: ArrayView2<'_, f64>, targets: ArrayView2<'_, f64>) -> Result<f64> {
        (**self).evaluate(outputs, targets)
    }

    fn gradient(
        &self,
        outputs: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>> {
        (**self).gradient(outputs, targets)
    }
}

/// Validate a batch and return its size.
///
/// Shapes must match exactly (no broadcasting) and the batch must hold at least one row.
pub(crate) fn check_batch(
    outputs: &ArrayView2<'_, f64>,
    targets: &ArrayView2<'_, f64>,
) -> Result<usize> {
    if outputs.dim() != targets.dim() {
        return Err(MlpError::ShapeMismatch {
            outputs: outputs.dim(),
            targets: targets.dim(),
        });
    }
    match outputs.nrows() {
        0 => Err(MlpError::EmptyBatch),
        batch_size => Ok(batch_size),
    }
}
