use std::fmt;

use ndarray::{Array2, ArrayView2, Zip};

use super::{ErrorFunction, check_batch};
use crate::error::Result;

/// Sum of squared differences (squared Euclidean distance) error.
///
/// `E = (1 / batch_size) * 0.5 * sum((outputs - targets)^2)`. The `0.5` cancels against
/// the square's derivative, so the gradient is just the averaged difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOfSquaredDiffsError;

impl ErrorFunction for SumOfSquaredDiffsError {
    fn evaluate(&self, outputs: ArrayView2<'_, f64>, targets: ArrayView2<'_, f64>) -> Result<f64> {
        let batch_size = check_batch(&outputs, &targets)?;

        let sum_squared = Zip::from(outputs)
            .and(targets)
            .fold(0.0, |acc, &o, &t| acc + (o - t) * (o - t));
        let value = 1.0 / batch_size as f64 * 0.5 * sum_squared;

        tracing::trace!(error_fn = %self, batch_size, value, "evaluated");
        Ok(value)
    }

    fn gradient(
        &self,
        outputs: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>> {
        let batch_size = check_batch(&outputs, &targets)?;
        let scale = 1.0 / batch_size as f64;

        Ok(Zip::from(outputs)
            .and(targets)
            .map_collect(|&o, &t| scale * (o - t)))
    }
}

impl fmt::Display for SumOfSquaredDiffsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SumOfSquaredDiffsError")
    }
}
