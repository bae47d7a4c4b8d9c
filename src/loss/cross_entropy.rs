use std::fmt;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Zip};

use super::{ErrorFunction, check_batch};
use crate::error::{MlpError, Result};

/// Multi-class cross entropy with a softmax applied to the outputs.
///
/// Outputs are unnormalised scores (logits) and targets are one-hot or probability rows.
/// Every logit must be finite, since an infinite score has no defined softmax.
/// `E = -(1 / batch_size) * sum(targets * log_softmax(outputs))`, with gradient
/// `(1 / batch_size) * (softmax(outputs) - targets)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossEntropySoftmaxError;

/// Row-wise log-sum-exp, shifted by the row maximum to avoid overflow
fn log_sum_exp(row: ArrayView1<'_, f64>, index: usize) -> Result<f64> {
    if !row.iter().all(|v| v.is_finite()) {
        return Err(MlpError::NonFinite {
            operand: "outputs",
            row: index,
        });
    }
    let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    Ok(max + row.fold(0.0, |acc, &v| acc + (v - max).exp()).ln())
}

impl ErrorFunction for CrossEntropySoftmaxError {
    fn evaluate(&self, outputs: ArrayView2<'_, f64>, targets: ArrayView2<'_, f64>) -> Result<f64> {
        let batch_size = check_batch(&outputs, &targets)?;

        let mut total = 0.0;
        let rows = outputs.axis_iter(Axis(0)).zip(targets.axis_iter(Axis(0)));
        for (index, (logits, target)) in rows.enumerate() {
            let lse = log_sum_exp(logits, index)?;
            total -= Zip::from(logits)
                .and(target)
                .fold(0.0, |acc, &z, &t| acc + t * (z - lse));
        }
        let value = total / batch_size as f64;

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

        let mut grad = Array2::<f64>::zeros(outputs.dim());
        for (index, ((grad_row, logits), target)) in grad
            .axis_iter_mut(Axis(0))
            .zip(outputs.axis_iter(Axis(0)))
            .zip(targets.axis_iter(Axis(0)))
            .enumerate()
        {
            let lse = log_sum_exp(logits, index)?;
            Zip::from(grad_row)
                .and(logits)
                .and(target)
                .for_each(|g, &z, &t| *g = scale * ((z - lse).exp() - t));
        }
        Ok(grad)
    }
}

impl fmt::Display for CrossEntropySoftmaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CrossEntropySoftmaxError")
    }
}
