use super::{Initialiser, Tensor, check_shape};
use crate::error::{MlpError, Result};

/// Constant parameter initialiser, typically used for biases
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantInit {
    value: f64,
}

impl ConstantInit {
    /// Create an initialiser that fills every element with `value`
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(MlpError::InvalidParameter {
                name: "value",
                value,
                reason: "must be finite",
            });
        }
        Ok(ConstantInit { value })
    }

    /// The fill value
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Initialiser for ConstantInit {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        check_shape(shape)?;
        tracing::debug!(
            initialiser = "ConstantInit",
            ?shape,
            value = self.value,
            "producing tensor"
        );
        Ok(Tensor::from_elem(shape, self.value))
    }
}
