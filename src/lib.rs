//! # MLP Core
//!
//! Numerical building blocks for a small multi-layer perceptron framework.
//!
//! - [`loss`]: error functions that score a batch of outputs against targets and return
//!   the gradient used to start backpropagation.
//! - [`init`]: parameter initialisers that produce weight and bias tensors of a requested
//!   shape, either as a constant fill or by sampling from a seeded generator.
//!
//! Randomness is reproducible by default: every stochastic initialiser built without an
//! explicit generator seeds its own from [`DEFAULT_SEED`].
//!
//! ```
//! use mlp_core::init::{ConstantInit, Initialiser, XavierInit};
//! use mlp_core::loss::{ErrorFunction, SumOfSquaredDiffsError};
//! use ndarray::array;
//!
//! let weights = XavierInit::new().produce(&[3, 2]).unwrap();
//! let biases = ConstantInit::new(0.0).unwrap().produce(&[2]).unwrap();
//! assert_eq!(weights.shape(), &[3, 2]);
//! assert_eq!(biases.shape(), &[2]);
//!
//! let outputs = array![[1.0, 2.0]];
//! let targets = array![[0.0, 0.0]];
//! let error = SumOfSquaredDiffsError.evaluate(outputs.view(), targets.view()).unwrap();
//! assert_eq!(error, 2.5);
//! ```

pub mod config;
mod error;
pub mod init;
pub mod loss;
pub mod rng;

// Re-export main types
pub use config::{DEFAULT_SEED, InitConfig};
pub use error::{MlpError, Result};
pub use init::{Initialiser, Tensor};
pub use loss::ErrorFunction;
pub use rng::SharedRng;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{ConstantInit, KaimingInit, UniformInit};
    use crate::loss::SumOfSquaredDiffsError;
    use ndarray::{Array2, Axis};

    #[test]
    fn test_layer_setup_and_scoring() {
        // A caller builds a layer from initialisers and scores its output
        let shared = SharedRng::new(InitConfig::default().rng());
        let weights = KaimingInit::with_rng(shared.clone()).produce(&[3, 2]).unwrap();
        let biases = ConstantInit::new(0.1).unwrap().produce(&[2]).unwrap();

        let weights = weights.into_dimensionality::<ndarray::Ix2>().unwrap();
        let inputs = UniformInit::with_rng(0.0, 1.0, shared)
            .unwrap()
            .produce(&[4, 3])
            .unwrap()
            .into_dimensionality::<ndarray::Ix2>()
            .unwrap();
        let biases = biases.into_dimensionality::<ndarray::Ix1>().unwrap();
        let outputs = inputs.dot(&weights) + &biases;
        let targets = Array2::<f64>::zeros((4, 2));

        let error = SumOfSquaredDiffsError
            .evaluate(outputs.view(), targets.view())
            .unwrap();
        let grad = SumOfSquaredDiffsError
            .gradient(outputs.view(), targets.view())
            .unwrap();

        // With zero targets the error is 0.5 * mean row norm squared
        let expected = 0.5 * outputs.map_axis(Axis(1), |row| row.dot(&row)).mean().unwrap();
        assert!((error - expected).abs() < 1e-12);
        assert_eq!(grad, outputs / 4.0);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
