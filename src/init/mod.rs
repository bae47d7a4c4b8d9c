//! Parameter initialisers
//!
//! An initialiser turns a requested shape into a freshly allocated tensor of exactly that
//! shape. Nothing is allocated at construction; each call to [`Initialiser::produce`]
//! builds a new tensor.
//!
//! Stochastic strategies own one generator each. Constructed with `new`, they seed it from
//! [`DEFAULT_SEED`](crate::config::DEFAULT_SEED), so two default instances of the same
//! strategy produce identical sequences for identical call sequences. Constructed with
//! `with_rng`, they use the given generator as-is; pass a [`SharedRng`](crate::rng::SharedRng)
//! to drive several initialisers from one stream.
//!
//! Strategies that scale by layer size read the fan-in from axis 0 and the fan-out from
//! axis 1 of the shape, and reject shapes with fewer than two dimensions.

mod constant;
mod random;
mod scaled;

pub use constant::ConstantInit;
pub use random::{NormalInit, UniformInit};
pub use scaled::{KaimingInit, SqrtInit, XavierInit, XavierNormalInit};

use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::{MlpError, Result};

/// Dynamic-rank tensor produced by initialisers
pub type Tensor = ArrayD<f64>;

/// Common trait for parameter initialisers
pub trait Initialiser {
    /// Produce a tensor with `tensor.shape() == shape`.
    ///
    /// Stochastic strategies advance their generator on every call.
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor>;
}

impl<I: Initialiser + ?Sized> Initialiser for Box<I> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        (**self).produce(shape)
    }
}

/// Reject shapes whose element buffer could not be addressed.
///
/// The product of the non-zero axes, in bytes, must fit in `isize`.
pub(crate) fn check_shape(shape: &[usize]) -> Result<()> {
    shape
        .iter()
        .filter(|&&axis| axis != 0)
        .try_fold(size_of::<f64>(), |bytes, &axis| bytes.checked_mul(axis))
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .map(|_| ())
        .ok_or_else(|| MlpError::ShapeTooLarge {
            shape: shape.to_vec(),
        })
}

/// Fill a tensor of `shape` with independent draws, in row-major order
pub(crate) fn sample<D, R>(shape: &[usize], dist: &D, rng: &mut R) -> Result<Tensor>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    check_shape(shape)?;
    Ok(ArrayD::from_shape_simple_fn(IxDyn(shape), || dist.sample(rng)))
}

/// Split a weight shape into `(fan_in, fan_out)` from axes 0 and 1
pub(crate) fn fans(shape: &[usize], initialiser: &'static str) -> Result<(usize, usize)> {
    let (fan_in, fan_out) = match *shape {
        [fan_in, fan_out, ..] => (fan_in, fan_out),
        _ => {
            return Err(MlpError::ShapeArity {
                initialiser,
                expected: 2,
                actual: shape.len(),
                missing: if shape.is_empty() {
                    "fan_in (axis 0)"
                } else {
                    "fan_out (axis 1)"
                },
            });
        }
    };
    if fan_in == 0 {
        return Err(MlpError::ZeroDimension { initialiser, axis: 0 });
    }
    if fan_out == 0 {
        return Err(MlpError::ZeroDimension { initialiser, axis: 1 });
    }
    Ok((fan_in, fan_out))
}

/// Half-open uniform distribution on `[low, high)`
pub(crate) fn uniform(low: f64, high: f64) -> Result<Uniform<f64>> {
    if !low.is_finite() {
        return Err(MlpError::InvalidParameter {
            name: "low",
            value: low,
            reason: "must be finite",
        });
    }
    if !high.is_finite() || high <= low {
        return Err(MlpError::InvalidParameter {
            name: "high",
            value: high,
            reason: "must be finite and greater than low",
        });
    }
    Uniform::new(low, high).map_err(|_| MlpError::InvalidParameter {
        name: "high",
        value: high,
        reason: "range high - low must be finite",
    })
}

/// Normal distribution with the given mean and standard deviation
pub(crate) fn normal(mean: f64, std: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() {
        return Err(MlpError::InvalidParameter {
            name: "mean",
            value: mean,
            reason: "must be finite",
        });
    }
    if !std.is_finite() || std <= 0.0 {
        return Err(MlpError::InvalidParameter {
            name: "std",
            value: std,
            reason: "must be finite and positive",
        });
    }
    Normal::new(mean, std).map_err(|_| MlpError::InvalidParameter {
        name: "std",
        value: std,
        reason: "must be finite and positive",
    })
}
