use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Normal, Uniform};

use super::{Initialiser, Tensor, normal, sample, uniform};
use crate::error::Result;
use crate::rng;

/// Random uniform parameter initialiser, sampling i.i.d. from `[low, high)`
#[derive(Debug, Clone)]
pub struct UniformInit<R = StdRng> {
    low: f64,
    high: f64,
    dist: Uniform<f64>,
    rng: R,
}

impl UniformInit {
    /// Uniform initialiser with its own generator seeded from the default seed
    pub fn new(low: f64, high: f64) -> Result<Self> {
        Self::with_rng(low, high, rng::default_rng())
    }
}

impl<R: Rng> UniformInit<R> {
    /// Uniform initialiser drawing from `rng`, which is used as given
    pub fn with_rng(low: f64, high: f64, rng: R) -> Result<Self> {
        let dist = uniform(low, high)?;
        Ok(UniformInit {
            low,
            high,
            dist,
            rng,
        })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for UniformInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        tracing::debug!(
            initialiser = "UniformInit",
            ?shape,
            low = self.low,
            high = self.high,
            "producing tensor"
        );
        sample(shape, &self.dist, &mut self.rng)
    }
}

/// Random normal parameter initialiser
#[derive(Debug, Clone)]
pub struct NormalInit<R = StdRng> {
    mean: f64,
    std: f64,
    dist: Normal<f64>,
    rng: R,
}

impl NormalInit {
    /// Normal initialiser with its own generator seeded from the default seed
    pub fn new(mean: f64, std: f64) -> Result<Self> {
        Self::with_rng(mean, std, rng::default_rng())
    }
}

impl<R: Rng> NormalInit<R> {
    /// Normal initialiser drawing from `rng`, which is used as given
    pub fn with_rng(mean: f64, std: f64, rng: R) -> Result<Self> {
        let dist = normal(mean, std)?;
        Ok(NormalInit {
            mean,
            std,
            dist,
            rng,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for NormalInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        tracing::debug!(
            initialiser = "NormalInit",
            ?shape,
            mean = self.mean,
            std = self.std,
            "producing tensor"
        );
        sample(shape, &self.dist, &mut self.rng)
    }
}
