//! Initialisers whose spread depends on the layer's fan-in and fan-out.
//!
//! All four read `shape[0]` as fan-in and `shape[1]` as fan-out. `SqrtInit` and
//! `KaimingInit` scale by `shape[1]` alone.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Initialiser, Tensor, fans, normal, sample, uniform};
use crate::error::Result;
use crate::rng;

/// Random normal initialiser with std `1 / sqrt(shape[1])`.
///
/// Conventionally this scheme targets the inverse of the input dimension, but the scale
/// here is taken from axis 1 of the requested shape. Callers laying weights out as
/// `(fan_in, fan_out)` therefore get fan-out scaling.
#[derive(Debug, Clone)]
pub struct SqrtInit<R = StdRng> {
    rng: R,
}

impl SqrtInit {
    /// SqrtInit with its own generator seeded from the default seed
    pub fn new() -> Self {
        Self::with_rng(rng::default_rng())
    }
}

impl Default for SqrtInit {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SqrtInit<R> {
    /// SqrtInit drawing from `rng`, which is used as given
    pub fn with_rng(rng: R) -> Self {
        SqrtInit { rng }
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for SqrtInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        let (_, fan_out) = fans(shape, "SqrtInit")?;
        let std = 1.0 / (fan_out as f64).sqrt();
        tracing::debug!(initialiser = "SqrtInit", ?shape, std, "producing tensor");
        sample(shape, &normal(0.0, std)?, &mut self.rng)
    }
}

/// Xavier (Glorot) uniform initialiser.
///
/// Samples from `U(-a, a)` with `a = sqrt(6 / (fan_in + fan_out))`.
#[derive(Debug, Clone)]
pub struct XavierInit<R = StdRng> {
    rng: R,
}

impl XavierInit {
    /// XavierInit with its own generator seeded from the default seed
    pub fn new() -> Self {
        Self::with_rng(rng::default_rng())
    }
}

impl Default for XavierInit {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> XavierInit<R> {
    /// XavierInit drawing from `rng`, which is used as given
    pub fn with_rng(rng: R) -> Self {
        XavierInit { rng }
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for XavierInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        let (fan_in, fan_out) = fans(shape, "XavierInit")?;
        let limit = (6.0 / (fan_in as f64 + fan_out as f64)).sqrt();
        tracing::debug!(initialiser = "XavierInit", ?shape, limit, "producing tensor");
        sample(shape, &uniform(-limit, limit)?, &mut self.rng)
    }
}

/// Xavier (Glorot) initialiser, normal variant with std `sqrt(2 / (fan_in + fan_out))`
#[derive(Debug, Clone)]
pub struct XavierNormalInit<R = StdRng> {
    rng: R,
}

impl XavierNormalInit {
    /// XavierNormalInit with its own generator seeded from the default seed
    pub fn new() -> Self {
        Self::with_rng(rng::default_rng())
    }
}

impl Default for XavierNormalInit {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> XavierNormalInit<R> {
    /// XavierNormalInit drawing from `rng`, which is used as given
    pub fn with_rng(rng: R) -> Self {
        XavierNormalInit { rng }
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for XavierNormalInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        let (fan_in, fan_out) = fans(shape, "XavierNormalInit")?;
        let std = (2.0 / (fan_in as f64 + fan_out as f64)).sqrt();
        tracing::debug!(initialiser = "XavierNormalInit", ?shape, std, "producing tensor");
        sample(shape, &normal(0.0, std)?, &mut self.rng)
    }
}

/// Kaiming (He) normal initialiser with std `sqrt(2 / shape[1])`
#[derive(Debug, Clone)]
pub struct KaimingInit<R = StdRng> {
    rng: R,
}

impl KaimingInit {
    /// KaimingInit with its own generator seeded from the default seed
    pub fn new() -> Self {
        Self::with_rng(rng::default_rng())
    }
}

impl Default for KaimingInit {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> KaimingInit<R> {
    /// KaimingInit drawing from `rng`, which is used as given
    pub fn with_rng(rng: R) -> Self {
        KaimingInit { rng }
    }

    /// The generator this initialiser draws from
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> Initialiser for KaimingInit<R> {
    fn produce(&mut self, shape: &[usize]) -> Result<Tensor> {
        let (_, fan_out) = fans(shape, "KaimingInit")?;
        let std = (2.0 / fan_out as f64).sqrt();
        tracing::debug!(initialiser = "KaimingInit", ?shape, std, "producing tensor");
        sample(shape, &normal(0.0, std)?, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MlpError;
    use crate::rng::seeded_rng;
    use rand_distr::{Distribution, Normal};

    fn sample_std(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
    }

    /// Pool several calls so the estimate is not tied to one draw
    fn pooled<I: Initialiser>(init: &mut I, shape: &[usize], calls: usize) -> Vec<f64> {
        (0..calls)
            .flat_map(|_| init.produce(shape).unwrap().into_iter())
            .collect()
    }

    #[test]
    fn test_xavier_bounds() {
        let mut init = XavierInit::new();
        let weights = init.produce(&[256, 64]).unwrap();
        let limit = (6.0f64 / 320.0).sqrt();

        assert_eq!(weights.shape(), &[256, 64]);
        for &w in weights.iter() {
            assert!(
                (-limit..=limit).contains(&w),
                "value {w} out of bounds [-{limit}, {limit}]"
            );
        }
    }

    #[test]
    fn test_kaiming_std() {
        let mut init = KaimingInit::new();
        let values = pooled(&mut init, &[128, 32], 10);
        let std = sample_std(&values);
        let expected = (2.0f64 / 32.0).sqrt();

        assert!(
            (std - expected).abs() < 0.03 * expected,
            "kaiming std {std} too far from {expected}"
        );
    }

    #[test]
    fn test_xavier_normal_std() {
        let mut init = XavierNormalInit::new();
        let values = pooled(&mut init, &[200, 50], 4);
        let std = sample_std(&values);
        let expected = (2.0f64 / 250.0).sqrt();

        assert!(
            (std - expected).abs() < 0.03 * expected,
            "xavier normal std {std} too far from {expected}"
        );
    }

    #[test]
    fn test_sqrt_scales_by_second_axis() {
        // 1/sqrt(4) = 0.5, whereas axis 0 would give 1/sqrt(1000) ≈ 0.032
        let mut init = SqrtInit::new();
        let values = pooled(&mut init, &[1000, 4], 5);
        let std = sample_std(&values);

        assert!((std - 0.5).abs() < 0.02, "sqrt std {std} too far from 0.5");
    }

    #[test]
    fn test_kaiming_matches_manual_draws() {
        let mut init = KaimingInit::with_rng(seeded_rng(5));
        let weights = init.produce(&[2, 3]).unwrap();

        let mut reference = seeded_rng(5);
        let dist = Normal::new(0.0, (2.0f64 / 3.0).sqrt()).unwrap();
        let expected: Vec<f64> = (0..6).map(|_| dist.sample(&mut reference)).collect();

        assert_eq!(weights.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_default_instances_are_reproducible() {
        assert_eq!(
            XavierInit::new().produce(&[6, 3]).unwrap(),
            XavierInit::default().produce(&[6, 3]).unwrap()
        );
        assert_eq!(
            SqrtInit::new().produce(&[6, 3]).unwrap(),
            SqrtInit::new().produce(&[6, 3]).unwrap()
        );
        assert_eq!(
            XavierNormalInit::new().produce(&[6, 3]).unwrap(),
            XavierNormalInit::new().produce(&[6, 3]).unwrap()
        );
        assert_eq!(
            KaimingInit::new().produce(&[6, 3]).unwrap(),
            KaimingInit::new().produce(&[6, 3]).unwrap()
        );
    }

    #[test]
    fn test_higher_rank_shapes() {
        let weights = XavierNormalInit::new().produce(&[3, 4, 5]).unwrap();
        assert_eq!(weights.shape(), &[3, 4, 5]);
    }

    #[test]
    fn test_shape_arity_errors() {
        let err = KaimingInit::new().produce(&[32]).unwrap_err();
        assert_eq!(
            err,
            MlpError::ShapeArity {
                initialiser: "KaimingInit",
                expected: 2,
                actual: 1,
                missing: "fan_out (axis 1)",
            }
        );

        assert!(matches!(
            SqrtInit::new().produce(&[]),
            Err(MlpError::ShapeArity { actual: 0, .. })
        ));
        assert!(matches!(
            XavierInit::new().produce(&[10]),
            Err(MlpError::ShapeArity { .. })
        ));
        assert!(matches!(
            XavierNormalInit::new().produce(&[10]),
            Err(MlpError::ShapeArity { .. })
        ));
    }

    #[test]
    fn test_huge_fans_are_an_error() {
        // The fan sum must not overflow before the allocation check runs
        assert_eq!(
            XavierInit::new().produce(&[usize::MAX, 1]),
            Err(MlpError::ShapeTooLarge {
                shape: vec![usize::MAX, 1],
            })
        );
        assert!(matches!(
            XavierNormalInit::new().produce(&[usize::MAX, usize::MAX]),
            Err(MlpError::ShapeTooLarge { .. })
        ));
        assert!(matches!(
            KaimingInit::new().produce(&[1 << 40, 1 << 40]),
            Err(MlpError::ShapeTooLarge { .. })
        ));
        assert!(matches!(
            SqrtInit::new().produce(&[usize::MAX / 4, 2]),
            Err(MlpError::ShapeTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_fan_rejected() {
        assert!(matches!(
            KaimingInit::new().produce(&[4, 0]),
            Err(MlpError::ZeroDimension { axis: 1, .. })
        ));
        assert!(matches!(
            XavierInit::new().produce(&[0, 4]),
            Err(MlpError::ZeroDimension { axis: 0, .. })
        ));
    }

    #[test]
    fn test_failed_call_does_not_advance_generator() {
        let mut init = XavierInit::with_rng(seeded_rng(8));
        assert!(init.produce(&[3]).is_err());
        let after_error = init.produce(&[3, 3]).unwrap();

        let expected = XavierInit::with_rng(seeded_rng(8)).produce(&[3, 3]).unwrap();
        assert_eq!(after_error, expected);
    }
}
