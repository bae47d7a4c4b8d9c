//! Error types shared by error functions and initialisers

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MlpError>;

/// Everything that can go wrong when scoring a batch or producing a parameter tensor.
///
/// None of these are transient: they indicate a caller passed the wrong shape or an
/// impossible distribution parameter, so they are reported immediately and never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MlpError {
    #[error("shape mismatch: outputs are {outputs:?} but targets are {targets:?}")]
    ShapeMismatch {
        outputs: (usize, usize),
        targets: (usize, usize),
    },

    #[error("batch is empty: at least one row of outputs and targets is required")]
    EmptyBatch,

    #[error(
        "{initialiser} needs a shape with at least {expected} dimensions, got {actual} (missing {missing})"
    )]
    ShapeArity {
        initialiser: &'static str,
        expected: usize,
        actual: usize,
        missing: &'static str,
    },

    #[error("{initialiser} cannot scale by a zero-sized dimension at axis {axis}")]
    ZeroDimension {
        initialiser: &'static str,
        axis: usize,
    },

    #[error("shape {shape:?} is too large to allocate")]
    ShapeTooLarge { shape: Vec<usize> },

    #[error("{operand} row {row} contains a non-finite value")]
    NonFinite { operand: &'static str, row: usize },

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}
