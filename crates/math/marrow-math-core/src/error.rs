use thiserror::Error;

/// A matrix with zero determinant was asked for its inverse.
///
/// Callers decide the fallback (substitute identity, reject the asset, ...);
/// the math layer never aborts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("matrix is not invertible (determinant is zero)")]
pub struct DegenerateMatrixError;
