//! Error types for model training and evaluation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    /// Training was invoked with zero observations
    #[error("Cannot train a model on an empty rating set")]
    EmptyDataset,

    /// Cross-validation was asked for more folds than the data supports
    #[error("Cross-validation with {folds} folds needs at least {folds} observations, got {observations}")]
    InsufficientData { folds: usize, observations: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
