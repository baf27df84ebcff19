//! Error types for the recommender crate.

use data_loader::DataLoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// An explicit empty genre selection is a caller error, there is no
    /// universal fallback.
    #[error("At least one favorite genre must be selected")]
    EmptyGenreSelection,

    /// Appending cold-start observations can fail store validation
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
