//! # Data Loader Crate
//!
//! Loads and indexes MovieLens-style rating data.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, Genre, MovieCatalog)
//! - **store**: Append-only RatingStore with per-user/per-movie indices
//! - **parser**: Parse `::`-delimited .dat files into Rust structs
//! - **loader**: Build the store and catalog from a dataset directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_dataset;
//! use std::path::Path;
//!
//! let (store, catalog) = load_dataset(Path::new("data/ml-1m"))?;
//! println!(
//!     "{} ratings over {} movies",
//!     store.len(),
//!     catalog.len()
//! );
//! ```

pub mod error;
pub mod loader;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::load_dataset;
pub use store::RatingStore;
pub use types::{Genre, MAX_RATING, MIN_RATING, Movie, MovieCatalog, MovieId, Rating, UserId};
