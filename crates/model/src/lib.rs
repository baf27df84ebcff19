//! # Model Crate
//!
//! The latent factor rating-prediction engine.
//!
//! ## Components
//!
//! - **svd**: biased matrix factorization trained with SGD
//!   ([`SvdModel`], [`SvdParams`])
//! - **cross_validation**: seeded k-fold harness ([`cross_validate`])
//! - **metrics**: RMSE / MAE
//! - **error**: [`ModelError`]
//!
//! ## Example Usage
//!
//! ```ignore
//! use model::{SvdModel, SvdParams, cross_validate};
//!
//! let params = SvdParams::default().with_factors(50);
//!
//! // Diagnostic: how well do these hyperparameters generalize?
//! let report = cross_validate(store.observations(), &params, 3)?;
//! println!("RMSE {:.4} MAE {:.4}", report.mean_rmse(), report.mean_mae());
//!
//! // The served model is always retrained on everything.
//! let model = SvdModel::fit(store.observations(), &params)?;
//! let predicted = model.predict(user_id, movie_id);
//! ```

pub mod cross_validation;
pub mod error;
pub mod metrics;
pub mod svd;

// Re-export commonly used types
pub use cross_validation::{CrossValidationReport, FoldMetrics, KFold, cross_validate};
pub use error::{ModelError, Result};
pub use svd::{SvdModel, SvdParams};
