//! # Recommender Crate
//!
//! Turns a trained factor model and the rating data into ranked
//! recommendation lists.
//!
//! ## Components
//!
//! - **ranker**: top-N predicted-rating ranking ([`top_n`])
//! - **genre**: content-based fallback over genre averages
//!   ([`recommend_by_genre`])
//! - **cold_start**: candidate sampling and rating merge for a brand-new
//!   user ([`sample_candidates`], [`merge_cold_start`])
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{top_n, recommend_by_genre};
//!
//! let model = SvdModel::fit(store.observations(), &params)?;
//! for rec in top_n(&model, &catalog, &store, user_id, 10, true) {
//!     println!("{} ({:.2})", rec.title, rec.score);
//! }
//! ```

pub mod cold_start;
pub mod error;
pub mod genre;
pub mod ranker;

// Re-export main types
pub use cold_start::{
    ColdStartPolicy, RatingCollector, SYNTHETIC_USER_ID, collect_ratings, merge_cold_start,
    sample_candidates,
};
pub use error::{RecommendError, Result};
pub use genre::{GenrePick, recommend_by_genre};
pub use ranker::{RankedMovie, top_n};
