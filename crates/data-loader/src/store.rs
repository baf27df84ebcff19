//! The in-memory rating store.
//!
//! `RatingStore` owns the full sequence of rating observations in insertion
//! order and keeps per-user and per-movie indices for fast grouped lookups.
//! It is append-only: cold-start observations are added between sessions,
//! nothing is ever removed.

use crate::error::{DataLoadError, Result};
use crate::types::{MAX_RATING, MIN_RATING, MovieId, Rating, UserId};
use std::collections::{HashMap, HashSet};

/// Sparse (user, movie, rating) observations with grouped indices.
///
/// Duplicate (user, movie) pairs are kept; the store records history, it
/// does not overwrite.
#[derive(Debug, Default)]
pub struct RatingStore {
    /// All observations in insertion order. Training iterates this.
    observations: Vec<Rating>,
    /// All ratings made by each user
    user_index: HashMap<UserId, Vec<Rating>>,
    /// All ratings received by each movie
    movie_index: HashMap<MovieId, Vec<Rating>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a sequence of observations.
    pub fn from_ratings(ratings: impl IntoIterator<Item = Rating>) -> Result<Self> {
        let mut store = Self::new();
        for rating in ratings {
            store.add(rating)?;
        }
        Ok(store)
    }

    /// Append an observation.
    ///
    /// Never fails for a structurally valid tuple, but rejects ratings
    /// outside the [1.0, 5.0] scale.
    pub fn add(&mut self, rating: Rating) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating.rating) {
            return Err(DataLoadError::ValidationError(format!(
                "rating {} for user {} / movie {} is outside [{}, {}]",
                rating.rating, rating.user_id, rating.movie_id, MIN_RATING, MAX_RATING
            )));
        }

        self.observations.push(rating);
        self.user_index.entry(rating.user_id).or_default().push(rating);
        self.movie_index.entry(rating.movie_id).or_default().push(rating);
        Ok(())
    }

    /// All observations in insertion order.
    pub fn observations(&self) -> &[Rating] {
        &self.observations
    }

    /// All ratings made by a user, empty slice if none.
    pub fn ratings_by_user(&self, user_id: UserId) -> &[Rating] {
        self.user_index
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All ratings received by a movie, empty slice if none.
    pub fn ratings_by_movie(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_index
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The set of users with at least one observation.
    pub fn distinct_users(&self) -> HashSet<UserId> {
        self.user_index.keys().copied().collect()
    }

    /// The set of movies with at least one observation.
    pub fn distinct_movies(&self) -> HashSet<MovieId> {
        self.movie_index.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
