//! Biased matrix factorization trained with stochastic gradient descent.
//!
//! The model predicts a rating as
//! `global_bias + user_bias[u] + item_bias[i] + dot(user_factors[u], item_factors[i])`,
//! clamped to the rating scale. Parameters are learned with plain SGD over
//! the observation sequence; each call to [`SvdModel::fit`] produces a
//! fresh, independently owned model.

use crate::error::{ModelError, Result};
use data_loader::{MAX_RATING, MIN_RATING, MovieId, Rating, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Hyperparameters for SGD training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdParams {
    /// Latent factor dimensionality (k)
    pub factors: usize,
    /// Number of full passes over the observations
    pub epochs: usize,
    /// SGD step size
    pub learning_rate: f32,
    /// L2 penalty applied to biases and factors
    pub regularization: f32,
    /// Half-width of the uniform factor initialization; 0 means zero-init
    pub init_std: f32,
    /// Seed for factor initialization (and fold shuffling downstream)
    pub seed: u64,
}

impl Default for SvdParams {
    fn default() -> Self {
        Self {
            factors: 20,
            epochs: 20,
            learning_rate: 0.005,
            regularization: 0.02,
            init_std: 0.1,
            seed: 42,
        }
    }
}

impl SvdParams {
    pub fn with_factors(mut self, factors: usize) -> Self {
        self.factors = factors;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_regularization(mut self, regularization: f32) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A trained latent factor model.
///
/// Bias and factor tables only cover ids seen during training; prediction
/// for an unknown id degrades to the remaining bias terms, down to the
/// global mean for a fully unknown (user, movie) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvdModel {
    factors: usize,
    global_bias: f32,
    user_bias: HashMap<UserId, f32>,
    item_bias: HashMap<MovieId, f32>,
    user_factors: HashMap<UserId, Vec<f32>>,
    item_factors: HashMap<MovieId, Vec<f32>>,
}

impl SvdModel {
    /// Train a fresh model on the given observations.
    ///
    /// Each epoch visits the observations in slice order. For every
    /// observation the error against the unclamped prediction drives the
    /// bias and factor updates; factor updates on both sides use the
    /// pre-update value of the other side. Ids seen for the first time
    /// lazily allocate a zero bias and a seeded small-random factor row,
    /// so training is deterministic for a fixed seed.
    pub fn fit(ratings: &[Rating], params: &SvdParams) -> Result<Self> {
        if ratings.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let global_mean = ratings.iter().map(|r| r.rating).sum::<f32>() / ratings.len() as f32;

        let mut model = SvdModel {
            factors: params.factors,
            global_bias: global_mean,
            user_bias: HashMap::new(),
            item_bias: HashMap::new(),
            user_factors: HashMap::new(),
            item_factors: HashMap::new(),
        };

        let lr = params.learning_rate;
        let reg = params.regularization;

        for epoch in 0..params.epochs {
            let mut squared_error = 0.0f64;

            for obs in ratings {
                model.user_bias.entry(obs.user_id).or_insert(0.0);
                model.item_bias.entry(obs.movie_id).or_insert(0.0);
                model
                    .user_factors
                    .entry(obs.user_id)
                    .or_insert_with(|| init_factors(params, &mut rng));
                model
                    .item_factors
                    .entry(obs.movie_id)
                    .or_insert_with(|| init_factors(params, &mut rng));

                let predicted = model.raw_predict(obs.user_id, obs.movie_id);
                let err = obs.rating - predicted;
                squared_error += f64::from(err * err);

                model.global_bias += lr * err;
                if let Some(bu) = model.user_bias.get_mut(&obs.user_id) {
                    *bu += lr * (err - reg * *bu);
                }
                if let Some(bi) = model.item_bias.get_mut(&obs.movie_id) {
                    *bi += lr * (err - reg * *bi);
                }
                // user_factors and item_factors are distinct maps, so both
                // rows can be borrowed mutably at the same time.
                if let (Some(pu), Some(qi)) = (
                    model.user_factors.get_mut(&obs.user_id),
                    model.item_factors.get_mut(&obs.movie_id),
                ) {
                    for f in 0..params.factors {
                        let puf = pu[f];
                        let qif = qi[f];
                        pu[f] += lr * (err * qif - reg * puf);
                        qi[f] += lr * (err * puf - reg * qif);
                    }
                }
            }

            let train_rmse = (squared_error / ratings.len() as f64).sqrt();
            debug!(epoch, train_rmse, "completed SGD epoch");
        }

        debug!(
            users = model.user_bias.len(),
            movies = model.item_bias.len(),
            "training finished"
        );
        Ok(model)
    }

    /// Predict the rating this user would give this movie, clamped to
    /// the [1.0, 5.0] scale. Never fails: unseen ids fall back to the
    /// biases that are known, or the global mean for a fully unknown pair.
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        self.raw_predict(user_id, movie_id)
            .clamp(MIN_RATING, MAX_RATING)
    }

    /// Unclamped prediction, used during SGD.
    fn raw_predict(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        let mut p = self.global_bias
            + self.user_bias.get(&user_id).copied().unwrap_or(0.0)
            + self.item_bias.get(&movie_id).copied().unwrap_or(0.0);
        if let (Some(pu), Some(qi)) = (
            self.user_factors.get(&user_id),
            self.item_factors.get(&movie_id),
        ) {
            p += dot(pu, qi);
        }
        p
    }

    /// Learned global bias (starts at the training-set mean rating).
    pub fn global_bias(&self) -> f32 {
        self.global_bias
    }

    /// Latent factor dimensionality
    pub fn factors(&self) -> usize {
        self.factors
    }

    /// Number of users seen during training
    pub fn known_users(&self) -> usize {
        self.user_bias.len()
    }

    /// Number of movies seen during training
    pub fn known_movies(&self) -> usize {
        self.item_bias.len()
    }
}

fn init_factors(params: &SvdParams, rng: &mut StdRng) -> Vec<f32> {
    if params.init_std > 0.0 {
        (0..params.factors)
            .map(|_| rng.random_range(-params.init_std..params.init_std))
            .collect()
    } else {
        vec![0.0; params.factors]
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
