//! K-fold cross-validation for the factor model.
//!
//! Cross-validation is diagnostic only: it reports how well the
//! hyperparameters generalize, and the caller always retrains on the full
//! observation set afterwards. Folds are data-independent, so they are
//! evaluated in parallel; every fold trains its own private model and
//! metrics are merged only after all folds finish.

use crate::error::{ModelError, Result};
use crate::metrics::{mae, rmse};
use crate::svd::{SvdModel, SvdParams};
use data_loader::Rating;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// K-fold splitter with a seeded shuffle.
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits, seed: 42 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate (train_indices, validation_indices) for each fold.
    ///
    /// Indices are shuffled with the configured seed, then cut into
    /// `n_splits` disjoint validation slices of near-equal size (the
    /// remainder is spread over the first folds).
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = if fold < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + size;

            let validation = indices[start..end].to_vec();
            let mut train = Vec::with_capacity(n_samples - size);
            train.extend_from_slice(&indices[..start]);
            train.extend_from_slice(&indices[end..]);

            splits.push((train, validation));
            start = end;
        }
        splits
    }
}

/// Accuracy of a single fold's held-out predictions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoldMetrics {
    pub rmse: f32,
    pub mae: f32,
}

/// Per-fold and aggregate cross-validation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub folds: Vec<FoldMetrics>,
}

impl CrossValidationReport {
    pub fn mean_rmse(&self) -> f32 {
        mean(self.folds.iter().map(|f| f.rmse))
    }

    pub fn mean_mae(&self) -> f32 {
        mean(self.folds.iter().map(|f| f.mae))
    }
}

fn mean(values: impl ExactSizeIterator<Item = f32>) -> f32 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f32>() / n as f32
}

/// Run k-fold cross-validation over the observations.
///
/// A fresh model is trained per fold on everything outside the fold and
/// scored (RMSE, MAE) on the fold itself. Fails with
/// [`ModelError::InsufficientData`] when fewer than 2 folds are requested
/// or there are fewer observations than folds.
pub fn cross_validate(
    ratings: &[Rating],
    params: &SvdParams,
    n_folds: usize,
) -> Result<CrossValidationReport> {
    if n_folds < 2 || n_folds > ratings.len() {
        return Err(ModelError::InsufficientData {
            folds: n_folds,
            observations: ratings.len(),
        });
    }

    info!(
        n_folds,
        observations = ratings.len(),
        "running cross-validation"
    );
    let splits = KFold::new(n_folds).with_seed(params.seed).split(ratings.len());

    let folds = splits
        .par_iter()
        .map(|(train_idx, validation_idx)| {
            let train: Vec<Rating> = train_idx.iter().map(|&i| ratings[i]).collect();
            let model = SvdModel::fit(&train, params)?;

            let mut predicted = Vec::with_capacity(validation_idx.len());
            let mut actual = Vec::with_capacity(validation_idx.len());
            for &i in validation_idx {
                let obs = ratings[i];
                predicted.push(model.predict(obs.user_id, obs.movie_id));
                actual.push(obs.rating);
            }

            let metrics = FoldMetrics {
                rmse: rmse(&predicted, &actual),
                mae: mae(&predicted, &actual),
            };
            debug!(rmse = metrics.rmse, mae = metrics.mae, "fold evaluated");
            Ok(metrics)
        })
        .collect::<Result<Vec<FoldMetrics>>>()?;

    Ok(CrossValidationReport { folds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    fn synthetic_ratings(n: usize) -> Vec<Rating> {
        (0..n)
            .map(|i| Rating {
                user_id: (i % 7) as u32 + 1,
                movie_id: (i % 11) as u32 + 1,
                rating: (i % 5) as f32 + 1.0,
                timestamp: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let kfold = KFold::new(3).with_seed(7);
        let splits = kfold.split(10);
        assert_eq!(splits.len(), 3);

        let mut seen = Vec::new();
        for (train, validation) in &splits {
            assert_eq!(train.len() + validation.len(), 10);
            for &i in validation {
                assert!(!train.contains(&i));
                seen.push(i);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_sizes_near_equal() {
        let splits = KFold::new(3).split(10);
        let sizes: Vec<usize> = splits.iter().map(|(_, v)| v.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_cross_validate_reports_all_folds() {
        let ratings = synthetic_ratings(60);
        let params = SvdParams::default().with_factors(4).with_epochs(5);

        let report = cross_validate(&ratings, &params, 3).unwrap();
        assert_eq!(report.folds.len(), 3);
        for fold in &report.folds {
            assert!(fold.rmse >= 0.0);
            assert!(fold.mae >= 0.0);
            // MAE never exceeds RMSE
            assert!(fold.mae <= fold.rmse + 1e-6);
        }

        // The aggregate is the plain mean of the per-fold values.
        let manual: f32 =
            report.folds.iter().map(|f| f.rmse).sum::<f32>() / report.folds.len() as f32;
        assert!((report.mean_rmse() - manual).abs() < 1e-6);
    }

    #[test]
    fn test_too_many_folds_is_an_error() {
        let ratings = synthetic_ratings(3);
        let params = SvdParams::default();
        let result = cross_validate(&ratings, &params, 5);
        assert!(matches!(
            result,
            Err(ModelError::InsufficientData {
                folds: 5,
                observations: 3
            })
        ));
    }

    #[test]
    fn test_single_fold_is_an_error() {
        let ratings = synthetic_ratings(10);
        let result = cross_validate(&ratings, &SvdParams::default(), 1);
        assert!(matches!(result, Err(ModelError::InsufficientData { .. })));
    }
}
