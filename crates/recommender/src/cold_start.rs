//! Cold-start collection: sampling candidate movies for a new user and
//! merging their ratings into the store before retraining.
//!
//! The actual prompting (and re-prompting on invalid input) is the
//! caller's job; this module only ever sees validated ratings. New
//! observations are recorded under a reserved synthetic user id.

use crate::error::Result;
use data_loader::{Movie, MovieCatalog, MovieId, Rating, RatingStore, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::info;

/// Reserved user id for the interactive cold-start user.
pub const SYNTHETIC_USER_ID: UserId = 0;

/// What to do with the synthetic user's observations from earlier sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColdStartPolicy {
    /// Keep prior observations; repeat sessions build a richer profile.
    Accumulate,
    /// Drop the synthetic user's history and start the profile over.
    Reset,
}

/// Supplies a rating for a presented movie.
///
/// Implemented by the presentation layer (e.g. an interactive prompt).
/// Implementations must only return ratings in [1.0, 5.0]; `None` skips
/// the movie.
pub trait RatingCollector {
    fn collect(&mut self, movie: &Movie) -> Option<f32>;
}

/// Sample `k` candidate movies uniformly without replacement.
///
/// Movies the synthetic user has already rated are left out of the pool
/// so a repeat session widens the profile instead of re-asking.
pub fn sample_candidates(
    catalog: &MovieCatalog,
    store: &RatingStore,
    k: usize,
    seed: u64,
) -> Vec<MovieId> {
    let already_rated: HashSet<MovieId> = store
        .ratings_by_user(SYNTHETIC_USER_ID)
        .iter()
        .map(|r| r.movie_id)
        .collect();

    let mut pool: Vec<MovieId> = catalog
        .movie_ids()
        .into_iter()
        .filter(|id| !already_rated.contains(id))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    pool.shuffle(&mut rng);
    pool.truncate(k);
    pool
}

/// Ask the collector to rate each candidate, producing observations for
/// the synthetic user. Skipped movies produce no observation.
pub fn collect_ratings<C: RatingCollector>(
    collector: &mut C,
    catalog: &MovieCatalog,
    candidates: &[MovieId],
    timestamp: i64,
) -> Vec<Rating> {
    candidates
        .iter()
        .filter_map(|&movie_id| {
            let movie = catalog.get(movie_id)?;
            collector.collect(movie).map(|value| Rating {
                user_id: SYNTHETIC_USER_ID,
                movie_id,
                rating: value,
                timestamp,
            })
        })
        .collect()
}

/// Merge freshly collected observations into the store under the given
/// policy, returning the store to retrain on.
///
/// `Reset` rebuilds a store without the synthetic user's earlier rows
/// rather than mutating in place; the store itself stays append-only.
pub fn merge_cold_start(
    store: RatingStore,
    new_ratings: Vec<Rating>,
    policy: ColdStartPolicy,
) -> Result<RatingStore> {
    let mut store = match policy {
        ColdStartPolicy::Accumulate => store,
        ColdStartPolicy::Reset => {
            let kept = store
                .observations()
                .iter()
                .copied()
                .filter(|r| r.user_id != SYNTHETIC_USER_ID);
            RatingStore::from_ratings(kept)?
        }
    };

    info!(
        added = new_ratings.len(),
        policy = ?policy,
        "merging cold-start observations"
    );
    for rating in new_ratings {
        store.add(rating)?;
    }
    Ok(store)
}
