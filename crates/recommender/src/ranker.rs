//! Top-N ranking over model predictions.

use data_loader::{MovieCatalog, MovieId, RatingStore, UserId};
use model::SvdModel;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// A recommended movie with its predicted rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// Score every candidate movie for a user and return the top `n`.
///
/// Candidates are all catalog movies, minus the ones the user already
/// rated when `exclude_rated` is set. Results are sorted by descending
/// predicted rating; equal scores break ties by ascending movie id so the
/// ordering is deterministic. Returns fewer than `n` entries when the
/// candidate set is exhausted, down to an empty list.
pub fn top_n(
    model: &SvdModel,
    catalog: &MovieCatalog,
    store: &RatingStore,
    user_id: UserId,
    n: usize,
    exclude_rated: bool,
) -> Vec<RankedMovie> {
    let rated: HashSet<MovieId> = if exclude_rated {
        store
            .ratings_by_user(user_id)
            .iter()
            .map(|r| r.movie_id)
            .collect()
    } else {
        HashSet::new()
    };

    let mut scored: Vec<(MovieId, f32)> = catalog
        .movie_ids()
        .into_iter()
        .filter(|id| !rated.contains(id))
        .map(|id| (id, model.predict(user_id, id)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(n);

    debug!(
        user_id,
        candidates = catalog.len().saturating_sub(rated.len()),
        returned = scored.len(),
        "ranked candidates"
    );

    scored
        .into_iter()
        .filter_map(|(id, score)| {
            catalog.get(id).map(|movie| RankedMovie {
                movie_id: id,
                title: movie.title.clone(),
                score,
            })
        })
        .collect()
}
