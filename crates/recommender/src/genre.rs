//! Content-based fallback: rank movies by average community rating within
//! the user's favorite genres. Bypasses the factor model entirely.

use crate::error::{RecommendError, Result};
use data_loader::{Genre, MovieCatalog, MovieId, RatingStore};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// A genre-filtered pick with its community average rating.
#[derive(Debug, Clone, PartialEq)]
pub struct GenrePick {
    pub movie_id: MovieId,
    pub title: String,
    pub avg_rating: f32,
}

/// Rank movies in the selected genres by average rating.
///
/// Movies without a single rating are excluded rather than scored as
/// zero. Sorted by descending average; ties break by ascending movie id.
/// An empty genre selection is rejected.
pub fn recommend_by_genre(
    store: &RatingStore,
    catalog: &MovieCatalog,
    favorite_genres: &BTreeSet<Genre>,
    n: usize,
) -> Result<Vec<GenrePick>> {
    if favorite_genres.is_empty() {
        return Err(RecommendError::EmptyGenreSelection);
    }

    // Union the genre index lists; BTreeSet both dedups movies carrying
    // several selected genres and yields ascending ids.
    let mut candidates: BTreeSet<MovieId> = BTreeSet::new();
    for &genre in favorite_genres {
        candidates.extend(catalog.movies_by_genre(genre));
    }

    let mut picks: Vec<GenrePick> = candidates
        .into_iter()
        .filter_map(|id| {
            let ratings = store.ratings_by_movie(id);
            if ratings.is_empty() {
                return None;
            }
            let avg = ratings.iter().map(|r| r.rating).sum::<f32>() / ratings.len() as f32;
            catalog.get(id).map(|movie| GenrePick {
                movie_id: id,
                title: movie.title.clone(),
                avg_rating: avg,
            })
        })
        .collect();

    picks.sort_by(|a, b| {
        b.avg_rating
            .partial_cmp(&a.avg_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    picks.truncate(n);

    debug!(
        genres = favorite_genres.len(),
        returned = picks.len(),
        "genre-filtered recommendations"
    );
    Ok(picks)
}
