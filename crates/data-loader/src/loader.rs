//! Dataset loading: parse both `.dat` files and build the store + catalog.

use crate::error::Result;
use crate::parser;
use crate::store::RatingStore;
use crate::types::MovieCatalog;
use std::path::Path;
use tracing::info;

/// Load a MovieLens-style dataset from a directory containing
/// `ratings.dat` and `movies.dat`.
///
/// The two files are parsed in parallel.
pub fn load_dataset(data_dir: &Path) -> Result<(RatingStore, MovieCatalog)> {
    info!("Loading dataset from {:?}", data_dir);

    let movies_path = data_dir.join("movies.dat");
    let ratings_path = data_dir.join("ratings.dat");

    let (movies, ratings) = rayon::join(
        || parser::parse_movies(&movies_path),
        || parser::parse_ratings(&ratings_path),
    );
    let movies = movies?;
    let ratings = ratings?;

    info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

    let mut catalog = MovieCatalog::new();
    for movie in movies {
        catalog.insert(movie);
    }

    let store = RatingStore::from_ratings(ratings)?;

    info!(
        "Built rating store: {} observations from {} users over {} movies",
        store.len(),
        store.distinct_users().len(),
        store.distinct_movies().len()
    );
    Ok((store, catalog))
}
