//! Core domain types for the MovieLens dataset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a user (1-6040 in MovieLens 1M; 0 is reserved
/// for the synthetic cold-start user)
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Valid rating range, inclusive on both ends.
pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 5.0;

/// A single rating a user gave a movie.
///
/// Ratings form an append-only history: the same (user, movie) pair may
/// appear more than once and both observations are kept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 1.0 to 5.0
    pub rating: f32,
    /// Unix timestamp when the rating was made
    pub timestamp: i64,
}

/// A movie with its genre metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<Genre>,
}

/// The 19 MovieLens genres.
///
/// Ordered (derived `Ord`) so genre selections can live in sorted sets
/// with a stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Unknown,
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Every genre, in the order the dataset documents them.
    pub const ALL: [Genre; 19] = [
        Genre::Unknown,
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Children,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// The genre's name as spelled in `movies.dat`.
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Unknown => "Unknown",
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            // MovieLens uses "Children's" with an apostrophe
            Genre::Children => "Children's",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Parse a genre from its dataset spelling. Case-sensitive.
    pub fn from_name(s: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.name() == s)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Item metadata: all movies plus a genre index for fast lookups.
///
/// Immutable once loaded; the recommendation core only ever reads from it.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    movies: HashMap<MovieId, Movie>,
    /// Movies grouped by genre (one movie can appear in multiple lists)
    genre_index: HashMap<Genre, Vec<MovieId>>,
}

impl MovieCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a movie and index it by its genres.
    pub fn insert(&mut self, movie: Movie) {
        for &genre in &movie.genres {
            self.genre_index.entry(genre).or_default().push(movie.id);
        }
        self.movies.insert(movie.id, movie);
    }

    /// Get a movie by ID
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All movie ids in ascending order.
    ///
    /// Sorted so that callers iterating the catalog get a deterministic
    /// candidate order.
    pub fn movie_ids(&self) -> Vec<MovieId> {
        let mut ids: Vec<MovieId> = self.movies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// All movies carrying the given genre, empty slice if none.
    pub fn movies_by_genre(&self, genre: Genre) -> &[MovieId] {
        self.genre_index
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_name_roundtrip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_name(genre.name()), Some(genre));
        }
        assert_eq!(Genre::from_name("Children's"), Some(Genre::Children));
        assert_eq!(Genre::from_name("children"), None);
    }

    #[test]
    fn test_catalog_genre_index() {
        let mut catalog = MovieCatalog::new();
        catalog.insert(Movie {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: vec![Genre::Animation, Genre::Children, Genre::Comedy],
        });
        catalog.insert(Movie {
            id: 2,
            title: "Heat (1995)".to_string(),
            genres: vec![Genre::Action, Genre::Crime, Genre::Thriller],
        });

        assert_eq!(catalog.movies_by_genre(Genre::Comedy), &[1]);
        assert_eq!(catalog.movies_by_genre(Genre::Action), &[2]);
        assert!(catalog.movies_by_genre(Genre::Western).is_empty());
        assert_eq!(catalog.movie_ids(), vec![1, 2]);
    }
}
