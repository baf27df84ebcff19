//! Parsers for the MovieLens `.dat` files.
//!
//! - ratings.dat: userId::movieId::rating::timestamp
//! - movies.dat: movieId::title::genres (pipe-separated)
//!
//! The dataset ships in ISO-8859-1, not UTF-8, so files are read as bytes
//! and widened to Unicode code points before line splitting.

use crate::error::{DataLoadError, Result};
use crate::types::{Genre, Movie, Rating};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a file with ISO-8859-1 encoding (Latin-1).
///
/// ISO-8859-1 is a single-byte encoding where each byte directly maps to a
/// Unicode code point.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn missing_field(file: &str, line: usize, field: &str) -> DataLoadError {
    DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {field}"),
    }
}

fn bad_field(file: &str, line: usize, field: &str, err: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {field}: {err}"),
    }
}

/// Parse the movies.dat file.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        movies.push(parse_movie_line(line, idx + 1)?);
    }
    Ok(movies)
}

/// Parse a single `movieId::title::genres` line.
fn parse_movie_line(line: &str, line_no: usize) -> Result<Movie> {
    const FILE: &str = "movies.dat";
    let mut parts = line.split("::");

    let movie_id = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "movieId"))?;
    let title = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "title"))?;
    let genres = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "genres"))?;

    Ok(Movie {
        id: movie_id
            .parse()
            .map_err(|e| bad_field(FILE, line_no, "movieId", e))?,
        title: normalize_title(title),
        genres: parse_genres(genres)?,
    })
}

/// Parse the ratings.dat file.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        ratings.push(parse_rating_line(line, idx + 1)?);
    }
    Ok(ratings)
}

/// Parse a single `userId::movieId::rating::timestamp` line.
fn parse_rating_line(line: &str, line_no: usize) -> Result<Rating> {
    const FILE: &str = "ratings.dat";
    let mut parts = line.split("::");

    let user_id = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "userId"))?;
    let movie_id = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "movieId"))?;
    let rating = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "rating"))?;
    let timestamp = parts
        .next()
        .ok_or_else(|| missing_field(FILE, line_no, "timestamp"))?;

    Ok(Rating {
        user_id: user_id
            .parse()
            .map_err(|e| bad_field(FILE, line_no, "userId", e))?,
        movie_id: movie_id
            .parse()
            .map_err(|e| bad_field(FILE, line_no, "movieId", e))?,
        rating: rating
            .parse()
            .map_err(|e| bad_field(FILE, line_no, "rating", e))?,
        timestamp: timestamp
            .parse()
            .map_err(|e| bad_field(FILE, line_no, "timestamp", e))?,
    })
}

/// Move a trailing 'A', 'An', or 'The' back to the front of a title.
///
/// MovieLens stores titles library-style: "Close Shave, A (1995)".
/// This returns "A Close Shave (1995)". Titles that don't match the
/// `..., <article> (<year>)` shape are returned unchanged.
fn normalize_title(title: &str) -> String {
    let Some(open) = title.rfind(" (") else {
        return title.to_string();
    };
    let (main, year) = title.split_at(open);
    let inner = &year[2..];
    let Some(inner) = inner.strip_suffix(')') else {
        return title.to_string();
    };
    if inner.len() != 4 || !inner.chars().all(|c| c.is_ascii_digit()) {
        return title.to_string();
    }

    for article in ["A", "An", "The"] {
        if let Some(stripped) = main.strip_suffix(&format!(", {article}")) {
            return format!("{article} {stripped}{year}");
        }
    }
    title.to_string()
}

/// Parse pipe-separated genres.
///
/// Example: "Action|Adventure|Sci-Fi" -> vec![Genre::Action, Genre::Adventure, Genre::SciFi]
fn parse_genres(s: &str) -> Result<Vec<Genre>> {
    s.split('|')
        .map(|name| {
            Genre::from_name(name).ok_or_else(|| DataLoadError::InvalidValue {
                field: "genre".to_string(),
                value: name.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            normalize_title("Close Shave, A (1995)"),
            "A Close Shave (1995)"
        );
        assert_eq!(
            normalize_title("American President, The (1995)"),
            "The American President (1995)"
        );
        assert_eq!(
            normalize_title("Awfully Big Adventure, An (1995)"),
            "An Awfully Big Adventure (1995)"
        );
        // No trailing article: unchanged
        assert_eq!(normalize_title("Toy Story (1995)"), "Toy Story (1995)");
        // Article but no year: unchanged
        assert_eq!(normalize_title("Close Shave, A"), "Close Shave, A");
        assert_eq!(normalize_title("GoldenEye (1995)"), "GoldenEye (1995)");
    }

    #[test]
    fn test_parse_movie_line() {
        let movie = parse_movie_line("1::Toy Story (1995)::Animation|Children's|Comedy", 1).unwrap();
        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "Toy Story (1995)");
        assert_eq!(
            movie.genres,
            vec![Genre::Animation, Genre::Children, Genre::Comedy]
        );
    }

    #[test]
    fn test_parse_movie_line_bad_genre() {
        let err = parse_movie_line("1::Toy Story (1995)::Claymation", 1).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_rating_line() {
        let rating = parse_rating_line("1::1193::5::978300760", 1).unwrap();
        assert_eq!(rating.user_id, 1);
        assert_eq!(rating.movie_id, 1193);
        assert_eq!(rating.rating, 5.0);
        assert_eq!(rating.timestamp, 978300760);
    }

    #[test]
    fn test_parse_rating_line_missing_field() {
        let err = parse_rating_line("1::1193::5", 7).unwrap_err();
        match err {
            DataLoadError::ParseError { line, reason, .. } => {
                assert_eq!(line, 7);
                assert!(reason.contains("timestamp"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
