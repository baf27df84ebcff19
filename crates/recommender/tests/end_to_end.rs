//! Integration tests for the full recommendation flow:
//! cold-start collection -> merge -> cross-validation -> retrain -> top-N.

use data_loader::{Genre, Movie, MovieCatalog, Rating, RatingStore};
use model::{SvdModel, SvdParams, cross_validate};
use recommender::{
    ColdStartPolicy, SYNTHETIC_USER_ID, merge_cold_start, recommend_by_genre, sample_candidates,
    top_n,
};
use std::collections::BTreeSet;

fn rating(user_id: u32, movie_id: u32, value: f32) -> Rating {
    Rating {
        user_id,
        movie_id,
        rating: value,
        timestamp: 978300760,
    }
}

fn community_setup() -> (RatingStore, MovieCatalog) {
    let mut catalog = MovieCatalog::new();
    let titles = [
        (1, "Beloved Comedy (1998)", Genre::Comedy),
        (2, "Panned Sequel (1999)", Genre::Comedy),
        (3, "Solid Drama (1997)", Genre::Drama),
        (4, "Cult Horror (1996)", Genre::Horror),
        (5, "Forgettable Western (1995)", Genre::Western),
    ];
    for (id, title, genre) in titles {
        catalog.insert(Movie {
            id,
            title: title.to_string(),
            genres: vec![genre],
        });
    }

    // A dozen community users with consistent tastes: movie 1 is loved,
    // movie 2 is hated, the rest sit in between.
    let mut ratings = Vec::new();
    for user in 1..=12u32 {
        ratings.push(rating(user, 1, 5.0));
        ratings.push(rating(user, 2, 1.0));
        ratings.push(rating(user, 3, if user % 2 == 0 { 4.0 } else { 3.0 }));
        if user % 3 == 0 {
            ratings.push(rating(user, 4, 4.5));
        }
    }

    (RatingStore::from_ratings(ratings).unwrap(), catalog)
}

#[test]
fn cold_start_user_learns_their_preferences() {
    let (store, _catalog) = community_setup();

    // The cold-start session: the new user loves movie 1, hates movie 2.
    let new_ratings = vec![
        rating(SYNTHETIC_USER_ID, 1, 5.0),
        rating(SYNTHETIC_USER_ID, 2, 1.0),
    ];
    let store = merge_cold_start(store, new_ratings, ColdStartPolicy::Accumulate).unwrap();

    let params = SvdParams::default()
        .with_factors(8)
        .with_epochs(100)
        .with_learning_rate(0.01);
    let model = SvdModel::fit(store.observations(), &params).unwrap();

    // After retraining, the synthetic user's highly-rated movie must score
    // above the low-rated one.
    let loved = model.predict(SYNTHETIC_USER_ID, 1);
    let hated = model.predict(SYNTHETIC_USER_ID, 2);
    assert!(
        loved > hated,
        "expected predict(0,1)={loved} > predict(0,2)={hated}"
    );
}

#[test]
fn full_cold_start_session_flow() {
    let (store, catalog) = community_setup();

    let candidates = sample_candidates(&catalog, &store, 3, 42);
    assert_eq!(candidates.len(), 3);

    // Stand-in for the interactive prompt: rate everything 5.0.
    let new_ratings: Vec<Rating> = candidates
        .iter()
        .map(|&movie_id| rating(SYNTHETIC_USER_ID, movie_id, 5.0))
        .collect();
    let store = merge_cold_start(store, new_ratings, ColdStartPolicy::Accumulate).unwrap();

    let params = SvdParams::default().with_factors(4).with_epochs(20);

    // Diagnostic cross-validation on the merged data, then the real fit.
    let report = cross_validate(store.observations(), &params, 3).unwrap();
    assert_eq!(report.folds.len(), 3);
    assert!(report.mean_rmse() >= 0.0);
    assert!(report.mean_mae() >= 0.0);

    let model = SvdModel::fit(store.observations(), &params).unwrap();
    let recs = top_n(&model, &catalog, &store, SYNTHETIC_USER_ID, 10, true);

    // Rated candidates are excluded, the rest of the catalog is ranked.
    assert_eq!(recs.len(), catalog.len() - candidates.len());
    for rec in &recs {
        assert!(!candidates.contains(&rec.movie_id));
        assert!((1.0..=5.0).contains(&rec.score));
    }
}

#[test]
fn genre_fallback_agrees_with_community_averages() {
    let (store, catalog) = community_setup();

    let favorites = BTreeSet::from([Genre::Comedy]);
    let picks = recommend_by_genre(&store, &catalog, &favorites, 10).unwrap();

    // Both comedies are rated; the beloved one must rank first.
    assert_eq!(picks.len(), 2);
    assert_eq!(picks[0].movie_id, 1);
    assert!((picks[0].avg_rating - 5.0).abs() < 1e-6);
    assert_eq!(picks[1].movie_id, 2);

    // The unrated western never shows up.
    let favorites = BTreeSet::from([Genre::Western]);
    let picks = recommend_by_genre(&store, &catalog, &favorites, 10).unwrap();
    assert!(picks.is_empty());
}
