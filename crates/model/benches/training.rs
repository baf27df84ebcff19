//! Benchmarks for SGD training.
//!
//! Run with: cargo bench --package model

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::Rating;
use model::{SvdModel, SvdParams, cross_validate};

/// Deterministic synthetic rating matrix: 200 users, 100 movies, ~10k cells.
fn synthetic_ratings() -> Vec<Rating> {
    let mut ratings = Vec::new();
    for user in 1..=200u32 {
        for movie in 1..=100u32 {
            if (user + movie) % 2 == 0 {
                ratings.push(Rating {
                    user_id: user,
                    movie_id: movie,
                    rating: ((user * 7 + movie * 3) % 5) as f32 + 1.0,
                    timestamp: 0,
                });
            }
        }
    }
    ratings
}

fn bench_fit(c: &mut Criterion) {
    let ratings = synthetic_ratings();
    let params = SvdParams::default().with_factors(20).with_epochs(10);

    c.bench_function("svd_fit_10k_ratings", |b| {
        b.iter(|| {
            let model = SvdModel::fit(black_box(&ratings), black_box(&params)).unwrap();
            black_box(model)
        })
    });
}

fn bench_predict(c: &mut Criterion) {
    let ratings = synthetic_ratings();
    let params = SvdParams::default().with_factors(20).with_epochs(10);
    let model = SvdModel::fit(&ratings, &params).unwrap();

    c.bench_function("svd_predict", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for movie in 1..=100u32 {
                total += model.predict(black_box(1), black_box(movie));
            }
            black_box(total)
        })
    });
}

fn bench_cross_validate(c: &mut Criterion) {
    let ratings = synthetic_ratings();
    let params = SvdParams::default().with_factors(8).with_epochs(5);

    c.bench_function("cross_validate_3_folds", |b| {
        b.iter(|| {
            let report = cross_validate(black_box(&ratings), black_box(&params), 3).unwrap();
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_fit, bench_predict, bench_cross_validate);
criterion_main!(benches);
