//! Benchmarks for candidate generation
//!
//! Run with: cargo bench --package sources
//!
//! Benchmarks the mood shortlist and the top-rated fallback over a synthetic
//! catalog.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{CatalogStore, Mood, MoodScores, MovieRecord};
use sources::{CandidateSelector, TopRatedSource};

const CATALOG_SIZE: usize = 10_000;

fn synthetic_catalog() -> CatalogStore {
    CatalogStore::new(
        (0..CATALOG_SIZE)
            .map(|i| {
                let mut movie = MovieRecord::new(i as u32, format!("Movie {}", i));
                movie.mood_scores = MoodScores::default()
                    .with(Mood::Happy, ((i * 31) % 113) as f32)
                    .with(Mood::Scared, ((i * 17) % 89) as f32);
                movie.vote_average = ((i * 13) % 100) as f32 / 10.0;
                movie.vote_count = ((i * 7) % 5000) as u32;
                movie
            })
            .collect(),
    )
}

fn bench_mood_shortlist(c: &mut Criterion) {
    let catalog = synthetic_catalog();
    let selector = CandidateSelector::new();

    c.bench_function("mood_shortlist_10", |b| {
        b.iter(|| {
            let shortlist = selector.select(black_box(&catalog), black_box(Some(Mood::Happy)), black_box(10));
            black_box(shortlist)
        })
    });
}

fn bench_top_rated(c: &mut Criterion) {
    let catalog = synthetic_catalog();
    let top_rated = TopRatedSource::new();

    c.bench_function("top_rated_10", |b| {
        b.iter(|| {
            let rows = top_rated.top(black_box(&catalog), black_box(10));
            black_box(rows)
        })
    });
}

criterion_group!(benches, bench_mood_shortlist, bench_top_rated);
criterion_main!(benches);
