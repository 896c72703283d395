//! Performance benchmarks for season rating and prediction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use season_elo::rating::SeasonAggregates;
use season_elo::{
    predict, BatchEngine, GameRecord, Location, RatingEngine, RatingPipeline, RatingStore, Season,
    SequentialEngine, TeamId,
};

/// Deterministic season with `teams` teams and `games` games
fn create_bench_season(year: u16, teams: u32, games: u32) -> Season {
    let records = (0..games)
        .filter_map(|i| {
            let winner = 1000 + (i * 7) % teams;
            let loser = 1000 + (i * 13 + 1) % teams;
            let location = match i % 3 {
                0 => Location::Home,
                1 => Location::Away,
                _ => Location::Neutral,
            };
            GameRecord::new(winner, loser, 70.0 + (i % 15 + 1) as f64, 70.0, location).ok()
        })
        .collect();
    Season::new(year, records)
}

fn seeded_store(season: &Season) -> RatingStore {
    let mut store = RatingStore::new();
    for team in season.teams() {
        store.seed(team, 1500.0).expect("finite seed rating");
    }
    store
}

fn bench_sequential_engine(c: &mut Criterion) {
    let engine = SequentialEngine::default();
    let mut group = c.benchmark_group("sequential_season");

    for (teams, games) in [(64, 1_000), (350, 5_000)] {
        let season = create_bench_season(2014, teams, games);
        let store = seeded_store(&season);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{teams}x{games}")),
            &(store, season),
            |b, (store, season)| {
                b.iter(|| engine.rate_season(black_box(store), black_box(season)))
            },
        );
    }

    group.finish();
}

fn bench_batch_engine(c: &mut Criterion) {
    let engine = BatchEngine::default();
    let mut group = c.benchmark_group("batch_season");

    for (teams, games) in [(64, 1_000), (350, 5_000)] {
        let season = create_bench_season(2014, teams, games);
        let store = seeded_store(&season);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{teams}x{games}")),
            &(store, season),
            |b, (store, season)| {
                b.iter(|| engine.rate_season(black_box(store), black_box(season)))
            },
        );
    }

    group.finish();

    let season = create_bench_season(2014, 350, 5_000);
    c.bench_function("batch_aggregates", |b| {
        b.iter(|| SeasonAggregates::from_season(black_box(&season)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let seasons: Vec<Season> = (0..10)
        .map(|offset| create_bench_season(2005 + offset, 350, 5_000))
        .collect();

    c.bench_function("pipeline_ten_seasons", |b| {
        b.iter(|| {
            let mut pipeline = RatingPipeline::new(Box::new(SequentialEngine::default()));
            pipeline.process_seasons(black_box(&seasons))
        })
    });
}

fn bench_predictions(c: &mut Criterion) {
    let season = create_bench_season(2014, 64, 1_000);
    let store = seeded_store(&season);
    let teams: Vec<TeamId> = season.teams().into_iter().collect();

    let requests: Vec<(String, ())> = teams
        .iter()
        .flat_map(|a| teams.iter().filter(move |b| a < *b).map(move |b| (a, b)))
        .map(|(a, b)| (format!("2015_{a}_{b}"), ()))
        .collect();

    c.bench_function("predict_all_pairs", |b| {
        b.iter(|| predict(black_box(&store), requests.iter().map(|(id, label)| (id, label))))
    });
}

criterion_group!(
    benches,
    bench_sequential_engine,
    bench_batch_engine,
    bench_pipeline,
    bench_predictions
);
criterion_main!(benches);
