use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};

use brasileirao_terminal::dataset::{MatchRecord, MatchResult, parse_dataset_bytes};
use brasileirao_terminal::head_to_head::compare;
use brasileirao_terminal::odds_buckets::analyze_win;
use brasileirao_terminal::poisson::{corner_total_distribution, predict_score};
use brasileirao_terminal::team_stats::{Venue, team_stats};

static FIXTURE_CSV: &[u8] = include_bytes!("../tests/fixtures/matches.csv");

fn synthetic_rows(n: usize) -> Vec<MatchRecord> {
    let teams = ["Alpha", "Beta", "Gama", "Delta", "Epsilon", "Zeta"];
    (0..n)
        .map(|i| {
            let home = teams[i % teams.len()];
            let away = teams[(i + 1) % teams.len()];
            let hg = (i % 4) as u32;
            let ag = ((i / 2) % 3) as u32;
            let result = if hg > ag {
                MatchResult::HomeWin
            } else if hg < ag {
                MatchResult::AwayWin
            } else {
                MatchResult::Draw
            };
            MatchRecord {
                season: 2024,
                home_team: home.to_string(),
                away_team: away.to_string(),
                home_goals: Some(hg),
                away_goals: Some(ag),
                home_goals_ht: Some(hg.min(1)),
                away_goals_ht: Some(0),
                odd_home: Some(1.4 + (i % 10) as f64 * 0.25),
                odd_draw: Some(3.0 + (i % 5) as f64 * 0.2),
                odd_away: Some(2.0 + (i % 8) as f64 * 0.3),
                corners_home: Some(3 + (i % 6) as u32),
                corners_away: Some(2 + (i % 5) as u32),
                corners_total: Some(5 + (i % 6) as u32 + (i % 5) as u32),
                result: Some(result),
                total_goals: Some(hg + ag),
            }
        })
        .collect()
}

fn bench_csv_parse(c: &mut Criterion) {
    c.bench_function("csv_parse", |b| {
        b.iter(|| {
            let ds = parse_dataset_bytes(Path::new("bench.csv"), black_box(FIXTURE_CSV)).unwrap();
            black_box(ds.records.len());
        })
    });
}

fn bench_team_stats(c: &mut Criterion) {
    let owned = synthetic_rows(3800);
    let rows: Vec<&MatchRecord> = owned.iter().collect();
    c.bench_function("team_stats", |b| {
        b.iter(|| {
            let snap = team_stats(black_box(&rows), black_box("Alpha"), Venue::Home);
            black_box(snap.matches);
        })
    });
}

fn bench_comparison(c: &mut Criterion) {
    let owned = synthetic_rows(3800);
    let rows: Vec<&MatchRecord> = owned.iter().collect();
    c.bench_function("head_to_head", |b| {
        b.iter(|| {
            let cmp = compare(black_box(&rows), black_box("Alpha"), black_box("Beta"));
            black_box(cmp.attack);
        })
    });
}

fn bench_odds_bands(c: &mut Criterion) {
    let owned = synthetic_rows(3800);
    let rows: Vec<&MatchRecord> = owned.iter().collect();
    c.bench_function("odds_bands", |b| {
        b.iter(|| {
            let analysis =
                analyze_win(black_box(&rows), black_box("Alpha"), Venue::Home, 2.1).unwrap();
            black_box(analysis.bands.len());
        })
    });
}

fn bench_score_grid(c: &mut Criterion) {
    c.bench_function("score_grid", |b| {
        b.iter(|| {
            let p = predict_score(
                black_box(1.8),
                black_box(1.1),
                black_box(1.2),
                black_box(0.9),
            );
            black_box(p.best);
        })
    });
}

fn bench_corner_pmf(c: &mut Criterion) {
    c.bench_function("corner_pmf", |b| {
        b.iter(|| {
            let d = corner_total_distribution(
                black_box(5.5),
                black_box(4.5),
                black_box(4.0),
                black_box(5.0),
            );
            black_box(d.mode);
        })
    });
}

criterion_group!(
    perf,
    bench_csv_parse,
    bench_team_stats,
    bench_comparison,
    bench_odds_bands,
    bench_score_grid,
    bench_corner_pmf
);
criterion_main!(perf);
