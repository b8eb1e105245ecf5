use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use fa_leaderboards::hitters::normalize_hitter;
use fa_leaderboards::rows::{Row, extract_rows, merge_rows};

fn sample_rows(start: u32, count: u32) -> Vec<Row> {
    (start..start + count)
        .filter_map(|id| {
            json!({
                "playerid": id,
                "PlayerName": format!("Player {id}"),
                "Team": "SEA",
                "Bats": "R",
                "G": 150,
                "PA": 600,
                "HR": id % 40,
                "AVG": 0.2612345,
                "OBP": "0.3301",
                "SLG": 0.4459,
                "OPS": 0.776,
                "wRC+": 118.2
            })
            .as_object()
            .cloned()
        })
        .collect()
}

fn bench_merge_rows(c: &mut Criterion) {
    let first = sample_rows(0, 400);
    let second = sample_rows(200, 400);
    c.bench_function("merge_rows_overlap", |b| {
        b.iter(|| {
            let merged = merge_rows(black_box(first.clone()), black_box(second.clone()));
            black_box(merged.len());
        })
    });
}

fn bench_normalize_hitters(c: &mut Criterion) {
    let payload = json!({ "data": sample_rows(0, 500).into_iter().map(Value::Object).collect::<Vec<_>>() });
    c.bench_function("extract_and_normalize", |b| {
        b.iter(|| {
            let rows = extract_rows(black_box(&payload));
            let normalized = rows.iter().map(normalize_hitter).collect::<Vec<_>>();
            black_box(normalized.len());
        })
    });
}

criterion_group!(benches, bench_merge_rows, bench_normalize_hitters);
criterion_main!(benches);
