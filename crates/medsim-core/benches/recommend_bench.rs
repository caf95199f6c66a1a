use criterion::{black_box, criterion_group, criterion_main, Criterion};
use medsim_core::{Catalog, Recommender, RecommenderConfig, SimilarityMatrix, find_closest};

const ITEMS: usize = 2_000;

fn synthetic_recommender() -> Recommender {
    let names: Vec<String> = (0..ITEMS)
        .map(|i| format!("Medicine-{i:05} {} mg", (i % 9 + 1) * 50))
        .collect();
    let scores = (0..ITEMS * ITEMS)
        .map(|pos| {
            let (i, j) = (pos / ITEMS, pos % ITEMS);
            if i == j {
                1.0
            } else {
                ((i * 31 + j * 17) % 997) as f64 / 997.0
            }
        })
        .collect();

    Recommender::new(
        Catalog::new(names).unwrap(),
        SimilarityMatrix::from_flat(ITEMS, scores).unwrap(),
        RecommenderConfig::default(),
    )
    .unwrap()
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = synthetic_recommender();
    let names = recommender.catalog().all_names().to_vec();

    c.bench_function("fuzzy_match_typo", |b| {
        b.iter(|| find_closest(black_box("Medicne-01234 100 mg"), &names, 0.5));
    });

    c.bench_function("rank_row_top5", |b| {
        b.iter(|| recommender.recommend(black_box(1234), 5).unwrap());
    });

    c.bench_function("handle_exact", |b| {
        b.iter(|| recommender.handle(black_box("Medicine-01234 100 mg")).unwrap());
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
