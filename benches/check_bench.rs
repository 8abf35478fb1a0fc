use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use originality::{CorpusIndex, OriginalityChecker, OriginalityConfig};

const WORDS: &[&str] = &[
    "машинное", "обучение", "нейронные", "сети", "данные", "модель", "признаки", "выборка",
    "точность", "ошибка", "градиент", "алгоритм", "классификация", "регрессия", "кластер",
];

fn document(seed: usize, sentences: usize) -> String {
    (0..sentences)
        .map(|s| {
            (0..14)
                .map(|w| WORDS[(seed * 7 + s * 3 + w * w) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(". ")
}

fn checker(documents: usize, parallel: bool) -> OriginalityChecker {
    let cfg = OriginalityConfig::default().with_parallel(parallel);
    let corpus = CorpusIndex::from_texts(
        (0..documents).map(|i| (format!("doc-{i}"), document(i, 20))),
        &cfg.preprocess,
    );
    OriginalityChecker::from_corpus(corpus, cfg).expect("bench checker")
}

fn bench_check(c: &mut Criterion) {
    let query = document(3, 20);
    let mut group = c.benchmark_group("check_text");
    for documents in [10usize, 50] {
        let checker = checker(documents, false);
        group.bench_with_input(BenchmarkId::from_parameter(documents), &documents, |b, _| {
            b.iter(|| checker.check_text("bench", black_box(&query)))
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let query = document(3, 20);
    let mut group = c.benchmark_group("report_text");
    for parallel in [false, true] {
        let checker = checker(20, parallel);
        group.bench_with_input(BenchmarkId::new("parallel", parallel), &parallel, |b, _| {
            b.iter(|| checker.report_text("bench", black_box(&query)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_check, bench_report);
criterion_main!(benches);
