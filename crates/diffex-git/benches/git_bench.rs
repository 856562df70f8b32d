use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use diffex_git::log::{self, LogEntry};
use diffex_git::refs::{CommitRef, RefNormalizer};
use diffex_git::search;

/// Build `count` records in default `git log` layout
fn sample_log(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "commit {i:040x}\nMerge: {:07x} {:07x}\nAuthor: Author {} <author{}@example.com>\n\
                 Date:   Sat Jan 17 02:33:06 2026 +0000\n\n    \
                 Merge pull request #{i} from team/feature-{i}\n\n    Body of change {i}\n",
                i + 1,
                i + 2,
                i % 10,
                i % 10,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_parse");

    for size in [10, 100, 1000].iter() {
        let raw = sample_log(*size);
        group.bench_with_input(BenchmarkId::new("parse", size), &raw, |b, raw| {
            b.iter(|| log::parse(raw))
        });
    }

    group.finish();
}

fn search_benchmarks(c: &mut Criterion) {
    let entries: Vec<LogEntry> = log::parse(&sample_log(1000));
    let mut group = c.benchmark_group("search");

    group.bench_function("filter_hit", |b| {
        b.iter(|| search::filter(&entries, "FEATURE-99"))
    });

    group.bench_function("filter_miss", |b| {
        b.iter(|| search::filter(&entries, "no such text"))
    });

    group.bench_function("filter_empty_query", |b| {
        b.iter(|| search::filter(&entries, ""))
    });

    group.finish();
}

fn normalize_benchmarks(c: &mut Criterion) {
    let normalizer = RefNormalizer::default();
    let bare = CommitRef::new("release/2024c").expect("valid ref");
    let qualified = CommitRef::new("origin/release/2024c").expect("valid ref");
    let mut group = c.benchmark_group("normalize");

    group.bench_function("bare", |b| b.iter(|| normalizer.normalize(&bare)));
    group.bench_function("qualified", |b| b.iter(|| normalizer.normalize(&qualified)));

    group.finish();
}

criterion_group!(
    benches,
    parse_benchmarks,
    search_benchmarks,
    normalize_benchmarks
);
criterion_main!(benches);
