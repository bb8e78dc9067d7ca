use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feedsearch_core::{build_index, Feed, FeedItem, SearchEngine};

const WORDS: &[&str] = &[
    "rust", "async", "runtime", "tokio", "compiler", "borrow", "checker", "trait", "generic", "macro",
    "wasm", "browser", "react", "hooks", "state", "server", "render", "cache", "query", "index",
];

fn corpus(feeds: usize, items: usize) -> Vec<Feed> {
    (0..feeds)
        .map(|f| Feed {
            title: format!("Feed {f}"),
            items: (0..items)
                .map(|i| {
                    let w = |k: usize| WORDS[(f * 7 + i * 3 + k) % WORDS.len()];
                    FeedItem {
                        title: format!("{} {} {}{}", w(0), w(1), w(2), i),
                        description: format!("{} {} {} {}", w(3), w(4), w(5), w(6)),
                        link: format!("https://example.com/{f}/{i}"),
                        ..Default::default()
                    }
                })
                .collect(),
            ..Default::default()
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let feeds = corpus(50, 40);
    c.bench_function("build_index_2000_docs", |b| b.iter(|| build_index(black_box(&feeds))));
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::new(build_index(&corpus(50, 40)));
    c.bench_function("search_prefix", |b| b.iter(|| engine.search(black_box("tok"), 10)));
    c.bench_function("search_multi_token", |b| b.iter(|| engine.search(black_box("rust async compiler"), 10)));
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
