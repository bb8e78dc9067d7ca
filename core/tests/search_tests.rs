use feedsearch_core::{build_index, Feed, FeedItem, ScoringConfig, SearchEngine};

fn item(title: &str, description: &str) -> FeedItem {
    FeedItem {
        title: title.into(),
        description: description.into(),
        link: format!("https://example.com/{}", title.replace(' ', "-")),
        pub_date: "Tue, 02 Jan 2024 10:00:00 GMT".into(),
        ..Default::default()
    }
}

fn corpus() -> Vec<Feed> {
    vec![
        Feed {
            title: "This Week in Rust".into(),
            items: vec![
                item("Rust programming", "learn rust"),
                item("Async closures stabilized", "weekly update"),
                item("Programmers and their tools", "editors"),
            ],
            ..Default::default()
        },
        Feed {
            title: "Gardening Digest".into(),
            items: vec![item("Tomato season", "weekly update"), item("Composting basics", "soil")],
            ..Default::default()
        },
    ]
}

#[test]
fn built_index_answers_queries() {
    let engine = SearchEngine::with_config(build_index(&corpus()), ScoringConfig::default().without_title_matching());
    let results = engine.search("rust", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "0");
    assert_eq!(results[0].score, 4.0);
    assert_eq!(results[0].feed_title, "This Week in Rust");
    assert_eq!(results[0].link, "https://example.com/Rust-programming");
}

#[test]
fn prefix_query_reaches_longer_terms() {
    let engine = SearchEngine::with_config(build_index(&corpus()), ScoringConfig::default().without_title_matching());
    let ranked = engine.ranked("program");
    // "programming" (title, 3) and "programmers" (title, 3), both via prefix
    assert_eq!(ranked, vec![(0, 2.25), (2, 2.25)]);
}

#[test]
fn title_matching_adds_substring_bonuses() {
    let engine = SearchEngine::new(build_index(&corpus()));
    let ranked = engine.ranked("rust");
    // doc 0: postings 4 + title 2 + feed 1; docs 1 and 2: feed title only
    assert_eq!(ranked, vec![(0, 7.0), (1, 1.0), (2, 1.0)]);
}

#[test]
fn garbage_queries_are_harmless() {
    let engine = SearchEngine::new(build_index(&corpus()));
    for q in ["", "   ", "!!!", "x", "zzzzzz", "\u{1F980}"] {
        assert!(engine.search(q, 10).is_empty(), "query {q:?}");
    }
}

#[test]
fn empty_corpus_searches_cleanly() {
    let engine = SearchEngine::new(build_index(&[]));
    assert!(engine.search("rust", 10).is_empty());
}
