use feedsearch_core::tokenizer::{tokenize, tokenize_query};

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
    assert_eq!(tokenize("async/await in C++ & Rust-lang"), vec!["async", "await", "rust", "lang"]);
}

#[test]
fn it_filters_stopwords_and_single_characters() {
    assert!(tokenize("a I of").is_empty());
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn query_mode_skips_stopword_list() {
    assert_eq!(tokenize_query("a I of"), vec!["of"]);
    assert_eq!(tokenize_query("What is the Rust Book?"), vec!["what", "is", "the", "rust", "book"]);
}

#[test]
fn word_characters_are_ascii() {
    // non-ASCII letters split a token like punctuation does
    assert_eq!(tokenize_query("café snake_case v2"), vec!["caf", "snake_case", "v2"]);
}

#[test]
fn empty_input_yields_nothing() {
    assert!(tokenize("").is_empty());
    assert!(tokenize_query("  \t\n ").is_empty());
}

#[test]
fn tokenization_is_deterministic() {
    let text = "Building a search index, twice: same terms.";
    assert_eq!(tokenize(text), tokenize(text));
}
