use crate::filter::is_stop_word;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Word characters are ASCII only; lowercasing before this pass is Unicode.
    static ref NON_WORD: Regex = Regex::new(r"[^0-9A-Za-z_\s]+").expect("valid regex");
}

fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    spaced
        .split_whitespace()
        .filter(|t| t.len() > 1)
        .map(str::to_owned)
        .collect()
}

/// Index-build tokenization: lowercase, punctuation to spaces, tokens of
/// length <= 1 and stop words dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    terms(text).into_iter().filter(|t| !is_stop_word(t)).collect()
}

/// Query tokenization. Same normalization as [`tokenize`] but stop words are
/// kept; query-side filtering is done against the corpus common terms instead.
pub fn tokenize_query(text: &str) -> Vec<String> {
    terms(text)
}
