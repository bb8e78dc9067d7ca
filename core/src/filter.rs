//! Term filtering: the fixed stop-word list applied while indexing, and the
//! corpus-adaptive common-term set applied at build and query time.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// A term is common when it occurs in more than this share of documents.
pub const COMMON_TERM_RATIO: f64 = 0.5;

/// Number of leading query tokens kept when every token is common.
const COMMON_FALLBACK_TOKENS: usize = 2;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","the","and","or","but",
            "in","on","at","to","for","with","by","about","as","of","from",
            "is","are","was","were","be","been","being",
            "have","has","had","do","does","did",
            "will","would","shall","should","can","could","may","might","must",
            "that","this","these","those",
            "it","its","they","them","their","we","us","our","you","your",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stop_word(token: &str) -> bool { STOPWORDS.contains(token) }

/// Terms whose document frequency is above [`COMMON_TERM_RATIO`] of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonTerms {
    terms: HashSet<String>,
}

impl CommonTerms {
    pub fn from_document_frequencies(df: &HashMap<String, u32>, total_docs: usize) -> Self {
        let threshold = total_docs as f64 * COMMON_TERM_RATIO;
        let terms = df
            .iter()
            .filter(|(_, count)| f64::from(**count) > threshold)
            .map(|(term, _)| term.clone())
            .collect();
        Self { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Query-side filtering. Single-token queries pass through untouched.
    /// Multi-token queries lose their common tokens, unless that would leave
    /// nothing, in which case the first two original tokens are searched.
    pub fn filter_query(&self, tokens: Vec<String>) -> Vec<String> {
        if tokens.len() <= 1 {
            return tokens;
        }
        let kept: Vec<String> = tokens.iter().filter(|t| !self.contains(t)).cloned().collect();
        if kept.is_empty() {
            tokens.into_iter().take(COMMON_FALLBACK_TOKENS).collect()
        } else {
            kept
        }
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut v: Vec<String> = self.terms.iter().cloned().collect();
        v.sort_unstable();
        v
    }
}

impl FromIterator<String> for CommonTerms {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}
