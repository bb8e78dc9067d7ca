use crate::filter::CommonTerms;
use crate::index::{DocEntry, DocId, SearchIndex};
use crate::tokenizer::tokenize_query;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub id: String,
    pub score: f64,
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub feed_title: String,
}

/// Weights applied by the query scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Multiplier on the weight of indexed terms that extend a query token.
    pub prefix_factor: f64,
    /// Flat bonus when the lowercased item title contains a query token.
    pub title_bonus: f64,
    /// Flat bonus when the lowercased feed title contains a query token.
    pub feed_title_bonus: f64,
    /// Enables the two substring bonuses above.
    pub title_matching: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { prefix_factor: 0.75, title_bonus: 2.0, feed_title_bonus: 1.0, title_matching: true }
    }
}

impl ScoringConfig {
    /// Postings-only scoring: exact and prefix matches, no title substring bonuses.
    pub fn without_title_matching(self) -> Self {
        Self { title_matching: false, ..self }
    }
}

struct FoldedTitles {
    doc_id: DocId,
    title: String,
    feed_title: String,
}

/// Read-only query processor over one [`SearchIndex`].
///
/// All derived lookup structures are computed once in the constructor; queries
/// never mutate the engine, so a single instance can serve concurrent callers.
pub struct SearchEngine {
    index: SearchIndex,
    common: CommonTerms,
    /// Every indexed term, sorted, for prefix range scans.
    sorted_terms: Vec<String>,
    /// Lowercased titles in doc_id order.
    titles: Vec<FoldedTitles>,
    config: ScoringConfig,
}

impl SearchEngine {
    pub fn new(index: SearchIndex) -> Self {
        Self::with_config(index, ScoringConfig::default())
    }

    pub fn with_config(index: SearchIndex, config: ScoringConfig) -> Self {
        let common = index.common_terms.iter().cloned().collect();
        let mut sorted_terms: Vec<String> = index.inverted_index.keys().cloned().collect();
        sorted_terms.sort_unstable();
        let mut titles: Vec<FoldedTitles> = index
            .document_map
            .iter()
            .map(|(&doc_id, doc)| FoldedTitles {
                doc_id,
                title: doc.title.to_lowercase(),
                feed_title: doc.feed_title.to_lowercase(),
            })
            .collect();
        titles.sort_unstable_by_key(|t| t.doc_id);
        Self { index, common, sorted_terms, titles, config }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    pub fn document(&self, doc_id: DocId) -> Option<&DocEntry> {
        self.index.document_map.get(&doc_id)
    }

    /// Top `limit` matches for `query`, best first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredResult> {
        if limit == 0 {
            return Vec::new();
        }
        self.ranked(query)
            .into_iter()
            .take(limit)
            .filter_map(|(doc_id, score)| self.to_result(doc_id, score))
            .collect()
    }

    /// Every matching document with its score, sorted by descending score and
    /// then ascending doc_id.
    pub fn ranked(&self, query: &str) -> Vec<(DocId, f64)> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let tokens = tokenize_query(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        let tokens = self.common.filter_query(tokens);

        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for token in &tokens {
            self.score_postings(token, &mut scores);
            if self.config.title_matching {
                self.score_titles(token, &mut scores);
            }
        }

        let mut scored: Vec<(DocId, f64)> = scores.into_iter().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        scored
    }

    pub fn to_result(&self, doc_id: DocId, score: f64) -> Option<ScoredResult> {
        let doc = self.document(doc_id)?;
        Some(ScoredResult {
            id: doc_id.to_string(),
            score,
            title: doc.title.clone(),
            link: doc.link.clone(),
            pub_date: doc.pub_date.clone(),
            feed_title: doc.feed_title.clone(),
        })
    }

    fn score_postings(&self, token: &str, scores: &mut HashMap<DocId, f64>) {
        if let Some(postings) = self.index.postings(token) {
            for (&doc_id, &weight) in postings {
                *scores.entry(doc_id).or_insert(0.0) += f64::from(weight);
            }
        }
        for term in self.prefix_extensions(token) {
            if let Some(postings) = self.index.postings(term) {
                for (&doc_id, &weight) in postings {
                    *scores.entry(doc_id).or_insert(0.0) += f64::from(weight) * self.config.prefix_factor;
                }
            }
        }
    }

    /// Indexed terms starting with `token`, excluding `token` itself.
    fn prefix_extensions<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let start = self.sorted_terms.partition_point(|t| t.as_str() < token);
        self.sorted_terms[start..]
            .iter()
            .take_while(move |t| t.starts_with(token))
            .map(String::as_str)
            .filter(move |t| *t != token)
    }

    fn score_titles(&self, token: &str, scores: &mut HashMap<DocId, f64>) {
        for doc in &self.titles {
            if doc.title.contains(token) {
                *scores.entry(doc.doc_id).or_insert(0.0) += self.config.title_bonus;
            }
            if doc.feed_title.contains(token) {
                *scores.entry(doc.doc_id).or_insert(0.0) += self.config.feed_title_bonus;
            }
        }
    }
}
