use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense, build-local document identifier. Serialized as a decimal string key.
pub type DocId = u32;
/// Accumulated term weight of one posting. Always > 0.
pub type Weight = u32;

/// term -> (doc_id -> weight)
pub type InvertedIndex = HashMap<String, HashMap<DocId, Weight>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub feed_title: String,
    pub title: String,
    pub link: String,
    pub pub_date: String,
}

/// Informational only; never used in scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub document_count: usize,
    pub term_count: usize,
    /// Size in bytes of the JSON-encoded inverted index.
    pub index_size: usize,
    pub generated_at: String,
}

/// The immutable product of one build cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub inverted_index: InvertedIndex,
    pub document_map: HashMap<DocId, DocEntry>,
    /// Sorted.
    #[serde(default)]
    pub common_terms: Vec<String>,
    pub metadata: IndexMetadata,
}

impl SearchIndex {
    pub fn document_count(&self) -> usize {
        self.document_map.len()
    }

    pub fn postings(&self, term: &str) -> Option<&HashMap<DocId, Weight>> {
        self.inverted_index.get(term)
    }
}
