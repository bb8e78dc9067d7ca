use crate::feed::{Feed, FeedItem};
use crate::filter::CommonTerms;
use crate::index::{DocEntry, DocId, IndexMetadata, InvertedIndex, SearchIndex, Weight};
use crate::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const TITLE_WEIGHT: Weight = 3;
pub const DESCRIPTION_WEIGHT: Weight = 1;

struct Located<'a> {
    feed: &'a Feed,
    item: &'a FeedItem,
}

/// Build a fresh index from a full corpus snapshot, stamped with the current time.
pub fn build_index(feeds: &[Feed]) -> SearchIndex {
    build_index_at(feeds, OffsetDateTime::now_utc())
}

pub fn build_index_at(feeds: &[Feed], generated_at: OffsetDateTime) -> SearchIndex {
    let docs = assign_doc_ids(feeds);
    let df = document_frequencies(&docs);
    let common = CommonTerms::from_document_frequencies(&df, docs.len());
    let inverted_index = build_postings(&docs, &common);
    let document_map = build_document_map(&docs);

    let metadata = IndexMetadata {
        document_count: docs.len(),
        term_count: inverted_index.len(),
        index_size: serde_json::to_vec(&inverted_index).map_or(0, |b| b.len()),
        generated_at: generated_at.format(&Rfc3339).unwrap_or_default(),
    };
    tracing::info!(
        num_docs = metadata.document_count,
        num_terms = metadata.term_count,
        num_common = common.len(),
        index_size = metadata.index_size,
        "built search index"
    );

    SearchIndex { inverted_index, document_map, common_terms: common.to_sorted_vec(), metadata }
}

// doc_id is the position in this vector.
fn assign_doc_ids(feeds: &[Feed]) -> Vec<Located<'_>> {
    feeds
        .iter()
        .flat_map(|feed| feed.items.iter().map(move |item| Located { feed, item }))
        .collect()
}

fn document_frequencies(docs: &[Located<'_>]) -> HashMap<String, u32> {
    let mut df: HashMap<String, u32> = HashMap::new();
    for doc in docs {
        let item = doc.item;
        let unique: HashSet<String> = tokenize(&item.title)
            .into_iter()
            .chain(tokenize(&item.description))
            .chain(tokenize(&item.content))
            .collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    df
}

// Content counts toward document frequency above but is not weighted here.
fn build_postings(docs: &[Located<'_>], common: &CommonTerms) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (doc_id, doc) in docs.iter().enumerate() {
        let doc_id = doc_id as DocId;
        let weighted = tokenize(&doc.item.title)
            .into_iter()
            .map(|t| (t, TITLE_WEIGHT))
            .chain(tokenize(&doc.item.description).into_iter().map(|t| (t, DESCRIPTION_WEIGHT)));
        for (term, weight) in weighted {
            if common.contains(&term) {
                continue;
            }
            *index.entry(term).or_default().entry(doc_id).or_insert(0) += weight;
        }
    }
    index
}

fn build_document_map(docs: &[Located<'_>]) -> HashMap<DocId, DocEntry> {
    docs.iter()
        .enumerate()
        .map(|(doc_id, doc)| {
            let entry = DocEntry {
                feed_title: doc.feed.title.clone(),
                title: doc.item.title.clone(),
                link: doc.item.link.clone(),
                pub_date: doc.item.pub_date.clone(),
            };
            (doc_id as DocId, entry)
        })
        .collect()
}
