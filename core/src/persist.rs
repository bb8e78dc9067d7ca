//! Reading and writing the serialized index artifact.
//!
//! The artifact is one file, JSON by default or bincode when the path ends in
//! `.bin`. It is always replaced as a whole.

use crate::index::SearchIndex;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("index artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read index artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed index JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed binary index: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("inconsistent index: {0}")]
    Invalid(String),
}

/// Outer envelope written next to the index for display convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexArtifact {
    pub index: SearchIndex,
    pub post_count: usize,
}

impl IndexArtifact {
    pub fn new(index: SearchIndex) -> Self {
        let post_count = index.metadata.document_count;
        Self { index, post_count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("bin") => ArtifactFormat::Bincode,
            _ => ArtifactFormat::Json,
        }
    }
}

pub fn save_artifact(path: &Path, artifact: &IndexArtifact) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let mut w = BufWriter::new(File::create(&tmp)?);
    match ArtifactFormat::for_path(path) {
        ArtifactFormat::Json => serde_json::to_writer(&mut w, artifact)?,
        ArtifactFormat::Bincode => bincode::serialize_into(&mut w, artifact)?,
    }
    w.flush()?;
    drop(w);
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "wrote index artifact");
    Ok(())
}

/// Load the artifact, accepting a bare index in JSON form (post count is then
/// taken from the metadata).
pub fn load_artifact(path: &Path) -> Result<IndexArtifact, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    let artifact = match ArtifactFormat::for_path(path) {
        ArtifactFormat::Json => {
            // integer docId keys rule out an untagged enum here
            let value: serde_json::Value = serde_json::from_reader(reader)?;
            if value.get("index").is_some() {
                serde_json::from_value(value)?
            } else {
                IndexArtifact::new(serde_json::from_value(value)?)
            }
        }
        ArtifactFormat::Bincode => bincode::deserialize_from(reader)?,
    };
    validate(&artifact.index)?;
    Ok(artifact)
}

pub fn load_index(path: &Path) -> Result<SearchIndex, LoadError> {
    load_artifact(path).map(|a| a.index)
}

fn validate(index: &SearchIndex) -> Result<(), LoadError> {
    if index.metadata.document_count != index.document_map.len() {
        return Err(LoadError::Invalid(format!(
            "documentCount is {} but documentMap has {} entries",
            index.metadata.document_count,
            index.document_map.len()
        )));
    }
    for (term, postings) in &index.inverted_index {
        for (doc_id, &weight) in postings {
            if weight == 0 {
                return Err(LoadError::Invalid(format!("term {term:?} has zero weight for doc {doc_id}")));
            }
            if !index.document_map.contains_key(doc_id) {
                return Err(LoadError::Invalid(format!("term {term:?} references unknown doc {doc_id}")));
            }
        }
    }
    if let Some(term) = index.common_terms.iter().find(|t| index.inverted_index.contains_key(t.as_str())) {
        return Err(LoadError::Invalid(format!("common term {term:?} also has postings")));
    }
    Ok(())
}
