//! Reading normalized feed JSON from disk.

use anyhow::{Context, Result};
use feedsearch_core::Feed;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect feeds from a `.json`/`.jsonl` file or every such file under a
/// directory. Directory entries are visited in file-name order so doc ids are
/// stable for an unchanged input tree.
pub fn read_feeds(input: &Path) -> Result<Vec<Feed>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut feeds = Vec::new();
    for file in files {
        let before = feeds.len();
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut feeds)?;
        } else {
            read_json(&file, &mut feeds)?;
        }
        tracing::debug!(file = %file.display(), feeds = feeds.len() - before, "read feed file");
    }
    Ok(feeds)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, feeds: &mut Vec<Feed>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let feed: Feed = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid feed", file.display(), n + 1))?;
        feeds.push(feed);
    }
    Ok(())
}

fn read_json(file: &Path, feeds: &mut Vec<Feed>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                feeds.push(serde_json::from_value(v).with_context(|| format!("{}: invalid feed", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            feeds.push(serde_json::from_value(json).with_context(|| format!("{}: invalid feed", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping file that is neither a feed nor a list of feeds"),
    }
    Ok(())
}
