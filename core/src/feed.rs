//! Normalized feed input consumed by the index builder.
//!
//! Fetching and parsing syndication formats happens upstream; this module only
//! defines the shape the builder reads and the light ingest cleanup applied to
//! items before a build.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
    static ref WS: Regex = Regex::new(r"\s+").expect("valid regex");
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub pub_date: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_default<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<FeedItem>, D::Error> {
    Ok(Option::<Vec<FeedItem>>::deserialize(d)?.unwrap_or_default())
}

impl Feed {
    /// Drops items without a link or with a link already seen in this feed
    /// (first one wins) and flattens HTML content to plain text.
    pub fn normalized(self) -> Feed {
        let mut seen: HashSet<String> = HashSet::new();
        let items = self
            .items
            .into_iter()
            .filter(|item| !item.link.is_empty() && seen.insert(item.link.clone()))
            .map(|mut item| {
                item.content = html_to_text(&item.content);
                item
            })
            .collect();
        Feed { items, ..self }
    }
}

/// Replaces tags with spaces, decodes the handful of entities feeds commonly
/// carry, and collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let stripped = TAG.replace_all(html, " ");
    // &amp; last so "&amp;lt;" decodes to "&lt;" rather than "<"
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    let collapsed = WS.replace_all(&decoded, " ");
    collapsed.trim().to_string()
}
