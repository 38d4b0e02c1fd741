//! Case-insensitive substring search over the structured records.
//!
//! A record matches when the query occurs in its title, description, subject
//! or (videos only) chapter. The same field set decides card visibility, so
//! the reported count always equals the number of cards left showing.

use crate::content::{Collection, ContentStore, Record};

/// One matching record, addressed by collection and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub collection: Collection,
    pub index: usize,
}

/// Outcome of a search that found at least one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Normalized query (trimmed, lowercase).
    pub query: String,
    /// Hits in page order.
    pub hits: Vec<Hit>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn contains(&self, collection: Collection, index: usize) -> bool {
        self.hits
            .iter()
            .any(|h| h.collection == collection && h.index == index)
    }

    pub fn count_in(&self, collection: Collection) -> usize {
        self.hits
            .iter()
            .filter(|h| h.collection == collection)
            .count()
    }

    /// First collection holding a hit; the page scrolls there.
    pub fn first_collection(&self) -> Option<Collection> {
        self.hits.first().map(|h| h.collection)
    }
}

/// Trimmed, lowercased form of raw input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Lowercased searchable text of a record, one field per line.
///
/// Rendered cards carry this string so the browser filters on exactly the
/// fields used here.
pub fn haystack(record: &Record<'_>) -> String {
    [
        Some(record.title()),
        Some(record.description()),
        record.subject(),
        record.chapter(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join("\n")
}

/// Every record across all five collections containing `query`.
///
/// `query` must already be normalized.
pub fn search(store: &ContentStore, query: &str) -> SearchResults {
    let hits = Collection::ALL
        .into_iter()
        .flat_map(|collection| {
            store
                .records(collection)
                .into_iter()
                .enumerate()
                .filter(|(_, record)| haystack(record).contains(query))
                .map(move |(index, _)| Hit { collection, index })
                .collect::<Vec<_>>()
        })
        .collect();
    SearchResults {
        query: query.to_string(),
        hits,
    }
}
