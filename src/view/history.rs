//! Navigation history entries.
//!
//! An entry records whether a video is open and which one. It is the only
//! input used to rebuild player state on back/forward navigation.

use url::{Url, form_urlencoded};

/// Query parameter carrying the open video's identifier.
pub const VIDEO_PARAM: &str = "video";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    pub video: Option<String>,
}

impl HistoryEntry {
    pub fn closed() -> Self {
        Self { video: None }
    }

    pub fn open(video_id: &str) -> Self {
        Self {
            video: Some(video_id.to_string()),
        }
    }

    /// Parse a location query string, with or without the leading `?`.
    ///
    /// Blank identifiers count as absent; the first `video` parameter wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let video = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == VIDEO_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|id| !id.is_empty());
        Self { video }
    }

    /// Parse the query of an absolute URL.
    pub fn from_url(url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(url)?;
        Ok(Self::from_query(url.query().unwrap_or("")))
    }

    /// Query string encoding this entry; empty when no video is open.
    pub fn to_query(&self) -> String {
        match &self.video {
            Some(id) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair(VIDEO_PARAM, id)
                    .finish();
                format!("?{encoded}")
            }
            None => String::new(),
        }
    }

    /// Site-relative directory of the prerendered page for this entry.
    pub fn page_path(&self) -> String {
        match &self.video {
            Some(id) => format!("videos/{}/", video_dir(id)),
            None => String::new(),
        }
    }
}

/// Directory name for a video's page.
pub fn video_dir(video_id: &str) -> String {
    form_urlencoded::byte_serialize(video_id.as_bytes()).collect()
}
