//! The Content Store: site metadata plus five typed resource collections.
//!
//! The store is a hand-edited `metadata.json` in the content root. It is read
//! once, validated, and never mutated afterwards. Everything else in the crate
//! (rendering, search, export) borrows from it.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "siteInfo": { "title": "...", "description": "...",
//!                 "contactEmail": "...", "youtubeChannel": "..." },
//!   "videos":        [{ "id": "...", "title": "...", "description": "...",
//!                       "duration": "15:30", "subject": "...", "chapter": "..." }],
//!   "notes":         [{ "title": "...", "description": "...", "driveId": "...",
//!                       "pages": 45, "fileSize": "4.2 MB", "lastUpdated": "2024-01-15",
//!                       "subject": "...", "grade": "..." }],
//!   "pastPapers":    [{ ..., "year": "2023" }],
//!   "lessonPlans":   [{ ..., "type": "lesson-plan", "term": "Term 1" }],
//!   "schemesOfWork": [{ ..., "term": "Term 1" }]
//! }
//! ```
//!
//! Collections are rendered in file order. Optional fields fall back to a
//! display label at render time; `title` and `description` are mandatory and
//! are checked by [`ContentStore::validate`] before anything is rendered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid resource record: {collection} #{index} has no {field}")]
    InvalidRecord {
        collection: Collection,
        /// 1-based position within the collection.
        index: usize,
        field: &'static str,
    },
    /// Video ids name output directories, so only `[A-Za-z0-9_-]` is allowed.
    #[error("invalid resource record: videos #{index} has malformed id '{id}'")]
    MalformedId { index: usize, id: String },
}

/// One of the five named resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Videos,
    Notes,
    PastPapers,
    LessonPlans,
    SchemesOfWork,
}

impl Collection {
    /// All collections in page order.
    pub const ALL: [Collection; 5] = [
        Collection::Videos,
        Collection::Notes,
        Collection::PastPapers,
        Collection::LessonPlans,
        Collection::SchemesOfWork,
    ];

    /// Section key, used for element ids, anchors and output paths.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Videos => "videos",
            Collection::Notes => "notes",
            Collection::PastPapers => "papers",
            Collection::LessonPlans => "plans",
            Collection::SchemesOfWork => "schemes",
        }
    }

    /// Key of the collection in `metadata.json`.
    pub fn store_key(self) -> &'static str {
        match self {
            Collection::Videos => "videos",
            Collection::Notes => "notes",
            Collection::PastPapers => "pastPapers",
            Collection::LessonPlans => "lessonPlans",
            Collection::SchemesOfWork => "schemesOfWork",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::Videos => "Video Lessons",
            Collection::Notes => "Study Notes",
            Collection::PastPapers => "Past Papers",
            Collection::LessonPlans => "Lesson Plans",
            Collection::SchemesOfWork => "Schemes of Work",
        }
    }

    /// Message shown in place of the grid when the collection is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Collection::Videos => "No video lessons available",
            Collection::Notes => "No study notes available",
            Collection::PastPapers => "No past papers available",
            Collection::LessonPlans => "No lesson plans available",
            Collection::SchemesOfWork => "No schemes of work available",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_key())
    }
}

impl FromStr for Collection {
    type Err = String;

    /// Accepts either the section key (`papers`) or the store key (`pastPapers`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.key() == s || c.store_key() == s)
            .ok_or_else(|| {
                let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.key()).collect();
                format!("unknown section '{s}', expected one of: {}", keys.join(", "))
            })
    }
}

/// Site-wide text and the two outbound contact links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Channel identifier on the video platform.
    #[serde(
        default,
        rename = "youtubeChannel",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_id: Option<String>,
    /// Keys this crate does not read, kept for exports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Title used whenever the site info leaves it blank.
pub const DEFAULT_SITE_TITLE: &str = "Academic Resource Hub";

impl SiteInfo {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_SITE_TITLE
        } else {
            &self.title
        }
    }
}

/// A lesson hosted on the external video platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoResource {
    /// Video platform identifier. Lookups take the first match.
    #[serde(default, rename = "id")]
    pub external_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A display value that hand-edited entries write either as a number or as a
/// string (`"pages": 45`, `"year": "2023"`). Both forms are kept as-is so
/// exports match the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TextOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextOrNumber::Number(n) => write!(f, "{n}"),
            TextOrNumber::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(text: &str) -> Self {
        TextOrNumber::Text(text.to_string())
    }
}

impl From<u64> for TextOrNumber {
    fn from(n: u64) -> Self {
        TextOrNumber::Number(n.into())
    }
}

/// A downloadable document. Notes, past papers, lesson plans and schemes of
/// work share this shape; the collection decides which optional fields are
/// displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// File-hosting identifier used for download and preview links.
    #[serde(default, rename = "driveId")]
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<TextOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<TextOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<TextOrNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<TextOrNumber>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a lesson-plan entry is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    LessonPlan,
    Syllabus,
}

impl PlanKind {
    pub fn label(self) -> &'static str {
        match self {
            PlanKind::LessonPlan => "Lesson Plan",
            PlanKind::Syllabus => "Syllabus",
        }
    }
}

impl DocumentResource {
    /// `type = "lesson-plan"` is a lesson plan; anything else is a syllabus.
    pub fn plan_kind(&self) -> PlanKind {
        match self.kind.as_deref() {
            Some("lesson-plan") => PlanKind::LessonPlan,
            _ => PlanKind::Syllabus,
        }
    }
}

/// The whole persisted content model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStore {
    #[serde(default)]
    pub site_info: SiteInfo,
    #[serde(default)]
    pub videos: Vec<VideoResource>,
    #[serde(default)]
    pub notes: Vec<DocumentResource>,
    #[serde(default)]
    pub past_papers: Vec<DocumentResource>,
    #[serde(default)]
    pub lesson_plans: Vec<DocumentResource>,
    #[serde(default)]
    pub schemes_of_work: Vec<DocumentResource>,
    /// Top-level keys this crate does not read, kept for exports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Borrowed view over any record, for code that treats all collections alike.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Video(&'a VideoResource),
    Document(&'a DocumentResource),
}

impl<'a> Record<'a> {
    pub fn title(&self) -> &'a str {
        match self {
            Record::Video(v) => &v.title,
            Record::Document(d) => &d.title,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            Record::Video(v) => &v.description,
            Record::Document(d) => &d.description,
        }
    }

    pub fn subject(&self) -> Option<&'a str> {
        match self {
            Record::Video(v) => v.subject.as_deref(),
            Record::Document(d) => d.subject.as_deref(),
        }
    }

    /// Only videos carry a chapter.
    pub fn chapter(&self) -> Option<&'a str> {
        match self {
            Record::Video(v) => v.chapter.as_deref(),
            Record::Document(_) => None,
        }
    }
}

/// Resource counts shown in the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub videos: usize,
    pub notes: usize,
    pub papers: usize,
    pub plans: usize,
}

impl ContentStore {
    /// Parse and validate a store from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let store: ContentStore = serde_json::from_str(text)?;
        store.validate()?;
        Ok(store)
    }

    /// Reject records that cannot be rendered or searched.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (i, video) in self.videos.iter().enumerate() {
            check_text(Collection::Videos, i, "id", &video.external_id)?;
            if !is_safe_id(&video.external_id) {
                return Err(ContentError::MalformedId {
                    index: i + 1,
                    id: video.external_id.clone(),
                });
            }
        }
        for collection in Collection::ALL {
            for (i, record) in self.records(collection).into_iter().enumerate() {
                check_text(collection, i, "title", record.title())?;
                check_text(collection, i, "description", record.description())?;
            }
            if let Some(docs) = self.documents(collection) {
                for (i, doc) in docs.iter().enumerate() {
                    check_text(collection, i, "driveId", &doc.file_id)?;
                }
            }
        }
        Ok(())
    }

    /// Document records of a collection; `None` for videos.
    pub fn documents(&self, collection: Collection) -> Option<&[DocumentResource]> {
        match collection {
            Collection::Videos => None,
            Collection::Notes => Some(&self.notes),
            Collection::PastPapers => Some(&self.past_papers),
            Collection::LessonPlans => Some(&self.lesson_plans),
            Collection::SchemesOfWork => Some(&self.schemes_of_work),
        }
    }

    /// Records of a collection in rendering order.
    pub fn records(&self, collection: Collection) -> Vec<Record<'_>> {
        match self.documents(collection) {
            Some(docs) => docs.iter().map(Record::Document).collect(),
            None => self.videos.iter().map(Record::Video).collect(),
        }
    }

    pub fn len(&self, collection: Collection) -> usize {
        match self.documents(collection) {
            Some(docs) => docs.len(),
            None => self.videos.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    /// First video with the given platform id.
    pub fn find_video(&self, id: &str) -> Option<&VideoResource> {
        self.videos.iter().find(|v| v.external_id == id)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            videos: self.videos.len(),
            notes: self.notes.len(),
            papers: self.past_papers.len(),
            plans: self.lesson_plans.len(),
        }
    }
}

fn check_text(
    collection: Collection,
    index: usize,
    field: &'static str,
    value: &str,
) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::InvalidRecord {
            collection,
            index: index + 1,
            field,
        });
    }
    Ok(())
}

fn is_safe_id(id: &str) -> bool {
    id.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Load and validate the store at `path`.
pub fn load_store(path: &Path) -> Result<ContentStore, ContentError> {
    let text = fs::read_to_string(path)?;
    ContentStore::from_json(&text)
}
