//! Transient user-facing notices.

/// Severity of a notice; decides its icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Error => "notice-error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "!",
        }
    }
}

/// A message shown until its dismissal task fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

pub fn query_too_short(min_chars: usize) -> String {
    format!("Please enter at least {min_chars} characters to search")
}

pub fn matches_found(count: usize) -> String {
    format!("Found {count} matching resources")
}

pub const NO_MATCHES: &str = "No resources found matching your search";
pub const EXPORT_OK: &str = "Data exported successfully!";
pub const EXPORT_FAILED: &str = "Failed to export data";
