//! CLI output formatting for every command.
//!
//! Output leads with what a visitor would see (collection, position, title)
//! and puts identifiers and paths on indented context lines underneath, so a
//! `check` run reads like an inventory of the hub.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site
//!     Academic Resource Hub
//!     Contact: contact@example.com
//!     Channel: UC_TEST_CHANNEL
//!
//! Video Lessons (3)
//! 001 How to Study Effectively
//!     Id: X_oUMqtYadc
//!     Subject: Study Skills
//!
//! Study Notes (2)
//! 001 Complete Mathematics Notes
//!     File: 1A2b3C
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Videos
//!     001 How to Study Effectively → videos/X_oUMqtYadc/index.html
//! Sections
//!     Video Lessons → sections/videos/index.html
//! Backup → data/academic-hub-backup-2024-01-15.json
//! Generated 1 index, 3 video pages, 5 section pages
//! ```
//!
//! ## Search
//!
//! ```text
//! Found 2 matching resources
//! Study Notes
//!     002 Physics Formula Guide
//! Past Papers
//!     002 Physics Paper 2 - 2023
//! ```
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions do no I/O.

use std::path::Path;

use crate::content::{Collection, ContentStore, Record};
use crate::generate::{GenerateReport, PageKind, Site};
use crate::view::notice;
use crate::view::search::SearchResults;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `Video Lessons (3)`
fn collection_header(collection: Collection, count: usize) -> String {
    format!("{} ({})", collection.label(), count)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn path_str(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of a loaded site: site info, then every collection in page order.
pub fn format_check_output(site: &Site, source_root: &Path) -> Vec<String> {
    let Site { config, store } = site;
    let mut lines = Vec::new();
    let info = &store.site_info;

    lines.push("Site".to_string());
    lines.push(format!("{}{}", indent(1), info.display_title()));
    if !info.description.is_empty() {
        lines.push(format!("{}{}", indent(1), truncate_desc(&info.description, 60)));
    }
    if let Some(email) = &info.contact_email {
        lines.push(format!("{}Contact: {}", indent(1), email.trim()));
    }
    if let Some(channel) = &info.channel_id {
        lines.push(format!("{}Channel: {}", indent(1), channel));
    }

    for collection in Collection::ALL {
        lines.push(String::new());
        lines.push(collection_header(collection, store.len(collection)));
        if store.len(collection) == 0 {
            lines.push(format!("{}{}", indent(1), collection.empty_message()));
            continue;
        }
        for (i, record) in store.records(collection).iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), record.title()));
            match record {
                Record::Video(video) => {
                    lines.push(format!("{}Id: {}", indent(1), video.external_id));
                }
                Record::Document(doc) => {
                    lines.push(format!("{}File: {}", indent(1), doc.file_id));
                }
            }
            if let Some(subject) = record.subject() {
                lines.push(format!("{}Subject: {}", indent(1), subject));
            }
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    lines.push(format!("{}{}", indent(1), config.content_file));
    if source_root.join(&config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), config.assets_dir));
    }

    lines
}

pub fn print_check_output(site: &Site, source_root: &Path) {
    for line in format_check_output(site, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Every written page with its output path, then the backup and a summary.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut videos = Vec::new();
    let mut sections = Vec::new();

    for page in &report.pages {
        let path = path_str(&page.path);
        match &page.kind {
            PageKind::Index => lines.push(format!("Home \u{2192} {}", path)),
            PageKind::Video { title } => videos.push((title.as_str(), path)),
            PageKind::Section(collection) => sections.push((collection.label(), path)),
        }
    }

    if !videos.is_empty() {
        lines.push("Videos".to_string());
        for (i, (title, path)) in videos.iter().enumerate() {
            lines.push(format!(
                "{}{} {} \u{2192} {}",
                indent(1),
                format_index(i + 1),
                title,
                path
            ));
        }
    }

    lines.push("Sections".to_string());
    for (label, path) in &sections {
        lines.push(format!("{}{} \u{2192} {}", indent(1), label, path));
    }

    lines.push(format!("Backup \u{2192} {}", path_str(&report.backup)));
    if report.assets_copied > 0 {
        lines.push(format!("Copied {} asset files", report.assets_copied));
    }
    lines.push(format!(
        "Generated 1 index, {} video pages, {} section pages",
        videos.len(),
        sections.len()
    ));

    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Matches grouped by collection, using the same messages as the page notice.
pub fn format_search_output(store: &ContentStore, results: &SearchResults) -> Vec<String> {
    if results.is_empty() {
        return vec![notice::NO_MATCHES.to_string()];
    }

    let mut lines = vec![notice::matches_found(results.len())];
    for collection in Collection::ALL {
        if results.count_in(collection) == 0 {
            continue;
        }
        lines.push(collection.label().to_string());
        let records = store.records(collection);
        for hit in results.hits.iter().filter(|h| h.collection == collection) {
            if let Some(record) = records.get(hit.index) {
                lines.push(format!(
                    "{}{} {}",
                    indent(1),
                    format_index(hit.index + 1),
                    record.title()
                ));
            }
        }
    }
    lines
}

pub fn print_search_output(store: &ContentStore, results: &SearchResults) {
    for line in format_search_output(store, results) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

pub fn format_export_output(path: &Path, store: &ContentStore) -> Vec<String> {
    let stats = store.stats();
    vec![
        format!("Backup \u{2192} {}", path.display()),
        format!(
            "{}{} videos, {} notes, {} papers, {} plans",
            indent(1),
            stats.videos,
            stats.notes,
            stats.papers,
            stats.plans
        ),
    ]
}

pub fn print_export_output(path: &Path, store: &ContentStore) {
    for line in format_export_output(path, store) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::sample_store;
    use crate::view::search::search;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn site() -> Site {
        Site {
            config: SiteConfig::default(),
            store: sample_store(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(7), "007");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncate_desc_counts_characters_not_bytes() {
        assert_eq!(truncate_desc("ééééé", 3), "ééé...");
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_lists_site_info() {
        let dir = TempDir::new().unwrap();
        let lines = format_check_output(&site(), dir.path());
        assert_eq!(lines[0], "Site");
        assert_eq!(lines[1], "    Academic Resource Hub");
        assert!(lines.contains(&"    Contact: contact@example.com".to_string()));
        assert!(lines.contains(&"    Channel: UC_TEST_CHANNEL".to_string()));
    }

    #[test]
    fn check_lists_each_collection_in_order() {
        let dir = TempDir::new().unwrap();
        let lines = format_check_output(&site(), dir.path());
        let headers: Vec<&String> = lines
            .iter()
            .filter(|l| Collection::ALL.iter().any(|c| l.starts_with(c.label())))
            .collect();
        assert_eq!(
            headers,
            vec![
                "Video Lessons (3)",
                "Study Notes (2)",
                "Past Papers (2)",
                "Lesson Plans (2)",
                "Schemes of Work (2)",
            ]
        );
    }

    #[test]
    fn check_shows_ids_under_titles() {
        let dir = TempDir::new().unwrap();
        let lines = format_check_output(&site(), dir.path());
        let pos = lines
            .iter()
            .position(|l| l == "001 How to Study Effectively")
            .unwrap();
        assert_eq!(lines[pos + 1], "    Id: X_oUMqtYadc");
        assert_eq!(lines[pos + 2], "    Subject: Study Skills");
    }

    #[test]
    fn check_reports_empty_collections() {
        let dir = TempDir::new().unwrap();
        let site = Site {
            config: SiteConfig::default(),
            store: ContentStore::default(),
        };
        let lines = format_check_output(&site, dir.path());
        assert!(lines.contains(&"    No past papers available".to_string()));
    }

    #[test]
    fn check_lists_config_files_that_exist() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        let lines = format_check_output(&site(), dir.path());
        let tail = &lines[lines.len() - 2..];
        assert_eq!(tail, ["    config.toml", "    metadata.json"]);
    }

    // =========================================================================
    // Build
    // =========================================================================

    fn report() -> GenerateReport {
        GenerateReport {
            pages: vec![
                GeneratedPage {
                    path: PathBuf::from("index.html"),
                    kind: PageKind::Index,
                },
                GeneratedPage {
                    path: PathBuf::from("videos/abc/index.html"),
                    kind: PageKind::Video {
                        title: "Intro".into(),
                    },
                },
                GeneratedPage {
                    path: PathBuf::from("sections/notes/index.html"),
                    kind: PageKind::Section(Collection::Notes),
                },
            ],
            backup: PathBuf::from("data/hub-2024-01-15.json"),
            assets_copied: 0,
        }
    }

    #[test]
    fn generate_output_lists_pages() {
        let lines = format_generate_output(&report());
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html",
                "Videos",
                "    001 Intro \u{2192} videos/abc/index.html",
                "Sections",
                "    Study Notes \u{2192} sections/notes/index.html",
                "Backup \u{2192} data/hub-2024-01-15.json",
                "Generated 1 index, 1 video pages, 1 section pages",
            ]
        );
    }

    #[test]
    fn generate_output_mentions_copied_assets() {
        let mut report = report();
        report.assets_copied = 2;
        let lines = format_generate_output(&report);
        assert!(lines.contains(&"Copied 2 asset files".to_string()));
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[test]
    fn search_output_groups_hits_by_collection() {
        let store = sample_store();
        let results = search(&store, "physics");
        let lines = format_search_output(&store, &results);
        assert_eq!(lines[0], "Found 3 matching resources");
        assert!(lines.contains(&"Study Notes".to_string()));
        assert!(lines.contains(&"    002 Physics Formula Guide".to_string()));
        assert!(!lines.contains(&"Video Lessons".to_string()));
    }

    #[test]
    fn search_output_without_hits() {
        let store = sample_store();
        let results = search(&store, "zzzz");
        assert_eq!(
            format_search_output(&store, &results),
            vec![notice::NO_MATCHES.to_string()]
        );
    }

    // =========================================================================
    // Export
    // =========================================================================

    #[test]
    fn export_output_summarizes_counts() {
        let lines = format_export_output(Path::new("dist/data/b.json"), &sample_store());
        assert_eq!(lines[0], "Backup \u{2192} dist/data/b.json");
        assert_eq!(lines[1], "    3 videos, 2 notes, 2 papers, 2 plans");
    }
}
