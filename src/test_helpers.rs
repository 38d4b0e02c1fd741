//! Shared test utilities for the resource-hub test suite.
//!
//! Provides record builders, a sample store mirroring `fixtures/content`, and
//! lookups that panic with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = store_with_videos(5);
//! let config = SiteConfig::default();
//! let mut hub = controller(&store, &config, DESKTOP);
//! hub.handle(Event::SelectVideo("vid1".into()));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::content::{ContentStore, DocumentResource, SiteInfo, TextOrNumber, VideoResource};
use crate::view::Controller;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Record builders
// =========================================================================

pub fn video(id: &str, title: &str, description: &str) -> VideoResource {
    VideoResource {
        external_id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        ..Default::default()
    }
}

pub fn document(title: &str, description: &str) -> DocumentResource {
    DocumentResource {
        title: title.to_string(),
        description: description.to_string(),
        file_id: format!("FILE_{}", title.replace(' ', "_")),
        ..Default::default()
    }
}

fn full_video(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    subject: &str,
    chapter: &str,
) -> VideoResource {
    VideoResource {
        duration: Some(duration.to_string()),
        subject: Some(subject.to_string()),
        chapter: Some(chapter.to_string()),
        ..video(id, title, description)
    }
}

fn full_document(
    title: &str,
    description: &str,
    subject: &str,
    pages: TextOrNumber,
) -> DocumentResource {
    DocumentResource {
        subject: Some(subject.to_string()),
        pages: Some(pages),
        file_size: Some("2.5 MB".to_string()),
        last_updated: Some("2024-01-15".to_string()),
        ..document(title, description)
    }
}

/// A store shaped like the fixture content: 3 videos, 2 of each document kind.
pub fn sample_store() -> ContentStore {
    ContentStore {
        site_info: SiteInfo {
            title: "Academic Resource Hub".to_string(),
            description: "Free study material for students and teachers.".to_string(),
            contact_email: Some("contact@example.com".to_string()),
            channel_id: Some("UC_TEST_CHANNEL".to_string()),
            ..Default::default()
        },
        videos: vec![
            full_video(
                "X_oUMqtYadc",
                "How to Study Effectively",
                "Proven study techniques.",
                "15:30",
                "Study Skills",
                "Learning Methods",
            ),
            full_video(
                "PkZNo7MFNFg",
                "Learn JavaScript",
                "Complete course for beginners.",
                "3:26:43",
                "Computer Science",
                "Programming",
            ),
            full_video(
                "pQN-pnXPaVg",
                "HTML Full Course",
                "Build a website from scratch.",
                "2:02:32",
                "Computer Science",
                "Web Development",
            ),
        ],
        notes: vec![
            DocumentResource {
                grade: Some("Grade 11-12".into()),
                ..full_document(
                    "Complete Mathematics Notes",
                    "Algebra, geometry, calculus and statistics.",
                    "Mathematics",
                    TextOrNumber::from(45u64),
                )
            },
            full_document(
                "Physics Formula Guide",
                "Essential formulas with worked examples.",
                "Physics",
                TextOrNumber::from(32u64),
            ),
        ],
        past_papers: vec![
            DocumentResource {
                year: Some("2023".into()),
                ..full_document(
                    "Mathematics Paper 1 - 2023",
                    "Paper 1 with marking scheme.",
                    "Mathematics",
                    TextOrNumber::from("24"),
                )
            },
            DocumentResource {
                year: Some("2023".into()),
                ..full_document(
                    "Physics Paper 2 - 2023",
                    "Paper 2 with practical section.",
                    "Physics",
                    TextOrNumber::from("28"),
                )
            },
        ],
        lesson_plans: vec![
            DocumentResource {
                kind: Some("lesson-plan".to_string()),
                term: Some("Term 1".into()),
                ..full_document(
                    "Mathematics Lesson Plan - Algebra",
                    "Weekly plan for algebra topics.",
                    "Mathematics",
                    TextOrNumber::from("15"),
                )
            },
            DocumentResource {
                kind: Some("syllabus".to_string()),
                term: Some("Full Year".into()),
                ..full_document(
                    "Physics Syllabus Guide",
                    "Syllabus for the academic year.",
                    "Physics",
                    TextOrNumber::from("35"),
                )
            },
        ],
        schemes_of_work: vec![
            DocumentResource {
                term: Some("Term 1".into()),
                ..full_document(
                    "Mathematics Scheme of Work - Term 1",
                    "Term 1 mathematics scheme.",
                    "Mathematics",
                    TextOrNumber::from("22"),
                )
            },
            DocumentResource {
                term: Some("Academic Year".into()),
                grade: Some("All Levels".into()),
                ..full_document(
                    "Science Annual Scheme",
                    "Year-long scheme covering the sciences.",
                    "Science",
                    TextOrNumber::from("45"),
                )
            },
        ],
        ..Default::default()
    }
}

/// A store with `n` videos titled `Video 1..=n` and nothing else.
pub fn store_with_videos(n: usize) -> ContentStore {
    ContentStore {
        videos: (1..=n)
            .map(|i| video(&format!("vid{i}"), &format!("Video {i}"), "A lesson"))
            .collect(),
        ..Default::default()
    }
}

// =========================================================================
// Controller helpers
// =========================================================================

/// Viewport width comfortably above the default breakpoint.
pub const DESKTOP: u32 = 1280;
/// Viewport width below the default breakpoint.
pub const PHONE: u32 = 390;

/// A loaded controller over `store` with default config at `width`.
pub fn controller<'a>(
    store: &'a ContentStore,
    config: &'a SiteConfig,
    width: u32,
) -> Controller<'a> {
    let mut c = Controller::new(store, config, width);
    c.load(None);
    c
}
