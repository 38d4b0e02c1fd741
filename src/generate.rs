//! Static site generation.
//!
//! Loads the site config and Content Store from the content directory, drives
//! a [`Controller`] into every state a visitor can reach by following links,
//! and writes one rendered page per state.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): initial state, every section collapsed
//! - **Video pages** (`/videos/{id}/index.html`): the state after selecting
//!   that video, with the inline player open
//! - **Section pages** (`/sections/{key}/index.html`): the state after
//!   "Show All" on that section
//! - **Backup** (`/data/{prefix}-{date}.json`): the export artifact, linked
//!   from every footer
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── favicon.ico                # from content/assets/
//! ├── videos/
//! │   └── X_oUMqtYadc/
//! │       └── index.html
//! ├── sections/
//! │   ├── videos/index.html
//! │   ├── notes/index.html
//! │   └── ...
//! └── data/
//!     └── academic-hub-backup-2024-01-15.json
//! ```
//!
//! Stylesheet and script are inlined into every page, see [`crate::render`].

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, Collection, ContentError, ContentStore};
use crate::export::{self, ExportError};
use crate::render::{self, PageAssets};
use crate::view::{Controller, Event, HistoryEntry};

/// Viewport width pages are prerendered for. Narrow screens are handled by
/// the generated media query.
pub const PRERENDER_WIDTH: u32 = 1280;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Config plus the store it points at.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub store: ContentStore,
}

/// Load and validate `config.toml` and the Content Store from `content_dir`.
pub fn load_site(content_dir: &Path) -> Result<Site, GenerateError> {
    let config = config::load_config(content_dir)?;
    let store = content::load_store(&content_dir.join(&config.content_file))?;
    Ok(Site { config, store })
}

/// A page written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub kind: PageKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Video { title: String },
    Section(Collection),
}

#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    /// Backup path relative to the output directory.
    pub backup: PathBuf,
    pub assets_copied: usize,
}

pub fn generate(
    content_dir: &Path,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let site = load_site(content_dir)?;
    generate_site(&site, content_dir, output_dir, today)
}

/// Write the site for an already loaded [`Site`].
pub fn generate_site(
    site: &Site,
    content_dir: &Path,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let Site { config, store } = site;
    fs::create_dir_all(output_dir)?;

    let data_dir = output_dir.join("data");
    let backup_path = export::write_export(store, &data_dir, &config.export.filename_prefix, today)?;
    let backup = relative_to(&backup_path, output_dir);

    let assets = PageAssets {
        css: render::site_css(config),
        year: today.year(),
        backup_href: Some(href(&backup)),
    };

    let mut pages = Vec::new();

    let mut hub = Controller::new(store, config, PRERENDER_WIDTH);
    hub.load(None);
    pages.push(write_page(output_dir, &assets, &hub, "index.html".into(), PageKind::Index)?);

    // Lookups take the first video with an id, so later duplicates get no page.
    let mut seen = HashSet::new();
    for video in store.videos.iter().filter(|v| seen.insert(v.external_id.as_str())) {
        let mut hub = Controller::new(store, config, PRERENDER_WIDTH);
        hub.load(None);
        hub.handle(Event::SelectVideo(video.external_id.clone()));
        let path = PathBuf::from(HistoryEntry::open(&video.external_id).page_path()).join("index.html");
        let kind = PageKind::Video {
            title: video.title.clone(),
        };
        pages.push(write_page(output_dir, &assets, &hub, path, kind)?);
    }

    for collection in Collection::ALL {
        let mut hub = Controller::new(store, config, PRERENDER_WIDTH);
        hub.load(None);
        hub.handle(Event::ToggleShowAll(collection));
        let path = Path::new("sections").join(collection.key()).join("index.html");
        pages.push(write_page(output_dir, &assets, &hub, path, PageKind::Section(collection))?);
    }

    let assets_copied = copy_assets(&content_dir.join(&config.assets_dir), output_dir)?;

    Ok(GenerateReport {
        pages,
        backup,
        assets_copied,
    })
}

/// Render the controller's current state to `output_dir/path`.
fn write_page(
    output_dir: &Path,
    assets: &PageAssets,
    hub: &Controller<'_>,
    path: PathBuf,
    kind: PageKind,
) -> Result<GeneratedPage, GenerateError> {
    let html = render::render_page(hub.context(), hub.state(), assets);
    let target = output_dir.join(&path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, html.into_string())?;
    Ok(GeneratedPage { path, kind })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

/// Forward-slash URL path for a relative file path.
fn href(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
