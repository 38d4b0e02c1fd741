//! HTML rendering.
//!
//! Every page is a pure function of the Content Store, the config and one
//! [`UiState`]: the view layer decides what is visible, this module only draws
//! it. Uses [maud](https://maud.lambda.xyz/), so every piece of record text is
//! escaped on interpolation.
//!
//! ## Page anatomy
//!
//! ```text
//! header    brand, section nav, mobile menu toggle
//! hero      site description, resource counts, search form
//! notices   transient messages
//! sections  one per collection: heading, show-all control, card grid
//!           (the video section also hosts the inline player)
//! footer    contact links, backup download, copyright year
//! ```
//!
//! Collapsed grids are drawn with the wide card limit. Cards past the narrow
//! limit carry `.narrow-overflow` so the generated media query can hide them
//! on small screens without a second render.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::config::{self, SiteConfig};
use crate::content::{Collection, ContentStore, DocumentResource, Record, VideoResource};
use crate::links::{self, DegradeChain};
use crate::view::history::video_dir;
use crate::view::{Embed, Notice, Player, SectionLayout, UiState, ViewContext, layout, search};

const STYLE: &str = include_str!("../static/style.css");
const SCRIPT: &str = include_str!("../static/hub.js");

/// Inputs a page needs beyond the view state.
#[derive(Debug, Clone)]
pub struct PageAssets {
    /// Full stylesheet, see [`site_css`].
    pub css: String,
    /// Year stamped into the footer.
    pub year: i32,
    /// Site-relative path of the backup file, if one was written.
    pub backup_href: Option<String>,
}

/// Stylesheet with the configured colors and breakpoint applied.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        STYLE,
        config::generate_layout_css(&config.layout),
    )
}

/// Escape text for safe interpolation into markup.
pub fn escape_html(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Relative prefix from the page for `state` back to the site root.
///
/// Video and focused-section pages live two directories down.
pub fn root_prefix(state: &UiState) -> &'static str {
    if state.player.is_open() || state.focused.is_some() {
        "../../"
    } else {
        ""
    }
}

// ============================================================================
// Page
// ============================================================================

pub fn render_page(ctx: &ViewContext<'_>, state: &UiState, assets: &PageAssets) -> Markup {
    let store = ctx.store;
    let root = root_prefix(state);
    let site_title = store.site_info.display_title();
    let title = match state.player.video().and_then(|id| store.find_video(id)) {
        Some(video) => format!("{} | {}", video.title, site_title),
        None => site_title.to_string(),
    };
    let page = layout(store, state);

    let content = html! {
        (site_header(store, state, root))
        main {
            (hero(store))
            (render_notices(&state.notices))
            @for section in &page.sections {
                (render_section(ctx, state, section, root))
            }
        }
        (site_footer(ctx, assets, root))
    };

    base_document(&title, ctx.config, &assets.css, root, content)
}

fn base_document(
    title: &str,
    config: &SiteConfig,
    css: &str,
    root: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body
                data-min-query=(config.search.min_query_chars)
                data-auto-search=(config.search.auto_search_chars)
                data-debounce=(config.search.debounce_ms)
                data-dismiss=(config.timing.notice_dismiss_ms)
                data-auto-open=(config.timing.auto_open_delay_ms)
                data-close-delay=(config.timing.player_close_delay_ms)
                data-root=(root)
            {
                (content)
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

fn site_header(store: &ContentStore, state: &UiState, root: &str) -> Markup {
    html! {
        header.site-header #home {
            a.brand href={ (root) "#home" } { (store.site_info.display_title()) }
            button.menu-toggle #menuToggle type="button"
                aria-label="Toggle navigation"
                aria-expanded=(if state.menu_open { "true" } else { "false" }) {
                @if state.menu_open { "✕" } @else { "☰" }
            }
            nav.nav-links.active[state.menu_open] {
                a href={ (root) "#home" } { "Home" }
                @for collection in Collection::ALL {
                    a href={ (root) "#" (collection.key()) } { (collection.label()) }
                }
                a href={ (root) "#contact" } { "Contact" }
            }
        }
    }
}

fn hero(store: &ContentStore) -> Markup {
    let stats = store.stats();
    let info = &store.site_info;
    html! {
        section.hero {
            h1 { (info.display_title()) }
            @if !info.description.is_empty() {
                p.hero-description { (info.description) }
            }
            div.stats {
                (stat(stats.videos, "videoCount", Collection::Videos))
                (stat(stats.notes, "notesCount", Collection::Notes))
                (stat(stats.papers, "papersCount", Collection::PastPapers))
                (stat(stats.plans, "plansCount", Collection::LessonPlans))
            }
            form.search-form #searchForm role="search" {
                input #searchInput type="search" name="q"
                    placeholder="Search videos, notes, papers..."
                    aria-label="Search resources" autocomplete="off";
                button.btn #searchBtn type="submit" { "Search" }
            }
        }
    }
}

fn stat(count: usize, id: &str, collection: Collection) -> Markup {
    html! {
        div.stat {
            span.stat-number id=(id) { (count) }
            span.stat-label { (collection.label()) }
        }
    }
}

pub fn render_notices(notices: &[Notice]) -> Markup {
    html! {
        div.notices #notices aria-live="polite" {
            @for notice in notices {
                div class={ "notice " (notice.level.css_class()) } data-notice-id=(notice.id) {
                    span.notice-icon aria-hidden="true" { (notice.level.icon()) }
                    span { (notice.message) }
                }
            }
        }
    }
}

fn site_footer(ctx: &ViewContext<'_>, assets: &PageAssets, root: &str) -> Markup {
    let info = &ctx.store.site_info;
    let title = info.display_title();
    html! {
        footer.site-footer #contact {
            div.footer-content {
                div.footer-about {
                    h3 { (title) }
                    @if !info.description.is_empty() {
                        p { (info.description) }
                    }
                }
                div.footer-links {
                    h4 { "Contact" }
                    @if let Some(email) = &info.contact_email {
                        a href=(links::mailto(email)) { (email) }
                    }
                    @if let Some(channel) = &info.channel_id {
                        a href=(links::channel_url(&ctx.config.links, channel))
                            target="_blank" rel="noopener noreferrer" {
                            (ctx.config.links.platform_name) " channel"
                        }
                    }
                    @if let Some(backup) = &assets.backup_href {
                        a #backupLink href={ (root) (backup) } download { "Backup data" }
                    }
                }
            }
            p.copyright {
                "© " span #currentYear { (assets.year) } " " (title) ". All rights reserved."
            }
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

fn render_section(
    ctx: &ViewContext<'_>,
    state: &UiState,
    section: &SectionLayout,
    root: &str,
) -> Markup {
    let collection = section.collection;
    let key = collection.key();
    let narrow = ctx.config.layout.cards_narrow;
    // Wide collapsed grid: the media query trims it to the narrow limit.
    let trims_on_narrow =
        !section.expanded && state.filter.is_none() && state.collapsed_limit > narrow;
    let narrow_only_toggle =
        trims_on_narrow && !section.has_toggle() && section.visible.len() > narrow;
    let toggle_href = if section.expanded {
        format!("{root}#{key}")
    } else {
        format!("{root}sections/{key}/")
    };

    html! {
        section.resource-section id=(key) data-section=(key) hidden[section.hidden] {
            div.section-header {
                h2 { (collection.label()) }
                @if section.has_toggle() || narrow_only_toggle {
                    a.toggle-resources.narrow-only[narrow_only_toggle]
                        href=(toggle_href) data-section=(key) {
                        (section.toggle_label())
                        @if section.overflow > 0 {
                            " " span.toggle-count { "(+" (section.overflow) ")" }
                        }
                    }
                }
            }
            @if collection == Collection::Videos {
                (render_player(ctx, &state.player, root))
            }
            div.resource-grid.show-all[section.expanded]
                id={ (key) "Grid" } hidden[section.grid_replaced] {
                (render_collection(ctx, section, root, trims_on_narrow))
            }
        }
    }
}

/// Cards of one collection, or its empty-state fragment.
pub fn render_collection(
    ctx: &ViewContext<'_>,
    section: &SectionLayout,
    root: &str,
    trims_on_narrow: bool,
) -> Markup {
    let collection = section.collection;
    let narrow = ctx.config.layout.cards_narrow;
    let records = ctx.store.records(collection);
    html! {
        @if records.is_empty() {
            div.no-resources {
                p { (collection.empty_message()) }
            }
        } @else {
            @for (i, record) in records.iter().enumerate() {
                @let visible = section.visible.get(i).copied().unwrap_or(false);
                @let narrow_overflow = trims_on_narrow && i >= narrow;
                @match record {
                    Record::Video(video) => {
                        (video_card(ctx.config, video, root, visible, narrow_overflow))
                    }
                    Record::Document(doc) => {
                        (document_card(ctx.config, collection, doc, visible, narrow_overflow))
                    }
                }
            }
        }
    }
}

// ============================================================================
// Cards
// ============================================================================

fn video_card(
    config: &SiteConfig,
    video: &VideoResource,
    root: &str,
    visible: bool,
    narrow_overflow: bool,
) -> Markup {
    let chain = DegradeChain::for_video(config, &video.external_id);
    let haystack = search::haystack(&Record::Video(video));
    html! {
        article.video-card.narrow-overflow[narrow_overflow]
            data-video-id=(video.external_id)
            data-search=(haystack)
            hidden[!visible] {
            a.video-link href={ (root) "videos/" (video_dir(&video.external_id)) "/" } {
                div.video-thumbnail {
                    img src=[chain.current()] alt=(video.title) loading="lazy"
                        data-fallbacks=(chain.fallbacks().join(" "));
                    span.play-button aria-hidden="true" { "▶" }
                    span.video-duration { (video.duration.as_deref().unwrap_or("N/A")) }
                }
                div.video-content {
                    h3.video-title { (video.title) }
                    p.video-description { (video.description) }
                    div.video-meta {
                        span { (video.subject.as_deref().unwrap_or("General")) }
                        @if let Some(chapter) = &video.chapter {
                            span { (chapter) }
                        }
                        span { "Play" }
                    }
                }
            }
        }
    }
}

/// Detail rows and meta line of a document card, with fallbacks applied.
struct DocumentFacts {
    details: Vec<String>,
    meta: Vec<String>,
}

fn document_facts(collection: Collection, doc: &DocumentResource) -> DocumentFacts {
    fn or<T: ToString>(value: &Option<T>, fallback: &str) -> String {
        value
            .as_ref()
            .map_or_else(|| fallback.to_string(), ToString::to_string)
    }
    let pages = |fallback: &str| -> String {
        let n = doc
            .pages
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| fallback.to_string());
        format!("{n} pages")
    };
    let grade = or(&doc.grade, "All Levels");

    match collection {
        Collection::Notes => DocumentFacts {
            details: vec![
                pages("?"),
                or(&doc.subject, "General"),
                or(&doc.file_size, "N/A"),
                or(&doc.last_updated, "N/A"),
            ],
            meta: vec![grade],
        },
        Collection::PastPapers => DocumentFacts {
            details: vec![
                or(&doc.year, "N/A"),
                or(&doc.subject, "All Subjects"),
                or(&doc.file_size, "N/A"),
                pages("N/A"),
            ],
            meta: vec![grade, or(&doc.last_updated, "N/A")],
        },
        Collection::LessonPlans => DocumentFacts {
            details: vec![
                doc.plan_kind().label().to_string(),
                or(&doc.subject, "All Subjects"),
                or(&doc.file_size, "N/A"),
                pages("N/A"),
            ],
            meta: vec![grade, or(&doc.term, "N/A")],
        },
        Collection::SchemesOfWork | Collection::Videos => DocumentFacts {
            details: vec![
                or(&doc.term, "N/A"),
                or(&doc.subject, "General"),
                or(&doc.file_size, "N/A"),
                pages("N/A"),
            ],
            meta: vec![grade, or(&doc.last_updated, "N/A")],
        },
    }
}

fn document_card(
    config: &SiteConfig,
    collection: Collection,
    doc: &DocumentResource,
    visible: bool,
    narrow_overflow: bool,
) -> Markup {
    let facts = document_facts(collection, doc);
    let haystack = search::haystack(&Record::Document(doc));
    html! {
        article.resource-card.narrow-overflow[narrow_overflow]
            data-search=(haystack)
            hidden[!visible] {
            div class={ "card-header " (collection.key()) "-bg" } {
                h3 { (doc.title) }
            }
            div.card-content {
                p { (doc.description) }
                div.card-details {
                    @for detail in &facts.details {
                        span { (detail) }
                    }
                }
                div.card-meta {
                    @for item in &facts.meta {
                        span { (item) }
                    }
                }
                div.pdf-actions {
                    a.btn.btn-sm.btn-success
                        href=(links::download_url(&config.links, &doc.file_id))
                        download=(links::download_filename(&doc.title)) {
                        "Download"
                    }
                    a.btn.btn-sm.btn-outline
                        href=(links::preview_url(&config.links, &doc.file_id))
                        target="_blank" rel="noopener noreferrer" {
                        "View"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Player
// ============================================================================

fn render_player(ctx: &ViewContext<'_>, player: &Player, root: &str) -> Markup {
    match player {
        Player::Closed => html! {},
        Player::Closing => html! {
            div.video-player-section.closing #playerRegion {}
        },
        Player::Open { video, embed } => match ctx.store.find_video(video) {
            Some(video) => open_player(ctx.config, video, *embed, root),
            None => html! {},
        },
    }
}

fn open_player(config: &SiteConfig, video: &VideoResource, embed: Embed, root: &str) -> Markup {
    let platform = &config.links.platform_name;
    let watch = links::watch_url(&config.links, &video.external_id);
    let refused = html! {
        div.embed-refused {
            h3 { "Video Cannot Be Embedded" }
            p { "This video does not allow embedding. Please watch it on " (platform) "." }
            a.btn.btn-primary href=(watch) target="_blank" rel="noopener noreferrer" {
                "Watch on " (platform)
            }
        }
    };
    html! {
        div.video-player-section.active #playerRegion data-video-id=(video.external_id) {
            div.video-player-container {
                @match embed {
                    Embed::Requested => {
                        iframe #inlineVideoPlayer
                            src=(links::embed_url(&config.links, &video.external_id))
                            title=(video.title)
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen {}
                        template #embedRefused { (refused) }
                    }
                    Embed::Refused => { (refused) }
                }
            }
            div.video-player-info {
                h2.video-player-title { (video.title) }
                p.video-player-description { (video.description) }
                div.video-player-actions {
                    a.back-to-videos #backToVideos href={ (root) "#videos" } { "← Back to Videos" }
                    a.btn.btn-outline href=(watch) target="_blank" rel="noopener noreferrer" {
                        "Watch on " (platform)
                    }
                }
            }
        }
    }
}
