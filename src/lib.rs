//! # Resource Hub
//!
//! A static site generator for educational resource listings. A single
//! hand-edited `metadata.json` lists video lessons and four kinds of
//! downloadable documents; the build turns it into a one-page hub with an
//! inline video player, collapsible sections, search and a backup download.
//!
//! # Architecture: Store, State, Markup
//!
//! ```text
//! metadata.json ──► ContentStore ──► Controller ──► UiState ──► render_page ──► HTML
//!   (content)         (read-only)     (view)         (value)      (render)
//! ```
//!
//! The page a visitor sees is a pure function of two values: the immutable
//! [`content::ContentStore`] and the [`view::UiState`] reached by feeding
//! events through [`view::transition`]. The generator drives a controller to
//! every state reachable by following links (the index, each open video,
//! each expanded section) and writes one page per state. A small embedded
//! script repeats the in-page rules (search, notices, thumbnail fallbacks,
//! deep links) for visitors with JavaScript.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Content Store types, JSON loading and record validation |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation, CSS generation |
//! | [`links`] | Watch, embed, thumbnail, channel and document URLs; thumbnail degrade chain |
//! | [`view`] | UI state, events, effects, the pure transition function and its scheduler |
//! | [`render`] | Maud templates for the page, sections, cards, player and notices |
//! | [`export`] | Pretty JSON backup of the store with a dated filename |
//! | [`generate`] | Writes every prerendered page, the backup and static assets |
//! | [`output`] | CLI output formatting for each command |
//!
//! # Design Decisions
//!
//! ## State As A Value
//!
//! Player, focused section, search filter and notices live in one
//! [`view::UiState`]. Transitions return the next state plus a list of
//! [`view::Effect`]s instead of touching a document, so the whole interaction
//! model is testable without a browser. Timers are effects too: a
//! [`view::Scheduler`] on a virtual clock fires them, and scheduling a task
//! replaces any pending task of the same kind.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! checked at compile time and every interpolation is escaped, which matters
//! here because every title and description comes from a hand-edited file.

pub mod config;
pub mod content;
pub mod export;
pub mod generate;
pub mod links;
pub mod output;
pub mod render;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
