//! The UI state value threaded through every transition.

use crate::config::SiteConfig;
use crate::content::Collection;

use super::notice::Notice;
use super::search::SearchResults;

/// Whether the platform accepted the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embed {
    Requested,
    /// The platform refused embedding; a "watch on platform" notice replaces
    /// the player while the state stays open.
    Refused,
}

/// Inline video player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Player {
    /// Grid visible, no player region.
    Closed,
    /// Grid hidden, player region mounted for `video`.
    Open { video: String, embed: Embed },
    /// Grid restored; the player region is removed when the pending
    /// removal task fires.
    Closing,
}

impl Player {
    pub fn is_open(&self) -> bool {
        matches!(self, Player::Open { .. })
    }

    pub fn video(&self) -> Option<&str> {
        match self {
            Player::Open { video, .. } => Some(video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub player: Player,
    /// The single expanded section; all others are hidden while set.
    pub focused: Option<Collection>,
    pub viewport_width: u32,
    /// Cards shown per collapsed section. Recomputed from the viewport only
    /// while nothing is focused and no video is open.
    pub collapsed_limit: usize,
    /// Active search; when set, card visibility follows its hits.
    pub filter: Option<SearchResults>,
    pub notices: Vec<Notice>,
    pub next_notice_id: u64,
    pub menu_open: bool,
}

impl UiState {
    pub fn initial(config: &SiteConfig, viewport_width: u32) -> Self {
        Self {
            player: Player::Closed,
            focused: None,
            viewport_width,
            collapsed_limit: config.layout.collapsed_limit(viewport_width),
            filter: None,
            notices: Vec::new(),
            next_notice_id: 1,
            menu_open: false,
        }
    }
}
