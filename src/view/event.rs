//! Inputs to and outputs of the view state machine.

use chrono::NaiveDate;
use std::time::Duration;

use crate::content::Collection;

use super::history::HistoryEntry;

/// In-page navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Home,
    Section(Collection),
    Contact,
}

impl Anchor {
    /// Element id the anchor scrolls to.
    pub fn id(self) -> &'static str {
        match self {
            Anchor::Home => "home",
            Anchor::Section(c) => c.key(),
            Anchor::Contact => "contact",
        }
    }
}

/// Something the user or the browser did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page load, with the location's query string.
    Load { query: Option<String> },
    SelectVideo(String),
    /// The player's "Back to Videos" action.
    Back,
    Escape,
    Navigate(Anchor),
    /// Browser back/forward landed on this entry.
    PopState(HistoryEntry),
    /// The embedded player failed to load.
    EmbedFailed,
    ToggleShowAll(Collection),
    Resize(u32),
    /// Raw search field contents after a keystroke.
    SearchInput(String),
    /// Search button or Enter.
    SearchSubmit(String),
    Export { today: NaiveDate },
    ToggleMenu,
    TaskFired(Task),
}

/// Deferred work owned by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Open a deep-linked video once the page has settled.
    AutoOpen(String),
    DebouncedSearch(String),
    RemovePlayer,
    DismissNotice(u64),
}

/// Cancellation key for a [`Task`]. At most one task per kind is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    AutoOpen,
    DebouncedSearch,
    RemovePlayer,
    DismissNotice(u64),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::AutoOpen(_) => TaskKind::AutoOpen,
            Task::DebouncedSearch(_) => TaskKind::DebouncedSearch,
            Task::RemovePlayer => TaskKind::RemovePlayer,
            Task::DismissNotice(id) => TaskKind::DismissNotice(*id),
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PushHistory(HistoryEntry),
    ReplaceHistory(HistoryEntry),
    /// Clear the embedded player's source.
    StopPlayback,
    ScrollTo(Anchor),
    ClearSearchField,
    Download { filename: String, contents: String },
    Schedule { task: Task, delay: Duration },
    Cancel(TaskKind),
}
