//! Per-section and per-card visibility derived from the UI state.
//!
//! The renderer never decides visibility itself; it draws whatever
//! [`layout`] returns.

use crate::content::{Collection, ContentStore};

use super::state::UiState;

pub const SHOW_ALL: &str = "Show All";
pub const SHOW_LESS: &str = "Show Less";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    pub collection: Collection,
    /// Another section is focused; this one is not drawn at all.
    pub hidden: bool,
    /// This section is the focused one and shows every card.
    pub expanded: bool,
    /// Visibility of each card, in collection order.
    pub visible: Vec<bool>,
    /// Cards a "Show All" would reveal.
    pub overflow: usize,
    /// The video grid is replaced by the open player.
    pub grid_replaced: bool,
}

impl SectionLayout {
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Whether the show-all control is offered.
    pub fn has_toggle(&self) -> bool {
        self.expanded || self.overflow > 0
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded { SHOW_LESS } else { SHOW_ALL }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub sections: Vec<SectionLayout>,
}

impl PageLayout {
    pub fn section(&self, collection: Collection) -> &SectionLayout {
        // `layout` emits one entry per collection in `Collection::ALL` order.
        let i = Collection::ALL
            .iter()
            .position(|c| *c == collection)
            .unwrap_or_default();
        &self.sections[i]
    }

    /// Cards visible across all drawn sections.
    pub fn visible_cards(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| !s.hidden)
            .map(SectionLayout::visible_count)
            .sum()
    }
}

pub fn layout(store: &ContentStore, state: &UiState) -> PageLayout {
    let sections = Collection::ALL
        .into_iter()
        .map(|collection| section_layout(store, state, collection))
        .collect();
    PageLayout { sections }
}

fn section_layout(store: &ContentStore, state: &UiState, collection: Collection) -> SectionLayout {
    let len = store.len(collection);
    let expanded = state.focused == Some(collection);
    let hidden = state.focused.is_some() && !expanded;

    let (visible, overflow) = match &state.filter {
        Some(results) => ((0..len).map(|i| results.contains(collection, i)).collect(), 0),
        None if expanded => (vec![true; len], 0),
        None => {
            let limit = state.collapsed_limit;
            (
                (0..len).map(|i| i < limit).collect(),
                len.saturating_sub(limit),
            )
        }
    };

    SectionLayout {
        collection,
        hidden,
        expanded,
        visible,
        overflow,
        grid_replaced: collection == Collection::Videos && state.player.is_open(),
    }
}
