//! View controller: UI state as an explicit value and a pure state machine.
//!
//! | Piece | Role |
//! |---|---|
//! | [`UiState`] | Player state, focused section, card limit, search filter, notices |
//! | [`transition`] | `(state, event) -> (state, effects)`, no I/O |
//! | [`Scheduler`] | Cancellable deferred tasks on a virtual clock |
//! | [`layout()`] | Section and card visibility for the renderer |
//! | [`Controller`] | Owns state + scheduler and feeds fired tasks back in |
//!
//! The generator drives a [`Controller`] to reach each page it prerenders,
//! and the browser script mirrors the same rules for in-page interaction.

mod event;
pub mod history;
pub mod layout;
pub mod notice;
mod scheduler;
pub mod search;
mod state;
mod transition;

pub use event::{Anchor, Effect, Event, Task, TaskKind};
pub use history::HistoryEntry;
pub use layout::{PageLayout, SectionLayout, layout};
pub use notice::{Notice, NoticeLevel};
pub use scheduler::Scheduler;
pub use search::{Hit, SearchResults};
pub use state::{Embed, Player, UiState};
pub use transition::{ViewContext, transition};

use std::time::Duration;

use crate::config::SiteConfig;
use crate::content::ContentStore;

/// Stateful shell around [`transition`].
///
/// Schedule and cancel effects are applied to the owned [`Scheduler`] before
/// being returned, so callers only act on the document-facing effects.
#[derive(Debug, Clone)]
pub struct Controller<'a> {
    ctx: ViewContext<'a>,
    state: UiState,
    scheduler: Scheduler,
}

impl<'a> Controller<'a> {
    pub fn new(store: &'a ContentStore, config: &'a SiteConfig, viewport_width: u32) -> Self {
        Self {
            ctx: ViewContext { store, config },
            state: UiState::initial(config, viewport_width),
            scheduler: Scheduler::new(),
        }
    }

    /// Page load with the location's query string, if any.
    pub fn load(&mut self, query: Option<&str>) -> Vec<Effect> {
        self.handle(Event::Load {
            query: query.map(str::to_string),
        })
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let (state, effects) = transition(&self.ctx, &self.state, event);
        self.state = state;
        for effect in &effects {
            match effect {
                Effect::Schedule { task, delay } => self.scheduler.schedule(task.clone(), *delay),
                Effect::Cancel(kind) => self.scheduler.cancel(*kind),
                _ => {}
            }
        }
        effects
    }

    /// Let `elapsed` pass, firing every task that comes due in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Effect> {
        let deadline = self.scheduler.now() + elapsed;
        let mut effects = Vec::new();
        while let Some(task) = self.scheduler.pop_due(deadline) {
            effects.extend(self.handle(Event::TaskFired(task)));
        }
        self.scheduler.settle(deadline);
        effects
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn context(&self) -> &ViewContext<'a> {
        &self.ctx
    }

    pub fn layout(&self) -> PageLayout {
        layout(self.ctx.store, &self.state)
    }
}
