//! The pure transition function.
//!
//! `transition` never touches a clock, a document or the filesystem: it maps
//! the current state and one event to the next state plus the effects the
//! host must carry out. Deferred work is requested as [`Effect::Schedule`]
//! and comes back later as [`Event::TaskFired`].

use crate::config::SiteConfig;
use crate::content::{Collection, ContentStore};
use crate::export::{export_filename, export_json};

use super::event::{Anchor, Effect, Event, Task, TaskKind};
use super::history::HistoryEntry;
use super::notice::{self, Notice, NoticeLevel};
use super::search::{normalize_query, search};
use super::state::{Embed, Player, UiState};

/// Read-only inputs shared by every transition.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub store: &'a ContentStore,
    pub config: &'a SiteConfig,
}

pub fn transition(ctx: &ViewContext<'_>, state: &UiState, event: Event) -> (UiState, Vec<Effect>) {
    let mut step = Step {
        ctx,
        state: state.clone(),
        effects: Vec::new(),
    };
    step.apply(event);
    (step.state, step.effects)
}

/// How an open request records itself in history.
#[derive(Clone, Copy)]
enum HistoryMode {
    Push,
    Replace,
    Keep,
}

struct Step<'c, 'a> {
    ctx: &'c ViewContext<'a>,
    state: UiState,
    effects: Vec<Effect>,
}

impl Step<'_, '_> {
    fn apply(&mut self, event: Event) {
        match event {
            Event::Load { query } => self.load(query.as_deref()),
            Event::SelectVideo(id) => self.open(&id, HistoryMode::Push),
            Event::Back => self.close(true),
            Event::Escape => {
                if self.state.player.is_open() {
                    self.close(true);
                } else {
                    self.state.menu_open = false;
                }
            }
            Event::Navigate(anchor) => self.navigate(anchor),
            Event::PopState(entry) => self.pop_state(entry),
            Event::EmbedFailed => {
                if let Player::Open { embed, .. } = &mut self.state.player {
                    *embed = Embed::Refused;
                }
            }
            Event::ToggleShowAll(collection) => self.toggle_show_all(collection),
            Event::Resize(width) => self.resize(width),
            Event::SearchInput(raw) => self.search_input(raw),
            Event::SearchSubmit(raw) => {
                self.effects.push(Effect::Cancel(TaskKind::DebouncedSearch));
                self.run_search(&raw);
            }
            Event::Export { today } => self.export(today),
            Event::ToggleMenu => self.state.menu_open = !self.state.menu_open,
            Event::TaskFired(task) => self.task_fired(task),
        }
    }

    fn load(&mut self, query: Option<&str>) {
        let entry = HistoryEntry::from_query(query.unwrap_or(""));
        // Unknown ids are ignored without a notice.
        if let Some(id) = entry.video
            && self.ctx.store.find_video(&id).is_some()
        {
            self.effects.push(Effect::Schedule {
                task: Task::AutoOpen(id),
                delay: self.ctx.config.timing.auto_open_delay(),
            });
        }
    }

    fn open(&mut self, id: &str, history: HistoryMode) {
        let Some(video) = self.ctx.store.find_video(id) else {
            return;
        };
        if self.state.player.video() == Some(video.external_id.as_str()) {
            return;
        }
        self.effects.push(Effect::Cancel(TaskKind::AutoOpen));
        if self.state.player == Player::Closing {
            self.effects.push(Effect::Cancel(TaskKind::RemovePlayer));
        }
        if self.state.focused.is_some_and(|c| c != Collection::Videos) {
            self.state.focused = None;
        }
        self.state.player = Player::Open {
            video: video.external_id.clone(),
            embed: Embed::Requested,
        };
        self.state.menu_open = false;
        let entry = HistoryEntry::open(&video.external_id);
        match history {
            HistoryMode::Push => self.effects.push(Effect::PushHistory(entry)),
            HistoryMode::Replace => self.effects.push(Effect::ReplaceHistory(entry)),
            HistoryMode::Keep => {}
        }
        self.effects
            .push(Effect::ScrollTo(Anchor::Section(Collection::Videos)));
    }

    /// Close an open player. `rewrite_history` clears the video from the
    /// current history entry; back/forward navigation passes `false`.
    fn close(&mut self, rewrite_history: bool) {
        self.effects.push(Effect::Cancel(TaskKind::AutoOpen));
        if !self.state.player.is_open() {
            return;
        }
        self.state.player = Player::Closing;
        self.effects.push(Effect::StopPlayback);
        self.effects.push(Effect::Schedule {
            task: Task::RemovePlayer,
            delay: self.ctx.config.timing.player_close_delay(),
        });
        if rewrite_history {
            self.effects
                .push(Effect::ReplaceHistory(HistoryEntry::closed()));
        }
    }

    fn navigate(&mut self, anchor: Anchor) {
        self.state.menu_open = false;
        if anchor != Anchor::Section(Collection::Videos) {
            self.close(true);
        }
        if let Some(focused) = self.state.focused
            && anchor != Anchor::Section(focused)
        {
            self.collapse();
        }
        self.effects.push(Effect::ScrollTo(anchor));
    }

    fn pop_state(&mut self, entry: HistoryEntry) {
        match entry.video {
            Some(id) if self.ctx.store.find_video(&id).is_some() => {
                self.open(&id, HistoryMode::Keep)
            }
            _ => self.close(false),
        }
    }

    fn toggle_show_all(&mut self, collection: Collection) {
        match self.state.focused {
            Some(focused) if focused == collection => self.collapse(),
            // Hidden sections have no reachable control.
            Some(_) => return,
            None => {
                if collection == Collection::Videos && self.state.player.is_open() {
                    return;
                }
                if collection != Collection::Videos {
                    self.close(true);
                }
                self.state.filter = None;
                self.state.focused = Some(collection);
            }
        }
        self.effects
            .push(Effect::ScrollTo(Anchor::Section(collection)));
    }

    /// Leave focus mode and restore the default per-section limits.
    fn collapse(&mut self) {
        self.state.focused = None;
        self.state.filter = None;
        self.state.collapsed_limit = self
            .ctx
            .config
            .layout
            .collapsed_limit(self.state.viewport_width);
    }

    fn resize(&mut self, width: u32) {
        self.state.viewport_width = width;
        if self.state.focused.is_none() && !self.state.player.is_open() {
            self.state.collapsed_limit = self.ctx.config.layout.collapsed_limit(width);
        }
    }

    fn search_input(&mut self, raw: String) {
        self.effects.push(Effect::Cancel(TaskKind::DebouncedSearch));
        if raw.chars().count() >= self.ctx.config.search.auto_search_chars {
            self.effects.push(Effect::Schedule {
                task: Task::DebouncedSearch(raw),
                delay: self.ctx.config.search.debounce(),
            });
        }
    }

    fn run_search(&mut self, raw: &str) {
        let query = normalize_query(raw);
        let min = self.ctx.config.search.min_query_chars;
        if query.chars().count() < min {
            self.notify(NoticeLevel::Info, notice::query_too_short(min));
            return;
        }

        let results = search(self.ctx.store, &query);
        match results.first_collection() {
            Some(first) => {
                self.close(true);
                self.state.focused = None;
                self.notify(NoticeLevel::Success, notice::matches_found(results.len()));
                self.state.filter = Some(results);
                self.effects.push(Effect::ScrollTo(Anchor::Section(first)));
            }
            None => self.notify(NoticeLevel::Info, notice::NO_MATCHES.to_string()),
        }
        self.effects.push(Effect::ClearSearchField);
    }

    fn export(&mut self, today: chrono::NaiveDate) {
        match export_json(self.ctx.store) {
            Ok(contents) => {
                self.effects.push(Effect::Download {
                    filename: export_filename(&self.ctx.config.export.filename_prefix, today),
                    contents,
                });
                self.notify(NoticeLevel::Success, notice::EXPORT_OK.to_string());
            }
            Err(_) => self.notify(NoticeLevel::Error, notice::EXPORT_FAILED.to_string()),
        }
    }

    fn task_fired(&mut self, task: Task) {
        match task {
            Task::AutoOpen(id) => {
                if !self.state.player.is_open() {
                    self.open(&id, HistoryMode::Replace);
                }
            }
            Task::DebouncedSearch(raw) => self.run_search(&raw),
            Task::RemovePlayer => {
                if self.state.player == Player::Closing {
                    self.state.player = Player::Closed;
                }
            }
            Task::DismissNotice(id) => self.state.notices.retain(|n| n.id != id),
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        let id = self.state.next_notice_id;
        self.state.next_notice_id += 1;
        self.state.notices.push(Notice { id, level, message });
        self.effects.push(Effect::Schedule {
            task: Task::DismissNotice(id),
            delay: self.ctx.config.timing.notice_dismiss(),
        });
    }
}
