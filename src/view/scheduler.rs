//! Cancellable deferred tasks on a virtual clock.
//!
//! Time only moves when [`Controller::advance`](super::Controller::advance)
//! drains due tasks, which keeps the controller deterministic under test.
//! Scheduling a task replaces any pending task of the same [`TaskKind`], so a
//! new keystroke supersedes the previous debounced search and a reopened
//! player supersedes its pending removal.

use std::time::Duration;

use super::event::{Task, TaskKind};

#[derive(Debug, Clone)]
struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, task: Task, delay: Duration) {
        self.cancel(task.kind());
        self.seq += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.seq,
            task,
        });
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.pending.retain(|p| p.task.kind() != kind);
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.iter().any(|p| p.task.kind() == kind)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.pending.iter().map(|p| &p.task)
    }

    /// Remove and return the earliest task due at or before `deadline`,
    /// moving the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Task> {
        let (i, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= deadline)
            .min_by_key(|(_, p)| (p.due, p.seq))?;
        let pending = self.pending.remove(i);
        self.now = self.now.max(pending.due);
        Some(pending.task)
    }

    /// Move the clock forward to `deadline` without firing anything.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(Task::DismissNotice(1), ms(5000));
        s.schedule(Task::RemovePlayer, ms(300));
        assert_eq!(s.pop_due(ms(10_000)), Some(Task::RemovePlayer));
        assert_eq!(s.now(), ms(300));
        assert_eq!(s.pop_due(ms(10_000)), Some(Task::DismissNotice(1)));
        assert_eq!(s.pop_due(ms(10_000)), None);
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule(Task::RemovePlayer, ms(300));
        assert_eq!(s.pop_due(ms(299)), None);
        assert!(s.is_pending(TaskKind::RemovePlayer));
    }

    #[test]
    fn rescheduling_replaces_same_kind() {
        let mut s = Scheduler::new();
        s.schedule(Task::DebouncedSearch("phy".into()), ms(500));
        s.settle(ms(200));
        s.schedule(Task::DebouncedSearch("phys".into()), ms(500));
        assert_eq!(s.pending().count(), 1);
        assert_eq!(s.pop_due(ms(600)), None);
        assert_eq!(
            s.pop_due(ms(700)),
            Some(Task::DebouncedSearch("phys".into()))
        );
    }

    #[test]
    fn cancel_drops_only_that_kind() {
        let mut s = Scheduler::new();
        s.schedule(Task::AutoOpen("abc".into()), ms(500));
        s.schedule(Task::DismissNotice(1), ms(500));
        s.schedule(Task::DismissNotice(2), ms(500));
        s.cancel(TaskKind::AutoOpen);
        s.cancel(TaskKind::DismissNotice(1));
        let left: Vec<&Task> = s.pending().collect();
        assert_eq!(left, vec![&Task::DismissNotice(2)]);
    }

    #[test]
    fn delays_are_relative_to_the_clock() {
        let mut s = Scheduler::new();
        s.settle(ms(1000));
        s.schedule(Task::RemovePlayer, ms(300));
        assert_eq!(s.pop_due(ms(1299)), None);
        assert_eq!(s.pop_due(ms(1300)), Some(Task::RemovePlayer));
    }
}
