//! Virtual clock and task queue
//!
//! Deferred calls and animation completions are queued with a due time on a
//! virtual clock that only moves when the host is told to advance. Tasks run in
//! due order; ties run in the order they were queued.

use std::time::Duration;

use humble_platform::{Callback, TimerId, ViewId};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

/// What a queued task represents
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskKind {
    /// A `Scheduler::schedule` call
    Deferred,
    /// The end of an opacity animation
    Animation { view: ViewId, target: f32 },
}

/// A queued task
pub struct Task {
    pub due: Duration,
    seq: u64,
    pub kind: TaskKind,
    /// Set when a newer animation on the same view took over
    pub interrupted: bool,
    pub callback: Callback,
}

/// Queue of tasks ordered by due time
#[derive(Default)]
pub struct TaskQueue {
    now: Duration,
    next_seq: u64,
    tasks: SlotMap<TimerId, Task>,
    /// In-flight animation per view
    animations: FxHashMap<ViewId, TimerId>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task `delay` from now
    pub fn push(&mut self, delay: Duration, kind: TaskKind, callback: Callback) -> TimerId {
        let seq = self.bump_seq();
        let id = self.tasks.insert(Task {
            due: self.now + delay,
            seq,
            kind,
            interrupted: false,
            callback,
        });

        if let TaskKind::Animation { view, .. } = kind {
            if let Some(previous) = self.animations.insert(view, id) {
                self.interrupt(previous);
            }
        }
        id
    }

    /// Drop a pending task without running it
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.tasks.remove(id) {
            Some(task) => {
                self.forget_animation(id, task.kind);
                true
            }
            None => false,
        }
    }

    /// Remove the earliest task due at or before `limit`, moving the clock to it
    pub fn pop_due(&mut self, limit: Duration) -> Option<Task> {
        let id = self.earliest().filter(|id| self.tasks[*id].due <= limit)?;
        self.take(id)
    }

    /// Remove the earliest task whatever its due time, moving the clock to it
    pub fn pop_next(&mut self) -> Option<Task> {
        let id = self.earliest()?;
        self.take(id)
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending deferred calls, animations excluded
    pub fn deferred_count(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| task.kind == TaskKind::Deferred)
            .count()
    }

    /// Pending animation on a view
    pub fn animation_for(&self, view: ViewId) -> Option<&Task> {
        self.animations.get(&view).and_then(|id| self.tasks.get(*id))
    }

    fn earliest(&self) -> Option<TimerId> {
        self.tasks
            .iter()
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(id, _)| id)
    }

    fn take(&mut self, id: TimerId) -> Option<Task> {
        let task = self.tasks.remove(id)?;
        self.forget_animation(id, task.kind);
        self.now = self.now.max(task.due);
        Some(task)
    }

    fn interrupt(&mut self, id: TimerId) {
        let now = self.now;
        let seq = self.bump_seq();
        if let Some(task) = self.tasks.get_mut(id) {
            task.interrupted = true;
            task.due = now;
            task.seq = seq;
            tracing::trace!("interrupted animation {:?}", task.kind);
        }
    }

    fn forget_animation(&mut self, id: TimerId, kind: TaskKind) {
        if let TaskKind::Animation { view, .. } = kind {
            if self.animations.get(&view) == Some(&id) {
                self.animations.remove(&view);
            }
        }
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback {
        Box::new(|| {})
    }

    fn view() -> ViewId {
        let mut views: SlotMap<ViewId, ()> = SlotMap::with_key();
        views.insert(())
    }

    #[test]
    fn test_due_order_then_queue_order() {
        let mut queue = TaskQueue::new();
        queue.push(Duration::from_secs(2), TaskKind::Deferred, noop());
        queue.push(Duration::from_secs(1), TaskKind::Deferred, noop());
        queue.push(Duration::from_secs(1), TaskKind::Deferred, noop());

        let order: Vec<Duration> = std::iter::from_fn(|| queue.pop_next())
            .map(|task| task.due)
            .collect();
        assert_eq!(
            order,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(1),
                Duration::from_secs(2)
            ]
        );
        assert_eq!(queue.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_pop_due_respects_limit() {
        let mut queue = TaskQueue::new();
        queue.push(Duration::from_secs(3), TaskKind::Deferred, noop());

        assert!(queue.pop_due(Duration::from_secs(2)).is_none());
        assert_eq!(queue.now(), Duration::ZERO);
        assert!(queue.pop_due(Duration::from_secs(3)).is_some());
        assert_eq!(queue.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TaskQueue::new();
        let id = queue.push(Duration::from_secs(1), TaskKind::Deferred, noop());

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_new_animation_interrupts_previous() {
        let mut queue = TaskQueue::new();
        let view = view();
        queue.push(
            Duration::from_millis(500),
            TaskKind::Animation { view, target: 1.0 },
            noop(),
        );
        queue.advance_to(Duration::from_millis(200));
        queue.push(
            Duration::from_millis(500),
            TaskKind::Animation { view, target: 0.0 },
            noop(),
        );

        let interrupted = queue.pop_due(Duration::from_millis(200)).unwrap();
        assert!(interrupted.interrupted);
        assert_eq!(interrupted.kind, TaskKind::Animation { view, target: 1.0 });

        let current = queue.animation_for(view).unwrap();
        assert!(!current.interrupted);
        assert_eq!(current.due, Duration::from_millis(700));
    }
}
