//! Scheduled tasks with cancellation tokens
//!
//! Stands in for requestAnimationFrame/setTimeout: the host only supplies
//! timestamps, and everything that should happen "later" is a task here that
//! can be cancelled by its id.

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Advance the clock on the next frame
    AnimationFrame,
    /// Periodic spawn attempt
    SpawnTimer,
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due_ms: f64,
    task: Task,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: Task, due_ms: f64) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.pending.push(Scheduled { id, due_ms, task });
        id
    }

    /// Cancel a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task due at `now_ms`, earliest first (ties by id).
    ///
    /// Tasks scheduled while the batch is being handled wait for the next call.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<(TaskId, Task)> {
        let (mut due, pending): (Vec<Scheduled>, Vec<Scheduled>) = self
            .pending
            .drain(..)
            .partition(|s| s.due_ms <= now_ms);
        self.pending = pending;
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        due.into_iter().map(|s| (s.id, s.task)).collect()
    }
}
