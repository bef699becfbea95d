use crate::runtime::event::FormEvent;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const SUBMISSION_TIMER: &str = "form.submission";
pub const RESET_TIMER: &str = "form.reset";

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerCommand {
    EmitAfter {
        key: String,
        delay: Duration,
        event: FormEvent,
    },
    Cancel {
        key: String,
    },
    /// Disarms every pending task.
    CancelAll,
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    guard: Guard,
    event: FormEvent,
}

/// One-shot delayed events. A keyed task fires only if its key was not
/// cancelled after it was scheduled.
#[derive(Debug, Default)]
pub struct Scheduler {
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key.clone()).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
            SchedulerCommand::CancelAll => {
                self.delayed.clear();
            }
        }
    }

    /// Returns due events in the order they became due.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<FormEvent> {
        let mut due = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                due.push(self.delayed.swap_remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|task| task.due_at);

        due.into_iter()
            .filter(|task| self.task_is_valid(task))
            .map(|task| task.event)
            .collect()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    pub fn pending(&self) -> usize {
        self.delayed.len()
    }

    fn task_is_valid(&self, task: &DelayedTask) -> bool {
        let guard = &task.guard;
        let current = *self.key_versions.get(&guard.key).unwrap_or(&0);
        current == guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
