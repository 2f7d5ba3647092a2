//! Processor identity and the per-processor schedule entry (spec §3).

use std::cmp::Ordering;
use std::fmt;

use crate::task::{Role, TaskId};
use crate::time::Duration;

/// Opaque processor identity. Carries no intrinsic attributes; its
/// state is entirely defined by which task-roles are assigned to it
/// (spec §3).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessorId(String);

impl ProcessorId {
    pub fn new(id: impl Into<String>) -> Self {
        ProcessorId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessorId {
    fn from(s: &str) -> Self {
        ProcessorId::new(s)
    }
}

impl From<String> for ProcessorId {
    fn from(s: String) -> Self {
        ProcessorId::new(s)
    }
}

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One task-role committed to a processor.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub task_id: TaskId,
    pub period: Duration,
    pub wcet: Duration,
    pub role: Role,
}

/// The ordered (ascending period, i.e. rate-monotonic) sequence of
/// task-roles committed to one processor.
///
/// Invariant: no task appears twice on the same processor, whether as
/// primary or backup (spec §3).
#[derive(Clone, Debug, Default)]
pub struct ScheduleEntry {
    entries: Vec<Entry>,
}

impl ScheduleEntry {
    pub fn new() -> Self {
        ScheduleEntry {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn hosts(&self, task_id: &TaskId) -> bool {
        self.entries.iter().any(|e| &e.task_id == task_id)
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        debug_assert!(
            !self.hosts(&entry.task_id),
            "task {} already hosted on this processor",
            entry.task_id
        );
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            a.period
                .partial_cmp(&b.period)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });
    }
}

/// The caller-supplied processor list, preserving insertion order.
///
/// Insertion order is the deterministic tie-break used throughout the
/// driver (spec §9's resolved Open Question: ties among equally
/// ranked candidates are broken by processor insertion index).
#[derive(Clone, Debug)]
pub struct Processors {
    ids: Vec<ProcessorId>,
}

impl Processors {
    pub fn new(ids: Vec<ProcessorId>) -> Self {
        Processors { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate processors in insertion order, paired with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ProcessorId)> {
        self.ids.iter().enumerate()
    }

    pub fn index_of(&self, id: &ProcessorId) -> Option<usize> {
        self.ids.iter().position(|p| p == id)
    }

    pub fn ids(&self) -> &[ProcessorId] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, period: Duration, role: Role) -> Entry {
        Entry {
            task_id: TaskId::new(id),
            period,
            wcet: 1.0,
            role,
        }
    }

    #[test]
    fn entries_are_kept_in_rate_monotonic_order() {
        let mut se = ScheduleEntry::new();
        se.insert(entry("low-prio", 30.0, Role::Primary));
        se.insert(entry("high-prio", 10.0, Role::Primary));
        se.insert(entry("mid-prio", 20.0, Role::Primary));
        let periods: Vec<Duration> = se.entries().iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn hosts_detects_existing_task() {
        let mut se = ScheduleEntry::new();
        se.insert(entry("a", 10.0, Role::Primary));
        assert!(se.hosts(&TaskId::new("a")));
        assert!(!se.hosts(&TaskId::new("b")));
    }

    #[test]
    fn processors_preserve_insertion_order_for_tie_breaking() {
        let ps = Processors::new(vec![
            ProcessorId::new("p3"),
            ProcessorId::new("p1"),
            ProcessorId::new("p2"),
        ]);
        assert_eq!(ps.index_of(&ProcessorId::new("p1")), Some(1));
        assert_eq!(ps.index_of(&ProcessorId::new("p2")), Some(2));
        assert_eq!(ps.index_of(&ProcessorId::new("p3")), Some(0));
    }
}
