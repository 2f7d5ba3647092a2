//! Task descriptors and the rate-monotonic priority order over them.

use std::cmp::Ordering;
use std::fmt;

use crate::time::Duration;

/// Opaque task identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::new(s)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::new(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task's role in the schedule (spec §3): exactly one [`Role::Primary`]
/// and `k` [`Role::Backup`] placements exist for every scheduled task.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    /// A passive backup replica. `rank` is 1-based; rank 1 is the
    /// most preferred of a task's backups, rank `k` the last resort
    /// (spec §4.B). `primary` names the task whose primary this backup
    /// shadows -- always the same task this `Role` is attached to via
    /// its enclosing [`crate::processor::Entry::task_id`], carried here
    /// too because the data model names it as a field in its own
    /// right, not merely derivable from context.
    Backup { rank: u32, primary: TaskId },
}

impl Role {
    pub fn is_primary(&self) -> bool {
        matches!(self, Role::Primary)
    }

    pub fn rank(&self) -> Option<u32> {
        match self {
            Role::Primary => None,
            Role::Backup { rank, .. } => Some(*rank),
        }
    }
}

/// A periodic real-time task under the implicit-deadline model
/// (deadline == period, spec §3).
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub period: Duration,
    pub wcet: Duration,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, period: Duration, wcet: Duration) -> Self {
        Task {
            id: id.into(),
            period,
            wcet,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.period
    }
}

/// Rate-monotonic priority order: a shorter period means a higher
/// priority. Equal periods are broken by [`TaskId`] so that sorting a
/// task set is deterministic regardless of input order (spec §4.A,
/// §9: "stable identity ordering").
pub fn priority_order(a: &Task, b: &Task) -> Ordering {
    a.period
        .partial_cmp(&b.period)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}
