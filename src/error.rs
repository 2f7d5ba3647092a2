//! The three error kinds of spec §7.
//!
//! Unschedulability of an individual task is *not* one of them: it is
//! an ordinary outcome reported structurally via
//! [`crate::schedule::ScheduleProgress`], never as an `Err`.

use thiserror::Error;

use crate::task::TaskId;

/// Kind 1 (spec §7.1): invalid input, detected before any scheduling
/// work is performed. No partial output is ever returned alongside
/// one of these -- see [`crate::driver::schedule`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("task {task_id} has a non-positive period ({period})")]
    NonPositivePeriod { task_id: TaskId, period: f64 },

    #[error("task {task_id} has a non-positive WCET ({wcet})")]
    NonPositiveWcet { task_id: TaskId, wcet: f64 },

    #[error("task {task_id} has WCET {wcet} exceeding its period {period}")]
    WcetExceedsPeriod {
        task_id: TaskId,
        wcet: f64,
        period: f64,
    },

    #[error("duplicate task id {task_id}")]
    DuplicateTaskId { task_id: TaskId },

    #[error("processor list is empty")]
    EmptyProcessorList,
}

/// The response-time fixed-point iteration failed to converge within
/// its safety bound (spec §4.A, §7.3). Carries no data of its own;
/// callers that need to know *which* task triggered it attach that
/// context when converting to [`Error`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("response-time iteration did not converge within the safety bound")]
pub struct Divergence;

/// Kind 3 (spec §7.3): an internal invariant violation. Reported as a
/// fatal scheduler error; the caller receives no schedule at all, not
/// even a partial one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Kind 1, forwarded unchanged (spec §7.1).
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// Kind 3 (spec §7.3).
    #[error("response-time iteration for task {task_id} did not converge within the safety bound")]
    Divergence { task_id: TaskId },
}
