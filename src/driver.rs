//! FTRMFF Driver (spec component D): Fault-Tolerant Rate-Monotonic
//! First-Fit, enhanced.
//!
//! The outer loop: sort tasks by period, place each primary on the
//! first acceptable processor, then place its `k` backups on `k`
//! other processors ranked by achieved WCRT, committing a task's
//! primary and all of its backups atomically or not at all (spec
//! §4.D).

use std::collections::HashSet;

use crate::error::{Divergence, Error, InputError};
use crate::evaluator::{self, Candidate};
use crate::processor::{Entry, ProcessorId};
use crate::schedule::{Schedule, ScheduleProgress};
use crate::task::{priority_order, Role, Task};
use crate::time::Duration;

/// The result of a successful scheduling run: the committed schedule
/// plus diagnostics for every task that could not be placed (spec §6).
#[derive(Clone, Debug)]
pub struct SchedulingOutcome {
    pub schedule: Schedule,
    pub unscheduled_tasks: Vec<ScheduleProgress>,
}

/// Run the fault-tolerant rate-monotonic first-fit (enhanced)
/// algorithm over `tasks`, placing one primary and `k` backups of
/// each on distinct processors drawn from `processors`.
///
/// This is the crate's only entry point. It is a pure function: it
/// owns its inputs for the duration of the call, performs no I/O, and
/// never blocks or suspends (spec §5). It is deterministic -- equal
/// inputs always produce byte-for-byte equal outputs (spec P5) -- and
/// it never retries internally, since retrying a deterministic
/// computation would only reproduce the same result (spec §7).
///
/// Invalid input (spec §7.1) is rejected up front, before any
/// scheduling work and with no partial output. An individual task
/// that cannot be placed is *not* an error: it is recorded in
/// [`SchedulingOutcome::unscheduled_tasks`] and scheduling continues
/// with the rest of the batch (spec §7.2). Only a response-time
/// iteration that fails to converge (spec §7.3) aborts the whole run
/// with `Err`.
pub fn schedule(
    tasks: Vec<Task>,
    processor_ids: Vec<ProcessorId>,
    k: u32,
) -> Result<SchedulingOutcome, Error> {
    validate(&tasks, &processor_ids, k)?;

    let mut global = Schedule::new(&processor_ids);
    let mut unscheduled = Vec::new();

    let mut sorted_tasks = tasks;
    sorted_tasks.sort_by(priority_order);

    for task in &sorted_tasks {
        match place_task(task, &processor_ids, &mut global, k)
            .map_err(|Divergence| Error::Divergence {
                task_id: task.id.clone(),
            })? {
            Placed::Scheduled => {}
            Placed::Unschedulable(progress) => unscheduled.push(progress),
        }
    }

    Ok(SchedulingOutcome {
        schedule: global,
        unscheduled_tasks: unscheduled,
    })
}

/// Validate inputs per spec §7.1: negative/zero period, WCET > period
/// or WCET <= 0, duplicate task ids, or an empty processor list.
///
/// A `k` too large for the given processor count is deliberately *not*
/// rejected here (unlike the other checks, it does not invalidate the
/// batch as a whole): spec §8's single-processor, `k=1` example expects
/// the affected task to come back as an ordinary unschedulable result,
/// not a fail-fast error. [`place_task`] reports it structurally
/// instead, as `ScheduleProgress { stage: 0 }`.
fn validate(tasks: &[Task], processors: &[ProcessorId], _k: u32) -> Result<(), InputError> {
    if processors.is_empty() {
        return Err(InputError::EmptyProcessorList);
    }

    let mut seen = HashSet::new();
    for t in tasks {
        if t.period <= 0.0 {
            return Err(InputError::NonPositivePeriod {
                task_id: t.id.clone(),
                period: t.period,
            });
        }
        if t.wcet <= 0.0 {
            return Err(InputError::NonPositiveWcet {
                task_id: t.id.clone(),
                wcet: t.wcet,
            });
        }
        if t.wcet > t.period {
            return Err(InputError::WcetExceedsPeriod {
                task_id: t.id.clone(),
                wcet: t.wcet,
                period: t.period,
            });
        }
        if !seen.insert(&t.id) {
            return Err(InputError::DuplicateTaskId {
                task_id: t.id.clone(),
            });
        }
    }
    Ok(())
}

enum Placed {
    Scheduled,
    Unschedulable(ScheduleProgress),
}

fn entry_for(task: &Task, role: Role) -> Entry {
    Entry {
        task_id: task.id.clone(),
        period: task.period,
        wcet: task.wcet,
        role,
    }
}

/// Place one task's primary and all `k` backups, or report how far
/// placement got (spec §4.D steps a-c).
fn place_task(
    task: &Task,
    processor_ids: &[ProcessorId],
    schedule: &mut Schedule,
    k: u32,
) -> Result<Placed, Divergence> {
    // There is no point even searching for a primary if the processor
    // count can never support a primary plus `k` distinct backups: the
    // task is unschedulable as a unit, reported the same way a primary
    // that fits nowhere would be (spec §4.D step a/c, §8).
    if processor_ids.len() <= k as usize {
        return Ok(Placed::Unschedulable(ScheduleProgress {
            task_id: task.id.clone(),
            stage: 0,
        }));
    }

    // Step a: place the primary on the first acceptable processor, in
    // insertion order.
    let mut primary_processor = None;
    for pid in processor_ids {
        let outcome = evaluator::evaluate(&Candidate::primary(task), pid, processor_ids, schedule, k)?;
        if outcome.acceptable {
            primary_processor = Some(pid.clone());
            break;
        }
    }

    let primary_processor = match primary_processor {
        Some(p) => p,
        None => {
            return Ok(Placed::Unschedulable(ScheduleProgress {
                task_id: task.id.clone(),
                stage: 0,
            }))
        }
    };

    if k == 0 {
        schedule.commit(&primary_processor, entry_for(task, Role::Primary));
        return Ok(Placed::Scheduled);
    }

    // Stage the primary in a scratch copy of the schedule so that
    // backup evaluation sees it (a backup only activates once its
    // primary's host is known), without committing anything to the
    // real schedule until the whole task succeeds (spec §4.D step c).
    let mut staged = schedule.clone();
    staged.commit(&primary_processor, entry_for(task, Role::Primary));

    // Step b: evaluate every other processor as a backup candidate,
    // collect the acceptable ones with their achieved WCRT, and rank
    // by ascending WCRT with processor-insertion-index tie-breaks
    // (spec §4.D, §9).
    let mut candidates: Vec<(ProcessorId, Duration)> = Vec::new();
    for pid in processor_ids {
        if *pid == primary_processor {
            continue;
        }
        let outcome =
            evaluator::evaluate(&Candidate::backup(task, 0), pid, processor_ids, &staged, k)?;
        if outcome.acceptable {
            candidates.push((pid.clone(), outcome.wcrt));
        }
    }
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if (candidates.len() as u32) < k {
        return Ok(Placed::Unschedulable(ScheduleProgress {
            task_id: task.id.clone(),
            stage: 1 + candidates.len() as u32,
        }));
    }

    // Commit atomically: the primary and all k backups, ranked 1..=k
    // in ascending-WCRT (most-preferred-first) order.
    schedule.commit(&primary_processor, entry_for(task, Role::Primary));
    for (rank, (pid, _wcrt)) in candidates.into_iter().take(k as usize).enumerate() {
        schedule.commit(
            &pid,
            entry_for(
                task,
                Role::Backup {
                    rank: rank as u32 + 1,
                    primary: task.id.clone(),
                },
            ),
        );
    }

    Ok(Placed::Scheduled)
}
