//! Placement Evaluator (spec component C).
//!
//! Decides whether a candidate (task, role) placement on a given
//! processor survives every relevant failure scenario, and reports
//! the worst-case WCRT observed across those scenarios.
//!
//! ## Backup activation: a conservative simplification
//!
//! Spec §4.B says that only the *lowest-ranked surviving* backup of a
//! failed primary is promoted to active status. Determining that
//! precisely during evaluation would require already knowing the
//! final rank order of a task's backups -- which spec §4.D only
//! settles *after* every backup candidate has been evaluated and
//! ranked by achieved WCRT, a circular dependency.
//!
//! This evaluator instead treats a backup as active in a scenario
//! whenever its own processor survives and its primary's processor
//! does not, regardless of the status of the task's other backups.
//! This is a safe over-approximation: the true active set on any
//! given processor is always a subset of what this rule assumes, so
//! anything accepted here remains schedulable under the precise rule
//! too. Rank is still computed and recorded (spec §4.D, ascending
//! WCRT with processor-insertion-index tie-breaks) -- it just does
//! not feed back into the activation condition used here.

use crate::error::Divergence;
use crate::processor::{Entry, ProcessorId};
use crate::rta::{self, Interference};
use crate::schedule::Schedule;
use crate::scenario::{self, FailureScenario};
use crate::task::{Role, Task, TaskId};
use crate::time::Duration;

/// A placement under consideration: either the PRIMARY of a
/// not-yet-placed task, or one of its BACKUP slots.
#[derive(Clone, Debug)]
pub struct Candidate<'a> {
    pub task: &'a Task,
    pub role: Role,
}

impl<'a> Candidate<'a> {
    pub fn primary(task: &'a Task) -> Self {
        Candidate {
            task,
            role: Role::Primary,
        }
    }

    /// A backup candidate. `rank` is purely a label at evaluation
    /// time (see the module-level doc comment); the driver assigns
    /// the final rank only after ranking all acceptable candidates by
    /// WCRT.
    pub fn backup(task: &'a Task, rank: u32) -> Self {
        Candidate {
            task,
            role: Role::Backup {
                rank,
                primary: task.id.clone(),
            },
        }
    }

    fn is_active_in(&self, scenario: &FailureScenario) -> bool {
        match &self.role {
            Role::Primary => true,
            Role::Backup { .. } => scenario.promoted.contains(&self.task.id),
        }
    }
}

fn entry_active_in(entry: &Entry, scenario: &FailureScenario) -> bool {
    match &entry.role {
        Role::Primary => true,
        Role::Backup { .. } => scenario.promoted.contains(&entry.task_id),
    }
}

/// Rate-monotonic priority order, tie-broken by task identity (spec
/// §4.A, §9): `true` iff the task keyed by `(period, id)` has strictly
/// higher priority than -- and therefore interferes with -- the task
/// keyed by `(other_period, other_id)`. Equal periods are not a tie
/// that drops interference; they are broken by `TaskId` so that two
/// same-period tasks still interfere with each other deterministically.
fn has_priority_over(period: Duration, id: &TaskId, other_period: Duration, other_id: &TaskId) -> bool {
    (period, id) < (other_period, other_id)
}

/// The outcome of evaluating a candidate placement (spec §4.C).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementOutcome {
    pub wcrt: Duration,
    pub acceptable: bool,
}

/// Evaluate whether `candidate` may be placed on `processor`, given
/// everything already committed in `schedule`, under every relevant
/// failure scenario for consistency level `k` (spec §4.C).
pub fn evaluate(
    candidate: &Candidate,
    processor: &ProcessorId,
    processors: &[ProcessorId],
    schedule: &Schedule,
    k: u32,
) -> Result<PlacementOutcome, Divergence> {
    // A task may not appear twice on the same processor, whether as
    // primary or backup (spec §3 invariant, §4.C tie-break).
    if schedule.entry(processor).hosts(&candidate.task.id) {
        return Ok(PlacementOutcome {
            wcrt: 0.0,
            acceptable: false,
        });
    }

    let mut worst_wcrt: Duration = 0.0;

    for scenario in scenario::scenarios(processors, schedule, k) {
        if scenario.has_failed(processor) {
            // The processor itself is down in this scenario; nothing
            // runs here, so it is vacuously fine.
            continue;
        }

        let resident_entries = schedule.entry(processor).entries();
        let active_residents: Vec<&Entry> = resident_entries
            .iter()
            .filter(|e| entry_active_in(e, &scenario))
            .collect();

        if candidate.is_active_in(&scenario) {
            let interference: Vec<Interference> = active_residents
                .iter()
                .filter(|e| has_priority_over(e.period, &e.task_id, candidate.task.period, &candidate.task.id))
                .map(|e| Interference {
                    period: e.period,
                    wcet: e.wcet,
                })
                .collect();

            match rta::wcrt(candidate.task.period, candidate.task.wcet, &interference)? {
                Some(r) => worst_wcrt = worst_wcrt.max(r),
                None => {
                    return Ok(PlacementOutcome {
                        wcrt: worst_wcrt,
                        acceptable: false,
                    })
                }
            }

            // The candidate may add interference to already-resident,
            // lower-priority active tasks; re-verify that each of
            // them still meets its deadline (spec §4.C step 2).
            for resident in &active_residents {
                if !has_priority_over(
                    candidate.task.period,
                    &candidate.task.id,
                    resident.period,
                    &resident.task_id,
                ) {
                    continue; // candidate is not higher priority than `resident`
                }
                let mut resident_interference: Vec<Interference> = active_residents
                    .iter()
                    .filter(|e| {
                        e.task_id != resident.task_id
                            && has_priority_over(e.period, &e.task_id, resident.period, &resident.task_id)
                    })
                    .map(|e| Interference {
                        period: e.period,
                        wcet: e.wcet,
                    })
                    .collect();
                resident_interference.push(Interference {
                    period: candidate.task.period,
                    wcet: candidate.task.wcet,
                });

                if rta::wcrt(resident.period, resident.wcet, &resident_interference)?.is_none() {
                    return Ok(PlacementOutcome {
                        wcrt: worst_wcrt,
                        acceptable: false,
                    });
                }
            }
        }
        // If the candidate is inactive in this scenario it adds no
        // interference and cannot threaten a resident's deadline;
        // residents were already verified schedulable when they were
        // committed (spec §5: placements are only ever grown, never
        // retracted or re-evaluated against a shrinking guarantee).
    }

    Ok(PlacementOutcome {
        wcrt: worst_wcrt,
        acceptable: true,
    })
}
