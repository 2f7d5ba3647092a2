//! Failure-Scenario Enumerator (spec component B).
//!
//! Yields every distinct subset of up to `k` concurrently failed
//! processors, together with the set of tasks whose primary is hosted
//! there (and so must be promoted to a surviving backup).
//!
//! Per spec §9's resolved Open Question, *every* `|F| <= k` subset of
//! the full processor list is enumerated here, not only those that
//! happen to host a primary or backup of the task currently under
//! evaluation -- the stricter, safe variant.

use itertools::Itertools;

use crate::processor::ProcessorId;
use crate::schedule::Schedule;
use crate::task::TaskId;

/// One failure scenario: the processors assumed failed, and the tasks
/// whose primary is among them.
#[derive(Clone, Debug)]
pub struct FailureScenario {
    pub failed: Vec<ProcessorId>,
    /// Tasks whose primary is hosted on a processor in `failed`, and
    /// which therefore have a backup promoted to active status
    /// somewhere among their surviving replicas.
    pub promoted: Vec<TaskId>,
}

impl FailureScenario {
    pub fn has_failed(&self, processor: &ProcessorId) -> bool {
        self.failed.iter().any(|p| p == processor)
    }
}

/// Enumerate every scenario with `|F| <= k` over the full processor
/// list. The empty scenario (no failures) is always yielded first and
/// is, in particular, the only scenario when `k == 0` (spec §4.C:
/// "the empty-scenario case ... is always evaluated"; spec P6).
///
/// The iterator is lazy and not restartable, matching this crate's
/// general style of exposing iterator chains rather than
/// pre-materialized vectors of scenarios.
pub fn scenarios<'a>(
    processors: &'a [ProcessorId],
    schedule: &'a Schedule,
    k: u32,
) -> impl Iterator<Item = FailureScenario> + 'a {
    (0..=k as usize).flat_map(move |size| {
        processors
            .iter()
            .cloned()
            .combinations(size)
            .map(move |failed| {
                let promoted = primaries_hosted_on(schedule, &failed);
                FailureScenario { failed, promoted }
            })
    })
}

fn primaries_hosted_on(schedule: &Schedule, failed: &[ProcessorId]) -> Vec<TaskId> {
    failed
        .iter()
        .flat_map(|p| schedule.entry(p).entries())
        .filter(|entry| entry.role.is_primary())
        .map(|entry| entry.task_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::Entry;
    use crate::task::Role;

    fn procs(n: usize) -> Vec<ProcessorId> {
        (0..n).map(|i| ProcessorId::new(format!("p{i}"))).collect()
    }

    #[test]
    fn k_zero_yields_only_the_empty_scenario() {
        let ps = procs(3);
        let s = Schedule::new(&ps);
        let all: Vec<_> = scenarios(&ps, &s, 0).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].failed.is_empty());
    }

    #[test]
    fn k_one_over_three_processors_yields_four_scenarios() {
        let ps = procs(3);
        let s = Schedule::new(&ps);
        let all: Vec<_> = scenarios(&ps, &s, 1).collect();
        // C(3,0) + C(3,1) = 1 + 3
        assert_eq!(all.len(), 4);
        assert_eq!(all.iter().filter(|sc| sc.failed.is_empty()).count(), 1);
        assert_eq!(all.iter().filter(|sc| sc.failed.len() == 1).count(), 3);
    }

    #[test]
    fn k_two_over_four_processors_covers_all_subset_sizes() {
        let ps = procs(4);
        let s = Schedule::new(&ps);
        let all: Vec<_> = scenarios(&ps, &s, 2).collect();
        // C(4,0) + C(4,1) + C(4,2) = 1 + 4 + 6
        assert_eq!(all.len(), 11);
    }

    #[test]
    fn promoted_tasks_are_exactly_those_whose_primary_failed() {
        let ps = procs(2);
        let mut s = Schedule::new(&ps);
        s.commit(
            &ps[0],
            Entry {
                task_id: TaskId::new("a"),
                period: 10.0,
                wcet: 2.0,
                role: Role::Primary,
            },
        );
        s.commit(
            &ps[1],
            Entry {
                task_id: TaskId::new("a"),
                period: 10.0,
                wcet: 2.0,
                role: Role::Backup {
                    rank: 1,
                    primary: TaskId::new("a"),
                },
            },
        );

        let scenario_with_failure = scenarios(&ps, &s, 1)
            .find(|sc| sc.has_failed(&ps[0]))
            .unwrap();
        assert_eq!(scenario_with_failure.promoted, vec![TaskId::new("a")]);

        let scenario_without_failure = scenarios(&ps, &s, 1)
            .find(|sc| sc.failed.is_empty())
            .unwrap();
        assert!(scenario_without_failure.promoted.is_empty());
    }
}
