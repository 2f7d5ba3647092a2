//! Response-Time Analyzer (spec component A).
//!
//! Computes the worst-case response time (WCRT) of a task under
//! rate-monotonic, fully-preemptive fixed-priority scheduling, given
//! the set of higher-priority tasks already committed to the same
//! processor. This is the classic iterative analysis of Joseph &
//! Pandya, restricted to the scalar-WCET, periodic-arrival case that
//! the surrounding replica scheduler needs (spec §4.A).

use crate::error::Divergence;
use crate::time::{self, Duration};

/// Safety bound on the number of fixed-point iterations (spec §4.A:
/// "fail ... when iteration exceeds an implementation-chosen safety
/// bound"). Utilization strictly below 1 always converges in far
/// fewer steps than this; reaching it indicates the candidate
/// diverges, which is reported as [`Divergence`] rather than returned
/// as an (incorrect) finite bound.
pub const MAX_ITERATIONS: u32 = 10_000;

/// One higher-priority task's contribution to interference: its
/// period and WCET.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interference {
    pub period: Duration,
    pub wcet: Duration,
}

/// Worst-case response time of a candidate task of period `period`
/// and cost `wcet`, given the interference of higher-priority tasks
/// already committed to the same processor (the set `H` of spec
/// §4.A, tasks with strictly shorter period).
///
/// Returns:
/// - `Ok(Some(r))` -- schedulable, with worst-case response time `r`.
/// - `Ok(None)` -- not schedulable (misses its own deadline); this is
///   the spec's sentinel-zero outcome, expressed idiomatically as
///   `None` rather than a magic value, since a real response time is
///   always strictly positive.
/// - `Err(Divergence)` -- the fixed-point iteration did not converge
///   within [`MAX_ITERATIONS`] (spec §7, kind 3).
pub fn wcrt(
    period: Duration,
    wcet: Duration,
    higher_priority: &[Interference],
) -> Result<Option<Duration>, Divergence> {
    debug_assert!(wcet > 0.0, "WCET must be strictly positive");

    let mut r = wcet;
    for _ in 0..MAX_ITERATIONS {
        let interference: Duration = higher_priority
            .iter()
            .map(|h| (r / h.period).ceil() * h.wcet)
            .sum();
        let next = wcet + interference;

        if time::approx_eq(next, r) {
            // converged
            return Ok(if time::approx_le(next, period) {
                Some(next)
            } else {
                None
            });
        }
        if next > period + time::EPSILON {
            // already past the deadline; no point iterating further
            return Ok(None);
        }
        r = next;
    }
    Err(Divergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn hp(pairs: &[(f64, f64)]) -> Vec<Interference> {
        pairs
            .iter()
            .map(|(period, wcet)| Interference {
                period: *period,
                wcet: *wcet,
            })
            .collect()
    }

    #[test]
    fn no_interference_means_wcrt_equals_wcet() {
        assert_eq!(wcrt(10.0, 3.0, &[]), Ok(Some(3.0)));
    }

    // Grounded on `fp_fp_rta_basic` in the teacher's own
    // `fixed_priority/tests.rs`: four tasks (wcet, period) =
    // (1,4),(1,5),(3,9),(3,18), expecting response times 1,2,7,18
    // when each is analyzed against all strictly-higher-priority
    // predecessors in the list.
    #[test]
    fn classic_four_task_rate_monotonic_set() {
        let tasks = [(1.0, 4.0), (1.0, 5.0), (3.0, 9.0), (3.0, 18.0)];
        let expected = [1.0, 2.0, 7.0, 18.0];

        for i in 0..tasks.len() {
            let (wcet, period) = tasks[i];
            let interference = hp(&tasks[0..i]
                .iter()
                .map(|(w, p)| (*p, *w))
                .collect::<Vec<_>>());
            let r = wcrt(period, wcet, &interference).unwrap().unwrap();
            assert_approx_eq!(r, expected[i]);
        }
    }

    // Grounded on `fp_fp_rta_overload`: the same four tasks at tighter
    // periods, where the last two miss their deadlines.
    #[test]
    fn overloaded_tasks_report_no_schedulable_response_time() {
        let tasks = [(1.0, 2.0), (1.0, 3.0), (3.0, 9.0), (3.0, 18.0)];
        let expected = [Some(1.0), Some(2.0), None, None];

        for i in 0..tasks.len() {
            let (wcet, period) = tasks[i];
            let interference = hp(&tasks[0..i]
                .iter()
                .map(|(w, p)| (*p, *w))
                .collect::<Vec<_>>());
            let r = wcrt(period, wcet, &interference).unwrap();
            assert_eq!(r, expected[i]);
        }
    }

    #[test]
    fn unbounded_utilization_diverges_rather_than_hanging() {
        // A higher-priority task alone saturates the processor
        // (utilization 2), and the deadline is set far enough out
        // that the early deadline-miss exit never triggers before the
        // iteration cap does.
        let interference = hp(&[(1.0, 2.0)]);
        let result = wcrt(1e300, 1.0, &interference);
        assert_eq!(result, Err(Divergence));
    }

    #[test]
    fn tolerance_is_applied_at_the_deadline_boundary() {
        // A response time that lands just inside EPSILON of the
        // deadline must be accepted, not rejected by float noise.
        let period = 10.0;
        let wcet = period - 1e-10;
        assert_eq!(wcrt(period, wcet, &[]), Ok(Some(wcet)));
    }
}
