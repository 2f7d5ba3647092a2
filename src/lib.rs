/*!
# Fault-Tolerant Rate-Monotonic Replica Scheduler

This crate places real-time tasks onto a fixed set of processors under
rate-monotonic, fully-preemptive fixed-priority scheduling, replicating
each task as one active primary plus `k` passive backups so that any
`|F| <= k` simultaneous processor failures leave every surviving task
meeting its deadline.

## Scope

The crate is a pure, synchronous computation: given a task set, a
processor list, and a replication level `k`, it returns a committed
schedule (or reports, per task, how far placement got before it had to
give up). It does not watch for failures at runtime, does not notify
anything when one occurs, and does not read configuration or perform
I/O of any kind -- those are the concerns of the surrounding deployment
system that calls into this crate, not of the crate itself.

## Components

- [`rta`] -- the response-time analyzer (component A): the classic
  Joseph & Pandya iterative fixed-point worst-case response time.
- [`scenario`] -- the failure-scenario enumerator (component B): every
  `|F| <= k` subset of failed processors.
- [`evaluator`] -- the placement evaluator (component C): whether one
  candidate placement survives every relevant scenario.
- [`driver`] -- the scheduling driver (component D): the outer
  first-fit loop tying A, B, and C together.

## Citations

The response-time analysis in [`rta`] is the standard iterative
fixed-point test of Joseph and Pandya (1986), as specialized to the
fully-preemptive, periodic, scalar-WCET case.
*/

pub mod driver;
pub mod error;
pub mod evaluator;
pub mod processor;
pub mod rta;
pub mod schedule;
pub mod scenario;
pub mod task;
pub mod time;
