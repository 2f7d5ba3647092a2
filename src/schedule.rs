//! The global schedule produced by [`crate::driver::schedule`], and the
//! diagnostic record for tasks that could not be placed.
//!
//! This module has no dependency on the external fault-notification
//! interface (`app_failure`/`stop_failover_unit`) consumed by the
//! surrounding deployment system's fault-correlation manager (spec
//! §6). That component reads the [`ScheduleProgress`] records and the
//! committed [`Schedule`] produced here to decide how to react to a
//! runtime processor failure; this crate never calls into it and never
//! receives failure notifications of its own. The schedule, once
//! returned by `driver::schedule`, is frozen: nothing in this crate
//! ever mutates it afterwards.

use std::collections::BTreeMap;

use crate::processor::{Entry, ProcessorId, ScheduleEntry};
use crate::task::TaskId;

/// How far placement of an unschedulable task got before it was
/// abandoned (spec §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleProgress {
    pub task_id: TaskId,
    /// `0` means the primary itself could not be placed anywhere.
    /// `1..=k` means this many backups were accepted before the task
    /// as a whole had to be abandoned as unschedulable (spec §3, §4.D).
    pub stage: u32,
}

/// The global mapping from processor to its ordered task/role list
/// (spec §3).
///
/// Backed by a `BTreeMap` rather than a `HashMap` so that `iter()` and
/// `processors()` enumerate processors in a fixed order rather than
/// `HashMap`'s per-process-randomized one: the placement decisions
/// made while building a `Schedule` are already deterministic, and the
/// output mapping itself must be too, to satisfy spec P5 (equal inputs
/// yield byte-for-byte equal outputs) for any consumer that serializes
/// it.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    per_processor: BTreeMap<ProcessorId, ScheduleEntry>,
}

impl Schedule {
    /// An empty schedule over exactly the given processors.
    pub fn new(processors: &[ProcessorId]) -> Self {
        let per_processor = processors
            .iter()
            .cloned()
            .map(|p| (p, ScheduleEntry::new()))
            .collect();
        Schedule { per_processor }
    }

    pub fn entry(&self, processor: &ProcessorId) -> &ScheduleEntry {
        self.per_processor
            .get(processor)
            .expect("schedule queried for a processor outside the original processor list")
    }

    pub(crate) fn commit(&mut self, processor: &ProcessorId, entry: Entry) {
        self.per_processor
            .get_mut(processor)
            .expect("commit to a processor outside the original processor list")
            .insert(entry);
    }

    pub fn processors(&self) -> impl Iterator<Item = &ProcessorId> {
        self.per_processor.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProcessorId, &ScheduleEntry)> {
        self.per_processor.iter()
    }
}
