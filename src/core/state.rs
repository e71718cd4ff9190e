use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::{error::SchedError, sim::ProcessRecord};

pub type Pid = u64;
pub type Ticks = u64;
pub type Priority = i64;

new_key_type! {
    pub struct ProcKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Unarrived,
    Ready,
    Running,
    Completed,
}

/// Per-run bookkeeping for one process. The originating record is never touched.
#[derive(Debug)]
pub struct RuntimeState {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub state: ProcState,
    pub remaining: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl RuntimeState {
    fn new(record: &ProcessRecord) -> Self {
        Self {
            pid: record.id,
            arrival: record.arrival,
            burst: record.burst,
            priority: record.priority,
            state: ProcState::Unarrived,
            remaining: record.burst,
            first_run: None,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcState::Completed
    }
}

#[derive(Debug)]
pub struct RunCtx {
    pub now: Ticks,
    pub procs: SlotMap<ProcKey, RuntimeState>,
    // Completion and remaining work are tracked by pid, never by record equality
    pub pid_to_key: FxHashMap<Pid, ProcKey>,
    completed: usize,
}

impl RunCtx {
    pub fn new(batch: &[ProcessRecord]) -> Result<Self, SchedError> {
        let mut procs = SlotMap::with_capacity_and_key(batch.len());
        let mut pid_to_key = FxHashMap::default();
        pid_to_key.reserve(batch.len());

        // The clock never passes the latest arrival plus all work in the batch
        let mut total_burst: Ticks = 0;
        let mut latest: Option<(Ticks, Pid)> = None;

        for record in batch {
            if record.burst == 0 {
                return Err(SchedError::ZeroBurst { pid: record.id });
            }
            if pid_to_key.contains_key(&record.id) {
                return Err(SchedError::DuplicatePid(record.id));
            }
            total_burst = total_burst
                .checked_add(record.burst)
                .ok_or(SchedError::ClockOverflow { pid: record.id })?;
            if latest.is_none_or(|(arrival, _)| record.arrival > arrival) {
                latest = Some((record.arrival, record.id));
            }

            let key = procs.insert(RuntimeState::new(record));
            pid_to_key.insert(record.id, key);
        }

        if let Some((arrival, pid)) = latest {
            arrival
                .checked_add(total_burst)
                .ok_or(SchedError::ClockOverflow { pid })?;
        }

        Ok(Self {
            now: 0,
            procs,
            pid_to_key,
            completed: 0,
        })
    }

    pub fn proc(&self, key: ProcKey) -> &RuntimeState {
        &self.procs[key]
    }

    pub fn proc_mut(&mut self, key: ProcKey) -> &mut RuntimeState {
        &mut self.procs[key]
    }

    pub fn key_of(&self, pid: Pid) -> Option<ProcKey> {
        self.pid_to_key.get(&pid).copied()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.procs.len()
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        // Bounded in `new`: latest arrival + total burst fits in Ticks
        self.now += delta;
    }

    /// Idle skip straight to `to`.
    pub fn jump_to(&mut self, to: Ticks) {
        debug_assert!(to > self.now, "idle jump must move the clock forward");
        self.now = self.now.max(to);
    }

    pub fn mark_ready(&mut self, key: ProcKey) {
        let proc = self.proc_mut(key);
        debug_assert!(
            matches!(proc.state, ProcState::Unarrived | ProcState::Running),
            "Process {} cannot become ready from {:?}",
            proc.pid,
            proc.state
        );
        proc.state = ProcState::Ready;
    }

    // Return previous state
    pub fn set_running(&mut self, key: ProcKey) -> ProcState {
        let now = self.now;
        let proc = self.proc_mut(key);
        debug_assert_eq!(
            proc.state,
            ProcState::Ready,
            "Process {} must be ready before it runs",
            proc.pid
        );
        let prev = proc.state;
        proc.state = ProcState::Running;
        proc.first_run.get_or_insert(now);
        prev
    }

    /// Run `key` for `slice` ticks and return the clock value reached.
    pub fn execute(&mut self, key: ProcKey, slice: Ticks) -> Ticks {
        let proc = self.proc_mut(key);
        debug_assert!(
            slice > 0 && slice <= proc.remaining,
            "Slice {slice} out of range for process {} with {} remaining",
            proc.pid,
            proc.remaining
        );
        proc.remaining -= slice;
        self.advance_time(slice);
        self.now
    }

    pub fn mark_completed(&mut self, key: ProcKey) {
        let now = self.now;
        let proc = self.proc_mut(key);
        debug_assert!(
            proc.state == ProcState::Running && proc.remaining == 0,
            "Process {} must be running with no work left before completion",
            proc.pid
        );
        proc.state = ProcState::Completed;
        proc.completion_time = Some(now);
        self.completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Pid, arrival: Ticks, burst: Ticks) -> ProcessRecord {
        ProcessRecord::new(id, arrival, burst, 0)
    }

    #[test]
    fn rejects_duplicate_pids() {
        let batch = [record(1, 0, 2), record(1, 3, 4)];
        assert_eq!(
            RunCtx::new(&batch).unwrap_err(),
            SchedError::DuplicatePid(1)
        );
    }

    #[test]
    fn rejects_zero_burst() {
        let batch = [record(1, 0, 2), record(2, 0, 0)];
        assert_eq!(
            RunCtx::new(&batch).unwrap_err(),
            SchedError::ZeroBurst { pid: 2 }
        );
    }

    #[test]
    fn rejects_batches_that_would_overflow_the_clock() {
        let batch = [record(1, u64::MAX - 1, 5)];
        assert_eq!(
            RunCtx::new(&batch).unwrap_err(),
            SchedError::ClockOverflow { pid: 1 }
        );

        // Each record fits on its own; the queue behind the last arrival does not
        let batch = [record(1, 0, u64::MAX / 2 + 1), record(2, u64::MAX / 2, 3)];
        assert_eq!(
            RunCtx::new(&batch).unwrap_err(),
            SchedError::ClockOverflow { pid: 2 }
        );

        let batch = [record(1, u64::MAX - 5, 5)];
        assert!(RunCtx::new(&batch).is_ok());
    }

    #[test]
    fn identical_tuples_are_tracked_separately() {
        let batch = [record(1, 0, 3), record(2, 0, 3)];
        let mut ctx = RunCtx::new(&batch).unwrap();
        let first = ctx.key_of(1).unwrap();
        let second = ctx.key_of(2).unwrap();

        ctx.mark_ready(first);
        ctx.set_running(first);
        ctx.execute(first, 3);
        ctx.mark_completed(first);

        assert!(ctx.proc(first).is_completed());
        assert!(!ctx.proc(second).is_completed());
        assert_eq!(ctx.proc(second).remaining, 3);
        assert_eq!(ctx.completed(), 1);
        assert!(!ctx.all_completed());
    }

    #[test]
    fn execute_advances_clock_and_records_first_run() {
        let batch = [record(7, 0, 5)];
        let mut ctx = RunCtx::new(&batch).unwrap();
        let key = ctx.key_of(7).unwrap();

        ctx.jump_to(2);
        ctx.mark_ready(key);
        assert_eq!(ctx.set_running(key), ProcState::Ready);
        assert_eq!(ctx.execute(key, 2), 4);
        assert_eq!(ctx.proc(key).remaining, 3);
        assert_eq!(ctx.proc(key).first_run, Some(2));
    }
}
