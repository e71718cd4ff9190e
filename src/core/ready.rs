use std::collections::BTreeSet;

use super::state::{Pid, ProcKey, RunCtx, Ticks};

/// Tracks which processes have arrived as the clock moves.
///
/// Processes are admitted in ascending `(arrival, pid)` order. Completion lives
/// in [`RunCtx`], keyed by pid, so eligibility never depends on record equality.
#[derive(Debug)]
pub struct ReadyQueueManager {
    order: Vec<ProcKey>,
    // Everything before the cursor has been admitted
    cursor: usize,
}

impl ReadyQueueManager {
    pub fn new(ctx: &RunCtx) -> Self {
        let mut order: Vec<ProcKey> = ctx.procs.keys().collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (ctx.proc(a), ctx.proc(b));
            a.arrival.cmp(&b.arrival).then_with(|| a.pid.cmp(&b.pid))
        });

        Self { order, cursor: 0 }
    }

    /// Admit every process with `arrival <= clock` not admitted before.
    /// Returned in admission order; contiguous since `order` is sorted.
    pub fn admit(&mut self, ctx: &RunCtx, clock: Ticks) -> &[ProcKey] {
        let start = self.cursor;
        while let Some(&key) = self.order.get(self.cursor) {
            if ctx.proc(key).arrival > clock {
                break;
            }
            self.cursor += 1;
        }
        &self.order[start..self.cursor]
    }

    /// Arrived and not completed, independent of admission history.
    pub fn eligible(&self, ctx: &RunCtx, clock: Ticks) -> BTreeSet<Pid> {
        ctx.procs
            .values()
            .filter(|proc| proc.arrival <= clock && !proc.is_completed())
            .map(|proc| proc.pid)
            .collect()
    }

    /// Minimum arrival among processes not yet admitted.
    pub fn next_arrival(&self, ctx: &RunCtx) -> Option<Ticks> {
        self.order
            .get(self.cursor)
            .map(|&key| ctx.proc(key).arrival)
    }

    /// `eligible(clock)` is empty but work remains: where the clock should go.
    /// Everything up to `clock` has been admitted by then, so the minimum
    /// unserved arrival is the next one in admission order.
    pub fn idle_until(&self, ctx: &RunCtx, clock: Ticks) -> Option<Ticks> {
        if ctx.all_completed() || !self.eligible(ctx, clock).is_empty() {
            return None;
        }
        self.next_arrival(ctx)
    }

    pub fn pending(&self) -> usize {
        self.order.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessRecord;

    fn ctx(batch: &[(Pid, Ticks, Ticks)]) -> RunCtx {
        let records: Vec<ProcessRecord> = batch
            .iter()
            .map(|&(id, arrival, burst)| ProcessRecord::new(id, arrival, burst, 0))
            .collect();
        RunCtx::new(&records).unwrap()
    }

    fn pids(ctx: &RunCtx, keys: &[ProcKey]) -> Vec<Pid> {
        keys.iter().map(|&key| ctx.proc(key).pid).collect()
    }

    #[test]
    fn admits_in_arrival_then_pid_order() {
        let ctx = ctx(&[(3, 2, 1), (9, 0, 1), (1, 2, 1), (4, 7, 1)]);
        let mut ready = ReadyQueueManager::new(&ctx);

        let first = ready.admit(&ctx, 0).to_vec();
        assert_eq!(pids(&ctx, &first), vec![9]);

        let second = ready.admit(&ctx, 5).to_vec();
        assert_eq!(pids(&ctx, &second), vec![1, 3]);
        assert!(ready.admit(&ctx, 5).is_empty());
        assert_eq!(ready.pending(), 1);
        assert_eq!(ready.next_arrival(&ctx), Some(7));
    }

    #[test]
    fn eligible_excludes_future_and_completed() {
        let mut ctx = ctx(&[(1, 0, 2), (2, 1, 2), (3, 10, 2)]);
        let ready = ReadyQueueManager::new(&ctx);

        assert_eq!(ready.eligible(&ctx, 1), BTreeSet::from([1, 2]));

        let key = ctx.key_of(1).unwrap();
        ctx.mark_ready(key);
        ctx.set_running(key);
        ctx.execute(key, 2);
        ctx.mark_completed(key);

        assert_eq!(ready.eligible(&ctx, 1), BTreeSet::from([2]));
        assert_eq!(ready.eligible(&ctx, 10), BTreeSet::from([2, 3]));
    }

    #[test]
    fn reports_next_arrival_when_idle() {
        let ctx = ctx(&[(1, 4, 2), (2, 9, 2)]);
        let ready = ReadyQueueManager::new(&ctx);

        assert_eq!(ready.idle_until(&ctx, 0), Some(4));
        assert_eq!(ready.idle_until(&ctx, 4), None);
        assert_eq!(ready.next_arrival(&ctx), Some(4));
    }

    #[test]
    fn empty_batch_never_idles() {
        let ctx = ctx(&[]);
        let ready = ReadyQueueManager::new(&ctx);
        assert!(ready.eligible(&ctx, 0).is_empty());
        assert_eq!(ready.idle_until(&ctx, 0), None);
        assert_eq!(ready.next_arrival(&ctx), None);
    }
}
