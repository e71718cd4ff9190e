use super::{ENQ_REENQ, EnqueueFlags, Scheduler};
use crate::core::{Dsq, ProcKey, RunCtx};

/// First-come-first-served. Arrivals are admitted in `(arrival, pid)` order and
/// each dispatch runs to completion.
pub struct FcfsScheduler {
    dsq: Dsq,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self {
            dsq: Dsq::new_fifo(),
        }
    }
}

impl Default for FcfsScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn enqueue(&mut self, _ctx: &RunCtx, key: ProcKey, flags: EnqueueFlags) {
        debug_assert_eq!(flags & ENQ_REENQ, 0, "FCFS is non-preemptive");
        self.dsq.push_back(key);
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<ProcKey> {
        self.dsq.pop()
    }

    fn queue(&self) -> &Dsq {
        &self.dsq
    }
}
