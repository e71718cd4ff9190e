use super::{ENQ_REENQ, EnqueueFlags, Scheduler};
use crate::core::{Dsq, ProcKey, RunCtx, SelectKey};

/// Non-preemptive priority scheduling; a lower value is a higher priority.
/// A higher-priority arrival waits for the running process to finish.
pub struct PriorityScheduler {
    dsq: Dsq,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self {
            dsq: Dsq::new_priq(),
        }
    }
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn enqueue(&mut self, ctx: &RunCtx, key: ProcKey, flags: EnqueueFlags) {
        debug_assert_eq!(flags & ENQ_REENQ, 0, "Priority scheduling is non-preemptive");
        let proc = ctx.proc(key);
        self.dsq
            .push_priq(key, SelectKey::new(proc.priority, proc.arrival, proc.pid));
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<ProcKey> {
        self.dsq.pop()
    }

    fn queue(&self) -> &Dsq {
        &self.dsq
    }
}
