use super::{ENQ_REENQ, EnqueueFlags, Scheduler};
use crate::core::{Dsq, ProcKey, RunCtx, SelectKey};

/// Non-preemptive shortest job first.
pub struct SjfScheduler {
    dsq: Dsq,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self {
            dsq: Dsq::new_priq(),
        }
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn enqueue(&mut self, ctx: &RunCtx, key: ProcKey, flags: EnqueueFlags) {
        debug_assert_eq!(flags & ENQ_REENQ, 0, "SJF is non-preemptive");
        let proc = ctx.proc(key);
        // Remaining equals the full burst here
        self.dsq
            .push_priq(key, SelectKey::new(proc.remaining, proc.arrival, proc.pid));
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<ProcKey> {
        self.dsq.pop()
    }

    fn queue(&self) -> &Dsq {
        &self.dsq
    }
}
