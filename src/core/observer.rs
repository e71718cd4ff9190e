use super::{
    dsq::Dsq,
    state::{ProcState, RunCtx, Ticks},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &RunCtx, queue: &Dsq) {
        self.step += 1;

        debug_assert!(
            ctx.now >= self.last_now,
            "Clock moved backwards from {} to {}",
            self.last_now,
            ctx.now
        );
        self.last_now = ctx.now;

        let mut completed = 0;
        for proc in ctx.procs.values() {
            debug_assert!(
                proc.remaining <= proc.burst,
                "Process {} has more work left than its burst",
                proc.pid
            );
            debug_assert_ne!(
                proc.state,
                ProcState::Running,
                "Process {} still running between steps",
                proc.pid
            );
            if proc.is_completed() {
                completed += 1;
                debug_assert_eq!(proc.remaining, 0);
                debug_assert!(
                    proc.completion_time
                        .is_some_and(|t| t >= proc.arrival.saturating_add(proc.burst)),
                    "Process {} completed before arrival + burst",
                    proc.pid
                );
            }
        }
        debug_assert_eq!(completed, ctx.completed(), "Completion count mismatch");

        for key in queue.keys() {
            let proc = ctx.proc(key);
            debug_assert_eq!(
                proc.state,
                ProcState::Ready,
                "Queued process {} must be Ready",
                proc.pid
            );
            debug_assert!(
                proc.arrival <= ctx.now,
                "Process {} queued before its arrival",
                proc.pid
            );
        }
    }
}
