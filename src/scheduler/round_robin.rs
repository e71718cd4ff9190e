use std::num::NonZeroU64;

use super::{EnqueueFlags, Scheduler, parse_quantum};
use crate::{
    core::{Dsq, ProcKey, RunCtx, Ticks},
    error::SchedError,
};

/// Preemptive round robin with a fixed quantum over a single FIFO.
///
/// The driver admits processes that arrived during a slice before handing the
/// preempted process back, so it always lands behind them.
pub struct RoundRobinScheduler {
    dsq: Dsq,
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self {
            dsq: Dsq::new_fifo(),
            quantum,
        }
    }

    pub fn from_raw(quantum: Option<i64>) -> Result<Self, SchedError> {
        parse_quantum(quantum).map(Self::new)
    }

    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn enqueue(&mut self, _ctx: &RunCtx, key: ProcKey, _flags: EnqueueFlags) {
        self.dsq.push_back(key);
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<ProcKey> {
        self.dsq.pop()
    }

    fn timeslice(&self, ctx: &RunCtx, key: ProcKey) -> Ticks {
        self.quantum.get().min(ctx.proc(key).remaining)
    }

    fn queue(&self) -> &Dsq {
        &self.dsq
    }
}
