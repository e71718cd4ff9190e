use tracing::{debug_span, info};

use super::{ProcessRecord, ScheduleResult};
use crate::{
    core::SchedCore,
    error::SchedError,
    scheduler::{
        FcfsScheduler, Policy, PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler,
    },
};

/// Runs one policy over one batch. Each run builds its own runtime state,
/// so the batch is never modified and runs never share anything.
pub struct Sim;

impl Sim {
    pub fn run<S: Scheduler>(
        batch: &[ProcessRecord],
        scheduler: S,
    ) -> Result<ScheduleResult, SchedError> {
        let span = debug_span!("sim", policy = scheduler.name(), procs = batch.len());
        let _guard = span.enter();

        let mut core = SchedCore::new(batch, scheduler)?;
        core.run()?;

        let makespan = core.now();
        let steps = core.observer().steps();
        let result = ScheduleResult::new(core.into_timeline());
        info!(
            events = result.len(),
            makespan, steps, "simulation complete"
        );
        Ok(result)
    }

    pub fn run_policy(
        batch: &[ProcessRecord],
        policy: Policy,
    ) -> Result<ScheduleResult, SchedError> {
        match policy {
            Policy::Fcfs => Self::run(batch, FcfsScheduler::new()),
            Policy::Sjf => Self::run(batch, SjfScheduler::new()),
            Policy::Priority => Self::run(batch, PriorityScheduler::new()),
            Policy::RoundRobin { quantum } => Self::run(batch, RoundRobinScheduler::new(quantum)),
        }
    }
}
