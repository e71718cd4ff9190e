//! Single-CPU scheduling simulator.
//!
//! A batch of [`ProcessRecord`]s is replayed under one policy and the dispatch
//! timeline comes back as a [`ScheduleResult`]. Every run is a pure function of
//! its input batch.

pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;
pub mod telemetry;

pub use crate::core::{DispatchEvent, Pid, Priority, SchedCoreEvent, Ticks};
pub use error::{ErrorKind, SchedError};
pub use scheduler::{Policy, PolicyKind, Scheduler};
pub use sim::{ProcessRecord, ScheduleRequest, ScheduleResponse, ScheduleResult, Sim};

use scheduler::{FcfsScheduler, PriorityScheduler, RoundRobinScheduler, SjfScheduler};

/// First-come-first-served. An empty batch yields an empty result.
pub fn run_fcfs(batch: &[ProcessRecord]) -> Result<ScheduleResult, SchedError> {
    Sim::run(batch, FcfsScheduler::new())
}

/// Non-preemptive shortest job first.
pub fn run_sjf(batch: &[ProcessRecord]) -> Result<ScheduleResult, SchedError> {
    Sim::run(batch, SjfScheduler::new())
}

/// Non-preemptive priority, lower value first.
pub fn run_priority(batch: &[ProcessRecord]) -> Result<ScheduleResult, SchedError> {
    Sim::run(batch, PriorityScheduler::new())
}

/// Round robin. A missing or non-positive `quantum` is reported, never defaulted.
pub fn run_round_robin(
    batch: &[ProcessRecord],
    quantum: Option<i64>,
) -> Result<ScheduleResult, SchedError> {
    Sim::run(batch, RoundRobinScheduler::from_raw(quantum)?)
}

pub fn run(batch: &[ProcessRecord], policy: Policy) -> Result<ScheduleResult, SchedError> {
    Sim::run_policy(batch, policy)
}
