pub mod fifo;
pub mod priq;
pub mod round_robin;
pub mod sjf;

use std::{fmt, num::NonZeroU64, str::FromStr};

use crate::{
    core::{Dsq, ProcKey, RunCtx, Ticks},
    error::SchedError,
};
pub use fifo::FcfsScheduler;
pub use priq::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

pub type EnqueueFlags = u64;

pub const ENQ_WAKEUP: EnqueueFlags = 1 << 0;
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 32;
pub const ENQ_REENQ: EnqueueFlags = 1 << 40;

pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn enqueue(&mut self, ctx: &RunCtx, key: ProcKey, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &RunCtx) -> Option<ProcKey>;

    /// Longest slice `key` may run for once dispatched.
    fn timeslice(&self, ctx: &RunCtx, key: ProcKey) -> Ticks {
        ctx.proc(key).remaining
    }

    fn queue(&self) -> &Dsq;
}

/// Round-robin quantum as supplied by a caller: absent or non-positive is an error.
pub fn parse_quantum(quantum: Option<i64>) -> Result<NonZeroU64, SchedError> {
    let quantum = quantum.ok_or(SchedError::MissingQuantum)?;
    u64::try_from(quantum)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(SchedError::InvalidQuantum(quantum))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin { quantum: NonZeroU64 },
}

impl Policy {
    /// Resolve a policy name and an optional quantum. The quantum is only
    /// consulted for round robin.
    pub fn parse(name: &str, quantum: Option<i64>) -> Result<Self, SchedError> {
        match PolicyKind::from_str(name)? {
            PolicyKind::Fcfs => Ok(Self::Fcfs),
            PolicyKind::Sjf => Ok(Self::Sjf),
            PolicyKind::Priority => Ok(Self::Priority),
            PolicyKind::RoundRobin => Ok(Self::RoundRobin {
                quantum: parse_quantum(quantum)?,
            }),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Fcfs => PolicyKind::Fcfs,
            Self::Sjf => PolicyKind::Sjf,
            Self::Priority => PolicyKind::Priority,
            Self::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "rr(q={quantum})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [Self::Fcfs, Self::Sjf, Self::Priority, Self::RoundRobin];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "rr",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" | "pri" | "prio" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(SchedError::UnknownPolicy(s.to_string())),
        }
    }
}
