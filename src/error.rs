use thiserror::Error;

use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed batch.
    Validation,
    /// Unusable policy parameters.
    Configuration,
    /// The simulation could not make progress.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("duplicate process id {0} in batch")]
    DuplicatePid(Pid),

    #[error("process {pid} has zero burst time")]
    ZeroBurst { pid: Pid },

    #[error("process id {0} is negative")]
    NegativePid(i64),

    #[error("process {pid} has negative arrival time {arrival}")]
    NegativeArrival { pid: i64, arrival: i64 },

    #[error("process {pid} has non-positive burst time {burst}")]
    NonPositiveBurst { pid: i64, burst: i64 },

    #[error("process {pid} would push the simulated clock past {}", Ticks::MAX)]
    ClockOverflow { pid: Pid },

    #[error("round robin scheduling requires a quantum")]
    MissingQuantum,

    #[error("round robin quantum must be positive, got {0}")]
    InvalidQuantum(i64),

    #[error("unknown scheduling policy '{0}' (expected fcfs, sjf, priority or rr)")]
    UnknownPolicy(String),

    #[error("no runnable process and no pending arrival at t={now}")]
    Stalled { now: Ticks },
}

impl SchedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicatePid(_)
            | Self::ZeroBurst { .. }
            | Self::NegativePid(_)
            | Self::NegativeArrival { .. }
            | Self::NonPositiveBurst { .. }
            | Self::ClockOverflow { .. } => ErrorKind::Validation,
            Self::MissingQuantum | Self::InvalidQuantum(_) | Self::UnknownPolicy(_) => {
                ErrorKind::Configuration
            }
            Self::Stalled { .. } => ErrorKind::Internal,
        }
    }
}
