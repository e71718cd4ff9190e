use serde::{Deserialize, Serialize};

use crate::core::{Pid, ProcState, Ticks};

/// One executed slice: `process_id` ran from `start_time` until `finish_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEvent {
    pub process_id: Pid,
    pub start_time: Ticks,
    pub finish_time: Ticks,
}

impl DispatchEvent {
    pub fn slice(&self) -> Ticks {
        self.finish_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    Admitted {
        pid: Pid,
        at: Ticks,
    },
    Dispatched {
        pid: Pid,
        from: ProcState,
        start: Ticks,
        slice: Ticks,
    },
    Preempted {
        pid: Pid,
        remaining: Ticks,
    },
    Completed {
        pid: Pid,
        at: Ticks,
    },
    // Nothing runnable; clock skipped to the next arrival
    CpuIdle {
        from: Ticks,
        to: Ticks,
    },
}
