use serde::{Deserialize, Serialize, Serializer};

use crate::{
    core::{Pid, Priority, Ticks},
    error::SchedError,
};

/// Immutable description of one process in a batch.
///
/// On the wire a record is a JSON array `[pid, arrival, burst, priority]`;
/// the priority may be omitted and defaults to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawProcess")]
pub struct ProcessRecord {
    pub id: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    /// Lower value wins.
    pub priority: Priority,
}

impl ProcessRecord {
    pub const fn new(id: Pid, arrival: Ticks, burst: Ticks, priority: Priority) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority,
        }
    }
}

impl Serialize for ProcessRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.id, self.arrival, self.burst, self.priority).serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawProcess {
    Full(i64, i64, i64, i64),
    Short(i64, i64, i64),
}

impl TryFrom<RawProcess> for ProcessRecord {
    type Error = SchedError;

    fn try_from(raw: RawProcess) -> Result<Self, Self::Error> {
        let (pid, arrival, burst, priority) = match raw {
            RawProcess::Full(pid, arrival, burst, priority) => (pid, arrival, burst, priority),
            RawProcess::Short(pid, arrival, burst) => (pid, arrival, burst, 0),
        };

        let id = u64::try_from(pid).map_err(|_| SchedError::NegativePid(pid))?;
        let arrival =
            u64::try_from(arrival).map_err(|_| SchedError::NegativeArrival { pid, arrival })?;
        let burst = u64::try_from(burst)
            .ok()
            .filter(|&b| b > 0)
            .ok_or(SchedError::NonPositiveBurst { pid, burst })?;

        Ok(Self::new(id, arrival, burst, priority))
    }
}

/// Request body handed over by a transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub processes: Vec<ProcessRecord>,
    #[serde(default)]
    pub quantum: Option<i64>,
}

impl ScheduleRequest {
    /// Batch-level checks that a single record cannot express.
    pub fn validate(&self) -> Result<(), SchedError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for record in &self.processes {
            if !seen.insert(record.id) {
                return Err(SchedError::DuplicatePid(record.id));
            }
        }
        Ok(())
    }
}
