use average::{Estimate, Mean};
use serde::Serialize;

use super::{ProcessRecord, ScheduleResult};
use crate::core::{Pid, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    pub response: Ticks,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub makespan: Ticks,
    pub busy: Ticks,
    pub utilization: f64,
}

/// Per-process metrics in batch order. Processes missing from `result` are skipped.
pub fn process_stats(batch: &[ProcessRecord], result: &ScheduleResult) -> Vec<ProcessStats> {
    batch
        .iter()
        .filter_map(|record| {
            let completion = result.final_finish(record.id)?;
            let first_start = result.first_start(record.id)?;
            let turnaround = completion - record.arrival;
            Some(ProcessStats {
                pid: record.id,
                arrival: record.arrival,
                burst: record.burst,
                completion,
                turnaround,
                waiting: turnaround.saturating_sub(record.burst),
                response: first_start - record.arrival,
            })
        })
        .collect()
}

pub fn summarize(batch: &[ProcessRecord], result: &ScheduleResult) -> Summary {
    let stats = process_stats(batch, result);
    let makespan = result.makespan();
    let busy: Ticks = result.events.iter().map(|e| e.slice()).sum();

    Summary {
        avg_turnaround: avg(stats.iter().map(|s| s.turnaround as f64)),
        avg_waiting: avg(stats.iter().map(|s| s.waiting as f64)),
        avg_response: avg(stats.iter().map(|s| s.response as f64)),
        makespan,
        busy,
        utilization: if makespan == 0 {
            0.0
        } else {
            busy as f64 / makespan as f64
        },
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
