use serde::{Deserialize, Serialize};

use crate::core::{DispatchEvent, Pid, Ticks};

/// Full simulated timeline of one run, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub events: Vec<DispatchEvent>,
}

/// The `{finish, order}` shape returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub finish: Vec<Ticks>,
    pub order: Vec<Pid>,
}

impl ScheduleResult {
    pub fn new(events: Vec<DispatchEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn order(&self) -> Vec<Pid> {
        self.events.iter().map(|e| e.process_id).collect()
    }

    pub fn finish(&self) -> Vec<Ticks> {
        self.events.iter().map(|e| e.finish_time).collect()
    }

    pub fn events_for(&self, pid: Pid) -> impl Iterator<Item = &DispatchEvent> {
        self.events.iter().filter(move |e| e.process_id == pid)
    }

    /// Completion time of `pid`: the finish of its last slice.
    pub fn final_finish(&self, pid: Pid) -> Option<Ticks> {
        self.events_for(pid).last().map(|e| e.finish_time)
    }

    pub fn first_start(&self, pid: Pid) -> Option<Ticks> {
        self.events_for(pid).next().map(|e| e.start_time)
    }

    pub fn slices(&self, pid: Pid) -> usize {
        self.events_for(pid).count()
    }

    /// Total CPU time given to `pid`.
    pub fn executed(&self, pid: Pid) -> Ticks {
        self.events_for(pid).map(DispatchEvent::slice).sum()
    }

    /// Clock value when the last slice ended.
    pub fn makespan(&self) -> Ticks {
        self.events.last().map_or(0, |e| e.finish_time)
    }

    pub fn response(&self) -> ScheduleResponse {
        ScheduleResponse {
            finish: self.finish(),
            order: self.order(),
        }
    }
}

impl From<&ScheduleResult> for ScheduleResponse {
    fn from(result: &ScheduleResult) -> Self {
        result.response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(pid: Pid, start: Ticks, finish: Ticks) -> DispatchEvent {
        DispatchEvent {
            process_id: pid,
            start_time: start,
            finish_time: finish,
        }
    }

    #[test]
    fn per_process_views() {
        let result = ScheduleResult::new(vec![
            event(1, 0, 2),
            event(2, 2, 4),
            event(1, 4, 6),
            event(2, 6, 7),
            event(1, 7, 8),
        ]);

        assert_eq!(result.order(), vec![1, 2, 1, 2, 1]);
        assert_eq!(result.final_finish(1), Some(8));
        assert_eq!(result.first_start(2), Some(2));
        assert_eq!(result.slices(1), 3);
        assert_eq!(result.executed(2), 3);
        assert_eq!(result.final_finish(9), None);
        assert_eq!(result.makespan(), 8);
    }

    #[test]
    fn response_matches_wire_shape() {
        let result = ScheduleResult::new(vec![event(1, 0, 5), event(2, 5, 8)]);
        let json = serde_json::to_string(&result.response()).unwrap();
        assert_eq!(json, r#"{"finish":[5,8],"order":[1,2]}"#);
    }
}
