use tracing::{debug, trace};

use super::{
    event::{DispatchEvent, SchedCoreEvent},
    observer::Observer,
    ready::ReadyQueueManager,
    state::{RunCtx, Ticks},
};
use crate::{
    error::SchedError,
    scheduler::{ENQ_PREEMPT, ENQ_REENQ, ENQ_WAKEUP, EnqueueFlags, Scheduler},
    sim::ProcessRecord,
};

/// One simulation run: owns the clock, the runtime table and the engine.
pub struct SchedCore<S: Scheduler> {
    pub ctx: RunCtx,
    pub scheduler: S,
    ready: ReadyQueueManager,
    observer: Observer,
    timeline: Vec<DispatchEvent>,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(batch: &[ProcessRecord], scheduler: S) -> Result<Self, SchedError> {
        let ctx = RunCtx::new(batch)?;
        let ready = ReadyQueueManager::new(&ctx);
        Ok(Self {
            ctx,
            scheduler,
            ready,
            observer: Observer::new(),
            timeline: Vec::new(),
        })
    }

    /// Make one scheduling decision: either run a slice or skip an idle gap.
    pub fn step(&mut self) -> Result<Vec<SchedCoreEvent>, SchedError> {
        let mut events = Vec::new();
        self.handle_arrivals(&mut events);

        let Some(key) = self.scheduler.dispatch(&self.ctx) else {
            let from = self.ctx.now;
            let to = self
                .ready
                .idle_until(&self.ctx, from)
                .ok_or(SchedError::Stalled { now: from })?;
            debug!(from, to, "cpu idle, skipping to next arrival");
            self.ctx.jump_to(to);
            events.push(SchedCoreEvent::CpuIdle { from, to });
            self.observer.observe(&self.ctx, self.scheduler.queue());
            return Ok(events);
        };

        let slice = self
            .scheduler
            .timeslice(&self.ctx, key)
            .min(self.ctx.proc(key).remaining);
        if slice == 0 {
            return Err(SchedError::Stalled { now: self.ctx.now });
        }

        let start = self.ctx.now;
        let from = self.ctx.set_running(key);
        let finish = self.ctx.execute(key, slice);
        let (pid, remaining) = {
            let proc = self.ctx.proc(key);
            (proc.pid, proc.remaining)
        };
        debug!(pid, start, finish, remaining, "dispatched");
        events.push(SchedCoreEvent::Dispatched {
            pid,
            from,
            start,
            slice,
        });
        self.timeline.push(DispatchEvent {
            process_id: pid,
            start_time: start,
            finish_time: finish,
        });

        // Anything that arrived during the slice queues ahead of a preempted process
        self.handle_arrivals(&mut events);

        if remaining == 0 {
            self.ctx.mark_completed(key);
            events.push(SchedCoreEvent::Completed { pid, at: finish });
        } else {
            self.ctx.mark_ready(key);
            let flags: EnqueueFlags = ENQ_PREEMPT | ENQ_REENQ;
            self.scheduler.enqueue(&self.ctx, key, flags);
            events.push(SchedCoreEvent::Preempted { pid, remaining });
        }

        self.observer.observe(&self.ctx, self.scheduler.queue());
        Ok(events)
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SchedCoreEvent>) {
        let now = self.ctx.now;
        for &key in self.ready.admit(&self.ctx, now) {
            self.ctx.mark_ready(key);
            self.scheduler.enqueue(&self.ctx, key, ENQ_WAKEUP);

            let pid = self.ctx.proc(key).pid;
            trace!(pid, at = now, "admitted");
            events.push(SchedCoreEvent::Admitted { pid, at: now });
        }
    }

    /// Drive the run until every process has completed.
    pub fn run(&mut self) -> Result<(), SchedError> {
        while !self.ctx.all_completed() {
            self.step()?;
        }
        Ok(())
    }

    pub fn all_completed(&self) -> bool {
        self.ctx.all_completed()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn ready(&self) -> &ReadyQueueManager {
        &self.ready
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn timeline(&self) -> &[DispatchEvent] {
        &self.timeline
    }

    pub fn into_timeline(self) -> Vec<DispatchEvent> {
        self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FcfsScheduler, RoundRobinScheduler};
    use std::num::NonZeroU64;

    #[test]
    fn step_reports_idle_skip() {
        let batch = [ProcessRecord::new(1, 5, 2, 0)];
        let mut core = SchedCore::new(&batch, FcfsScheduler::new()).unwrap();

        let events = core.step().unwrap();
        assert_eq!(events, vec![SchedCoreEvent::CpuIdle { from: 0, to: 5 }]);
        assert_eq!(core.now(), 5);

        let events = core.step().unwrap();
        assert_eq!(
            events,
            vec![
                SchedCoreEvent::Admitted { pid: 1, at: 5 },
                SchedCoreEvent::Dispatched {
                    pid: 1,
                    from: crate::core::ProcState::Ready,
                    start: 5,
                    slice: 2
                },
                SchedCoreEvent::Completed { pid: 1, at: 7 },
            ]
        );
        assert!(core.all_completed());
        assert_eq!(core.observer().steps(), 2);
    }

    #[test]
    fn preempted_process_queues_behind_mid_slice_arrivals() {
        let batch = [ProcessRecord::new(1, 0, 4, 0), ProcessRecord::new(2, 1, 2, 0)];
        let rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());
        let mut core = SchedCore::new(&batch, rr).unwrap();

        let events = core.step().unwrap();
        assert_eq!(
            &events[2..],
            &[
                SchedCoreEvent::Admitted { pid: 2, at: 2 },
                SchedCoreEvent::Preempted { pid: 1, remaining: 2 },
            ]
        );

        let order: Vec<_> = core
            .scheduler
            .queue()
            .keys()
            .into_iter()
            .map(|key| core.ctx.proc(key).pid)
            .collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn empty_batch_is_already_complete() {
        let mut core = SchedCore::new(&[], FcfsScheduler::new()).unwrap();
        core.run().unwrap();
        assert!(core.timeline().is_empty());
        assert_eq!(core.ready().pending(), 0);
    }
}
