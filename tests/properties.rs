use proptest::prelude::*;
use std::num::NonZeroU64;

use sched_model::{Policy, ProcessRecord, ScheduleResult, run};

fn batch_strategy() -> impl Strategy<Value = Vec<ProcessRecord>> {
    prop::collection::vec((0u64..30, 1u64..12, -3i64..4), 0..14).prop_map(|procs| {
        procs
            .into_iter()
            .enumerate()
            // Non-contiguous ids so nothing leans on id == index
            .map(|(i, (arrival, burst, priority))| {
                ProcessRecord::new(i as u64 * 7 + 3, arrival, burst, priority)
            })
            .collect()
    })
}

fn policies(quantum: u64) -> [Policy; 4] {
    [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin {
            quantum: NonZeroU64::new(quantum).unwrap(),
        },
    ]
}

fn check_timeline(batch: &[ProcessRecord], result: &ScheduleResult) -> Result<(), TestCaseError> {
    let mut clock = 0;
    for event in &result.events {
        prop_assert!(event.start_time >= clock, "slices overlap: {:?}", event);
        prop_assert!(event.finish_time > event.start_time);
        clock = event.finish_time;
    }

    for record in batch {
        prop_assert_eq!(result.executed(record.id), record.burst);
        let finish = result.final_finish(record.id).unwrap();
        prop_assert!(finish >= record.arrival + record.burst);
        prop_assert!(result.first_start(record.id).unwrap() >= record.arrival);
    }

    prop_assert_eq!(
        result.events.iter().map(|e| e.slice()).sum::<u64>(),
        batch.iter().map(|r| r.burst).sum::<u64>()
    );
    Ok(())
}

// The CPU only idles when nothing that has arrived is still unfinished
fn check_work_conserving(
    batch: &[ProcessRecord],
    result: &ScheduleResult,
) -> Result<(), TestCaseError> {
    let mut prev_finish = 0;
    for event in &result.events {
        if event.start_time > prev_finish {
            for record in batch {
                if record.arrival <= prev_finish {
                    prop_assert!(result.final_finish(record.id).unwrap() <= prev_finish);
                }
            }
        }
        prev_finish = event.finish_time;
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_policy_completes_every_process(batch in batch_strategy(), quantum in 1u64..6) {
        for policy in policies(quantum) {
            let result = run(&batch, policy).unwrap();
            check_timeline(&batch, &result)?;
            check_work_conserving(&batch, &result)?;
        }
    }

    #[test]
    fn non_preemptive_policies_dispatch_once_per_process(batch in batch_strategy()) {
        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Priority] {
            let result = run(&batch, policy).unwrap();
            prop_assert_eq!(result.len(), batch.len());
            for record in &batch {
                prop_assert_eq!(result.slices(record.id), 1);
            }
        }
    }

    #[test]
    fn round_robin_slice_count_is_ceil_burst_over_quantum(
        batch in batch_strategy(),
        quantum in 1u64..6,
    ) {
        let policy = Policy::RoundRobin { quantum: NonZeroU64::new(quantum).unwrap() };
        let result = run(&batch, policy).unwrap();
        for record in &batch {
            prop_assert_eq!(result.slices(record.id) as u64, record.burst.div_ceil(quantum));
            for event in result.events_for(record.id) {
                prop_assert!(event.slice() <= quantum);
            }
        }
    }

    #[test]
    fn fcfs_order_is_arrival_then_pid(batch in batch_strategy()) {
        let result = run(&batch, Policy::Fcfs).unwrap();
        let mut expected: Vec<_> = batch.iter().map(|r| (r.arrival, r.id)).collect();
        expected.sort();
        let expected: Vec<u64> = expected.into_iter().map(|(_, id)| id).collect();
        prop_assert_eq!(result.order(), expected);
    }

    #[test]
    fn runs_are_deterministic(batch in batch_strategy(), quantum in 1u64..6) {
        for policy in policies(quantum) {
            let first = run(&batch, policy).unwrap();
            let second = run(&batch, policy).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn input_order_does_not_matter(batch in batch_strategy(), quantum in 1u64..6) {
        let mut reversed = batch.clone();
        reversed.reverse();
        for policy in policies(quantum) {
            prop_assert_eq!(run(&batch, policy).unwrap(), run(&reversed, policy).unwrap());
        }
    }
}
