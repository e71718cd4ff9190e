use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::ProcessRecord;
use crate::core::{Priority, Ticks};

/// Bernoulli arrival process: each tick may bring one short or long job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSpec {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_priority: Priority,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 4,
            seed: 0,
        }
    }
}

impl WorkloadSpec {
    pub fn generate(&self) -> Vec<ProcessRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut procs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let priority = rng.random_range(0..=self.max_priority.max(0));

                procs.push(ProcessRecord::new(
                    procs.len() as u64,
                    t,
                    burst.max(1),
                    priority,
                ));
            }
        }

        procs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_batch() {
        let spec = WorkloadSpec::default();
        assert_eq!(spec.generate(), spec.generate());
    }

    #[test]
    fn records_are_valid_and_sequential() {
        let spec = WorkloadSpec {
            ticks: 200,
            p_arrival: 0.5,
            seed: 7,
            ..WorkloadSpec::default()
        };
        let batch = spec.generate();
        assert!(!batch.is_empty());

        for (i, record) in batch.iter().enumerate() {
            assert_eq!(record.id, i as u64);
            assert!(record.arrival < spec.ticks);
            assert!(record.burst == spec.short_burst || record.burst == spec.long_burst);
            assert!((0..=spec.max_priority).contains(&record.priority));
        }
        assert!(batch.windows(2).all(|w| w[0].arrival < w[1].arrival));
    }

    #[test]
    fn zero_arrival_probability_is_empty() {
        let spec = WorkloadSpec {
            p_arrival: 0.0,
            ..WorkloadSpec::default()
        };
        assert!(spec.generate().is_empty());
    }
}
