use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, collections::VecDeque};

use super::state::{Pid, ProcKey, Ticks};

/// Selection key for the non-preemptive priority queues: smallest rank wins,
/// then earliest arrival, then smallest pid. No two processes compare equal.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct SelectKey {
    // Wide enough for both unsigned bursts and signed priorities
    pub rank: i128,
    pub arrival: Ticks,
    pub pid: Pid,
}

impl SelectKey {
    pub fn new(rank: impl Into<i128>, arrival: Ticks, pid: Pid) -> Self {
        Self {
            rank: rank.into(),
            arrival,
            pid,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop SelectKey's Ord
impl Ord for SelectKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.rank, other.arrival, other.pid).cmp(&(self.rank, self.arrival, self.pid))
    }
}

impl PartialOrd for SelectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        procs: VecDeque<ProcKey>,
    },
    Priq {
        procs: KeyedPriorityQueue<ProcKey, SelectKey>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn push_back(&mut self, key: ProcKey) {
        match self {
            Self::Fifo { procs } => procs.push_back(key),
            Self::Priq { .. } => panic!("Attempted FIFO push onto a priority DSQ"),
        }
    }

    pub fn push_priq(&mut self, key: ProcKey, select: SelectKey) {
        match self {
            Self::Priq { procs } => {
                let prev = procs.push(key, select);
                debug_assert!(prev.is_none(), "Process {} queued twice", select.pid);
            }
            Self::Fifo { .. } => panic!("Attempted keyed push onto a FIFO DSQ"),
        }
    }

    pub fn pop(&mut self) -> Option<ProcKey> {
        match self {
            Self::Fifo { procs } => procs.pop_front(),
            Self::Priq { procs } => procs.pop().map(|(key, _)| key),
        }
    }

    pub fn contains(&self, key: ProcKey) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&key),
            Self::Priq { procs } => procs.get_priority(&key).is_some(),
        }
    }

    pub fn keys(&self) -> Vec<ProcKey> {
        match self {
            Self::Fifo { procs } => procs.iter().copied().collect(),
            Self::Priq { procs } => procs.iter().map(|(key, _)| *key).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Priq { procs } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
