use std::cell::Cell;
use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use visort_core::orst::{Observer, Stats, Tag};

/// One callback as an observer saw it, with the array right after the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen<T> {
    pub array: Vec<T>,
    pub indices: Vec<usize>,
    pub tags: Vec<Tag>,
}

/// Records everything and lets the sort take `budget` steps before asking it to stop.
///
/// Each poll of `should_continue` spends one unit of the budget, so a budget of `0` stops the
/// sort before its first step.
pub struct StopAfter<T> {
    budget: Cell<usize>,
    pub seen: Vec<Seen<T>>,
    pub stats: Vec<Stats>,
}

impl<T> StopAfter<T> {
    pub fn new(budget: usize) -> Self {
        StopAfter {
            budget: Cell::new(budget),
            seen: Vec::new(),
            stats: Vec::new(),
        }
    }

    /// Never stops.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn last_stats(&self) -> Stats {
        self.stats.last().copied().unwrap_or_default()
    }
}

impl<T: Clone> Observer<T> for StopAfter<T> {
    fn report(&mut self, array: &[T], indices: &[usize], tags: &[Tag]) {
        self.seen.push(Seen {
            array: array.to_vec(),
            indices: indices.to_vec(),
            tags: tags.to_vec(),
        });
    }

    fn report_stats(&mut self, stats: Stats) {
        self.stats.push(stats);
    }

    fn should_continue(&self) -> bool {
        match self.budget.get() {
            0 => false,
            left => {
                self.budget.set(left - 1);
                true
            }
        }
    }
}

/// A value ordered by `key` alone, so equal keys with different `id`s show whether a sort is
/// stable.
#[derive(Debug, Clone, Copy)]
pub struct Keyed {
    pub key: u32,
    pub id: usize,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Tags each key with its position, ready for a stability check.
pub fn keyed(keys: &[u32]) -> Vec<Keyed> {
    keys.iter()
        .enumerate()
        .map(|(id, &key)| Keyed { key, id })
        .collect()
}

/// `true` if equal keys kept the order of their ids.
pub fn is_stable(sorted: &[Keyed]) -> bool {
    sorted
        .windows(2)
        .all(|pair| pair[0].key != pair[1].key || pair[0].id < pair[1].id)
}

/// `1..=n` in a fixed shuffled order.
pub fn shuffled(n: u32, seed: u64) -> Vec<u32> {
    let mut values = (1..=n).collect::<Vec<_>>();
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    values
}

/// `n..=1`.
pub fn reversed(n: u32) -> Vec<u32> {
    (1..=n).rev().collect()
}

/// `true` if `a` and `b` hold the same values, in any order.
pub fn same_values<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a == b
}
