use std::fmt::{self, Display};
use std::str::FromStr;

use clap::ValueEnum;

use super::{
    BubbleSorter, InsertionSorter, MergeSorter, QuickSorter, SelectionSorter, Sorter, Step, Steps,
};
use crate::Error;

/// The five sorts a run can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

/// What the info panel says about an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub description: &'static str,
    pub time: &'static str,
    pub best_case: &'static str,
    pub space: &'static str,
    pub stable: bool,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    pub fn info(&self) -> AlgorithmInfo {
        match self {
            Algorithm::Bubble => AlgorithmInfo {
                description: "Repeatedly swaps adjacent elements if they're in wrong order.",
                time: "O(n²)",
                best_case: "O(n) when already sorted",
                space: "O(1)",
                stable: true,
            },
            Algorithm::Selection => AlgorithmInfo {
                description: "Finds the minimum element and places it at the beginning.",
                time: "O(n²)",
                best_case: "O(n²) always",
                space: "O(1)",
                stable: false,
            },
            Algorithm::Insertion => AlgorithmInfo {
                description: "Builds the sorted array one element at a time.",
                time: "O(n²)",
                best_case: "O(n) when nearly sorted",
                space: "O(1)",
                stable: true,
            },
            Algorithm::Merge => AlgorithmInfo {
                description: "Divides the array in halves and merges the sorted halves.",
                time: "O(n log n)",
                best_case: "O(n log n) always",
                space: "O(n)",
                stable: true,
            },
            Algorithm::Quick => AlgorithmInfo {
                description: "Partitions around the last element and sorts both sides.",
                time: "O(n log n) avg, O(n²) worst",
                best_case: "O(n log n) with balanced partitions",
                space: "O(log n)",
                stable: false,
            },
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts both the short name (`quick`) and the display name (`Quick Sort`), in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| {
                let name = algorithm.name().to_lowercase();
                wanted == name || Some(wanted.as_str()) == name.strip_suffix(" sort")
            })
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

impl<T> Sorter<T> for Algorithm
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        match self {
            Algorithm::Bubble => BubbleSorter.sort_by_steps(slice, steps),
            Algorithm::Selection => SelectionSorter.sort_by_steps(slice, steps),
            Algorithm::Insertion => InsertionSorter.sort_by_steps(slice, steps),
            Algorithm::Merge => MergeSorter.sort_by_steps(slice, steps),
            Algorithm::Quick => QuickSorter.sort_by_steps(slice, steps),
        }
    }
}
