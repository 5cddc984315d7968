//! Five classic comparison sorts that narrate their own work.
//!
//! Every sorter implements [`Sorter`] by driving a [`Steps`] through each comparison and swap,
//! so the same code path serves a silent in-place sort, an animated run on a background thread
//! and a recorded [`Trace`].
//!
//! # Example
//!
//! ```
//! use visort_core::orst::BubbleSorter;
//! use visort_core::orst::Sorter;
//!
//! let mut slice = vec![1, 3, 2, 5, 4];
//! BubbleSorter.sort(&mut slice);
//! assert_eq!(vec![1, 2, 3, 4, 5], slice);
//! ```

mod algorithm;
pub mod benchmark;
mod sorters;
mod steps;
mod trace;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use sorters::bubble_sorter::BubbleSorter;
pub use sorters::insertion_sorter::InsertionSorter;
pub use sorters::merge_sorter::MergeSorter;
pub use sorters::quick_sorter::QuickSorter;
pub use sorters::selection_sorter::SelectionSorter;
pub use steps::{Callbacks, Cancelled, Observer, Outcome, Stats, Step, Steps, Tag, Unobserved};
pub use trace::{Trace, TraceEvent};

/// The sorting algorithm must implement the trait `Sorter`.
///
/// Implementors only write [`Sorter::sort_by_steps`]. Each comparison goes through
/// [`Steps::compare`] and each write through [`Steps::swap`] or [`Steps::place`], with `?` after
/// every call so a cancelled run unwinds straight out of any recursion.
pub trait Sorter<T>
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step;

    /// Sorts `slice` while `observer` watches, waits and decides whether to go on.
    fn animate(&self, slice: &mut [T], observer: &mut dyn Observer<T>) -> Outcome {
        let mut steps = Steps::new(observer);
        match self.sort_by_steps(slice, &mut steps) {
            Ok(()) => Outcome::Completed(steps.stats()),
            Err(Cancelled) => Outcome::Cancelled(steps.stats()),
        }
    }

    /// Sorts `slice` with nobody watching.
    fn sort(&self, slice: &mut [T]) {
        self.animate(slice, &mut Unobserved);
    }
}
