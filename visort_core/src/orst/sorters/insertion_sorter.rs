use crate::orst::{Sorter, Step, Steps, Tag};

/// An implementation of [Insertion Sort](https://en.wikipedia.org/wiki/Insertion_sort)
///
/// # Explanation
///
/// Insertion sort is a simple sorting algorithm that builds the final sorted array (or list) one
/// item at a time
///
/// Insertion sort iterates, consuming one input element each repetition, and grows a sorted output
/// list. At each iteration, insertion sort removes one element from the input data, finds the
/// location it belongs within the sorted list, and inserts it there. It repeats until no input
/// elements remain.
///
/// Here the key walks left one slot at a time: every neighbour that is strictly greater is
/// shifted one slot right, and each shift is counted as a swap. Equal neighbours stop the walk,
/// so equal elements keep their input order. Because a shift is an exchange with the key rather
/// than an overwrite, a run stopped halfway still holds every element it started with.
///
/// # Usage
///```
/// use visort_core::orst::{InsertionSorter, Sorter};
///
/// let mut slice = [1, 5, 4, 2, 3];
/// InsertionSorter.sort(&mut slice);
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
///```
pub struct InsertionSorter;

impl<T> Sorter<T> for InsertionSorter
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        for unsorted in 1..slice.len() {
            let mut i = unsorted;
            while i > 0 {
                steps.compare(slice, &[i - 1, i], &[Tag::Comparing, Tag::Comparing])?;
                if slice[i - 1] <= slice[i] {
                    break;
                }
                steps.swap(slice, i - 1, i)?;
                i -= 1;
            }
        }

        Ok(())
    }
}
