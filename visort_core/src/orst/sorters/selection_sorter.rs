use crate::orst::{Sorter, Step, Steps, Tag};

/// An implementation of [Selection Sort](https://en.wikipedia.org/wiki/Selection_sort)
///
/// # Usage
///```
/// use visort_core::orst::{SelectionSorter, Sorter};
///
/// let mut slice = [1, 5, 4, 2, 3];
/// SelectionSorter.sort(&mut slice);
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
///```
/// # Explanation
///
/// Selection sort is an in-place comparison sorting
/// algorithm. It has an O(n2) time complexity, which
/// makes it inefficient on large lists, and generally
/// performs worse than the similar insertion sort.
///
/// # Algorithm
///
/// The algorithm divides the input list into two parts:
/// a sorted sublist of items which is built
/// up from left to right at the front of the list and a sublist of
/// the remaining unsorted items. It repeatedly finds the smallest
/// element in the unsorted sublist and exchanges it with the leftmost
/// unsorted element.
///
/// While scanning, the smallest element seen so far is reported as [`Tag::Pivot`] next to the
/// element it is being compared with. The exchange only happens, and only counts, when the
/// smallest element is not already in place.
pub struct SelectionSorter;

impl<T> Sorter<T> for SelectionSorter
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        let len = slice.len();

        for unsorted in 0..len.saturating_sub(1) {
            let mut smallest_in_rest = unsorted;
            for i in (unsorted + 1)..len {
                steps.compare(
                    slice,
                    &[smallest_in_rest, i],
                    &[Tag::Pivot, Tag::Comparing],
                )?;
                if slice[i] < slice[smallest_in_rest] {
                    smallest_in_rest = i;
                }
            }

            if unsorted != smallest_in_rest {
                steps.swap(slice, unsorted, smallest_in_rest)?;
            }
        }

        Ok(())
    }
}
