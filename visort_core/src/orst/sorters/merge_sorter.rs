use crate::orst::{Sorter, Step, Steps, Tag};

/// An implementation of [Merge Sort](https://en.wikipedia.org/wiki/Merge_sort)
///
/// # Usage
///```
/// use visort_core::orst::{MergeSorter, Sorter};
///
/// let mut slice = [1, 5, 4, 2, 3];
/// MergeSorter.sort(&mut slice);
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
///```
///
/// # Explanation
///
/// Merge sort is a divide-and-conquer algorithm invented by John von Neumann in 1945. It
/// divides the unsorted list into halves until every part holds a single element, then
/// repeatedly merges parts to produce new sorted parts until only one remains.
///
/// # Algorithm
///
/// The range `left..=right` is split at `(left + right) / 2`. Both halves are sorted, copied
/// out and merged back: while both runs have elements the heads are compared, and the left
/// head wins ties so equal elements keep their input order. Whatever remains in either run is
/// then copied back without further comparisons.
///
/// Every element written back counts as one swap, including the leftovers. A comparison reports
/// the slot being filled together with the head of the right run, which is the only head still
/// sitting at its original position.
pub struct MergeSorter;

fn merge_sort<T: Ord + Clone>(
    slice: &mut [T],
    left: usize,
    right: usize,
    steps: &mut Steps<'_, T>,
) -> Step {
    if left >= right {
        return Ok(());
    }

    let mid = left + (right - left) / 2;
    merge_sort(slice, left, mid, steps)?;
    merge_sort(slice, mid + 1, right, steps)?;
    merge(slice, left, mid, right, steps)
}

fn merge<T: Ord + Clone>(
    slice: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    steps: &mut Steps<'_, T>,
) -> Step {
    let left_run = slice[left..=mid].to_vec();
    let right_run = slice[mid + 1..=right].to_vec();

    let (mut i, mut j) = (0, 0);
    let mut k = left;

    while i < left_run.len() && j < right_run.len() {
        steps.compare(slice, &[k, mid + 1 + j], &[Tag::Comparing, Tag::Comparing])?;

        let next = if left_run[i] <= right_run[j] {
            i += 1;
            left_run[i - 1].clone()
        } else {
            j += 1;
            right_run[j - 1].clone()
        };
        steps.place(slice, k, next)?;
        k += 1;
    }

    for rest in left_run[i..].iter().chain(&right_run[j..]) {
        steps.place(slice, k, rest.clone())?;
        k += 1;
    }

    Ok(())
}

impl<T> Sorter<T> for MergeSorter
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        if slice.len() < 2 {
            return Ok(());
        }

        merge_sort(slice, 0, slice.len() - 1, steps)
    }
}
