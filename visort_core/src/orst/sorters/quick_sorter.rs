use crate::orst::{Cancelled, Sorter, Step, Steps, Tag};

/// An implementation of [Quick Sort](https://en.wikipedia.org/wiki/Quicksort)
///
/// # Usage
///```
/// use visort_core::orst::{QuickSorter, Sorter};
///
/// let mut slice = [1, 5, 4, 2, 3];
/// QuickSorter.sort(&mut slice);
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
///```
///
/// # Explanation
///
/// Quicksort is an in-place sorting algorithm. Developed
/// by British computer scientist Tony Hoare in 1959 and published
/// in 1961 it is still a commonly used algorithm for
/// sorting.
///
/// # Algorithm
///
/// Quicksort is a divide-and-conquer algorithm.
/// It works by selecting a 'pivot' element from
/// the array and partitioning the other elements into two sub
/// -arrays, according to whether they are less than
/// or greater than the pivot. The sub-arrays are then sorted recursively.
///
/// This one uses the Lomuto scheme with the last element of the range as the pivot. Every
/// scanned element is compared once against the pivot; only elements strictly less than the
/// pivot move left, and only when they are not already in place. The pivot is then swapped
/// into its final slot, a swap that is always performed and counted even when the pivot is
/// already there.
pub struct QuickSorter;

fn quicksort<T: Ord + Clone>(
    slice: &mut [T],
    low: usize,
    high: usize,
    steps: &mut Steps<'_, T>,
) -> Step {
    if low >= high {
        return Ok(());
    }

    let pivot = partition(slice, low, high, steps)?;
    if pivot > low {
        quicksort(slice, low, pivot - 1, steps)?;
    }
    quicksort(slice, pivot + 1, high, steps)
}

fn partition<T: Ord + Clone>(
    slice: &mut [T],
    low: usize,
    high: usize,
    steps: &mut Steps<'_, T>,
) -> Result<usize, Cancelled> {
    // Everything left of `store` is strictly less than the pivot.
    let mut store = low;

    for scan in low..high {
        steps.compare(slice, &[scan, high], &[Tag::Comparing, Tag::Pivot])?;
        if slice[scan] < slice[high] {
            if store != scan {
                steps.swap(slice, store, scan)?;
            }
            store += 1;
        }
    }

    steps.swap_tagged(slice, store, high, [Tag::Pivot, Tag::Swapping])?;
    Ok(store)
}

impl<T> Sorter<T> for QuickSorter
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        if slice.len() < 2 {
            return Ok(());
        }

        quicksort(slice, 0, slice.len() - 1, steps)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::orst::{Outcome, Stats, Trace, TraceEvent, Unobserved};

    #[test]
    fn arbitrary_array() {
        let mut slice = [1, 5, 4, 2, 3];
        QuickSorter.sort(&mut slice);
        assert_eq!(slice, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorted_array() {
        let mut slice = (1..10).collect::<Vec<_>>();
        QuickSorter.sort(&mut slice);
        assert_eq!(slice, (1..10).collect::<Vec<_>>());
    }

    #[test]
    fn very_unsorted() {
        let mut slice = (1..1000).rev().collect::<Vec<_>>();
        QuickSorter.sort(&mut slice);
        assert_eq!(slice, (1..1000).collect::<Vec<_>>());
    }

    #[test]
    fn three_elements() {
        let mut slice = [3, 1, 2];
        let trace = Trace::record(&QuickSorter, &mut slice);
        assert_eq!(slice, [1, 2, 3]);

        let reports = trace
            .events()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Report { indices, tags } => Some((indices.clone(), tags.clone())),
                TraceEvent::Stats(_) => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(
            reports,
            vec![
                // 3 < 2 fails
                (vec![0, 2], vec![Tag::Comparing, Tag::Pivot]),
                // 1 < 2 holds and 1 moves left
                (vec![1, 2], vec![Tag::Comparing, Tag::Pivot]),
                (vec![0, 1], vec![Tag::Swapping, Tag::Swapping]),
                // pivot placement
                (vec![1, 2], vec![Tag::Pivot, Tag::Swapping]),
            ]
        );
        assert_eq!(
            trace.outcome(),
            Some(Outcome::Completed(Stats {
                comparisons: 2,
                swaps: 2
            }))
        );
    }

    #[test]
    fn equal_to_pivot_stays_right() {
        // Nothing is strictly less than the pivot, so only the pivot placement swaps.
        let mut slice = [4, 4, 4];
        let outcome = QuickSorter.animate(&mut slice, &mut Unobserved);
        assert_eq!(
            outcome.stats(),
            Stats {
                comparisons: 3,
                swaps: 2
            }
        );
    }

    #[test]
    fn simple_edge_cases() {
        let mut one = vec![1];
        QuickSorter.sort(&mut one);
        assert_eq!(one, vec![1]);

        let mut two = vec![1, 2];
        QuickSorter.sort(&mut two);
        assert_eq!(two, vec![1, 2]);

        let mut two = vec![2, 1];
        QuickSorter.sort(&mut two);
        assert_eq!(two, vec![1, 2]);

        let mut three = vec![3, 1, 2];
        QuickSorter.sort(&mut three);
        assert_eq!(three, vec![1, 2, 3]);
    }
}
