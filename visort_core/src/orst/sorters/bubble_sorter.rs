use crate::orst::{Sorter, Step, Steps, Tag};

/// An implementation of [Bubble Sort](https://en.wikipedia.org/wiki/Bubble_sort)
///
/// # Usage
///```
/// use visort_core::orst::{BubbleSorter, Sorter};
///
/// let mut slice = [1, 5, 4, 2, 3];
/// BubbleSorter.sort(&mut slice);
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
///```
/// # Explanation
///
/// Bubble sort, sometimes referred to as sinking sort,
/// is a simple sorting algorithm that repeatedly steps
/// through the list, compares adjacent elements and swaps
/// them if they are in the wrong order. The pass through
/// the list is repeated until the list is sorted.
///
/// Every pass leaves the largest remaining element at the end of the unsorted part, so pass
/// `p` only has to look at the first `len - p` elements. A pass without a single swap proves
/// the slice is sorted and ends the sort, which makes an already sorted slice cost exactly one
/// pass of `len - 1` comparisons.
#[derive(Default)]
pub struct BubbleSorter;

impl<T> Sorter<T> for BubbleSorter
where
    T: Ord + Clone,
{
    fn sort_by_steps(&self, slice: &mut [T], steps: &mut Steps<'_, T>) -> Step {
        let len = slice.len();

        for pass in 0..len {
            let mut swapped = false;
            for i in 1..(len - pass) {
                steps.compare(slice, &[i - 1, i], &[Tag::Comparing, Tag::Comparing])?;
                if slice[i - 1] > slice[i] {
                    steps.swap(slice, i - 1, i)?;
                    swapped = true;
                }
            }

            if !swapped {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::orst::{Outcome, Stats, Unobserved};

    #[test]
    fn arbitrary_array() {
        let mut slice = [1, 5, 4, 2, 3];
        BubbleSorter.sort(&mut slice);
        assert_eq!(slice, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn very_unsorted() {
        let mut slice = (1..1000).rev().collect::<Vec<_>>();
        BubbleSorter.sort(&mut slice);
        assert_eq!(slice, (1..1000).collect::<Vec<_>>());
    }

    #[test]
    fn reversed_five_counts() {
        let mut slice = [5, 4, 3, 2, 1];
        let outcome = BubbleSorter.animate(&mut slice, &mut Unobserved);
        assert_eq!(slice, [1, 2, 3, 4, 5]);
        assert_eq!(
            outcome,
            Outcome::Completed(Stats {
                comparisons: 10,
                swaps: 10
            })
        );
    }

    #[test]
    fn sorted_array_takes_one_pass() {
        let mut slice = (1..10).collect::<Vec<_>>();
        let outcome = BubbleSorter.animate(&mut slice, &mut Unobserved);
        assert_eq!(slice, (1..10).collect::<Vec<_>>());
        assert_eq!(
            outcome.stats(),
            Stats {
                comparisons: 8,
                swaps: 0
            }
        );
    }

    #[test]
    fn simple_edge_cases() {
        let mut empty: Vec<i32> = vec![];
        let outcome = BubbleSorter.animate(&mut empty, &mut Unobserved);
        assert_eq!(outcome, Outcome::Completed(Stats::default()));

        let mut one = vec![1];
        let outcome = BubbleSorter.animate(&mut one, &mut Unobserved);
        assert_eq!(one, vec![1]);
        assert_eq!(outcome, Outcome::Completed(Stats::default()));

        let mut two = vec![2, 1];
        BubbleSorter.sort(&mut two);
        assert_eq!(two, vec![1, 2]);

        let mut three = vec![3, 1, 2];
        BubbleSorter.sort(&mut three);
        assert_eq!(three, vec![1, 2, 3]);
    }
}
