//! The step protocol every sorter speaks.
//!
//! A sorter never talks to a front end directly. It hands each comparison and each swap to
//! [`Steps`], which
//!
//! 1. asks the [`Observer`] whether the run should continue,
//! 2. bumps the matching counter,
//! 3. reports the touched indices with their [`Tag`]s,
//! 4. reports the cumulative [`Stats`], and
//! 5. pauses for [`Observer::delay`].
//!
//! When the observer says stop, the step returns [`Cancelled`] and the sorter bails out with
//! `?`, leaving the slice however far it got.

use std::error::Error as StdError;
use std::fmt;
use std::thread;
use std::time::Duration;

use serde::Serialize;

/// What is happening to an index in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Comparing,
    Swapping,
    Pivot,
    Sorted,
}

/// Cumulative counters of one run. Both only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub comparisons: u64,
    pub swaps: u64,
}

/// Returned by a step once the observer has asked the run to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sort cancelled")
    }
}

impl StdError for Cancelled {}

/// Result of a single step, or of a whole stepped sort.
pub type Step = Result<(), Cancelled>;

/// How a stepped sort ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed(Stats),
    Cancelled(Stats),
}

impl Outcome {
    pub fn stats(&self) -> Stats {
        match *self {
            Outcome::Completed(stats) | Outcome::Cancelled(stats) => stats,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

/// The four hooks a stepped sort consults.
///
/// `report` and `report_stats` are the animation and statistics sinks. `should_continue` and
/// `delay` are the oracle, polled before and after every step.
///
/// `report` also receives the whole array as it looks right after the step, so a sink that has
/// to hand the frame to another thread can copy it without ever touching the sorter's memory
/// later.
pub trait Observer<T> {
    fn report(&mut self, array: &[T], indices: &[usize], tags: &[Tag]);

    fn report_stats(&mut self, stats: Stats);

    fn delay(&self) -> Duration {
        Duration::ZERO
    }

    fn should_continue(&self) -> bool {
        true
    }
}

/// An observer that watches nothing, never waits and never stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl<T> Observer<T> for Unobserved {
    #[inline]
    fn report(&mut self, _array: &[T], _indices: &[usize], _tags: &[Tag]) {}

    #[inline]
    fn report_stats(&mut self, _stats: Stats) {}
}

/// Builds an [`Observer`] out of four plain closures.
///
/// ```
/// use std::time::Duration;
/// use visort_core::orst::{Algorithm, Callbacks, Sorter, Stats, Tag};
///
/// let mut frames = 0;
/// let mut last = None;
/// let mut callbacks = Callbacks {
///     report: |_indices: &[usize], _tags: &[Tag]| frames += 1,
///     delay: || Duration::ZERO,
///     should_continue: || true,
///     report_stats: |stats: Stats| last = Some(stats),
/// };
///
/// let mut array = [3, 1, 2];
/// Algorithm::Bubble.animate(&mut array[..], &mut callbacks);
/// drop(callbacks);
///
/// assert_eq!(array, [1, 2, 3]);
/// assert_eq!(frames, 5);
/// assert_eq!(last.map(|stats| stats.swaps), Some(2));
/// ```
pub struct Callbacks<R, D, C, S> {
    pub report: R,
    pub delay: D,
    pub should_continue: C,
    pub report_stats: S,
}

impl<T, R, D, C, S> Observer<T> for Callbacks<R, D, C, S>
where
    R: FnMut(&[usize], &[Tag]),
    D: Fn() -> Duration,
    C: Fn() -> bool,
    S: FnMut(Stats),
{
    fn report(&mut self, _array: &[T], indices: &[usize], tags: &[Tag]) {
        (self.report)(indices, tags)
    }

    fn report_stats(&mut self, stats: Stats) {
        (self.report_stats)(stats)
    }

    fn delay(&self) -> Duration {
        (self.delay)()
    }

    fn should_continue(&self) -> bool {
        (self.should_continue)()
    }
}

/// Counts, reports and paces the steps of one sort.
///
/// One `Steps` lives for exactly one run and is threaded by `&mut` through every recursive
/// call, so the counters never have to be passed back up.
pub struct Steps<'a, T> {
    observer: &'a mut dyn Observer<T>,
    stats: Stats,
}

impl<'a, T> Steps<'a, T> {
    pub fn new(observer: &'a mut dyn Observer<T>) -> Self {
        Self {
            observer,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Polls the observer without doing any work.
    #[inline]
    pub fn proceed(&self) -> Step {
        if self.observer.should_continue() {
            Ok(())
        } else {
            Err(Cancelled)
        }
    }

    /// Records one comparison between the elements at `indices`.
    ///
    /// The caller makes the actual comparison after this returns `Ok`.
    pub fn compare(&mut self, array: &[T], indices: &[usize], tags: &[Tag]) -> Step {
        self.proceed()?;
        self.stats.comparisons += 1;
        self.emit(array, indices, tags);
        Ok(())
    }

    /// Swaps `a` and `b` and records it as one swap.
    pub fn swap(&mut self, array: &mut [T], a: usize, b: usize) -> Step {
        self.swap_tagged(array, a, b, [Tag::Swapping, Tag::Swapping])
    }

    /// Like [`Steps::swap`], with the tags for `a` and `b` chosen by the caller.
    pub fn swap_tagged(&mut self, array: &mut [T], a: usize, b: usize, tags: [Tag; 2]) -> Step {
        self.proceed()?;
        array.swap(a, b);
        self.stats.swaps += 1;
        self.emit(array, &[a, b], &tags);
        Ok(())
    }

    /// Writes `value` into `index` and records it as one swap.
    pub fn place(&mut self, array: &mut [T], index: usize, value: T) -> Step {
        self.proceed()?;
        array[index] = value;
        self.stats.swaps += 1;
        self.emit(array, &[index], &[Tag::Swapping]);
        Ok(())
    }

    fn emit(&mut self, array: &[T], indices: &[usize], tags: &[Tag]) {
        self.observer.report(array, indices, tags);
        self.observer.report_stats(self.stats);

        let delay = self.observer.delay();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
