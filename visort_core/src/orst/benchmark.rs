//! Racing the five sorts against each other with nobody watching.
//!
//! Every element is wrapped in a [`SortEvaluator`], which counts each time `Ord` is asked about
//! it. That count is kept apart from the comparisons the sorter itself reports, so a run shows
//! both what the algorithm claims and what it actually did.

use colored::Colorize;
use std::{cell::Cell, rc::Rc, time::Duration, time::Instant};

use prettytable::{row, Table};

use super::{Algorithm, Sorter, Stats, Unobserved};
use crate::source::Pattern;

const TEN: usize = 10;
const HUNDRED: usize = 100;
const THOUSAND: usize = 1_000;
const TEN_THOUSAND: usize = 10_000;

/// Sizes used when the bench is run without any.
pub const DEFAULT_SIZES: [usize; 4] = [TEN, HUNDRED, THOUSAND, TEN_THOUSAND];

// `elem` is what gets compared; `comparison_counter` goes up with every comparison.
#[derive(Clone)]
struct SortEvaluator<T> {
    elem: T,
    // Shared between all the elements of one bench run, hence `Rc<Cell<_>>`.
    comparison_counter: Rc<Cell<usize>>,
}

impl<T> SortEvaluator<T> {
    fn new(elem: T, comparison_counter: Rc<Cell<usize>>) -> Self {
        Self {
            elem,
            comparison_counter,
        }
    }

    fn tick(&self) {
        self.comparison_counter
            .set(self.comparison_counter.get() + 1);
    }
}

impl<T: Eq> Eq for SortEvaluator<T> {}

impl<T: PartialEq> PartialEq for SortEvaluator<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tick();
        self.elem == other.elem
    }
}

impl<T: PartialOrd> PartialOrd for SortEvaluator<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.tick();
        self.elem.partial_cmp(&other.elem)
    }
}

impl<T: Ord> Ord for SortEvaluator<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tick();
        self.elem.cmp(&other.elem)
    }
}

/// What one unobserved run cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Counters as the sorter reported them.
    pub stats: Stats,
    /// How often the elements were actually compared.
    pub ord_calls: usize,
    pub elapsed: Duration,
}

/// Sorts a copy of `values` with `algorithm` and measures it.
pub fn measure(algorithm: Algorithm, values: &[u32]) -> Measurement {
    let counter = Rc::new(Cell::new(0));
    let mut wrapped = values
        .iter()
        .map(|&value| SortEvaluator::new(value, Rc::clone(&counter)))
        .collect::<Vec<_>>();

    let now = Instant::now();
    let outcome = algorithm.animate(wrapped.as_mut_slice(), &mut Unobserved);
    let elapsed = now.elapsed();

    Measurement {
        stats: outcome.stats(),
        ord_calls: counter.get(),
        elapsed,
    }
}

/// The quadratic sorts sit out anything this large.
fn too_slow(algorithm: Algorithm, n: usize) -> bool {
    n > THOUSAND && !matches!(algorithm, Algorithm::Merge | Algorithm::Quick)
}

/// Prints one table per size, covering every algorithm on every pattern.
pub fn run_bench(sizes: &[usize]) {
    let mut random = rand::thread_rng();

    for &n in sizes {
        println!(
            "{} {}",
            "List Size -> ".bold().underline().blue(),
            n.to_string().bold()
        );

        let mut table = Table::new();
        table.add_row(row![
            "Sorter".bold(),
            "Pattern".bold(),
            "Comparisons Made".bold(),
            "Swaps Made".bold(),
            "Time Taken".bold()
        ]);

        for pattern in Pattern::ALL {
            // Every algorithm gets the same array.
            let values = pattern.generate(n, &mut random);

            for algorithm in Algorithm::ALL {
                if too_slow(algorithm, n) {
                    table.add_row(row![
                        algorithm,
                        pattern,
                        "Not Doing It".red(),
                        "",
                        "It is Stupid"
                    ]);
                    continue;
                }

                let took = measure(algorithm, &values);
                tracing::debug!(%algorithm, %pattern, n, ?took, "bench run");
                table.add_row(row![
                    algorithm,
                    pattern,
                    took.stats.comparisons.to_string(),
                    took.stats.swaps.to_string(),
                    format!("{:?}", took.elapsed)
                ]);
            }
        }

        table.printstd();
        println!();
    }
}
