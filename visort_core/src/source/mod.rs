//! Where arrays come from.
//!
//! Every array holds positive values between [`MIN_VALUE`] and [`MAX_VALUE`] and is built under
//! one of four [`Pattern`]s. Generation takes any [`Rng`], so a seeded generator gives the same
//! array every time.

use std::fmt::{self, Display};
use std::str::FromStr;

use clap::ValueEnum;
use rand::seq::index;
use rand::Rng;

use crate::Error;

pub const MIN_VALUE: u32 = 10;
pub const MAX_VALUE: u32 = 390;

/// Smallest array a run accepts.
pub const MIN_SIZE: usize = 5;
/// Largest array a run accepts.
pub const MAX_SIZE: usize = 100;
pub const DEFAULT_SIZE: usize = 30;

/// The only values a [`Pattern::FewUnique`] array is drawn from.
pub const FEW_UNIQUE: [u32; 5] = [50, 150, 200, 300, 350];

// Gap between neighbours in the evenly spaced patterns.
const STRIDE: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Pattern {
    /// Uniformly random values.
    #[default]
    Random,
    /// Ascending, with about a tenth of the positions swapped in pairs.
    NearlySorted,
    /// Strictly descending.
    Reversed,
    /// Random picks from a five value palette, so duplicates everywhere.
    FewUnique,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Random,
        Pattern::NearlySorted,
        Pattern::Reversed,
        Pattern::FewUnique,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Random => "Random",
            Pattern::NearlySorted => "Nearly Sorted",
            Pattern::Reversed => "Reversed",
            Pattern::FewUnique => "Few Unique",
        }
    }

    /// Builds an array of `len` values following this pattern.
    pub fn generate<R>(self, len: usize, rng: &mut R) -> Vec<u32>
    where
        R: Rng + ?Sized,
    {
        match self {
            Pattern::Random => (0..len)
                .map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE))
                .collect(),
            Pattern::NearlySorted => {
                let stride = stride_for(len);
                let mut values = (0..len as u32)
                    .map(|i| MIN_VALUE + i * stride)
                    .collect::<Vec<_>>();

                if len >= 2 {
                    for _ in 0..(len / 10).max(1) {
                        let picked = index::sample(rng, len, 2);
                        values.swap(picked.index(0), picked.index(1));
                    }
                }
                values
            }
            Pattern::Reversed => {
                let stride = stride_for(len);
                let top = MAX_VALUE.max(MIN_VALUE + len.saturating_sub(1) as u32 * stride);
                (0..len as u32).map(|i| top - i * stride).collect()
            }
            Pattern::FewUnique => (0..len)
                .map(|_| FEW_UNIQUE[rng.gen_range(0..FEW_UNIQUE.len())])
                .collect(),
        }
    }
}

// Keeps evenly spaced arrays strictly monotonic, and inside the value range as long as the
// length leaves room for it.
fn stride_for(len: usize) -> u32 {
    if len < 2 {
        return STRIDE;
    }
    let room = (MAX_VALUE - MIN_VALUE) / (len as u32 - 1);
    STRIDE.min(room).max(1)
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Pattern::ALL
            .into_iter()
            .find(|pattern| pattern.name().to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn random_stays_in_range() {
        let values = Pattern::Random.generate(DEFAULT_SIZE, &mut rng());
        assert_eq!(values.len(), DEFAULT_SIZE);
        assert!(values
            .iter()
            .all(|value| (MIN_VALUE..=MAX_VALUE).contains(value)));
    }

    #[test]
    fn nearly_sorted_is_a_few_swaps_away() {
        let values = Pattern::NearlySorted.generate(DEFAULT_SIZE, &mut rng());

        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(
            sorted,
            (0..DEFAULT_SIZE as u32)
                .map(|i| MIN_VALUE + i * STRIDE)
                .collect::<Vec<_>>()
        );

        // Three pair swaps move at most six positions.
        let moved = values.iter().zip(&sorted).filter(|(a, b)| a != b).count();
        assert!(moved <= 6, "{moved} positions moved");
    }

    #[test]
    fn reversed_is_strictly_descending() {
        for len in [1, DEFAULT_SIZE, MAX_SIZE] {
            let values = Pattern::Reversed.generate(len, &mut rng());
            assert_eq!(values.len(), len);
            assert_eq!(values[0], MAX_VALUE);
            assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
            assert!(values.iter().all(|value| *value >= MIN_VALUE));
        }
    }

    #[test]
    fn long_reversed_arrays_grow_past_the_top() {
        let values = Pattern::Reversed.generate(1000, &mut rng());
        assert_eq!(values.last(), Some(&MIN_VALUE));
        assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn short_arrays_keep_a_stride_of_four() {
        let values = Pattern::Reversed.generate(5, &mut rng());
        assert_eq!(values, [390, 386, 382, 378, 374]);
    }

    #[test]
    fn few_unique_uses_the_palette() {
        let values = Pattern::FewUnique.generate(MAX_SIZE, &mut rng());
        assert!(values.iter().all(|value| FEW_UNIQUE.contains(value)));
    }

    #[test]
    fn tiny_arrays() {
        for pattern in Pattern::ALL {
            assert!(pattern.generate(0, &mut rng()).is_empty());
            assert_eq!(pattern.generate(1, &mut rng()).len(), 1);
        }
    }

    #[test]
    fn parses_names() {
        assert_eq!(
            "nearly-sorted".parse::<Pattern>().unwrap(),
            Pattern::NearlySorted
        );
        assert_eq!("Few Unique".parse::<Pattern>().unwrap(), Pattern::FewUnique);
        assert!(matches!(
            "zigzag".parse::<Pattern>(),
            Err(Error::UnknownPattern(_))
        ));
    }
}
