use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

use crate::Error;

/// Named pause lengths between two animated steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Speed {
    VerySlow,
    Slow,
    #[default]
    Medium,
    Fast,
    VeryFast,
    /// No pause at all. Useful for traces and benchmarks, not for watching.
    Instant,
}

impl Speed {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(match self {
            Speed::VerySlow => 500,
            Speed::Slow => 200,
            Speed::Medium => 100,
            Speed::Fast => 50,
            Speed::VeryFast => 10,
            Speed::Instant => 0,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Speed::VerySlow => "Very Slow",
            Speed::Slow => "Slow",
            Speed::Medium => "Medium",
            Speed::Fast => "Fast",
            Speed::VeryFast => "Very Fast",
            Speed::Instant => "Instant",
        }
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Speed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Speed::value_variants()
            .iter()
            .copied()
            .find(|speed| speed.name().to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownSpeed(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_get_faster() {
        let delays = Speed::value_variants()
            .iter()
            .map(Speed::delay)
            .collect::<Vec<_>>();
        assert!(delays.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(Speed::default().delay(), Duration::from_millis(100));
    }

    #[test]
    fn parses_display_names() {
        assert_eq!("Very Slow".parse::<Speed>().unwrap(), Speed::VerySlow);
        assert_eq!("very-fast".parse::<Speed>().unwrap(), Speed::VeryFast);
        assert!(matches!(
            "ludicrous".parse::<Speed>(),
            Err(Error::UnknownSpeed(_))
        ));
    }
}
