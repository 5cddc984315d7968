//! # Introduction
//!
//! Five classic comparison sorts that report every comparison and swap as they go, can be
//! stopped between any two steps, and run in the background under a [`controller::Controller`]
//! while a front end draws them.
//!
//! - [`orst`]: the sorts and the step protocol they speak.
//! - [`controller`]: one background run at a time, with events marshalled back to the caller.
//! - [`source`]: array generation.
//! - [`render`]: a terminal front end.

pub mod controller;
mod error;
pub mod orst;
pub mod render;
pub mod source;

pub use error::{Error, Result};

use clap::{Args, Subcommand};

use controller::{Controller, Speed};
use orst::{benchmark, Algorithm, Trace};
use render::Terminal;
use source::{Pattern, DEFAULT_SIZE};

/// Watch sorts on the commandline. Install the `visort` crate and run `visort --help` to see
/// what options are available
#[derive(Debug, Args)]
#[command(flatten_help = true, subcommand_required = true)]
pub struct SortArgs {
    #[command(subcommand)]
    command: SortCommands,
}

#[derive(Clone, Subcommand, Debug)]
enum SortCommands {
    /// Animate one sort in the terminal. Press Ctrl-C to stop it early.
    Run {
        #[arg(short, long, value_enum, default_value_t = Algorithm::Bubble)]
        algorithm: Algorithm,

        /// Number of elements to generate.
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        #[arg(long, value_enum, default_value_t = Speed::Medium)]
        speed: Speed,

        #[arg(short, long, value_enum, default_value_t = Pattern::Random)]
        pattern: Pattern,

        /// Sort exactly these values instead of generating an array.
        #[arg(long, value_delimiter = ',')]
        values: Option<Vec<u32>>,
    },

    /// Print every step of one sort as JSON lines.
    #[command(arg_required_else_help = true)]
    Trace {
        #[arg(short, long, value_enum, default_value_t = Algorithm::Bubble)]
        algorithm: Algorithm,

        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<u32>,
    },

    /// Compare all five sorts on every pattern, without animation.
    Bench {
        #[arg(long, value_delimiter = ',', default_values_t = benchmark::DEFAULT_SIZES)]
        sizes: Vec<usize>,
    },

    /// Describe the five sorts.
    List,
}

impl SortArgs {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            SortCommands::Run {
                algorithm,
                size,
                speed,
                pattern,
                values,
            } => {
                let (mut controller, mut events) = Controller::new();
                controller.set_speed(speed)?;
                controller.set_pattern(pattern)?;
                match values {
                    Some(values) => controller.load(values)?,
                    None => controller.regenerate(size)?,
                }

                let terminal = Terminal::new(algorithm, controller.array())?;
                controller.start(algorithm)?;
                render::animate(&mut controller, &mut events, &terminal).await?;

                println!();
                render::summary(&controller).printstd();
                render::catalogue(&[algorithm]).printstd();
            }
            SortCommands::Trace {
                algorithm,
                mut values,
            } => {
                let trace = Trace::record(&algorithm, values.as_mut_slice());
                print!("{}", trace.to_json_lines()?);
                tracing::debug!(outcome = ?trace.outcome(), ?values, "trace recorded");
            }
            SortCommands::Bench { sizes } => benchmark::run_bench(&sizes),
            SortCommands::List => render::catalogue(&Algorithm::ALL).printstd(),
        }

        Ok(())
    }
}
