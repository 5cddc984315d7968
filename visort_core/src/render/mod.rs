//! Drawing runs in a terminal.
//!
//! The array becomes one line of block glyphs, one per element, sized by value and coloured by
//! the [`Tag`] of the last step. [`animate`] is the coordinating half of a run: it owns the
//! event loop, forwards every [`Update`] to a [`Terminal`] and turns Ctrl-C into a stop request.

use std::time::Duration;

use anyhow::{bail, Result};
use colored::{ColoredString, Colorize};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use prettytable::{row, Table};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::{signal, time};

use crate::controller::{Controller, Event, Frame, RunState, Update};
use crate::orst::{Algorithm, Tag};

/// Bar heights, lowest first.
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const NORMAL: (u8, u8, u8) = (0xe9, 0x45, 0x60);
const COMPARING: (u8, u8, u8) = (0xff, 0xd7, 0x00);
const SWAPPING: (u8, u8, u8) = (0x00, 0xd4, 0xff);
const SORTED: (u8, u8, u8) = (0x7b, 0x2c, 0xbf);
const PIVOT: (u8, u8, u8) = (0xff, 0x6b, 0x6b);

// How often the clock on the stats line moves while nothing else happens.
const CLOCK: Duration = Duration::from_millis(100);

/// The glyph for `value` in an array whose largest value is `max`.
pub fn glyph(value: u32, max: u32) -> char {
    if max == 0 {
        return GLYPHS[0];
    }
    let level = value.min(max) as u64 * (GLYPHS.len() - 1) as u64 / max as u64;
    GLYPHS[level as usize]
}

fn colour(tag: Option<Tag>) -> (u8, u8, u8) {
    match tag {
        None => NORMAL,
        Some(Tag::Comparing) => COMPARING,
        Some(Tag::Swapping) => SWAPPING,
        Some(Tag::Sorted) => SORTED,
        Some(Tag::Pivot) => PIVOT,
    }
}

/// Renders `frame` as a line of coloured bars.
pub fn paint(frame: &Frame) -> String {
    let max = frame.values.iter().copied().max().unwrap_or(0);
    frame
        .values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let (r, g, b) = colour(frame.tag_of(index));
            glyph(value, max).to_string().truecolor(r, g, b).to_string()
        })
        .collect()
}

/// The two live lines of a run: the bars and the stats readout.
pub struct Terminal {
    bars: ProgressBar,
    readout: ProgressBar,
    // Keeps both lines drawn together.
    _lines: MultiProgress,
}

impl Terminal {
    pub fn new(algorithm: Algorithm, values: &[u32]) -> Result<Self> {
        let lines = MultiProgress::new();

        let bars = lines.add(ProgressBar::new_spinner());
        bars.set_style(ProgressStyle::with_template("{prefix:.bold.cyan} {msg}")?);
        bars.set_prefix(format!("{:>14}", algorithm.name()));
        bars.set_message(paint(&Frame::plain(values)));

        let readout = lines.add(ProgressBar::new_spinner());
        readout.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        readout.enable_steady_tick(CLOCK);

        Ok(Terminal {
            bars,
            readout,
            _lines: lines,
        })
    }

    pub fn frame(&self, frame: &Frame) {
        self.bars.set_message(paint(frame));
    }

    /// Refreshes the stats line from the controller.
    pub fn readout(&self, controller: &Controller) {
        let stats = controller.stats();
        let state = match controller.state() {
            RunState::StopRequested => " (stopping)".yellow().to_string(),
            _ => String::new(),
        };

        self.readout.set_message(format!(
            "Comparisons: {}  Swaps: {}  Time: {:.2}s{state}",
            stats.comparisons.to_string().bold(),
            stats.swaps.to_string().bold(),
            controller.elapsed().as_secs_f64()
        ));
    }

    /// Draws the last frame and leaves both lines on screen.
    pub fn finish(&self, frame: &Frame, controller: &Controller) {
        self.readout(controller);
        self.bars.finish_with_message(paint(frame));
        self.readout.finish();
    }
}

/// Feeds worker events through `controller` until the run is over, drawing as it goes.
///
/// Ctrl-C asks the run to stop; the loop still waits for the worker to hand the array back.
/// A second Ctrl-C gives up on the worker and returns an error. Returns the final frame.
pub async fn animate(
    controller: &mut Controller,
    events: &mut UnboundedReceiver<Event>,
    terminal: &Terminal,
) -> Result<Frame> {
    let mut clock = time::interval(CLOCK);
    // One listener for the whole run, so a Ctrl-C between two passes is not lost.
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            interrupted = &mut ctrl_c => {
                interrupted?;
                ctrl_c.set(signal::ctrl_c());
                interrupt(controller)?;
                terminal.readout(controller);
            }
            event = events.recv() => {
                let Some(event) = event else {
                    bail!("The sort worker went away without handing the array back");
                };

                match controller.handle(event) {
                    Update::Frame(frame) => terminal.frame(&frame),
                    Update::Stats(_) => terminal.readout(controller),
                    Update::Finished(frame) => {
                        terminal.finish(&frame, controller);
                        return Ok(frame);
                    }
                }
            }
            _ = clock.tick() => terminal.readout(controller),
        }
    }
}

/// Turns one Ctrl-C into a stop request. Fails if a stop was already requested.
pub fn interrupt(controller: &mut Controller) -> Result<()> {
    match controller.state() {
        RunState::Running => {
            controller.stop();
            Ok(())
        }
        RunState::StopRequested => bail!("Interrupted again before the sort worker stopped"),
        RunState::Idle | RunState::Completed => Ok(()),
    }
}

fn outcome(state: RunState) -> ColoredString {
    match state {
        RunState::Completed => "Completed".green().bold(),
        RunState::Running | RunState::StopRequested => "Running".yellow(),
        RunState::Idle => "Stopped".yellow().bold(),
    }
}

/// A summary of the controller's last run.
pub fn summary(controller: &Controller) -> Table {
    let stats = controller.stats();
    let algorithm = controller
        .algorithm()
        .map(|algorithm| algorithm.name())
        .unwrap_or("-");

    let mut table = Table::new();
    table.add_row(row!["Algorithm".bold(), algorithm]);
    table.add_row(row!["Outcome".bold(), outcome(controller.state())]);
    table.add_row(row!["Elements".bold(), controller.array().len()]);
    table.add_row(row!["Comparisons".bold(), stats.comparisons]);
    table.add_row(row!["Swaps".bold(), stats.swaps]);
    table.add_row(row![
        "Time Taken".bold(),
        format!("{:?}", controller.elapsed())
    ]);
    table
}

/// The catalogue entries of `algorithms`, one row each.
pub fn catalogue(algorithms: &[Algorithm]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Sorter".bold(),
        "How it works".bold(),
        "Time".bold(),
        "Best Case".bold(),
        "Space".bold(),
        "Stable".bold()
    ]);

    for algorithm in algorithms {
        let info = algorithm.info();
        let stable = if info.stable {
            "Yes".green()
        } else {
            "No".red()
        };
        table.add_row(row![
            algorithm.name().bold().cyan(),
            info.description,
            info.time,
            info.best_case,
            info.space,
            stable
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Speed;

    fn plain_colours() {
        colored::control::set_override(false);
    }

    #[test]
    fn glyphs_scale_with_value() {
        assert_eq!(glyph(0, 390), '▁');
        assert_eq!(glyph(390, 390), '█');
        assert_eq!(glyph(195, 390), '▄');
        assert_eq!(glyph(7, 0), '▁');
        assert_eq!(glyph(500, 390), '█');
    }

    #[test]
    fn one_glyph_per_element() {
        plain_colours();
        let painted = paint(&Frame::plain(&[390, 10, 200]));
        assert_eq!(painted, "█▁▄");
    }

    #[test]
    fn tags_pick_colours() {
        assert_eq!(colour(None), NORMAL);
        assert_eq!(colour(Some(Tag::Pivot)), PIVOT);

        let frame = Frame {
            values: vec![1, 2],
            indices: vec![1],
            tags: vec![Tag::Swapping],
        };
        assert_eq!(colour(frame.tag_of(0)), NORMAL);
        assert_eq!(colour(frame.tag_of(1)), SWAPPING);
    }

    #[test]
    fn paints_frames_with_missing_tags() {
        plain_colours();
        let frame = Frame {
            values: vec![390, 10, 200],
            indices: vec![0, 1, 2],
            tags: vec![Tag::Comparing],
        };
        assert_eq!(colour(frame.tag_of(2)), NORMAL);
        assert_eq!(paint(&frame), "█▁▄");
    }

    #[test]
    fn first_interrupt_stops_and_second_gives_up() {
        let (mut controller, mut events) = Controller::new();
        controller.set_speed(Speed::VerySlow).unwrap();
        controller.load(vec![5, 4, 3, 2, 1]).unwrap();

        // Nothing to stop yet.
        interrupt(&mut controller).unwrap();
        assert_eq!(controller.state(), RunState::Idle);

        controller.start(Algorithm::Bubble).unwrap();
        interrupt(&mut controller).unwrap();
        assert_eq!(controller.state(), RunState::StopRequested);
        assert!(interrupt(&mut controller).is_err());

        while let Some(event) = events.blocking_recv() {
            if let Update::Finished(_) = controller.handle(event) {
                break;
            }
        }
        assert_eq!(controller.state(), RunState::Idle);
        interrupt(&mut controller).unwrap();
    }

    #[test]
    fn catalogue_lists_every_algorithm() {
        plain_colours();
        let table = catalogue(&Algorithm::ALL).to_string();
        for algorithm in Algorithm::ALL {
            assert!(table.contains(algorithm.name()), "{algorithm}");
        }
        assert!(table.contains("O(n log n)"));
    }

    #[test]
    fn summary_of_a_fresh_controller() {
        plain_colours();
        let (controller, _events) = Controller::new();
        let table = summary(&controller).to_string();
        assert!(table.contains("Stopped"));
        assert!(table.contains("Comparisons"));
    }
}
