//! Recording every step of a sort.
//!
//! For a fixed input and algorithm the sequence of reports and stats is fully deterministic, so
//! a [`Trace`] doubles as a golden file: `visort trace` prints one as JSON lines.

use serde::Serialize;

use super::{Observer, Outcome, Sorter, Stats, Tag};

/// One callback as the sorter made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TraceEvent {
    Report { indices: Vec<usize>, tags: Vec<Tag> },
    Stats(Stats),
}

/// An observer that keeps every callback in order.
#[derive(Debug, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
    outcome: Option<Outcome>,
}

impl Trace {
    /// Runs `sorter` over `slice` with nothing but a fresh `Trace` watching.
    pub fn record<T, S>(sorter: &S, slice: &mut [T]) -> Self
    where
        T: Ord + Clone,
        S: Sorter<T> + ?Sized,
    {
        let mut trace = Trace::default();
        let outcome = sorter.animate(slice, &mut trace);
        trace.outcome = Some(outcome);
        trace
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// How the recorded run ended, if it was recorded through [`Trace::record`].
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Renders the trace as one JSON object per line.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl<T> Observer<T> for Trace {
    fn report(&mut self, _array: &[T], indices: &[usize], tags: &[Tag]) {
        self.events.push(TraceEvent::Report {
            indices: indices.to_vec(),
            tags: tags.to_vec(),
        });
    }

    fn report_stats(&mut self, stats: Stats) {
        self.events.push(TraceEvent::Stats(stats));
    }
}
