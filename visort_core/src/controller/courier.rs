use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::{Event, Frame};
use crate::orst::{Observer, Stats, Tag};

/// The worker's half of a run.
///
/// Never touches anything the coordinating thread renders: every callback becomes an
/// [`Event`] on the channel, and the only shared state is the continuation flag.
pub(super) struct Courier {
    pub(super) events: UnboundedSender<Event>,
    pub(super) running: Arc<AtomicBool>,
    pub(super) delay: Duration,
}

impl Observer<u32> for Courier {
    fn report(&mut self, array: &[u32], indices: &[usize], tags: &[Tag]) {
        // A closed channel is noticed by `should_continue` on the next poll.
        let _ = self.events.send(Event::Report(Frame {
            values: array.to_vec(),
            indices: indices.to_vec(),
            tags: tags.to_vec(),
        }));
    }

    fn report_stats(&mut self, stats: Stats) {
        let _ = self.events.send(Event::Stats(stats));
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    fn should_continue(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.events.is_closed()
    }
}
