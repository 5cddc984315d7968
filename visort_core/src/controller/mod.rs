//! Owning the array and running one sort at a time in the background.
//!
//! The [`Controller`] lives on the coordinating thread. [`Controller::start`] copies the array
//! into a named worker thread and runs the chosen [`Algorithm`] there. The worker never touches
//! controller state: each report, each stats update and the final hand-back travel as an
//! [`Event`] over an unbounded channel, and the coordinator feeds them back through
//! [`Controller::handle`] in the order they were sent.
//!
//! [`Controller::stop`] only lowers a shared flag. The worker notices at its next poll, so a
//! stop never blocks and never interrupts a step that is already under way.
//!
//! ```no_run
//! use visort_core::controller::{Controller, Update};
//! use visort_core::orst::Algorithm;
//!
//! # async fn demo() -> visort_core::Result<()> {
//! let (mut controller, mut events) = Controller::new();
//! controller.regenerate(30)?;
//! controller.start(Algorithm::Quick)?;
//!
//! while let Some(event) = events.recv().await {
//!     if let Update::Finished(frame) = controller.handle(event) {
//!         println!("{:?} -> {:?}", controller.state(), frame.values);
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod courier;
mod speed;

pub use speed::Speed;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::orst::{Algorithm, Outcome, Sorter, Stats, Tag};
use crate::source::{Pattern, MAX_SIZE, MIN_SIZE};
use crate::{Error, Result};
use courier::Courier;

/// Where the controller is in the life of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    /// Stop was requested; the worker has not handed the array back yet.
    StopRequested,
    /// The last run sorted the whole array without being stopped.
    Completed,
}

/// The array as it looked right after one step, with the indices that step touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub values: Vec<u32>,
    pub indices: Vec<usize>,
    pub tags: Vec<Tag>,
}

impl Frame {
    /// A frame with nothing highlighted.
    pub fn plain(values: &[u32]) -> Self {
        Frame {
            values: values.to_vec(),
            indices: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// A frame with every index tagged [`Tag::Sorted`].
    pub fn sorted(values: &[u32]) -> Self {
        Frame {
            values: values.to_vec(),
            indices: (0..values.len()).collect(),
            tags: vec![Tag::Sorted; values.len()],
        }
    }

    /// The tag of `index` in this frame, if it is highlighted.
    pub fn tag_of(&self, index: usize) -> Option<Tag> {
        self.indices
            .iter()
            .position(|&i| i == index)
            .and_then(|at| self.tags.get(at).copied())
    }
}

/// How the worker's run ended.
#[derive(Debug)]
pub struct Finished {
    /// The worker's copy of the array, in whatever state the run left it.
    pub array: Vec<u32>,
    /// The outcome, or the panic message if the algorithm faulted.
    pub result: std::result::Result<Outcome, String>,
}

/// One message from the worker to the coordinating thread.
#[derive(Debug)]
pub enum Event {
    Report(Frame),
    Stats(Stats),
    Finished(Finished),
}

/// What the front end should redraw after [`Controller::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Frame(Frame),
    Stats(Stats),
    /// The run is over; draw this frame last. Check [`Controller::state`] for how it ended.
    Finished(Frame),
}

pub struct Controller {
    array: Vec<u32>,
    state: RunState,
    stats: Stats,
    started: Option<Instant>,
    elapsed: Duration,
    speed: Speed,
    pattern: Pattern,
    algorithm: Option<Algorithm>,
    running: Arc<AtomicBool>,
    events: UnboundedSender<Event>,
    worker: Option<JoinHandle<()>>,
}

impl Controller {
    /// Creates an idle controller with an empty array, and the receiving end of its events.
    pub fn new() -> (Self, UnboundedReceiver<Event>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Controller {
            array: Vec::new(),
            state: RunState::Idle,
            stats: Stats::default(),
            started: None,
            elapsed: Duration::ZERO,
            speed: Speed::default(),
            pattern: Pattern::default(),
            algorithm: None,
            running: Arc::new(AtomicBool::new(false)),
            events,
            worker: None,
        };
        (controller, receiver)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// `true` from `start` until the worker's hand-back has been handled.
    pub fn in_flight(&self) -> bool {
        matches!(self.state, RunState::Running | RunState::StopRequested)
    }

    /// The array as of the last hand-back. While a run is in flight this is the array the run
    /// started from; the live one only reaches the coordinator through [`Frame`]s.
    pub fn array(&self) -> &[u32] {
        &self.array
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Wall time of the current run, or of the last one once it has finished.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) if self.in_flight() => started.elapsed(),
            _ => self.elapsed,
        }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// The algorithm of the current or last run.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Speed is fixed for the length of a run.
    pub fn set_speed(&mut self, speed: Speed) -> Result<()> {
        self.ensure_idle()?;
        self.speed = speed;
        Ok(())
    }

    /// Only affects the next [`Controller::regenerate`].
    pub fn set_pattern(&mut self, pattern: Pattern) -> Result<()> {
        self.ensure_idle()?;
        self.pattern = pattern;
        Ok(())
    }

    /// Replaces the array with a fresh one of `size` values in the current pattern.
    pub fn regenerate(&mut self, size: usize) -> Result<()> {
        self.regenerate_with(size, &mut rand::thread_rng())
    }

    /// Like [`Controller::regenerate`], drawing from `rng`.
    pub fn regenerate_with<R>(&mut self, size: usize, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        self.ensure_idle()?;
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(Error::InvalidSize(size));
        }

        let array = self.pattern.generate(size, rng);
        self.replace_array(array);
        Ok(())
    }

    /// Replaces the array with exactly `values`.
    pub fn load(&mut self, values: Vec<u32>) -> Result<()> {
        self.ensure_idle()?;
        self.replace_array(values);
        Ok(())
    }

    fn replace_array(&mut self, array: Vec<u32>) {
        self.array = array;
        self.stats = Stats::default();
        self.started = None;
        self.elapsed = Duration::ZERO;
        self.state = RunState::Idle;
        tracing::debug!(len = self.array.len(), pattern = %self.pattern, "new array");
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.in_flight() {
            Err(Error::Busy)
        } else {
            Ok(())
        }
    }

    /// Starts `algorithm` on a background thread.
    ///
    /// Refused, with nothing changed, while another run is in flight or when there is nothing
    /// to sort.
    pub fn start(&mut self, algorithm: Algorithm) -> Result<()> {
        self.ensure_idle()?;
        if self.array.is_empty() {
            return Err(Error::EmptyArray);
        }

        self.spawn(format!("sort-{algorithm:?}").to_lowercase(), algorithm)?;
        self.algorithm = Some(algorithm);

        tracing::info!(
            %algorithm,
            len = self.array.len(),
            speed = %self.speed,
            "sort started"
        );
        Ok(())
    }

    // Hands a copy of the array to `sorter` on a thread called `name` and enters `Running`.
    fn spawn<S>(&mut self, name: String, sorter: S) -> Result<()>
    where
        S: Sorter<u32> + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let courier = Courier {
            events: self.events.clone(),
            running: Arc::clone(&running),
            delay: self.speed.delay(),
        };
        let array = self.array.clone();

        let worker = thread::Builder::new()
            .name(name)
            .spawn(move || work(sorter, array, courier))
            .map_err(Error::Spawn)?;

        self.running = running;
        self.worker = Some(worker);
        self.stats = Stats::default();
        self.started = Some(Instant::now());
        self.elapsed = Duration::ZERO;
        self.state = RunState::Running;
        Ok(())
    }

    /// Asks the running sort to stop at its next poll. Returns immediately.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.running.store(false, Ordering::Release);
            self.state = RunState::StopRequested;
            tracing::info!("stop requested");
        }
    }

    /// Applies one event from the worker on the coordinating thread.
    pub fn handle(&mut self, event: Event) -> Update {
        match event {
            Event::Report(frame) => Update::Frame(frame),
            Event::Stats(stats) => {
                self.stats = stats;
                Update::Stats(stats)
            }
            Event::Finished(finished) => self.finish(finished),
        }
    }

    fn finish(&mut self, Finished { array, result }: Finished) -> Update {
        if let Some(worker) = self.worker.take() {
            // The hand-back is the worker's last act, so this returns almost at once.
            if worker.join().is_err() {
                tracing::warn!("sort worker exited abnormally");
            }
        }

        self.elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        self.array = array;

        let stopped = self.state == RunState::StopRequested;
        match result {
            Ok(Outcome::Completed(stats)) if !stopped => {
                self.stats = stats;
                self.state = RunState::Completed;
                tracing::info!(
                    comparisons = stats.comparisons,
                    swaps = stats.swaps,
                    elapsed = ?self.elapsed,
                    "sort completed"
                );
                Update::Finished(Frame::sorted(&self.array))
            }
            Ok(outcome) => {
                self.state = RunState::Idle;
                tracing::info!(stats = ?outcome.stats(), "sort stopped");
                Update::Finished(Frame::plain(&self.array))
            }
            Err(fault) => {
                self.state = RunState::Idle;
                tracing::warn!(%fault, "sort abandoned after a fault");
                Update::Finished(Frame::plain(&self.array))
            }
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Let a detached worker wind down instead of sorting into a closed channel.
        self.running.store(false, Ordering::Release);
    }
}

// Body of the worker thread. Always ends by handing the array back.
fn work<S>(sorter: S, mut array: Vec<u32>, mut courier: Courier)
where
    S: Sorter<u32>,
{
    let worker = thread::current();
    let worker = worker.name().unwrap_or("sort");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        sorter.animate(array.as_mut_slice(), &mut courier)
    }))
    .map_err(|payload| {
        let fault = panic_message(payload.as_ref());
        tracing::error!(worker, %fault, "sort worker panicked");
        fault
    });

    if let Ok(outcome) = &result {
        tracing::debug!(worker, ?outcome, "sort worker done");
    }

    let _ = courier
        .events
        .send(Event::Finished(Finished { array, result }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orst::{Step, Steps};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Takes three steps on the first three elements, then gives up.
    struct Faulty;

    impl Sorter<u32> for Faulty {
        fn sort_by_steps(&self, slice: &mut [u32], steps: &mut Steps<'_, u32>) -> Step {
            steps.compare(slice, &[0, 1], &[Tag::Comparing, Tag::Comparing])?;
            steps.swap(slice, 0, 1)?;
            steps.compare(slice, &[1, 2], &[Tag::Comparing, Tag::Comparing])?;
            panic!("lost track of the pivot");
        }
    }

    fn idle_with(values: &[u32]) -> (Controller, UnboundedReceiver<Event>) {
        let (mut controller, events) = Controller::new();
        controller.set_speed(Speed::Instant).unwrap();
        controller.load(values.to_vec()).unwrap();
        (controller, events)
    }

    fn drain(controller: &mut Controller, events: &mut UnboundedReceiver<Event>) -> Vec<Update> {
        let mut updates = Vec::new();
        while let Some(event) = events.blocking_recv() {
            let update = controller.handle(event);
            let done = matches!(update, Update::Finished(_));
            updates.push(update);
            if done {
                break;
            }
        }
        updates
    }

    #[test]
    fn starts_idle_and_empty() {
        let (controller, _events) = Controller::new();
        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.array().is_empty());
        assert_eq!(controller.stats(), Stats::default());
    }

    #[test]
    fn refuses_to_start_on_an_empty_array() {
        let (mut controller, _events) = Controller::new();
        assert!(matches!(
            controller.start(Algorithm::Bubble),
            Err(Error::EmptyArray)
        ));
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn completed_run_ends_with_everything_sorted() {
        let (mut controller, mut events) = idle_with(&[5, 4, 3, 2, 1]);
        controller.start(Algorithm::Bubble).unwrap();
        assert_eq!(controller.state(), RunState::Running);

        let updates = drain(&mut controller, &mut events);

        assert_eq!(controller.state(), RunState::Completed);
        assert_eq!(controller.array(), [1, 2, 3, 4, 5]);
        assert_eq!(
            controller.stats(),
            Stats {
                comparisons: 10,
                swaps: 10
            }
        );

        // 10 comparisons and 10 swaps, each a report followed by stats, then the hand-back.
        assert_eq!(updates.len(), 41);
        assert_eq!(
            updates.last(),
            Some(&Update::Finished(Frame::sorted(&[1, 2, 3, 4, 5])))
        );
    }

    #[test]
    fn busy_controller_refuses_changes() {
        let (mut controller, mut events) = idle_with(&[3, 1, 2]);
        controller.start(Algorithm::Merge).unwrap();

        assert!(matches!(controller.start(Algorithm::Quick), Err(Error::Busy)));
        assert!(matches!(controller.regenerate(10), Err(Error::Busy)));
        assert!(matches!(controller.load(vec![1]), Err(Error::Busy)));
        assert!(matches!(controller.set_speed(Speed::Slow), Err(Error::Busy)));
        assert_eq!(controller.algorithm(), Some(Algorithm::Merge));

        drain(&mut controller, &mut events);
        assert!(controller.regenerate(10).is_ok());
        assert_eq!(controller.array().len(), 10);
        assert_eq!(controller.stats(), Stats::default());
    }

    #[test]
    fn stop_before_the_first_poll_changes_nothing() {
        let (mut controller, mut events) = Controller::new();
        controller.set_speed(Speed::VerySlow).unwrap();
        controller.load(vec![5, 4, 3, 2, 1]).unwrap();

        controller.start(Algorithm::Selection).unwrap();
        controller.stop();
        assert_eq!(controller.state(), RunState::StopRequested);

        let updates = drain(&mut controller, &mut events);
        assert_eq!(controller.state(), RunState::Idle);

        // At most the step that raced the stop got through.
        let frames = updates
            .iter()
            .filter(|update| matches!(update, Update::Frame(_)))
            .count();
        assert!(frames <= 1);
        assert!(matches!(
            updates.last(),
            Some(Update::Finished(frame)) if frame.indices.is_empty()
        ));
    }

    #[test]
    fn regenerate_checks_the_size() {
        let (mut controller, _events) = Controller::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            controller.regenerate_with(MIN_SIZE - 1, &mut rng),
            Err(Error::InvalidSize(_))
        ));
        assert!(matches!(
            controller.regenerate_with(MAX_SIZE + 1, &mut rng),
            Err(Error::InvalidSize(_))
        ));

        controller.set_pattern(Pattern::Reversed).unwrap();
        controller.regenerate_with(MIN_SIZE, &mut rng).unwrap();
        assert_eq!(controller.array(), [390, 386, 382, 378, 374]);
    }

    #[test]
    fn frame_tags_by_index() {
        let frame = Frame::sorted(&[1, 2]);
        assert_eq!(frame.tag_of(1), Some(Tag::Sorted));
        assert_eq!(Frame::plain(&[1, 2]).tag_of(1), None);
    }

    #[test]
    fn untagged_indices_have_no_tag() {
        let frame = Frame {
            values: vec![4, 5, 6],
            indices: vec![0, 2],
            tags: vec![Tag::Swapping],
        };
        assert_eq!(frame.tag_of(0), Some(Tag::Swapping));
        assert_eq!(frame.tag_of(2), None);
        assert_eq!(frame.tag_of(1), None);
    }

    #[test]
    fn a_panicking_sort_hands_back_its_array() {
        let (mut controller, mut events) = idle_with(&[3, 1, 2]);
        controller.spawn(String::from("sort-faulty"), Faulty).unwrap();
        assert_eq!(controller.state(), RunState::Running);

        let updates = drain(&mut controller, &mut events);

        assert_eq!(controller.state(), RunState::Idle);
        // Whatever the sort did before the panic stays in the array.
        assert_eq!(controller.array(), [1, 3, 2]);

        let last_stats = updates
            .iter()
            .filter_map(|update| match update {
                Update::Stats(stats) => Some(*stats),
                _ => None,
            })
            .last();
        assert_eq!(
            last_stats,
            Some(Stats {
                comparisons: 2,
                swaps: 1
            })
        );
        assert_eq!(Some(controller.stats()), last_stats);

        match updates.last() {
            Some(Update::Finished(frame)) => {
                assert!(frame.indices.is_empty());
                assert_eq!(frame.values, [1, 3, 2]);
            }
            other => panic!("expected the hand-back last, got {other:?}"),
        }

        // The controller is usable again.
        controller.set_speed(Speed::Instant).unwrap();
        controller.start(Algorithm::Insertion).unwrap();
        drain(&mut controller, &mut events);
        assert_eq!(controller.state(), RunState::Completed);
        assert_eq!(controller.array(), [1, 2, 3]);
    }

    #[test]
    fn panic_messages() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
