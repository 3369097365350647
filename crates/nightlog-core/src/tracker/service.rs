//! Async fire-and-forget surface over the tracker.
//!
//! UI layers do not await store I/O: they enqueue an operation and observe
//! the outcome. A single worker task owns the [`SleepTracker`] and drains a
//! command queue, which is what makes operations from one service serialized
//! relative to each other. State flows back over a watch channel, completed
//! nights over a one-shot event stream.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::format::format_nights;
use crate::night::{NightId, SleepNight};
use crate::store::{NightStore, StoreError};
use crate::tracker::machine::SleepTracker;
use crate::tracker::state::TrackerSnapshot;

/// Operations accepted by the worker task.
#[derive(Debug)]
enum TrackerCommand {
    Start,
    Stop,
    Clear,
    SetQuality { id: NightId, quality: i32 },
}

/// Events delivered to the observing layer.
///
/// Receiving from the channel consumes the event, so each one is observed
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A night just finished; the UI takes this to the rating screen.
    NightCompleted(SleepNight),

    /// A fire-and-forget operation failed against the store.
    StoreFailed(String),
}

/// Handle to a running tracker worker.
///
/// Dropping the handle closes the command queue: the worker finishes
/// whatever operation is in flight, stops, and never touches its observers
/// again.
pub struct TrackerService {
    commands: mpsc::UnboundedSender<TrackerCommand>,
    state: watch::Receiver<TrackerSnapshot>,
}

impl TrackerService {
    /// Resume a tracker from `store` and spawn its worker task.
    ///
    /// Returns the handle plus the event stream. Must be called on a tokio
    /// runtime; fails if the initial store reads do.
    pub async fn spawn(
        store: Arc<dyn NightStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<TrackerEvent>), StoreError> {
        let tracker = SleepTracker::resume(Arc::clone(&store)).await?;
        let initial = TrackerSnapshot {
            state: tracker.state(),
            history: format_nights(&store.get_all_nights().await?),
        };

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial);

        tokio::spawn(run_worker(tracker, store, command_rx, state_tx, event_tx));

        let service = Self {
            commands: command_tx,
            state: state_rx,
        };
        Ok((service, event_rx))
    }

    /// Begin tracking a new night.
    pub fn start(&self) {
        self.send(TrackerCommand::Start);
    }

    /// Finish the in-progress night.
    pub fn stop(&self) {
        self.send(TrackerCommand::Stop);
    }

    /// Delete all recorded nights.
    pub fn clear(&self) {
        self.send(TrackerCommand::Clear);
    }

    /// Rate a completed night.
    pub fn set_quality(&self, id: NightId, quality: i32) {
        self.send(TrackerCommand::SetQuality { id, quality });
    }

    /// Subscribe to the tracker state and formatted history.
    pub fn watch_state(&self) -> watch::Receiver<TrackerSnapshot> {
        self.state.clone()
    }

    /// The current snapshot, without subscribing.
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.state.borrow().clone()
    }

    fn send(&self, command: TrackerCommand) {
        if self.commands.send(command).is_err() {
            log::warn!("tracker worker is gone, dropping command");
        }
    }
}

async fn run_worker(
    mut tracker: SleepTracker,
    store: Arc<dyn NightStore>,
    mut commands: mpsc::UnboundedReceiver<TrackerCommand>,
    state: watch::Sender<TrackerSnapshot>,
    events: mpsc::UnboundedSender<TrackerEvent>,
) {
    while let Some(command) = commands.recv().await {
        let outcome = match command {
            TrackerCommand::Start => tracker.start().await,
            TrackerCommand::Stop => match tracker.stop().await {
                Ok(Some(completed)) => {
                    let _ = events.send(TrackerEvent::NightCompleted(completed));
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            TrackerCommand::Clear => tracker.clear().await,
            TrackerCommand::SetQuality { id, quality } => store.set_quality(id, quality).await,
        };

        let outcome = match outcome {
            Ok(()) => publish(&tracker, store.as_ref(), &state).await,
            Err(err) => Err(err),
        };

        if let Err(err) = outcome {
            log::error!("store operation failed: {err}");
            let _ = events.send(TrackerEvent::StoreFailed(err.to_string()));
        }
    }
}

/// Re-query the history and publish a fresh snapshot.
///
/// A failed read is reported like any other store failure and the previous
/// snapshot stays in place.
async fn publish(
    tracker: &SleepTracker,
    store: &dyn NightStore,
    state: &watch::Sender<TrackerSnapshot>,
) -> Result<(), StoreError> {
    let nights = store.get_all_nights().await?;
    let _ = state.send(TrackerSnapshot {
        state: tracker.state(),
        history: format_nights(&nights),
    });
    Ok(())
}
