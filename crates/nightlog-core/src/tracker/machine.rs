//! The start/stop/clear state machine over the night store.

use std::sync::Arc;

use chrono::Utc;

use crate::night::{NewNight, SleepNight};
use crate::store::{NightStore, StoreError};
use crate::tracker::state::TrackerState;

/// Tracks at most one in-progress night against a [`NightStore`].
///
/// The store owns everything persisted; the tracker holds a transient copy
/// of the current in-progress record. The copy only moves after the
/// corresponding store write succeeds, so a failed write never leaves the
/// machine claiming state the database does not have.
pub struct SleepTracker {
    store: Arc<dyn NightStore>,
    tonight: Option<SleepNight>,
}

impl SleepTracker {
    /// Build a tracker, resuming any night left in progress.
    ///
    /// Queries the most recent record: if its end time still equals its
    /// start time, the session never finished (the owner was torn down
    /// mid-night) and the tracker picks it back up. Otherwise it starts idle.
    pub async fn resume(store: Arc<dyn NightStore>) -> Result<Self, StoreError> {
        let tonight = store
            .get_tonight()
            .await?
            .filter(SleepNight::is_in_progress);
        if let Some(ref night) = tonight {
            log::debug!("resuming in-progress night {}", night.id);
        }
        Ok(Self { store, tonight })
    }

    /// Current machine state.
    pub fn state(&self) -> TrackerState {
        match &self.tonight {
            Some(night) => TrackerState::Tracking(night.clone()),
            None => TrackerState::Idle,
        }
    }

    /// The in-progress night, if one is being tracked.
    pub fn tonight(&self) -> Option<&SleepNight> {
        self.tonight.as_ref()
    }

    /// Begin a new night with start and end set to now.
    ///
    /// While a night is already in progress this is a warn-logged no-op
    /// rather than a second insert.
    pub async fn start(&mut self) -> Result<(), StoreError> {
        if self.tonight.is_some() {
            log::warn!("start requested while a night is in progress, ignoring");
            return Ok(());
        }

        let now = Utc::now().timestamp_millis();
        let night = self.store.insert(NewNight::starting_at(now)).await?;
        log::debug!("started tracking night {}", night.id);
        self.tonight = Some(night);
        Ok(())
    }

    /// Finish the in-progress night by moving its end time to now.
    ///
    /// Returns the completed record for event emission, or `None` when the
    /// tracker was idle (nothing mutated, nothing to emit).
    pub async fn stop(&mut self) -> Result<Option<SleepNight>, StoreError> {
        let Some(mut completed) = self.tonight.clone() else {
            log::warn!("stop requested while idle, ignoring");
            return Ok(None);
        };

        completed.end_time_millis = Utc::now().timestamp_millis();
        self.store.update(completed.clone()).await?;
        log::debug!("stopped tracking night {}", completed.id);
        self.tonight = None;
        Ok(Some(completed))
    }

    /// Delete every recorded night and drop any in-progress reference.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear().await?;
        log::debug!("cleared all recorded nights");
        self.tonight = None;
        Ok(())
    }
}
