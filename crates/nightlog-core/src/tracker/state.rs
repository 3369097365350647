//! Tracker state as seen by observers.

use serde::{Deserialize, Serialize};

use crate::night::SleepNight;

/// Where the tracker is in its start/stop cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TrackerState {
    /// No sleep session underway.
    Idle,
    /// One in-progress night, held until `stop` or `clear`.
    Tracking(SleepNight),
}

impl TrackerState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackerState::Tracking(_))
    }

    /// The in-progress night, if any.
    pub fn tonight(&self) -> Option<&SleepNight> {
        match self {
            TrackerState::Idle => None,
            TrackerState::Tracking(night) => Some(night),
        }
    }
}

/// What the service publishes to the observing layer after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub state: TrackerState,

    /// Human-readable list of all recorded nights, newest first.
    pub history: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::night::{NightId, QUALITY_UNRATED};

    fn night() -> SleepNight {
        SleepNight {
            id: NightId(1),
            start_time_millis: 1000,
            end_time_millis: 1000,
            quality: QUALITY_UNRATED,
        }
    }

    #[test]
    fn idle_is_not_tracking() {
        assert!(!TrackerState::Idle.is_tracking());
        assert!(TrackerState::Idle.tonight().is_none());
    }

    #[test]
    fn tracking_exposes_tonight() {
        let state = TrackerState::Tracking(night());
        assert!(state.is_tracking());
        assert_eq!(state.tonight(), Some(&night()));
    }

    #[test]
    fn serialization_tags_the_state() {
        let idle = serde_json::to_string(&TrackerState::Idle).unwrap();
        assert!(idle.contains("\"idle\""));

        let tracking = serde_json::to_string(&TrackerState::Tracking(night())).unwrap();
        assert!(tracking.contains("\"tracking\""));
        assert!(tracking.contains("startTimeMillis"));
    }
}
