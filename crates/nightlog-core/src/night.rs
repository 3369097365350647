//! The sleep-night record.

use serde::{Deserialize, Serialize};

/// Quality rating of a night nobody has rated yet.
pub const QUALITY_UNRATED: i32 = -1;

/// Unique identifier for a persisted night, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NightId(pub i64);

impl std::fmt::Display for NightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded sleep session.
///
/// While the session is underway the end time equals the start time; `stop`
/// moves the end time forward, which is what marks the night as finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepNight {
    /// Store-assigned identifier.
    pub id: NightId,

    /// When tracking began, in milliseconds since the Unix epoch.
    pub start_time_millis: i64,

    /// When tracking ended; equals `start_time_millis` while in progress.
    pub end_time_millis: i64,

    /// Rating from 0 to 5, or [`QUALITY_UNRATED`].
    pub quality: i32,
}

impl SleepNight {
    /// A night is in progress while its end time still equals its start time.
    pub fn is_in_progress(&self) -> bool {
        self.end_time_millis == self.start_time_millis
    }

    /// Time slept, in milliseconds. Zero while in progress.
    pub fn duration_millis(&self) -> i64 {
        self.end_time_millis - self.start_time_millis
    }
}

/// A night that has not been persisted yet; the store assigns the id on
/// insert and hands back the full [`SleepNight`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNight {
    pub start_time_millis: i64,
    pub end_time_millis: i64,
    pub quality: i32,
}

impl NewNight {
    /// A fresh, unrated night starting (and, so far, ending) at `now_millis`.
    pub fn starting_at(now_millis: i64) -> Self {
        Self {
            start_time_millis: now_millis,
            end_time_millis: now_millis,
            quality: QUALITY_UNRATED,
        }
    }

    /// Attach the identifier the store assigned.
    pub(crate) fn into_night(self, id: NightId) -> SleepNight {
        SleepNight {
            id,
            start_time_millis: self.start_time_millis,
            end_time_millis: self.end_time_millis,
            quality: self.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod night_id {
        use super::*;

        #[test]
        fn display_shows_inner_value() {
            let id = NightId(42);
            assert_eq!(format!("{}", id), "42");
        }

        #[test]
        fn equality() {
            assert_eq!(NightId(1), NightId(1));
            assert_ne!(NightId(1), NightId(2));
        }

        #[test]
        fn can_be_used_as_hashmap_key() {
            use std::collections::HashMap;
            let mut map = HashMap::new();
            map.insert(NightId(7), "value");
            assert_eq!(map.get(&NightId(7)), Some(&"value"));
        }

        #[test]
        fn serialization_roundtrip() {
            let id = NightId(123);
            let json = serde_json::to_string(&id).unwrap();
            let deserialized: NightId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, deserialized);
        }
    }

    mod sleep_night {
        use super::*;

        fn night(start: i64, end: i64) -> SleepNight {
            SleepNight {
                id: NightId(1),
                start_time_millis: start,
                end_time_millis: end,
                quality: QUALITY_UNRATED,
            }
        }

        #[test]
        fn in_progress_when_times_equal() {
            assert!(night(1000, 1000).is_in_progress());
        }

        #[test]
        fn finished_when_end_moved_forward() {
            assert!(!night(1000, 2000).is_in_progress());
        }

        #[test]
        fn duration_is_end_minus_start() {
            assert_eq!(night(1000, 4000).duration_millis(), 3000);
            assert_eq!(night(1000, 1000).duration_millis(), 0);
        }

        #[test]
        fn serialization_roundtrip() {
            let night = SleepNight {
                id: NightId(3),
                start_time_millis: 1_700_000_000_000,
                end_time_millis: 1_700_000_360_000,
                quality: 4,
            };
            let json = serde_json::to_string(&night).unwrap();
            let parsed: SleepNight = serde_json::from_str(&json).unwrap();
            assert_eq!(night, parsed);
        }

        #[test]
        fn serializes_with_camel_case_fields() {
            let night = night(1000, 2000);
            let json = serde_json::to_string(&night).unwrap();
            assert!(json.contains("startTimeMillis"));
            assert!(json.contains("endTimeMillis"));
        }
    }

    mod new_night {
        use super::*;

        #[test]
        fn starting_at_is_in_progress_and_unrated() {
            let night = NewNight::starting_at(5000);
            assert_eq!(night.start_time_millis, 5000);
            assert_eq!(night.end_time_millis, 5000);
            assert_eq!(night.quality, QUALITY_UNRATED);
        }

        #[test]
        fn into_night_keeps_fields() {
            let night = NewNight::starting_at(5000).into_night(NightId(9));
            assert_eq!(night.id, NightId(9));
            assert_eq!(night.start_time_millis, 5000);
            assert_eq!(night.end_time_millis, 5000);
            assert_eq!(night.quality, QUALITY_UNRATED);
            assert!(night.is_in_progress());
        }
    }
}
