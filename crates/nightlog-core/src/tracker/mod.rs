//! Sleep-session tracking.
//!
//! [`SleepTracker`] is the synchronous state machine: idle or tracking one
//! in-progress night, cycling between the two through start/stop/clear.
//! [`TrackerService`] wraps it in a worker task so a UI layer can drive it
//! fire-and-forget and observe the results over channels.

mod machine;
mod service;
mod state;

pub use machine::SleepTracker;
pub use service::{TrackerEvent, TrackerService};
pub use state::{TrackerSnapshot, TrackerState};
