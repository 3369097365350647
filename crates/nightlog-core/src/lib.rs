//! # nightlog-core
//!
//! Core sleep tracking logic for Nightlog.
//!
//! This crate is framework-agnostic: it holds everything a GUI shell needs
//! to embed, and nothing about how the shell renders it.
//!
//! ## Key Concepts
//!
//! - **SleepNight**: one recorded sleep session (a "night")
//! - **NightStore**: durable storage seam, with an embedded SQLite backend
//! - **SleepTracker**: the start/stop/clear state machine over the store
//! - **TrackerService**: the async, fire-and-forget surface a UI drives

pub mod format;
pub mod night;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use night::{NewNight, NightId, SleepNight, QUALITY_UNRATED};
pub use store::{NightStore, SqliteStore, StoreError};
pub use tracker::{SleepTracker, TrackerEvent, TrackerService, TrackerSnapshot, TrackerState};
