//! Human-readable rendering of recorded nights.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::night::SleepNight;

/// Label for a numeric quality rating. Unrated and out-of-range values
/// render as "--".
pub fn quality_label(quality: i32) -> &'static str {
    match quality {
        0 => "very bad",
        1 => "poor",
        2 => "so-so",
        3 => "OK",
        4 => "pretty good",
        5 => "excellent",
        _ => "--",
    }
}

/// Render nights (newest first, as the store returns them) as one line each:
/// start time, duration slept, quality label. An unfinished night shows as
/// still in progress.
pub fn format_nights(nights: &[SleepNight]) -> String {
    let mut out = String::new();
    for night in nights {
        let started = format_timestamp(night.start_time_millis);
        if night.is_in_progress() {
            let _ = writeln!(out, "{started}: in progress");
        } else {
            let _ = writeln!(
                out,
                "{started}: slept {}, quality: {}",
                format_duration(night.duration_millis()),
                quality_label(night.quality)
            );
        }
    }
    out
}

fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%a %Y-%m-%d %H:%M").to_string(),
        // Out-of-range epoch values should not happen, but render something
        // rather than panic.
        None => format!("@{millis}ms"),
    }
}

fn format_duration(millis: i64) -> String {
    let total_minutes = millis / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours} h {minutes} min")
    } else {
        format!("{minutes} min")
    }
}
