/*!
 * WebVTT timestamp codec.
 *
 * Timestamps are `[H:]MM:SS.mmm` on the wire and integer microseconds in
 * the document model. Formatting truncates to whole milliseconds.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CaptionReadError;

// Anchored at the start only; trailing text after the milliseconds is tolerated.
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2})(?::(\d{2}))?\.(\d{3})").expect("Invalid timestamp regex")
});

/// Build a microsecond count from its clock components.
///
/// Returns `None` when the result does not fit in a `u64`.
pub fn microseconds(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<u64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?
        .checked_mul(1_000_000)?
        .checked_add(millis.checked_mul(1000)?)
}

/// Parse a WebVTT timestamp into microseconds
pub fn parse(text: &str) -> Result<u64, CaptionReadError> {
    let caps = TIMESTAMP_REGEX
        .captures(text)
        .ok_or_else(|| CaptionReadError::syntax("Invalid timing format."))?;

    let number = |index: usize| -> Result<u64, CaptionReadError> {
        caps.get(index)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>())
            .map_err(|_| CaptionReadError::syntax(format!("Timestamp component out of range: {}", text)))
    };

    let millis = number(4)?;
    let total = if caps.get(3).is_some() {
        // H:MM:SS.mmm
        microseconds(number(1)?, number(2)?, number(3)?, millis)
    } else {
        // MM:SS.mmm
        microseconds(0, number(1)?, number(2)?, millis)
    };

    total.ok_or_else(|| CaptionReadError::syntax(format!("Timestamp component out of range: {}", text)))
}

/// Format microseconds as a WebVTT timestamp.
///
/// Minutes and seconds are always present; hours only when non-zero.
pub fn format(microseconds: u64) -> String {
    let total_ms = microseconds / 1000;

    let millis = total_ms % 1000;
    let total_s = total_ms / 1000;
    let seconds = total_s % 60;
    let total_m = total_s / 60;
    let minutes = total_m % 60;
    let hours = total_m / 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
