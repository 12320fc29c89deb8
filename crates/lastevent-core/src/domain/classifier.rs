//! Status classification: the pure core of the crate.
//!
//! Maps an optional event and the current instant to an [`EventStatus`].
//! No clock is read here; callers pass `now` explicitly.

use chrono::{DateTime, Utc};

use super::event::EventRecord;
use super::status::EventStatus;

/// Classify the last event of a group at `now`.
///
/// Evaluated in order, first match wins:
/// 1. no event → `Done`
/// 2. `end_date >= now` → `Active`
/// 3. `end_date + review duration >= now` → `InReview`
/// 4. otherwise → `Done`
///
/// Both comparisons are inclusive, so every `now` falls into exactly one
/// status. A review end outside the representable range counts as never
/// reached.
pub fn classify(event: Option<&EventRecord>, now: DateTime<Utc>) -> EventStatus {
    let Some(event) = event else {
        return EventStatus::Done;
    };

    if event.end_date() >= now {
        return EventStatus::Active;
    }

    match event.review_end() {
        Some(review_end) if review_end < now => EventStatus::Done,
        _ => EventStatus::InReview,
    }
}
