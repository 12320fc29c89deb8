//! Event record: the snapshot the lookup port hands to the core.
//!
//! An event is a time-bounded activity of a group, described by the instant
//! its active window ends and the length of the review window that follows.
//! Records are immutable once built; the core only reads them.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::errors::EventRecordError;
use super::group::GroupId;

/// Seconds in one hour.
pub const SECS_PER_HOUR: i64 = 60 * 60;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// The most recent event of a group.
///
/// `review_duration_in_hours` is validated on construction (finite, `>= 0`),
/// and deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEventRecord")]
pub struct EventRecord {
    end_date: DateTime<Utc>,
    review_duration_in_hours: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventRecord {
    end_date: DateTime<Utc>,
    review_duration_in_hours: f64,
}

impl TryFrom<RawEventRecord> for EventRecord {
    type Error = EventRecordError;

    fn try_from(raw: RawEventRecord) -> Result<Self, Self::Error> {
        EventRecord::new(raw.end_date, raw.review_duration_in_hours)
    }
}

impl EventRecord {
    pub fn new(
        end_date: DateTime<Utc>,
        review_duration_in_hours: f64,
    ) -> Result<Self, EventRecordError> {
        if !review_duration_in_hours.is_finite() {
            return Err(EventRecordError::NonFiniteReviewDuration(
                review_duration_in_hours,
            ));
        }
        if review_duration_in_hours < 0.0 {
            return Err(EventRecordError::NegativeReviewDuration(
                review_duration_in_hours,
            ));
        }
        Ok(Self {
            end_date,
            review_duration_in_hours,
        })
    }

    /// Instant the active window ends.
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn review_duration_in_hours(&self) -> f64 {
        self.review_duration_in_hours
    }

    /// Review window length, converted from hours to the resolution of
    /// `DateTime<Utc>` (nanoseconds).
    ///
    /// Whole seconds and the sub-second remainder are converted separately so
    /// that long windows keep their nanosecond part.
    /// Returns `None` when the duration does not fit in a `TimeDelta`.
    pub fn review_duration(&self) -> Option<TimeDelta> {
        let total_secs = self.review_duration_in_hours * SECS_PER_HOUR as f64;
        let whole_secs = total_secs.trunc();
        if whole_secs >= i64::MAX as f64 {
            return None;
        }
        let mut secs = whole_secs as i64;
        let mut nanos = ((total_secs - whole_secs) * NANOS_PER_SEC).round() as u32;
        // 小数部の丸めで 1 秒に達した場合は繰り上げ
        if nanos >= NANOS_PER_SEC as u32 {
            secs = secs.checked_add(1)?;
            nanos = 0;
        }
        TimeDelta::new(secs, nanos)
    }

    /// `end_date + review duration`.
    ///
    /// `None` means the review window reaches past the representable range,
    /// i.e. it never ends.
    pub fn review_end(&self) -> Option<DateTime<Utc>> {
        self.review_duration()
            .and_then(|delta| self.end_date.checked_add_signed(delta))
    }
}

/// An event tagged with its owning group (the shape used by bulk loaders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEventRecord {
    pub group_id: GroupId,
    #[serde(flatten)]
    pub event: EventRecord,
}
