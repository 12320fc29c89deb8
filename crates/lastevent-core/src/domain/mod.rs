//! Domain model (group ids, event records, statuses, classification).
//!
//! - group: GroupId（不透明な識別子）
//! - event: EventRecord / GroupedEventRecord
//! - status: EventStatus（active / inReview / done）
//! - classifier: 純粋関数による状態分類
//! - errors: EventRecord 構築時の検証エラー

pub mod classifier;
pub mod errors;
pub mod event;
pub mod group;
pub mod status;

pub use self::classifier::classify;
pub use self::errors::EventRecordError;
pub use self::event::{EventRecord, GroupedEventRecord, SECS_PER_HOUR};
pub use self::group::GroupId;
pub use self::status::EventStatus;
