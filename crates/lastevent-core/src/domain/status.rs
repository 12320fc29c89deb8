//! EventStatus - イベントのライフサイクル状態
//!
//! 分類のたびに新しく作られる値型です（永続化も同一性もありません）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a group's last event.
///
/// # 状態
/// - active: end_date がまだ来ていない（end_date == now を含む）
/// - inReview: end_date は過ぎたが review window 内（終端を含む）
/// - done: review window も過ぎた、またはイベントが存在しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    Active,
    InReview,
    Done,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::InReview => "inReview",
            EventStatus::Done => "done",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
