//! LoadLastEventRepository port - 直近イベントの取得
//!
//! 永続化の仕組み（DB, HTTP API など）はこの crate の外にあります。
//! core が必要とするのは「group の直近イベントを 1 件返す」操作だけです。

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{EventRecord, GroupId};

/// group の直近イベントを返す repository
///
/// # 契約
/// - `group_id` は use case が受け取った値をそのまま渡す
/// - イベントが無ければ `Ok(None)`
/// - 失敗は `Self::Error` として返す（core はこれを変換しない）
#[async_trait]
pub trait LoadLastEventRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn load_last_event(&self, group_id: &GroupId)
        -> Result<Option<EventRecord>, Self::Error>;
}

#[async_trait]
impl<R: LoadLastEventRepository + ?Sized> LoadLastEventRepository for Arc<R> {
    type Error = R::Error;

    async fn load_last_event(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<EventRecord>, Self::Error> {
        (**self).load_last_event(group_id).await
    }
}
